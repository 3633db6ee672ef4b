pub(crate) mod boundary;
pub(crate) mod center;
pub(crate) mod region_search;
pub(crate) mod strategy;
