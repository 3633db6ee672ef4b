pub(crate) mod composer;
pub(crate) mod config;
pub(crate) mod ordering;
pub(crate) mod report;
