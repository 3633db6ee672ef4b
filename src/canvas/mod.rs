pub(crate) mod composite;
pub(crate) mod occupancy;
pub(crate) mod overlap;
pub(crate) mod surface;
