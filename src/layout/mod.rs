pub(crate) mod regions;
