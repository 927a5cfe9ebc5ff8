pub(crate) mod composite;
pub(crate) mod cpu;
pub(crate) mod surface;
pub(crate) mod svg;
