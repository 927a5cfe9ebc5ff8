pub(crate) mod clock;
pub(crate) mod decay;
pub(crate) mod image_source;
pub(crate) mod manager;
pub(crate) mod pool;
pub(crate) mod sequence;
pub(crate) mod source;
