pub(crate) mod palette;
pub(crate) mod presets;
pub(crate) mod sim;
pub(crate) mod wave;
