use std::path::Path;

use anyhow::Context as _;

use crate::{
    encode::ffmpeg::ensure_parent_dir, foundation::error::HeartwaveResult,
    render::surface::FrameRGBA,
};

/// Write `frame` as a straight-alpha RGBA PNG, creating parent directories as needed.
pub fn write_png(frame: &FrameRGBA, path: &Path) -> HeartwaveResult<()> {
    ensure_parent_dir(path)?;
    let straight = frame.to_straight_rgba8()?;
    image::save_buffer_with_format(
        path,
        &straight,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    tracing::debug!(path = %path.display(), "png written");
    Ok(())
}
