//! CLI command implementations

pub mod apply;
pub mod info;
pub mod palette;

use anyhow::Result;
use pixtune_core::PixelBuffer;
use std::path::Path;
use tracing::info;

/// Load image from path
pub fn load_image(path: &Path) -> Result<PixelBuffer> {
    let image = crate::io::read_png(path)?;
    info!(path = %path.display(), width = image.width(), height = image.height(), "loaded");
    Ok(image)
}

/// Save image to path
pub fn save_image(path: &Path, image: &PixelBuffer) -> Result<()> {
    crate::io::write_png(path, image)?;
    info!(path = %path.display(), width = image.width(), height = image.height(), "saved");
    Ok(())
}
