//! Subcommand implementations.

pub mod check;
pub mod grade;
pub mod looks;
pub mod matching;

use anyhow::{Context, Result};
use lutforge_core::RgbImage;
use std::path::Path;

/// Decodes an image file to a float RGB buffer in `[0, 1]`.
///
/// This is the only place raster formats exist; everything past this
/// boundary works on decoded float buffers.
pub fn load_image(path: &Path) -> Result<RgbImage> {
    let decoded = image::open(path)
        .with_context(|| format!("failed to decode {}", path.display()))?
        .to_rgb32f();
    let (width, height) = (decoded.width() as usize, decoded.height() as usize);
    let mut img = RgbImage::from_data(decoded.into_raw(), width, height)?;
    img.clamp_unit();
    Ok(img)
}
