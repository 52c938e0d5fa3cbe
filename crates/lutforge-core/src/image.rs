//! Float RGB image buffer.
//!
//! The analysis crates consume already-decoded images; file formats and
//! decoding live at the CLI boundary, not here.

use crate::{CoreError, CoreResult};

/// Owned H x W x 3 image with `f32` channels, conceptually in `[0, 1]`.
///
/// Pixels are stored interleaved in row-major order:
/// `[R G B R G B ...]` for row 0, then row 1, and so on.
///
/// # Example
///
/// ```rust
/// use lutforge_core::RgbImage;
///
/// let img = RgbImage::filled(4, 4, [0.5, 0.5, 0.5]);
/// assert_eq!(img.pixel(2, 3), [0.5, 0.5, 0.5]);
/// ```
#[derive(Debug, Clone)]
pub struct RgbImage {
    data: Vec<f32>,
    width: usize,
    height: usize,
}

impl RgbImage {
    /// Creates an image from interleaved RGB data.
    ///
    /// `data.len()` must equal `width * height * 3`.
    pub fn from_data(data: Vec<f32>, width: usize, height: usize) -> CoreResult<Self> {
        let expected = width * height * 3;
        if data.len() != expected {
            return Err(CoreError::InvalidDimensions(format!(
                "expected {} floats for {}x{}, got {}",
                expected,
                width,
                height,
                data.len()
            )));
        }
        Ok(Self { data, width, height })
    }

    /// Creates an image filled with a constant color.
    pub fn filled(width: usize, height: usize, rgb: [f32; 3]) -> Self {
        let mut data = Vec::with_capacity(width * height * 3);
        for _ in 0..width * height {
            data.extend_from_slice(&rgb);
        }
        Self { data, width, height }
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Gets the pixel at `(x, y)`.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [f32; 3] {
        let i = (y * self.width + x) * 3;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    /// Sets the pixel at `(x, y)`.
    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, rgb: [f32; 3]) {
        let i = (y * self.width + x) * 3;
        self.data[i..i + 3].copy_from_slice(&rgb);
    }

    /// Interleaved RGB data.
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Mutable interleaved RGB data.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Iterator over pixels as RGB triples.
    pub fn pixels(&self) -> impl Iterator<Item = [f32; 3]> + '_ {
        self.data.chunks_exact(3).map(|c| [c[0], c[1], c[2]])
    }

    /// Clamps every channel to `[0, 1]`.
    pub fn clamp_unit(&mut self) {
        for v in &mut self.data {
            *v = v.clamp(0.0, 1.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_data_validates_length() {
        assert!(RgbImage::from_data(vec![0.0; 11], 2, 2).is_err());
        assert!(RgbImage::from_data(vec![0.0; 12], 2, 2).is_ok());
    }

    #[test]
    fn pixel_accessors() {
        let mut img = RgbImage::filled(3, 2, [0.0, 0.0, 0.0]);
        img.set_pixel(2, 1, [0.1, 0.2, 0.3]);
        assert_eq!(img.pixel(2, 1), [0.1, 0.2, 0.3]);
        assert_eq!(img.pixel(0, 0), [0.0, 0.0, 0.0]);
        assert_eq!(img.pixels().count(), 6);
    }
}
