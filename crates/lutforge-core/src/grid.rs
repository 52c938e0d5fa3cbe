//! 3-dimensional lookup table grid.
//!
//! A [`LutGrid`] maps quantized RGB input to RGB output through a cube of
//! color values. The grading pipeline mutates values in place; the shape
//! and the meaning of each index never change.

use crate::{CoreError, CoreResult};

/// A dense N x N x N grid of RGB samples.
///
/// # Structure
///
/// - `size^3` entries, each an RGB output triple
/// - Stored in **red-major** order: blue varies fastest, then green,
///   then red (`index = (r * size + g) * size + b`)
/// - Index `(r, g, b)` always represents input color
///   `(r, g, b) / (size - 1)`; transforms mutate values, never shape
///
/// # Example
///
/// ```rust
/// use lutforge_core::LutGrid;
///
/// let grid = LutGrid::identity(33);
/// let mid = grid.get(16, 16, 16);
/// assert!((mid[0] - 0.5).abs() < 0.01);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LutGrid {
    /// Grid data, red-major (blue fastest).
    pub data: Vec<[f32; 3]>,
    /// Samples per axis (typically 33).
    pub size: usize,
}

impl LutGrid {
    /// Creates an identity (pass-through) grid.
    ///
    /// Value at `(r, g, b)` is `(r/(N-1), g/(N-1), b/(N-1))`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use lutforge_core::LutGrid;
    ///
    /// let grid = LutGrid::identity(33);
    /// assert_eq!(grid.get(32, 0, 0), [1.0, 0.0, 0.0]);
    /// ```
    pub fn identity(size: usize) -> Self {
        let total = size * size * size;
        let mut data = Vec::with_capacity(total);
        let scale = 1.0 / (size - 1) as f32;

        for r in 0..size {
            for g in 0..size {
                for b in 0..size {
                    data.push([r as f32 * scale, g as f32 * scale, b as f32 * scale]);
                }
            }
        }

        Self { data, size }
    }

    /// Creates a grid from raw data.
    ///
    /// Data must be in red-major order with exactly `size^3` entries.
    pub fn from_data(data: Vec<[f32; 3]>, size: usize) -> CoreResult<Self> {
        let expected = size * size * size;
        if data.len() != expected {
            return Err(CoreError::InvalidSize(format!(
                "expected {} entries for size {}, got {}",
                expected,
                size,
                data.len()
            )));
        }
        Ok(Self { data, size })
    }

    /// Returns the total number of entries in the grid.
    #[inline]
    pub fn entry_count(&self) -> usize {
        self.size * self.size * self.size
    }

    /// Returns the flat index for grid position `(r, g, b)`.
    #[inline]
    pub fn index(&self, r: usize, g: usize, b: usize) -> usize {
        (r * self.size + g) * self.size + b
    }

    /// Gets the value at grid position `(r, g, b)`.
    #[inline]
    pub fn get(&self, r: usize, g: usize, b: usize) -> [f32; 3] {
        self.data[self.index(r, g, b)]
    }

    /// Sets the value at grid position `(r, g, b)`.
    #[inline]
    pub fn set(&mut self, r: usize, g: usize, b: usize, rgb: [f32; 3]) {
        let idx = self.index(r, g, b);
        self.data[idx] = rgb;
    }

    /// Recovers `(r, g, b)` grid coordinates from a flat index.
    #[inline]
    pub fn coords(&self, index: usize) -> (usize, usize, usize) {
        let n = self.size;
        (index / (n * n), (index / n) % n, index % n)
    }

    /// Expected identity value for a flat index.
    #[inline]
    pub fn identity_value(&self, index: usize) -> [f32; 3] {
        let (r, g, b) = self.coords(index);
        let scale = 1.0 / (self.size - 1) as f32;
        [r as f32 * scale, g as f32 * scale, b as f32 * scale]
    }

    /// Clamps every channel of every entry to `[0, 1]`.
    pub fn clamp_unit(&mut self) {
        for rgb in &mut self.data {
            rgb[0] = rgb[0].clamp(0.0, 1.0);
            rgb[1] = rgb[1].clamp(0.0, 1.0);
            rgb[2] = rgb[2].clamp(0.0, 1.0);
        }
    }

    /// Maximum per-channel deviation from the identity grid.
    pub fn max_identity_deviation(&self) -> f32 {
        let mut max = 0.0f32;
        for (i, rgb) in self.data.iter().enumerate() {
            let ident = self.identity_value(i);
            for c in 0..3 {
                max = max.max((rgb[c] - ident[c]).abs());
            }
        }
        max
    }
}
