//! # lutforge-core
//!
//! Core types for 3D LUT synthesis.
//!
//! This crate provides the data structures shared by the LUTForge
//! pipeline crates:
//!
//! - [`LutGrid`] - dense N x N x N grid of RGB samples
//! - [`RgbImage`] - owned float RGB image buffer
//! - Color math primitives ([`luminance`], [`rgb_to_hsv`], [`hsv_to_rgb`])
//!
//! # Grid Ordering
//!
//! Grids are stored in **red-major** order: red is the outer axis, green
//! the middle, blue the inner (blue varies fastest). This matches the
//! line order of the `.cube` interchange format produced by
//! `lutforge-cube`, so encoding is a linear walk over the data.
//!
//! # Example
//!
//! ```rust
//! use lutforge_core::LutGrid;
//!
//! let grid = LutGrid::identity(33);
//! assert_eq!(grid.entry_count(), 35_937);
//! assert_eq!(grid.get(0, 0, 32), [0.0, 0.0, 1.0]);
//! ```
//!
//! # Dependencies
//!
//! - [`thiserror`] - Error handling
//!
//! # Used By
//!
//! - `lutforge-grade` - Parametric grading pipeline
//! - `lutforge-analysis` - Image statistics and color transfer
//! - `lutforge-cube` - `.cube` serialization

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod color;
mod error;
mod grid;
mod image;

pub use color::{hsv_to_rgb, luminance, rgb_to_hsv, REC601_LUMA_B, REC601_LUMA_G, REC601_LUMA_R};
pub use error::{CoreError, CoreResult};
pub use grid::LutGrid;
pub use image::RgbImage;
