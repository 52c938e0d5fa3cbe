//! # lutforge-grade
//!
//! Parametric color-grading pipeline over 3D LUT grids.
//!
//! Takes a [`GradeParams`] record (JSON-object-shaped, every field
//! optional with a neutral default) and applies an ordered chain of pure
//! grid-to-grid operators to an identity [`LutGrid`]:
//!
//! 1. Contrast (black/white point remap)
//! 2. Tonal tint (shadows, then highlights)
//! 3. Saturation (HSV)
//! 4. Per-channel gamma
//! 5. Lift / Gamma / Gain
//! 6. Temperature / Tint
//! 7. Channel curves (luminance-weighted)
//!
//! The order is part of the output contract and must not change.
//!
//! # Example
//!
//! ```rust
//! use lutforge_core::LutGrid;
//! use lutforge_grade::{apply, GradeParams};
//!
//! let params = GradeParams::default();
//! let mut grid = LutGrid::identity(33);
//! apply(&params, &mut grid).unwrap();
//! // An all-default record leaves the grid at identity.
//! assert!(grid.max_identity_deviation() < 1e-5);
//! ```
//!
//! # Dependencies
//!
//! - [`lutforge-core`] - Grid and color math
//! - [`serde`] - Parameter record deserialization
//! - [`rayon`] - Per-voxel parallelism
//! - [`thiserror`] / [`tracing`] - Errors and degraded-input warnings
//!
//! # Used By
//!
//! - `lutforge-analysis` - Temperature correction in color transfer
//! - `lutforge-cli` - Parameter-driven LUT generation

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod kelvin;
mod params;
mod stages;

pub use error::{GradeError, GradeResult};
pub use params::{ChannelAdjustments, GradeParams, TonalTint};
pub use stages::{
    apply, apply_channel_curves, apply_channel_gamma, apply_contrast, apply_lift_gamma_gain,
    apply_saturation, apply_temperature_tint, apply_tonal_tint, TonalRegion, CURVE_SPREAD,
    HIGHLIGHT_LUMA, SHADOW_LUMA,
};
