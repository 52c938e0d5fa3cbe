//! # lutforge-analysis
//!
//! Image-driven LUT synthesis: tonal statistics, the named-look catalog,
//! procedural reference images, and the statistical color-transfer
//! adapter.
//!
//! # Pipeline
//!
//! The image-driven path extracts [`TonalStats`] from a source image and
//! a reference image (loaded, or synthesized from a catalog [`Look`]),
//! runs a distribution-matching transfer, and derives a bounded grid
//! transform from its effect. When the transfer degenerates the adapter
//! falls back to an adaptive blend built from reference statistics
//! alone; the fallback is part of the contract, not an option.
//!
//! # Example
//!
//! ```rust
//! use lutforge_analysis::{derive_from_look, find_look};
//! use lutforge_core::RgbImage;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let look = find_look("orange_teal").unwrap();
//! let source = RgbImage::filled(64, 64, [0.4, 0.5, 0.6]);
//! let mut rng = StdRng::seed_from_u64(7);
//! let grid = derive_from_look(&source, look, 33, &mut rng).unwrap();
//! assert_eq!(grid.size, 33);
//! ```
//!
//! # Dependencies
//!
//! - [`lutforge-core`] - Image and grid types
//! - [`lutforge-grade`] - Kelvin multipliers for temperature correction
//! - [`rayon`] - Per-pixel and per-voxel parallelism
//! - [`rand`] - Reference-image perturbation
//! - [`thiserror`] / [`tracing`] - Errors and fallback diagnostics
//!
//! # Used By
//!
//! - `lutforge-cli` - The image-pair orchestration path

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod looks;
mod stats;
mod synth;
mod transfer;

pub use error::{AnalysisError, AnalysisResult};
pub use looks::{find_look, looks, Look, ReferencePattern};
pub use stats::{
    extract_stats, BandStats, TonalStats, COOL_KELVIN, NEUTRAL_KELVIN, STATS_HIGHLIGHT_LUMA,
    STATS_SHADOW_LUMA, WARM_KELVIN,
};
pub use synth::synthesize_reference;
pub use transfer::{
    adaptive_blend, derive_from_look, derive_grid, TransferMethod, BLEND_ORIGINAL, MAX_BAND_SHIFT,
};
