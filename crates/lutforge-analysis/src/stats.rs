//! Tonal statistics extraction.
//!
//! Partitions an image into shadow/midtone/highlight bands by fixed
//! luminance thresholds and reduces each band to mean color, saturation
//! and luminance, plus global temperature/tint/contrast estimates.
//!
//! The band thresholds here (0.25 / 0.75) are this extractor's
//! constants; the grading stages in `lutforge-grade` use their own
//! 0.3 / 0.7 thresholds.

use crate::{AnalysisError, AnalysisResult};
use lutforge_core::{luminance, rgb_to_hsv, RgbImage};
use rayon::prelude::*;

/// Luminance below this is "shadows" for statistics.
pub const STATS_SHADOW_LUMA: f32 = 0.25;
/// Luminance above this is "highlights" for statistics.
pub const STATS_HIGHLIGHT_LUMA: f32 = 0.75;

/// Temperature bucket for red-heavy images.
pub const WARM_KELVIN: f32 = 3200.0;
/// Temperature bucket for balanced images.
pub const NEUTRAL_KELVIN: f32 = 5500.0;
/// Temperature bucket for blue-heavy images.
pub const COOL_KELVIN: f32 = 6500.0;

/// Red/blue mean ratio above this reads as warm.
const WARM_RATIO: f32 = 1.1;
/// Red/blue mean ratio below this reads as cool.
const COOL_RATIO: f32 = 0.9;

/// Mean statistics for one luminance band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandStats {
    /// Mean RGB color of pixels in the band.
    pub mean_rgb: [f32; 3],
    /// Mean HSV saturation of pixels in the band.
    pub mean_saturation: f32,
    /// Mean luminance of pixels in the band.
    pub mean_luminance: f32,
}

impl BandStats {
    fn neutral(grey: f32) -> Self {
        Self {
            mean_rgb: [grey, grey, grey],
            mean_saturation: 0.0,
            mean_luminance: grey,
        }
    }
}

/// Tonal statistics of an image.
///
/// Derived read-only from an input image, never mutated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TonalStats {
    /// Shadow band (luminance < 0.25).
    pub shadows: BandStats,
    /// Midtone band.
    pub midtones: BandStats,
    /// Highlight band (luminance > 0.75).
    pub highlights: BandStats,
    /// Coarse temperature bucket in Kelvin, from the red/blue channel
    /// ratio. A heuristic label, not a physical measurement.
    pub temperature: f32,
    /// Tint estimate: `(mean G - mean of R and B) * 100`.
    pub tint: f32,
    /// Contrast estimate: standard deviation of luminance.
    pub contrast: f32,
    /// Mean HSV saturation over the whole image.
    pub saturation: f32,
}

/// Running sums for one band.
#[derive(Debug, Clone, Copy, Default)]
struct BandAccum {
    rgb: [f64; 3],
    saturation: f64,
    luminance: f64,
    count: u64,
}

impl BandAccum {
    fn add(&mut self, rgb: [f32; 3], sat: f32, luma: f32) {
        for c in 0..3 {
            self.rgb[c] += rgb[c] as f64;
        }
        self.saturation += sat as f64;
        self.luminance += luma as f64;
        self.count += 1;
    }

    fn merge(mut self, other: Self) -> Self {
        for c in 0..3 {
            self.rgb[c] += other.rgb[c];
        }
        self.saturation += other.saturation;
        self.luminance += other.luminance;
        self.count += other.count;
        self
    }

    fn finish(self, fallback_grey: f32) -> BandStats {
        if self.count == 0 {
            return BandStats::neutral(fallback_grey);
        }
        let n = self.count as f64;
        BandStats {
            mean_rgb: [
                (self.rgb[0] / n) as f32,
                (self.rgb[1] / n) as f32,
                (self.rgb[2] / n) as f32,
            ],
            mean_saturation: (self.saturation / n) as f32,
            mean_luminance: (self.luminance / n) as f32,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Accum {
    shadows: BandAccum,
    midtones: BandAccum,
    highlights: BandAccum,
    rgb: [f64; 3],
    luma: f64,
    luma_sq: f64,
    saturation: f64,
    count: u64,
}

impl Accum {
    fn add(mut self, rgb: [f32; 3]) -> Self {
        let luma = luminance(rgb);
        let sat = rgb_to_hsv(rgb)[1];

        let band = if luma < STATS_SHADOW_LUMA {
            &mut self.shadows
        } else if luma > STATS_HIGHLIGHT_LUMA {
            &mut self.highlights
        } else {
            &mut self.midtones
        };
        band.add(rgb, sat, luma);

        for c in 0..3 {
            self.rgb[c] += rgb[c] as f64;
        }
        self.luma += luma as f64;
        self.luma_sq += (luma as f64) * (luma as f64);
        self.saturation += sat as f64;
        self.count += 1;
        self
    }

    fn merge(mut self, other: Self) -> Self {
        self.shadows = self.shadows.merge(other.shadows);
        self.midtones = self.midtones.merge(other.midtones);
        self.highlights = self.highlights.merge(other.highlights);
        for c in 0..3 {
            self.rgb[c] += other.rgb[c];
        }
        self.luma += other.luma;
        self.luma_sq += other.luma_sq;
        self.saturation += other.saturation;
        self.count += other.count;
        self
    }
}

/// Extracts tonal statistics from an image.
///
/// Empty bands fall back to documented neutral greys (0.1 for shadows,
/// 0.5 for midtones, 0.9 for highlights) so means are always defined.
pub fn extract_stats(image: &RgbImage) -> AnalysisResult<TonalStats> {
    if image.pixel_count() == 0 {
        return Err(AnalysisError::EmptyImage);
    }

    let accum = image
        .as_slice()
        .par_chunks_exact(3)
        .fold(Accum::default, |acc, px| acc.add([px[0], px[1], px[2]]))
        .reduce(Accum::default, Accum::merge);

    let n = accum.count as f64;
    let mean_r = (accum.rgb[0] / n) as f32;
    let mean_g = (accum.rgb[1] / n) as f32;
    let mean_b = (accum.rgb[2] / n) as f32;

    let ratio = mean_r / mean_b.max(1e-4);
    let temperature = if ratio > WARM_RATIO {
        WARM_KELVIN
    } else if ratio < COOL_RATIO {
        COOL_KELVIN
    } else {
        NEUTRAL_KELVIN
    };

    let mean_luma = accum.luma / n;
    let variance = (accum.luma_sq / n - mean_luma * mean_luma).max(0.0);

    Ok(TonalStats {
        shadows: accum.shadows.finish(0.1),
        midtones: accum.midtones.finish(0.5),
        highlights: accum.highlights.finish(0.9),
        temperature,
        tint: (mean_g - (mean_r + mean_b) / 2.0) * 100.0,
        contrast: variance.sqrt() as f32,
        saturation: (accum.saturation / n) as f32,
    })
}
