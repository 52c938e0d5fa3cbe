//! Statistical color transfer and grid-transform derivation.
//!
//! Rather than applying a distribution-matching transfer pixel by pixel,
//! the adapter uses it to derive a bounded grid transform: per-voxel,
//! a luminance-band-weighted shift toward the reference's band colors,
//! a variance reshaping from the transfer itself, and a bounded
//! temperature/tint correction, all blended 85/15 with the original
//! voxel to keep the result from going extreme or inverting.
//!
//! When the transfer degenerates (flat source, empty input), the
//! adaptive-blend path built from reference statistics alone takes over.
//! That fallback is required behavior, not best effort.

use crate::stats::NEUTRAL_KELVIN;
use crate::{extract_stats, AnalysisError, AnalysisResult, Look, TonalStats};
use lutforge_core::{luminance, LutGrid, RgbImage};
use lutforge_grade::kelvin;
use rand::Rng;
use rayon::prelude::*;
use tracing::debug;

/// Weight of the original voxel value in the final blend.
pub const BLEND_ORIGINAL: f32 = 0.85;

/// Per-channel bound on the pre-blend color shift.
pub const MAX_BAND_SHIFT: f32 = 0.3;

/// Bound on the temperature correction in Kelvin.
const MAX_TEMP_DELTA: f32 = 1500.0;
/// Bound on the tint correction (fraction of full scale).
const MAX_TINT_SHIFT: f32 = 0.2;
/// Per-channel standard deviation below this degenerates the transfer.
const MIN_STD: f32 = 1e-3;
/// Clamp range for the transfer's variance-reshaping gain.
const GAIN_RANGE: (f32, f32) = (0.5, 2.0);
/// Gaussian spread of the per-voxel band weights.
const BAND_SPREAD: f32 = 0.25;

/// Distribution-matching transfer flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferMethod {
    /// Per-channel whitening: match each channel's mean and deviation.
    Linear,
    /// Global statistics: match overall mean and deviation across
    /// channels.
    GlobalStats,
}

/// Linear map extracted from a transfer: `(v - mean) * gain + mean`.
#[derive(Debug, Clone, Copy)]
struct TransferMap {
    src_mean: [f32; 3],
    gain: [f32; 3],
}

#[derive(Debug, Clone, Copy)]
struct Moments {
    mean: [f32; 3],
    std: [f32; 3],
}

fn channel_moments(image: &RgbImage) -> Moments {
    let n = image.pixel_count() as f64;
    let (sum, sum_sq) = image
        .as_slice()
        .par_chunks_exact(3)
        .fold(
            || ([0.0f64; 3], [0.0f64; 3]),
            |(mut s, mut sq), px| {
                for c in 0..3 {
                    s[c] += px[c] as f64;
                    sq[c] += (px[c] as f64) * (px[c] as f64);
                }
                (s, sq)
            },
        )
        .reduce(
            || ([0.0f64; 3], [0.0f64; 3]),
            |(mut a, mut asq), (b, bsq)| {
                for c in 0..3 {
                    a[c] += b[c];
                    asq[c] += bsq[c];
                }
                (a, asq)
            },
        );

    let mut mean = [0.0f32; 3];
    let mut std = [0.0f32; 3];
    for c in 0..3 {
        let m = sum[c] / n;
        mean[c] = m as f32;
        std[c] = ((sum_sq[c] / n - m * m).max(0.0)).sqrt() as f32;
    }
    Moments { mean, std }
}

/// Runs the transfer over normalized image statistics, producing the
/// linear map its effect implies. Degenerate statistics are an error so
/// the caller can take the fallback branch.
fn run_transfer(
    source: &RgbImage,
    reference: &RgbImage,
    method: TransferMethod,
) -> AnalysisResult<TransferMap> {
    if source.pixel_count() == 0 || reference.pixel_count() == 0 {
        return Err(AnalysisError::EmptyImage);
    }

    let src = channel_moments(source);
    let rf = channel_moments(reference);

    match method {
        TransferMethod::Linear => {
            let mut gain = [0.0f32; 3];
            for c in 0..3 {
                if src.std[c] < MIN_STD {
                    return Err(AnalysisError::TransferDegenerate(format!(
                        "source channel {c} deviation {} below {MIN_STD}",
                        src.std[c]
                    )));
                }
                gain[c] = (rf.std[c] / src.std[c]).clamp(GAIN_RANGE.0, GAIN_RANGE.1);
            }
            Ok(TransferMap {
                src_mean: src.mean,
                gain,
            })
        }
        TransferMethod::GlobalStats => {
            let src_std = (src.std[0] + src.std[1] + src.std[2]) / 3.0;
            let ref_std = (rf.std[0] + rf.std[1] + rf.std[2]) / 3.0;
            if src_std < MIN_STD {
                return Err(AnalysisError::TransferDegenerate(format!(
                    "source global deviation {src_std} below {MIN_STD}"
                )));
            }
            let g = (ref_std / src_std).clamp(GAIN_RANGE.0, GAIN_RANGE.1);
            Ok(TransferMap {
                src_mean: src.mean,
                gain: [g, g, g],
            })
        }
    }
}

/// Per-band shift of the voxel color toward the reference band means.
fn band_shifts(src: &TonalStats, reference: &TonalStats) -> [[f32; 3]; 3] {
    let bands = [
        (&src.shadows, &reference.shadows),
        (&src.midtones, &reference.midtones),
        (&src.highlights, &reference.highlights),
    ];
    let mut shifts = [[0.0f32; 3]; 3];
    for (i, (s, r)) in bands.iter().enumerate() {
        for c in 0..3 {
            shifts[i][c] = (r.mean_rgb[c] - s.mean_rgb[c]).clamp(-MAX_BAND_SHIFT, MAX_BAND_SHIFT);
        }
    }
    shifts
}

/// Bounded temperature/tint correction multipliers.
fn correction_multipliers(temp_delta: f32, tint_delta: f32) -> [f32; 3] {
    let temp_mult =
        kelvin::multipliers_for(kelvin::D65_KELVIN + temp_delta.clamp(-MAX_TEMP_DELTA, MAX_TEMP_DELTA));
    let t = (tint_delta / 100.0).clamp(-MAX_TINT_SHIFT, MAX_TINT_SHIFT);
    // Positive tint delta means the reference is greener.
    [
        temp_mult[0] * (1.0 - t),
        temp_mult[1] * (1.0 + t),
        temp_mult[2] * (1.0 - t),
    ]
}

/// Applies the band-weighted, bounded grid transform in place.
fn shift_grid(grid: &mut LutGrid, map: Option<&TransferMap>, shifts: [[f32; 3]; 3], mult: [f32; 3]) {
    let inv_two_sigma_sq = 1.0 / (2.0 * BAND_SPREAD * BAND_SPREAD);

    grid.data.par_iter_mut().for_each(|rgb| {
        let luma = luminance(*rgb);
        let ws = (-(luma) * luma * inv_two_sigma_sq).exp();
        let wm = (-(luma - 0.5) * (luma - 0.5) * inv_two_sigma_sq).exp();
        let wh = (-(luma - 1.0) * (luma - 1.0) * inv_two_sigma_sq).exp();
        let total = ws + wm + wh;
        let (ws, wm, wh) = (ws / total, wm / total, wh / total);

        for c in 0..3 {
            let v = rgb[c];
            let mut adj = match map {
                Some(m) => (v - m.src_mean[c]) * m.gain[c] + m.src_mean[c],
                None => v,
            };
            adj += ws * shifts[0][c] + wm * shifts[1][c] + wh * shifts[2][c];
            adj *= mult[c];

            let delta = (adj - v).clamp(-MAX_BAND_SHIFT, MAX_BAND_SHIFT);
            rgb[c] = (BLEND_ORIGINAL * v + (1.0 - BLEND_ORIGINAL) * (v + delta)).clamp(0.0, 1.0);
        }
    });
}

fn derive_inner(
    source: &RgbImage,
    reference: &RgbImage,
    method: TransferMethod,
    size: usize,
    temperature_bias: f32,
) -> AnalysisResult<LutGrid> {
    let src_stats = extract_stats(source)?;
    let mut ref_stats = extract_stats(reference)?;
    ref_stats.temperature += temperature_bias;

    let mut grid = LutGrid::identity(size);

    match run_transfer(source, reference, method) {
        Ok(map) => {
            let shifts = band_shifts(&src_stats, &ref_stats);
            let mult = correction_multipliers(
                ref_stats.temperature - src_stats.temperature,
                ref_stats.tint - src_stats.tint,
            );
            shift_grid(&mut grid, Some(&map), shifts, mult);
        }
        Err(err) => {
            debug!(%err, "transfer degenerated, using adaptive blend");
            apply_adaptive_blend(&mut grid, &ref_stats);
        }
    }

    Ok(grid)
}

/// Derives a LUT grid that moves `source` toward `reference`.
///
/// Falls back internally to [`adaptive_blend`] when the transfer
/// degenerates; the error never reaches the caller.
pub fn derive_grid(
    source: &RgbImage,
    reference: &RgbImage,
    method: TransferMethod,
    size: usize,
) -> AnalysisResult<LutGrid> {
    derive_inner(source, reference, method, size, 0.0)
}

/// Derives a LUT grid for a catalog look, synthesizing its reference.
///
/// The look's preferred transfer method and temperature bias are
/// applied; `rng` drives the reference perturbation.
pub fn derive_from_look(
    source: &RgbImage,
    look: &Look,
    size: usize,
    rng: &mut impl Rng,
) -> AnalysisResult<LutGrid> {
    let reference = crate::synthesize_reference(look, 256, 256, rng);
    derive_inner(source, &reference, look.method, size, look.temperature_bias)
}

fn apply_adaptive_blend(grid: &mut LutGrid, ref_stats: &TonalStats) {
    // Shift from each band's neutral grey toward the reference band
    // color; no source statistics required.
    let neutral = TonalStats {
        shadows: crate::BandStats {
            mean_rgb: [0.1; 3],
            mean_saturation: 0.0,
            mean_luminance: 0.1,
        },
        midtones: crate::BandStats {
            mean_rgb: [0.5; 3],
            mean_saturation: 0.0,
            mean_luminance: 0.5,
        },
        highlights: crate::BandStats {
            mean_rgb: [0.9; 3],
            mean_saturation: 0.0,
            mean_luminance: 0.9,
        },
        temperature: NEUTRAL_KELVIN,
        tint: 0.0,
        contrast: 0.0,
        saturation: 0.0,
    };

    let shifts = band_shifts(&neutral, ref_stats);
    let mult = correction_multipliers(ref_stats.temperature - NEUTRAL_KELVIN, ref_stats.tint);
    shift_grid(grid, None, shifts, mult);
}

/// Hand-tuned adaptive blend from reference statistics alone.
///
/// Public entry point for the fallback path; `derive_grid` uses it
/// automatically when the transfer fails.
pub fn adaptive_blend(ref_stats: &TonalStats, size: usize) -> LutGrid {
    let mut grid = LutGrid::identity(size);
    apply_adaptive_blend(&mut grid, ref_stats);
    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::find_look;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Source with enough variance to keep the transfer well-posed.
    fn gradient_source(w: usize, h: usize) -> RgbImage {
        let mut img = RgbImage::filled(w, h, [0.0; 3]);
        for y in 0..h {
            for x in 0..w {
                let t = (x + y) as f32 / (w + h - 2) as f32;
                img.set_pixel(x, y, [t, t * 0.9, t * 1.1 - 0.05]);
            }
        }
        img.clamp_unit();
        img
    }

    #[test]
    fn derived_grid_stays_in_unit_range() {
        let source = gradient_source(64, 64);
        let mut rng = StdRng::seed_from_u64(11);
        for look in crate::looks() {
            let grid = derive_from_look(&source, look, 33, &mut rng).unwrap();
            for rgb in &grid.data {
                for &v in rgb {
                    assert!((0.0..=1.0).contains(&v), "{}: {v}", look.name);
                }
            }
        }
    }

    #[test]
    fn derived_grid_is_not_identity() {
        let source = gradient_source(64, 64);
        let look = find_look("golden_hour").unwrap();
        let mut rng = StdRng::seed_from_u64(13);
        let grid = derive_from_look(&source, look, 33, &mut rng).unwrap();
        assert!(grid.max_identity_deviation() > 1e-3);
    }

    #[test]
    fn flat_source_takes_fallback_within_bounds() {
        // Zero variance forces the transfer to degenerate; the
        // adaptive-blend fallback must still deliver a bounded grid.
        let source = RgbImage::filled(32, 32, [0.5, 0.5, 0.5]);
        let look = find_look("orange_teal").unwrap();
        let mut rng = StdRng::seed_from_u64(17);
        let grid = derive_from_look(&source, look, 33, &mut rng).unwrap();

        let max_dev = grid.max_identity_deviation();
        assert!(max_dev > 0.0, "fallback should still grade");
        // 15% blend of a shift bounded at 0.3.
        assert!(max_dev <= 0.15, "deviation {max_dev} exceeds blend bound");
        for rgb in &grid.data {
            for &v in rgb {
                assert!((0.0..=1.0).contains(&v));
            }
        }
    }

    #[test]
    fn transfer_rejects_flat_source() {
        let flat = RgbImage::filled(16, 16, [0.3, 0.3, 0.3]);
        let reference = gradient_source(16, 16);
        assert!(matches!(
            run_transfer(&flat, &reference, TransferMethod::Linear),
            Err(AnalysisError::TransferDegenerate(_))
        ));
        assert!(matches!(
            run_transfer(&flat, &reference, TransferMethod::GlobalStats),
            Err(AnalysisError::TransferDegenerate(_))
        ));
    }

    #[test]
    fn adaptive_blend_deviation_respects_blend_ratio() {
        let reference = gradient_source(32, 32);
        let stats = extract_stats(&reference).unwrap();
        let grid = adaptive_blend(&stats, 17);
        assert!(grid.max_identity_deviation() <= 0.15);
    }

    #[test]
    fn warm_reference_warms_midtones() {
        let source = gradient_source(64, 64);
        let reference = RgbImage::from_data(
            (0..64 * 64)
                .flat_map(|i| {
                    let t = (i % 64) as f32 / 63.0;
                    [0.6 + 0.3 * t, 0.45 + 0.2 * t, 0.25 + 0.15 * t]
                })
                .collect(),
            64,
            64,
        )
        .unwrap();

        let grid = derive_grid(&source, &reference, TransferMethod::Linear, 33).unwrap();
        let mid = grid.get(16, 16, 16);
        assert!(mid[0] > mid[2], "warm reference should tilt red: {mid:?}");
    }
}
