//! Ordered grid-to-grid grading stages.
//!
//! Each stage is a pure function over the grid: every voxel is computed
//! independently from the same immutable coefficients, so stages run
//! voxel-parallel with rayon. Stage order changes visible output and is
//! fixed by [`apply`].

use crate::kelvin;
use crate::{GradeParams, GradeResult};
use lutforge_core::{hsv_to_rgb, luminance, rgb_to_hsv, LutGrid};
use rayon::prelude::*;
use tracing::warn;

/// Luminance below this is "shadows" for the tint stages.
///
/// The statistics extractor in `lutforge-analysis` uses its own 0.25 /
/// 0.75 thresholds; the two sets are deliberately kept as per-component
/// constants.
pub const SHADOW_LUMA: f32 = 0.3;

/// Luminance above this is "highlights" for the tint stages.
pub const HIGHLIGHT_LUMA: f32 = 0.7;

/// Gaussian spread of the channel-curve band weights.
pub const CURVE_SPREAD: f32 = 0.25;

/// Positive floor applied before power functions.
const GAMMA_FLOOR: f32 = 1e-6;

/// Tint color names the tint stages recognize.
///
/// `"neutral"` is an explicit no-op; anything else outside this list
/// degrades to a no-op with a warning.
const TINT_COLORS: [&str; 8] = [
    "cyan", "teal", "blue", "orange", "gold", "red", "magenta", "green",
];

/// Luminance-defined region of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TonalRegion {
    /// Luminance below [`SHADOW_LUMA`].
    Shadows,
    /// Between the two thresholds.
    Midtones,
    /// Luminance above [`HIGHLIGHT_LUMA`].
    Highlights,
}

impl TonalRegion {
    /// Hard membership test; no smoothing across the boundary.
    #[inline]
    pub fn contains(self, luma: f32) -> bool {
        match self {
            TonalRegion::Shadows => luma < SHADOW_LUMA,
            TonalRegion::Midtones => (SHADOW_LUMA..=HIGHLIGHT_LUMA).contains(&luma),
            TonalRegion::Highlights => luma > HIGHLIGHT_LUMA,
        }
    }
}

/// Applies the full grading chain to a grid, in the contract order.
///
/// Validates the record first; numeric stages assume in-domain
/// coefficients and never fail at runtime.
pub fn apply(params: &GradeParams, grid: &mut LutGrid) -> GradeResult<()> {
    params.validate()?;

    apply_contrast(grid, params.black_point, params.white_point);
    apply_tonal_tint(grid, &params.shadow_tint, TonalRegion::Shadows);
    apply_tonal_tint(grid, &params.highlight_tint, TonalRegion::Highlights);
    apply_saturation(grid, params.saturation);
    apply_channel_gamma(grid, &params.channel_adjustments);
    apply_lift_gamma_gain(grid, params.lift, params.gamma, params.gain);
    apply_temperature_tint(grid, params.temperature, params.tint);
    apply_channel_curves(
        grid,
        params.shadow_curve,
        params.midtone_curve,
        params.highlight_curve,
        CURVE_SPREAD,
    );

    Ok(())
}

/// Stage 1: black/white point contrast remap.
///
/// `scale = 1 / (white_point - black_point)`, then
/// `value * scale - black_point * scale`, clamped to `[0, 1]`.
/// For `black_point = 0, white_point = 1` this is an exact identity.
/// The caller contract guarantees `white_point > black_point`.
pub fn apply_contrast(grid: &mut LutGrid, black_point: f32, white_point: f32) {
    let scale = 1.0 / (white_point - black_point);
    let offset = -black_point * scale;

    grid.data.par_iter_mut().for_each(|rgb| {
        for c in 0..3 {
            rgb[c] = (rgb[c] * scale + offset).clamp(0.0, 1.0);
        }
    });
}

/// Stage 2: tonal tint for one region.
///
/// Voxels whose luminance falls in `region` are multiplied by the
/// balance triple; all others pass through unchanged. A `"neutral"`
/// color is a no-op; an unrecognized color name degrades to a no-op
/// with a warning instead of failing.
pub fn apply_tonal_tint(grid: &mut LutGrid, tint: &crate::TonalTint, region: TonalRegion) {
    if tint.color == "neutral" {
        return;
    }
    if !TINT_COLORS.contains(&tint.color.as_str()) {
        warn!(color = %tint.color, "unknown tint color, treating as neutral");
        return;
    }

    let balance = tint.balance;
    grid.data.par_iter_mut().for_each(|rgb| {
        if region.contains(luminance(*rgb)) {
            rgb[0] *= balance[0];
            rgb[1] *= balance[1];
            rgb[2] *= balance[2];
        }
    });
}

/// Stage 3: HSV saturation scale.
///
/// Hue and value are unchanged; S is scaled and clamped to `[0, 1]`.
/// A factor of exactly 1.0 skips the conversion entirely so the stage
/// is a bit-exact no-op.
pub fn apply_saturation(grid: &mut LutGrid, factor: f32) {
    if factor == 1.0 {
        return;
    }

    grid.data.par_iter_mut().for_each(|rgb| {
        let mut hsv = rgb_to_hsv(*rgb);
        hsv[1] = (hsv[1] * factor).clamp(0.0, 1.0);
        *rgb = hsv_to_rgb(hsv);
    });
}

/// Stage 4: optional per-channel power adjustments.
///
/// For each present gamma, applies `value^gamma` to that channel;
/// absent fields are no-ops. The whole grid is clamped afterwards.
pub fn apply_channel_gamma(grid: &mut LutGrid, adjustments: &crate::ChannelAdjustments) {
    if adjustments.is_empty() {
        return;
    }

    let gammas = [
        adjustments.red_gamma,
        adjustments.green_gamma,
        adjustments.blue_gamma,
    ];
    grid.data.par_iter_mut().for_each(|rgb| {
        for c in 0..3 {
            if let Some(gamma) = gammas[c] {
                rgb[c] = rgb[c].max(0.0).powf(gamma);
            }
            rgb[c] = rgb[c].clamp(0.0, 1.0);
        }
    });
}

/// Stage 5: lift, then gamma, then gain.
///
/// Lift shifts toward white proportional to `1 - value`; gamma applies
/// `value^(1/gamma)` after flooring the base at a small positive value;
/// gain multiplies. Clamped to `[0, 1]` at the end. The three-stage
/// order is the professional shadow/mid/highlight correction model and
/// is fixed.
pub fn apply_lift_gamma_gain(grid: &mut LutGrid, lift: [f32; 3], gamma: [f32; 3], gain: [f32; 3]) {
    let inv_gamma = [1.0 / gamma[0], 1.0 / gamma[1], 1.0 / gamma[2]];

    grid.data.par_iter_mut().for_each(|rgb| {
        for c in 0..3 {
            let mut v = rgb[c];
            v += lift[c] * (1.0 - v);
            v = v.max(GAMMA_FLOOR).powf(inv_gamma[c]);
            v *= gain[c];
            rgb[c] = v.clamp(0.0, 1.0);
        }
    });
}

/// Stage 6: temperature and magenta/green tint.
///
/// The Kelvin target is converted to per-channel multipliers normalized
/// against D65, so 6500 K is an exact identity; a positive tint nudges
/// red and blue up and green down, proportional to `tint / 100`.
/// Clamped to `[0, 1]`.
pub fn apply_temperature_tint(grid: &mut LutGrid, temperature: f32, tint: f32) {
    let temp_mult = kelvin::multipliers_for(temperature);
    let t = tint / 100.0;
    let mult = [
        temp_mult[0] * (1.0 + t),
        temp_mult[1] * (1.0 - t),
        temp_mult[2] * (1.0 + t),
    ];
    if mult == [1.0, 1.0, 1.0] {
        return;
    }

    grid.data.par_iter_mut().for_each(|rgb| {
        for c in 0..3 {
            rgb[c] = (rgb[c] * mult[c]).clamp(0.0, 1.0);
        }
    });
}

/// Stage 7: per-region channel curves with soft luminance masks.
///
/// Three Gaussian bumps centered at luminance 0, 0.5 and 1 are
/// normalized to sum to 1 per voxel, the three curve multipliers are
/// blended with those weights per channel, and each channel gets
/// `value^(1/blended)`. Clamped to `[0, 1]`.
pub fn apply_channel_curves(
    grid: &mut LutGrid,
    shadows: [f32; 3],
    midtones: [f32; 3],
    highlights: [f32; 3],
    spread: f32,
) {
    if shadows == [1.0; 3] && midtones == [1.0; 3] && highlights == [1.0; 3] {
        return;
    }

    let inv_two_sigma_sq = 1.0 / (2.0 * spread * spread);
    let gauss = move |luma: f32, center: f32| -> f32 {
        (-(luma - center) * (luma - center) * inv_two_sigma_sq).exp()
    };

    grid.data.par_iter_mut().for_each(|rgb| {
        let luma = luminance(*rgb);
        let ws = gauss(luma, 0.0);
        let wm = gauss(luma, 0.5);
        let wh = gauss(luma, 1.0);
        let total = ws + wm + wh;
        let (ws, wm, wh) = (ws / total, wm / total, wh / total);

        for c in 0..3 {
            let blended = ws * shadows[c] + wm * midtones[c] + wh * highlights[c];
            rgb[c] = rgb[c].max(GAMMA_FLOOR).powf(1.0 / blended).clamp(0.0, 1.0);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TonalTint;

    fn max_deviation(a: &LutGrid, b: &LutGrid) -> f32 {
        a.data
            .iter()
            .zip(&b.data)
            .flat_map(|(x, y)| (0..3).map(move |c| (x[c] - y[c]).abs()))
            .fold(0.0, f32::max)
    }

    #[test]
    fn default_record_is_identity() {
        let mut grid = LutGrid::identity(33);
        apply(&GradeParams::default(), &mut grid).unwrap();
        assert!(grid.max_identity_deviation() < 1e-5);
    }

    #[test]
    fn contrast_identity_at_full_range() {
        let mut grid = LutGrid::identity(17);
        let reference = grid.clone();
        apply_contrast(&mut grid, 0.0, 1.0);
        assert_eq!(grid, reference);
    }

    #[test]
    fn contrast_remaps_black_point() {
        let mut grid = LutGrid::identity(17);
        apply_contrast(&mut grid, 0.25, 1.0);
        // Inputs at or below the black point collapse to zero.
        assert_eq!(grid.get(4, 4, 4), [0.0, 0.0, 0.0]);
        assert_eq!(grid.get(16, 16, 16), [1.0, 1.0, 1.0]);
    }

    #[test]
    fn saturation_one_is_noop() {
        let mut grid = LutGrid::identity(17);
        let reference = grid.clone();
        apply_saturation(&mut grid, 1.0);
        assert_eq!(grid, reference);
    }

    #[test]
    fn saturation_zero_desaturates() {
        let mut grid = LutGrid::identity(9);
        apply_saturation(&mut grid, 0.0);
        for rgb in &grid.data {
            assert!((rgb[0] - rgb[1]).abs() < 1e-5, "not grey: {rgb:?}");
            assert!((rgb[1] - rgb[2]).abs() < 1e-5, "not grey: {rgb:?}");
        }
    }

    #[test]
    fn unity_balance_tint_is_noop_for_any_color() {
        for color in ["cyan", "teal", "gold", "magenta"] {
            let mut grid = LutGrid::identity(9);
            let reference = grid.clone();
            let tint = TonalTint {
                color: color.into(),
                balance: [1.0, 1.0, 1.0],
            };
            apply_tonal_tint(&mut grid, &tint, TonalRegion::Shadows);
            assert_eq!(grid, reference, "color {color} changed the grid");
        }
    }

    #[test]
    fn unknown_tint_color_degrades_to_noop() {
        let mut grid = LutGrid::identity(9);
        let reference = grid.clone();
        let tint = TonalTint {
            color: "chartreuse".into(),
            balance: [0.5, 0.5, 0.5],
        };
        apply_tonal_tint(&mut grid, &tint, TonalRegion::Shadows);
        assert_eq!(grid, reference);
    }

    #[test]
    fn shadow_tint_leaves_highlights_untouched() {
        let mut grid = LutGrid::identity(33);
        let reference = grid.clone();
        let tint = TonalTint {
            color: "cyan".into(),
            balance: [0.9, 1.0, 1.1],
        };
        apply_tonal_tint(&mut grid, &tint, TonalRegion::Shadows);

        let mut touched = 0;
        for (got, orig) in grid.data.iter().zip(&reference.data) {
            let luma = luminance(*orig);
            if luma < SHADOW_LUMA {
                touched += (got != orig) as usize;
            } else {
                assert_eq!(got, orig, "voxel outside shadows changed");
            }
        }
        assert!(touched > 0, "no shadow voxel was tinted");
    }

    #[test]
    fn lift_gamma_gain_identity() {
        let mut grid = LutGrid::identity(17);
        let reference = grid.clone();
        apply_lift_gamma_gain(&mut grid, [0.0; 3], [1.0; 3], [1.0; 3]);
        assert!(max_deviation(&grid, &reference) < 1e-5);
    }

    #[test]
    fn lift_raises_blacks() {
        let mut grid = LutGrid::identity(17);
        apply_lift_gamma_gain(&mut grid, [0.1; 3], [1.0; 3], [1.0; 3]);
        let black = grid.get(0, 0, 0);
        assert!((black[0] - 0.1).abs() < 1e-4, "lifted black: {black:?}");
        // White stays white: lift * (1 - 1) = 0.
        let white = grid.get(16, 16, 16);
        assert!((white[0] - 1.0).abs() < 1e-4);
    }

    #[test]
    fn temperature_d65_is_noop() {
        let mut grid = LutGrid::identity(17);
        let reference = grid.clone();
        apply_temperature_tint(&mut grid, 6500.0, 0.0);
        assert_eq!(grid, reference);
    }

    #[test]
    fn warm_temperature_shifts_red() {
        let mut grid = LutGrid::identity(17);
        apply_temperature_tint(&mut grid, 3200.0, 0.0);
        let mid = grid.get(8, 8, 8);
        assert!(mid[0] > mid[2], "3200K should push red over blue: {mid:?}");
    }

    #[test]
    fn positive_tint_pushes_magenta() {
        let mut grid = LutGrid::identity(17);
        apply_temperature_tint(&mut grid, 6500.0, 20.0);
        let mid = grid.get(8, 8, 8);
        assert!(mid[0] > mid[1] && mid[2] > mid[1], "tint +20: {mid:?}");
    }

    #[test]
    fn channel_curves_identity_at_unity() {
        let mut grid = LutGrid::identity(17);
        let reference = grid.clone();
        apply_channel_curves(&mut grid, [1.0; 3], [1.0; 3], [1.0; 3], CURVE_SPREAD);
        assert_eq!(grid, reference);
    }

    #[test]
    fn shadow_curve_brightens_shadows_most() {
        let mut grid = LutGrid::identity(33);
        let reference = grid.clone();
        apply_channel_curves(&mut grid, [1.3; 3], [1.0; 3], [1.0; 3], CURVE_SPREAD);
        let dark_delta = grid.get(4, 4, 4)[0] - reference.get(4, 4, 4)[0];
        let bright_delta = grid.get(30, 30, 30)[0] - reference.get(30, 30, 30)[0];
        assert!(dark_delta > 0.0, "multiplier > 1 should lift shadows");
        assert!(dark_delta > bright_delta, "shadow weight should dominate");
    }

    #[test]
    fn channel_gamma_only_touches_named_channel() {
        let mut grid = LutGrid::identity(17);
        let reference = grid.clone();
        let adj = crate::ChannelAdjustments {
            blue_gamma: Some(1.2),
            ..Default::default()
        };
        apply_channel_gamma(&mut grid, &adj);
        for (got, orig) in grid.data.iter().zip(&reference.data) {
            assert_eq!(got[0], orig[0]);
            assert_eq!(got[1], orig[1]);
        }
        assert!(max_deviation(&grid, &reference) > 0.0);
    }

    #[test]
    fn stage_order_matters() {
        // Saturation-then-tint differs from tint-then-saturation; the
        // pipeline fixes tint first.
        let tint = TonalTint {
            color: "teal".into(),
            balance: [0.8, 1.0, 1.2],
        };

        let mut a = LutGrid::identity(17);
        apply_tonal_tint(&mut a, &tint, TonalRegion::Shadows);
        apply_saturation(&mut a, 1.4);

        let mut b = LutGrid::identity(17);
        apply_saturation(&mut b, 1.4);
        apply_tonal_tint(&mut b, &tint, TonalRegion::Shadows);

        assert!(max_deviation(&a, &b) > 1e-4);
    }
}
