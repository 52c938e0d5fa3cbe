//! Color temperature to RGB conversion.
//!
//! Uses Tanner Helland's polynomial approximation of the Planckian
//! locus, valid for 1000-40000 K (inputs are clamped to that range).
//! Reference: <https://tannerhelland.com/2012/09/18/convert-temperature-rgb-algorithm-code.html>

/// Reference white temperature (D65).
pub const D65_KELVIN: f32 = 6500.0;

/// RGB color of a black-body radiator at the given temperature.
///
/// Channels are in `[0, 1]`. Temperatures are clamped to 1000-40000 K.
#[allow(clippy::excessive_precision)] // Published constants from the approximation
pub fn kelvin_to_rgb(kelvin: f32) -> [f32; 3] {
    let temp = (kelvin / 100.0).clamp(10.0, 400.0);

    let (r, g, b) = if temp <= 66.0 {
        let r = 255.0;
        let g = 99.4708025861 * temp.ln() - 161.1195681661;
        let b = if temp <= 19.0 {
            0.0
        } else {
            138.5177312231 * (temp - 10.0).ln() - 305.0447927307
        };
        (r, g.clamp(0.0, 255.0), b.clamp(0.0, 255.0))
    } else {
        let r = 329.698727446 * (temp - 60.0).powf(-0.1332047592);
        let g = 288.1221695283 * (temp - 60.0).powf(-0.0755148492);
        let b = 255.0;
        (r.clamp(0.0, 255.0), g.clamp(0.0, 255.0), b)
    };

    [r / 255.0, g / 255.0, b / 255.0]
}

/// Per-channel multipliers that shift neutral D65 toward `kelvin`.
///
/// Normalized against the D65 black-body color so that 6500 K returns
/// exactly `[1, 1, 1]` and neutral input stays neutral.
pub fn multipliers_for(kelvin: f32) -> [f32; 3] {
    let target = kelvin_to_rgb(kelvin);
    let d65 = kelvin_to_rgb(D65_KELVIN);
    [
        target[0] / d65[0].max(1e-6),
        target[1] / d65[1].max(1e-6),
        target[2] / d65[2].max(1e-6),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn d65_is_identity() {
        let m = multipliers_for(D65_KELVIN);
        assert_eq!(m, [1.0, 1.0, 1.0]);
    }

    #[test]
    fn warm_boosts_red_over_blue() {
        let m = multipliers_for(3200.0);
        assert!(m[0] > m[2], "3200K multipliers should be red-heavy: {m:?}");
    }

    #[test]
    fn cool_boosts_blue_over_red() {
        let m = multipliers_for(10000.0);
        assert!(m[2] > m[0], "10000K multipliers should be blue-heavy: {m:?}");
    }

    #[test]
    fn out_of_range_is_clamped() {
        assert_eq!(kelvin_to_rgb(500.0), kelvin_to_rgb(1000.0));
        assert_eq!(kelvin_to_rgb(100_000.0), kelvin_to_rgb(40_000.0));
    }

    #[test]
    fn candlelight_is_orange() {
        let rgb = kelvin_to_rgb(1900.0);
        assert_abs_diff_eq!(rgb[0], 1.0, epsilon = 1e-6);
        assert!(rgb[1] < 0.75);
        assert!(rgb[2] < 0.3);
    }
}
