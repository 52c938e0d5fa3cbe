//! Scalar color math shared by the pipeline crates.
//!
//! Luminance uses the Rec.601 weights; tonal masks throughout the
//! workspace are defined against this luma, not Rec.709.

/// Rec.601 luma weight for red.
pub const REC601_LUMA_R: f32 = 0.299;
/// Rec.601 luma weight for green.
pub const REC601_LUMA_G: f32 = 0.587;
/// Rec.601 luma weight for blue.
pub const REC601_LUMA_B: f32 = 0.114;

/// Rec.601 luminance of an RGB triple.
#[inline]
pub fn luminance(rgb: [f32; 3]) -> f32 {
    rgb[0] * REC601_LUMA_R + rgb[1] * REC601_LUMA_G + rgb[2] * REC601_LUMA_B
}

/// Convert RGB to HSV.
///
/// Hue is in degrees `[0, 360)`, saturation and value in `[0, 1]`.
/// Together with [`hsv_to_rgb`] this forms an exact round-trip pair
/// (within floating rounding), which the saturation grading stage
/// relies on for its factor-1.0 no-op contract.
pub fn rgb_to_hsv(rgb: [f32; 3]) -> [f32; 3] {
    let [r, g, b] = rgb;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let h = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * (((g - b) / delta).rem_euclid(6.0))
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };

    let s = if max == 0.0 { 0.0 } else { delta / max };

    [h, s, max]
}

/// Convert HSV to RGB.
///
/// Inverse of [`rgb_to_hsv`].
pub fn hsv_to_rgb(hsv: [f32; 3]) -> [f32; 3] {
    let [h, s, v] = hsv;
    let c = v * s;
    let h_prime = (h / 60.0).rem_euclid(6.0);
    let x = c * (1.0 - ((h_prime % 2.0) - 1.0).abs());

    let (r1, g1, b1) = if h_prime < 1.0 {
        (c, x, 0.0)
    } else if h_prime < 2.0 {
        (x, c, 0.0)
    } else if h_prime < 3.0 {
        (0.0, c, x)
    } else if h_prime < 4.0 {
        (0.0, x, c)
    } else if h_prime < 5.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    let m = v - c;
    [r1 + m, g1 + m, b1 + m]
}
