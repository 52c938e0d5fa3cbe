//! Procedural reference image synthesis.
//!
//! For each catalog look, generates a synthetic image whose pixel
//! statistics embody the look, so the color-transfer adapter can run
//! without a user-supplied reference.

use crate::{Look, ReferencePattern};
use lutforge_core::{hsv_to_rgb, rgb_to_hsv, RgbImage};
use rand::Rng;

/// Uniform per-channel perturbation amplitude.
const NOISE_AMPLITUDE: f32 = 0.03;
/// Upper bound on the HSV saturation touch-up.
const MAX_SATURATION_BOOST: f32 = 1.15;
/// Contrast touch-up applied around mid-grey.
const CONTRAST_BOOST: f32 = 1.10;

/// Synthesizes a reference image for a look.
///
/// The look's pattern lays out its reference points across the frame, a
/// small uniform random perturbation keeps the statistics from being
/// perfectly flat, and a bounded HSV touch-up (at most +15% saturation,
/// +10% contrast) keeps the result from looking synthetic. Callers that
/// need determinism seed the `rng`.
pub fn synthesize_reference(
    look: &Look,
    width: usize,
    height: usize,
    rng: &mut impl Rng,
) -> RgbImage {
    let mut image = RgbImage::filled(width, height, [0.0, 0.0, 0.0]);
    let points = look.reference_points;

    for y in 0..height {
        for x in 0..width {
            let base = match look.pattern {
                ReferencePattern::VerticalGradient => {
                    // Top point to bottom point, nudged toward the
                    // remaining points mid-frame.
                    let t = y as f32 / (height - 1).max(1) as f32;
                    let mut rgb = lerp(points[0], points[1], t);
                    if points.len() > 2 {
                        let mid_weight = 0.25 * (1.0 - (2.0 * t - 1.0).abs());
                        rgb = lerp(rgb, points[2], mid_weight);
                    }
                    rgb
                }
                ReferencePattern::Grid => {
                    let cell = (x / 16 + y / 16) % points.len();
                    points[cell]
                }
                ReferencePattern::LuminanceBands => {
                    let band = (y * points.len() / height.max(1)).min(points.len() - 1);
                    points[band]
                }
            };

            let rgb = [
                base[0] + rng.gen_range(-NOISE_AMPLITUDE..NOISE_AMPLITUDE),
                base[1] + rng.gen_range(-NOISE_AMPLITUDE..NOISE_AMPLITUDE),
                base[2] + rng.gen_range(-NOISE_AMPLITUDE..NOISE_AMPLITUDE),
            ];
            image.set_pixel(x, y, rgb);
        }
    }

    touch_up(&mut image, look.saturation_factor);
    image.clamp_unit();
    image
}

/// Bounded saturation/contrast touch-up in HSV space.
fn touch_up(image: &mut RgbImage, saturation_factor: f32) {
    let sat = saturation_factor.min(MAX_SATURATION_BOOST);

    for px in image.as_mut_slice().chunks_exact_mut(3) {
        let mut hsv = rgb_to_hsv([px[0], px[1], px[2]]);
        hsv[1] = (hsv[1] * sat).clamp(0.0, 1.0);
        hsv[2] = ((hsv[2] - 0.5) * CONTRAST_BOOST + 0.5).clamp(0.0, 1.0);
        let rgb = hsv_to_rgb(hsv);
        px.copy_from_slice(&rgb);
    }
}

#[inline]
fn lerp(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{extract_stats, find_look};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn output_stays_in_unit_range() {
        let mut rng = StdRng::seed_from_u64(1);
        for look in crate::looks() {
            let img = synthesize_reference(look, 64, 64, &mut rng);
            for px in img.pixels() {
                for v in px {
                    assert!((0.0..=1.0).contains(&v), "{}: {v}", look.name);
                }
            }
        }
    }

    #[test]
    fn seeded_synthesis_is_deterministic() {
        let look = find_look("orange_teal").unwrap();
        let a = synthesize_reference(look, 32, 32, &mut StdRng::seed_from_u64(42));
        let b = synthesize_reference(look, 32, 32, &mut StdRng::seed_from_u64(42));
        assert_eq!(a.as_slice(), b.as_slice());
    }

    #[test]
    fn orange_teal_has_warm_bottom_cool_top() {
        let look = find_look("orange_teal").unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let img = synthesize_reference(look, 64, 64, &mut rng);

        let top = img.pixel(32, 2);
        let bottom = img.pixel(32, 61);
        assert!(top[2] > top[0], "top should be blue-heavy: {top:?}");
        assert!(bottom[0] > bottom[2], "bottom should be red-heavy: {bottom:?}");
    }

    #[test]
    fn film_noir_is_near_monochrome() {
        let look = find_look("film_noir").unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let img = synthesize_reference(look, 64, 64, &mut rng);
        let stats = extract_stats(&img).unwrap();
        // Statistical bound, not exact equality: noise is random.
        assert!(stats.saturation < 0.25, "saturation {}", stats.saturation);
        assert!(stats.contrast > 0.2, "contrast {}", stats.contrast);
    }

    #[test]
    fn scifi_green_is_green_dominant() {
        let look = find_look("scifi_green").unwrap();
        let mut rng = StdRng::seed_from_u64(9);
        let img = synthesize_reference(look, 64, 64, &mut rng);
        let stats = extract_stats(&img).unwrap();
        assert!(stats.tint > 5.0, "tint {}", stats.tint);
    }
}
