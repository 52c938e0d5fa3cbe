//! Static catalog of named cinematic looks.
//!
//! The catalog is process-wide immutable configuration: a const table
//! with a read-only keyed lookup. It is never mutated at runtime.

use crate::transfer::TransferMethod;

/// Procedural rule used to synthesize a reference image for a look.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferencePattern {
    /// Vertical gradient from the first reference point (top) to the
    /// second (bottom), with remaining points mixed in between.
    VerticalGradient,
    /// Checker of cells cycling through the reference points.
    Grid,
    /// Horizontal luminance bands stepping through the reference points.
    LuminanceBands,
}

/// An immutable catalog entry describing a cinematic look.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Look {
    /// Catalog key.
    pub name: &'static str,
    /// Human description.
    pub description: &'static str,
    /// Preferred transfer method for this look.
    pub method: TransferMethod,
    /// Representative RGB reference points (3-4 entries).
    pub reference_points: &'static [[f32; 3]],
    /// Procedural rule for the synthetic reference image.
    pub pattern: ReferencePattern,
    /// Kelvin offset applied to the reference temperature estimate.
    pub temperature_bias: f32,
    /// Saturation factor of the look (1.0 = unchanged).
    pub saturation_factor: f32,
}

/// The static look catalog.
const LOOKS: &[Look] = &[
    Look {
        name: "orange_teal",
        description: "Blockbuster orange/teal: cool teal shadows against warm skin highlights",
        method: TransferMethod::Linear,
        reference_points: &[
            [0.13, 0.38, 0.47],
            [0.91, 0.58, 0.26],
            [0.80, 0.62, 0.42],
            [0.18, 0.30, 0.42],
        ],
        pattern: ReferencePattern::VerticalGradient,
        temperature_bias: 400.0,
        saturation_factor: 1.12,
    },
    Look {
        name: "scifi_green",
        description: "Digital dystopia: green-biased midtones and sickly highlights",
        method: TransferMethod::GlobalStats,
        reference_points: &[
            [0.07, 0.28, 0.14],
            [0.18, 0.55, 0.27],
            [0.55, 0.85, 0.55],
        ],
        pattern: ReferencePattern::Grid,
        temperature_bias: -200.0,
        saturation_factor: 0.92,
    },
    Look {
        name: "film_noir",
        description: "Hard-contrast monochrome: crushed blacks and hot highlights",
        method: TransferMethod::Linear,
        reference_points: &[
            [0.04, 0.04, 0.05],
            [0.42, 0.42, 0.44],
            [0.93, 0.93, 0.95],
        ],
        pattern: ReferencePattern::LuminanceBands,
        temperature_bias: 0.0,
        saturation_factor: 0.35,
    },
    Look {
        name: "golden_hour",
        description: "Late-sun warmth: amber highlights rolling into soft brown shadows",
        method: TransferMethod::GlobalStats,
        reference_points: &[
            [0.98, 0.80, 0.52],
            [0.88, 0.62, 0.34],
            [0.52, 0.36, 0.24],
            [0.30, 0.20, 0.16],
        ],
        pattern: ReferencePattern::VerticalGradient,
        temperature_bias: 800.0,
        saturation_factor: 1.08,
    },
];

/// Returns the full catalog.
pub fn looks() -> &'static [Look] {
    LOOKS
}

/// Looks up a catalog entry by name.
pub fn find_look(name: &str) -> Option<&'static Look> {
    LOOKS.iter().find(|l| l.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_keys_resolve() {
        for look in looks() {
            assert_eq!(find_look(look.name).unwrap().name, look.name);
        }
        assert!(find_look("vaporwave").is_none());
    }

    #[test]
    fn reference_points_are_well_formed() {
        for look in looks() {
            assert!(
                (3..=4).contains(&look.reference_points.len()),
                "{} has {} points",
                look.name,
                look.reference_points.len()
            );
            for p in look.reference_points {
                for &v in p {
                    assert!((0.0..=1.0).contains(&v));
                }
            }
            assert!(look.saturation_factor > 0.0);
        }
    }
}
