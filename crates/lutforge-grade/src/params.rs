//! Color-grading parameter record.
//!
//! The record is JSON-object-shaped; every field is optional and has a
//! neutral default, so an empty object `{}` deserializes to a record
//! that leaves the identity grid unchanged.

use crate::{GradeError, GradeResult};
use serde::{Deserialize, Serialize};

/// A named tonal tint with an RGB balance triple.
///
/// `color` names one of the recognized tint colors; `"neutral"` (or a
/// balance of `[1, 1, 1]`) is a no-op. Unknown color names degrade to a
/// no-op with a logged warning rather than failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TonalTint {
    /// Tint color name (e.g. `"cyan"`, `"gold"`, `"neutral"`).
    pub color: String,
    /// Per-channel RGB multipliers applied inside the tonal region.
    pub balance: [f32; 3],
}

impl Default for TonalTint {
    fn default() -> Self {
        Self {
            color: "neutral".into(),
            balance: [1.0, 1.0, 1.0],
        }
    }
}

/// Optional per-channel adjustments.
///
/// Absent fields are no-ops. The analysis side may emit keys this
/// pipeline does not apply (e.g. per-channel saturation); those are
/// ignored on deserialization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelAdjustments {
    /// Power applied to the red channel (`value^gamma`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub red_gamma: Option<f32>,
    /// Power applied to the green channel.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub green_gamma: Option<f32>,
    /// Power applied to the blue channel.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blue_gamma: Option<f32>,
}

impl ChannelAdjustments {
    /// True if every field is absent.
    pub fn is_empty(&self) -> bool {
        self.red_gamma.is_none() && self.green_gamma.is_none() && self.blue_gamma.is_none()
    }
}

/// Flat color-grading parameter record.
///
/// Every field has a neutral default; `GradeParams::default()` applied
/// to an identity grid yields the identity grid (within floating
/// rounding). Immutable once handed to the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradeParams {
    /// Input level mapped to 0.0 by the contrast stage.
    pub black_point: f32,
    /// Input level mapped to 1.0 by the contrast stage.
    pub white_point: f32,
    /// Overall contrast estimate from analysis. Tonal contrast is
    /// expressed through `black_point`/`white_point`; this field is
    /// carried and validated but not applied as a separate stage.
    pub contrast: f32,
    /// HSV saturation factor (1.0 = unchanged, 0.0 = grey).
    pub saturation: f32,
    /// Tint applied to voxels with luminance below the shadow threshold.
    pub shadow_tint: TonalTint,
    /// Tint applied to voxels with luminance above the highlight threshold.
    pub highlight_tint: TonalTint,
    /// Per-channel lift (shifts toward white proportional to `1 - value`).
    pub lift: [f32; 3],
    /// Per-channel gamma (applied as `value^(1/gamma)`).
    pub gamma: [f32; 3],
    /// Per-channel gain (multiplier).
    pub gain: [f32; 3],
    /// Target color temperature in Kelvin (6500 = neutral D65).
    pub temperature: f32,
    /// Magenta/green tint bias (-100..100, 0 = neutral).
    pub tint: f32,
    /// Per-channel curve multipliers for the shadow band.
    pub shadow_curve: [f32; 3],
    /// Per-channel curve multipliers for the midtone band.
    pub midtone_curve: [f32; 3],
    /// Per-channel curve multipliers for the highlight band.
    pub highlight_curve: [f32; 3],
    /// Optional per-channel power adjustments.
    pub channel_adjustments: ChannelAdjustments,
}

impl Default for GradeParams {
    fn default() -> Self {
        Self {
            black_point: 0.0,
            white_point: 1.0,
            contrast: 1.0,
            saturation: 1.0,
            shadow_tint: TonalTint::default(),
            highlight_tint: TonalTint::default(),
            lift: [0.0, 0.0, 0.0],
            gamma: [1.0, 1.0, 1.0],
            gain: [1.0, 1.0, 1.0],
            temperature: 6500.0,
            tint: 0.0,
            shadow_curve: [1.0, 1.0, 1.0],
            midtone_curve: [1.0, 1.0, 1.0],
            highlight_curve: [1.0, 1.0, 1.0],
            channel_adjustments: ChannelAdjustments::default(),
        }
    }
}

impl GradeParams {
    /// Validates the record against its documented domains.
    ///
    /// Out-of-domain fields are rejected here, before any stage runs;
    /// the stages themselves only clamp where clamping is part of their
    /// contract (saturation output, temperature multipliers).
    pub fn validate(&self) -> GradeResult<()> {
        if self.white_point <= self.black_point {
            return Err(GradeError::InvalidParameter(format!(
                "white_point ({}) must be greater than black_point ({})",
                self.white_point, self.black_point
            )));
        }
        if self.contrast <= 0.0 {
            return Err(GradeError::InvalidParameter(format!(
                "contrast must be positive, got {}",
                self.contrast
            )));
        }
        if self.saturation < 0.0 {
            return Err(GradeError::InvalidParameter(format!(
                "saturation must be non-negative, got {}",
                self.saturation
            )));
        }
        for (name, triple) in [
            ("gamma", &self.gamma),
            ("shadow_curve", &self.shadow_curve),
            ("midtone_curve", &self.midtone_curve),
            ("highlight_curve", &self.highlight_curve),
        ] {
            if triple.iter().any(|&v| v <= 0.0) {
                return Err(GradeError::InvalidParameter(format!(
                    "{name} channels must be positive, got {triple:?}"
                )));
            }
        }
        for (name, tint) in [
            ("shadow_tint", &self.shadow_tint),
            ("highlight_tint", &self.highlight_tint),
        ] {
            if tint.balance.iter().any(|&v| v < 0.0) {
                return Err(GradeError::InvalidParameter(format!(
                    "{name} balance must be non-negative, got {:?}",
                    tint.balance
                )));
            }
        }
        for (name, value) in [
            ("red_gamma", self.channel_adjustments.red_gamma),
            ("green_gamma", self.channel_adjustments.green_gamma),
            ("blue_gamma", self.channel_adjustments.blue_gamma),
        ] {
            if let Some(v) = value {
                if v <= 0.0 {
                    return Err(GradeError::InvalidParameter(format!(
                        "{name} must be positive, got {v}"
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_neutral() {
        let params: GradeParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params, GradeParams::default());
        assert!(params.validate().is_ok());
    }

    #[test]
    fn parses_original_parameter_shape() {
        let json = r#"{
            "black_point": 0.05,
            "white_point": 0.98,
            "shadow_tint": {"color": "cyan", "balance": [0.9, 1.0, 1.1]},
            "highlight_tint": {"color": "gold", "balance": [1.1, 1.05, 0.95]},
            "contrast": 1.2,
            "saturation": 1.1,
            "channel_adjustments": {"blue_gamma": 1.1}
        }"#;
        let params: GradeParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.black_point, 0.05);
        assert_eq!(params.shadow_tint.color, "cyan");
        assert_eq!(params.channel_adjustments.blue_gamma, Some(1.1));
        assert!(params.channel_adjustments.red_gamma.is_none());
        assert!(params.validate().is_ok());
    }

    #[test]
    fn rejects_inverted_points() {
        let params = GradeParams {
            black_point: 0.5,
            white_point: 0.5,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn rejects_non_positive_gamma() {
        let params = GradeParams {
            gamma: [1.0, 0.0, 1.0],
            ..Default::default()
        };
        assert!(params.validate().is_err());

        let params = GradeParams {
            channel_adjustments: ChannelAdjustments {
                red_gamma: Some(-0.5),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }
}
