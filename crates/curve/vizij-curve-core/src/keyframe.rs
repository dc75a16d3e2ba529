//! Keyframe data model shared by the authoring curve and the baked curve.

use serde::{Deserialize, Serialize};

/// Weight fraction that makes a weighted tangent equivalent to a plain Hermite tangent.
pub const DEFAULT_WEIGHT: f32 = 1.0 / 3.0;

/// Which tangents of a keyframe carry an explicit weight.
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum WeightedMode {
    #[default]
    None,
    In,
    Out,
    Both,
}

impl WeightedMode {
    /// True when the incoming tangent (arrival into this key) is weighted.
    #[inline]
    pub fn weights_in(self) -> bool {
        matches!(self, WeightedMode::In | WeightedMode::Both)
    }

    /// True when the outgoing tangent (departure from this key) is weighted.
    #[inline]
    pub fn weights_out(self) -> bool {
        matches!(self, WeightedMode::Out | WeightedMode::Both)
    }
}

/// A single curve control point.
///
/// Tangents are slopes in value-per-time units. Weights are fractions of the
/// adjacent segment duration and only take effect when `weighted_mode` enables
/// the matching side.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Keyframe {
    pub time: f32,
    pub value: f32,
    #[serde(default)]
    pub in_tangent: f32,
    #[serde(default)]
    pub out_tangent: f32,
    #[serde(default = "default_weight")]
    pub in_weight: f32,
    #[serde(default = "default_weight")]
    pub out_weight: f32,
    #[serde(default)]
    pub weighted_mode: WeightedMode,
}

fn default_weight() -> f32 {
    DEFAULT_WEIGHT
}

impl Default for Keyframe {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl Keyframe {
    /// Flat keyframe (zero tangents, unweighted).
    #[inline]
    pub fn new(time: f32, value: f32) -> Self {
        Self::with_tangents(time, value, 0.0, 0.0)
    }

    #[inline]
    pub fn with_tangents(time: f32, value: f32, in_tangent: f32, out_tangent: f32) -> Self {
        Self {
            time,
            value,
            in_tangent,
            out_tangent,
            in_weight: DEFAULT_WEIGHT,
            out_weight: DEFAULT_WEIGHT,
            weighted_mode: WeightedMode::None,
        }
    }

    /// Builder-style helper that sets both weights and the weighting mode.
    #[inline]
    pub fn weighted(mut self, in_weight: f32, out_weight: f32, mode: WeightedMode) -> Self {
        self.in_weight = in_weight;
        self.out_weight = out_weight;
        self.weighted_mode = mode;
        self
    }

    /// True when every numeric field is finite.
    pub fn is_finite(&self) -> bool {
        self.time.is_finite()
            && self.value.is_finite()
            && self.in_tangent.is_finite()
            && self.out_tangent.is_finite()
            && self.in_weight.is_finite()
            && self.out_weight.is_finite()
    }
}
