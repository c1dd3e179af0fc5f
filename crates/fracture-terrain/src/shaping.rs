//! Per-cell value shaping: the sharpness curve and falloff blending.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParameterError;

/// How a falloff mask is combined with a shaped value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BlendMode {
    /// `lerp(v, mask, strength)`: pull values toward the mask.
    #[default]
    Interpolate,
    /// `v - (1 - mask) * strength`: only ever lowers values.
    Subtract,
}

impl fmt::Display for BlendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BlendMode::Interpolate => "interpolate",
            BlendMode::Subtract => "subtract",
        })
    }
}

impl FromStr for BlendMode {
    type Err = ParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "interpolate" | "lerp" => Ok(BlendMode::Interpolate),
            "subtract" => Ok(BlendMode::Subtract),
            other => Err(ParameterError::UnknownBlendMode(other.to_string())),
        }
    }
}

#[inline]
fn clamp01(v: f64) -> f64 {
    v.clamp(0.0, 1.0)
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    // Exact at both ends: t = 0 gives `a`, t = 1 gives `b`.
    a * (1.0 - t) + b * t
}

/// Reshape a value in `[0, 1]` with `v^sharpness`, add `boost`, clamp to `[0, 1]`.
///
/// Sharpness above one deepens low ground; below one lifts it.
#[inline]
pub fn shape_value(v: f64, sharpness: f64, boost: f64) -> f64 {
    clamp01(v.powf(sharpness) + boost)
}

/// Blend a shaped value with a falloff mask value. Always returns `[0, 1]`.
#[inline]
pub fn blend_falloff(v: f64, mask: f64, strength: f64, mode: BlendMode) -> f64 {
    match mode {
        BlendMode::Interpolate => clamp01(lerp(v, mask, strength)),
        BlendMode::Subtract => clamp01(v - (1.0 - mask) * strength),
    }
}
