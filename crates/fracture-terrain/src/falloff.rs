//! Radial falloff masks.
//!
//! A mask is `1.0` at the center of the map and drops toward `0.0` at the
//! edges. Blending it into the noise fields pushes land toward the middle and
//! water toward the border. Masks depend only on the map size.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{MapGenError, ParameterError};
use crate::field::NoiseField;

/// Steepness of the custom curve.
const CUSTOM_EXPONENT: f64 = 3.0;
/// Where the custom curve crosses one half; larger pushes the coast outward.
const CUSTOM_SHIFT: f64 = 2.2;

/// Shape of the falloff mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FalloffShape {
    /// `1 - d^2`, with `d^2` the squared distance from the center normalized
    /// so the corners reach zero.
    #[default]
    EuclideanSquared,
    /// Eased curve over the Chebyshev radius. Keeps a wide flat interior and
    /// drops off near the border, giving softer coastlines.
    Custom,
}

impl FalloffShape {
    /// Mask value at centered coordinates `nx, ny` in `[-1, 1]`.
    pub fn evaluate(self, nx: f64, ny: f64) -> f64 {
        let falloff = match self {
            FalloffShape::EuclideanSquared => (nx * nx + ny * ny) * 0.5,
            FalloffShape::Custom => {
                let d = nx.abs().max(ny.abs());
                let a = d.powf(CUSTOM_EXPONENT);
                let b = (CUSTOM_SHIFT - CUSTOM_SHIFT * d).powf(CUSTOM_EXPONENT);
                a / (a + b)
            }
        };
        (1.0 - falloff).clamp(0.0, 1.0)
    }
}

impl fmt::Display for FalloffShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FalloffShape::EuclideanSquared => "euclidean-squared",
            FalloffShape::Custom => "custom",
        })
    }
}

impl FromStr for FalloffShape {
    type Err = ParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "euclidean-squared" => Ok(FalloffShape::EuclideanSquared),
            "custom" => Ok(FalloffShape::Custom),
            other => Err(ParameterError::UnknownFalloffShape(other.to_string())),
        }
    }
}

/// Centered coordinate of cell `i`: cell centers spread symmetrically over `(-1, 1)`.
#[inline]
fn centered(i: usize, size: usize) -> f64 {
    (i as f64 + 0.5) / size as f64 * 2.0 - 1.0
}

/// Generate a `size x size` falloff mask.
pub fn generate_falloff_map(size: usize, shape: FalloffShape) -> Result<NoiseField, MapGenError> {
    NoiseField::from_fn(size, |x, y| {
        shape.evaluate(centered(x, size), centered(y, size))
    })
}
