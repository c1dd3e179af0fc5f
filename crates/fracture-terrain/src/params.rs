//! Generation parameters: the noise record and the map-level settings.

use serde::{Deserialize, Serialize};

use crate::error::{MapGenError, ParameterError};
use crate::falloff::FalloffShape;
use crate::fractal::FractalParams;
use crate::shaping::BlendMode;

/// Side length of the reference map, in cells.
pub const DEFAULT_MAP_SIZE: usize = 64;

/// Largest accepted map side. Bigger requests fail with
/// [`MapGenError::MapTooLarge`] before any allocation.
pub const MAX_MAP_SIZE: usize = 4096;

/// Where the world seed comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SeedChoice {
    /// Draw a fresh seed for every generation call.
    #[default]
    Random,
    /// Always use this seed.
    Fixed(u64),
}

/// Parameter record consumed by one generation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseParameters {
    /// Seed source. The temperature field uses the resolved seed plus one.
    pub seed: SeedChoice,
    /// Number of fractal octaves, at most [`MAX_OCTAVES`](crate::MAX_OCTAVES).
    /// Zero produces a flat neutral field.
    pub octaves: i32,
    /// Amplitude multiplier between successive octaves, in `[0, 1]`.
    pub persistence: f64,
    /// Frequency multiplier between successive octaves, `>= 1`.
    pub lacunarity: f64,
    /// Spatial zoom. Larger values pack more features into the map.
    pub scale: f64,
    /// Exponent of the `v^sharpness` curve applied after synthesis.
    pub sharpness: f64,
    /// Flat offset added after the curve, then clamped.
    pub boost: f64,
    /// How strongly the falloff mask pulls values, in `[0, 1]`.
    pub falloff_strength: f64,
    /// How the falloff mask is combined with both fields.
    pub falloff_mode: BlendMode,
}

impl Default for NoiseParameters {
    fn default() -> Self {
        Self {
            seed: SeedChoice::Random,
            octaves: 3,
            persistence: 0.5,
            lacunarity: 2.0,
            scale: 2.9,
            sharpness: 1.0,
            boost: 0.3,
            falloff_strength: 0.3,
            falloff_mode: BlendMode::Interpolate,
        }
    }
}

impl NoiseParameters {
    /// Same defaults, pinned to a seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: SeedChoice::Fixed(seed),
            ..Default::default()
        }
    }

    /// Reject parameters the pipeline cannot honor.
    pub fn validate(&self) -> Result<(), ParameterError> {
        for (name, value) in [
            ("persistence", self.persistence),
            ("lacunarity", self.lacunarity),
            ("boost", self.boost),
        ] {
            if !value.is_finite() {
                return Err(ParameterError::NonFinite { name, value });
            }
        }
        if self.octaves < 0 {
            return Err(ParameterError::NegativeOctaves(self.octaves));
        }
        FractalParams::from(self).validate()?;
        if !(self.sharpness.is_finite() && self.sharpness > 0.0) {
            return Err(ParameterError::InvalidSharpness(self.sharpness));
        }
        if !(0.0..=1.0).contains(&self.falloff_strength) {
            return Err(ParameterError::InvalidFalloffStrength(
                self.falloff_strength,
            ));
        }
        Ok(())
    }
}

/// Map-level settings that stay fixed across generation calls of one service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapSettings {
    /// Side length of the square grid, in cells.
    pub size: usize,
    /// Shape of the falloff mask shared by the height and temperature fields.
    pub falloff_shape: FalloffShape,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            size: DEFAULT_MAP_SIZE,
            falloff_shape: FalloffShape::EuclideanSquared,
        }
    }
}

impl MapSettings {
    /// Reject empty or oversized grids.
    pub fn validate(&self) -> Result<(), MapGenError> {
        if self.size == 0 {
            return Err(ParameterError::EmptyMap.into());
        }
        if self.size > MAX_MAP_SIZE {
            return Err(MapGenError::MapTooLarge {
                size: self.size,
                max: MAX_MAP_SIZE,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(NoiseParameters::default().validate().is_ok());
        assert!(MapSettings::default().validate().is_ok());
    }

    #[test]
    fn test_non_positive_scale_rejected() {
        for scale in [0.0, -1.0, f64::NAN] {
            let params = NoiseParameters {
                scale,
                ..Default::default()
            };
            assert!(matches!(
                params.validate(),
                Err(ParameterError::InvalidScale(_))
            ));
        }
    }

    #[test]
    fn test_non_positive_sharpness_rejected() {
        let params = NoiseParameters {
            sharpness: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ParameterError::InvalidSharpness(_))
        ));
    }

    #[test]
    fn test_negative_octaves_rejected_zero_accepted() {
        let negative = NoiseParameters {
            octaves: -1,
            ..Default::default()
        };
        assert!(matches!(
            negative.validate(),
            Err(ParameterError::NegativeOctaves(-1))
        ));

        let zero = NoiseParameters {
            octaves: 0,
            ..Default::default()
        };
        assert!(zero.validate().is_ok());
    }

    #[test]
    fn test_falloff_strength_out_of_range_rejected() {
        let params = NoiseParameters {
            falloff_strength: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ParameterError::InvalidFalloffStrength(_))
        ));
    }

    #[test]
    fn test_infinite_boost_rejected() {
        let params = NoiseParameters {
            boost: f64::INFINITY,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ParameterError::NonFinite { name: "boost", .. })
        ));
    }

    #[test]
    fn test_map_size_limits() {
        let empty = MapSettings {
            size: 0,
            ..Default::default()
        };
        assert!(matches!(
            empty.validate(),
            Err(MapGenError::Parameters(ParameterError::EmptyMap))
        ));

        let huge = MapSettings {
            size: MAX_MAP_SIZE + 1,
            ..Default::default()
        };
        assert!(matches!(
            huge.validate(),
            Err(MapGenError::MapTooLarge { .. })
        ));
    }

    #[test]
    fn test_params_ron_round_trip_keeps_seed_choice() {
        let params = NoiseParameters::with_seed(7);
        let text = ron::to_string(&params).unwrap();
        let back: NoiseParameters = ron::from_str(&text).unwrap();
        assert_eq!(back, params);
        assert_eq!(back.seed, SeedChoice::Fixed(7));
    }

    #[test]
    fn test_octave_count_is_capped() {
        let params = NoiseParameters {
            octaves: 1100,
            lacunarity: 1.0,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ParameterError::TooManyOctaves { octaves: 1100, .. })
        ));
    }

    #[test]
    fn test_persistence_outside_unit_range_rejected() {
        for persistence in [-0.1, 2.0] {
            let params = NoiseParameters {
                persistence,
                ..Default::default()
            };
            assert!(matches!(
                params.validate(),
                Err(ParameterError::InvalidPersistence(_))
            ));
        }
    }

    #[test]
    fn test_lacunarity_below_one_or_huge_rejected() {
        let shrinking = NoiseParameters {
            lacunarity: 0.5,
            ..Default::default()
        };
        assert!(matches!(
            shrinking.validate(),
            Err(ParameterError::InvalidLacunarity(_))
        ));

        let huge = NoiseParameters {
            lacunarity: 1e200,
            ..Default::default()
        };
        assert!(matches!(
            huge.validate(),
            Err(ParameterError::FrequencyTooHigh { .. })
        ));
    }

    #[test]
    fn test_top_octave_frequency_is_bounded() {
        let params = NoiseParameters {
            octaves: 24,
            lacunarity: 8.0,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ParameterError::FrequencyTooHigh { .. })
        ));

        let default_64 = NoiseParameters {
            octaves: 64,
            ..Default::default()
        };
        assert!(default_64.validate().is_err());

        let eighteen_octaves = NoiseParameters {
            octaves: 18,
            ..Default::default()
        };
        assert!(eighteen_octaves.validate().is_ok());
    }
}
