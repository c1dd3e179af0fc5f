//! Multi-octave fractal noise over a seeded Perlin lattice.
//!
//! Composites several octaves of coherent noise, each at a higher frequency and
//! lower amplitude than the last, and normalizes the sum by the total amplitude
//! so the field stays in `[0, 1]`.

use noise::{NoiseFn, Perlin};

use crate::error::{MapGenError, ParameterError};
use crate::field::NoiseField;
use crate::params::NoiseParameters;
use crate::seed::octave_offsets;

/// Value of every cell when no octave contributes.
pub const NEUTRAL_VALUE: f64 = 0.5;

/// Largest accepted octave count.
pub const MAX_OCTAVES: usize = 32;

/// Largest accepted frequency of the top octave, in cycles across the map.
/// Keeps lattice coordinates far inside the range the Perlin lattice can index.
pub const MAX_FREQUENCY: f64 = 1.0e6;

/// Fractal settings for one noise field.
#[derive(Clone, Debug, PartialEq)]
pub struct FractalParams {
    /// Number of octaves to composite. Zero yields a flat [`NEUTRAL_VALUE`] field.
    pub octaves: usize,
    /// Amplitude multiplier between successive octaves.
    pub persistence: f64,
    /// Frequency multiplier between successive octaves.
    pub lacunarity: f64,
    /// Frequency of the first octave, in cycles across the whole map.
    pub scale: f64,
}

impl Default for FractalParams {
    fn default() -> Self {
        Self {
            octaves: 3,
            persistence: 0.5,
            lacunarity: 2.0,
            scale: 2.9,
        }
    }
}

impl FractalParams {
    /// Frequency of `octave`, in cycles across the map.
    #[inline]
    pub fn frequency(&self, octave: usize) -> f64 {
        self.scale * self.lacunarity.powi(octave as i32)
    }

    /// Reject settings that would leave the sampler's usable range.
    pub fn validate(&self) -> Result<(), ParameterError> {
        if self.octaves > MAX_OCTAVES {
            return Err(ParameterError::TooManyOctaves {
                octaves: self.octaves,
                max: MAX_OCTAVES,
            });
        }
        if !(0.0..=1.0).contains(&self.persistence) {
            return Err(ParameterError::InvalidPersistence(self.persistence));
        }
        if !(self.lacunarity.is_finite() && self.lacunarity >= 1.0) {
            return Err(ParameterError::InvalidLacunarity(self.lacunarity));
        }
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(ParameterError::InvalidScale(self.scale));
        }
        if let Some(top) = self.octaves.checked_sub(1) {
            let frequency = self.frequency(top);
            if frequency > MAX_FREQUENCY {
                return Err(ParameterError::FrequencyTooHigh {
                    frequency,
                    max: MAX_FREQUENCY,
                });
            }
        }
        Ok(())
    }
}

impl From<&NoiseParameters> for FractalParams {
    fn from(params: &NoiseParameters) -> Self {
        Self {
            octaves: params.octaves.max(0) as usize,
            persistence: params.persistence,
            lacunarity: params.lacunarity,
            scale: params.scale,
        }
    }
}

/// Samples normalized fractal noise at map-relative coordinates.
///
/// Holds its own lattice and octave offsets, derived from the field seed, so
/// samplers with different seeds never share state.
pub struct FractalSampler {
    noise: Perlin,
    offsets: Vec<(f64, f64)>,
    frequencies: Vec<f64>,
    max_amplitude: f64,
    params: FractalParams,
}

impl FractalSampler {
    /// Create a sampler for one field. Fails if `params` do not validate.
    pub fn new(field_seed: u64, params: FractalParams) -> Result<Self, ParameterError> {
        params.validate()?;

        // Fold the high half in so seeds differing only above bit 32 still
        // get distinct permutation tables.
        let lattice_seed = (field_seed ^ (field_seed >> 32)) as u32;
        let frequencies = (0..params.octaves).map(|i| params.frequency(i)).collect();
        let mut max_amplitude = 0.0;
        let mut amplitude = 1.0;
        for _ in 0..params.octaves {
            max_amplitude += amplitude;
            amplitude *= params.persistence;
        }
        Ok(Self {
            noise: Perlin::new(lattice_seed),
            offsets: octave_offsets(field_seed, params.octaves),
            frequencies,
            max_amplitude,
            params,
        })
    }

    /// Sample a single octave, remapped from `[-1, 1]` to `[0, 1]`.
    ///
    /// `u` and `v` are map-relative (`0.0` at the first cell, `1.0` one cell
    /// past the last).
    ///
    /// # Panics
    ///
    /// Panics if `octave >= params().octaves`.
    pub fn sample_octave(&self, octave: usize, u: f64, v: f64) -> f64 {
        let frequency = self.frequencies[octave];
        let (ox, oy) = self.offsets[octave];
        let raw = self.noise.get([u * frequency + ox, v * frequency + oy]);
        (raw + 1.0) * 0.5
    }

    /// Sample all octaves and normalize by the total amplitude.
    ///
    /// Octaves are accumulated in ascending order regardless of how cells are
    /// scheduled, so results are bit-identical between runs.
    pub fn sample(&self, u: f64, v: f64) -> f64 {
        if self.max_amplitude == 0.0 {
            return NEUTRAL_VALUE;
        }

        let mut total = 0.0;
        let mut amplitude = 1.0;
        for octave in 0..self.params.octaves {
            total += self.sample_octave(octave, u, v) * amplitude;
            amplitude *= self.params.persistence;
        }

        total / self.max_amplitude
    }

    /// Sum of all octave amplitudes (`sum(persistence^i)`).
    pub fn max_amplitude(&self) -> f64 {
        self.max_amplitude
    }

    /// Return a reference to the current parameters.
    pub fn params(&self) -> &FractalParams {
        &self.params
    }
}

/// Map-relative coordinate of cell index `i` on a side of `size` cells.
#[inline]
pub(crate) fn cell_coord(i: usize, size: usize) -> f64 {
    i as f64 / size as f64
}

/// Generate a `size x size` fractal noise field, clamped to `[0, 1]`.
pub fn generate_noise_map(
    size: usize,
    field_seed: u64,
    params: &FractalParams,
) -> Result<NoiseField, MapGenError> {
    let sampler = FractalSampler::new(field_seed, params.clone())?;
    NoiseField::from_fn(size, |x, y| {
        sampler
            .sample(cell_coord(x, size), cell_coord(y, size))
            .clamp(0.0, 1.0)
    })
}
