//! Error types for map generation.
//!
//! Every error here is fatal to the generation call that produced it. Cells that
//! fall outside the biome table are not errors; they are recorded as
//! [`ClassificationGap`](crate::ClassificationGap)s on the finished map.

use std::collections::TryReserveError;

/// Invalid noise parameters or map settings, rejected before any noise is computed.
#[derive(Debug, thiserror::Error)]
pub enum ParameterError {
    /// Noise scale must be finite and strictly positive.
    #[error("noise scale must be > 0, got {0}")]
    InvalidScale(f64),

    /// Curve sharpness must be finite and strictly positive.
    #[error("curve sharpness must be > 0, got {0}")]
    InvalidSharpness(f64),

    /// Octave count cannot be negative.
    #[error("octave count must be >= 0, got {0}")]
    NegativeOctaves(i32),

    /// Octave count above the supported maximum.
    #[error("octave count {octaves} exceeds the supported maximum of {max}")]
    TooManyOctaves {
        /// Requested octave count.
        octaves: usize,
        /// Largest accepted octave count.
        max: usize,
    },

    /// Persistence must lie in `[0, 1]`.
    #[error("persistence must be within [0, 1], got {0}")]
    InvalidPersistence(f64),

    /// Lacunarity must be finite and at least 1.
    #[error("lacunarity must be >= 1, got {0}")]
    InvalidLacunarity(f64),

    /// The top octave would sample the lattice too finely.
    #[error("top octave frequency {frequency} exceeds the supported maximum of {max}")]
    FrequencyTooHigh {
        /// Frequency of the last octave, in cycles across the map.
        frequency: f64,
        /// Largest accepted frequency.
        max: f64,
    },

    /// Falloff strength must lie in `[0, 1]`.
    #[error("falloff strength must be within [0, 1], got {0}")]
    InvalidFalloffStrength(f64),

    /// A parameter was NaN or infinite.
    #[error("parameter `{name}` must be finite, got {value}")]
    NonFinite {
        /// Field name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },

    /// Maps need at least one cell per side.
    #[error("map size must be at least 1")]
    EmptyMap,

    /// Unrecognized falloff shape name.
    #[error("unknown falloff shape `{0}` (expected `euclidean-squared` or `custom`)")]
    UnknownFalloffShape(String),

    /// Unrecognized blend mode name.
    #[error("unknown falloff blend mode `{0}` (expected `interpolate` or `subtract`)")]
    UnknownBlendMode(String),
}

/// A biome table that could not be read, parsed, or accepted.
#[derive(Debug, thiserror::Error)]
pub enum BiomeTableError {
    /// Failed to read the table file from disk.
    #[error("failed to read biome table: {0}")]
    Read(#[source] std::io::Error),

    /// Failed to parse a RON table.
    #[error("failed to parse biome table: {0}")]
    ParseRon(#[source] ron::error::SpannedError),

    /// Failed to parse a JSON table.
    #[error("failed to parse biome table: {0}")]
    ParseJson(#[source] serde_json::Error),

    /// The table declares no categories.
    #[error("biome table has no categories")]
    Empty,

    /// A category declares no biomes.
    #[error("biome category {category} ({terrain}) has no biomes")]
    EmptyCategory {
        /// Index of the category in declaration order.
        category: usize,
        /// Terrain type of the category, for the message.
        terrain: String,
    },

    /// A band bound was NaN, or a band had `min > max`.
    #[error("{what} band [{min}, {max}) is malformed")]
    MalformedBand {
        /// Human-readable location of the band.
        what: String,
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },
}

/// Errors returned by a generation call.
#[derive(Debug, thiserror::Error)]
pub enum MapGenError {
    /// Parameters were rejected before generation.
    #[error(transparent)]
    Parameters(#[from] ParameterError),

    /// The biome table was rejected before generation.
    #[error(transparent)]
    BiomeTable(#[from] BiomeTableError),

    /// Requested map side exceeds what the generator supports.
    #[error("map size {size} exceeds the supported maximum of {max}")]
    MapTooLarge {
        /// Requested side length.
        size: usize,
        /// Largest accepted side length.
        max: usize,
    },

    /// Grid storage could not be allocated.
    #[error("failed to allocate {cells} cells: {source}")]
    Allocation {
        /// Number of cells requested.
        cells: usize,
        /// Allocator error.
        #[source]
        source: TryReserveError,
    },
}
