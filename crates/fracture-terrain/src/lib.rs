//! Procedural 2D terrain maps: fractal noise fields shaped by a falloff mask,
//! classified into biomes by height and temperature.

mod error;
mod falloff;
mod field;
mod fractal;
mod map;
mod params;
mod pipeline;
mod seed;
mod service;
mod shaping;

pub mod biome;
pub mod debug_viz;

pub use biome::{
    Biome, BiomeCategory, BiomeId, BiomeTable, Classification, CoverageIssue, TerrainType,
};
pub use error::{BiomeTableError, MapGenError, ParameterError};
pub use falloff::{FalloffShape, generate_falloff_map};
pub use field::NoiseField;
pub use fractal::{
    FractalParams, FractalSampler, MAX_FREQUENCY, MAX_OCTAVES, NEUTRAL_VALUE, generate_noise_map,
};
pub use map::{Cell, ClassificationGap, GapKind, MapData};
pub use params::{DEFAULT_MAP_SIZE, MAX_MAP_SIZE, MapSettings, NoiseParameters, SeedChoice};
pub use pipeline::generate_map;
pub use seed::{field_rng, octave_offsets, resolve_seed, temperature_seed};
pub use service::MapGeneratorService;
pub use shaping::{BlendMode, blend_falloff, shape_value};
