//! Command-line argument parsing for the map generator.

use std::path::PathBuf;

use clap::Parser;
use fracture_terrain::{BlendMode, FalloffShape, SeedChoice};

use crate::Config;

/// Fracture map generator command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "fracture-mapgen", about = "Procedural 2D terrain map generator")]
pub struct CliArgs {
    /// World seed. The temperature field uses seed + 1.
    #[arg(long, conflicts_with = "random_seed")]
    pub seed: Option<u64>,

    /// Draw a fresh seed, ignoring any seed in the config file.
    #[arg(long)]
    pub random_seed: bool,

    /// Number of noise octaves.
    #[arg(long)]
    pub octaves: Option<i32>,

    /// Amplitude multiplier between octaves, in [0, 1].
    #[arg(long)]
    pub persistence: Option<f64>,

    /// Frequency multiplier between octaves, at least 1.
    #[arg(long)]
    pub lacunarity: Option<f64>,

    /// Noise scale (features across the map).
    #[arg(long)]
    pub scale: Option<f64>,

    /// Exponent of the height curve.
    #[arg(long)]
    pub sharpness: Option<f64>,

    /// Flat offset added after the curve.
    #[arg(long)]
    pub boost: Option<f64>,

    /// Falloff strength in [0, 1].
    #[arg(long)]
    pub falloff_strength: Option<f64>,

    /// Falloff blend mode (interpolate, subtract).
    #[arg(long)]
    pub falloff_mode: Option<BlendMode>,

    /// Falloff mask shape (euclidean-squared, custom).
    #[arg(long)]
    pub falloff_shape: Option<FalloffShape>,

    /// Map side length in cells.
    #[arg(long)]
    pub size: Option<usize>,

    /// Biome table file (.ron or .json).
    #[arg(long)]
    pub biomes: Option<PathBuf>,

    /// Write a heightmap PNG to this path.
    #[arg(long)]
    pub heightmap_png: Option<PathBuf>,

    /// Write a biome-map PNG to this path.
    #[arg(long)]
    pub biome_png: Option<PathBuf>,

    /// Print the map as ASCII.
    #[arg(long)]
    pub ascii: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(seed) = args.seed {
            self.noise.seed = SeedChoice::Fixed(seed);
        }
        if args.random_seed {
            self.noise.seed = SeedChoice::Random;
        }
        if let Some(octaves) = args.octaves {
            self.noise.octaves = octaves;
        }
        if let Some(persistence) = args.persistence {
            self.noise.persistence = persistence;
        }
        if let Some(lacunarity) = args.lacunarity {
            self.noise.lacunarity = lacunarity;
        }
        if let Some(scale) = args.scale {
            self.noise.scale = scale;
        }
        if let Some(sharpness) = args.sharpness {
            self.noise.sharpness = sharpness;
        }
        if let Some(boost) = args.boost {
            self.noise.boost = boost;
        }
        if let Some(strength) = args.falloff_strength {
            self.noise.falloff_strength = strength;
        }
        if let Some(mode) = args.falloff_mode {
            self.noise.falloff_mode = mode;
        }
        if let Some(shape) = args.falloff_shape {
            self.map.falloff_shape = shape;
        }
        if let Some(size) = args.size {
            self.map.size = size;
        }
        if let Some(ref path) = args.biomes {
            self.biomes.table_path = Some(path.clone());
        }
        if let Some(ref path) = args.heightmap_png {
            self.output.heightmap_png = Some(path.clone());
        }
        if let Some(ref path) = args.biome_png {
            self.output.biome_png = Some(path.clone());
        }
        if args.ascii {
            self.output.print_ascii = true;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
