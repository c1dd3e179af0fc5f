//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use fracture_terrain::{MapSettings, NoiseParameters};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name of the persisted config inside the config directory.
const CONFIG_FILE: &str = "config.ron";

/// Top-level generator configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Map size and falloff shape.
    pub map: MapSettings,
    /// Noise parameters for each generation.
    pub noise: NoiseParameters,
    /// Where the biome table comes from.
    pub biomes: BiomeConfig,
    /// Rendered outputs.
    pub output: OutputConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Biome table source.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BiomeConfig {
    /// RON or JSON table file. `None` uses the built-in table.
    pub table_path: Option<PathBuf>,
}

/// Debug renderings written after generation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Write a heightmap PNG here.
    pub heightmap_png: Option<PathBuf>,
    /// Write a biome-map PNG here.
    pub biome_png: Option<PathBuf>,
    /// Print an ASCII map to stdout.
    pub print_ascii: bool,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let contents =
                std::fs::read_to_string(&config_path).map_err(|source| ConfigError::ReadError {
                    path: config_path.clone(),
                    source,
                })?;
            let config: Config =
                ron::from_str(&contents).map_err(|source| ConfigError::ParseError {
                    path: config_path.clone(),
                    source,
                })?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }
}
