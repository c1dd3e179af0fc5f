//! Command-line map generator.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p fracture-mapgen -- --seed 42 --ascii` to print a map,
//! or add `--biome-png map.png` to write a rendering.

use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use fracture_config::{CliArgs, Config, ConfigError};
use fracture_terrain::debug_viz::{render_ascii, render_biome_map, render_heightmap};
use fracture_terrain::{BiomeTable, MapData, MapGeneratorService};
use tracing::{error, info, warn};

/// Directory name under the platform config directory.
const APP_DIR: &str = "fracture-mapgen";

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let config_dir = args
        .config
        .clone()
        .or_else(|| dirs::config_dir().map(|dir| dir.join(APP_DIR)))
        .unwrap_or_else(|| PathBuf::from(".").join(APP_DIR));

    // Logging is not up yet, so a load failure is reported once it is.
    let (mut config, load_error) = load_config(&config_dir);
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    fracture_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));
    match load_error {
        None => info!("Using config directory {}", config_dir.display()),
        Some(e) => warn!("Failed to load config: {e}, using defaults"),
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Map generation failed: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Load `config.ron`, falling back to defaults and handing back the error.
fn load_config(config_dir: &Path) -> (Config, Option<ConfigError>) {
    match Config::load_or_create(config_dir) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    }
}

fn run(config: &Config) -> Result<(), Box<dyn Error>> {
    let table = load_table(config.biomes.table_path.as_deref())?;
    let service = MapGeneratorService::new(table, config.map.clone())?;
    let map = service.get_map(&config.noise)?;

    info!(
        "Generated {}x{} map from seed {}: {} walkable cells, {} unclassified",
        map.width(),
        map.height(),
        map.seed(),
        map.walkable_count(),
        map.gaps().len()
    );

    write_outputs(&map, config)
}

fn load_table(path: Option<&Path>) -> Result<BiomeTable, Box<dyn Error>> {
    match path {
        Some(path) => Ok(BiomeTable::load(path)?),
        None => {
            info!("Using built-in biome table");
            Ok(BiomeTable::default())
        }
    }
}

fn write_outputs(map: &MapData, config: &Config) -> Result<(), Box<dyn Error>> {
    if config.output.print_ascii {
        print!("{}", render_ascii(map));
    }
    if let Some(path) = &config.output.heightmap_png {
        render_heightmap(map).save_png(path)?;
        info!("Wrote heightmap to {}", path.display());
    }
    if let Some(path) = &config.output.biome_png {
        render_biome_map(map).save_png(path)?;
        info!("Wrote biome map to {}", path.display());
    }
    Ok(())
}
