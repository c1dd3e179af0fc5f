//! Configuration for the Fracture map generator.
//!
//! Settings persist to disk as a RON file and can be overridden from the
//! command line. Every section uses `#[serde(default)]`, so config files
//! written by older or newer versions still load.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{BiomeConfig, Config, DebugConfig, OutputConfig};
pub use error::ConfigError;
