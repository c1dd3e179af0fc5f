//! Structured logging for the Fracture map generator.
//!
//! Console output goes through a human-readable `tracing-subscriber` layer.
//! Debug builds also write JSON lines to a log file so a generation run can be
//! inspected afterwards. The level comes from `RUST_LOG` when set, otherwise
//! from the config's `debug.log_level`.

use std::fs::File;
use std::path::Path;

use fracture_config::Config;
use tracing::Subscriber;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Directives used when neither `RUST_LOG` nor the config sets a level.
pub const DEFAULT_FILTER: &str = "info";

/// Name of the JSON log file written in debug builds.
pub const LOG_FILE_NAME: &str = "fracture-mapgen.log";

/// Filter directives for a config, falling back to [`DEFAULT_FILTER`].
pub fn filter_directives(config: Option<&Config>) -> String {
    match config {
        Some(config) if !config.debug.log_level.trim().is_empty() => {
            config.debug.log_level.trim().to_string()
        }
        _ => DEFAULT_FILTER.to_string(),
    }
}

/// JSON-lines layer writing to `file`.
pub fn json_file_layer<S>(file: File) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_timer(fmt::time::uptime())
        .json()
}

/// Initialize the global tracing subscriber.
///
/// * `log_dir` - directory for the JSON log file (debug builds only)
/// * `debug_build` - enables the file layer
/// * `config` - source of the log level when `RUST_LOG` is unset
///
/// A log directory that cannot be created only disables the file layer.
///
/// ```no_run
/// use fracture_config::Config;
/// use fracture_log::init_logging;
///
/// let config = Config::default();
/// init_logging(Some(std::path::Path::new("./logs")), true, Some(&config));
/// ```
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, config: Option<&Config>) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(config)));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_names(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if debug_build
        && let Some(log_dir) = log_dir
        && std::fs::create_dir_all(log_dir).is_ok()
        && let Ok(log_file) = File::create(log_dir.join(LOG_FILE_NAME))
    {
        subscriber.with(json_file_layer(log_file)).init();
        return;
    }

    subscriber.init();
}

/// `EnvFilter` built from [`DEFAULT_FILTER`].
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_FILTER)
}
