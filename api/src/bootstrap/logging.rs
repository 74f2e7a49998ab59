use std::path::PathBuf;

use tracing_subscriber::filter::{EnvFilter, LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{Layer, fmt};

use crate::bootstrap::config::Config;
use crate::infrastructure::logging::rotating_file::{DEFAULT_BACKUP_COUNT, DEFAULT_MAX_BYTES};
use crate::infrastructure::logging::{
    ConsoleFormat, CorrelationIdLayer, JsonFileFormat, RotatingFileWriter,
};

/// Per-environment logging knobs. Development gets short correlation IDs,
/// readable emails and debug output; everything else is terse and masked.
#[derive(Clone, Debug)]
pub struct LoggingConfig {
    /// Characters of the request's correlation ID kept in log records.
    pub correlation_id_length: usize,
    pub obfuscated_length: usize,
    pub app_level: LevelFilter,
    pub log_file: Option<PathBuf>,
    pub max_bytes: u64,
    pub backup_count: usize,
}

impl LoggingConfig {
    pub fn from_config(cfg: &Config) -> Self {
        let dev = cfg.env_state.is_dev();
        Self {
            correlation_id_length: if dev { 8 } else { 32 },
            obfuscated_length: if dev { 2 } else { 0 },
            app_level: if dev {
                LevelFilter::DEBUG
            } else {
                LevelFilter::INFO
            },
            log_file: Some(PathBuf::from(&cfg.log_file)),
            max_bytes: DEFAULT_MAX_BYTES,
            backup_count: DEFAULT_BACKUP_COUNT,
        }
    }

    /// Routing for the console: application, HTTP server and database driver logs.
    pub fn console_targets(&self) -> Targets {
        Targets::new()
            .with_target("storeapi", self.app_level)
            .with_target("tower_http", LevelFilter::INFO)
            .with_target("sqlx", LevelFilter::WARN)
    }

    /// Routing for the rotating file: application and HTTP server logs only.
    pub fn file_targets(&self) -> Targets {
        Targets::new()
            .with_target("storeapi", self.app_level)
            .with_target("tower_http", LevelFilter::INFO)
    }
}

pub fn init_logging(cfg: &LoggingConfig) -> anyhow::Result<()> {
    let console = fmt::layer()
        .event_format(ConsoleFormat::new(cfg.obfuscated_length))
        .with_writer(std::io::stdout)
        .with_filter(cfg.console_targets());

    let file = match &cfg.log_file {
        Some(path) => {
            let writer = RotatingFileWriter::new(path, cfg.max_bytes, cfg.backup_count)?;
            Some(
                fmt::layer()
                    .event_format(JsonFileFormat::new(cfg.obfuscated_length))
                    .with_ansi(false)
                    .with_writer(writer)
                    .with_filter(cfg.file_targets()),
            )
        }
        None => None,
    };

    // RUST_LOG narrows everything further when set.
    let env_filter = EnvFilter::try_from_default_env().ok();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(CorrelationIdLayer::new(cfg.correlation_id_length))
        .with(console)
        .with(file)
        .try_init()?;
    Ok(())
}
