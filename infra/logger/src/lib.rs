//! # Logger
//!
//! Installs the process-wide `tracing` subscriber for the relay.
//!
//! * A compact ANSI console layer.
//! * An optional non-blocking, daily-rolling file layer, plain text or JSON.
//! * An [`EnvFilter`] seeded from the configured level directives. `RUST_LOG`, when set
//!   and valid, takes precedence.
//!
//! ## Example
//!
//! ```rust,no_run
//! # use relay_domain::config::LogConfig;
//! # use relay_logger::Logger;
//! let _logger = Logger::builder("relay-server").apply(&LogConfig::default()).init().unwrap();
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;

use relay_domain::config::LogConfig;
use std::fs;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const DEFAULT_MAX_FILES: usize = 10;
const LOG_FILE_SUFFIX: &str = "log";

/// Collects sink settings, then installs the global subscriber with [`LoggerBuilder::init`].
#[derive(Debug)]
#[must_use = "The builder does nothing until `init` is called."]
pub struct LoggerBuilder {
    name: String,
    console: bool,
    path: Option<PathBuf>,
    directives: String,
    max_files: usize,
    json: bool,
}

impl LoggerBuilder {
    /// Copies every field of the `[log]` config section onto the builder.
    pub fn apply(mut self, config: &LogConfig) -> Self {
        self.console = config.console;
        self.path.clone_from(&config.path);
        self.directives.clone_from(&config.level);
        self.max_files = config.max_files;
        self.json = config.json;
        self
    }

    pub const fn console(mut self, enabled: bool) -> Self {
        self.console = enabled;
        self
    }

    /// Directory for rolling log files. Created on init if missing.
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn level(mut self, level: LevelFilter) -> Self {
        self.directives = level.to_string().to_lowercase();
        self
    }

    /// Filter directives such as `info,relay_archiver=debug`.
    pub fn directives(mut self, directives: impl Into<String>) -> Self {
        self.directives = directives.into();
        self
    }

    pub const fn max_files(mut self, max: usize) -> Self {
        self.max_files = max;
        self
    }

    /// Writes the file sink as JSON lines. The console stays human-readable.
    pub const fn json(mut self, enabled: bool) -> Self {
        self.json = enabled;
        self
    }

    /// Installs the global subscriber.
    ///
    /// The returned [`Logger`] owns the file writer's worker guard and must live as long
    /// as the process logs.
    ///
    /// # Errors
    /// - [`LoggerError::InvalidConfiguration`] for an empty name, zero `max_files`, bad
    ///   directives or no enabled sink.
    /// - [`LoggerError::Io`] / [`LoggerError::Appender`] when the log directory is unusable.
    /// - [`LoggerError::Subscriber`] if a global subscriber is already installed.
    pub fn init(self) -> Result<Logger, LoggerError> {
        self.validate()?;
        let env_filter = build_env_filter(&self.directives)?;

        let mut layers = Vec::new();

        if self.console {
            layers.push(layer().compact().with_ansi(true).boxed());
        }

        let guard = if let Some(path) = &self.path {
            fs::create_dir_all(path)
                .context(format!("Failed to create log directory {}", path.display()))?;

            let appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix(&self.name)
                .filename_suffix(LOG_FILE_SUFFIX)
                .max_log_files(self.max_files)
                .build(path)
                .context(format!("Log directory {}", path.display()))?;

            let (writer, guard) = tracing_appender::non_blocking(appender);
            let file_layer = layer().with_writer(writer).with_ansi(false);
            layers.push(if self.json { file_layer.json().boxed() } else { file_layer.boxed() });

            Some(guard)
        } else {
            None
        };

        tracing_subscriber::registry().with(env_filter).with(layers).try_init()?;

        Ok(Logger { guard })
    }

    fn validate(&self) -> Result<(), LoggerError> {
        let invalid = |message: &'static str| LoggerError::InvalidConfiguration {
            message: message.into(),
            context: None,
        };

        if self.name.trim().is_empty() {
            return Err(invalid("Logger name cannot be empty"));
        }
        if self.max_files == 0 {
            return Err(invalid("max_files must be greater than zero"));
        }
        if self.directives.trim().is_empty() {
            return Err(invalid("level directives cannot be empty"));
        }
        if !self.console && self.path.is_none() {
            return Err(invalid("No logging sink enabled. Enable the console or set a path."));
        }

        Ok(())
    }
}

/// Handle to the installed logging system. Dropping it flushes and stops the file writer.
#[must_use = "Dropping this handle will stop background logging threads."]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    /// Starts a builder. `name` prefixes rolling files, e.g. `relay-server.2026-10-19.log`.
    pub fn builder(name: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder {
            name: name.into(),
            console: true,
            path: None,
            directives: LevelFilter::INFO.to_string().to_lowercase(),
            max_files: DEFAULT_MAX_FILES,
            json: false,
        }
    }

    /// Whether a file sink is attached.
    #[must_use]
    pub const fn has_file_sink(&self) -> bool {
        self.guard.is_some()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::info!("Logging system shutting down, flushing buffers...");
        }
    }
}

fn build_env_filter(directives: &str) -> Result<EnvFilter, LoggerError> {
    let configured =
        EnvFilter::try_new(directives).map_err(|e| LoggerError::InvalidConfiguration {
            message: format!("Invalid level directives '{directives}': {e}").into(),
            context: None,
        })?;

    Ok(EnvFilter::try_from_default_env().unwrap_or(configured))
}
