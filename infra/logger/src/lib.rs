//! # Logger
//!
//! Global `tracing` setup for the campus binaries: a compact console layer,
//! an optional non-blocking rolling file layer (plain text or JSON), and an
//! [`EnvFilter`] that `RUST_LOG` can always override.
//!
//! ## Example
//!
//! ```rust
//! # use campus_logger::{Logger, LevelFilter};
//! let _logger = Logger::builder()
//!     .name("campus-server")
//!     .level(LevelFilter::DEBUG)
//!     .init()
//!     .unwrap();
//! ```

mod error;

pub use crate::error::LoggerError;
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use std::fs;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const DEFAULT_MAX_FILES: usize = 10;
const LOG_FILE_SUFFIX: &str = "log";

/// Builder for the global tracing subscriber.
#[derive(Debug)]
#[must_use = "The builder does nothing until .init() is called"]
pub struct LoggerBuilder {
    name: String,
    console: bool,
    level: LevelFilter,
    env_filter: Option<String>,
    directory: Option<PathBuf>,
    rotation: Rotation,
    max_files: usize,
    json: bool,
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self {
            name: String::new(),
            console: true,
            level: LevelFilter::INFO,
            env_filter: None,
            directory: None,
            rotation: Rotation::DAILY,
            max_files: DEFAULT_MAX_FILES,
            json: false,
        }
    }
}

impl LoggerBuilder {
    /// Identifies the process in logs; also the prefix of rolling log files
    /// (e.g., `campus-server.2026-10-18.log`).
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub const fn console(mut self, enabled: bool) -> Self {
        self.console = enabled;
        self
    }

    /// Default level when neither `RUST_LOG` nor [`Self::env_filter`] say otherwise.
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Programmatic filter directives (e.g., `campus_activities=debug,tower_http=info`).
    ///
    /// `RUST_LOG`, when set, takes precedence.
    pub fn env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Writes logs to rolling files in `directory` in addition to the console.
    pub fn path(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = Some(directory.into());
        self
    }

    pub const fn rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    pub const fn max_files(mut self, max: usize) -> Self {
        self.max_files = max;
        self
    }

    /// Formats file output as JSON lines. Console output stays human-readable.
    pub const fn json(mut self, enabled: bool) -> Self {
        self.json = enabled;
        self
    }

    /// Installs the global subscriber.
    ///
    /// The returned [`Logger`] owns the file writer's worker guard; keep it
    /// alive until shutdown so buffered lines are flushed.
    ///
    /// # Errors
    /// * [`LoggerError::InvalidConfiguration`] for an empty name, zero `max_files`,
    ///   an unparsable filter, or when no layer is enabled.
    /// * [`LoggerError::Directory`] / [`LoggerError::Appender`] if file output cannot be set up.
    /// * [`LoggerError::Subscriber`] if a global subscriber is already installed.
    pub fn init(self) -> Result<Logger, LoggerError> {
        self.validate()?;
        let filter = self.build_filter()?;

        let mut layers = Vec::new();
        if self.console {
            layers.push(layer().compact().with_ansi(true).boxed());
        }

        let guard = match &self.directory {
            Some(directory) => {
                fs::create_dir_all(directory).map_err(|source| LoggerError::Directory {
                    path: directory.display().to_string(),
                    source,
                })?;

                let appender = RollingFileAppender::builder()
                    .rotation(self.rotation.clone())
                    .filename_prefix(&self.name)
                    .filename_suffix(LOG_FILE_SUFFIX)
                    .max_log_files(self.max_files)
                    .build(directory)?;
                let (writer, guard) = tracing_appender::non_blocking(appender);

                let file_layer = layer().with_writer(writer).with_ansi(false);
                layers.push(if self.json { file_layer.json().boxed() } else { file_layer.boxed() });
                Some(guard)
            },
            None => None,
        };

        if layers.is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "No logging layers enabled. Enable console or file output.".into(),
            });
        }

        tracing_subscriber::registry().with(filter).with(layers).try_init()?;

        Ok(Logger { guard })
    }

    fn validate(&self) -> Result<(), LoggerError> {
        if self.name.trim().is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "Logger name cannot be empty".into(),
            });
        }
        if self.max_files == 0 {
            return Err(LoggerError::InvalidConfiguration {
                message: "max_files must be greater than zero".into(),
            });
        }
        Ok(())
    }

    fn build_filter(&self) -> Result<EnvFilter, LoggerError> {
        let builder = EnvFilter::builder().with_default_directive(self.level.into());

        if std::env::var_os(EnvFilter::DEFAULT_ENV).is_some() {
            return Ok(builder.from_env_lossy());
        }

        match &self.env_filter {
            Some(directives) => builder.parse(directives).map_err(|e| {
                LoggerError::InvalidConfiguration {
                    message: format!("Invalid env filter '{directives}': {e}").into(),
                }
            }),
            None => Ok(builder.parse_lossy("")),
        }
    }
}

/// Handle to the installed logging system.
#[must_use = "Dropping this handle stops the background log writer"]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::default()
    }

    /// The file writer's worker guard, if file output is enabled.
    #[must_use]
    pub const fn guard(&self) -> Option<&WorkerGuard> {
        self.guard.as_ref()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::info!("Logging system shutting down, flushing buffers...");
        }
    }
}
