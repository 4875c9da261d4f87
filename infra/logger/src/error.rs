use std::borrow::Cow;

/// Errors that can occur during logger initialization.
#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// The rolling file appender could not be created (e.g., unwritable directory).
    #[error("Rolling file appender error: {source}")]
    Appender {
        #[from]
        source: tracing_appender::rolling::InitError,
    },

    /// A global tracing subscriber is already installed in this process.
    #[error("Tracing subscriber error: {source}")]
    Subscriber {
        #[from]
        source: tracing_subscriber::util::TryInitError,
    },

    /// The log directory could not be created.
    #[error("Failed to create log directory {path}: {source}")]
    Directory {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration supplied to the logger builder.
    #[error("Invalid logger configuration: {message}")]
    InvalidConfiguration { message: Cow<'static, str> },
}
