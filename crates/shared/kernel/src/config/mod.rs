use campus_domain::constants::ENV_PREFIX;
use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Errors raised while assembling the layered configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config error ({context}): {source}")]
    Config {
        #[source]
        source: config::ConfigError,
        context: Cow<'static, str>,
    },
}

/// Loads configuration from an optional file, then overlays environment variables.
///
/// 1. **Base file**: `path` (defaults to `server`, extension auto-detected). A missing
///    file is not an error; every field falls back to its `Default`.
/// 2. **Environment**: variables prefixed with `CAMPUS__`, nested with double
///    underscores (`CAMPUS__SERVER__PORT` maps to `server.port`).
///
/// # Errors
/// Returns [`ConfigError::Config`] if the file is malformed or the merged values
/// do not match the shape of `T`.
///
/// # Example
/// ```rust,no_run
/// use campus_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     port: u16,
/// }
///
/// let cfg: AppConfig = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let effective_path = path.map_or_else(|| PathBuf::from("server"), |p| p.as_ref().to_path_buf());

    if has_config_file(&effective_path) {
        info!("Loading config from {}", effective_path.display());
    } else {
        warn!("No config file at {}, using defaults", effective_path.display());
    }

    Config::builder()
        .add_source(File::from(effective_path.as_path()).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true)
                .convert_case(config::Case::Snake),
        )
        .build()
        .map_err(|source| ConfigError::Config { source, context: "Failed to build config".into() })?
        .try_deserialize::<T>()
        .map_err(|source| ConfigError::Config {
            source,
            context: "Failed to deserialize config".into(),
        })
}

// `File::from` probes every supported extension, so mirror that for the log line.
fn has_config_file(path: &Path) -> bool {
    path.is_file()
        || ["toml", "json", "yaml", "yml", "ini"]
            .iter()
            .any(|ext| path.with_extension(ext).is_file())
}
