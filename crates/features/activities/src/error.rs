use std::borrow::Cow;
use std::path::PathBuf;

/// Activities error type.
///
/// The roster variants display the exact text shown to students, so they
/// can be forwarded to API clients unchanged.
#[derive(Debug, thiserror::Error)]
pub enum ActivityError {
    #[error("Activity not found")]
    NotFound { activity: String },

    #[error("Student is already signed up for this activity")]
    AlreadySignedUp { activity: String, email: String },

    #[error("Activity is full")]
    Full { activity: String, capacity: u32 },

    #[error("Student is not registered for this activity")]
    NotRegistered { activity: String, email: String },

    #[error("Failed to read seed file {}: {source}", path.display())]
    SeedIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed seed file {}: {source}", path.display())]
    SeedFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid seed catalog: {message}")]
    InvalidSeed { message: Cow<'static, str> },
}
