use thiserror::Error;

/// All local (non-HTTP) errors produced by Formation Admin.
#[derive(Error, Debug)]
pub enum AdminError {
    /// A storage entry exists but could not be read.
    #[error("Failed to read storage key {key}: {source}")]
    StorageRead {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// A storage entry could not be written or removed.
    #[error("Failed to write storage key {key}: {source}")]
    StorageWrite {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// A JSON document could not be parsed or produced.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a key.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the admin crates.
pub type Result<T> = std::result::Result<T, AdminError>;
