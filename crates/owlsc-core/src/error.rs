use std::path::PathBuf;

use crate::store::Handle;

/// Failure of a single graph store round-trip.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("graph store unavailable: {0}")]
    Unavailable(String),
    #[error("invalid element handle {0}")]
    InvalidHandle(Handle),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config `{path}`: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config `{path}`: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}
