use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::content::QuadKey;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt cache file {}: {reason}", .path.display())]
    CorruptCache { path: PathBuf, reason: String },

    #[error("Cache session already in progress for quadkey {0}")]
    SessionInProgress(QuadKey),

    #[error("Config error: {0}")]
    Config(#[from] ::config::ConfigError),
}

impl CacheError {
    pub fn is_corrupt(&self) -> bool {
        matches!(self, CacheError::CorruptCache { .. })
    }
}

/// Tags decode failures with the cache file they came from.
///
/// Short reads and malformed payloads become [`CacheError::CorruptCache`]; anything else
/// stays a plain I/O error.
pub trait CorruptContext<T> {
    fn corrupt_context(self, path: &Path, what: &str) -> Result<T, CacheError>;
}

impl<T> CorruptContext<T> for Result<T, std::io::Error> {
    fn corrupt_context(self, path: &Path, what: &str) -> Result<T, CacheError> {
        self.map_err(|e| match e.kind() {
            std::io::ErrorKind::UnexpectedEof => CacheError::CorruptCache {
                path: path.to_path_buf(),
                reason: format!("truncated {what}"),
            },
            std::io::ErrorKind::InvalidData => CacheError::CorruptCache {
                path: path.to_path_buf(),
                reason: format!("invalid {what}: {e}"),
            },
            _ => CacheError::Io(e),
        })
    }
}
