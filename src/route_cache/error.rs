//! Error types for the route cache.

use std::path::PathBuf;
use thiserror::Error;

/// Failures reading, writing or removing the persisted route document.
///
/// A missing document is a cache miss, never one of these.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Failed to read route cache '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write route cache '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to remove route cache '{path}': {source}")]
    Remove {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse route cache '{path}': {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to serialize route cache: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_error_mentions_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied");
        let err = CacheError::Write {
            path: PathBuf::from("/var/cache/route_cache.json"),
            source: io_err,
        };
        assert!(err.to_string().contains("/var/cache/route_cache.json"));
        assert!(err.to_string().contains("permission denied"));
    }
}
