//! # Route Stores
//!
//! Single-slot persistence for [`CachedRoute`]. The only operations are
//! "read whole document", "write whole document" and "remove document".
//!
//! - [`JsonFileStore`] - pretty JSON file on disk, written via temp file + rename
//! - [`MemoryStore`] - in-process slot with operation counters, for tests

use super::{CacheError, CachedRoute};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

#[async_trait]
pub trait RouteStore: Send + Sync {
    /// Read the persisted route. `Ok(None)` when nothing is stored.
    async fn load(&self) -> Result<Option<CachedRoute>, CacheError>;

    /// Replace the persisted route.
    async fn save(&self, route: &CachedRoute) -> Result<(), CacheError>;

    /// Remove the persisted route. Removing an empty slot is not an error.
    async fn clear(&self) -> Result<(), CacheError>;
}

/// Disambiguates temp files when two saves race in one process.
static TMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// Route document stored as one JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let seq = TMP_SEQ.fetch_add(1, Ordering::Relaxed);
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(format!(".{}.{}.tmp", std::process::id(), seq));
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl RouteStore for JsonFileStore {
    async fn load(&self) -> Result<Option<CachedRoute>, CacheError> {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No cached route");
                return Ok(None);
            }
            Err(source) => {
                return Err(CacheError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_str(&text)
            .map(Some)
            .map_err(|source| CacheError::Parse {
                path: self.path.clone(),
                source,
            })
    }

    async fn save(&self, route: &CachedRoute) -> Result<(), CacheError> {
        let json = serde_json::to_string_pretty(route)?;
        let tmp = self.tmp_path();

        tokio::fs::write(&tmp, json)
            .await
            .map_err(|source| CacheError::Write {
                path: tmp.clone(),
                source,
            })?;

        // rename is atomic on the same filesystem: readers see the old or the new document.
        if let Err(source) = tokio::fs::rename(&tmp, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(CacheError::Write {
                path: self.path.clone(),
                source,
            });
        }

        debug!(path = %self.path.display(), "Route cached");
        Ok(())
    }

    async fn clear(&self) -> Result<(), CacheError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!(path = %self.path.display(), "Route cache removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => {
                warn!(path = %self.path.display(), error = %source, "Route cache removal failed");
                Err(CacheError::Remove {
                    path: self.path.clone(),
                    source,
                })
            }
        }
    }
}

/// In-memory slot. Clones share the slot and the counters.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Arc<Mutex<Option<CachedRoute>>>,
    saves: Arc<AtomicUsize>,
    clears: Arc<AtomicUsize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `save` calls so far.
    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Number of `clear` calls so far, including clears of an empty slot.
    pub fn clears(&self) -> usize {
        self.clears.load(Ordering::SeqCst)
    }

    /// Peek at the slot without going through the async trait.
    pub fn current(&self) -> Option<CachedRoute> {
        self.slot.lock().unwrap_or_else(|p| p.into_inner()).clone()
    }
}

#[async_trait]
impl RouteStore for MemoryStore {
    async fn load(&self) -> Result<Option<CachedRoute>, CacheError> {
        Ok(self.current())
    }

    async fn save(&self, route: &CachedRoute) -> Result<(), CacheError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        *self.slot.lock().unwrap_or_else(|p| p.into_inner()) = Some(route.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), CacheError> {
        self.clears.fetch_add(1, Ordering::SeqCst);
        *self.slot.lock().unwrap_or_else(|p| p.into_inner()) = None;
        Ok(())
    }
}
