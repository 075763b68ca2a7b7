use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::SystemTime;
use tracing::debug;

use super::{load_recipe_dataset, Dataset, DatasetError};

/// How a [`DatasetSource`] decides when to re-read the file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReloadPolicy {
    /// Load and parse the file on every snapshot request.
    #[default]
    EveryRequest,
    /// Keep the last snapshot while the file's modification time is unchanged.
    WhenModified,
}

struct CachedSnapshot {
    modified: SystemTime,
    dataset: Arc<Dataset>,
}

/// Hands out complete dataset snapshots to request handlers.
pub struct DatasetSource {
    path: PathBuf,
    policy: ReloadPolicy,
    cache: RwLock<Option<CachedSnapshot>>,
}

impl DatasetSource {
    pub fn new(path: impl Into<PathBuf>, policy: ReloadPolicy) -> Self {
        Self {
            path: path.into(),
            policy,
            cache: RwLock::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn policy(&self) -> ReloadPolicy {
        self.policy
    }

    /// Drops any cached snapshot so the next request reads the file again.
    pub fn invalidate(&self) {
        if let Ok(mut cache) = self.cache.write() {
            *cache = None;
        }
    }

    /// Returns a fully loaded dataset. Parsing runs on the blocking pool.
    pub async fn snapshot(&self) -> Result<Arc<Dataset>, DatasetError> {
        match self.policy {
            ReloadPolicy::EveryRequest => self.load().await.map(Arc::new),
            ReloadPolicy::WhenModified => self.cached_snapshot().await,
        }
    }

    async fn cached_snapshot(&self) -> Result<Arc<Dataset>, DatasetError> {
        let modified = tokio::fs::metadata(&self.path)
            .await
            .and_then(|meta| meta.modified())
            .map_err(|source| {
                if source.kind() == std::io::ErrorKind::NotFound {
                    DatasetError::NotFound(self.path.clone())
                } else {
                    DatasetError::Io {
                        path: self.path.clone(),
                        source,
                    }
                }
            })?;

        if let Some(hit) = self.cached_if_fresh(modified) {
            debug!(path = %self.path.display(), "serving cached dataset snapshot");
            return Ok(hit);
        }

        let dataset = Arc::new(self.load().await?);
        if let Ok(mut cache) = self.cache.write() {
            *cache = Some(CachedSnapshot {
                modified,
                dataset: Arc::clone(&dataset),
            });
        }
        debug!(path = %self.path.display(), rows = dataset.len(), "dataset snapshot reloaded");
        Ok(dataset)
    }

    fn cached_if_fresh(&self, modified: SystemTime) -> Option<Arc<Dataset>> {
        let cache = self.cache.read().ok()?;
        cache
            .as_ref()
            .filter(|c| c.modified == modified)
            .map(|c| Arc::clone(&c.dataset))
    }

    async fn load(&self) -> Result<Dataset, DatasetError> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || load_recipe_dataset(&path))
            .await
            .map_err(|e| DatasetError::LoaderPanicked(e.to_string()))?
    }
}
