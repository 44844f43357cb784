use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{AppError, AppResult};
use crate::models::PodcastRecord;

/// A persisted catalog and the time it was written
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSnapshot {
    pub podcasts: Vec<PodcastRecord>,
    pub saved_at: DateTime<Utc>,
}

impl CatalogSnapshot {
    /// Age of the snapshot relative to `now`; clock skew counts as zero
    pub fn age(&self, now: DateTime<Utc>) -> chrono::Duration {
        (now - self.saved_at).max(chrono::Duration::zero())
    }
}

/// Persistence for the podcast catalog
///
/// `load` returns `Ok(None)` when nothing has been stored yet and an
/// `InvalidCache` error when stored data can't be trusted.
#[async_trait::async_trait]
pub trait CatalogStore: Send + Sync {
    async fn load(&self) -> AppResult<Option<CatalogSnapshot>>;

    async fn save(&self, podcasts: &[PodcastRecord]) -> AppResult<()>;
}

/// Catalog persisted as a pretty-printed JSON list.
/// The snapshot time is the file's modification time.
#[derive(Debug, Clone)]
pub struct FileCatalogStore {
    path: PathBuf,
}

impl FileCatalogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Parses a cached catalog; every entry needs title, description and categories
pub fn parse_catalog(json: &str) -> AppResult<Vec<PodcastRecord>> {
    serde_json::from_str(json).map_err(|e| AppError::InvalidCache(e.to_string()))
}

#[async_trait::async_trait]
impl CatalogStore for FileCatalogStore {
    async fn load(&self) -> AppResult<Option<CatalogSnapshot>> {
        let metadata = match tokio::fs::metadata(&self.path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let saved_at: DateTime<Utc> = metadata.modified()?.into();
        let json = tokio::fs::read_to_string(&self.path).await?;
        let podcasts = parse_catalog(&json)?;

        tracing::debug!(
            path = %self.path.display(),
            podcasts = podcasts.len(),
            saved_at = %saved_at,
            "Loaded catalog cache file"
        );

        Ok(Some(CatalogSnapshot { podcasts, saved_at }))
    }

    async fn save(&self, podcasts: &[PodcastRecord]) -> AppResult<()> {
        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir).await?;
        }

        let json = serde_json::to_string_pretty(podcasts)?;
        tokio::fs::write(&self.path, json).await?;

        tracing::info!(
            path = %self.path.display(),
            podcasts = podcasts.len(),
            "Catalog cache written"
        );

        Ok(())
    }
}

/// Process-local store, used in tests and when no cache file is wanted
#[derive(Debug, Default)]
pub struct InMemoryCatalogStore {
    snapshot: Mutex<Option<CatalogSnapshot>>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a catalog written at `saved_at`
    pub fn with_snapshot(podcasts: Vec<PodcastRecord>, saved_at: DateTime<Utc>) -> Self {
        Self {
            snapshot: Mutex::new(Some(CatalogSnapshot { podcasts, saved_at })),
        }
    }

    pub fn snapshot(&self) -> Option<CatalogSnapshot> {
        self.snapshot
            .lock()
            .ok()
            .and_then(|guard| guard.clone())
    }
}

#[async_trait::async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn load(&self) -> AppResult<Option<CatalogSnapshot>> {
        Ok(self.snapshot())
    }

    async fn save(&self, podcasts: &[PodcastRecord]) -> AppResult<()> {
        let mut guard = self
            .snapshot
            .lock()
            .map_err(|_| AppError::Internal("Catalog store lock poisoned".to_string()))?;
        *guard = Some(CatalogSnapshot {
            podcasts: podcasts.to_vec(),
            saved_at: Utc::now(),
        });
        Ok(())
    }
}
