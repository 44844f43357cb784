//! Podcast catalog source abstraction
//!
//! Each source fetches candidate podcasts from one external feed. Sources
//! fail independently; the catalog service decides how to recover.

use crate::{error::AppResult, models::PodcastRecord};

pub mod itunes;

pub use itunes::ItunesSource;

/// User agent sent to external feeds
pub const USER_AGENT: &str = "Mozilla/5.0 (compatible; PodcastRecommender/1.0)";

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch candidate podcasts, in the order the source ranks them
    async fn fetch_candidates(&self) -> AppResult<Vec<PodcastRecord>>;

    /// Source name for logging and the records' `source` field
    fn name(&self) -> &'static str;
}
