use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;

use crate::{
    db::{CatalogSnapshot, CatalogStore},
    error::AppError,
    models::{PodcastRecord, SearchResults},
    services::{podcast_search, providers::CatalogSource},
};

/// Default freshness window of the cached catalog
pub const DEFAULT_CATALOG_TTL: Duration = Duration::from_secs(86400);

/// Fixed catalog used whenever no source yields anything
pub fn sample_podcasts() -> Vec<PodcastRecord> {
    let sample = |title: &str, description: &str, image: &str, website: &str, categories: [&str; 3]| {
        PodcastRecord {
            title: title.to_string(),
            description: description.to_string(),
            image: image.to_string(),
            website: website.to_string(),
            categories: categories.iter().map(|c| c.to_string()).collect(),
            source: "Sample".to_string(),
            rating: None,
            release_date: None,
        }
    };

    vec![
        sample(
            "StartUp",
            "A series about what it's really like to start a business.",
            "https://example.com/startup.jpg",
            "https://gimletmedia.com/startup",
            ["Business", "Entrepreneurship", "Startups"],
        ),
        sample(
            "How I Built This",
            "Guy Raz dives into the stories behind some of the world's best known companies.",
            "https://example.com/hibt.jpg",
            "https://npr.org/hibt",
            ["Business", "Entrepreneurship", "Innovation"],
        ),
        sample(
            "Masters of Scale",
            "Reid Hoffman shows how companies grow from zero to a gazillion.",
            "https://example.com/scale.jpg",
            "https://mastersofscale.com",
            ["Startups", "Business", "Venture Capital"],
        ),
        sample(
            "The Pitch",
            "Where real entrepreneurs pitch to real investors.",
            "https://example.com/pitch.jpg",
            "https://gimletmedia.com/the-pitch",
            ["Startups", "Venture Capital", "Business"],
        ),
        sample(
            "Business Wars",
            "Inside the most dramatic business battles in history.",
            "https://example.com/bw.jpg",
            "https://wondery.com/business-wars",
            ["Business", "Innovation", "Top Rated"],
        ),
    ]
}

/// Logs a failure the catalog layer is about to absorb.
/// Expected failures (sources, cache contents) warn; anything else is an error.
fn log_degraded(error: &AppError, context: &'static str) {
    if error.is_recoverable() {
        tracing::warn!(error = %error, "{}", context);
    } else {
        tracing::error!(error = %error, "{}", context);
    }
}

/// Cached podcast catalog backed by a store and external sources
///
/// Never fails: stale or unreadable caches trigger a refresh, failed sources
/// are skipped, and an empty refresh falls back to [`sample_podcasts`].
/// Concurrent refreshes are not coordinated; the last save wins.
pub struct CatalogService {
    store: Arc<dyn CatalogStore>,
    sources: Vec<Arc<dyn CatalogSource>>,
    ttl: Duration,
}

impl CatalogService {
    pub fn new(
        store: Arc<dyn CatalogStore>,
        sources: Vec<Arc<dyn CatalogSource>>,
        ttl: Duration,
    ) -> Self {
        Self { store, sources, ttl }
    }

    /// Returns the full catalog, refreshing it when the cache is stale or invalid
    pub async fn get_all_podcasts(&self) -> Vec<PodcastRecord> {
        match self.store.load().await {
            Ok(Some(snapshot)) => {
                if let Some(podcasts) = self.fresh_podcasts(snapshot) {
                    tracing::debug!(podcasts = podcasts.len(), "Using cached catalog");
                    return podcasts;
                }
            }
            Ok(None) => tracing::info!("No cached catalog, refreshing"),
            Err(e) => log_degraded(&e, "Unusable catalog cache, refreshing"),
        }

        self.refresh().await
    }

    fn fresh_podcasts(&self, snapshot: CatalogSnapshot) -> Option<Vec<PodcastRecord>> {
        let age = snapshot.age(Utc::now()).to_std().unwrap_or_default();
        if age < self.ttl {
            return Some(snapshot.podcasts);
        }

        tracing::info!(
            age_hours = age.as_secs() / 3600,
            "Cached catalog is stale, refreshing"
        );
        None
    }

    /// Rebuilds the catalog from every source and writes it back to the store
    pub async fn refresh(&self) -> Vec<PodcastRecord> {
        let mut podcasts = self.fetch_from_sources().await;

        if podcasts.is_empty() {
            tracing::warn!("No podcasts from any source, using sample catalog");
            podcasts = sample_podcasts();
        }

        // Stable, so unrated records keep source order
        podcasts.sort_by(|a, b| {
            b.rating
                .unwrap_or(0.0)
                .total_cmp(&a.rating.unwrap_or(0.0))
        });

        if let Err(e) = self.store.save(&podcasts).await {
            log_degraded(&e, "Failed to persist refreshed catalog");
        }

        podcasts
    }

    async fn fetch_from_sources(&self) -> Vec<PodcastRecord> {
        let mut podcasts = Vec::new();

        for source in &self.sources {
            match source.fetch_candidates().await {
                Ok(records) => {
                    tracing::info!(
                        source = source.name(),
                        podcasts = records.len(),
                        "Catalog source fetched"
                    );
                    podcasts.extend(records);
                }
                Err(e) => log_degraded(&e, "Catalog source failed, skipping"),
            }
        }

        podcasts
    }

    /// Searches the catalog; degrades to an empty page instead of failing
    pub async fn search(
        &self,
        query: &str,
        offset: usize,
        limit: usize,
        categories: Option<&[String]>,
    ) -> SearchResults {
        let catalog = self.get_all_podcasts().await;
        podcast_search::search(&catalog, query, offset, limit, categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::InMemoryCatalogStore;
    use crate::services::providers::MockCatalogSource;

    fn podcast(title: &str, rating: Option<f64>) -> PodcastRecord {
        PodcastRecord {
            title: title.to_string(),
            description: String::new(),
            image: String::new(),
            website: String::new(),
            categories: vec!["Business".to_string()],
            source: "Test".to_string(),
            rating,
            release_date: None,
        }
    }

    fn sources(list: Vec<MockCatalogSource>) -> Vec<Arc<dyn CatalogSource>> {
        list.into_iter()
            .map(|source| Arc::new(source) as Arc<dyn CatalogSource>)
            .collect()
    }

    fn failing_source() -> MockCatalogSource {
        let mut source = MockCatalogSource::new();
        source.expect_fetch_candidates().times(1).returning(|| {
            Err(AppError::SourceUnavailable {
                source_name: "mock".to_string(),
                reason: "offline".to_string(),
            })
        });
        source.expect_name().return_const("mock");
        source
    }

    fn returning_source(podcasts: Vec<PodcastRecord>) -> MockCatalogSource {
        let mut source = MockCatalogSource::new();
        source
            .expect_fetch_candidates()
            .times(1)
            .returning(move || Ok(podcasts.clone()));
        source.expect_name().return_const("mock");
        source
    }

    fn unused_source() -> MockCatalogSource {
        let mut source = MockCatalogSource::new();
        source.expect_fetch_candidates().never();
        source.expect_name().return_const("mock");
        source
    }

    #[test]
    fn test_sample_catalog_has_five_records() {
        let samples = sample_podcasts();
        assert_eq!(samples.len(), 5);
        assert!(samples.iter().all(|p| p.source == "Sample"));
        assert!(samples[4].has_tag("Top Rated"));
    }

    #[tokio::test]
    async fn test_missing_cache_and_failing_sources_fall_back_to_samples() {
        let store = Arc::new(InMemoryCatalogStore::new());
        let service = CatalogService::new(
            store.clone(),
            sources(vec![failing_source(), failing_source()]),
            DEFAULT_CATALOG_TTL,
        );

        let podcasts = service.get_all_podcasts().await;

        assert_eq!(podcasts, sample_podcasts());
        assert_eq!(store.snapshot().unwrap().podcasts, sample_podcasts());
    }

    #[tokio::test]
    async fn test_stale_cache_triggers_refresh() {
        let stale_at = Utc::now() - chrono::Duration::hours(25);
        let store = Arc::new(InMemoryCatalogStore::with_snapshot(
            vec![podcast("Old Show", None)],
            stale_at,
        ));
        let service = CatalogService::new(
            store.clone(),
            sources(vec![failing_source()]),
            DEFAULT_CATALOG_TTL,
        );

        let podcasts = service.get_all_podcasts().await;

        assert_eq!(podcasts, sample_podcasts());
        assert!(store.snapshot().unwrap().saved_at > stale_at);
    }

    #[tokio::test]
    async fn test_fresh_cache_skips_sources() {
        let store = Arc::new(InMemoryCatalogStore::with_snapshot(
            vec![podcast("Cached Show", None)],
            Utc::now() - chrono::Duration::hours(1),
        ));
        let service = CatalogService::new(
            store,
            sources(vec![unused_source()]),
            DEFAULT_CATALOG_TTL,
        );

        let podcasts = service.get_all_podcasts().await;
        assert_eq!(podcasts.len(), 1);
        assert_eq!(podcasts[0].title, "Cached Show");
    }

    #[tokio::test]
    async fn test_partial_source_failure_keeps_successes_sorted_by_rating() {
        let store = Arc::new(InMemoryCatalogStore::new());
        let service = CatalogService::new(
            store,
            sources(vec![
                failing_source(),
                returning_source(vec![
                    podcast("Unrated", None),
                    podcast("Good", Some(4.2)),
                    podcast("Best", Some(4.9)),
                ]),
            ]),
            DEFAULT_CATALOG_TTL,
        );

        let titles: Vec<String> = service
            .get_all_podcasts()
            .await
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, vec!["Best", "Good", "Unrated"]);
    }

    #[tokio::test]
    async fn test_invalid_file_cache_triggers_refresh() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("podcasts.json");
        tokio::fs::write(&path, r#"[{"title": "No description"}]"#)
            .await
            .unwrap();

        let store = Arc::new(crate::db::FileCatalogStore::new(&path));
        let service = CatalogService::new(
            store.clone(),
            sources(vec![failing_source()]),
            DEFAULT_CATALOG_TTL,
        );

        assert_eq!(service.get_all_podcasts().await, sample_podcasts());
        // The rewritten cache is valid again
        let reloaded = store.load().await.unwrap().unwrap();
        assert_eq!(reloaded.podcasts.len(), 5);
    }

    #[tokio::test]
    async fn test_search_uses_catalog() {
        let service = CatalogService::new(
            Arc::new(InMemoryCatalogStore::new()),
            sources(vec![failing_source()]),
            DEFAULT_CATALOG_TTL,
        );

        let results = service.search("wars", 0, 10, None).await;
        assert_eq!(results.total, 1);
        assert_eq!(results.results[0].title, "Business Wars");
    }
}
