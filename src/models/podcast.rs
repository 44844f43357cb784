use serde::{Deserialize, Serialize};

/// Podcast catalog entry
///
/// `title`, `description` and `categories` are required; a cached catalog
/// missing any of them on any entry is treated as invalid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PodcastRecord {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub website: String,
    /// May carry meta-tags such as "Top Rated" or "Featured"
    pub categories: Vec<String>,
    #[serde(default)]
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
}

impl PodcastRecord {
    /// Whether the record's own category list holds `tag` exactly
    pub fn has_tag(&self, tag: &str) -> bool {
        self.categories.iter().any(|category| category == tag)
    }
}

/// A recommended podcast with the reasons it was picked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRecommendation {
    pub title: String,
    pub description: String,
    pub image: String,
    pub website: String,
    pub categories: Vec<String>,
    pub reasons: Vec<String>,
}

impl ScoredRecommendation {
    pub fn from_record(record: &PodcastRecord, reasons: Vec<String>) -> Self {
        Self {
            title: record.title.clone(),
            description: record.description.clone(),
            image: record.image.clone(),
            website: record.website.clone(),
            categories: record.categories.clone(),
            reasons,
        }
    }
}

/// One page of catalog search results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    /// Matches before pagination
    pub total: usize,
    pub offset: usize,
    pub limit: usize,
    pub results: Vec<PodcastRecord>,
}

impl SearchResults {
    pub fn empty(offset: usize, limit: usize) -> Self {
        Self {
            total: 0,
            offset,
            limit,
            results: Vec::new(),
        }
    }
}

// ============================================================================
// iTunes top-podcasts feed types
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItunesFeedResponse {
    #[serde(default)]
    pub feed: ItunesFeed,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItunesFeed {
    #[serde(default)]
    pub entry: Vec<ItunesEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItunesLabel {
    #[serde(default)]
    pub label: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItunesLinkAttributes {
    #[serde(default)]
    pub href: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItunesLinkTarget {
    #[serde(default)]
    pub attributes: ItunesLinkAttributes,
}

/// The feed emits a single link object or a list of them
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ItunesLink {
    Single(ItunesLinkTarget),
    Many(Vec<ItunesLinkTarget>),
}

impl ItunesLink {
    pub fn href(&self) -> String {
        match self {
            ItunesLink::Single(target) => target.attributes.href.clone(),
            ItunesLink::Many(targets) => targets
                .first()
                .map(|target| target.attributes.href.clone())
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItunesEntry {
    #[serde(default)]
    pub title: ItunesLabel,
    #[serde(default)]
    pub summary: ItunesLabel,
    #[serde(default, rename = "im:image")]
    pub images: Vec<ItunesLabel>,
    #[serde(default)]
    pub link: Option<ItunesLink>,
    #[serde(default, rename = "im:rating")]
    pub rating: Option<ItunesLabel>,
    #[serde(default, rename = "im:releaseDate")]
    pub release_date: Option<ItunesLabel>,
}

impl ItunesEntry {
    /// Converts a feed entry into a catalog record tagged with `categories`
    pub fn into_record(self, source: &str, categories: &[String]) -> PodcastRecord {
        let rating = self
            .rating
            .and_then(|label| label.label.trim().parse::<f64>().ok());

        PodcastRecord {
            title: self.title.label,
            description: self.summary.label,
            image: self
                .images
                .into_iter()
                .next()
                .map(|image| image.label)
                .unwrap_or_default(),
            website: self.link.map(|link| link.href()).unwrap_or_default(),
            categories: categories.to_vec(),
            source: source.to_string(),
            rating,
            release_date: self
                .release_date
                .map(|label| label.label)
                .filter(|date| !date.is_empty()),
        }
    }
}
