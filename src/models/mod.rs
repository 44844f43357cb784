pub mod podcast;
pub mod profile;

use serde::{Deserialize, Serialize};

pub use podcast::{ItunesFeedResponse, PodcastRecord, ScoredRecommendation, SearchResults};
pub use profile::{
    Category, ExperienceEntry, ExpertiseLevel, LinkedInProfile, Profile, ProfileAnalysis,
};

/// Request body for the recommendation endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    #[serde(default)]
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub wants_to_be_featured: bool,
}

/// Profile section of the recommendation response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummary {
    pub name: String,
    pub summary: String,
    /// First five skills
    pub skills: Vec<String>,
    pub interests: Vec<String>,
    /// Empty unless the visitor asked to be featured
    pub featured_opportunities: Vec<String>,
    pub expertise_level: ExpertiseLevel,
    pub categories: Vec<Category>,
}

impl ProfileSummary {
    pub fn new(profile: &LinkedInProfile, analysis: &ProfileAnalysis, wants_featured: bool) -> Self {
        Self {
            name: profile.name.clone(),
            summary: profile.summary.clone(),
            skills: profile.profile.skills.iter().take(5).cloned().collect(),
            interests: profile.profile.interests.clone(),
            featured_opportunities: if wants_featured {
                analysis.featured_opportunities.clone()
            } else {
                Vec::new()
            },
            expertise_level: analysis.expertise_level,
            categories: analysis.categories.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub recommendations: Vec<ScoredRecommendation>,
    pub profile: ProfileSummary,
}

/// Query parameters for catalog search
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub offset: usize,
    #[serde(default = "default_search_limit")]
    pub limit: usize,
    /// Comma-separated category filter
    #[serde(default)]
    pub categories: Option<String>,
}

fn default_search_limit() -> usize {
    10
}

impl SearchParams {
    pub fn category_filter(&self) -> Option<Vec<String>> {
        let categories: Vec<String> = self
            .categories
            .as_deref()?
            .split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(String::from)
            .collect();

        if categories.is_empty() {
            None
        } else {
            Some(categories)
        }
    }
}
