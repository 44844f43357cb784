use crate::models::{Category, PodcastRecord, ProfileAnalysis, ScoredRecommendation};

/// Maximum number of recommendations returned
pub const MAX_RECOMMENDATIONS: usize = 10;

const KEYWORD_TITLE_POINTS: i32 = 3;
const KEYWORD_DESCRIPTION_POINTS: i32 = 2;
const CATEGORY_TITLE_POINTS: i32 = 3;
const CATEGORY_DESCRIPTION_POINTS: i32 = 2;
const CATEGORY_TAG_POINTS: i32 = 2;
const OPPORTUNITY_POINTS: i32 = 4;
const TOP_RATED_POINTS: i32 = 3;
const FEATURED_POINTS: i32 = 2;

const GUEST_REASON: &str = "Perfect for guest appearances based on your profile";
const TOP_RATED_REASON: &str = "Highly rated by listeners";
const FEATURED_REASON: &str = "Featured podcast";

/// A recommendation together with the score that ranked it
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPodcast {
    pub score: i32,
    pub recommendation: ScoredRecommendation,
}

/// Generates personalized podcast recommendations
///
/// Scores every catalog record against the profile analysis and returns at
/// most [`MAX_RECOMMENDATIONS`] entries, best first. Pure; never fails.
pub fn recommend(
    analysis: &ProfileAnalysis,
    wants_featured: bool,
    catalog: &[PodcastRecord],
) -> Vec<ScoredRecommendation> {
    rank_podcasts(analysis, wants_featured, catalog)
        .into_iter()
        .map(|scored| scored.recommendation)
        .collect()
}

/// Ranks catalog records by score, keeping internal scores visible
///
/// Records scoring zero or less are dropped. The sort is stable, so equal
/// scores keep catalog order.
pub fn rank_podcasts(
    analysis: &ProfileAnalysis,
    wants_featured: bool,
    catalog: &[PodcastRecord],
) -> Vec<ScoredPodcast> {
    let mut scored: Vec<ScoredPodcast> = catalog
        .iter()
        .filter_map(|podcast| {
            let (score, reasons) = score_podcast(analysis, wants_featured, podcast);
            (score > 0).then(|| ScoredPodcast {
                score,
                recommendation: ScoredRecommendation::from_record(podcast, reasons),
            })
        })
        .collect();

    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(MAX_RECOMMENDATIONS);

    tracing::debug!(
        catalog = catalog.len(),
        kept = scored.len(),
        top_score = scored.first().map(|s| s.score),
        "Podcasts ranked"
    );

    scored
}

/// Scores one podcast and collects the reasons, in a fixed order:
/// keywords, categories, guest fit, top rated, featured.
pub fn score_podcast(
    analysis: &ProfileAnalysis,
    wants_featured: bool,
    podcast: &PodcastRecord,
) -> (i32, Vec<String>) {
    let title = podcast.title.to_lowercase();
    let description = podcast.description.to_lowercase();
    let tags: Vec<String> = podcast.categories.iter().map(|c| c.to_lowercase()).collect();

    let mut score = 0;
    let mut reasons = Vec::new();

    let mut matched_keywords: Vec<&str> = Vec::new();
    for keyword in &analysis.keywords {
        let needle = keyword.to_lowercase();
        if title.contains(&needle) {
            score += KEYWORD_TITLE_POINTS;
            matched_keywords.push(keyword);
        } else if description.contains(&needle) {
            score += KEYWORD_DESCRIPTION_POINTS;
            matched_keywords.push(keyword);
        }
    }
    if !matched_keywords.is_empty() {
        reasons.push(format!(
            "Matches your expertise in: {}",
            matched_keywords.join(", ")
        ));
    }

    let mut matched_categories: Vec<Category> = Vec::new();
    for category in &analysis.categories {
        let needle = category.as_str();
        let points = if title.contains(needle) {
            CATEGORY_TITLE_POINTS
        } else if description.contains(needle) {
            CATEGORY_DESCRIPTION_POINTS
        } else if tags.iter().any(|tag| tag.contains(needle)) {
            CATEGORY_TAG_POINTS
        } else {
            continue;
        };

        score += points;
        if !matched_categories.contains(category) {
            matched_categories.push(*category);
        }
    }
    if !matched_categories.is_empty() {
        let names: Vec<&str> = matched_categories.iter().map(Category::as_str).collect();
        reasons.push(format!("Aligns with your interests in: {}", names.join(", ")));
    }

    if wants_featured {
        let mut any_opportunity = false;
        for opportunity in &analysis.featured_opportunities {
            let needle = opportunity.to_lowercase();
            if title.contains(&needle) || description.contains(&needle) {
                score += OPPORTUNITY_POINTS;
                any_opportunity = true;
            }
        }
        if any_opportunity {
            reasons.push(GUEST_REASON.to_string());
        }
    }

    if podcast.has_tag("Top Rated") {
        score += TOP_RATED_POINTS;
        reasons.push(TOP_RATED_REASON.to_string());
    }
    if podcast.has_tag("Featured") {
        score += FEATURED_POINTS;
        reasons.push(FEATURED_REASON.to_string());
    }

    (score, reasons)
}
