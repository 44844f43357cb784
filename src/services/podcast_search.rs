use crate::models::{PodcastRecord, SearchResults};

const TITLE_POINTS: u32 = 3;
const TITLE_PREFIX_POINTS: u32 = 2;
const DESCRIPTION_POINTS: u32 = 1;
const CATEGORY_POINTS: u32 = 2;

/// Free-text catalog search with an optional category filter
///
/// Matches are ranked by score, then by title, and sliced by
/// `offset`/`limit`. `total` counts every match before slicing.
pub fn search(
    catalog: &[PodcastRecord],
    query: &str,
    offset: usize,
    limit: usize,
    categories: Option<&[String]>,
) -> SearchResults {
    let query = query.trim().to_lowercase();
    let wanted: Option<Vec<String>> =
        categories.map(|list| list.iter().map(|c| c.to_lowercase()).collect());

    let mut matches: Vec<(u32, &PodcastRecord)> = catalog
        .iter()
        .map(|podcast| (score(podcast, &query, wanted.as_deref()), podcast))
        .filter(|(score, _)| *score > 0)
        .collect();

    matches.sort_by(|(score_a, a), (score_b, b)| {
        score_b.cmp(score_a).then_with(|| a.title.cmp(&b.title))
    });

    let total = matches.len();
    let start = offset.min(total);
    let end = start.saturating_add(limit).min(total);

    tracing::debug!(query = %query, total, start, end, "Catalog searched");

    SearchResults {
        total,
        offset,
        limit,
        results: matches[start..end]
            .iter()
            .map(|(_, podcast)| (*podcast).clone())
            .collect(),
    }
}

fn score(podcast: &PodcastRecord, query: &str, categories: Option<&[String]>) -> u32 {
    let title = podcast.title.to_lowercase();
    let description = podcast.description.to_lowercase();
    let mut score = 0;

    if title.contains(query) {
        score += TITLE_POINTS;
        if title.starts_with(query) {
            score += TITLE_PREFIX_POINTS;
        }
    }

    if description.contains(query) {
        score += DESCRIPTION_POINTS;
    }

    if let Some(wanted) = categories.filter(|wanted| !wanted.is_empty()) {
        let own: Vec<String> = podcast.categories.iter().map(|c| c.to_lowercase()).collect();
        if wanted.iter().any(|category| own.contains(category)) {
            score += CATEGORY_POINTS;
        }
    }

    score
}
