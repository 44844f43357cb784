use std::collections::BTreeSet;

use crate::{
    error::{AppError, AppResult},
    models::{Category, ExperienceEntry, ExpertiseLevel, Profile, ProfileAnalysis},
};

/// A category is relevant once this many of its trigger terms are keywords
const MIN_CATEGORY_TERMS: usize = 2;
const EXPERT_MIN_YEARS: f64 = 5.0;

const LEADERSHIP_TITLES: [&str; 6] = ["founder", "ceo", "director", "vp", "head", "chief"];

const LEADERSHIP_OPPORTUNITIES: [&str; 3] = [
    "Leadership Insights",
    "Founder Stories",
    "Executive Perspectives",
];

/// Trigger terms for each category of the taxonomy
pub fn trigger_terms(category: Category) -> &'static [&'static str] {
    match category {
        Category::Technology => &[
            "ai",
            "machine learning",
            "blockchain",
            "saas",
            "cloud",
            "software",
            "data science",
            "cybersecurity",
            "devops",
        ],
        Category::Business => &[
            "business",
            "entrepreneurship",
            "leadership",
            "management",
            "strategy",
            "operations",
            "finance",
            "marketing",
        ],
        Category::Startups => &[
            "startup",
            "founder",
            "entrepreneurship",
            "venture capital",
            "seed funding",
            "scaling",
            "growth",
        ],
        Category::Innovation => &[
            "innovation",
            "digital transformation",
            "strategy",
            "disruption",
            "emerging technologies",
            "future",
        ],
    }
}

/// Guest-spot labels unlocked by a relevant category
fn category_opportunities(category: Category) -> &'static [&'static str] {
    match category {
        Category::Technology => &["Tech Talks", "Innovation Spotlight", "Future of Tech"],
        Category::Startups => &[
            "Startup Stories",
            "Entrepreneur Spotlight",
            "Venture Capital Insights",
        ],
        Category::Innovation => &[
            "Innovation Leaders",
            "Digital Transformation Stories",
            "Change Makers",
        ],
        Category::Business => &[],
    }
}

/// Analyzes a profile for podcast matching
///
/// Collects normalized keywords from skills, interests and experience, marks
/// the taxonomy categories with enough trigger terms, and, when the visitor
/// wants to be featured, derives guest-appearance opportunities and an
/// expertise tier from leadership titles and tenure.
pub fn analyze(profile: &Profile, wants_featured: bool) -> AppResult<ProfileAnalysis> {
    let keywords = extract_keywords(profile);

    let categories: Vec<Category> = Category::ALL
        .into_iter()
        .filter(|category| is_relevant(*category, &keywords))
        .collect();

    let mut opportunities = BTreeSet::new();
    let mut is_expert = false;

    if wants_featured {
        let has_leadership = has_leadership(&profile.experience);
        let total_years = total_years(&profile.experience)?;
        is_expert = has_leadership && total_years >= EXPERT_MIN_YEARS;

        if is_expert {
            opportunities.extend(LEADERSHIP_OPPORTUNITIES.iter().map(|s| s.to_string()));
        }
        for category in &categories {
            opportunities.extend(
                category_opportunities(*category)
                    .iter()
                    .map(|s| s.to_string()),
            );
        }

        tracing::debug!(
            has_leadership,
            total_years,
            opportunities = opportunities.len(),
            "Assessed featured potential"
        );
    }

    let analysis = ProfileAnalysis {
        keywords: keywords.into_iter().collect(),
        categories,
        featured_opportunities: opportunities.into_iter().collect(),
        expertise_level: if is_expert {
            ExpertiseLevel::Expert
        } else {
            ExpertiseLevel::Intermediate
        },
    };

    tracing::info!(
        keywords = analysis.keywords.len(),
        categories = ?analysis.categories,
        expertise = ?analysis.expertise_level,
        "Profile analyzed"
    );

    Ok(analysis)
}

/// Skills, interests, experience titles and taxonomy terms found in
/// experience text, trimmed and lower-cased
fn extract_keywords(profile: &Profile) -> BTreeSet<String> {
    let mut raw: Vec<String> = profile
        .skills
        .iter()
        .chain(profile.interests.iter())
        .cloned()
        .collect();

    for entry in &profile.experience {
        let title = entry.title.to_lowercase();
        let description = entry.description.to_lowercase();

        for category in Category::ALL {
            for term in trigger_terms(category) {
                if description.contains(*term) || title.contains(*term) {
                    raw.push(term.to_string());
                }
            }
        }

        raw.push(title);
    }

    raw.iter()
        .map(|keyword| keyword.trim().to_lowercase())
        .filter(|keyword| !keyword.is_empty())
        .collect()
}

/// Exact membership, not substring
fn is_relevant(category: Category, keywords: &BTreeSet<String>) -> bool {
    trigger_terms(category)
        .iter()
        .filter(|term| keywords.contains(**term))
        .count()
        >= MIN_CATEGORY_TERMS
}

fn has_leadership(experience: &[ExperienceEntry]) -> bool {
    experience.iter().any(|entry| {
        let title = entry.title.to_lowercase();
        LEADERSHIP_TITLES.iter().any(|term| title.contains(*term))
    })
}

/// Sums the leading number of every duration ("6 years" → 6).
///
/// Absent or blank durations count as zero; a duration that doesn't start
/// with a number fails the analysis.
fn total_years(experience: &[ExperienceEntry]) -> AppResult<f64> {
    experience
        .iter()
        .filter_map(|entry| entry.duration.as_deref())
        .filter_map(|duration| duration.split_whitespace().next())
        .map(|token| {
            token.parse::<f64>().map_err(|_| {
                AppError::Validation(format!(
                    "Error analyzing profile: invalid duration '{}'",
                    token
                ))
            })
        })
        .sum()
}
