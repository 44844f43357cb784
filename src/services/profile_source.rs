use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

use crate::{
    error::{AppError, AppResult},
    models::LinkedInProfile,
};

static PROFILE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://(?:www\.)?linkedin\.com/in/([A-Za-z0-9_-]{3,100})/?$")
        .expect("profile url regex")
});

const INVALID_URL_MESSAGE: &str =
    "Invalid LinkedIn URL format. Expected format: https://www.linkedin.com/in/username";

/// Whether `url` is a LinkedIn public-profile URL
pub fn validate_linkedin_url(url: &str) -> bool {
    PROFILE_URL.is_match(url.trim())
}

/// Extracts the profile handle, failing on malformed URLs
pub fn profile_handle(url: &str) -> AppResult<String> {
    PROFILE_URL
        .captures(url.trim())
        .and_then(|captures| captures.get(1))
        .map(|handle| handle.as_str().to_string())
        .ok_or_else(|| AppError::Validation(INVALID_URL_MESSAGE.to_string()))
}

/// Source of professional profiles
#[async_trait::async_trait]
pub trait ProfileSource: Send + Sync {
    /// Fetch the profile behind `url`; malformed URLs fail with a validation error
    async fn fetch_profile(&self, url: &str) -> AppResult<LinkedInProfile>;
}

/// Offline profile source returning a fixed profile named after the handle
#[derive(Debug, Clone, Default)]
pub struct MockProfileSource;

impl MockProfileSource {
    fn display_name(handle: &str) -> String {
        handle
            .split(['-', '_'])
            .filter(|part| !part.is_empty())
            .map(|part| {
                let mut chars = part.chars();
                match chars.next() {
                    Some(first) => first
                        .to_uppercase()
                        .chain(chars.flat_map(char::to_lowercase))
                        .collect(),
                    None => String::new(),
                }
            })
            .collect::<Vec<String>>()
            .join(" ")
    }
}

#[async_trait::async_trait]
impl ProfileSource for MockProfileSource {
    async fn fetch_profile(&self, url: &str) -> AppResult<LinkedInProfile> {
        let handle = profile_handle(url)?;
        tracing::debug!(handle = %handle, "Serving mock profile");

        let record = json!({
            "name": Self::display_name(&handle),
            "summary": "Experienced entrepreneur and business leader with a passion for \
                        technology and innovation.",
            "location": "San Francisco Bay Area",
            "industry": "Technology",
            "skills": [
                "Business Development",
                "Entrepreneurship",
                "Strategic Planning",
                "Team Leadership",
                "Product Management",
                "Digital Marketing"
            ],
            "interests": [
                "Technology",
                "Startups",
                "Innovation",
                "Leadership",
                "Digital Transformation"
            ],
            "experience": [
                {
                    "title": "Founder & CEO",
                    "company": "Tech Startup",
                    "duration": "4 years",
                    "description": "Leading a technology startup focused on AI and machine learning applications."
                },
                {
                    "title": "Product Manager",
                    "company": "Tech Company",
                    "duration": "2 years",
                    "description": "Led product development for enterprise software solutions."
                }
            ]
        });

        LinkedInProfile::from_value(&record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, ExpertiseLevel};
    use crate::services::profile_analyzer::analyze;

    #[test]
    fn test_valid_urls() {
        for url in [
            "https://www.linkedin.com/in/jane-doe",
            "https://linkedin.com/in/jane_doe",
            "http://www.linkedin.com/in/abc",
            "http://linkedin.com/in/jane-doe-123/",
        ] {
            assert!(validate_linkedin_url(url), "{}", url);
        }
    }

    #[test]
    fn test_invalid_urls() {
        let too_long = format!("https://linkedin.com/in/{}", "a".repeat(101));
        for url in [
            "",
            "linkedin.com/in/jane-doe",
            "ftp://linkedin.com/in/jane-doe",
            "https://linkedin.com/company/acme",
            "https://linkedin.com/in/ab",
            "https://evil.com/linkedin.com/in/jane-doe",
            "https://notlinkedin.com/in/jane-doe",
            "https://linkedin.com/in/jane.doe",
            too_long.as_str(),
        ] {
            assert!(!validate_linkedin_url(url), "{}", url);
        }
    }

    #[test]
    fn test_profile_handle() {
        assert_eq!(
            profile_handle("https://www.linkedin.com/in/jane-doe/").unwrap(),
            "jane-doe"
        );
        match profile_handle("https://example.com/in/jane") {
            Err(AppError::Validation(msg)) => assert!(msg.starts_with("Invalid LinkedIn URL")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_mock_profile_named_after_handle() {
        let profile = MockProfileSource
            .fetch_profile("https://linkedin.com/in/jane-doe")
            .await
            .unwrap();

        assert_eq!(profile.name, "Jane Doe");
        assert_eq!(profile.profile.skills.len(), 6);
        assert_eq!(profile.profile.experience.len(), 2);
    }

    #[tokio::test]
    async fn test_mock_profile_rejects_bad_url() {
        let result = MockProfileSource.fetch_profile("not a url").await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_mock_profile_analyzes_as_expert() {
        let profile = MockProfileSource
            .fetch_profile("https://linkedin.com/in/jane-doe")
            .await
            .unwrap();
        let analysis = analyze(&profile.profile, true).unwrap();

        assert_eq!(analysis.expertise_level, ExpertiseLevel::Expert);
        assert!(analysis.categories.contains(&Category::Technology));
        assert!(analysis.categories.contains(&Category::Startups));
    }
}
