use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Display;

use crate::error::AppError;

/// Professional background used as recommendation input
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub skills: Vec<String>,
    pub interests: Vec<String>,
    pub experience: Vec<ExperienceEntry>,
}

/// One position held by the profile owner
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub title: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub description: String,
    /// Free text such as "6 years"
    #[serde(default)]
    pub duration: Option<String>,
}

impl ExperienceEntry {
    pub fn new(title: &str, description: &str, duration: Option<&str>) -> Self {
        Self {
            title: title.to_string(),
            company: None,
            description: description.to_string(),
            duration: duration.map(String::from),
        }
    }

    /// Parses an untyped entry.
    ///
    /// `None` when the entry isn't an object or a text field holds a non-string.
    /// A numeric duration is read as a bare number of years.
    fn from_value(value: &Value) -> Option<Self> {
        let entry = value.as_object()?;
        let text = |key: &str| match entry.get(key) {
            None | Some(Value::Null) => Some(None),
            Some(Value::String(s)) => Some(Some(s.clone())),
            Some(_) => None,
        };
        let duration = match entry.get("duration") {
            Some(Value::Number(years)) => Some(years.to_string()),
            _ => text("duration")?,
        };

        Some(Self {
            title: text("title")?.unwrap_or_default(),
            company: text("company")?,
            description: text("description")?.unwrap_or_default(),
            duration,
        })
    }
}

/// Profile as returned by a profile source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkedInProfile {
    pub name: String,
    pub summary: String,
    pub location: String,
    pub industry: String,
    #[serde(flatten)]
    pub profile: Profile,
}

impl LinkedInProfile {
    /// Validates a raw profile record; identity fields default to empty.
    pub fn from_value(value: &Value) -> Result<Self, AppError> {
        let profile = Profile::try_from(value)?;
        let text = |key: &str| {
            value
                .get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };

        Ok(Self {
            name: text("name"),
            summary: text("summary"),
            location: text("location"),
            industry: text("industry"),
            profile,
        })
    }
}

fn required_array<'a>(value: &'a Value, field: &str) -> Result<&'a Vec<Value>, AppError> {
    let raw = value
        .get(field)
        .filter(|v| !v.is_null())
        .ok_or_else(|| AppError::Validation(format!("Missing required field: {}", field)))?;

    raw.as_array()
        .ok_or_else(|| AppError::Validation(format!("{} must be a list", capitalize(field))))
}

fn string_list(value: &Value, field: &str) -> Result<Vec<String>, AppError> {
    required_array(value, field)?
        .iter()
        .map(|item| {
            item.as_str().map(String::from).ok_or_else(|| {
                AppError::Validation(format!("{} must contain only strings", capitalize(field)))
            })
        })
        .collect()
}

fn capitalize(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl TryFrom<&Value> for Profile {
    type Error = AppError;

    /// Validates an untyped profile record.
    ///
    /// `skills`, `interests` and `experience` must be present arrays. Experience
    /// entries that aren't objects are skipped rather than failing the profile.
    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        // Report missing fields first, in a fixed order
        for field in ["skills", "experience", "interests"] {
            required_array(value, field)?;
        }

        let skills = string_list(value, "skills")?;
        let interests = string_list(value, "interests")?;
        let experience = required_array(value, "experience")?
            .iter()
            .filter_map(ExperienceEntry::from_value)
            .collect();

        Ok(Self {
            skills,
            interests,
            experience,
        })
    }
}

/// Topic category drawn from the fixed domain taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Technology,
    Business,
    Startups,
    Innovation,
}

impl Category {
    /// Taxonomy declaration order
    pub const ALL: [Category; 4] = [
        Category::Technology,
        Category::Business,
        Category::Startups,
        Category::Innovation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Technology => "technology",
            Category::Business => "business",
            Category::Startups => "startups",
            Category::Innovation => "innovation",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpertiseLevel {
    Intermediate,
    Expert,
}

/// Derived view of a profile used for scoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileAnalysis {
    /// Sorted, trimmed, lower-cased, non-empty
    pub keywords: Vec<String>,
    /// Relevant categories in taxonomy order
    pub categories: Vec<Category>,
    /// Sorted, deduplicated
    pub featured_opportunities: Vec<String>,
    pub expertise_level: ExpertiseLevel,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn validation_message(result: Result<Profile, AppError>) -> String {
        match result {
            Err(AppError::Validation(msg)) => msg,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_fields_are_named() {
        for field in ["skills", "interests", "experience"] {
            let mut value = json!({
                "skills": ["Rust"],
                "interests": ["Technology"],
                "experience": []
            });
            value.as_object_mut().unwrap().remove(field);

            let msg = validation_message(Profile::try_from(&value));
            assert_eq!(msg, format!("Missing required field: {}", field));
        }
    }

    #[test]
    fn test_null_field_counts_as_missing() {
        let value = json!({ "skills": null, "interests": [], "experience": [] });
        let msg = validation_message(Profile::try_from(&value));
        assert!(msg.contains("skills"));
    }

    #[test]
    fn test_non_list_field_rejected() {
        let value = json!({ "skills": "Rust", "interests": [], "experience": [] });
        let msg = validation_message(Profile::try_from(&value));
        assert_eq!(msg, "Skills must be a list");
    }

    #[test]
    fn test_malformed_experience_entries_skipped() {
        let value = json!({
            "skills": [],
            "interests": [],
            "experience": [
                "not an entry",
                42,
                { "title": "CTO", "description": "Cloud platform", "duration": "3 years" },
                { "description": "no title here", "duration": null },
                { "title": 42, "duration": "3 years" },
                { "title": "VP", "description": ["not", "text"] },
                { "title": "Head of Sales", "duration": true }
            ]
        });

        let profile = Profile::try_from(&value).unwrap();
        assert_eq!(profile.experience.len(), 2);
        assert_eq!(profile.experience[0].title, "CTO");
        assert_eq!(profile.experience[0].duration.as_deref(), Some("3 years"));
        assert_eq!(profile.experience[1].title, "");
        assert_eq!(profile.experience[1].duration, None);
    }

    #[test]
    fn test_numeric_duration_read_as_years() {
        let value = json!({
            "skills": [],
            "interests": [],
            "experience": [
                { "title": "Director", "duration": 7 },
                { "title": "Analyst", "duration": 2.5 }
            ]
        });

        let profile = Profile::try_from(&value).unwrap();
        assert_eq!(profile.experience[0].duration.as_deref(), Some("7"));
        assert_eq!(profile.experience[1].duration.as_deref(), Some("2.5"));
    }

    #[test]
    fn test_linkedin_profile_from_value() {
        let value = json!({
            "name": "Jane Doe",
            "industry": "Technology",
            "skills": ["Rust"],
            "interests": [],
            "experience": [{ "title": "CTO", "company": "Acme" }]
        });

        let profile = LinkedInProfile::from_value(&value).unwrap();
        assert_eq!(profile.name, "Jane Doe");
        assert_eq!(profile.summary, "");
        assert_eq!(profile.profile.skills, vec!["Rust"]);
        assert_eq!(profile.profile.experience[0].company.as_deref(), Some("Acme"));

        let missing = json!({ "name": "Jane Doe", "skills": [], "interests": [] });
        assert!(LinkedInProfile::from_value(&missing).is_err());
    }

    #[test]
    fn test_category_serialization() {
        let json = serde_json::to_string(&Category::Startups).unwrap();
        assert_eq!(json, "\"startups\"");
        let level = serde_json::to_string(&ExpertiseLevel::Expert).unwrap();
        assert_eq!(level, "\"expert\"");
    }
}
