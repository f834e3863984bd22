//! Tailoring suggestions: section-level rewrites that target missing skills.
//!
//! Deterministic templates: the same (job title, missing skills) always yields the same
//! suggestions, so results can be cached or diffed by callers.

use serde::{Deserialize, Serialize};

const ALREADY_OPTIMIZED: &str = "Your resume is already highly optimized for this role!";

/// A single suggested edit.
///
/// `section` and `impact` are absent only on the standalone "already optimized" note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TailorSuggestion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_context: Option<String>,
    pub suggestion: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
}

impl TailorSuggestion {
    fn new(section: &str, suggestion: String, impact: &str) -> Self {
        Self {
            section: Some(section.to_string()),
            original_context: None,
            suggestion,
            impact: Some(impact.to_string()),
        }
    }

    fn note(message: &str) -> Self {
        Self {
            section: None,
            original_context: None,
            suggestion: message.to_string(),
            impact: None,
        }
    }
}

/// Builds suggestions for the given missing skills, in priority order.
///
/// Empty `missing_skills` yields a single "already optimized" note.
pub fn generate_suggestions(job_title: &str, missing_skills: &[String]) -> Vec<TailorSuggestion> {
    let Some(first) = missing_skills.first() else {
        return vec![TailorSuggestion::note(ALREADY_OPTIMIZED)];
    };

    let mut suggestions = Vec::with_capacity(5);

    let headline: Vec<&str> = missing_skills.iter().take(2).map(String::as_str).collect();
    suggestions.push(TailorSuggestion {
        original_context: Some("Current profile focuses on general experience.".to_string()),
        ..TailorSuggestion::new(
            "Professional Summary",
            format!(
                "Integrate your knowledge of {} directly into your summary to pass ATS filters immediately.",
                headline.join(", ")
            ),
            "High - Targets initial screening",
        )
    });

    for skill in missing_skills.iter().take(3) {
        suggestions.push(TailorSuggestion::new(
            "Experience / Projects",
            bullet_point(skill, job_title),
            "Medium - Demonstrates technical competency",
        ));
    }

    let first_upper = first.to_uppercase();
    suggestions.push(TailorSuggestion::new(
        "Strategic Advice",
        format!(
            "If you have used tools similar to {first_upper}, mention them and explicitly state \
             'Quickly adapted to {first_upper} paradigms' to show cross-functional capability."
        ),
        "Soft Skill - Adaptability",
    ));

    suggestions
}

/// Picks one of four bullet templates by the sum of the skill's char codes.
fn bullet_point(skill: &str, job_title: &str) -> String {
    let s = skill.to_uppercase();
    // wrapping keeps the sum's residue mod 4
    let index = skill
        .chars()
        .fold(0u32, |acc, c| acc.wrapping_add(c as u32))
        % 4;
    match index {
        0 => format!(
            "Implemented {s} solutions to optimize data processing latency by 30% in high-concurrency environments."
        ),
        1 => format!(
            "Leveraged {s} for building scalable infrastructure components aligned with {job_title} requirements."
        ),
        2 => format!(
            "Collaborated on {s} integration within a CI/CD pipeline, improving deployment frequency by 15%."
        ),
        _ => format!(
            "Architected modular components using {s} to ensure code maintainability and cross-platform compatibility."
        ),
    }
}
