//! Skill gap comparison and prioritized tailoring advice.

use serde::{Deserialize, Serialize};

use crate::matching::SkillSet;
use crate::taxonomy::SkillTaxonomy;

/// Only the first N missing skills get a dedicated advice line.
pub const MAX_SKILL_ADVICE: usize = 5;

const CLOSING_ADVICE: &str =
    "Consider adding a 'Technical Proficiencies' section if you haven't already.";

/// Result of comparing a resume's skills against a job's.
///
/// `missing` lists taxonomy skills first, then everything else; each group is lexicographic.
/// `advice` is empty when nothing is missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub matched: SkillSet,
    pub missing: Vec<String>,
    pub advice: Vec<String>,
}

/// Compares two skill lists (case-insensitive). Directional: `missing` is job − resume.
pub fn compare_skills<R, J>(
    taxonomy: &SkillTaxonomy,
    resume_skills: R,
    job_skills: J,
) -> ComparisonResult
where
    R: IntoIterator,
    R::Item: AsRef<str>,
    J: IntoIterator,
    J::Item: AsRef<str>,
{
    let resume = lowercase_set(resume_skills);
    let job = lowercase_set(job_skills);

    let matched: SkillSet = resume.intersection(&job).cloned().collect();

    let (mut missing, other): (Vec<String>, Vec<String>) = job
        .difference(&resume)
        .cloned()
        .partition(|skill| taxonomy.is_known(skill));
    missing.extend(other);

    let advice = build_advice(&missing);

    ComparisonResult {
        matched,
        missing,
        advice,
    }
}

fn lowercase_set<I>(skills: I) -> SkillSet
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    skills
        .into_iter()
        .map(|s| s.as_ref().trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

/// One line per top missing skill plus a closing note; nothing when `missing` is empty.
fn build_advice(missing: &[String]) -> Vec<String> {
    if missing.is_empty() {
        return Vec::new();
    }

    let mut advice: Vec<String> = missing
        .iter()
        .take(MAX_SKILL_ADVICE)
        .map(|skill| {
            format!(
                "Highlight any past projects where you used {} or similar tools.",
                skill.to_uppercase()
            )
        })
        .collect();
    advice.push(CLOSING_ADVICE.to_string());
    advice
}
