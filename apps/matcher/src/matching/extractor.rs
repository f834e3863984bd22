//! Skill extraction: taxonomy dictionary matching plus an annotator-assisted proper-noun pass.

use std::collections::BTreeSet;
use std::sync::Arc;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::matching::SkillSet;
use crate::taxonomy::SkillTaxonomy;
use crate::text::{normalize, AnnotatorCapability, PartOfSpeech};

/// Nouns common in resumes and job ads that are never skills on their own.
const GENERIC_TERMS: &[&str] = &[
    "ability", "api", "apis", "application", "applications", "background", "business", "candidate",
    "company", "corp", "degree", "developer", "development", "education", "engineer",
    "engineering", "environment", "experience", "inc", "job", "knowledge", "llc", "ltd",
    "management", "opportunity", "position", "product", "products", "project", "projects",
    "requirements", "responsibilities", "role", "senior", "services", "skills", "software",
    "solutions", "summary", "system", "systems", "team", "teams", "technology", "technologies",
    "tools", "understanding", "work", "years",
];

/// Full output of an extraction pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillExtraction {
    pub skills: SkillSet,
    /// Common nouns that passed the generic-term filter. Diagnostic only; never merged
    /// into `skills`.
    pub noun_candidates: BTreeSet<String>,
}

/// A compiled whole-word pattern and the canonical skill it yields.
struct SkillPattern {
    regex: Regex,
    canonical: String,
}

/// Extracts skill sets from free text. Patterns are compiled once per taxonomy.
pub struct SkillExtractor {
    taxonomy: Arc<SkillTaxonomy>,
    patterns: Vec<SkillPattern>,
    annotator: AnnotatorCapability,
}

impl SkillExtractor {
    pub fn new(taxonomy: Arc<SkillTaxonomy>, annotator: AnnotatorCapability) -> Self {
        let patterns = taxonomy
            .search_terms()
            .filter_map(|(term, canonical)| match compile_term(term) {
                Ok(regex) => Some(SkillPattern {
                    regex,
                    canonical: canonical.to_string(),
                }),
                Err(e) => {
                    warn!("Skipping taxonomy term {term:?}: {e}");
                    None
                }
            })
            .collect();

        Self {
            taxonomy,
            patterns,
            annotator,
        }
    }

    pub fn taxonomy(&self) -> &SkillTaxonomy {
        &self.taxonomy
    }

    /// Returns the deduplicated skill set for `text`; empty for blank input.
    pub fn extract_skills(&self, text: &str) -> SkillSet {
        self.extract_detailed(text).skills
    }

    pub fn extract_detailed(&self, text: &str) -> SkillExtraction {
        let mut extraction = SkillExtraction::default();
        if text.trim().is_empty() {
            return extraction;
        }

        let normalized = normalize(text);
        let lowered = normalized.to_lowercase();

        // Dictionary pass
        for pattern in &self.patterns {
            if pattern.regex.is_match(&lowered) {
                extraction.skills.insert(pattern.canonical.clone());
            }
        }

        // Annotator pass
        match self.annotator.annotator() {
            Some(annotator) => {
                for token in annotator.annotate(&normalized) {
                    let word = token.text.to_lowercase();
                    let len = word.chars().count();
                    match token.pos {
                        PartOfSpeech::ProperNoun if len > 2 && !is_generic(&word) => {
                            let skill = self.taxonomy.resolve(&word).unwrap_or(&word);
                            if !extraction.skills.contains(skill) {
                                extraction.skills.insert(skill.to_string());
                            }
                        }
                        PartOfSpeech::Noun if len > 3 && !is_generic(&word) => {
                            extraction.noun_candidates.insert(word);
                        }
                        _ => {}
                    }
                }
            }
            None => debug!("Annotator unavailable; dictionary-only skill extraction"),
        }

        debug!(
            "Extracted {} skills ({} noun candidates)",
            extraction.skills.len(),
            extraction.noun_candidates.len()
        );
        extraction
    }
}

fn is_generic(word: &str) -> bool {
    GENERIC_TERMS.contains(&word)
}

/// Whole-word match: the term must be bounded by non-word characters or the text edges.
/// `\b` is not used because it fails after symbols such as the `+` in "c++".
fn compile_term(term: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"(?:^|\W){}(?:\W|$)", regex::escape(term)))
}
