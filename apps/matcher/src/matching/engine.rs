//! `MatchEngine` ties the taxonomy, extractor, scorer and comparator together.
//!
//! Built once at start-up and shared (`Arc<MatchEngine>` or `&MatchEngine`) across threads;
//! every method takes `&self` and keeps its working state local to the call.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::Config;
use crate::errors::MatcherError;
use crate::matching::comparator::{compare_skills, ComparisonResult};
use crate::matching::extractor::{SkillExtraction, SkillExtractor};
use crate::matching::similarity::{HybridScorer, MatchResult, ScoringWeights};
use crate::matching::tailor::{generate_suggestions, TailorSuggestion};
use crate::matching::SkillSet;
use crate::taxonomy::SkillTaxonomy;
use crate::text::AnnotatorCapability;

const DEFAULT_JOB_TITLE: &str = "the target role";

/// Everything a caller needs for one (resume, job) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    pub match_percentage: f64,
    pub content_similarity: f64,
    pub skill_overlap_ratio: f64,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub tailoring_advice: Vec<String>,
    pub tailoring_suggestions: Vec<TailorSuggestion>,
}

pub struct MatchEngine {
    taxonomy: Arc<SkillTaxonomy>,
    extractor: SkillExtractor,
    scorer: HybridScorer,
}

impl MatchEngine {
    pub fn new(
        taxonomy: Arc<SkillTaxonomy>,
        annotator: AnnotatorCapability,
        weights: ScoringWeights,
    ) -> Self {
        let extractor = SkillExtractor::new(Arc::clone(&taxonomy), annotator.clone());
        let scorer = HybridScorer::new(annotator, weights);
        Self {
            taxonomy,
            extractor,
            scorer,
        }
    }

    /// Builds the engine described by `config`: builtin taxonomy plus optional overlay,
    /// heuristic annotator unless disabled, and the configured clamp policy.
    pub fn from_config(config: &Config) -> Result<Self, MatcherError> {
        let mut taxonomy = SkillTaxonomy::builtin();
        if let Some(path) = &config.taxonomy_path {
            taxonomy = taxonomy.with_overlay(path)?;
        }

        let annotator = if config.enable_annotator {
            AnnotatorCapability::heuristic()
        } else {
            AnnotatorCapability::Unavailable
        };

        let weights = ScoringWeights {
            clamp_to_hundred: config.clamp_score,
            ..ScoringWeights::default()
        };

        info!(
            "Match engine ready: {} skills, {} aliases, annotator {:?}, clamp={}",
            taxonomy.skills().len(),
            taxonomy.aliases().len(),
            annotator,
            weights.clamp_to_hundred
        );

        Ok(Self::new(Arc::new(taxonomy), annotator, weights))
    }

    pub fn taxonomy(&self) -> &SkillTaxonomy {
        &self.taxonomy
    }

    pub fn extract_skills(&self, text: &str) -> SkillSet {
        self.extractor.extract_skills(text)
    }

    pub fn extract_detailed(&self, text: &str) -> SkillExtraction {
        self.extractor.extract_detailed(text)
    }

    pub fn score(&self, resume_text: &str, job_text: &str) -> MatchResult {
        let resume_skills = self.extractor.extract_skills(resume_text);
        let job_skills = self.extractor.extract_skills(job_text);
        self.scorer
            .score_with_skills(resume_text, job_text, &resume_skills, &job_skills)
    }

    pub fn compare<R, J>(&self, resume_skills: R, job_skills: J) -> ComparisonResult
    where
        R: IntoIterator,
        R::Item: AsRef<str>,
        J: IntoIterator,
        J::Item: AsRef<str>,
    {
        compare_skills(&self.taxonomy, resume_skills, job_skills)
    }

    /// Score, gap comparison and tailoring suggestions in one pass (skills extracted once).
    pub fn analyze(
        &self,
        resume_text: &str,
        job_text: &str,
        job_title: Option<&str>,
    ) -> MatchReport {
        let resume_skills = self.extractor.extract_skills(resume_text);
        let job_skills = self.extractor.extract_skills(job_text);

        let result = self
            .scorer
            .score_with_skills(resume_text, job_text, &resume_skills, &job_skills);
        let comparison = compare_skills(&self.taxonomy, &resume_skills, &job_skills);
        let suggestions = generate_suggestions(
            job_title.unwrap_or(DEFAULT_JOB_TITLE),
            &comparison.missing,
        );

        MatchReport {
            match_percentage: result.final_score,
            content_similarity: result.content_similarity,
            skill_overlap_ratio: result.skill_overlap_ratio,
            matched_skills: comparison.matched.into_iter().collect(),
            missing_skills: comparison.missing,
            tailoring_advice: comparison.advice,
            tailoring_suggestions: suggestions,
        }
    }
}

impl Default for MatchEngine {
    fn default() -> Self {
        Self::new(
            Arc::new(SkillTaxonomy::builtin()),
            AnnotatorCapability::heuristic(),
            ScoringWeights::default(),
        )
    }
}
