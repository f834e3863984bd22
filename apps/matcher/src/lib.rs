//! Resume ↔ job description matching.
//!
//! Normalizes OCR-damaged text, extracts skills against a curated taxonomy, scores a
//! resume against a job with a hybrid TF-IDF / skill-overlap measure, and turns the skill
//! gap into prioritized tailoring advice.

pub mod config;
pub mod errors;
pub mod matching;
pub mod taxonomy;
pub mod text;

pub use config::Config;
pub use errors::MatcherError;
pub use matching::comparator::{compare_skills, ComparisonResult};
pub use matching::engine::{MatchEngine, MatchReport};
pub use matching::extractor::{SkillExtraction, SkillExtractor};
pub use matching::similarity::{HybridScorer, MatchResult, ScoringWeights};
pub use matching::tailor::{generate_suggestions, TailorSuggestion};
pub use matching::SkillSet;
pub use taxonomy::SkillTaxonomy;
pub use text::{normalize, Annotator, AnnotatorCapability, HeuristicAnnotator};
