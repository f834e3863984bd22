//! Hybrid similarity: TF-IDF cosine over the {resume, job} corpus fused with skill overlap.
//!
//! Algorithm:
//! 1. Preprocess both texts: normalize, lowercase, keep only letters/digits/whitespace/`#`/`+`,
//!    lemmatize with the annotator (dropping stop words) when one is available.
//! 2. content = cosine(tfidf(resume), tfidf(job)); 0.0 when the vocabulary is empty.
//! 3. overlap = |resume ∩ job| / |job| skills, or `content` when the job has no skills.
//! 4. final = 0.7·overlap + 0.3·content, then raised to `max(final, 2·content)` if nonzero.
//! 5. percent = round(final × 100, 2), clamped to 100 unless the policy says otherwise.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::matching::SkillSet;
use crate::text::stopwords::is_stop_word;
use crate::text::{normalize, AnnotatorCapability};

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Fusion weights and score policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub skill_overlap: f64,
    pub content: f64,
    /// Floor: a nonzero score is raised to at least `content × floor_multiplier`.
    pub floor_multiplier: f64,
    /// Cap the final percentage at 100. With `false` the floor can push it past 100.
    pub clamp_to_hundred: bool,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            skill_overlap: 0.7,
            content: 0.3,
            floor_multiplier: 2.0,
            clamp_to_hundred: true,
        }
    }
}

/// Score for one (resume, job) pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// TF-IDF cosine similarity, 0.0 – 1.0.
    pub content_similarity: f64,
    /// Share of job skills present in the resume, 0.0 – 1.0.
    pub skill_overlap_ratio: f64,
    /// Hybrid score as a percentage rounded to two decimals. 0 – 100 when clamped.
    pub final_score: f64,
}

// ────────────────────────────────────────────────────────────────────────────
// Preprocessing
// ────────────────────────────────────────────────────────────────────────────

/// Lowercases, strips everything but letters, digits, whitespace, `#` and `+`, then
/// lemmatizes through the annotator when available.
pub fn preprocess(text: &str, annotator: &AnnotatorCapability) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    let cleaned: String = normalize(text)
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() || c == '#' || c == '+' {
                c
            } else {
                ' '
            }
        })
        .collect();

    match annotator.annotator() {
        Some(annotator) => annotator
            .annotate(&cleaned)
            .into_iter()
            .filter(|t| !t.is_stop && !t.lemma.trim().is_empty())
            .map(|t| t.lemma)
            .collect::<Vec<_>>()
            .join(" "),
        None => cleaned,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// TF-IDF
// ────────────────────────────────────────────────────────────────────────────

type SparseVector = HashMap<String, f64>;

/// Terms are whitespace-separated tokens of two or more characters that are not stop words.
fn terms(doc: &str) -> Vec<&str> {
    doc.split_whitespace()
        .filter(|t| t.chars().count() >= 2 && !is_stop_word(t))
        .collect()
}

/// Fits TF-IDF over `docs` and returns one L2-normalized vector per document.
///
/// Uses smoothed idf: `ln((1 + n) / (1 + df)) + 1`. Returns `None` when the corpus has no
/// terms at all.
pub fn tfidf_vectors(docs: &[&str]) -> Option<Vec<SparseVector>> {
    let tokenized: Vec<Vec<&str>> = docs.iter().map(|d| terms(d)).collect();

    let mut document_frequency: HashMap<&str, usize> = HashMap::new();
    for doc in &tokenized {
        let unique: HashSet<&str> = doc.iter().copied().collect();
        for term in unique {
            *document_frequency.entry(term).or_insert(0) += 1;
        }
    }
    if document_frequency.is_empty() {
        return None;
    }

    let n = docs.len() as f64;
    let vectors = tokenized
        .iter()
        .map(|doc| {
            let mut counts: HashMap<&str, f64> = HashMap::new();
            for &term in doc {
                *counts.entry(term).or_insert(0.0) += 1.0;
            }

            let mut vector: SparseVector = counts
                .into_iter()
                .map(|(term, tf)| {
                    let df = document_frequency[term] as f64;
                    let idf = ((1.0 + n) / (1.0 + df)).ln() + 1.0;
                    (term.to_string(), tf * idf)
                })
                .collect();

            let norm = vector.values().map(|w| w * w).sum::<f64>().sqrt();
            if norm > 0.0 {
                vector.values_mut().for_each(|w| *w /= norm);
            }
            vector
        })
        .collect();

    Some(vectors)
}

/// Cosine similarity of two sparse vectors; 0.0 if either is empty or they share no terms.
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let dot: f64 = small
        .iter()
        .filter_map(|(term, w)| large.get(term).map(|v| w * v))
        .sum();
    let norm_a = a.values().map(|w| w * w).sum::<f64>().sqrt();
    let norm_b = b.values().map(|w| w * w).sum::<f64>().sqrt();
    // an empty f64 sum is -0.0, which must not leak into scores
    if dot <= 0.0 || norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (dot / (norm_a * norm_b)).clamp(0.0, 1.0)
}

// ────────────────────────────────────────────────────────────────────────────
// HybridScorer
// ────────────────────────────────────────────────────────────────────────────

/// Combines lexical similarity with skill overlap.
#[derive(Debug, Clone)]
pub struct HybridScorer {
    annotator: AnnotatorCapability,
    weights: ScoringWeights,
}

impl HybridScorer {
    pub fn new(annotator: AnnotatorCapability, weights: ScoringWeights) -> Self {
        Self { annotator, weights }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// TF-IDF cosine of the two preprocessed texts. Never fails: a degenerate corpus is 0.0.
    pub fn content_similarity(&self, resume_text: &str, job_text: &str) -> f64 {
        let resume = preprocess(resume_text, &self.annotator);
        let job = preprocess(job_text, &self.annotator);

        match tfidf_vectors(&[resume.as_str(), job.as_str()]) {
            Some(vectors) => cosine_similarity(&vectors[0], &vectors[1]),
            None => {
                debug!("Empty vocabulary after preprocessing; content similarity = 0.0");
                0.0
            }
        }
    }

    /// Scores a pair whose skill sets were already extracted.
    pub fn score_with_skills(
        &self,
        resume_text: &str,
        job_text: &str,
        resume_skills: &SkillSet,
        job_skills: &SkillSet,
    ) -> MatchResult {
        let content_similarity = self.content_similarity(resume_text, job_text);
        let skill_overlap_ratio = skill_overlap(resume_skills, job_skills, content_similarity);
        let final_score = self.fuse(skill_overlap_ratio, content_similarity);

        debug!(
            "content={content_similarity:.4} overlap={skill_overlap_ratio:.4} final={final_score}"
        );

        MatchResult {
            content_similarity,
            skill_overlap_ratio,
            final_score,
        }
    }

    /// Weighted fusion, floor heuristic, percent scaling and optional clamp.
    pub fn fuse(&self, skill_overlap: f64, content_similarity: f64) -> f64 {
        let w = &self.weights;
        let mut fused = w.skill_overlap * skill_overlap + w.content * content_similarity;

        // Only raises, never lowers; zero stays zero.
        if fused > 0.0 {
            let floor = content_similarity * w.floor_multiplier;
            if floor > fused {
                debug!("Floor heuristic raised {fused:.4} to {floor:.4}");
                fused = floor;
            }
        }

        if w.clamp_to_hundred && fused > 1.0 {
            debug!("Clamping fused score {fused:.4} to 1.0");
            fused = 1.0;
        }

        round2(fused * 100.0)
    }
}

/// |resume ∩ job| / |job|, falling back to `content_similarity` when the job lists no skills.
pub fn skill_overlap(
    resume_skills: &SkillSet,
    job_skills: &SkillSet,
    content_similarity: f64,
) -> f64 {
    if job_skills.is_empty() {
        return content_similarity;
    }
    let shared = job_skills.intersection(resume_skills).count();
    shared as f64 / job_skills.len() as f64
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(items: &[&str]) -> SkillSet {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn scorer(clamp: bool) -> HybridScorer {
        HybridScorer::new(
            AnnotatorCapability::Unavailable,
            ScoringWeights {
                clamp_to_hundred: clamp,
                ..ScoringWeights::default()
            },
        )
    }

    #[test]
    fn test_preprocess_keeps_plus_and_hash() {
        let out = preprocess("C++, C# & Node.js!", &AnnotatorCapability::Unavailable);
        let tokens: Vec<&str> = out.split_whitespace().collect();
        assert_eq!(tokens, vec!["c++", "c#", "node", "js"]);
    }

    #[test]
    fn test_preprocess_with_annotator_drops_stop_words() {
        let out = preprocess("I am deploying the services", &AnnotatorCapability::heuristic());
        let tokens: Vec<&str> = out.split_whitespace().collect();
        assert!(!tokens.contains(&"the"));
        assert!(!tokens.contains(&"am"));
        assert!(tokens.contains(&"deploy"), "{tokens:?}");
    }

    #[test]
    fn test_identical_texts_have_unit_similarity() {
        let sim = scorer(true).content_similarity("Python FastAPI AWS", "Python FastAPI AWS");
        assert!((sim - 1.0).abs() < 1e-9, "sim was {sim}");
    }

    #[test]
    fn test_disjoint_texts_have_zero_similarity() {
        let sim = scorer(true).content_similarity("watercolor painting", "kubernetes clusters");
        assert_eq!(sim, 0.0);
        assert!(sim.is_sign_positive(), "sim was {sim:?}");
    }

    #[test]
    fn test_no_shared_terms_is_positive_zero() {
        let vectors = tfidf_vectors(&["gardening tulips", "painting canvases"]).unwrap();
        let sim = cosine_similarity(&vectors[0], &vectors[1]);
        assert!(sim == 0.0 && sim.is_sign_positive(), "sim was {sim:?}");
    }

    #[test]
    fn test_empty_vocabulary_is_zero_not_error() {
        assert!(tfidf_vectors(&["", "the and of"]).is_none());
        assert_eq!(scorer(true).content_similarity("", ""), 0.0);
        assert_eq!(scorer(true).content_similarity("the of", "and the"), 0.0);
    }

    #[test]
    fn test_shared_terms_weigh_less_than_unique_terms() {
        let vectors = tfidf_vectors(&["rust tokio", "rust axum"]).unwrap();
        // idf(shared) = 1.0, idf(unique) = ln(3/2) + 1
        let shared = vectors[0]["rust"];
        let unique = vectors[0]["tokio"];
        assert!(unique > shared);
        let norm: f64 = vectors[0].values().map(|w| w * w).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_partial_overlap_cosine_value() {
        let vectors = tfidf_vectors(&["rust tokio", "rust axum"]).unwrap();
        let sim = cosine_similarity(&vectors[0], &vectors[1]);
        let u = (1.5_f64).ln() + 1.0;
        let expected = 1.0 / (1.0 + u * u);
        assert!((sim - expected).abs() < 1e-12, "sim was {sim}, expected {expected}");
    }

    #[test]
    fn test_skill_overlap_ratio() {
        let resume = skills(&["python", "aws"]);
        let job = skills(&["python", "docker", "kubernetes", "aws"]);
        assert!((skill_overlap(&resume, &job, 0.9) - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_skill_overlap_falls_back_to_content_when_job_has_no_skills() {
        let resume = skills(&["python"]);
        assert_eq!(skill_overlap(&resume, &SkillSet::new(), 0.42), 0.42);
    }

    #[test]
    fn test_fusion_weights() {
        // 0.7 * 0.5 + 0.3 * 0.2 = 0.41; floor 0.4 is lower
        assert_eq!(scorer(true).fuse(0.5, 0.2), 41.0);
    }

    #[test]
    fn test_floor_raises_low_scores() {
        // 0.7 * 0.0 + 0.3 * 0.4 = 0.12; floor = 0.8
        assert_eq!(scorer(true).fuse(0.0, 0.4), 80.0);
    }

    #[test]
    fn test_floor_never_applies_to_zero() {
        assert_eq!(scorer(true).fuse(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_identical_fixture_clamped_and_unclamped() {
        let job = skills(&["aws", "fastapi", "python"]);
        let text = "Python FastAPI AWS";

        let clamped = scorer(true).score_with_skills(text, text, &job, &job);
        assert!((clamped.content_similarity - 1.0).abs() < 1e-9);
        assert_eq!(clamped.skill_overlap_ratio, 1.0);
        assert_eq!(clamped.final_score, 100.0);

        let raw = scorer(false).score_with_skills(text, text, &job, &job);
        assert!((raw.final_score - 200.0).abs() < 1e-9, "raw was {}", raw.final_score);
    }

    #[test]
    fn test_final_score_rounded_to_two_decimals() {
        // 0.7 * (1/3) + 0.3 * 0.1 = 0.26333..; floor 0.2
        assert_eq!(scorer(true).fuse(1.0 / 3.0, 0.1), 26.33);
    }
}
