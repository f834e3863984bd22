//! Linguistic annotation: tokenization, lemmas and coarse part-of-speech tags.
//!
//! The annotator is a pluggable capability. Consumers receive an `AnnotatorCapability` and
//! branch once on `Available` / `Unavailable`; when it is unavailable, extraction and scoring
//! fall back to dictionary-only behaviour without raising an error.
//!
//! `HeuristicAnnotator` is the built-in implementation: UAX#29 word segmentation, Snowball
//! stems as lemmas, and a capitalisation/suffix heuristic for POS. Any model-backed tagger
//! can be plugged in by implementing `Annotator`.

use std::fmt;
use std::sync::Arc;

use rust_stemmers::{Algorithm, Stemmer};
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use crate::text::stopwords::is_stop_word;

/// Coarse part-of-speech tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartOfSpeech {
    ProperNoun,
    Noun,
    Verb,
    Adjective,
    Number,
    Punctuation,
    Other,
}

/// A single annotated token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedToken {
    /// Surface form, original casing.
    pub text: String,
    /// Lowercase base form.
    pub lemma: String,
    pub pos: PartOfSpeech,
    pub is_stop: bool,
}

/// Implement this to plug in a different tagger without touching extraction or scoring.
///
/// Implementations are shared read-only across threads.
pub trait Annotator: Send + Sync {
    /// Short backend label, for logs.
    fn name(&self) -> &str;

    fn annotate(&self, text: &str) -> Vec<AnnotatedToken>;
}

/// Whether a linguistic annotator is wired in.
#[derive(Clone)]
pub enum AnnotatorCapability {
    Available(Arc<dyn Annotator>),
    Unavailable,
}

impl AnnotatorCapability {
    /// The built-in heuristic annotator.
    pub fn heuristic() -> Self {
        AnnotatorCapability::Available(Arc::new(HeuristicAnnotator::new()))
    }

    pub fn is_available(&self) -> bool {
        matches!(self, AnnotatorCapability::Available(_))
    }

    pub fn annotator(&self) -> Option<&dyn Annotator> {
        match self {
            AnnotatorCapability::Available(a) => Some(a.as_ref()),
            AnnotatorCapability::Unavailable => None,
        }
    }
}

impl Default for AnnotatorCapability {
    fn default() -> Self {
        Self::heuristic()
    }
}

impl fmt::Debug for AnnotatorCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnnotatorCapability::Available(a) => write!(f, "Available({})", a.name()),
            AnnotatorCapability::Unavailable => write!(f, "Unavailable"),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// HeuristicAnnotator
// ────────────────────────────────────────────────────────────────────────────

/// All-caps tokens longer than this read as shouted words, not acronyms.
const MAX_ACRONYM_LEN: usize = 5;

const ADJECTIVE_SUFFIXES: &[&str] = &["ous", "ful", "ive", "able", "ible", "ical", "less"];
const VERB_SUFFIXES: &[&str] = &["ed", "ize", "ise"];

/// Model-free annotator.
///
/// POS rules, in order: no alphanumerics ⇒ punctuation; no letters ⇒ number; stop word ⇒ other;
/// proper noun when the token is mixed case with an inner capital, capitalised and not
/// sentence-initial, or a short alphanumeric acronym; `-ly` ⇒ other; adjective / verb suffixes;
/// anything else ⇒ noun.
///
/// Words on a line with no lowercase letters (an all-caps heading) are never proper nouns.
pub struct HeuristicAnnotator {
    stemmer: Stemmer,
}

impl HeuristicAnnotator {
    pub fn new() -> Self {
        Self {
            stemmer: Stemmer::create(Algorithm::English),
        }
    }

    fn tag(&self, segment: &Segment) -> AnnotatedToken {
        let surface = segment.text.as_str();
        let lower = surface.to_lowercase();
        let is_stop = is_stop_word(&lower);

        let pos = if !surface.chars().any(char::is_alphanumeric) {
            PartOfSpeech::Punctuation
        } else if !surface.chars().any(char::is_alphabetic) {
            PartOfSpeech::Number
        } else if is_stop {
            PartOfSpeech::Other
        } else if !segment.in_heading && looks_proper(surface, segment.sentence_start) {
            PartOfSpeech::ProperNoun
        } else {
            suffix_pos(&lower)
        };

        let lemma = match pos {
            PartOfSpeech::Punctuation | PartOfSpeech::Number | PartOfSpeech::ProperNoun => {
                lower
            }
            _ if is_stop => lower,
            _ => self.stemmer.stem(&lower).into_owned(),
        };

        AnnotatedToken {
            text: surface.to_string(),
            lemma,
            pos,
            is_stop,
        }
    }
}

impl Default for HeuristicAnnotator {
    fn default() -> Self {
        Self::new()
    }
}

impl Annotator for HeuristicAnnotator {
    fn name(&self) -> &str {
        "heuristic"
    }

    fn annotate(&self, text: &str) -> Vec<AnnotatedToken> {
        segment(text).iter().map(|s| self.tag(s)).collect()
    }
}

/// A raw token plus the positional context POS tagging needs.
struct Segment {
    text: String,
    sentence_start: bool,
    in_heading: bool,
}

/// Splits text into tokens, flagging sentence-initial words and all-caps heading lines.
///
/// Trailing `+` / `#` glued to a word are kept with it so "c++" and "c#" survive.
fn segment(text: &str) -> Vec<Segment> {
    let mut tokens: Vec<Segment> = Vec::new();

    for line in text.lines() {
        let in_heading = is_heading(line);
        let mut sentence_start = true;
        let mut glued = false;

        for piece in line.split_word_bounds() {
            if piece.chars().all(char::is_whitespace) {
                glued = false;
                continue;
            }

            if glued && (piece == "+" || piece == "#") {
                if let Some(last) = tokens.last_mut() {
                    last.text.push_str(piece);
                    continue;
                }
            }

            let is_word = piece.chars().any(char::is_alphanumeric);
            tokens.push(Segment {
                text: piece.to_string(),
                sentence_start: sentence_start && is_word,
                in_heading,
            });

            if is_word {
                sentence_start = false;
                glued = true;
            } else {
                glued = false;
                if matches!(piece, "." | "!" | "?" | ":" | "•") {
                    sentence_start = true;
                }
            }
        }
    }

    tokens
}

/// A line with letters but no lowercase ones, e.g. "SENIOR BACKEND ENGINEER".
fn is_heading(line: &str) -> bool {
    line.chars().any(char::is_alphabetic) && !line.chars().any(char::is_lowercase)
}

fn looks_proper(surface: &str, sentence_start: bool) -> bool {
    if !surface.chars().any(char::is_lowercase) {
        return is_acronym(surface);
    }
    let mut chars = surface.chars();
    let first_upper = chars.next().map(char::is_uppercase).unwrap_or(false);
    let inner_upper = chars.any(char::is_uppercase);
    inner_upper || (first_upper && !sentence_start)
}

/// "AWS", "GCP", "S3". Dotted abbreviations ("U.S") and long shouted words are not.
fn is_acronym(surface: &str) -> bool {
    let letters = surface.chars().filter(|c| c.is_alphabetic()).count();
    surface.chars().count() >= 2
        && surface.chars().all(char::is_alphanumeric)
        && (1..=MAX_ACRONYM_LEN).contains(&letters)
}

fn suffix_pos(lower: &str) -> PartOfSpeech {
    let has_suffix = |suffixes: &[&str]| {
        suffixes
            .iter()
            .any(|s| lower.len() > s.len() + 2 && lower.ends_with(s))
    };

    if lower.len() > 4 && lower.ends_with("ly") {
        PartOfSpeech::Other
    } else if has_suffix(ADJECTIVE_SUFFIXES) {
        PartOfSpeech::Adjective
    } else if has_suffix(VERB_SUFFIXES) {
        PartOfSpeech::Verb
    } else {
        PartOfSpeech::Noun
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos_of(tokens: &[AnnotatedToken], text: &str) -> PartOfSpeech {
        tokens
            .iter()
            .find(|t| t.text == text)
            .unwrap_or_else(|| panic!("token {text} missing"))
            .pos
    }

    #[test]
    fn test_mixed_case_terms_are_proper_nouns() {
        let tokens = HeuristicAnnotator::new().annotate("Experience with PostgreSQL and AWS");
        assert_eq!(pos_of(&tokens, "PostgreSQL"), PartOfSpeech::ProperNoun);
        assert_eq!(pos_of(&tokens, "AWS"), PartOfSpeech::ProperNoun);
        // sentence-initial capital alone is not enough
        assert_eq!(pos_of(&tokens, "Experience"), PartOfSpeech::Noun);
    }

    #[test]
    fn test_heading_lines_are_not_proper_nouns() {
        let tokens = HeuristicAnnotator::new()
            .annotate("SENIOR BACKEND ENGINEER\nQUALIFICATIONS\nWe build APIs with Python on AWS");
        for heading in ["SENIOR", "BACKEND", "ENGINEER", "QUALIFICATIONS"] {
            assert_ne!(pos_of(&tokens, heading), PartOfSpeech::ProperNoun, "{heading}");
        }
        assert_eq!(pos_of(&tokens, "Python"), PartOfSpeech::ProperNoun);
        assert_eq!(pos_of(&tokens, "AWS"), PartOfSpeech::ProperNoun);
    }

    #[test]
    fn test_shouted_words_and_dotted_abbreviations_are_not_proper() {
        let tokens =
            HeuristicAnnotator::new().annotate("Meets U.S. compliance and REQUIRED training on GCP");
        assert_ne!(pos_of(&tokens, "U.S"), PartOfSpeech::ProperNoun);
        assert_ne!(pos_of(&tokens, "REQUIRED"), PartOfSpeech::ProperNoun);
        assert_eq!(pos_of(&tokens, "GCP"), PartOfSpeech::ProperNoun);
    }

    #[test]
    fn test_capitalised_mid_sentence_is_proper_noun() {
        let tokens = HeuristicAnnotator::new().annotate("Built services in Django. Deployed daily");
        assert_eq!(pos_of(&tokens, "Django"), PartOfSpeech::ProperNoun);
        assert_eq!(pos_of(&tokens, "Deployed"), PartOfSpeech::Verb);
    }

    #[test]
    fn test_stop_words_flagged() {
        let tokens = HeuristicAnnotator::new().annotate("I am with the team");
        let stops: Vec<&str> = tokens
            .iter()
            .filter(|t| t.is_stop)
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(stops, vec!["I", "am", "with", "the"]);
    }

    #[test]
    fn test_plus_and_hash_stay_attached() {
        let tokens = HeuristicAnnotator::new().annotate("Wrote C++ and C# tools");
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert!(texts.contains(&"C++"), "tokens: {texts:?}");
        assert!(texts.contains(&"C#"), "tokens: {texts:?}");
    }

    #[test]
    fn test_dotted_names_are_single_tokens() {
        let tokens = HeuristicAnnotator::new().annotate("Shipped React.js apps.");
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert!(texts.contains(&"React.js"), "tokens: {texts:?}");
        assert_eq!(pos_of(&tokens, "."), PartOfSpeech::Punctuation);
    }

    #[test]
    fn test_lemmas_are_stemmed_lowercase() {
        let tokens = HeuristicAnnotator::new().annotate("deploying pipelines");
        assert_eq!(tokens[0].lemma, "deploy");
        assert!(tokens[1].lemma.starts_with("pipelin"), "{}", tokens[1].lemma);
    }

    #[test]
    fn test_numbers_tagged() {
        let tokens = HeuristicAnnotator::new().annotate("5 years");
        assert_eq!(tokens[0].pos, PartOfSpeech::Number);
    }

    #[test]
    fn test_capability_reports_availability() {
        assert!(AnnotatorCapability::heuristic().is_available());
        assert!(!AnnotatorCapability::Unavailable.is_available());
        assert!(AnnotatorCapability::Unavailable.annotator().is_none());
        assert_eq!(
            format!("{:?}", AnnotatorCapability::heuristic()),
            "Available(heuristic)"
        );
    }
}
