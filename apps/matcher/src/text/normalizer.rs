//! Repairs "spaced-letter" artifacts left by PDF text extraction.
//!
//! Some extractors emit every glyph separated by a space ("P y t h o n") while keeping a
//! double space where the original words were separated. Lines that look like that are
//! re-joined; everything else passes through untouched.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Runs of two or more whitespace characters mark a boundary between original words.
static WORD_GAP: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s{2,}").expect("static regex"));

/// Lines shorter than this (in words) are never treated as corrupted.
const MIN_WORDS: usize = 3;
/// Share of single-character words above which a line is considered corrupted.
const SINGLE_CHAR_RATIO: f64 = 0.7;

/// Normalizes raw extracted text line by line.
pub fn normalize(raw: &str) -> String {
    raw.split('\n')
        .map(|line| {
            if is_spaced_letter_line(line) {
                let repaired = rejoin_spaced_letters(line);
                debug!("Repaired spaced-letter line: {:?} -> {:?}", line, repaired);
                repaired
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// True when the line has at least `MIN_WORDS` words and more than 70% of them are a single
/// character long.
pub fn is_spaced_letter_line(line: &str) -> bool {
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.len() < MIN_WORDS {
        return false;
    }
    let single = words.iter().filter(|w| w.chars().count() == 1).count();
    single as f64 / words.len() as f64 > SINGLE_CHAR_RATIO
}

fn rejoin_spaced_letters(line: &str) -> String {
    WORD_GAP
        .split(line)
        .map(|segment| segment.split_whitespace().collect::<String>())
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spaced_run_is_rejoined() {
        let out = normalize("P y t h o n  and  Java");
        assert_eq!(out, "Python and Java");
        assert_eq!(out.to_lowercase(), "python and java");
    }

    #[test]
    fn test_clean_line_passes_through() {
        let text = "Senior engineer with Python and AWS";
        assert_eq!(normalize(text), text);
    }

    #[test]
    fn test_short_line_never_corrupted() {
        // two single-char words: 100% single but below the word threshold
        assert!(!is_spaced_letter_line("C V"));
        assert_eq!(normalize("C V"), "C V");
    }

    #[test]
    fn test_threshold_is_strictly_greater_than_70_percent() {
        // 7 of 10 words single-char = exactly 70% -> not corrupted
        let line = "a b c d e f g hello world again";
        assert!(!is_spaced_letter_line(line));
        // 8 of 10 -> corrupted
        let line = "a b c d e f g h world again";
        assert!(is_spaced_letter_line(line));
    }

    #[test]
    fn test_lines_are_handled_independently() {
        let text = "S k i l l s\nDocker and Kubernetes\nR u s t  G o";
        assert_eq!(normalize(text), "Skills\nDocker and Kubernetes\nRust Go");
    }

    #[test]
    fn test_idempotent_on_normal_text() {
        let samples = [
            "",
            "Experience with PostgreSQL and React.js",
            "Line one\n\nLine three with  double  spaces",
            "I am a Senior Python Developer",
        ];
        for s in samples {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {s:?}");
            assert_eq!(once, s);
        }
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "   ");
    }
}
