use std::path::PathBuf;

use thiserror::Error;

/// Library-level error type.
///
/// Only start-up work can fail (configuration, taxonomy overlays). Normalization, extraction,
/// scoring and comparison never return this; they degrade to fallback values instead.
#[derive(Debug, Error)]
pub enum MatcherError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid taxonomy overlay JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid taxonomy entry: {0}")]
    InvalidTaxonomy(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl MatcherError {
    /// Stable machine-readable code, used by the binary when reporting failures.
    pub fn code(&self) -> &'static str {
        match self {
            MatcherError::Io { .. } => "IO_ERROR",
            MatcherError::Json(_) => "JSON_ERROR",
            MatcherError::InvalidTaxonomy(_) => "INVALID_TAXONOMY",
            MatcherError::Config(_) => "CONFIG_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_stable() {
        let err = MatcherError::InvalidTaxonomy("empty alias".to_string());
        assert_eq!(err.code(), "INVALID_TAXONOMY");
        assert_eq!(err.to_string(), "Invalid taxonomy entry: empty alias");

        let err = MatcherError::Config("ENABLE_ANNOTATOR".to_string());
        assert_eq!(err.code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_json_error_converts() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: MatcherError = parse_err.into();
        assert_eq!(err.code(), "JSON_ERROR");
    }
}
