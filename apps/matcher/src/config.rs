use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::errors::MatcherError;

/// Runtime configuration loaded from environment variables (and `.env`, if present).
#[derive(Debug, Clone)]
pub struct Config {
    pub rust_log: String,
    /// Optional JSON overlay merged into the builtin skill taxonomy.
    pub taxonomy_path: Option<PathBuf>,
    /// Wire in the heuristic annotator. Off means dictionary-only extraction.
    pub enable_annotator: bool,
    /// Cap final scores at 100.
    pub clamp_score: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rust_log: "info".to_string(),
            taxonomy_path: None,
            enable_annotator: true,
            clamp_score: true,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. Unset keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        Ok(Config {
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
            taxonomy_path: lookup("MATCHER_TAXONOMY_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            enable_annotator: bool_var(&lookup, "ENABLE_ANNOTATOR", defaults.enable_annotator)?,
            clamp_score: bool_var(&lookup, "MATCHER_CLAMP_SCORE", defaults.clamp_score)?,
        })
    }
}

fn bool_var<F>(lookup: &F, key: &str, default: bool) -> Result<bool>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => parse_bool(&raw)
            .with_context(|| format!("Environment variable '{key}' must be a boolean")),
    }
}

fn parse_bool(raw: &str) -> Result<bool, MatcherError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(MatcherError::Config(format!("unrecognised boolean '{other}'"))),
    }
}
