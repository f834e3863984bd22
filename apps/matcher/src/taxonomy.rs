//! Skill taxonomy: canonical technical skill names plus an alias resolution table.
//!
//! Built once at start-up (optionally extended by a JSON overlay) and shared read-only
//! via `Arc<SkillTaxonomy>`. Nothing mutates it after construction.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::MatcherError;

/// Canonical skills shipped with the crate. All lowercase.
const BUILTIN_SKILLS: &[&str] = &[
    // Languages
    "python",
    "java",
    "javascript",
    "typescript",
    "c++",
    "c#",
    "rust",
    "ruby",
    "php",
    "swift",
    "kotlin",
    "scala",
    "sql",
    "html",
    "css",
    "bash",
    // Frameworks & libraries
    "react",
    "angular",
    "vue",
    "nodejs",
    "django",
    "flask",
    "fastapi",
    "spring boot",
    "tensorflow",
    "pytorch",
    "pandas",
    "numpy",
    "scikit-learn",
    "graphql",
    // Infrastructure & tooling
    "docker",
    "kubernetes",
    "terraform",
    "ansible",
    "jenkins",
    "aws",
    "azure",
    "gcp",
    "linux",
    "git",
    "ci/cd",
    "microservices",
    "rest api",
    // Data stores & pipelines
    "postgresql",
    "mysql",
    "mongodb",
    "redis",
    "elasticsearch",
    "kafka",
    "spark",
    "hadoop",
    "airflow",
    // Disciplines
    "machine learning",
    "deep learning",
    "nlp",
    "computer vision",
    "data analysis",
    "agile",
    "scrum",
];

/// Alias → canonical. Targets outside `BUILTIN_SKILLS` ("go", "express") are authoritative:
/// their bare spelling is too ambiguous in prose to search for directly.
const BUILTIN_ALIASES: &[(&str, &str)] = &[
    ("react.js", "react"),
    ("reactjs", "react"),
    ("angularjs", "angular"),
    ("vue.js", "vue"),
    ("vuejs", "vue"),
    ("node.js", "nodejs"),
    ("express.js", "express"),
    ("expressjs", "express"),
    ("golang", "go"),
    ("postgres", "postgresql"),
    ("k8s", "kubernetes"),
    ("amazon web services", "aws"),
    ("google cloud", "gcp"),
    ("sklearn", "scikit-learn"),
    ("ml", "machine learning"),
    ("natural language processing", "nlp"),
    ("cicd", "ci/cd"),
    ("restful api", "rest api"),
    ("springboot", "spring boot"),
];

/// On-disk overlay format for `MATCHER_TAXONOMY_PATH`.
#[derive(Debug, Default, Deserialize)]
struct TaxonomyOverlay {
    #[serde(default)]
    skills: Vec<String>,
    #[serde(default)]
    aliases: BTreeMap<String, String>,
}

/// Immutable skill reference data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillTaxonomy {
    skills: BTreeSet<String>,
    aliases: BTreeMap<String, String>,
}

impl SkillTaxonomy {
    /// The curated taxonomy compiled into the crate.
    pub fn builtin() -> Self {
        Self {
            skills: BUILTIN_SKILLS.iter().map(|s| s.to_string()).collect(),
            aliases: BUILTIN_ALIASES
                .iter()
                .map(|(alias, target)| (alias.to_string(), target.to_string()))
                .collect(),
        }
    }

    /// Builds a taxonomy from explicit parts. Entries are trimmed and lowercased;
    /// empty entries are rejected.
    pub fn from_parts<S, A>(skills: S, aliases: A) -> Result<Self, MatcherError>
    where
        S: IntoIterator<Item = String>,
        A: IntoIterator<Item = (String, String)>,
    {
        let mut taxonomy = Self::default();
        taxonomy.extend(skills, aliases)?;
        Ok(taxonomy)
    }

    /// Merges a JSON overlay file into this taxonomy.
    pub fn with_overlay(self, path: &Path) -> Result<Self, MatcherError> {
        let raw = std::fs::read_to_string(path).map_err(|source| MatcherError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let taxonomy = self.with_overlay_json(&raw)?;
        info!(
            "Loaded taxonomy overlay from {} ({} skills, {} aliases)",
            path.display(),
            taxonomy.skills.len(),
            taxonomy.aliases.len()
        );
        Ok(taxonomy)
    }

    /// Merges an overlay given as a JSON string: `{"skills": [...], "aliases": {...}}`.
    pub fn with_overlay_json(mut self, json: &str) -> Result<Self, MatcherError> {
        let overlay: TaxonomyOverlay = serde_json::from_str(json)?;
        self.extend(overlay.skills, overlay.aliases)?;
        Ok(self)
    }

    fn extend<S, A>(&mut self, skills: S, aliases: A) -> Result<(), MatcherError>
    where
        S: IntoIterator<Item = String>,
        A: IntoIterator<Item = (String, String)>,
    {
        for skill in skills {
            self.skills.insert(clean_entry(&skill, "skill")?);
        }
        for (alias, target) in aliases {
            let alias = clean_entry(&alias, "alias")?;
            let target = clean_entry(&target, "alias target")?;
            self.aliases.insert(alias, target);
        }
        Ok(())
    }

    /// True if `skill` is a curated canonical entry.
    pub fn is_canonical(&self, skill: &str) -> bool {
        self.skills.contains(skill)
    }

    /// True if `skill` is canonical or the target of any alias.
    pub fn is_known(&self, skill: &str) -> bool {
        self.is_canonical(skill) || self.aliases.values().any(|target| target == skill)
    }

    /// Resolves a term to its canonical skill, if the taxonomy knows it.
    pub fn resolve(&self, term: &str) -> Option<&str> {
        if let Some(target) = self.aliases.get(term) {
            return Some(target.as_str());
        }
        self.skills.get(term).map(String::as_str)
    }

    /// Every searchable term paired with the canonical skill it yields:
    /// canonical skills map to themselves, aliases to their target.
    pub fn search_terms(&self) -> impl Iterator<Item = (&str, &str)> {
        self.skills
            .iter()
            .map(|s| (s.as_str(), s.as_str()))
            .chain(self.aliases.iter().map(|(a, t)| (a.as_str(), t.as_str())))
    }

    pub fn skills(&self) -> &BTreeSet<String> {
        &self.skills
    }

    pub fn aliases(&self) -> &BTreeMap<String, String> {
        &self.aliases
    }
}

fn clean_entry(raw: &str, kind: &str) -> Result<String, MatcherError> {
    let cleaned = raw.trim().to_lowercase();
    if cleaned.is_empty() {
        return Err(MatcherError::InvalidTaxonomy(format!("empty {kind}")));
    }
    Ok(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_entries_are_lowercase() {
        let taxonomy = SkillTaxonomy::builtin();
        for (term, target) in taxonomy.search_terms() {
            assert_eq!(term, term.to_lowercase());
            assert_eq!(target, target.to_lowercase());
        }
    }

    #[test]
    fn test_alias_resolves_to_canonical() {
        let taxonomy = SkillTaxonomy::builtin();
        assert_eq!(taxonomy.resolve("react.js"), Some("react"));
        assert_eq!(taxonomy.resolve("postgres"), Some("postgresql"));
        assert_eq!(taxonomy.resolve("python"), Some("python"));
        assert_eq!(taxonomy.resolve("cobol"), None);
    }

    #[test]
    fn test_alias_target_outside_curated_set_is_known() {
        let taxonomy = SkillTaxonomy::builtin();
        assert!(!taxonomy.is_canonical("go"));
        assert!(taxonomy.is_known("go"));
        assert!(taxonomy.is_known("docker"));
        assert!(!taxonomy.is_known("communication"));
    }

    #[test]
    fn test_overlay_json_adds_skills_and_aliases() {
        let taxonomy = SkillTaxonomy::builtin()
            .with_overlay_json(r#"{"skills": ["  Snowflake "], "aliases": {"dbt-core": "DBT"}}"#)
            .unwrap();
        assert!(taxonomy.is_canonical("snowflake"));
        assert_eq!(taxonomy.resolve("dbt-core"), Some("dbt"));
        assert!(taxonomy.is_known("dbt"));
        // builtin entries survive the merge
        assert!(taxonomy.is_canonical("python"));
    }

    #[test]
    fn test_overlay_rejects_empty_entries() {
        let err = SkillTaxonomy::builtin()
            .with_overlay_json(r#"{"aliases": {"   ": "rust"}}"#)
            .unwrap_err();
        assert!(matches!(err, MatcherError::InvalidTaxonomy(_)));
    }

    #[test]
    fn test_overlay_rejects_malformed_json() {
        let err = SkillTaxonomy::builtin()
            .with_overlay_json("[1, 2")
            .unwrap_err();
        assert!(matches!(err, MatcherError::Json(_)));
    }

    #[test]
    fn test_overlay_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"skills": ["zig"]}}"#).unwrap();

        let taxonomy = SkillTaxonomy::builtin().with_overlay(file.path()).unwrap();
        assert!(taxonomy.is_canonical("zig"));
    }

    #[test]
    fn test_overlay_missing_file_is_io_error() {
        let err = SkillTaxonomy::builtin()
            .with_overlay(Path::new("/definitely/not/here.json"))
            .unwrap_err();
        assert!(matches!(err, MatcherError::Io { .. }));
    }

    #[test]
    fn test_from_parts_normalizes_case() {
        let taxonomy = SkillTaxonomy::from_parts(
            vec!["Elixir".to_string()],
            vec![("Phoenix LiveView".to_string(), "Phoenix".to_string())],
        )
        .unwrap();
        assert!(taxonomy.is_canonical("elixir"));
        assert_eq!(taxonomy.resolve("phoenix liveview"), Some("phoenix"));
    }
}
