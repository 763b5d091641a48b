use crate::error::{RefscanError, Result};
use regex::Regex;
use serde::Deserialize;
use std::path::Path;

/// Phrases that mark a commit as refactoring or style work.
pub const DEFAULT_CLASSIFICATION_KEYWORDS: &[&str] = &[
    "refactor",
    "cleanup",
    "clean up",
    "reformat",
    "style",
    "pep8",
    "pep 8",
    "lint",
    "typo",
    "naming",
    "readability",
    "dead code",
    "simplify",
    "optimize",
    "formatting",
    "reorganize",
    "restructure",
    "cosmetic",
    "whitespace",
    "indentation",
    "code style",
    "code quality",
    "improve code",
];

/// Single words reported by the keyword-frequency analysis.
pub const DEFAULT_REPORTING_KEYWORDS: &[&str] = &[
    "refactor",
    "cleanup",
    "style",
    "pep8",
    "lint",
    "typo",
    "naming",
    "simplify",
    "optimize",
    "formatting",
    "cosmetic",
    "whitespace",
    "reorganize",
];

#[derive(Debug, Clone)]
pub struct Keyword {
    phrase: String,
    pattern: Regex,
}

impl Keyword {
    pub fn new(phrase: &str) -> Result<Self> {
        let phrase = phrase.trim().to_lowercase();
        if phrase.is_empty() {
            return Err(RefscanError::Config("keywords must not be blank".to_string()));
        }
        let pattern = Regex::new(&format!(r"\b{}\b", regex::escape(&phrase)))?;
        Ok(Self { phrase, pattern })
    }

    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    /// Whole-word match against text that is already lower-case.
    pub fn is_match(&self, lowered: &str) -> bool {
        self.pattern.is_match(lowered)
    }
}

/// Ordered, immutable list of compiled keywords.
#[derive(Debug, Clone)]
pub struct KeywordSet {
    keywords: Vec<Keyword>,
}

impl KeywordSet {
    pub fn new<I, S>(phrases: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = phrases
            .into_iter()
            .map(|p| Keyword::new(p.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { keywords })
    }

    pub fn classification() -> Self {
        Self::from_static(DEFAULT_CLASSIFICATION_KEYWORDS)
    }

    pub fn reporting() -> Self {
        Self::from_static(DEFAULT_REPORTING_KEYWORDS)
    }

    fn from_static(phrases: &[&str]) -> Self {
        let keywords = phrases.iter().filter_map(|p| Keyword::new(p).ok()).collect();
        Self { keywords }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Keyword> {
        self.keywords.iter()
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct KeywordFile {
    classification: Option<Vec<String>>,
    reporting: Option<Vec<String>>,
}

/// Keyword configuration for a run: what classifies a commit, and what the
/// frequency report counts.
#[derive(Debug, Clone)]
pub struct KeywordConfig {
    pub classification: KeywordSet,
    pub reporting: KeywordSet,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self {
            classification: KeywordSet::classification(),
            reporting: KeywordSet::reporting(),
        }
    }
}

impl KeywordConfig {
    /// Load from a JSON file; omitted lists fall back to the defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(RefscanError::missing_input(
                path,
                "pass an existing keyword file to --keywords",
            ));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let file: KeywordFile = serde_json::from_str(content)?;
        let classification = match file.classification {
            Some(list) => KeywordSet::new(list)?,
            None => KeywordSet::classification(),
        };
        let reporting = match file.reporting {
            Some(list) => KeywordSet::new(list)?,
            None => KeywordSet::reporting(),
        };
        if classification.is_empty() {
            return Err(RefscanError::Config(
                "classification keyword list is empty".to_string(),
            ));
        }
        Ok(Self {
            classification,
            reporting,
        })
    }

    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }
}
