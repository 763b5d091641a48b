use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RefscanError>;

#[derive(Error, Debug)]
pub enum RefscanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid keyword pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("{} not found: {hint}", path.display())]
    MissingInput { path: PathBuf, hint: String },
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Chart error: {0}")]
    Chart(String),
    #[error("Parse error: {0}")]
    Parse(String),
}

impl RefscanError {
    pub fn missing_input(path: impl Into<PathBuf>, hint: impl Into<String>) -> Self {
        RefscanError::MissingInput {
            path: path.into(),
            hint: hint.into(),
        }
    }

    pub fn is_missing_input(&self) -> bool {
        matches!(self, RefscanError::MissingInput { .. })
    }
}
