use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

/// One commit as read from the dataset. Only `message` may be absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub hash: String,
    pub author: String,
    pub timestamp: String,
    pub message: Option<String>,
}

impl CommitRecord {
    pub fn new(
        hash: impl Into<String>,
        author: impl Into<String>,
        timestamp: impl Into<String>,
        message: Option<&str>,
    ) -> Self {
        Self {
            hash: hash.into(),
            author: author.into(),
            timestamp: timestamp.into(),
            message: message.map(str::to_string),
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn short_hash(&self) -> &str {
        match self.hash.char_indices().nth(10) {
            Some((idx, _)) => &self.hash[..idx],
            None => &self.hash,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedCommit {
    #[serde(flatten)]
    pub record: CommitRecord,
    pub is_refactoring: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationStats {
    pub total: usize,
    pub refactoring: usize,
    pub normal: usize,
    pub percentage: f64,
}

impl ClassificationStats {
    pub fn from_counts(total: usize, refactoring: usize) -> Self {
        Self {
            total,
            refactoring,
            normal: total - refactoring,
            percentage: crate::util::percentage(refactoring, total),
        }
    }

    pub fn normal_percentage(&self) -> f64 {
        crate::util::percentage(self.normal, self.total)
    }
}

/// Records produced by a loader along with the rows it had to drop.
#[derive(Debug, Clone)]
pub struct LoadReport<T> {
    pub records: Vec<T>,
    pub skipped_rows: usize,
}

impl<T> Default for LoadReport<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            skipped_rows: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearBucket {
    pub year: i32,
    pub commit_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthBucket {
    pub month: String,
    pub commit_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    pub years: Vec<YearBucket>,
    pub months: Vec<MonthBucket>,
    pub unparsed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorCount {
    pub author: String,
    pub commit_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordCount {
    pub keyword: String,
    pub occurrences: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LengthComparison {
    pub normal_mean: Option<f64>,
    pub refactoring_mean: Option<f64>,
    pub difference: Option<f64>,
    pub normal_count: usize,
    pub refactoring_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorCoverage {
    pub total_authors: usize,
    pub refactoring_authors: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub input_path: String,
    pub skipped_rows: usize,
    pub stats: ClassificationStats,
    pub examples: Vec<TaggedCommit>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub input_path: String,
    pub skipped_rows: usize,
    #[serde(flatten)]
    pub timeline: Timeline,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorsOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub input_path: String,
    pub skipped_rows: usize,
    pub top: usize,
    pub authors: Vec<AuthorCount>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordsOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub input_path: String,
    pub skipped_rows: usize,
    pub keywords: Vec<KeywordCount>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub input_path: String,
    pub filtered_path: String,
    pub skipped_input_rows: usize,
    pub skipped_filtered_rows: usize,
    pub lengths: LengthComparison,
    pub authors: AuthorCoverage,
}
