pub mod authors;
pub mod compare;
pub mod exec;
pub mod frequency;
pub mod output;
pub mod timeline;

pub use authors::top_authors;
pub use compare::{author_coverage, compare_lengths};
pub use exec::{exec_authors, exec_compare, exec_keywords, exec_report, exec_timeline};
pub use frequency::keyword_frequency;
pub use timeline::bucket_by_time;

use clap::ValueEnum;

/// Which dataset a secondary analysis runs over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Scope {
    /// The refactoring subset written by `scan`.
    Refactoring,
    /// Every commit in the full dataset.
    All,
}
