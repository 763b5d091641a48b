//! Classify commit messages as refactoring/style work and report on them.
//!
//! The library side is a small pipeline: [`dataset`] loads `;`-delimited
//! commit records, [`classify`] tags each one against a [`keywords::KeywordSet`],
//! and [`analysis`] aggregates the tagged records. [`chart`] renders the
//! results; [`cli`] wires everything into the `refscan` binary.

pub mod analysis;
pub mod chart;
pub mod classify;
pub mod cli;
pub mod dataset;
pub mod error;
pub mod keywords;
pub mod model;
pub mod scan;
pub mod util;

pub use classify::{classify_all, is_refactoring_commit};
pub use error::{RefscanError, Result};
pub use keywords::{KeywordConfig, KeywordSet};
pub use model::{ClassificationStats, CommitRecord, TaggedCommit};
