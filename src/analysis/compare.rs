use crate::model::{AuthorCoverage, CommitRecord, LengthComparison};
use crate::util::{mean, percentage};
use std::collections::HashSet;

/// Mean message length of normal commits versus refactoring commits.
///
/// Normal commits are those in `all` whose hash does not appear in
/// `refactoring`. Lengths count characters; commits without a message are
/// left out of the means.
pub fn compare_lengths(all: &[CommitRecord], refactoring: &[CommitRecord]) -> LengthComparison {
    let refactoring_hashes: HashSet<&str> = refactoring.iter().map(|r| r.hash.as_str()).collect();

    let normal_lengths: Vec<usize> = all
        .iter()
        .filter(|r| !refactoring_hashes.contains(r.hash.as_str()))
        .filter_map(message_len)
        .collect();
    let refactoring_lengths: Vec<usize> = refactoring.iter().filter_map(message_len).collect();

    let normal_mean = mean(normal_lengths.iter().copied());
    let refactoring_mean = mean(refactoring_lengths.iter().copied());
    let difference = match (refactoring_mean, normal_mean) {
        (Some(r), Some(n)) => Some(r - n),
        _ => None,
    };

    LengthComparison {
        normal_mean,
        refactoring_mean,
        difference,
        normal_count: normal_lengths.len(),
        refactoring_count: refactoring_lengths.len(),
    }
}

/// Unique authors overall versus among refactoring commits.
pub fn author_coverage(all: &[CommitRecord], refactoring: &[CommitRecord]) -> AuthorCoverage {
    let total_authors = unique_authors(all);
    let refactoring_authors = unique_authors(refactoring);
    AuthorCoverage {
        total_authors,
        refactoring_authors,
        percentage: percentage(refactoring_authors, total_authors),
    }
}

fn unique_authors(records: &[CommitRecord]) -> usize {
    records
        .iter()
        .map(|r| r.author.as_str())
        .collect::<HashSet<_>>()
        .len()
}

fn message_len(record: &CommitRecord) -> Option<usize> {
    record.message().map(|m| m.chars().count())
}
