use crate::keywords::KeywordSet;
use crate::model::{ClassificationStats, CommitRecord, TaggedCommit};

/// Whether a commit message reads as refactoring or style work.
///
/// The message is lower-cased and each keyword is tested in order as a
/// whole word (or contiguous phrase) bounded by `\b` at both ends, so `style`
/// matches "fix style" but neither "styles" nor "stylesheet". An absent
/// message is never a refactoring commit.
pub fn is_refactoring_commit(message: Option<&str>, keywords: &KeywordSet) -> bool {
    let Some(message) = message else {
        return false;
    };
    let lowered = message.to_lowercase();
    keywords.iter().any(|kw| kw.is_match(&lowered))
}

/// Tag every record, preserving input order, and summarise the result.
pub fn classify_all(
    records: &[CommitRecord],
    keywords: &KeywordSet,
) -> (Vec<TaggedCommit>, ClassificationStats) {
    let tagged: Vec<TaggedCommit> = records
        .iter()
        .map(|record| TaggedCommit {
            is_refactoring: is_refactoring_commit(record.message(), keywords),
            record: record.clone(),
        })
        .collect();

    let stats = compute_stats(&tagged);
    tracing::debug!(
        total = stats.total,
        refactoring = stats.refactoring,
        "classified commits"
    );
    (tagged, stats)
}

pub fn compute_stats(tagged: &[TaggedCommit]) -> ClassificationStats {
    let refactoring = tagged.iter().filter(|t| t.is_refactoring).count();
    ClassificationStats::from_counts(tagged.len(), refactoring)
}

pub fn refactoring_commits(tagged: &[TaggedCommit]) -> impl Iterator<Item = &TaggedCommit> {
    tagged.iter().filter(|t| t.is_refactoring)
}

/// First `n` refactoring commits, in dataset order.
pub fn refactoring_examples(tagged: &[TaggedCommit], n: usize) -> Vec<TaggedCommit> {
    refactoring_commits(tagged).take(n).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kw(list: &[&str]) -> KeywordSet {
        KeywordSet::new(list).unwrap()
    }

    fn record(hash: &str, message: Option<&str>) -> CommitRecord {
        CommitRecord::new(hash, "Ann", "2020-01-01 00:00:00 +0000", message)
    }

    #[test]
    fn whole_word_matches() {
        assert!(is_refactoring_commit(Some("this code needs style"), &kw(&["style"])));
        assert!(!is_refactoring_commit(Some("add stylesheet"), &kw(&["style"])));
        assert!(!is_refactoring_commit(Some("new styles"), &kw(&["style"])));
    }

    #[test]
    fn phrases_must_be_contiguous() {
        let keywords = kw(&["clean up"]);
        assert!(is_refactoring_commit(Some("time to clean up this mess"), &keywords));
        assert!(!is_refactoring_commit(Some("clean this up"), &keywords));
        assert!(!is_refactoring_commit(Some("up clean"), &keywords));
    }

    #[test]
    fn matching_ignores_case() {
        assert!(is_refactoring_commit(Some("REFACTOR the parser"), &kw(&["refactor"])));
        assert!(is_refactoring_commit(Some("Fixed PEP 8 issues"), &kw(&["pep 8"])));
    }

    #[test]
    fn punctuation_is_a_boundary() {
        let keywords = kw(&["refactor"]);
        assert!(is_refactoring_commit(Some("refactor: simplify loop"), &keywords));
        assert!(is_refactoring_commit(Some("(refactor)"), &keywords));
        assert!(!is_refactoring_commit(Some("refactoring"), &keywords));
        assert!(!is_refactoring_commit(Some("prerefactor"), &keywords));
    }

    #[test]
    fn absent_message_is_normal() {
        assert!(!is_refactoring_commit(None, &KeywordSet::classification()));
    }

    #[test]
    fn keyword_order_does_not_change_result() {
        let msg = Some("typo and whitespace cleanup");
        assert_eq!(
            is_refactoring_commit(msg, &kw(&["typo", "cleanup"])),
            is_refactoring_commit(msg, &kw(&["cleanup", "typo"]))
        );
    }

    #[test]
    fn classifies_scenario_dataset() {
        let records = vec![
            record("a", Some("Fix bug in parser")),
            record("b", Some("refactor: simplify loop")),
            record("c", Some("cleanup whitespace")),
        ];
        let (tagged, stats) = classify_all(&records, &KeywordSet::classification());

        let tags: Vec<bool> = tagged.iter().map(|t| t.is_refactoring).collect();
        assert_eq!(tags, vec![false, true, true]);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.refactoring, 2);
        assert_eq!(stats.normal, 1);
        assert!((stats.percentage - 66.67).abs() < 0.01);
    }

    #[test]
    fn preserves_record_order_and_content() {
        let records = vec![record("z", None), record("y", Some("lint")), record("x", Some("feat"))];
        let (tagged, _) = classify_all(&records, &KeywordSet::classification());
        let back: Vec<CommitRecord> = tagged.into_iter().map(|t| t.record).collect();
        assert_eq!(back, records);
    }

    #[test]
    fn empty_dataset_has_zero_stats() {
        let (tagged, stats) = classify_all(&[], &KeywordSet::classification());
        assert!(tagged.is_empty());
        assert_eq!(stats, ClassificationStats::from_counts(0, 0));
        assert_eq!(stats.percentage, 0.0);
    }

    #[test]
    fn counts_always_add_up() {
        let messages = [
            Some("Merge branch"),
            None,
            Some("Code style fixes"),
            Some(""),
            Some("Improve code readability"),
            Some("Bump version"),
        ];
        let records: Vec<_> = messages
            .iter()
            .enumerate()
            .map(|(i, m)| record(&i.to_string(), *m))
            .collect();
        let (_, stats) = classify_all(&records, &KeywordSet::classification());
        assert_eq!(stats.refactoring + stats.normal, stats.total);
        assert_eq!(stats.refactoring, 2);
        assert!((stats.percentage - 2.0 / 6.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn reclassifying_is_idempotent() {
        let records = vec![
            record("a", Some("Removed dead code")),
            record("b", Some("Add feature")),
            record("c", Some("reformat module")),
        ];
        let keywords = KeywordSet::classification();
        let (first, _) = classify_all(&records, &keywords);
        let again: Vec<CommitRecord> = first.iter().map(|t| t.record.clone()).collect();
        let (second, _) = classify_all(&again, &keywords);
        assert_eq!(first, second);
    }

    #[test]
    fn examples_are_the_first_refactoring_commits() {
        let records = vec![
            record("a", Some("typo")),
            record("b", Some("feature")),
            record("c", Some("lint")),
            record("d", Some("naming")),
        ];
        let (tagged, _) = classify_all(&records, &KeywordSet::classification());
        let hashes: Vec<_> = refactoring_examples(&tagged, 2)
            .into_iter()
            .map(|t| t.record.hash)
            .collect();
        assert_eq!(hashes, vec!["a", "c"]);
    }
}
