use crate::keywords::KeywordSet;
use crate::model::{CommitRecord, KeywordCount};

/// For each reporting keyword, how many messages contain it as a whole word.
///
/// Keywords that never occur are omitted. Counts descend; ties keep the
/// keyword list order.
pub fn keyword_frequency(records: &[CommitRecord], keywords: &KeywordSet) -> Vec<KeywordCount> {
    let lowered: Vec<String> = records
        .iter()
        .filter_map(|r| r.message())
        .map(str::to_lowercase)
        .collect();

    let mut counts: Vec<KeywordCount> = keywords
        .iter()
        .map(|kw| KeywordCount {
            keyword: kw.phrase().to_string(),
            occurrences: lowered.iter().filter(|m| kw.is_match(m)).count(),
        })
        .filter(|c| c.occurrences > 0)
        .collect();

    counts.sort_by(|a, b| b.occurrences.cmp(&a.occurrences));
    counts
}
