use crate::model::{CommitRecord, MonthBucket, Timeline, YearBucket};
use crate::util::{month_key, parse_timestamp, year_key};
use std::collections::BTreeMap;

/// Count commits per calendar year and per year-month, both ascending.
///
/// Records whose timestamp cannot be parsed are left out of this analysis
/// and counted in [`Timeline::unparsed`].
pub fn bucket_by_time<'a, I>(records: I) -> Timeline
where
    I: IntoIterator<Item = &'a CommitRecord>,
{
    let mut years: BTreeMap<i32, usize> = BTreeMap::new();
    let mut months: BTreeMap<String, usize> = BTreeMap::new();
    let mut unparsed = 0;

    for record in records {
        let Some(ts) = parse_timestamp(&record.timestamp) else {
            unparsed += 1;
            continue;
        };
        *years.entry(year_key(&ts)).or_insert(0) += 1;
        *months.entry(month_key(&ts)).or_insert(0) += 1;
    }

    if unparsed > 0 {
        tracing::debug!(unparsed, "dropped commits with unparseable timestamps");
    }

    Timeline {
        years: years
            .into_iter()
            .map(|(year, commit_count)| YearBucket { year, commit_count })
            .collect(),
        months: months
            .into_iter()
            .map(|(month, commit_count)| MonthBucket { month, commit_count })
            .collect(),
        unparsed,
    }
}
