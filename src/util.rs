use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Utc};

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S %z",
    "%Y-%m-%d %H:%M:%S%z",
    "%a %b %e %H:%M:%S %Y %z",
];

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Parse a commit timestamp and normalise it to UTC.
///
/// Accepts RFC 3339, git's ISO-like and default formats, naive date-times
/// (taken as UTC) and bare dates.
pub fn parse_timestamp(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(input, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

pub fn year_key(timestamp: &DateTime<Utc>) -> i32 {
    timestamp.year()
}

pub fn month_key(timestamp: &DateTime<Utc>) -> String {
    format!("{}-{:02}", timestamp.year(), timestamp.month())
}

/// `part / total * 100`, or 0 for an empty total.
pub fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = usize>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0usize, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum as f64 / count as f64)
    }
}

pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_common_git_formats() {
        let expected = Utc.with_ymd_and_hms(2019, 3, 4, 12, 30, 0).unwrap();
        assert_eq!(parse_timestamp("2019-03-04T12:30:00+00:00"), Some(expected));
        assert_eq!(parse_timestamp("2019-03-04 14:30:00 +0200"), Some(expected));
        assert_eq!(parse_timestamp("Mon Mar 4 12:30:00 2019 +0000"), Some(expected));
        assert_eq!(parse_timestamp("2019-03-04 12:30:00"), Some(expected));
    }

    #[test]
    fn offsets_can_move_the_year() {
        let dt = parse_timestamp("2019-12-31 23:30:00 -0200").unwrap();
        assert_eq!(year_key(&dt), 2020);
        assert_eq!(month_key(&dt), "2020-01");
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_timestamp("not a date"), None);
        assert_eq!(parse_timestamp(""), None);
    }

    #[test]
    fn percentage_of_empty_total_is_zero() {
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(percentage(1, 4), 25.0);
    }

    #[test]
    fn mean_of_nothing_is_none() {
        assert_eq!(mean(Vec::new()), None);
        assert_eq!(mean(vec![2, 4]), Some(3.0));
    }

    #[test]
    fn truncates_on_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("hi", 10), "hi");
    }
}
