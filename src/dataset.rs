//! Reading and writing the `;`-delimited commit datasets.
//!
//! The full dataset is headerless with four columns (hash, author, timestamp,
//! message). The filtered dataset is what `scan` writes back out: same
//! delimiter, a header row, and an extra `is_refactoring` column.
//!
//! Both loaders are best-effort: rows that do not fit are dropped and counted
//! in [`LoadReport::skipped_rows`] instead of failing the load. Dropped rows
//! silently reduce the precision of every statistic computed afterwards, so
//! callers should surface the count.

use crate::error::{RefscanError, Result};
use crate::model::{CommitRecord, LoadReport, TaggedCommit};
use csv::{ErrorKind, ReaderBuilder, StringRecord, WriterBuilder};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::path::Path;

pub const DELIMITER: u8 = b';';

/// Hint shown when the filtered dataset has not been produced yet.
pub const RUN_SCAN_FIRST: &str = "run `refscan scan` first to produce it";

#[derive(Debug, Serialize, Deserialize)]
struct FilteredRow {
    hash: String,
    author: String,
    timestamp: String,
    message: Option<String>,
    is_refactoring: Option<String>,
}

impl FilteredRow {
    fn from_tagged(tagged: &TaggedCommit) -> Self {
        Self {
            hash: tagged.record.hash.clone(),
            author: tagged.record.author.clone(),
            timestamp: tagged.record.timestamp.clone(),
            message: tagged.record.message.clone(),
            is_refactoring: Some(tagged.is_refactoring.to_string()),
        }
    }

    fn into_tagged(self) -> TaggedCommit {
        let is_refactoring = self
            .is_refactoring
            .as_deref()
            .map(|v| v.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(true);
        TaggedCommit {
            record: CommitRecord {
                hash: self.hash,
                author: self.author,
                timestamp: self.timestamp,
                message: self.message.filter(|m| !m.is_empty()),
            },
            is_refactoring,
        }
    }
}

fn ensure_exists(path: &Path, hint: &str) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(RefscanError::missing_input(path, hint))
    }
}

/// Load the headerless full dataset from `path`.
pub fn load_commits(path: &Path) -> Result<LoadReport<CommitRecord>> {
    ensure_exists(path, "export the commit history to this file first")?;
    let file = std::fs::File::open(path)?;
    let report = read_commits(file)?;
    log_load(path, report.records.len(), report.skipped_rows);
    Ok(report)
}

pub fn read_commits<R: Read>(reader: R) -> Result<LoadReport<CommitRecord>> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut report = LoadReport::default();
    for result in rdr.records() {
        let row = match result {
            Ok(row) => row,
            Err(e) if is_row_error(&e) => {
                report.skipped_rows += 1;
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        match commit_from_row(&row) {
            Some(record) => report.records.push(record),
            None => report.skipped_rows += 1,
        }
    }
    Ok(report)
}

fn commit_from_row(row: &StringRecord) -> Option<CommitRecord> {
    if row.len() < 3 || row.len() > 4 {
        return None;
    }
    let message = row.get(3).filter(|m| !m.is_empty()).map(str::to_string);
    Some(CommitRecord {
        hash: row.get(0)?.to_string(),
        author: row.get(1)?.to_string(),
        timestamp: row.get(2)?.to_string(),
        message,
    })
}

/// Load the filtered dataset written by [`write_filtered`].
pub fn load_filtered(path: &Path) -> Result<LoadReport<TaggedCommit>> {
    ensure_exists(path, RUN_SCAN_FIRST)?;
    let file = std::fs::File::open(path)?;
    let report = read_filtered(file)?;
    log_load(path, report.records.len(), report.skipped_rows);
    Ok(report)
}

pub fn read_filtered<R: Read>(reader: R) -> Result<LoadReport<TaggedCommit>> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    for required in ["hash", "author", "timestamp", "message"] {
        if !headers.iter().any(|h| h == required) {
            return Err(RefscanError::Parse(format!(
                "filtered dataset is missing the '{required}' column"
            )));
        }
    }

    let mut report = LoadReport::default();
    let mut row = StringRecord::new();
    loop {
        match rdr.read_record(&mut row) {
            Ok(false) => break,
            Ok(true) => {}
            Err(e) if is_row_error(&e) => {
                report.skipped_rows += 1;
                continue;
            }
            Err(e) => return Err(e.into()),
        }
        if row.len() != headers.len() {
            report.skipped_rows += 1;
            continue;
        }
        match row.deserialize::<FilteredRow>(Some(&headers)) {
            Ok(parsed) => report.records.push(parsed.into_tagged()),
            Err(_) => report.skipped_rows += 1,
        }
    }
    Ok(report)
}

/// Write the refactoring subset of `tagged` to `path`, with a header row.
/// Returns how many rows were written.
pub fn write_filtered(path: &Path, tagged: &[TaggedCommit]) -> Result<usize> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(path)?;
    let written = write_refactoring_rows(file, tagged)?;
    tracing::info!(path = %path.display(), rows = written, "wrote filtered dataset");
    Ok(written)
}

pub fn write_refactoring_rows<W: Write>(writer: W, tagged: &[TaggedCommit]) -> Result<usize> {
    let mut wtr = WriterBuilder::new().delimiter(DELIMITER).from_writer(writer);
    let mut written = 0;
    for commit in tagged.iter().filter(|t| t.is_refactoring) {
        wtr.serialize(FilteredRow::from_tagged(commit))?;
        written += 1;
    }
    if written == 0 {
        wtr.write_record(["hash", "author", "timestamp", "message", "is_refactoring"])?;
    }
    wtr.flush()?;
    Ok(written)
}

fn is_row_error(err: &csv::Error) -> bool {
    matches!(
        err.kind(),
        ErrorKind::Utf8 { .. } | ErrorKind::UnequalLengths { .. } | ErrorKind::Deserialize { .. }
    )
}

fn log_load(path: &Path, loaded: usize, skipped: usize) {
    if skipped > 0 {
        tracing::warn!(
            path = %path.display(),
            skipped,
            "skipped malformed rows; statistics may be less precise"
        );
    }
    tracing::info!(path = %path.display(), loaded, "loaded dataset");
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn reads_headerless_rows() {
        let data = "abc;Ann;2020-01-01 10:00:00 +0000;Fix typo\n\
                    def;Bob;2021-02-03 11:00:00 +0000;\"Add a; b\"\n";
        let report = read_commits(data.as_bytes()).unwrap();
        assert_eq!(report.skipped_rows, 0);
        assert_eq!(
            report.records,
            vec![
                CommitRecord::new("abc", "Ann", "2020-01-01 10:00:00 +0000", Some("Fix typo")),
                CommitRecord::new("def", "Bob", "2021-02-03 11:00:00 +0000", Some("Add a; b")),
            ]
        );
    }

    #[test]
    fn skips_and_counts_ragged_rows() {
        let data = "a;Ann;2020-01-01;msg\n\
                    b;Bob;2020-01-02;too;many;fields\n\
                    c;Cid\n\
                    d;Dee;2020-01-03\n";
        let report = read_commits(data.as_bytes()).unwrap();
        assert_eq!(report.skipped_rows, 2);
        let hashes: Vec<_> = report.records.iter().map(|r| r.hash.as_str()).collect();
        assert_eq!(hashes, vec!["a", "d"]);
        assert_eq!(report.records[1].message, None);
    }

    #[test]
    fn empty_message_is_absent() {
        let report = read_commits("a;Ann;2020-01-01;\n".as_bytes()).unwrap();
        assert_eq!(report.records[0].message, None);
    }

    #[test]
    fn invalid_utf8_rows_are_skipped() {
        let mut data = b"a;Ann;2020-01-01;ok\n".to_vec();
        data.extend_from_slice(b"b;Bob;2020-01-02;bad \xff byte\n");
        let report = read_commits(data.as_slice()).unwrap();
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.skipped_rows, 1);
    }

    #[test]
    fn filtered_round_trip_keeps_only_refactoring_rows() {
        let tagged = vec![
            TaggedCommit {
                record: CommitRecord::new("a", "Ann", "2020-01-01", Some("cleanup; more")),
                is_refactoring: true,
            },
            TaggedCommit {
                record: CommitRecord::new("b", "Bob", "2020-01-02", Some("feature")),
                is_refactoring: false,
            },
        ];
        let mut buf = Vec::new();
        assert_eq!(write_refactoring_rows(&mut buf, &tagged).unwrap(), 1);

        let text = String::from_utf8(buf.clone()).unwrap();
        assert!(text.starts_with("hash;author;timestamp;message;is_refactoring\n"));

        let report = read_filtered(buf.as_slice()).unwrap();
        assert_eq!(report.skipped_rows, 0);
        assert_eq!(report.records, vec![tagged[0].clone()]);
    }

    #[test]
    fn empty_subset_still_writes_header() {
        let mut buf = Vec::new();
        assert_eq!(write_refactoring_rows(&mut buf, &[]).unwrap(), 0);
        let report = read_filtered(buf.as_slice()).unwrap();
        assert!(report.records.is_empty());
    }

    #[test]
    fn filtered_rows_with_wrong_width_are_skipped() {
        let data = "hash;author;timestamp;message;is_refactoring\n\
                    a;Ann;2020-01-01;lint;True\n\
                    b;Bob;2020-01-02\n";
        let report = read_filtered(data.as_bytes()).unwrap();
        assert_eq!(report.records.len(), 1);
        assert!(report.records[0].is_refactoring);
        assert_eq!(report.skipped_rows, 1);
    }

    #[test]
    fn filtered_file_without_required_columns_is_rejected() {
        let err = read_filtered("id;who\n1;2\n".as_bytes()).unwrap_err();
        assert!(matches!(err, RefscanError::Parse(_)));
    }

    #[test]
    fn missing_files_are_reported_distinctly() {
        let dir = tempdir().unwrap();
        let err = load_filtered(&dir.path().join("commit_refactoring.csv")).unwrap_err();
        assert!(err.is_missing_input());
        assert!(err.to_string().contains("refscan scan"));

        let err = load_commits(&dir.path().join("commits.csv")).unwrap_err();
        assert!(err.is_missing_input());
    }

    #[test]
    fn write_filtered_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out").join("filtered.csv");
        let tagged = vec![TaggedCommit {
            record: CommitRecord::new("a", "Ann", "2020-01-01", Some("typo")),
            is_refactoring: true,
        }];
        assert_eq!(write_filtered(&path, &tagged).unwrap(), 1);
        assert_eq!(load_filtered(&path).unwrap().records, tagged);
    }
}
