use super::output::{
    output_authors, output_compare, output_json, output_keywords, output_ndjson, output_skipped,
    output_timeline,
};
use super::{author_coverage, bucket_by_time, compare_lengths, keyword_frequency, top_authors, Scope};
use crate::chart::{render_bar_chart, BarChart, ChartStyle, Orientation, KEYWORD_COLOR, NORMAL_COLOR, REFACTORING_COLOR};
use crate::cli::CommonArgs;
use crate::dataset::{load_commits, load_filtered, RUN_SCAN_FIRST};
use crate::error::RefscanError;
use crate::keywords::KeywordConfig;
use crate::model::{
    AuthorsOutput, CommitRecord, CompareOutput, KeywordsOutput, TimelineOutput, SCHEMA_VERSION,
};
use crate::scan::spinner;
use anyhow::Context;
use chrono::Utc;
use std::path::Path;

pub const TIMELINE_CHART: &str = "timeline.png";
pub const AUTHORS_CHART: &str = "top_authors.png";
pub const KEYWORDS_CHART: &str = "keyword_frequency.png";

/// Records of one dataset, with where they came from and what was dropped.
struct ScopedRecords {
    records: Vec<CommitRecord>,
    skipped_rows: usize,
    path: String,
}

fn load_scope(common: &CommonArgs, scope: Scope, quiet: bool) -> anyhow::Result<ScopedRecords> {
    let pb = spinner(!quiet, "Loading commits...");
    let scoped = match scope {
        Scope::Refactoring => {
            let loaded = load_filtered(&common.filtered)
                .with_context(|| format!("Failed to load {}", common.filtered.display()))?;
            ScopedRecords {
                records: loaded.records.into_iter().map(|t| t.record).collect(),
                skipped_rows: loaded.skipped_rows,
                path: common.filtered.to_string_lossy().to_string(),
            }
        }
        Scope::All => {
            let loaded = load_commits(&common.input)
                .with_context(|| format!("Failed to load {}", common.input.display()))?;
            ScopedRecords {
                records: loaded.records,
                skipped_rows: loaded.skipped_rows,
                path: common.input.to_string_lossy().to_string(),
            }
        }
    };
    pb.finish_and_clear();
    Ok(scoped)
}

fn require_filtered(path: &Path) -> anyhow::Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(RefscanError::missing_input(path, RUN_SCAN_FIRST).into())
    }
}

fn scope_label(scope: Scope) -> &'static str {
    match scope {
        Scope::Refactoring => "Refactoring/Style Commits",
        Scope::All => "All Commits",
    }
}

pub fn exec_timeline(common: &CommonArgs, json: bool, ndjson: bool, scope: Scope) -> anyhow::Result<()> {
    let quiet = json || ndjson;
    let data = load_scope(common, scope, quiet)?;
    let timeline = bucket_by_time(&data.records);

    if json {
        output_json(&TimelineOutput {
            version: SCHEMA_VERSION,
            generated_at: Utc::now(),
            input_path: data.path,
            skipped_rows: data.skipped_rows,
            timeline: timeline.clone(),
        })?;
    } else if ndjson {
        output_ndjson(&timeline.years)?;
    } else {
        output_skipped(data.skipped_rows, &data.path);
        output_timeline(&timeline);
    }

    if !common.no_charts {
        let title = format!("{} per Year", scope_label(scope));
        let chart = BarChart {
            title: &title,
            category_desc: "Year",
            value_desc: "Commits",
            bars: timeline
                .years
                .iter()
                .map(|b| (b.year.to_string(), b.commit_count))
                .collect(),
            color: REFACTORING_COLOR,
            orientation: Orientation::Vertical,
        };
        save_chart(common, TIMELINE_CHART, &chart, quiet)?;
    }
    Ok(())
}

pub fn exec_authors(
    common: &CommonArgs,
    json: bool,
    ndjson: bool,
    top: usize,
    scope: Scope,
) -> anyhow::Result<()> {
    let quiet = json || ndjson;
    let data = load_scope(common, scope, quiet)?;
    let authors = top_authors(&data.records, top);

    if json {
        output_json(&AuthorsOutput {
            version: SCHEMA_VERSION,
            generated_at: Utc::now(),
            input_path: data.path,
            skipped_rows: data.skipped_rows,
            top,
            authors: authors.clone(),
        })?;
    } else if ndjson {
        output_ndjson(&authors)?;
    } else {
        output_skipped(data.skipped_rows, &data.path);
        output_authors(&authors, top);
    }

    if !common.no_charts {
        let title = format!("Top {top} Authors of {}", scope_label(scope));
        let chart = BarChart {
            title: &title,
            category_desc: "Author",
            value_desc: "Commits",
            bars: authors
                .iter()
                .map(|a| (a.author.clone(), a.commit_count))
                .collect(),
            color: NORMAL_COLOR,
            orientation: Orientation::Horizontal,
        };
        save_chart(common, AUTHORS_CHART, &chart, quiet)?;
    }
    Ok(())
}

pub fn exec_keywords(common: &CommonArgs, json: bool, ndjson: bool, scope: Scope) -> anyhow::Result<()> {
    let quiet = json || ndjson;
    let keywords = KeywordConfig::load(common.keywords.as_deref())
        .context("Failed to load keyword configuration")?;
    let data = load_scope(common, scope, quiet)?;
    let counts = keyword_frequency(&data.records, &keywords.reporting);

    if json {
        output_json(&KeywordsOutput {
            version: SCHEMA_VERSION,
            generated_at: Utc::now(),
            input_path: data.path,
            skipped_rows: data.skipped_rows,
            keywords: counts.clone(),
        })?;
    } else if ndjson {
        output_ndjson(&counts)?;
    } else {
        output_skipped(data.skipped_rows, &data.path);
        output_keywords(&counts);
    }

    if !common.no_charts {
        let title = format!("Keyword Frequency in {}", scope_label(scope));
        let chart = BarChart {
            title: &title,
            category_desc: "Keyword",
            value_desc: "Occurrences",
            bars: counts
                .iter()
                .map(|c| (c.keyword.clone(), c.occurrences))
                .collect(),
            color: KEYWORD_COLOR,
            orientation: Orientation::Vertical,
        };
        save_chart(common, KEYWORDS_CHART, &chart, quiet)?;
    }
    Ok(())
}

pub fn exec_compare(common: &CommonArgs, json: bool) -> anyhow::Result<()> {
    require_filtered(&common.filtered)?;
    let all = load_scope(common, Scope::All, json)?;
    let refactoring = load_scope(common, Scope::Refactoring, json)?;

    let lengths = compare_lengths(&all.records, &refactoring.records);
    let authors = author_coverage(&all.records, &refactoring.records);

    if json {
        output_json(&CompareOutput {
            version: SCHEMA_VERSION,
            generated_at: Utc::now(),
            input_path: all.path,
            filtered_path: refactoring.path,
            skipped_input_rows: all.skipped_rows,
            skipped_filtered_rows: refactoring.skipped_rows,
            lengths,
            authors,
        })?;
    } else {
        output_skipped(all.skipped_rows, &all.path);
        output_skipped(refactoring.skipped_rows, &refactoring.path);
        output_compare(&lengths, &authors);
    }
    Ok(())
}

/// All secondary analyses over the refactoring subset, then the comparison.
pub fn exec_report(common: &CommonArgs, top: usize) -> anyhow::Result<()> {
    require_filtered(&common.filtered)?;

    println!("{}", "=".repeat(60));
    println!("REFACTORING COMMIT REPORT");
    println!("{}", "=".repeat(60));

    exec_timeline(common, false, false, Scope::Refactoring).context("Timeline analysis failed")?;
    println!();
    exec_authors(common, false, false, top, Scope::Refactoring).context("Author analysis failed")?;
    println!();
    exec_keywords(common, false, false, Scope::Refactoring).context("Keyword analysis failed")?;
    println!();
    exec_compare(common, false).context("Comparison failed")?;

    println!("\nReport complete.");
    Ok(())
}

fn save_chart(common: &CommonArgs, file: &str, chart: &BarChart<'_>, quiet: bool) -> anyhow::Result<()> {
    let path = common.out_dir.join(file);
    render_bar_chart(&path, chart, &ChartStyle::default())
        .with_context(|| format!("Failed to render {}", path.display()))?;
    if !quiet {
        println!("Chart saved: {}", path.display());
    }
    Ok(())
}
