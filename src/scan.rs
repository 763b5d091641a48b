use crate::chart::{render_classification, ChartStyle};
use crate::classify::{classify_all, refactoring_examples};
use crate::cli::CommonArgs;
use crate::dataset::{load_commits, write_filtered};
use crate::keywords::KeywordConfig;
use crate::model::{ClassificationStats, ScanOutput, TaggedCommit, SCHEMA_VERSION};
use crate::util::truncate_chars;
use anyhow::Context;
use chrono::Utc;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

pub const CHART_FILE: &str = "classification.png";

pub fn exec(
    common: CommonArgs,
    json: bool,
    ndjson: bool,
    examples: usize,
    save: bool,
) -> anyhow::Result<()> {
    let keywords = KeywordConfig::load(common.keywords.as_deref())
        .context("Failed to load keyword configuration")?;

    let pb = spinner(!(json || ndjson), "Loading commits...");
    let loaded = load_commits(&common.input)
        .with_context(|| format!("Failed to load {}", common.input.display()))?;
    pb.finish_and_clear();

    let (tagged, stats) = classify_all(&loaded.records, &keywords.classification);
    let sample = refactoring_examples(&tagged, examples);

    if json {
        output_json(&common, loaded.skipped_rows, stats, sample)?;
    } else if ndjson {
        output_ndjson(&tagged)?;
    } else {
        output_summary(&common, loaded.skipped_rows, &stats)?;
        output_examples(&sample, examples);
    }

    if !common.no_charts {
        let path = common.out_dir.join(CHART_FILE);
        render_classification(&path, &stats, &ChartStyle::default())
            .context("Failed to render classification chart")?;
        if !(json || ndjson) {
            println!("Chart saved: {}", style(path.display()).dim());
        }
    }

    if save {
        let written = write_filtered(&common.filtered, &tagged)
            .with_context(|| format!("Failed to write {}", common.filtered.display()))?;
        if !(json || ndjson) {
            println!(
                "Saved {} refactoring commits to {}",
                style(written).cyan(),
                style(common.filtered.display()).dim()
            );
        }
    }

    Ok(())
}

pub(crate) fn spinner(visible: bool, message: &'static str) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message);
    pb
}

fn output_json(
    common: &CommonArgs,
    skipped_rows: usize,
    stats: ClassificationStats,
    examples: Vec<TaggedCommit>,
) -> anyhow::Result<()> {
    let output = ScanOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        input_path: common.input.to_string_lossy().to_string(),
        skipped_rows,
        stats,
        examples,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn output_ndjson(tagged: &[TaggedCommit]) -> anyhow::Result<()> {
    for commit in tagged {
        println!("{}", serde_json::to_string(commit)?);
    }
    Ok(())
}

fn output_summary(
    common: &CommonArgs,
    skipped_rows: usize,
    stats: &ClassificationStats,
) -> anyhow::Result<()> {
    println!("{}", style("Classification Summary").bold());
    println!("{}", "─".repeat(60));
    println!("Input: {}", style(common.input.display()).dim());
    println!("Total commits analysed: {}", style(stats.total).cyan());
    println!(
        "Refactoring/style commits: {} ({:.2}%)",
        style(stats.refactoring).red(),
        stats.percentage
    );
    println!(
        "Normal commits: {} ({:.2}%)",
        style(stats.normal).blue(),
        stats.normal_percentage()
    );
    if skipped_rows > 0 {
        println!(
            "{}",
            style(format!("Skipped {skipped_rows} malformed rows")).yellow()
        );
    }
    println!("{}", "─".repeat(60));
    Ok(())
}

fn output_examples(sample: &[TaggedCommit], requested: usize) {
    if requested == 0 {
        return;
    }
    if sample.is_empty() {
        println!("\nNo refactoring commits found.");
        return;
    }

    println!(
        "\n{}",
        style(format!("Example refactoring/style commits (first {requested})")).bold()
    );
    println!("{}", "─".repeat(80));
    for commit in sample {
        let record = &commit.record;
        println!("\n Hash: {}", style(record.short_hash()).yellow());
        println!("   Author: {}", record.author);
        println!("   Date: {}", record.timestamp);
        println!(
            "   Message: {}",
            truncate_chars(record.message().unwrap_or_default(), 100)
        );
    }
    println!();
}
