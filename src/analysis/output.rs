use crate::model::{AuthorCount, AuthorCoverage, KeywordCount, LengthComparison, Timeline};
use anyhow::Result;
use console::style;
use serde::Serialize;

pub fn output_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn output_ndjson<T: Serialize>(items: &[T]) -> Result<()> {
    for item in items {
        println!("{}", serde_json::to_string(item)?);
    }
    Ok(())
}

pub fn output_skipped(skipped_rows: usize, label: &str) {
    if skipped_rows > 0 {
        println!(
            "{}",
            style(format!("Skipped {skipped_rows} malformed rows in {label}")).yellow()
        );
    }
}

pub fn output_timeline(timeline: &Timeline) {
    println!("{}", style("Refactoring Commits per Year").bold());
    println!("{}", "─".repeat(30));
    if timeline.years.is_empty() {
        println!("No data to display");
    }
    for bucket in &timeline.years {
        println!("{:<8} {:>8}", bucket.year, style(bucket.commit_count).cyan());
    }
    if timeline.unparsed > 0 {
        println!(
            "{}",
            style(format!("{} commits had unparseable dates", timeline.unparsed)).dim()
        );
    }
}

pub fn output_authors(authors: &[AuthorCount], top: usize) {
    println!("{}", style(format!("Top {top} Authors")).bold());
    println!("{}", "─".repeat(50));
    if authors.is_empty() {
        println!("No data to display");
    }
    for (idx, entry) in authors.iter().enumerate() {
        println!(
            "{:>2}. {:<30} - {:>3} commits",
            idx + 1,
            entry.author,
            style(entry.commit_count).cyan()
        );
    }
}

pub fn output_keywords(keywords: &[KeywordCount]) {
    println!("{}", style("Keyword Frequency").bold());
    println!("{}", "─".repeat(40));
    if keywords.is_empty() {
        println!("No keywords found");
    }
    for entry in keywords {
        println!(
            "  {:<15} - {:>4} occurrences",
            entry.keyword,
            style(entry.occurrences).cyan()
        );
    }
}

fn format_mean(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.1} chars"))
}

pub fn output_compare(lengths: &LengthComparison, authors: &AuthorCoverage) {
    println!("{}", style("Average Message Length").bold());
    println!("{}", "─".repeat(40));
    println!("  Normal commits:      {}", format_mean(lengths.normal_mean));
    println!("  Refactoring commits: {}", format_mean(lengths.refactoring_mean));
    match lengths.difference {
        Some(diff) => println!("  Difference:          {}", style(format!("{diff:+.1} chars")).yellow()),
        None => println!("  Difference:          n/a"),
    }

    println!("\n{}", style("Unique Authors").bold());
    println!("{}", "─".repeat(40));
    println!("  Total:               {}", style(authors.total_authors).cyan());
    println!("  Doing refactoring:   {}", style(authors.refactoring_authors).cyan());
    println!("  Percentage:          {:.1}%", authors.percentage);
}
