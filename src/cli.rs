use crate::analysis::Scope;
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "refscan")]
#[command(about = "Commit message analysis tool for refactoring and style statistics")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone)]
pub struct CommonArgs {
    #[arg(long, global = true, default_value = "commits.csv", help = "Full commit dataset (hash;author;timestamp;message, no header)")]
    pub input: PathBuf,

    #[arg(long, global = true, default_value = "commit_refactoring.csv", help = "Filtered dataset written by `scan`")]
    pub filtered: PathBuf,

    #[arg(long, global = true, default_value = ".", help = "Directory for chart images")]
    pub out_dir: PathBuf,

    #[arg(long, global = true, help = "JSON file with `classification` and/or `reporting` keyword lists")]
    pub keywords: Option<PathBuf>,

    #[arg(long, global = true, help = "Skip chart rendering", default_value_t = false)]
    pub no_charts: bool,

    #[arg(short, long, global = true, help = "Enable debug logging", default_value_t = false)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify every commit and write the refactoring subset
    Scan {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output tagged commits as NDJSON")]
        ndjson: bool,

        #[arg(long, default_value_t = 5, help = "Number of example refactoring commits to show")]
        examples: usize,

        #[arg(long, help = "Do not write the filtered dataset")]
        no_save: bool,
    },
    /// Refactoring commits per year
    Timeline {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,

        #[arg(long, value_enum, default_value_t = Scope::Refactoring, help = "Dataset to analyse")]
        scope: Scope,
    },
    /// Most active authors
    Authors {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,

        #[arg(long, default_value_t = 10, help = "Number of authors to list")]
        top: usize,

        #[arg(long, value_enum, default_value_t = Scope::Refactoring, help = "Dataset to analyse")]
        scope: Scope,
    },
    /// How often each reporting keyword appears
    Keywords {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,

        #[arg(long, value_enum, default_value_t = Scope::Refactoring, help = "Dataset to analyse")]
        scope: Scope,
    },
    /// Message length and author coverage, normal vs refactoring
    Compare {
        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
    /// Run timeline, authors, keywords and compare in sequence
    Report {
        #[arg(long, default_value_t = 10, help = "Number of authors to list")]
        top: usize,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        init_tracing(self.common.verbose);

        match self.command {
            Commands::Scan { json, ndjson, examples, no_save } => {
                crate::scan::exec(self.common, json, ndjson, examples, !no_save)
            }
            Commands::Timeline { json, ndjson, scope } => {
                crate::analysis::exec_timeline(&self.common, json, ndjson, scope)
            }
            Commands::Authors { json, ndjson, top, scope } => {
                crate::analysis::exec_authors(&self.common, json, ndjson, top, scope)
            }
            Commands::Keywords { json, ndjson, scope } => {
                crate::analysis::exec_keywords(&self.common, json, ndjson, scope)
            }
            Commands::Compare { json } => crate::analysis::exec_compare(&self.common, json),
            Commands::Report { top } => crate::analysis::exec_report(&self.common, top),
        }
    }
}

/// Logs go to stderr so `--json` output on stdout stays parseable.
fn init_tracing(verbose: bool) {
    let default = if verbose { "refscan=debug" } else { "refscan=warn" };
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .try_init();
}
