use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::patterns::PatternCategory;

#[derive(Parser, Debug)]
#[command(name = "icpscore")]
#[command(about = "Rule-based ICP scoring for advertiser tables", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    /// Only print errors; hide progress and summaries
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// ASCII tables, no colors
    #[arg(long, global = true)]
    pub plain: bool,

    /// Configuration file (skips discovery)
    #[arg(long, global = true, env = "ICPSCORE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Number of worker threads (0 = all cores)
    #[arg(short = 'j', long = "jobs", default_value = "0", global = true)]
    pub jobs: usize,

    #[command(subcommand)]
    pub command: Commands,
}

/// Flags shared by every scoring stage.
#[derive(Args, Debug, Clone, Default)]
pub struct StageOptions {
    /// Print the top N rows after scoring
    #[arg(long = "top", visible_alias = "head")]
    pub top: Option<usize>,

    /// Write a JSON run summary to this path
    #[arg(long)]
    pub summary: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score urgency and rank advertisers
    Urgency {
        /// Money-scored input table [default: <data_dir>/m3_money_scored.csv]
        input: Option<PathBuf>,

        /// Output table [default: <data_dir>/m4_urgency_scored.csv]
        output: Option<PathBuf>,

        #[command(flatten)]
        options: StageOptions,
    },

    /// Score explicit and implicit fit
    Fit {
        /// Urgency-scored input table [default: <data_dir>/m4_urgency_scored.csv]
        input: Option<PathBuf>,

        /// Output table [default: <data_dir>/m5_fit_scored.csv]
        output: Option<PathBuf>,

        #[command(flatten)]
        options: StageOptions,
    },

    /// Tag each advertiser with a vertical
    Vertical {
        /// Fit-scored input table [default: <data_dir>/m5_fit_scored.csv]
        input: Option<PathBuf>,

        /// Output table [default: <data_dir>/m6_vertical_tagged.csv]
        output: Option<PathBuf>,

        #[command(flatten)]
        options: StageOptions,
    },

    /// Run urgency, fit and vertical in order
    Run {
        /// Directory holding the stage tables (overrides paths.data_dir)
        #[arg(long = "data-dir")]
        data_dir: Option<PathBuf>,

        #[command(flatten)]
        options: StageOptions,
    },

    /// Show which patterns match a piece of ad copy
    Explain {
        /// Ad text to analyze
        text: String,

        /// Page category, for regulated-domain and vertical checks
        #[arg(long = "page-category")]
        page_category: Option<String>,

        /// Only show this pattern category
        #[arg(long, value_enum)]
        category: Option<PatternCategory>,
    },

    /// List the compiled pattern catalog
    Patterns {
        /// Only list this pattern category
        #[arg(long, value_enum)]
        category: Option<PatternCategory>,
    },

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

/// Parse CLI arguments using Clap
pub fn parse_args() -> Cli {
    Cli::parse()
}
