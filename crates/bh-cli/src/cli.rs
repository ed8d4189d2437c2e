//! Command-line argument definitions.

use std::path::PathBuf;

use clap::Parser;

/// Business hours meal classifier.
///
/// Reads a weekly schedule such as `[["mon_1_open","09:00"],["mon_1_close","22:00"]]`
/// and prints whether it serves breakfast, dinner and supper.
#[derive(Debug, Parser)]
#[command(name = "bh", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Run the built-in example suite and exit.
    #[arg(short, long)]
    pub test: bool,

    /// Read the schedule from a file ("-" for stdin).
    #[arg(short, long, conflicts_with = "schedule")]
    pub file: Option<PathBuf>,

    /// Print the result as JSON.
    #[arg(long)]
    pub json: bool,

    /// Show which weekday ranges satisfied each meal.
    #[arg(long)]
    pub explain: bool,

    /// Schedule as a JSON array of [label, "HH:MM"] pairs.
    ///
    /// Read from stdin when neither this nor --file is given.
    pub schedule: Option<String>,
}

impl Cli {
    /// Output format selected by the flags.
    pub const fn output(&self) -> Output {
        match (self.explain, self.json) {
            (true, true) => Output::ExplainJson,
            (true, false) => Output::Explain,
            (false, true) => Output::Json,
            (false, false) => Output::Text,
        }
    }
}

/// How to render a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    /// `[false, true, true]`
    Text,
    /// `[false,true,true]`
    Json,
    /// One line per meal with the ranges that matched.
    Explain,
    /// The full report as JSON.
    ExplainJson,
}
