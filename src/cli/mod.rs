//! Command-line surface

use std::path::PathBuf;

use clap::Parser;

pub mod commands;
pub mod output;

pub use commands::Commands;
pub use output::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "jobsift",
    version,
    about = "Scrape job listings into records and answer questions about them"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Machine-readable JSON output on stdout, JSON logs on stderr
    #[arg(long, global = true)]
    pub robot: bool,

    /// Output format for human mode
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all logging
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Explicit config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// `--robot` always wins over `--format`.
    #[must_use]
    pub const fn output_format(&self) -> OutputFormat {
        if self.robot {
            OutputFormat::Json
        } else {
            self.format
        }
    }
}
