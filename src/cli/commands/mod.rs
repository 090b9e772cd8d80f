//! CLI command implementations
//!
//! Each subcommand has its own module with an Args struct and a `run()`.

use clap::Subcommand;

pub mod ask;
pub mod config;
pub mod list;
pub mod parse;
pub mod scrape;
pub mod search;

use crate::app::AppContext;
use crate::error::Result;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch every category page and rebuild the record table
    Scrape(scrape::ScrapeArgs),

    /// Parse a saved listing page into records
    Parse(parse::ParseArgs),

    /// Rank and filter stored records for a query
    Search(search::SearchArgs),

    /// Answer a question about the stored jobs
    Ask(ask::AskArgs),

    /// List stored records
    List(list::ListArgs),

    /// Show the effective configuration
    Config(config::ConfigArgs),
}

/// Dispatch a command to its handler
pub fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Scrape(args) => scrape::run(ctx, args),
        Commands::Parse(args) => parse::run(ctx.output_format, args),
        Commands::Search(args) => search::run(ctx, args),
        Commands::Ask(args) => ask::run(ctx, args),
        Commands::List(args) => list::run(ctx, args),
        Commands::Config(args) => config::run(ctx, args),
    }
}
