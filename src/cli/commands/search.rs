//! jobsift search - Rank and filter stored records

use clap::Args;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, OutputFormat, emit_human, emit_json, emit_jsonl, robot_ok};
use crate::error::Result;
use crate::search::{SearchOutcome, SearchPipeline};

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Free-text query, e.g. "fresher jobs with salary > 30000 in Delhi"
    pub query: String,

    /// Maximum number of results (default from config)
    #[arg(long, short)]
    pub limit: Option<usize>,

    /// Width of the approximate ranking stage (default from config)
    #[arg(long)]
    pub approx: Option<usize>,
}

pub fn run(ctx: &AppContext, args: &SearchArgs) -> Result<()> {
    let store = ctx.store();
    let outcome = SearchPipeline::from_config(&ctx.config.search)
        .with_limits(args.approx, args.limit)
        .run(&store, &args.query);
    display(ctx.output_format, &outcome)
}

pub(crate) fn display(format: OutputFormat, outcome: &SearchOutcome) -> Result<()> {
    match format {
        OutputFormat::Json => emit_json(&robot_ok(outcome)),
        OutputFormat::Jsonl => emit_jsonl(&outcome.hits),
        OutputFormat::Plain => {
            for hit in &outcome.hits {
                println!("{:.1}\t{}", hit.score, hit.text);
            }
            Ok(())
        }
        OutputFormat::Human => {
            let mut layout = HumanLayout::new();
            layout.title(&format!("Results for \"{}\"", outcome.query));
            if let Some(threshold) = outcome.filter.salary_above {
                layout.kv("Salary above", &threshold.to_string());
            }
            if let Some(tier) = outcome.filter.experience {
                layout.kv("Experience", tier.as_str());
            }
            if let Some(location) = &outcome.filter.location {
                layout.kv("Location", location);
            }
            if !outcome.filter.is_empty() {
                layout.blank();
            }
            if outcome.is_empty() {
                layout.push_line("No matching jobs found.");
            } else {
                for (index, hit) in outcome.hits.iter().enumerate() {
                    layout.push_line(format!("{:>2}. [{:5.1}] {}", index + 1, hit.score, hit.text));
                }
            }
            emit_human(layout);
            Ok(())
        }
    }
}
