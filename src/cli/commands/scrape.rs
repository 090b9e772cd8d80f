//! jobsift scrape - Harvest category pages into the record table

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{
    HumanLayout, OutputFormat, emit_human, emit_json, robot_ok, robot_partial,
};
use crate::error::Result;
use crate::fetch::{CategoryCount, HarvestFailure};

#[derive(Args, Debug)]
pub struct ScrapeArgs {
    /// Also write the harvested table to this path
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

#[derive(Serialize)]
struct ScrapeSummary<'a> {
    path: String,
    stored: usize,
    harvested: usize,
    counts: &'a [CategoryCount],
    failures: &'a [HarvestFailure],
}

pub fn run(ctx: &AppContext, args: &ScrapeArgs) -> Result<()> {
    let report = ctx.refresh()?;
    let store = ctx.store();

    if let Some(path) = &args.output {
        store.save(path)?;
    }

    let summary = ScrapeSummary {
        path: ctx.data_path.display().to_string(),
        stored: store.len(),
        harvested: report.records.len(),
        counts: &report.counts,
        failures: &report.failures,
    };

    match ctx.output_format {
        OutputFormat::Json | OutputFormat::Jsonl => {
            if report.failures.is_empty() {
                emit_json(&robot_ok(&summary))
            } else {
                let warnings = report
                    .failures
                    .iter()
                    .map(|failure| format!("{}: {}", failure.category, failure.reason))
                    .collect();
                emit_json(&robot_partial(&summary, report.counts.len(), warnings))
            }
        }
        OutputFormat::Plain => {
            for count in &report.counts {
                println!("{}\t{}", count.category, count.records);
            }
            for failure in &report.failures {
                println!("{}\tfailed\t{}", failure.category, failure.reason);
            }
            Ok(())
        }
        OutputFormat::Human => {
            let mut layout = HumanLayout::new();
            layout
                .title("Scrape")
                .kv("Table", &summary.path)
                .kv("Harvested", &summary.harvested.to_string())
                .kv("Stored", &summary.stored.to_string());
            if !report.counts.is_empty() {
                layout.blank().section("Categories");
                for count in &report.counts {
                    layout.bullet(&format!("{}: {} record(s)", count.category, count.records));
                }
            }
            if !report.failures.is_empty() {
                layout.blank().section("Failed");
                for failure in &report.failures {
                    layout.bullet(&format!("{}: {}", failure.category, failure.reason));
                }
            }
            emit_human(layout);
            Ok(())
        }
    }
}
