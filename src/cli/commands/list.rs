//! jobsift list - List stored records

use clap::Args;
use serde::Serialize;
use tracing::debug;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, OutputFormat, emit_human, emit_json, emit_jsonl, robot_ok};
use crate::core::record::{Category, JobRecord};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only records tagged with this category
    #[arg(long, short)]
    pub category: Option<Category>,

    /// Maximum number of records to show
    #[arg(long, short = 'n', default_value = "50")]
    pub limit: usize,

    /// Offset for pagination
    #[arg(long, default_value = "0")]
    pub offset: usize,
}

#[derive(Serialize)]
struct ListOutput<'a> {
    total: usize,
    count: usize,
    records: Vec<&'a JobRecord>,
}

pub fn run(ctx: &AppContext, args: &ListArgs) -> Result<()> {
    let store = ctx.store();
    let matching: Vec<&JobRecord> = store
        .iter()
        .filter(|record| {
            args.category
                .is_none_or(|category| record.category == Some(category))
        })
        .collect();
    let total = matching.len();
    let records: Vec<&JobRecord> = matching
        .into_iter()
        .skip(args.offset)
        .take(args.limit)
        .collect();
    debug!(target: "list", total, shown = records.len(), category = ?args.category, "listing records");

    match ctx.output_format {
        OutputFormat::Json => emit_json(&robot_ok(ListOutput {
            total,
            count: records.len(),
            records,
        })),
        OutputFormat::Jsonl => emit_jsonl(records),
        OutputFormat::Plain => {
            // TITLE<TAB>ORGANIZATION<TAB>SALARY<TAB>LOCATION<TAB>CATEGORY
            for record in &records {
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    record.title,
                    record.organization,
                    record.salary,
                    record.location,
                    record.category_label()
                );
            }
            Ok(())
        }
        OutputFormat::Human => {
            let mut layout = HumanLayout::new();
            layout
                .title("Stored jobs")
                .kv("Table", &ctx.data_path.display().to_string())
                .kv("Matching", &total.to_string());
            if records.is_empty() {
                layout.blank().push_line("No records. Run `jobsift scrape` first.");
            } else {
                layout.blank();
                for record in &records {
                    layout.bullet(&record.render());
                }
            }
            emit_human(layout);
            Ok(())
        }
    }
}
