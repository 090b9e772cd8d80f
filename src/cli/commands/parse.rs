//! jobsift parse - Parse a saved listing page

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use tracing::debug;

use crate::cli::output::{HumanLayout, OutputFormat, emit_human, emit_json, emit_jsonl, robot_ok};
use crate::core::record::{Category, JobRecord};
use crate::error::Result;
use crate::import::{ListingParser, ParseSummary, lines_from_html, lines_from_text};

#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Page dump: one text line per entry, or HTML with --html
    pub file: PathBuf,

    /// Tag every record with this category
    #[arg(long, short)]
    pub category: Option<Category>,

    /// Treat the input as HTML and flatten it first
    #[arg(long)]
    pub html: bool,
}

#[derive(Serialize)]
struct ParseOutput<'a> {
    summary: ParseSummary,
    records: &'a [JobRecord],
}

pub fn run(format: OutputFormat, args: &ParseArgs) -> Result<()> {
    let raw = std::fs::read_to_string(&args.file)?;
    let html = args.html
        || args
            .file
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"));
    let lines = if html {
        lines_from_html(&raw)
    } else {
        lines_from_text(&raw)
    };
    debug!(file = %args.file.display(), html, lines = lines.len(), "page loaded");

    let (mut records, summary) = ListingParser::new().parse_with_summary(&lines);
    if let Some(category) = args.category {
        records = records
            .into_iter()
            .map(|record| record.with_category(category))
            .collect();
    }

    match format {
        OutputFormat::Json => emit_json(&robot_ok(ParseOutput {
            summary,
            records: &records,
        })),
        OutputFormat::Jsonl => emit_jsonl(&records),
        OutputFormat::Plain => {
            for record in &records {
                println!("{}", record.render());
            }
            Ok(())
        }
        OutputFormat::Human => {
            let mut layout = HumanLayout::new();
            layout
                .title(&format!("Parsed {}", args.file.display()))
                .kv("Lines", &summary.lines.to_string())
                .kv("Records", &summary.records.to_string())
                .kv("No details", &summary.without_details.to_string());
            if !records.is_empty() {
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
