//! jobsift ask - Answer a question from the stored jobs

use clap::Args;
use serde::Serialize;
use tracing::{info, warn};

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, OutputFormat, emit_human, emit_json, robot_ok};
use crate::compose::{ComposeRequest, Composer, ListComposer, ResponseFocus};
use crate::error::Result;
use crate::search::{RankedHit, SearchPipeline};

#[derive(Args, Debug)]
pub struct AskArgs {
    /// Question in plain language
    pub query: String,

    /// Scrape fresh listings before answering
    #[arg(long)]
    pub refresh: bool,

    /// Records handed to the composer (default from config)
    #[arg(long, short)]
    pub limit: Option<usize>,
}

#[derive(Serialize)]
struct AskOutput<'a> {
    query: &'a str,
    focus: Option<ResponseFocus>,
    answer: String,
    /// Whether the answer came from the offline list instead of the model.
    fallback: bool,
    hits: &'a [RankedHit],
}

pub fn run(ctx: &AppContext, args: &AskArgs) -> Result<()> {
    if args.refresh || ctx.store().is_empty() {
        info!(requested = args.refresh, "refreshing record table before answering");
        if let Err(err) = ctx.refresh() {
            warn!(error = %err, "refresh failed; answering from the existing table");
        }
    }

    let store = ctx.store();
    let outcome = SearchPipeline::from_config(&ctx.config.search)
        .with_limits(None, args.limit)
        .run(&store, &args.query);
    let request = ComposeRequest::from_outcome(&outcome);

    let choice = ctx.composer();
    let (answer, fallback) = match choice.composer.compose(&request) {
        Ok(answer) => (answer, choice.fallback),
        Err(err) => {
            warn!(error = %err, "composer failed; answering with plain list");
            (ListComposer.compose(&request)?, true)
        }
    };

    match ctx.output_format {
        OutputFormat::Json | OutputFormat::Jsonl => emit_json(&robot_ok(AskOutput {
            query: &args.query,
            focus: request.focus,
            answer,
            fallback,
            hits: &outcome.hits,
        })),
        OutputFormat::Plain => {
            println!("{answer}");
            Ok(())
        }
        OutputFormat::Human => {
            let mut layout = HumanLayout::new();
            layout.push_line(answer);
            if !outcome.is_empty() {
                layout.blank().section("Matched records");
                for hit in &outcome.hits {
                    layout.bullet(&hit.text);
                }
            }
            emit_human(layout);
            Ok(())
        }
    }
}
