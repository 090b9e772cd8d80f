//! jobsift config - Show the effective configuration

use clap::Args;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{OutputFormat, emit_json, robot_ok};
use crate::config::Config;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Print only where config and data live
    #[arg(long)]
    pub paths: bool,
}

#[derive(Serialize)]
struct ConfigOutput<'a> {
    root: String,
    config_path: String,
    data_path: String,
    composer_key_present: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    config: Option<&'a Config>,
}

pub fn run(ctx: &AppContext, args: &ConfigArgs) -> Result<()> {
    let output = ConfigOutput {
        root: ctx.root.display().to_string(),
        config_path: ctx.config_path.display().to_string(),
        data_path: ctx.data_path.display().to_string(),
        composer_key_present: ctx.config.composer.api_key().is_some(),
        config: (!args.paths).then_some(&ctx.config),
    };

    match ctx.output_format {
        OutputFormat::Json | OutputFormat::Jsonl => emit_json(&robot_ok(output)),
        OutputFormat::Plain | OutputFormat::Human => {
            println!("# root: {}", output.root);
            println!("# config: {}", output.config_path);
            println!("# data: {}", output.data_path);
            if !args.paths {
                print!("{}", ctx.config.to_toml()?);
            }
            Ok(())
        }
    }
}
