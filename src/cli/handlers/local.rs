//! Commands answered without contacting the application.

use anyhow::Result;
use clap::CommandFactory;
use serde_json::json;
use std::io::Write;

use crate::cli::output::{Output, OutputFormat};
use crate::cli::{Cli, CompletionsArgs, ItemTypesArgs};
use crate::domain::ItemType;

pub fn handle_item_types(args: &ItemTypesArgs, out: &mut dyn Write) -> Result<()> {
    match args.format {
        OutputFormat::Human => {
            for item_type in ItemType::ALL {
                writeln!(out, "{item_type}")?;
            }
        }
        OutputFormat::Json => {
            let types: Vec<_> = ItemType::ALL
                .iter()
                .map(|t| json!({ "name": t.as_str(), "code": t.code() }))
                .collect();
            Output::new(types).write_to(out)?;
        }
    }
    Ok(())
}

pub fn handle_completions(args: &CompletionsArgs, out: &mut dyn Write) -> Result<()> {
    clap_complete::generate(args.shell, &mut Cli::command(), "joplink", out);
    Ok(())
}
