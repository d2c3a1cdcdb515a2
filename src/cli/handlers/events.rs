//! Events command handler.

use anyhow::{Context, Result};
use serde_json::{Value, json};
use std::io::Write;

use super::{Listing, selection};
use crate::api::{Session, Transport};
use crate::cli::EventsArgs;
use crate::cli::output::{Output, OutputFormat};
use crate::cli::render;
use crate::domain::EntityKind;

pub fn handle_events<T: Transport>(
    args: &EventsArgs,
    session: &Session<T>,
    out: &mut dyn Write,
) -> Result<()> {
    let selection = selection(EntityKind::Event, args.fields.as_deref())?;
    let batch = session
        .events(args.cursor.as_deref())
        .context("failed to fetch events")?;

    match args.format {
        OutputFormat::Human => {
            let mut listing = Listing::start(&mut *out, "Events:", selection, args.format)?;
            listing.extend(&batch.items)?;
            listing.finish()?;

            writeln!(out)?;
            writeln!(out, "Next cursor: {}", batch.cursor)?;
            if batch.has_more {
                writeln!(out, "More events are available.")?;
            }
        }
        OutputFormat::Json => {
            let mut items = Vec::with_capacity(batch.items.len());
            for event in &batch.items {
                let value = render::to_value(event)?;
                items.push(Value::Object(render::project(&selection, &value)));
            }
            Output::new(json!({
                "items": items,
                "has_more": batch.has_more,
                "cursor": batch.cursor,
            }))
            .write_to(out)?;
        }
    }
    Ok(())
}
