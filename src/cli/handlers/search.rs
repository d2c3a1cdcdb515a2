//! Search command handler.

use anyhow::Result;
use log::info;
use std::io::Write;

use super::{Listing, selection};
use crate::api::{SearchQuery, Session, Transport};
use crate::cli::SearchArgs;
use crate::domain::EntityKind;

pub fn handle_search<T: Transport>(
    args: &SearchArgs,
    session: &Session<T>,
    out: &mut dyn Write,
) -> Result<()> {
    let selection = selection(EntityKind::Item, args.fields.as_deref())?;

    let mut query = SearchQuery::new(&args.query).fields(selection.to_query());
    if let Some(item_type) = args.item_type {
        query = query.item_type(item_type);
    }
    info!(
        "event=search type={}",
        args.item_type.map_or("any", |t| t.as_str())
    );

    let listing = Listing::start(out, "Search results:", selection, args.format)?;
    listing.finish_fetch(session.search(&query))
}
