//! List command handlers.

use anyhow::Result;
use std::io::Write;

use super::{Listing, list_query, received, selection, stopped_after};
use crate::api::{Session, Transport};
use crate::cli::output::{Output, OutputFormat};
use crate::cli::{ListCommand, ListIdsArgs, ListNotesArgs, ListTagsArgs, NotesBy};
use crate::domain::{EntityKind, find_duplicate_titles};

pub fn handle_list<T: Transport>(
    cmd: &ListCommand,
    session: &Session<T>,
    out: &mut dyn Write,
) -> Result<()> {
    match cmd {
        ListCommand::Tags(args) => list_tags(args, session, out),
        ListCommand::Notes(args) => list_notes(args, session, out),
        ListCommand::Folders(args) => list_folders(args, session, out),
        ListCommand::Resources(args) => list_resources(args, session, out),
    }
}

fn list_tags<T: Transport>(
    args: &ListTagsArgs,
    session: &Session<T>,
    out: &mut dyn Write,
) -> Result<()> {
    if args.duplicates_only {
        return list_duplicate_tags(args, session, out);
    }

    let selection = selection(EntityKind::Tag, args.options.fields.as_deref())?;
    let query = list_query(&selection, &args.options);
    let fields = selection.to_query();
    let mut listing = Listing::start(out, "Tags:", selection, args.options.format)?;

    if args.ids.is_empty() {
        return listing.finish_fetch(session.tags(&query));
    }

    for id in &args.ids {
        listing.lookup(id, session.tag(id, Some(&fields)))?;
    }
    listing.finish()
}

/// Titles shared by several tags, each followed by every ID using it.
fn list_duplicate_tags<T: Transport>(
    args: &ListTagsArgs,
    session: &Session<T>,
    out: &mut dyn Write,
) -> Result<()> {
    let selection = selection(EntityKind::Tag, Some("id,title"))?;
    let (tags, error) = received(session.tags(&list_query(&selection, &args.options)));
    let duplicates = find_duplicate_titles(&tags);

    match args.options.format {
        OutputFormat::Human => {
            writeln!(out, "Duplicate tags:")?;
            for duplicate in &duplicates {
                writeln!(out, "{}: {}", duplicate.title, duplicate.ids.join(" "))?;
            }
        }
        OutputFormat::Json => Output::new(&duplicates).write_to(out)?,
    }
    match error {
        Some(error) => Err(stopped_after(error, tags.len())),
        None => Ok(()),
    }
}

fn list_notes<T: Transport>(
    args: &ListNotesArgs,
    session: &Session<T>,
    out: &mut dyn Write,
) -> Result<()> {
    let selection = selection(EntityKind::Note, args.options.fields.as_deref())?;
    let query = list_query(&selection, &args.options);
    let fields = selection.to_query();
    let mut listing = Listing::start(out, "Notes:", selection, args.options.format)?;

    if args.ids.is_empty() {
        return listing.finish_fetch(session.notes(&query));
    }

    for id in &args.ids {
        match args.by {
            NotesBy::Id => listing.lookup(id, session.note(id, Some(&fields)))?,
            NotesBy::Tag => listing.lookup_all(id, session.notes_with_tag(id, &query))?,
            NotesBy::Folder => listing.lookup_all(id, session.folder_notes(id, &query))?,
        }
    }
    listing.finish()
}

fn list_folders<T: Transport>(
    args: &ListIdsArgs,
    session: &Session<T>,
    out: &mut dyn Write,
) -> Result<()> {
    let selection = selection(EntityKind::Folder, args.options.fields.as_deref())?;
    let query = list_query(&selection, &args.options);
    let fields = selection.to_query();
    let mut listing = Listing::start(out, "Folders:", selection, args.options.format)?;

    if args.ids.is_empty() {
        return listing.finish_fetch(session.folders(&query));
    }

    for id in &args.ids {
        listing.lookup(id, session.folder(id, Some(&fields)))?;
    }
    listing.finish()
}

fn list_resources<T: Transport>(
    args: &ListIdsArgs,
    session: &Session<T>,
    out: &mut dyn Write,
) -> Result<()> {
    let selection = selection(EntityKind::Resource, args.options.fields.as_deref())?;
    let query = list_query(&selection, &args.options);
    let fields = selection.to_query();
    let mut listing = Listing::start(out, "Resources:", selection, args.options.format)?;

    if args.ids.is_empty() {
        return listing.finish_fetch(session.resources(&query));
    }

    for id in &args.ids {
        listing.lookup(id, session.resource(id, Some(&fields)))?;
    }
    listing.finish()
}
