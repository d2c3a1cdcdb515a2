//! Handlers that change a single note: tags, author, folder and title.

use anyhow::{Context, Result};
use std::io::Write;

use crate::api::{Session, Transport};
use crate::cli::{AuthorArgs, MoveArgs, RenameArgs, TagArgs};
use crate::domain::NoteUpdate;

pub fn handle_tag<T: Transport>(
    args: &TagArgs,
    session: &Session<T>,
    out: &mut dyn Write,
) -> Result<()> {
    session
        .add_tag_to_note(&args.tag, &args.note)
        .with_context(|| format!("failed to tag note {} with {}", args.note, args.tag))?;
    writeln!(out, "Tagged note '{}' with tag '{}'", args.note, args.tag)?;
    Ok(())
}

pub fn handle_untag<T: Transport>(
    args: &TagArgs,
    session: &Session<T>,
    out: &mut dyn Write,
) -> Result<()> {
    session
        .remove_tag_from_note(&args.tag, &args.note)
        .with_context(|| format!("failed to remove tag {} from note {}", args.tag, args.note))?;
    writeln!(out, "Removed tag '{}' from note '{}'", args.tag, args.note)?;
    Ok(())
}

pub fn handle_author<T: Transport>(
    args: &AuthorArgs,
    session: &Session<T>,
    out: &mut dyn Write,
) -> Result<()> {
    match &args.value {
        None => {
            let author = session
                .note_author(&args.note)
                .with_context(|| format!("failed to fetch author of note {}", args.note))?;
            if author.is_empty() {
                writeln!(out, "(no author)")?;
            } else {
                writeln!(out, "{author}")?;
            }
        }
        Some(value) => {
            session
                .set_note_author(&args.note, value)
                .with_context(|| format!("failed to set author of note {}", args.note))?;
            writeln!(out, "Set author of note '{}' to '{value}'", args.note)?;
        }
    }
    Ok(())
}

pub fn handle_move<T: Transport>(
    args: &MoveArgs,
    session: &Session<T>,
    out: &mut dyn Write,
) -> Result<()> {
    session
        .update_note(&args.note, &NoteUpdate::parent(&args.folder))
        .with_context(|| format!("failed to move note {}", args.note))?;
    writeln!(out, "Moved note '{}' to folder '{}'", args.note, args.folder)?;
    Ok(())
}

pub fn handle_rename<T: Transport>(
    args: &RenameArgs,
    session: &Session<T>,
    out: &mut dyn Write,
) -> Result<()> {
    session
        .update_note(&args.note, &NoteUpdate::title(&args.title))
        .with_context(|| format!("failed to rename note {}", args.note))?;
    writeln!(out, "Renamed note '{}' to '{}'", args.note, args.title)?;
    Ok(())
}
