//! Show command handler.

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;

use super::received;
use crate::api::{ListQuery, Session, Transport};
use crate::cli::ShowArgs;
use crate::cli::output::{Output, OutputFormat};
use crate::cli::render::format_timestamp;
use crate::domain::{Note, Tag};

#[derive(Debug, Serialize)]
struct TagRef<'a> {
    id: &'a str,
    title: &'a str,
}

#[derive(Debug, Serialize)]
struct NoteDetail<'a> {
    #[serde(flatten)]
    note: &'a Note,
    tags: Vec<TagRef<'a>>,
}

pub fn handle_show<T: Transport>(
    args: &ShowArgs,
    session: &Session<T>,
    out: &mut dyn Write,
) -> Result<()> {
    let note = session
        .note(&args.id, None)
        .with_context(|| format!("failed to fetch note {}", args.id))?;
    let (tags, error) =
        received(session.note_tags(&args.id, &ListQuery::new().fields("id,title")));

    match args.format {
        OutputFormat::Human => print_note(&note, &tags, out)?,
        OutputFormat::Json => {
            let detail = NoteDetail {
                note: &note,
                tags: tags
                    .iter()
                    .map(|t| TagRef {
                        id: &t.id,
                        title: &t.title,
                    })
                    .collect(),
            };
            Output::new(detail).write_to(out)?;
        }
    }
    match error {
        Some(error) => Err(anyhow::Error::new(error).context(format!(
            "tags of note {} stopped after {} tag(s)",
            args.id,
            tags.len()
        ))),
        None => Ok(()),
    }
}

fn print_note(note: &Note, tags: &[Tag], out: &mut dyn Write) -> Result<()> {
    let tag_titles: Vec<&str> = tags.iter().map(|t| t.title.as_str()).collect();

    writeln!(out, "{}", note.title)?;
    writeln!(out)?;
    writeln!(out, "ID:       {}", note.id)?;
    writeln!(out, "Folder:   {}", note.parent_id)?;
    if !note.author.is_empty() {
        writeln!(out, "Author:   {}", note.author)?;
    }
    writeln!(out, "Created:  {}", format_timestamp(note.created_time))?;
    writeln!(out, "Updated:  {}", format_timestamp(note.updated_time))?;
    if !tag_titles.is_empty() {
        writeln!(out, "Tags:     {}", tag_titles.join(", "))?;
    }
    if !note.body.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", note.body.trim_end())?;
    }
    Ok(())
}
