//! Create and delete command handlers.

use anyhow::{Context, Result, bail};
use log::warn;
use std::io::Write;

use super::describe;
use crate::api::{ApiResult, Session, Transport};
use crate::cli::{CreateCommand, DeleteArgs, DeleteCommand};

pub fn handle_create<T: Transport>(
    cmd: &CreateCommand,
    session: &Session<T>,
    out: &mut dyn Write,
) -> Result<()> {
    match cmd {
        CreateCommand::Tag(args) => {
            let tag = session
                .create_tag(&args.title)
                .with_context(|| format!("failed to create tag '{}'", args.title))?;
            writeln!(out, "Created tag '{}' with ID '{}'", args.title, tag.id)?;
        }
        CreateCommand::Folder(args) => {
            let folder = session
                .create_folder(&args.title, args.parent.as_deref())
                .with_context(|| format!("failed to create folder '{}'", args.title))?;
            writeln!(out, "Created folder '{}' with ID '{}'", args.title, folder.id)?;
        }
    }
    Ok(())
}

pub fn handle_delete<T: Transport>(
    cmd: &DeleteCommand,
    session: &Session<T>,
    out: &mut dyn Write,
) -> Result<()> {
    match cmd {
        DeleteCommand::Tags(args) => delete_each(args, "tag", out, |id| session.delete_tag(id)),
        DeleteCommand::Folders(args) => {
            delete_each(args, "folder", out, |id| session.delete_folder(id))
        }
    }
}

/// Deletes every ID, reporting each outcome; one failure never stops the rest.
fn delete_each<F>(args: &DeleteArgs, what: &str, out: &mut dyn Write, delete: F) -> Result<()>
where
    F: Fn(&str) -> ApiResult<()>,
{
    let mut failed = 0;

    for id in &args.ids {
        match delete(id) {
            Ok(()) => writeln!(out, "Deleted {what} with ID '{id}'")?,
            Err(err) if err.is_not_found() => {
                failed += 1;
                writeln!(out, "Could not find {what} with ID '{id}'")?;
            }
            Err(err) => {
                failed += 1;
                warn!("event=delete_failed what={what} id={id} error={}", describe(&err));
                writeln!(out, "Could not delete {what} with ID '{id}': {}", describe(&err))?;
            }
        }
    }

    if failed > 0 {
        bail!("{failed} of {} {what}(s) could not be deleted", args.ids.len());
    }
    Ok(())
}
