//! Command handlers for the CLI.
//!
//! Handlers are generic over the transport and write to a caller-supplied
//! sink, so tests drive them with a scripted transport and a byte buffer.

mod edit;
mod events;
mod list;
mod local;
mod manage;
mod search;
mod show;


use anyhow::{Result, bail};
use log::warn;
use serde::Serialize;
use serde_json::{Value, json};
use std::io::Write;

use super::output::{Output, OutputFormat};
use super::render;
use super::{Command, ListCommand, ListOptions};
use crate::api::{ApiError, FetchResult, ListQuery, PartialFetch, Session, SortOrder, Transport};
use crate::domain::{EntityKind, FieldSelection, UnknownFieldError};

// Re-export public items
pub use edit::{handle_author, handle_move, handle_rename, handle_tag, handle_untag};
pub use events::handle_events;
pub use list::handle_list;
pub use local::{handle_completions, handle_item_types};
pub use manage::{handle_create, handle_delete};
pub use search::handle_search;
pub use show::handle_show;

/// Rejects unknown `--fields` names before anything is sent.
pub fn validate(command: &Command) -> Result<(), UnknownFieldError> {
    let (kind, fields) = match command {
        Command::List(ListCommand::Tags(args)) => (EntityKind::Tag, &args.options.fields),
        Command::List(ListCommand::Notes(args)) => (EntityKind::Note, &args.options.fields),
        Command::List(ListCommand::Folders(args)) => (EntityKind::Folder, &args.options.fields),
        Command::List(ListCommand::Resources(args)) => {
            (EntityKind::Resource, &args.options.fields)
        }
        Command::Search(args) => (EntityKind::Item, &args.fields),
        Command::Events(args) => (EntityKind::Event, &args.fields),
        _ => return Ok(()),
    };
    FieldSelection::from_option(kind, fields.as_deref()).map(|_| ())
}

/// Runs a command that needs a session.
///
/// `item-types` and `completions` are answered without one by the caller.
pub fn dispatch<T: Transport>(
    command: &Command,
    session: &Session<T>,
    out: &mut dyn Write,
) -> Result<()> {
    match command {
        Command::List(cmd) => handle_list(cmd, session, out),
        Command::Show(args) => handle_show(args, session, out),
        Command::Search(args) => handle_search(args, session, out),
        Command::Create(cmd) => handle_create(cmd, session, out),
        Command::Delete(cmd) => handle_delete(cmd, session, out),
        Command::Tag(args) => handle_tag(args, session, out),
        Command::Untag(args) => handle_untag(args, session, out),
        Command::Author(args) => handle_author(args, session, out),
        Command::Move(args) => handle_move(args, session, out),
        Command::Rename(args) => handle_rename(args, session, out),
        Command::Events(args) => handle_events(args, session, out),
        Command::ItemTypes(_) | Command::Completions(_) => dispatch_local(command, out),
    }
}

/// Runs a command answered without contacting the application.
pub fn dispatch_local(command: &Command, out: &mut dyn Write) -> Result<()> {
    match command {
        Command::ItemTypes(args) => handle_item_types(args, out),
        Command::Completions(args) => handle_completions(args, out),
        _ => bail!("this command needs a connection to the application"),
    }
}

// ===========================================
// Shared Utilities
// ===========================================

pub(crate) fn selection(kind: EntityKind, fields: Option<&str>) -> Result<FieldSelection> {
    Ok(FieldSelection::from_option(kind, fields)?)
}

pub(crate) fn list_query(selection: &FieldSelection, options: &ListOptions) -> ListQuery {
    ListQuery::new().select(selection).order(SortOrder::new(
        options.order_by.clone(),
        options.order_dir.clone(),
    ))
}

/// One-line reason for a failed per-ID operation.
pub(crate) fn describe(err: &ApiError) -> String {
    match err {
        ApiError::NotFound { what, .. } => format!("{what} not found"),
        ApiError::Status { status, .. } => format!("HTTP {status}"),
        ApiError::Decode { .. } => "malformed response".to_string(),
        other => other.to_string(),
    }
}

/// A table (or JSON array) being written row by row.
///
/// Human output streams rows as they arrive; JSON output is buffered and
/// written by [`Listing::finish`]. Per-ID failures become inline rows and
/// make `finish` return an error once everything else has been printed.
pub(crate) struct Listing<'o> {
    out: &'o mut dyn Write,
    selection: FieldSelection,
    format: OutputFormat,
    rows: Vec<Value>,
    attempted: usize,
    failures: usize,
}

impl<'o> Listing<'o> {
    pub(crate) fn start(
        out: &'o mut dyn Write,
        heading: &str,
        selection: FieldSelection,
        format: OutputFormat,
    ) -> Result<Self> {
        if format == OutputFormat::Human {
            writeln!(out, "{heading}")?;
            writeln!(out, "{}", render::header(&selection))?;
        }
        Ok(Self {
            out,
            selection,
            format,
            rows: Vec::new(),
            attempted: 0,
            failures: 0,
        })
    }

    pub(crate) fn push<E: Serialize>(&mut self, entity: &E) -> Result<()> {
        let value = render::to_value(entity)?;
        match self.format {
            OutputFormat::Human => writeln!(self.out, "{}", render::row(&self.selection, &value))?,
            OutputFormat::Json => self
                .rows
                .push(Value::Object(render::project(&self.selection, &value))),
        }
        Ok(())
    }

    pub(crate) fn extend<E: Serialize>(&mut self, entities: &[E]) -> Result<()> {
        entities.iter().try_for_each(|e| self.push(e))
    }

    /// Records the outcome of looking up one ID.
    pub(crate) fn lookup<E: Serialize>(&mut self, id: &str, result: Result<E, ApiError>) -> Result<()> {
        self.attempted += 1;
        match result {
            Ok(entity) => self.push(&entity),
            Err(err) => self.failure(id, &err),
        }
    }

    /// Records a paged lookup keyed by `id`, keeping rows fetched before a failure.
    pub(crate) fn lookup_all<E: Serialize>(&mut self, id: &str, result: FetchResult<E>) -> Result<()> {
        self.attempted += 1;
        match result {
            Ok(items) => self.extend(&items),
            Err(PartialFetch { items, error }) => {
                self.extend(&items)?;
                self.failure(id, &error)
            }
        }
    }

    fn failure(&mut self, id: &str, err: &ApiError) -> Result<()> {
        warn!("event=lookup_failed id={id} error={}", describe(err));
        self.failures += 1;
        let message = format!("ERROR: {}", describe(err));
        match self.format {
            OutputFormat::Human => writeln!(
                self.out,
                "{}",
                render::error_row(&self.selection, id, &message)
            )?,
            OutputFormat::Json => self.rows.push(json!({ "id": id, "error": describe(err) })),
        }
        Ok(())
    }

    /// Writes buffered output and reports per-ID failures.
    pub(crate) fn finish(self) -> Result<()> {
        if self.format == OutputFormat::Json {
            Output::new(&self.rows).write_to(self.out)?;
        }
        if self.failures > 0 {
            bail!(
                "{} of {} lookup(s) failed",
                self.failures,
                self.attempted
            );
        }
        Ok(())
    }

    /// Prints whatever a full collection walk returned, then its error if any.
    pub(crate) fn finish_fetch<E: Serialize>(mut self, result: FetchResult<E>) -> Result<()> {
        match result {
            Ok(items) => {
                self.extend(&items)?;
                self.finish()
            }
            Err(PartialFetch { items, error }) => {
                let received = items.len();
                self.extend(&items)?;
                self.finish()?;
                Err(stopped_after(error, received))
            }
        }
    }
}

/// Separates a walk's items from the error that cut it short, if any.
pub(crate) fn received<E>(result: FetchResult<E>) -> (Vec<E>, Option<ApiError>) {
    match result {
        Ok(items) => (items, None),
        Err(PartialFetch { items, error }) => (items, Some(error)),
    }
}

/// The error reported once the rows of a cut-short walk are printed.
pub(crate) fn stopped_after(error: ApiError, received: usize) -> anyhow::Error {
    anyhow::Error::new(error).context(format!("listing stopped after {received} row(s)"))
}
