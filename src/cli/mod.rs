//! CLI command definitions and handlers

pub mod config;
pub mod handlers;
pub mod logging;
pub mod output;
pub mod render;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::domain::ItemType;
use output::OutputFormat;

/// joplink - command-line client for a note application's local Data API
#[derive(Parser, Debug)]
#[command(name = "joplink", version, about, long_about = None)]
pub struct Cli {
    /// Settings file (default: ~/.config/joplink/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Use this port instead of scanning 41184-41194
    #[arg(long, global = true)]
    pub port: Option<u16>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List tags, notes, folders or resources
    #[command(subcommand)]
    List(ListCommand),

    /// Show a note with its tags and body
    Show(ShowArgs),

    /// Full-text search
    Search(SearchArgs),

    /// Create a tag or folder
    #[command(subcommand)]
    Create(CreateCommand),

    /// Delete tags or folders
    #[command(subcommand)]
    Delete(DeleteCommand),

    /// Add a tag to a note
    Tag(TagArgs),

    /// Remove a tag from a note
    Untag(TagArgs),

    /// Show or set a note's author
    Author(AuthorArgs),

    /// Move a note into another folder
    Move(MoveArgs),

    /// Change a note's title
    Rename(RenameArgs),

    /// Print one batch of the change feed
    Events(EventsArgs),

    /// List known item type names
    ItemTypes(ItemTypesArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

impl Command {
    /// Whether the command talks to the application at all.
    pub fn needs_connection(&self) -> bool {
        !matches!(self, Command::ItemTypes(_) | Command::Completions(_))
    }
}

/// Options shared by listing commands.
#[derive(Args, Debug, Clone, Default)]
pub struct ListOptions {
    /// Order by the given field (passed to the application as-is)
    #[arg(long)]
    pub order_by: Option<String>,

    /// Order direction: ASC or DESC
    #[arg(long)]
    pub order_dir: Option<String>,

    /// Comma-separated fields to request and show
    #[arg(long)]
    pub fields: Option<String>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

#[derive(Subcommand, Debug)]
pub enum ListCommand {
    /// List tags
    Tags(ListTagsArgs),

    /// List notes
    Notes(ListNotesArgs),

    /// List folders
    Folders(ListIdsArgs),

    /// List resources
    Resources(ListIdsArgs),
}

/// Arguments for `list tags`
#[derive(Parser, Debug)]
pub struct ListTagsArgs {
    /// Tag IDs to look up (all tags when omitted)
    pub ids: Vec<String>,

    /// Only print titles used by more than one tag
    #[arg(long, conflicts_with = "ids")]
    pub duplicates_only: bool,

    #[command(flatten)]
    pub options: ListOptions,
}

/// How `list notes` interprets its IDs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum NotesBy {
    /// IDs are note IDs
    #[default]
    Id,
    /// IDs are tag IDs; list the notes carrying each tag
    Tag,
    /// IDs are folder IDs; list the notes in each folder
    Folder,
}

/// Arguments for `list notes`
#[derive(Parser, Debug)]
pub struct ListNotesArgs {
    /// Note, tag or folder IDs depending on --by (all notes when omitted)
    pub ids: Vec<String>,

    /// What the IDs refer to
    #[arg(long, value_enum, default_value_t = NotesBy::Id)]
    pub by: NotesBy,

    #[command(flatten)]
    pub options: ListOptions,
}

/// Arguments for `list folders` and `list resources`
#[derive(Parser, Debug)]
pub struct ListIdsArgs {
    /// IDs to look up (everything when omitted)
    pub ids: Vec<String>,

    #[command(flatten)]
    pub options: ListOptions,
}

/// Arguments for the `show` command
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Note ID
    pub id: String,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `search` command
#[derive(Parser, Debug)]
pub struct SearchArgs {
    /// Search query
    pub query: String,

    /// Restrict results to one item type (see `item-types`)
    #[arg(long = "type")]
    pub item_type: Option<ItemType>,

    /// Comma-separated fields to request and show
    #[arg(long)]
    pub fields: Option<String>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

#[derive(Subcommand, Debug)]
pub enum CreateCommand {
    /// Create a tag
    Tag(CreateTagArgs),

    /// Create a folder
    Folder(CreateFolderArgs),
}

/// Arguments for `create tag`
#[derive(Parser, Debug)]
pub struct CreateTagArgs {
    /// Title of the new tag
    pub title: String,
}

/// Arguments for `create folder`
#[derive(Parser, Debug)]
pub struct CreateFolderArgs {
    /// Title of the new folder
    pub title: String,

    /// Parent folder ID
    #[arg(long)]
    pub parent: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum DeleteCommand {
    /// Delete tags
    Tags(DeleteArgs),

    /// Delete folders
    Folders(DeleteArgs),
}

/// Arguments for `delete tags` and `delete folders`
#[derive(Parser, Debug)]
pub struct DeleteArgs {
    /// IDs to delete
    #[arg(required = true)]
    pub ids: Vec<String>,
}

/// Arguments for the `tag` and `untag` commands
#[derive(Parser, Debug)]
pub struct TagArgs {
    /// Note ID
    pub note: String,

    /// Tag ID
    pub tag: String,
}

/// Arguments for the `author` command
#[derive(Parser, Debug)]
pub struct AuthorArgs {
    /// Note ID
    pub note: String,

    /// New author (prints the current one when omitted)
    pub value: Option<String>,
}

/// Arguments for the `move` command
#[derive(Parser, Debug)]
pub struct MoveArgs {
    /// Note ID
    pub note: String,

    /// Destination folder ID
    pub folder: String,
}

/// Arguments for the `rename` command
#[derive(Parser, Debug)]
pub struct RenameArgs {
    /// Note ID
    pub note: String,

    /// New title
    pub title: String,
}

/// Arguments for the `events` command
#[derive(Parser, Debug)]
pub struct EventsArgs {
    /// Resume after this cursor (from the start when omitted)
    #[arg(long)]
    pub cursor: Option<String>,

    /// Comma-separated fields to show
    #[arg(long)]
    pub fields: Option<String>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `item-types` command
#[derive(Parser, Debug)]
pub struct ItemTypesArgs {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
