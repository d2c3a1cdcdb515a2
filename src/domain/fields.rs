//! Field metadata for every entity kind.
//!
//! One table per kind lists the fields the service exposes, how wide a
//! column they get in tables, and how their values are formatted. The same
//! table validates `--fields` selections and drives the generic renderer.

use std::fmt;
use thiserror::Error;

/// The entity kinds the client reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Tag,
    Note,
    Folder,
    Resource,
    Event,
    Item,
}

impl EntityKind {
    /// Singular name used in messages ("tag", "note", ...).
    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Tag => "tag",
            EntityKind::Note => "note",
            EntityKind::Folder => "folder",
            EntityKind::Resource => "resource",
            EntityKind::Event => "event",
            EntityKind::Item => "item",
        }
    }

    /// All fields known for this kind.
    pub fn fields(self) -> &'static [FieldSpec] {
        match self {
            EntityKind::Tag => TAG_FIELDS,
            EntityKind::Note => NOTE_FIELDS,
            EntityKind::Folder => FOLDER_FIELDS,
            EntityKind::Resource => RESOURCE_FIELDS,
            EntityKind::Event => EVENT_FIELDS,
            EntityKind::Item => ITEM_FIELDS,
        }
    }

    /// Looks up a field by its wire name.
    pub fn field(self, name: &str) -> Option<&'static FieldSpec> {
        self.fields().iter().find(|f| f.name == name)
    }

    /// Fields requested and shown when the caller does not choose.
    pub fn default_fields(self) -> &'static [&'static str] {
        match self {
            EntityKind::Resource => &["id", "title", "mime", "size"],
            EntityKind::Event => &["id", "item_type", "item_id", "type", "created_time"],
            _ => &["id", "parent_id", "title"],
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How a field's value is formatted in a table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Milliseconds since the Unix epoch.
    Timestamp,
    Integer,
    Float,
    /// 0/1 integer shown as yes/no.
    Flag,
}

/// Metadata for one field of one entity kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub header: &'static str,
    pub width: usize,
    pub kind: FieldKind,
}

const fn text(name: &'static str, header: &'static str, width: usize) -> FieldSpec {
    FieldSpec {
        name,
        header,
        width,
        kind: FieldKind::Text,
    }
}

const fn time(name: &'static str, header: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        header,
        width: 16,
        kind: FieldKind::Timestamp,
    }
}

const fn int(name: &'static str, header: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        header,
        width: 10,
        kind: FieldKind::Integer,
    }
}

const fn float(name: &'static str, header: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        header,
        width: 12,
        kind: FieldKind::Float,
    }
}

const fn flag(name: &'static str, header: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        header,
        width: 6,
        kind: FieldKind::Flag,
    }
}

const ID: FieldSpec = text("id", "ID", 32);
const PARENT_ID: FieldSpec = text("parent_id", "Parent ID", 32);
const TITLE: FieldSpec = text("title", "Title", 60);

static TAG_FIELDS: &[FieldSpec] = &[
    ID,
    PARENT_ID,
    TITLE,
    time("created_time", "Created"),
    time("updated_time", "Updated"),
    time("user_created_time", "User Created"),
    time("user_updated_time", "User Updated"),
    text("encryption_cipher_text", "Cipher Text", 32),
    flag("encryption_applied", "Encrypted"),
    flag("is_shared", "Shared"),
];

static NOTE_FIELDS: &[FieldSpec] = &[
    ID,
    PARENT_ID,
    TITLE,
    text("body", "Body", 60),
    time("created_time", "Created"),
    time("updated_time", "Updated"),
    flag("is_conflict", "Conflict"),
    float("latitude", "Latitude"),
    float("longitude", "Longitude"),
    float("altitude", "Altitude"),
    text("author", "Author", 32),
    text("source_url", "Source URL", 32),
    flag("is_todo", "Todo"),
    time("todo_due", "Todo Due"),
    time("todo_completed", "Completed"),
    text("source", "Source", 32),
    text("source_application", "Source App", 32),
    text("application_data", "App Data", 32),
    float("order", "Order"),
    time("user_created_time", "User Created"),
    time("user_updated_time", "User Updated"),
    text("encryption_cipher_text", "Cipher Text", 32),
    flag("encryption_applied", "Encrypted"),
    int("markup_language", "Markup"),
    flag("is_shared", "Shared"),
    text("share_id", "Share ID", 32),
    text("conflict_original_id", "Conflict Original", 32),
    text("master_key_id", "Master Key ID", 32),
    text("body_html", "Body HTML", 32),
    text("base_url", "Base URL", 32),
    text("image_data_url", "Image Data URL", 32),
    text("crop_rect", "Crop Rect", 32),
];

static FOLDER_FIELDS: &[FieldSpec] = &[
    ID,
    PARENT_ID,
    TITLE,
    time("created_time", "Created"),
    time("updated_time", "Updated"),
    time("user_created_time", "User Created"),
    time("user_updated_time", "User Updated"),
    text("encryption_cipher_text", "Cipher Text", 32),
    flag("encryption_applied", "Encrypted"),
    flag("encryption_blob_encrypted", "Blob Encrypted"),
    flag("is_shared", "Shared"),
    text("share_id", "Share ID", 32),
    text("master_key_id", "Master Key ID", 32),
    text("icon", "Icon", 16),
];

static RESOURCE_FIELDS: &[FieldSpec] = &[
    ID,
    TITLE,
    text("mime", "MIME", 24),
    text("filename", "Filename", 32),
    time("created_time", "Created"),
    time("updated_time", "Updated"),
    time("user_created_time", "User Created"),
    time("user_updated_time", "User Updated"),
    text("file_extension", "Ext", 8),
    text("encryption_cipher_text", "Cipher Text", 32),
    flag("encryption_applied", "Encrypted"),
    flag("encryption_blob_encrypted", "Blob Encrypted"),
    int("size", "Size"),
    flag("is_shared", "Shared"),
    text("share_id", "Share ID", 32),
    text("master_key_id", "Master Key ID", 32),
];

static EVENT_FIELDS: &[FieldSpec] = &[
    text("id", "ID", 10),
    int("item_type", "Item Type"),
    text("item_id", "Item ID", 32),
    int("type", "Type"),
    time("created_time", "Created"),
    int("source", "Source"),
    text("before_change_item", "Before Change", 32),
];

static ITEM_FIELDS: &[FieldSpec] = &[ID, PARENT_ID, TITLE];

/// Error returned when a field selection names an unknown field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} field '{name}' (known fields: {known})")]
pub struct UnknownFieldError {
    pub kind: EntityKind,
    pub name: String,
    pub known: String,
}

/// An ordered, validated set of fields for one entity kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSelection {
    fields: Vec<&'static FieldSpec>,
}

impl FieldSelection {
    /// The kind's default selection.
    pub fn defaults(kind: EntityKind) -> Self {
        let fields = kind
            .default_fields()
            .iter()
            .filter_map(|name| kind.field(name))
            .collect();
        Self { fields }
    }

    /// Parses a comma-separated list such as `id,title,updated_time`.
    ///
    /// Whitespace around names is ignored, empty segments are skipped and
    /// repeated names are kept once. An empty list yields the defaults.
    pub fn parse(kind: EntityKind, list: &str) -> Result<Self, UnknownFieldError> {
        let mut fields: Vec<&'static FieldSpec> = Vec::new();

        for name in list.split(',').map(str::trim).filter(|n| !n.is_empty()) {
            let spec = kind.field(name).ok_or_else(|| UnknownFieldError {
                kind,
                name: name.to_string(),
                known: kind
                    .fields()
                    .iter()
                    .map(|f| f.name)
                    .collect::<Vec<_>>()
                    .join(", "),
            })?;
            if !fields.iter().any(|f| f.name == spec.name) {
                fields.push(spec);
            }
        }

        if fields.is_empty() {
            return Ok(Self::defaults(kind));
        }

        Ok(Self { fields })
    }

    /// Parses an optional list, falling back to the defaults.
    pub fn from_option(kind: EntityKind, list: Option<&str>) -> Result<Self, UnknownFieldError> {
        match list {
            Some(list) => Self::parse(kind, list),
            None => Ok(Self::defaults(kind)),
        }
    }

    pub fn fields(&self) -> &[&'static FieldSpec] {
        &self.fields
    }

    /// The value of the `fields` query parameter.
    pub fn to_query(&self) -> String {
        self.fields
            .iter()
            .map(|f| f.name)
            .collect::<Vec<_>>()
            .join(",")
    }
}
