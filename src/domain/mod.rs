//! Entity records mirroring the Data API schema, plus field metadata.

mod fields;
mod folder;
mod item;
mod item_type;
mod note;
mod nullable;
mod resource;
mod tag;

use serde::Serialize;
use serde::de::DeserializeOwned;

pub use fields::{EntityKind, FieldKind, FieldSelection, FieldSpec, UnknownFieldError};
pub use folder::{Folder, NewFolder};
pub use item::{Event, EventBatch, Item};
pub use item_type::{ItemType, ParseItemTypeError};
pub use note::{Note, NoteUpdate};
pub use resource::Resource;
pub use tag::{DuplicateTitle, Tag, find_duplicate_titles};

/// A record the service returns, addressable by ID.
pub trait Entity: Serialize + DeserializeOwned {
    /// Which field table describes this record.
    const KIND: EntityKind;
}
