//! Note records and the partial update payload.

use serde::{Deserialize, Serialize};

use super::{Entity, EntityKind};

/// A note as returned by the Data API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Note {
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub parent_id: String,
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub body: String,
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub created_time: i64,
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub updated_time: i64,
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub is_conflict: i64,
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub latitude: f64,
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub longitude: f64,
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub altitude: f64,
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub author: String,
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub source_url: String,
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub is_todo: i64,
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub todo_due: i64,
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub todo_completed: i64,
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub source: String,
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub source_application: String,
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub application_data: String,
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub order: f64,
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub user_created_time: i64,
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub user_updated_time: i64,
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub encryption_cipher_text: String,
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub encryption_applied: i64,
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub markup_language: i64,
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub is_shared: i64,
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub share_id: String,
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub conflict_original_id: String,
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub master_key_id: String,
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub body_html: String,
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub base_url: String,
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub image_data_url: String,
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub crop_rect: String,
    #[serde(rename = "type_", deserialize_with = "super::nullable::null_as_default")]
    pub item_type: i64,
}

impl Entity for Note {
    const KIND: EntityKind = EntityKind::Note;
}

/// Fields to change on an existing note.
///
/// Unset fields are left out of the request body, so the service keeps
/// their current values.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NoteUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl NoteUpdate {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn parent(parent_id: impl Into<String>) -> Self {
        Self {
            parent_id: Some(parent_id.into()),
            ..Self::default()
        }
    }

    pub fn author(author: impl Into<String>) -> Self {
        Self {
            author: Some(author.into()),
            ..Self::default()
        }
    }
}
