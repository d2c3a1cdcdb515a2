//! Folder (notebook) records.

use serde::{Deserialize, Serialize};

use super::{Entity, EntityKind};

/// A folder as returned by the Data API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Folder {
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub parent_id: String,
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub created_time: i64,
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub updated_time: i64,
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub user_created_time: i64,
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub user_updated_time: i64,
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub encryption_cipher_text: String,
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub encryption_applied: i64,
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub encryption_blob_encrypted: i64,
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub is_shared: i64,
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub share_id: String,
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub master_key_id: String,
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub icon: String,
}

impl Entity for Folder {
    const KIND: EntityKind = EntityKind::Folder;
}

/// Body of a folder creation request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewFolder {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}
