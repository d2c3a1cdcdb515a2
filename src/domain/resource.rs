//! Attachment (resource) records.

use serde::{Deserialize, Serialize};

use super::{Entity, EntityKind};

/// A resource as returned by the Data API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resource {
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub mime: String,
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub filename: String,
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub created_time: i64,
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub updated_time: i64,
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub user_created_time: i64,
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub user_updated_time: i64,
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub file_extension: String,
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub encryption_cipher_text: String,
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub encryption_applied: i64,
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub encryption_blob_encrypted: i64,
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub size: i64,
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub is_shared: i64,
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub share_id: String,
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub master_key_id: String,
}

impl Entity for Resource {
    const KIND: EntityKind = EntityKind::Resource;
}
