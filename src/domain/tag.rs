//! Tag records and duplicate-title detection.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{Entity, EntityKind};

/// A tag as returned by the Data API.
///
/// Only `id` is guaranteed to be present: the `fields` selector narrows
/// responses, so every other field falls back to its default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tag {
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
    pub is_shared: i64,
    #[serde(rename = "type_", deserialize_with = "super::nullable::null_as_default")]
    pub item_type: i64,
}

impl Entity for Tag {
    const KIND: EntityKind = EntityKind::Tag;
}

/// A title shared by more than one tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateTitle {
    pub title: String,
    pub ids: Vec<String>,
}

/// Groups tags by exact title and keeps the titles used more than once.
///
/// Titles appear in the order they were first seen, and IDs keep the order
/// of `tags`.
pub fn find_duplicate_titles(tags: &[Tag]) -> Vec<DuplicateTitle> {
    let mut groups: Vec<DuplicateTitle> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for tag in tags {
        match positions.get(tag.title.as_str()) {
            Some(&pos) => groups[pos].ids.push(tag.id.clone()),
            None => {
                positions.insert(&tag.title, groups.len());
                groups.push(DuplicateTitle {
                    title: tag.title.clone(),
                    ids: vec![tag.id.clone()],
                });
            }
        }
    }

    groups.retain(|g| g.ids.len() > 1);
    groups
}
