//! Search hits and change events.

use serde::{Deserialize, Serialize};

use super::{Entity, EntityKind};

/// A search hit: the minimal shape shared by every item type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Item {
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub parent_id: String,
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub title: String,
}

impl Entity for Item {
    const KIND: EntityKind = EntityKind::Item;
}

/// An entry of the service's change feed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Event {
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub item_type: i64,
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub item_id: String,
    #[serde(rename = "type", deserialize_with = "super::nullable::null_as_default")]
    pub event_type: i64,
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub created_time: i64,
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub source: i64,
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub before_change_item: String,
}

/// One batch of the change feed.
///
/// Unlike collection pages, the feed is walked with an opaque cursor
/// rather than page numbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventBatch {
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub items: Vec<Event>,
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub has_more: bool,
    #[serde(deserialize_with = "super::nullable::null_as_default")]
    pub cursor: String,
}
