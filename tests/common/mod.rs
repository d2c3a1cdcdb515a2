//! Shared utilities for integration tests.

pub mod harness;

use serde_json::{Value, json};

/// A collection page body.
#[allow(dead_code)]
pub fn page(items: Value, has_more: bool) -> Value {
    json!({ "items": items, "has_more": has_more })
}
