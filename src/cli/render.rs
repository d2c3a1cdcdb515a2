//! Table rendering driven by the field metadata tables.
//!
//! Entities are serialized to JSON values first, so one renderer serves
//! every kind: the selection decides which keys become columns and each
//! field's kind decides how its cell is formatted.

use chrono::DateTime;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::{FieldKind, FieldSelection, FieldSpec};

/// Column separator.
pub const SEPARATOR: &str = " \u{2502} ";

/// Converts an entity to the JSON object the renderer works on.
pub fn to_value<E: Serialize>(entity: &E) -> serde_json::Result<Value> {
    serde_json::to_value(entity)
}

/// Keeps only the selected keys; missing ones become `null`.
pub fn project(selection: &FieldSelection, value: &Value) -> Map<String, Value> {
    selection
        .fields()
        .iter()
        .map(|spec| {
            let cell = value.get(spec.name).cloned().unwrap_or(Value::Null);
            (spec.name.to_string(), cell)
        })
        .collect()
}

/// The header line for `selection`.
pub fn header(selection: &FieldSelection) -> String {
    let cells = selection
        .fields()
        .iter()
        .map(|spec| spec.header.to_string())
        .collect();
    line(selection.fields(), cells)
}

/// One table row for an entity value.
pub fn row(selection: &FieldSelection, value: &Value) -> String {
    let cells = selection
        .fields()
        .iter()
        .map(|spec| cell(spec, value.get(spec.name)))
        .collect();
    line(selection.fields(), cells)
}

/// A row standing in for a record that could not be fetched.
///
/// The ID fills the first column and the message follows untruncated.
pub fn error_row(selection: &FieldSelection, id: &str, message: &str) -> String {
    let width = selection
        .fields()
        .first()
        .map_or_else(|| id.chars().count(), |s| s.width);
    format!("{}{SEPARATOR}{message}", pad(&fit(id, width), width))
}

/// Formats a single cell according to its field kind.
pub fn cell(spec: &FieldSpec, value: Option<&Value>) -> String {
    let Some(value) = value else {
        return String::new();
    };

    let text = match (spec.kind, value) {
        (_, Value::Null) => String::new(),
        (FieldKind::Timestamp, Value::Number(n)) => n
            .as_i64()
            .map(format_timestamp)
            .unwrap_or_else(|| n.to_string()),
        (FieldKind::Flag, Value::Number(n)) => match n.as_i64() {
            Some(0) => "no".to_string(),
            Some(_) => "yes".to_string(),
            None => n.to_string(),
        },
        (FieldKind::Flag, Value::Bool(b)) => (if *b { "yes" } else { "no" }).to_string(),
        (_, Value::String(s)) => flatten(s),
        (_, other) => other.to_string(),
    };

    fit(&text, spec.width)
}

/// Formats epoch milliseconds as `YYYY-MM-DD HH:MM` UTC; zero means unset.
pub fn format_timestamp(millis: i64) -> String {
    if millis == 0 {
        return String::new();
    }
    DateTime::from_timestamp_millis(millis)
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| millis.to_string())
}

fn line(specs: &[&FieldSpec], cells: Vec<String>) -> String {
    let last = cells.len().saturating_sub(1);
    cells
        .into_iter()
        .zip(specs)
        .enumerate()
        .map(|(i, (text, spec))| if i < last { pad(&text, spec.width) } else { text })
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

fn flatten(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn pad(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len >= width {
        s.to_string()
    } else {
        format!("{s}{}", " ".repeat(width - len))
    }
}

/// Truncates a string to a maximum display width, adding ellipsis if needed.
fn fit(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_width.saturating_sub(1)).collect();
        format!("{truncated}…")
    }
}
