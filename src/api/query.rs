//! Query parameters shared by collection endpoints.

use crate::domain::{FieldSelection, ItemType};

/// Ordering directives passed through to the service.
///
/// Neither value is validated locally; the service rejects what it does
/// not understand. The direction is upper-cased (`desc` becomes `DESC`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortOrder {
    pub by: Option<String>,
    pub dir: Option<String>,
}

impl SortOrder {
    pub fn new(by: Option<String>, dir: Option<String>) -> Self {
        Self { by, dir }
    }

    pub(crate) fn params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(by) = self.by.as_deref().filter(|s| !s.is_empty()) {
            params.push(("order_by".to_string(), by.to_string()));
        }
        if let Some(dir) = self.dir.as_deref().filter(|s| !s.is_empty()) {
            params.push(("order_dir".to_string(), dir.to_uppercase()));
        }
        params
    }
}

/// Parameters for a paginated collection listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub fields: Option<String>,
    pub order: SortOrder,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the raw `fields` selector.
    pub fn fields(mut self, fields: impl Into<String>) -> Self {
        self.fields = Some(fields.into());
        self
    }

    /// Sets the `fields` selector from a validated selection.
    pub fn select(self, selection: &FieldSelection) -> Self {
        self.fields(selection.to_query())
    }

    pub fn order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    pub(crate) fn params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(fields) = self.fields.as_deref().filter(|s| !s.is_empty()) {
            params.push(("fields".to_string(), fields.to_string()));
        }
        params.extend(self.order.params());
        params
    }
}

/// Parameters for a full-text search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub query: String,
    pub item_type: Option<ItemType>,
    pub fields: Option<String>,
}

impl SearchQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            item_type: None,
            fields: None,
        }
    }

    pub fn item_type(mut self, item_type: ItemType) -> Self {
        self.item_type = Some(item_type);
        self
    }

    pub fn fields(mut self, fields: impl Into<String>) -> Self {
        self.fields = Some(fields.into());
        self
    }

    pub(crate) fn params(&self) -> Vec<(String, String)> {
        let mut params = vec![("query".to_string(), self.query.clone())];
        if let Some(item_type) = self.item_type {
            params.push(("type".to_string(), item_type.as_str().to_string()));
        }
        if let Some(fields) = self.fields.as_deref().filter(|s| !s.is_empty()) {
            params.push(("fields".to_string(), fields.to_string()));
        }
        params
    }
}
