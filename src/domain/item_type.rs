//! Item type codes used by the Data API.

use std::fmt;
use std::str::FromStr;

/// The kinds of item the service stores.
///
/// Each variant maps to the numeric code the service reports in `type_`
/// and accepts (by name) in the search `type` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemType {
    Note,
    Folder,
    Setting,
    Resource,
    Tag,
    NoteTag,
    Search,
    Alarm,
    MasterKey,
    ItemChange,
    NoteResource,
    ResourceLocalState,
    Revision,
    Migration,
    SmartFilter,
    Command,
}

impl ItemType {
    /// Every item type, in code order.
    pub const ALL: [ItemType; 16] = [
        ItemType::Note,
        ItemType::Folder,
        ItemType::Setting,
        ItemType::Resource,
        ItemType::Tag,
        ItemType::NoteTag,
        ItemType::Search,
        ItemType::Alarm,
        ItemType::MasterKey,
        ItemType::ItemChange,
        ItemType::NoteResource,
        ItemType::ResourceLocalState,
        ItemType::Revision,
        ItemType::Migration,
        ItemType::SmartFilter,
        ItemType::Command,
    ];

    /// Returns the numeric code reported by the service.
    pub fn code(self) -> u8 {
        match self {
            ItemType::Note => 1,
            ItemType::Folder => 2,
            ItemType::Setting => 3,
            ItemType::Resource => 4,
            ItemType::Tag => 5,
            ItemType::NoteTag => 6,
            ItemType::Search => 7,
            ItemType::Alarm => 8,
            ItemType::MasterKey => 9,
            ItemType::ItemChange => 10,
            ItemType::NoteResource => 11,
            ItemType::ResourceLocalState => 12,
            ItemType::Revision => 13,
            ItemType::Migration => 14,
            ItemType::SmartFilter => 15,
            ItemType::Command => 16,
        }
    }

    /// Returns the snake_case name used by the service.
    pub fn as_str(self) -> &'static str {
        match self {
            ItemType::Note => "note",
            ItemType::Folder => "folder",
            ItemType::Setting => "setting",
            ItemType::Resource => "resource",
            ItemType::Tag => "tag",
            ItemType::NoteTag => "note_tag",
            ItemType::Search => "search",
            ItemType::Alarm => "alarm",
            ItemType::MasterKey => "master_key",
            ItemType::ItemChange => "item_change",
            ItemType::NoteResource => "note_resource",
            ItemType::ResourceLocalState => "resource_local_state",
            ItemType::Revision => "revision",
            ItemType::Migration => "migration",
            ItemType::SmartFilter => "smart_filter",
            ItemType::Command => "command",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown item type name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseItemTypeError(String);

impl fmt::Display for ParseItemTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let known: Vec<_> = ItemType::ALL.iter().map(|t| t.as_str()).collect();
        write!(
            f,
            "unknown item type '{}' (expected one of: {})",
            self.0,
            known.join(", ")
        )
    }
}

impl std::error::Error for ParseItemTypeError {}

impl FromStr for ItemType {
    type Err = ParseItemTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| ParseItemTypeError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_follow_declaration_order() {
        for (i, item_type) in ItemType::ALL.iter().enumerate() {
            assert_eq!(usize::from(item_type.code()), i + 1);
        }
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("note".parse::<ItemType>().unwrap(), ItemType::Note);
        assert_eq!(" Folder ".parse::<ItemType>().unwrap(), ItemType::Folder);
        assert_eq!(
            "resource_local_state".parse::<ItemType>().unwrap(),
            ItemType::ResourceLocalState
        );
    }

    #[test]
    fn rejects_unknown_name() {
        let err = "notebook".parse::<ItemType>().unwrap_err();
        assert!(err.to_string().contains("unknown item type 'notebook'"));
        assert!(err.to_string().contains("smart_filter"));
    }
}
