use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A follow-up note attached to an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub text: String,
    pub created: DateTime<Utc>,
}

impl Note {
    pub fn new(text: String) -> Self {
        Note {
            text,
            created: Utc::now(),
        }
    }
}

/// A single queued item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: u64,
    pub text: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub notes: Vec<Note>,
    pub created: DateTime<Utc>,
    #[serde(default)]
    pub resolved: Option<DateTime<Utc>>,
}

impl Item {
    pub fn new(id: u64, text: String) -> Self {
        Item {
            id,
            text,
            done: false,
            notes: Vec::new(),
            created: Utc::now(),
            resolved: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_item_starts_open_and_unannotated() {
        let item = Item::new(7, "write the report".into());
        assert_eq!(item.id, 7);
        assert!(!item.done);
        assert!(item.notes.is_empty());
        assert!(item.resolved.is_none());
    }

    #[test]
    fn serde_defaults_on_minimal_object() {
        let json = r#"{"id":1,"text":"x","created":"2026-01-02T03:04:05Z"}"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert!(!item.done);
        assert!(item.notes.is_empty());
        assert!(item.resolved.is_none());
    }
}
