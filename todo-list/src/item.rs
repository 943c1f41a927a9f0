use serde::{Deserialize, Serialize};

/// Lookup key of an [`Item`], milliseconds since the Unix epoch at creation.
pub type ItemId = u64;

/// A single to-do entry.
#[derive(Debug, Eq, PartialEq, Serialize, Deserialize, Clone)]
pub struct Item {
    id: ItemId,
    text: String,
    #[serde(rename = "timestamp")]
    created_at: String,
    completed: bool,
}

impl Item {
    /// Creates a new, not yet completed item.
    pub fn new(id: ItemId, text: impl Into<String>, created_at: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            created_at: created_at.into(),
            completed: false,
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Human-readable creation time, captured once and never recomputed.
    pub fn created_at(&self) -> &str {
        &self.created_at
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub(crate) fn toggle(&mut self) {
        self.completed = !self.completed;
    }
}
