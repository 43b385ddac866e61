//! Core data structures for the quicknotes application.
//!
//! This module contains the primary types used throughout the application,
//! the Note entity and the transient draft form behind the add action.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::DEFAULT_CATEGORY;

/// Represents a single note in our system
///
/// Field names are serialized in camelCase to stay compatible with the
/// stored collection schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Unique identifier, derived from the creation timestamp in milliseconds
    pub id: i64,
    /// Optional note title; None when not provided
    #[serde(default)]
    pub title: Option<String>,
    /// Note content; never all-whitespace once stored
    pub content: String,
    /// Category label; stored as-is, resolved against the fixed set at render time
    #[serde(default = "default_category")]
    pub category: String,
    /// When the note was created
    pub created_at: DateTime<Utc>,
    /// Last modification time; None until the note is first edited
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

impl Note {
    /// Creates a new note with the given id, title, content and category
    pub fn new(id: i64, title: Option<String>, content: String, category: String) -> Self {
        Note {
            id,
            title,
            content,
            category,
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}

/// Transient form state behind the add action
#[derive(Debug, Clone)]
pub struct NoteDraft {
    /// Draft title; blank means no title
    pub title: String,
    /// Draft content
    pub content: String,
    /// Draft category; resets to the default after every add
    pub category: String,
}

impl Default for NoteDraft {
    fn default() -> Self {
        NoteDraft {
            title: String::new(),
            content: String::new(),
            category: DEFAULT_CATEGORY.to_string(),
        }
    }
}
