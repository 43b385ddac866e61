//! Category metadata for note presentation.
//!
//! Categories are a fixed closed set of labels, each with a background and
//! accent color used only for rendering. The set is supplied to consumers as
//! an immutable value; stored category strings are never rewritten, unknown
//! labels simply resolve to the default entry.

/// Label of the default category, applied to drafts and to stored notes
/// whose category is missing or unrecognized.
pub const DEFAULT_CATEGORY: &str = "Personal";

/// Display metadata for one category label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryStyle {
    /// Category label
    pub name: String,
    /// Card background color (hex)
    pub background: String,
    /// Accent/border color (hex)
    pub accent: String,
}

impl CategoryStyle {
    pub fn new(name: &str, background: &str, accent: &str) -> Self {
        CategoryStyle {
            name: name.to_string(),
            background: background.to_string(),
            accent: accent.to_string(),
        }
    }
}

/// Immutable, ordered mapping from category label to display metadata.
///
/// The first entry is the default; `resolve` falls back to it for any label
/// not present in the set.
#[derive(Debug, Clone)]
pub struct CategorySet {
    entries: Vec<CategoryStyle>,
}

impl CategorySet {
    /// Builds a set from explicit entries. The first entry becomes the
    /// default; an empty list is not a meaningful set.
    pub fn new(entries: Vec<CategoryStyle>) -> Self {
        assert!(!entries.is_empty(), "category set requires at least one entry");
        CategorySet { entries }
    }

    /// Resolves a label to its display metadata, falling back to the
    /// default entry for unknown or empty labels.
    pub fn resolve(&self, label: &str) -> &CategoryStyle {
        self.entries
            .iter()
            .find(|entry| entry.name == label)
            .unwrap_or(&self.entries[0])
    }

    /// The default entry (first in declaration order)
    pub fn default_style(&self) -> &CategoryStyle {
        &self.entries[0]
    }

    /// Whether the label names a category in the set
    pub fn contains(&self, label: &str) -> bool {
        self.entries.iter().any(|entry| entry.name == label)
    }

    /// Entries in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &CategoryStyle> {
        self.entries.iter()
    }
}

impl Default for CategorySet {
    fn default() -> Self {
        CategorySet::new(vec![
            CategoryStyle::new("Personal", "#e3f2fd", "#1976d2"),
            CategoryStyle::new("Work", "#f3e5f5", "#7b1fa2"),
            CategoryStyle::new("Study", "#e8f5e8", "#388e3c"),
            CategoryStyle::new("Health", "#fff3e0", "#f57c00"),
            CategoryStyle::new("Finance", "#fce4ec", "#c2185b"),
            CategoryStyle::new("Ideas", "#f1f8e9", "#689f38"),
            CategoryStyle::new("Shopping", "#e0f2f1", "#00796b"),
        ])
    }
}
