//! State introspection as titled key/value sections

use std::fmt::Write as _;

/// A debug entry (key-value pair)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugEntry {
    pub key: String,
    pub value: String,
}

impl DebugEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A titled group of entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugSection {
    pub title: String,
    pub entries: Vec<DebugEntry>,
}

impl DebugSection {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            entries: Vec::new(),
        }
    }

    /// Add an entry (builder style)
    pub fn entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.push(DebugEntry::new(key, value));
        self
    }

    /// Add an entry in place
    pub fn push_entry(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push(DebugEntry::new(key, value));
    }
}

/// Types that can describe their contents for inspection
///
/// Usually derived with `#[derive(DebugState)]`; implement it by hand when
/// a field needs a custom rendering.
///
/// # Example
///
/// ```
/// use block_directory_core::debug::{DebugSection, DebugState};
///
/// struct SearchState {
///     query: String,
///     pending: bool,
/// }
///
/// impl DebugState for SearchState {
///     fn debug_sections(&self) -> Vec<DebugSection> {
///         vec![DebugSection::new("Search")
///             .entry("query", &self.query)
///             .entry("pending", self.pending.to_string())]
///     }
/// }
///
/// let state = SearchState { query: "gallery".into(), pending: true };
/// assert_eq!(state.debug_text(), "[Search]\n  query: gallery\n  pending: true\n");
/// ```
pub trait DebugState {
    /// Return state as sections with key-value pairs
    fn debug_sections(&self) -> Vec<DebugSection>;

    /// Plain-text rendering of [`debug_sections`](Self::debug_sections)
    fn debug_text(&self) -> String {
        let mut out = String::new();
        for section in self.debug_sections() {
            let _ = writeln!(out, "[{}]", section.title);
            for entry in section.entries {
                let _ = writeln!(out, "  {}: {}", entry.key, entry.value);
            }
        }
        out
    }
}
