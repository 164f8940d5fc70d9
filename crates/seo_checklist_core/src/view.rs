//! Transient presentation state and display classification.
//!
//! Nothing here is persisted; a fresh `ViewState` is built on every start.

use crate::catalog::item::{Catalog, ChecklistItem};
use std::collections::HashMap;

/// Three-tier visual severity derived from an importance score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportanceTier {
    High,
    Medium,
    Low,
}

impl ImportanceTier {
    /// `>= 9` is high, `>= 7` is medium, anything else is low.
    pub fn from_score(importance: u8) -> Self {
        if importance >= 9 {
            Self::High
        } else if importance >= 7 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Self::High => "importance-high",
            Self::Medium => "importance-medium",
            Self::Low => "importance-low",
        }
    }
}

/// Section collapse and note visibility for one UI session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    expanded_sections: HashMap<String, bool>,
    show_notes: bool,
}

impl ViewState {
    /// Every catalog section starts expanded and notes start visible.
    pub fn new(catalog: &Catalog) -> Self {
        Self {
            expanded_sections: catalog
                .sections()
                .iter()
                .map(|section| (section.name.clone(), true))
                .collect(),
            show_notes: true,
        }
    }

    pub fn is_expanded(&self, section: &str) -> bool {
        self.expanded_sections.get(section).copied().unwrap_or(false)
    }

    /// Flips one section; returns the new expansion state.
    pub fn toggle_section(&mut self, section: &str) -> bool {
        let expanded = !self.is_expanded(section);
        self.expanded_sections.insert(section.to_string(), expanded);
        expanded
    }

    pub fn show_notes(&self) -> bool {
        self.show_notes
    }

    /// Flips note visibility; returns the new state.
    pub fn toggle_notes(&mut self) -> bool {
        self.show_notes = !self.show_notes;
        self.show_notes
    }

    /// Note to render for `item`, if notes are shown and it has one.
    pub fn visible_note<'i>(&self, item: &'i ChecklistItem) -> Option<&'i str> {
        if self.show_notes {
            item.note.as_deref()
        } else {
            None
        }
    }
}
