//! Catalog domain types and construction-time validation.
//!
//! # Responsibility
//! - Define checklist items and the ordered section catalog.
//! - Reject malformed catalogs before any project reads from them.
//!
//! # Invariants
//! - Item ids are unique across every section.
//! - Section order and item order are preserved exactly as supplied.
//! - A constructed `Catalog` is never mutated.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Lowest accepted importance score.
pub const MIN_IMPORTANCE: u8 = 1;
/// Highest accepted importance score.
pub const MAX_IMPORTANCE: u8 = 10;

static ITEM_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z]+-[0-9]+$").expect("valid item id regex"));

/// One auditable checklist entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistItem {
    /// Stable key referenced by project check-states.
    pub id: String,
    /// Display label.
    pub text: String,
    /// Score in `1..=10`, used only for display classification.
    pub importance: u8,
    /// Optional supplementary hint shown when notes are visible.
    pub note: Option<String>,
}

impl ChecklistItem {
    pub fn new(id: impl Into<String>, text: impl Into<String>, importance: u8) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            importance,
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Named, ordered group of checklist items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistSection {
    pub name: String,
    pub items: Vec<ChecklistItem>,
}

impl ChecklistSection {
    pub fn new(name: impl Into<String>, items: Vec<ChecklistItem>) -> Self {
        Self {
            name: name.into(),
            items,
        }
    }
}

/// Catalog construction errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    EmptySectionName,
    DuplicateSection(String),
    InvalidItemId(String),
    DuplicateItemId(String),
    ImportanceOutOfRange { item_id: String, importance: u8 },
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptySectionName => write!(f, "section name cannot be empty"),
            Self::DuplicateSection(name) => write!(f, "duplicate section `{name}`"),
            Self::InvalidItemId(id) => write!(
                f,
                "invalid item id `{id}`; expected `<letters>-<digits>`"
            ),
            Self::DuplicateItemId(id) => write!(f, "duplicate item id `{id}`"),
            Self::ImportanceOutOfRange {
                item_id,
                importance,
            } => write!(
                f,
                "item `{item_id}` has importance {importance}; expected {MIN_IMPORTANCE}..={MAX_IMPORTANCE}"
            ),
        }
    }
}

impl Error for CatalogError {}

/// Immutable, ordered mapping from section name to checklist items.
#[derive(Debug, Clone)]
pub struct Catalog {
    sections: Vec<ChecklistSection>,
    // item id -> (section index, item index)
    index: HashMap<String, (usize, usize)>,
}

impl Catalog {
    /// Builds a catalog after validating every section and item.
    ///
    /// # Errors
    /// - Blank or duplicated section names.
    /// - Item ids not matching `<letters>-<digits>`, or duplicated anywhere.
    /// - Importance outside `1..=10`.
    pub fn new(sections: Vec<ChecklistSection>) -> Result<Self, CatalogError> {
        let mut index = HashMap::new();
        let mut section_names = HashSet::new();

        for (section_idx, section) in sections.iter().enumerate() {
            if section.name.trim().is_empty() {
                return Err(CatalogError::EmptySectionName);
            }
            if !section_names.insert(section.name.as_str()) {
                return Err(CatalogError::DuplicateSection(section.name.clone()));
            }

            for (item_idx, item) in section.items.iter().enumerate() {
                if !ITEM_ID_RE.is_match(&item.id) {
                    return Err(CatalogError::InvalidItemId(item.id.clone()));
                }
                if !(MIN_IMPORTANCE..=MAX_IMPORTANCE).contains(&item.importance) {
                    return Err(CatalogError::ImportanceOutOfRange {
                        item_id: item.id.clone(),
                        importance: item.importance,
                    });
                }
                if index
                    .insert(item.id.clone(), (section_idx, item_idx))
                    .is_some()
                {
                    return Err(CatalogError::DuplicateItemId(item.id.clone()));
                }
            }
        }

        Ok(Self { sections, index })
    }

    /// Sections in declaration order.
    pub fn sections(&self) -> &[ChecklistSection] {
        &self.sections
    }

    pub fn item(&self, item_id: &str) -> Option<&ChecklistItem> {
        let (section_idx, item_idx) = *self.index.get(item_id)?;
        Some(&self.sections[section_idx].items[item_idx])
    }

    pub fn contains_item(&self, item_id: &str) -> bool {
        self.index.contains_key(item_id)
    }

    /// Count of items across all sections; the progress denominator.
    pub fn total_items(&self) -> usize {
        self.index.len()
    }

    /// All items flattened in section order.
    pub fn items(&self) -> impl Iterator<Item = &ChecklistItem> {
        self.sections.iter().flat_map(|section| section.items.iter())
    }
}
