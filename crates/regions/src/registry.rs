//! In-memory registry of tagged regions.
//!
//! Regions are shared out as `Rc` handles. Removal compares handles by
//! pointer, so only the exact stored region is ever removed; an equal region
//! built elsewhere leaves the registry untouched. The registry is
//! single-threaded and does no locking.

use crate::tokenizer::Token;
use serde::Serialize;
use std::rc::Rc;

/// Display metadata attached to a region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionMetadata {
    pub color: String,
    pub bold: bool,
    pub italic: bool,
    pub underlined: bool,
}

impl Default for RegionMetadata {
    fn default() -> Self {
        Self {
            color: "black".to_string(),
            bold: false,
            italic: false,
            underlined: false,
        }
    }
}

/// A span of editor text with its display metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaggedRegion {
    pub id: String,
    pub text: String,
    pub metadata: RegionMetadata,
}

impl TaggedRegion {
    /// Create a region with default metadata.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            metadata: RegionMetadata::default(),
        }
    }

    /// Replace the region's metadata.
    pub fn with_metadata(mut self, metadata: RegionMetadata) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Ordered table of tagged regions.
#[derive(Debug, Default)]
pub struct RegionRegistry {
    areas: Vec<Rc<TaggedRegion>>,
}

impl RegionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry by pairing tags from a token stream.
    ///
    /// Each closing tag pairs with the most recent unclosed opening tag of the
    /// same name. The region text is every literal between the two; tags of
    /// other regions in between contribute nothing. Regions are added in the
    /// order they close, and tags left unpaired are ignored.
    pub fn from_tokens(tokens: &[Token]) -> Self {
        let mut registry = Self::new();
        let mut open: Vec<(&str, &str, String)> = Vec::new();

        for token in tokens {
            match token {
                Token::Literal(text) => {
                    for (_, _, collected) in open.iter_mut() {
                        collected.push_str(text);
                    }
                }
                Token::Open(tag) => {
                    open.push((tag.name.as_str(), tag.id.as_str(), String::new()));
                }
                Token::Close(tag) => {
                    match open.iter().rposition(|(name, _, _)| *name == tag.name) {
                        Some(index) => {
                            let (_, id, text) = open.remove(index);
                            registry.add_area(id, text);
                        }
                        None => log::debug!("Ignoring unpaired closing tag {}", tag.name),
                    }
                }
            }
        }

        for (name, id, _) in &open {
            log::debug!("Ignoring unclosed tag {} ({})", name, id);
        }
        registry
    }

    /// Replace every region at once.
    pub fn set_areas(&mut self, areas: impl IntoIterator<Item = TaggedRegion>) {
        self.areas = areas.into_iter().map(Rc::new).collect();
    }

    /// Append a region with default metadata and return its handle.
    pub fn add_area(&mut self, id: impl Into<String>, text: impl Into<String>) -> Rc<TaggedRegion> {
        let area = Rc::new(TaggedRegion::new(id, text));
        self.areas.push(Rc::clone(&area));
        area
    }

    /// Remove the exact region behind `area`.
    ///
    /// Returns false, changing nothing, when that handle is not stored here.
    pub fn remove_area(&mut self, area: &Rc<TaggedRegion>) -> bool {
        match self.areas.iter().position(|stored| Rc::ptr_eq(stored, area)) {
            Some(index) => {
                self.areas.remove(index);
                true
            }
            None => false,
        }
    }

    /// All regions in registry order.
    pub fn areas(&self) -> &[Rc<TaggedRegion>] {
        &self.areas
    }

    /// The first region with the given id.
    pub fn get_area(&self, id: &str) -> Option<&Rc<TaggedRegion>> {
        self.areas.iter().find(|area| area.id == id)
    }

    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }
}
