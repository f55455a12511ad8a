//! Document model for a slide deck.
//!
//! A [`Presentation`] owns its slides, every slide owns its blocks, and so on
//! down to inline leaves. Trees are built in one pass by the parser and are
//! never handed out half-constructed.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Discriminator of a slide at the root of a description.
pub const SLIDE_TAG: &str = "slide";

/// Represents an entire slide deck.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Presentation {
    /// Slides in deck order.
    pub slides: Vec<Slide>,
}

impl Presentation {
    /// Create a presentation from its slides.
    pub fn new(slides: Vec<Slide>) -> Self {
        Self { slides }
    }

    /// True when the deck has no slides.
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Number of slides in the deck.
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }
}

/// A single slide.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    /// Blocks in reading order.
    pub content: Vec<Block>,
}

impl Slide {
    /// Create a slide from its blocks.
    pub fn new(content: Vec<Block>) -> Self {
        Self { content }
    }
}

/// Slide-level structural element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Block {
    Paragraph(Paragraph),
    Heading(Heading),
    List(List),
    BlockQuote(BlockQuote),
}

impl Block {
    /// The grammar tag this block was parsed from.
    pub fn kind(&self) -> BlockKind {
        match self {
            Block::Paragraph(_) => BlockKind::Paragraph,
            Block::Heading(_) => BlockKind::Heading,
            Block::List(_) => BlockKind::List,
            Block::BlockQuote(_) => BlockKind::BlockQuote,
        }
    }
}

/// A text block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    pub content: Vec<Inline>,
}

/// A section title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    pub level: HeadingLevel,
    pub content: Vec<Inline>,
}

/// Heading depth, always within 1..=6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct HeadingLevel(u8);

impl HeadingLevel {
    /// Lowest-numbered (most prominent) level.
    pub const MIN: u8 = 1;
    /// Highest-numbered level.
    pub const MAX: u8 = 6;

    /// Create a level, rejecting values outside 1..=6.
    pub fn new(level: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&level).then_some(Self(level))
    }

    /// The numeric level.
    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for HeadingLevel {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("heading level {} is out of range", value))
    }
}

impl From<HeadingLevel> for u8 {
    fn from(level: HeadingLevel) -> Self {
        level.0
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A list, possibly containing nested lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct List {
    pub list_type: ListType,
    pub content: Vec<ListEntry>,
}

/// Ordering style of a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListType {
    Ordered,
    Unordered,
}

impl ListType {
    /// Parse the attribute value used in slide descriptions.
    pub fn from_attribute(value: &str) -> Option<Self> {
        match value {
            "ordered" => Some(Self::Ordered),
            "unordered" => Some(Self::Unordered),
            _ => None,
        }
    }

    /// HTML element name for this list type.
    pub fn html_tag(self) -> &'static str {
        match self {
            Self::Ordered => "ol",
            Self::Unordered => "ul",
        }
    }
}

/// A direct child of a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ListEntry {
    ListItem(ListItem),
    List(List),
}

/// One list entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    pub content: Vec<ListContent>,
}

/// List items may hold either inline runs or whole blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListContent {
    Block(Block),
    Inline(Inline),
}

/// A quoted block of paragraphs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockQuote {
    pub content: Vec<Paragraph>,
}

/// Text-level element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Inline {
    Text { content: String },
    Bold { content: Vec<Inline> },
    Italic { content: Vec<Inline> },
    BoldItalic { content: Vec<Inline> },
    Code { content: Vec<Inline> },
    Link { content: String, alias: String },
    Image { content: String, alias: String },
}

impl Inline {
    /// Shorthand for a literal text run.
    pub fn text(content: impl Into<String>) -> Self {
        Inline::Text {
            content: content.into(),
        }
    }

    /// The grammar tag this inline was parsed from.
    pub fn kind(&self) -> InlineKind {
        match self {
            Inline::Text { .. } => InlineKind::Text,
            Inline::Bold { .. } => InlineKind::Bold,
            Inline::Italic { .. } => InlineKind::Italic,
            Inline::BoldItalic { .. } => InlineKind::BoldItalic,
            Inline::Code { .. } => InlineKind::Code,
            Inline::Link { .. } => InlineKind::Link,
            Inline::Image { .. } => InlineKind::Image,
        }
    }
}

/// Tags legal at block position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Paragraph,
    Heading,
    List,
    BlockQuote,
}

impl BlockKind {
    /// Look up a block tag by its discriminator.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "paragraph" => Some(Self::Paragraph),
            "heading" => Some(Self::Heading),
            "list" => Some(Self::List),
            "blockQuote" => Some(Self::BlockQuote),
            _ => None,
        }
    }

    /// The discriminator for this tag.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Paragraph => "paragraph",
            Self::Heading => "heading",
            Self::List => "list",
            Self::BlockQuote => "blockQuote",
        }
    }
}

/// Tags legal at list-child position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListEntryKind {
    ListItem,
    List,
}

impl ListEntryKind {
    /// Look up a list-child tag by its discriminator.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "listItem" => Some(Self::ListItem),
            "list" => Some(Self::List),
            _ => None,
        }
    }

    /// The discriminator for this tag.
    pub fn tag(self) -> &'static str {
        match self {
            Self::ListItem => "listItem",
            Self::List => "list",
        }
    }
}

/// Tags legal at inline position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InlineKind {
    Text,
    Bold,
    Italic,
    BoldItalic,
    Code,
    Link,
    Image,
}

impl InlineKind {
    /// Look up an inline tag by its discriminator.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "text" => Some(Self::Text),
            "bold" => Some(Self::Bold),
            "italic" => Some(Self::Italic),
            "boldItalic" => Some(Self::BoldItalic),
            "code" => Some(Self::Code),
            "link" => Some(Self::Link),
            "image" => Some(Self::Image),
            _ => None,
        }
    }

    /// The discriminator for this tag.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::BoldItalic => "boldItalic",
            Self::Code => "code",
            Self::Link => "link",
            Self::Image => "image",
        }
    }
}
