//! Core document model, markup parser, and HTML renderer for slide decks.

pub mod error;
pub mod parser;
pub mod render;
pub mod types;

pub use error::{Error, Result, ValidationReport, Violation};
pub use parser::MarkupParser;
pub use render::HtmlRenderer;
pub use types::{
    Block, BlockKind, BlockQuote, Heading, HeadingLevel, Inline, InlineKind, List, ListContent,
    ListEntry, ListEntryKind, ListItem, ListType, Paragraph, Presentation, Slide,
};
