//! Markup parser: untyped slide description to [`Presentation`].
//!
//! The description is a JSON array of slides. Every node is an object with a
//! `type` discriminator, an optional `attributes` map, and a `content` field
//! that is either an array of child nodes or, for leaves, a string.
//!
//! Parsing never stops at the first problem. Every violation in the tree is
//! collected and the caller gets either a complete tree or the full list.

use crate::error::{Error, Result, ValidationReport, Violation};
use crate::types::{
    Block, BlockKind, BlockQuote, Heading, HeadingLevel, Inline, InlineKind, List, ListContent,
    ListEntry, ListEntryKind, ListItem, ListType, Paragraph, Presentation, Slide, SLIDE_TAG,
};
use serde_json::Value;

/// Parser for slide descriptions.
#[derive(Debug, Clone, Default)]
pub struct MarkupParser;

impl MarkupParser {
    /// Create a new markup parser.
    pub fn new() -> Self {
        Self
    }

    /// Validate a description and build its document tree.
    ///
    /// Returns the tree only when no violation was found anywhere in the input.
    pub fn parse(&self, input: &Value) -> std::result::Result<Presentation, ValidationReport> {
        let mut walker = Walker::default();
        let presentation = walker.presentation(input);

        match presentation {
            Some(presentation) if walker.violations.is_empty() => {
                log::debug!("Parsed {} slides", presentation.slide_count());
                Ok(presentation)
            }
            _ => {
                log::debug!("Rejected description with {} errors", walker.violations.len());
                Err(ValidationReport::new(&walker.violations))
            }
        }
    }

    /// Parse a description from JSON text.
    pub fn parse_str(&self, text: &str) -> Result<Presentation> {
        let value: Value = serde_json::from_str(text)?;
        self.parse(&value).map_err(Error::Validation)
    }
}

/// Recursive descent state: the violations seen so far.
#[derive(Default)]
struct Walker {
    violations: Vec<Violation>,
}

impl Walker {
    fn presentation(&mut self, input: &Value) -> Option<Presentation> {
        let Some(slides) = input.as_array() else {
            self.violations.push(Violation::Type(value_kind(input).to_string()));
            return None;
        };
        self.each(slides, Self::slide).map(Presentation::new)
    }

    fn slide(&mut self, node: &Value) -> Option<Slide> {
        match discriminator(node) {
            Ok(SLIDE_TAG) => {
                let content = self.children(node, SLIDE_TAG)?;
                self.each(content, Self::block).map(Slide::new)
            }
            Ok(other) => self.reject(other.to_string()),
            Err(actual) => self.reject(actual),
        }
    }

    fn block(&mut self, node: &Value) -> Option<Block> {
        let kind = self.kind(node, BlockKind::from_tag)?;
        match kind {
            BlockKind::Paragraph => self.paragraph(node).map(Block::Paragraph),
            BlockKind::Heading => {
                let level = self.heading_level(node);
                let content = self.inlines(node, kind.tag());
                Some(Block::Heading(Heading {
                    level: level?,
                    content: content?,
                }))
            }
            BlockKind::List => self.list(node).map(Block::List),
            BlockKind::BlockQuote => {
                let content = self.children(node, kind.tag())?;
                self.each(content, Self::quoted_paragraph)
                    .map(|content| Block::BlockQuote(BlockQuote { content }))
            }
        }
    }

    fn paragraph(&mut self, node: &Value) -> Option<Paragraph> {
        self.inlines(node, BlockKind::Paragraph.tag())
            .map(|content| Paragraph { content })
    }

    /// Block quotes admit paragraphs only.
    fn quoted_paragraph(&mut self, node: &Value) -> Option<Paragraph> {
        match self.kind(node, BlockKind::from_tag)? {
            BlockKind::Paragraph => self.paragraph(node),
            other => self.reject(other.tag().to_string()),
        }
    }

    fn heading_level(&mut self, node: &Value) -> Option<HeadingLevel> {
        let level = attribute(node, "level")
            .and_then(Value::as_u64)
            .and_then(|level| u8::try_from(level).ok())
            .and_then(HeadingLevel::new);
        if level.is_none() {
            self.violations.push(Violation::Attribute("level"));
        }
        level
    }

    fn list(&mut self, node: &Value) -> Option<List> {
        let list_type = attribute(node, "listType")
            .and_then(Value::as_str)
            .and_then(ListType::from_attribute);
        if list_type.is_none() {
            self.violations.push(Violation::Attribute("listType"));
        }

        let content = self
            .children(node, BlockKind::List.tag())
            .and_then(|items| self.each(items, Self::list_entry));

        Some(List {
            list_type: list_type?,
            content: content?,
        })
    }

    fn list_entry(&mut self, node: &Value) -> Option<ListEntry> {
        match self.kind(node, ListEntryKind::from_tag)? {
            ListEntryKind::List => self.list(node).map(ListEntry::List),
            ListEntryKind::ListItem => {
                let content = self.children(node, ListEntryKind::ListItem.tag())?;
                self.each(content, Self::list_content)
                    .map(|content| ListEntry::ListItem(ListItem { content }))
            }
        }
    }

    /// List items accept both block and inline children.
    fn list_content(&mut self, node: &Value) -> Option<ListContent> {
        let tag = match discriminator(node) {
            Ok(tag) => tag,
            Err(actual) => return self.reject(actual),
        };
        if BlockKind::from_tag(tag).is_some() {
            self.block(node).map(ListContent::Block)
        } else if InlineKind::from_tag(tag).is_some() {
            self.inline(node).map(ListContent::Inline)
        } else {
            self.reject(tag.to_string())
        }
    }

    fn inlines(&mut self, node: &Value, tag: &'static str) -> Option<Vec<Inline>> {
        let content = self.children(node, tag)?;
        self.each(content, Self::inline)
    }

    fn inline(&mut self, node: &Value) -> Option<Inline> {
        let kind = self.kind(node, InlineKind::from_tag)?;
        match kind {
            InlineKind::Text => self.literal(node, kind.tag()).map(|content| Inline::Text {
                content: content.to_string(),
            }),
            InlineKind::Bold => self
                .inlines(node, kind.tag())
                .map(|content| Inline::Bold { content }),
            InlineKind::Italic => self
                .inlines(node, kind.tag())
                .map(|content| Inline::Italic { content }),
            InlineKind::BoldItalic => self
                .inlines(node, kind.tag())
                .map(|content| Inline::BoldItalic { content }),
            InlineKind::Code => self
                .inlines(node, kind.tag())
                .map(|content| Inline::Code { content }),
            InlineKind::Link => {
                let (content, alias) = self.aliased(node, kind.tag())?;
                Some(Inline::Link { content, alias })
            }
            InlineKind::Image => {
                let (content, alias) = self.aliased(node, kind.tag())?;
                Some(Inline::Image { content, alias })
            }
        }
    }

    /// Label (or alt text) plus the `alias` attribute of links and images.
    fn aliased(&mut self, node: &Value, tag: &'static str) -> Option<(String, String)> {
        let content = self.literal(node, tag);
        let alias = attribute(node, "alias").and_then(Value::as_str);
        if alias.is_none() {
            self.violations.push(Violation::Attribute("alias"));
        }
        Some((content?.to_string(), alias?.to_string()))
    }

    /// Resolve the node's discriminator against one grammar position.
    fn kind<K>(&mut self, node: &Value, lookup: fn(&str) -> Option<K>) -> Option<K> {
        match discriminator(node) {
            Ok(tag) => match lookup(tag) {
                Some(kind) => Some(kind),
                None => self.reject(tag.to_string()),
            },
            Err(actual) => self.reject(actual),
        }
    }

    fn children<'v>(&mut self, node: &'v Value, tag: &'static str) -> Option<&'v Vec<Value>> {
        let content = node.get("content").and_then(Value::as_array);
        if content.is_none() {
            self.violations.push(Violation::Content(tag));
        }
        content
    }

    fn literal<'v>(&mut self, node: &'v Value, tag: &'static str) -> Option<&'v str> {
        let content = node.get("content").and_then(Value::as_str);
        if content.is_none() {
            self.violations.push(Violation::Content(tag));
        }
        content
    }

    /// Parse every item, keeping going after failures so all violations surface.
    fn each<T>(&mut self, items: &[Value], parse: fn(&mut Self, &Value) -> Option<T>) -> Option<Vec<T>> {
        let mut parsed = Vec::with_capacity(items.len());
        let mut complete = true;
        for item in items {
            match parse(self, item) {
                Some(value) => parsed.push(value),
                None => complete = false,
            }
        }
        complete.then_some(parsed)
    }

    fn reject<T>(&mut self, actual: String) -> Option<T> {
        self.violations.push(Violation::Type(actual));
        None
    }
}

/// The node's `type` discriminator, or a description of what stood in its place.
fn discriminator(node: &Value) -> std::result::Result<&str, String> {
    match node {
        Value::Object(map) => match map.get("type") {
            Some(Value::String(tag)) => Ok(tag.as_str()),
            Some(other) => Err(other.to_string()),
            None => Err("missing".to_string()),
        },
        other => Err(value_kind(other).to_string()),
    }
}

fn attribute<'v>(node: &'v Value, name: &str) -> Option<&'v Value> {
    node.get("attributes")?.get(name)
}

/// JSON kind name used when a value has no discriminator at all.
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn text(content: &str) -> Value {
        json!({ "type": "text", "content": content })
    }

    fn errors(input: Value) -> Vec<String> {
        MarkupParser::new().parse(&input).unwrap_err().errors
    }

    #[test]
    fn test_parse_empty_deck() {
        let presentation = MarkupParser::new().parse(&json!([])).unwrap();
        assert!(presentation.is_empty());
    }

    #[test]
    fn test_parse_paragraph_and_heading() {
        let input = json!([{
            "type": "slide",
            "content": [
                { "type": "heading", "attributes": { "level": 1 }, "content": [text("Welcome")] },
                { "type": "paragraph", "content": [text("Hello "), { "type": "bold", "content": [text("world")] }] }
            ]
        }]);

        let presentation = MarkupParser::new().parse(&input).unwrap();

        assert_eq!(
            presentation,
            Presentation::new(vec![Slide::new(vec![
                Block::Heading(Heading {
                    level: HeadingLevel::new(1).unwrap(),
                    content: vec![Inline::text("Welcome")],
                }),
                Block::Paragraph(Paragraph {
                    content: vec![
                        Inline::text("Hello "),
                        Inline::Bold {
                            content: vec![Inline::text("world")]
                        },
                    ],
                }),
            ])])
        );
    }

    #[test]
    fn test_parse_nested_list() {
        let input = json!([{
            "type": "slide",
            "content": [{
                "type": "list",
                "attributes": { "listType": "ordered" },
                "content": [
                    { "type": "listItem", "content": [text("One")] },
                    {
                        "type": "list",
                        "attributes": { "listType": "unordered" },
                        "content": [{ "type": "listItem", "content": [
                            { "type": "paragraph", "content": [text("Nested")] }
                        ] }]
                    }
                ]
            }]
        }]);

        let presentation = MarkupParser::new().parse(&input).unwrap();
        let Block::List(list) = &presentation.slides[0].content[0] else {
            panic!("expected a list");
        };

        assert_eq!(list.list_type, ListType::Ordered);
        assert_eq!(list.content.len(), 2);
        assert_eq!(
            list.content[0],
            ListEntry::ListItem(ListItem {
                content: vec![ListContent::Inline(Inline::text("One"))]
            })
        );
        let ListEntry::List(nested) = &list.content[1] else {
            panic!("expected a nested list");
        };
        assert_eq!(nested.list_type, ListType::Unordered);
        assert_eq!(
            nested.content[0],
            ListEntry::ListItem(ListItem {
                content: vec![ListContent::Block(Block::Paragraph(Paragraph {
                    content: vec![Inline::text("Nested")]
                }))]
            })
        );
    }

    #[test]
    fn test_parse_block_quote_link_image_code() {
        let input = json!([{
            "type": "slide",
            "content": [
                { "type": "blockQuote", "content": [
                    { "type": "paragraph", "content": [{ "type": "code", "content": [text("let x")] }] }
                ] },
                { "type": "paragraph", "content": [
                    { "type": "link", "content": "docs", "attributes": { "alias": "https://example.com" } },
                    { "type": "image", "content": "logo", "attributes": { "alias": "logo.png" } },
                    { "type": "boldItalic", "content": [{ "type": "italic", "content": [text("deep")] }] }
                ] }
            ]
        }]);

        let presentation = MarkupParser::new().parse(&input).unwrap();
        let blocks = &presentation.slides[0].content;

        assert_eq!(
            blocks[0],
            Block::BlockQuote(BlockQuote {
                content: vec![Paragraph {
                    content: vec![Inline::Code {
                        content: vec![Inline::text("let x")]
                    }]
                }]
            })
        );
        let Block::Paragraph(paragraph) = &blocks[1] else {
            panic!("expected a paragraph");
        };
        assert_eq!(
            paragraph.content[0],
            Inline::Link {
                content: "docs".to_string(),
                alias: "https://example.com".to_string()
            }
        );
        assert_eq!(
            paragraph.content[1],
            Inline::Image {
                content: "logo".to_string(),
                alias: "logo.png".to_string()
            }
        );
        assert_eq!(paragraph.content[2].kind(), InlineKind::BoldItalic);
    }

    #[test]
    fn test_wrong_root_discriminator() {
        assert_eq!(
            errors(json!([{ "type": "slides", "content": [] }])),
            vec!["Type slides is incorrect."]
        );
    }

    #[test]
    fn test_report_is_not_successful() {
        let report = MarkupParser::new()
            .parse(&json!([{ "type": "paragraph", "content": [] }]))
            .unwrap_err();
        assert!(!report.success);
        assert_eq!(report.errors, vec!["Type paragraph is incorrect."]);
    }

    #[test]
    fn test_collects_all_errors() {
        let input = json!([
            { "type": "slide", "content": [
                { "type": "table", "content": [] },
                { "type": "paragraph", "content": [{ "type": "underline", "content": [] }] }
            ] },
            { "type": "deck", "content": [] },
            { "type": "slide", "content": [
                { "type": "heading", "attributes": { "level": 7 }, "content": [text("Too deep")] }
            ] }
        ]);

        assert_eq!(
            errors(input),
            vec![
                "Type table is incorrect.",
                "Type underline is incorrect.",
                "Type deck is incorrect.",
                "Attribute level is incorrect.",
            ]
        );
    }

    #[test]
    fn test_inline_tag_at_block_position() {
        assert_eq!(
            errors(json!([{ "type": "slide", "content": [text("loose")] }])),
            vec!["Type text is incorrect."]
        );
    }

    #[test]
    fn test_block_quote_only_holds_paragraphs() {
        let input = json!([{ "type": "slide", "content": [
            { "type": "blockQuote", "content": [
                { "type": "heading", "attributes": { "level": 2 }, "content": [] }
            ] }
        ] }]);
        assert_eq!(errors(input), vec!["Type heading is incorrect."]);
    }

    #[test]
    fn test_missing_attributes() {
        let input = json!([{ "type": "slide", "content": [
            { "type": "heading", "content": [] },
            { "type": "list", "attributes": { "listType": "numbered" }, "content": [] },
            { "type": "paragraph", "content": [{ "type": "link", "content": "nowhere" }] }
        ] }]);
        assert_eq!(
            errors(input),
            vec![
                "Attribute level is incorrect.",
                "Attribute listType is incorrect.",
                "Attribute alias is incorrect.",
            ]
        );
    }

    #[test]
    fn test_missing_discriminator_and_content() {
        let input = json!([
            { "content": [] },
            { "type": "slide" },
            { "type": 3 },
            "slide"
        ]);
        assert_eq!(
            errors(input),
            vec![
                "Type missing is incorrect.",
                "Content of slide is incorrect.",
                "Type 3 is incorrect.",
                "Type string is incorrect.",
            ]
        );
    }

    #[test]
    fn test_non_array_root() {
        assert_eq!(
            errors(json!({ "type": "slide", "content": [] })),
            vec!["Type object is incorrect."]
        );
    }

    #[test]
    fn test_parse_str() {
        let parser = MarkupParser::new();
        let presentation = parser
            .parse_str(r#"[{"type":"slide","content":[]}]"#)
            .unwrap();
        assert_eq!(presentation.slide_count(), 1);

        assert!(matches!(parser.parse_str("[{"), Err(Error::JsonError(_))));
        assert!(matches!(
            parser.parse_str(r#"[{"type":"nope"}]"#),
            Err(Error::Validation(_))
        ));
    }
}
