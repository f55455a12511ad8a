//! HTML rendering for slide decks.
//!
//! Two entry points share one output convention:
//!
//! - [`HtmlRenderer::render`] walks the untyped description directly. It knows
//!   a smaller grammar than the parser (paragraphs, headings, lists, and the
//!   bold/italic/text inlines) and skips anything else with a warning.
//! - [`HtmlRenderer::render_presentation`] renders a validated
//!   [`Presentation`] and covers every element of the document model.
//!
//! Text is inserted verbatim. No escaping happens and no document wrapper
//! is emitted.

use crate::error::Result;
use crate::parser::value_kind;
use crate::types::{
    Block, BlockKind, Inline, InlineKind, List, ListContent, ListEntry, ListType, Presentation,
    SLIDE_TAG,
};
use serde_json::Value;

/// Renderer producing HTML fragments for the preview pane.
#[derive(Debug, Clone, Default)]
pub struct HtmlRenderer {
    /// Wrap each slide in `<section class="slide">`.
    slide_wrapper: bool,
}

impl HtmlRenderer {
    /// Create a renderer emitting plain concatenated slide HTML.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the per-slide `<section>` wrapper.
    pub fn with_slide_wrapper(mut self, enabled: bool) -> Self {
        self.slide_wrapper = enabled;
        self
    }

    /// Render an untyped slide description.
    ///
    /// Unrecognized content is logged and left out; rendering never fails.
    pub fn render(&self, input: &Value) -> String {
        let Some(slides) = input.as_array() else {
            log::warn!("Expected an array of slides, got {}", value_kind(input));
            return String::new();
        };

        let mut html = String::new();
        for slide in slides {
            match tag_of(slide) {
                Some(SLIDE_TAG) => {
                    self.open_slide(&mut html);
                    for block in children(slide) {
                        raw_block(&mut html, block);
                    }
                    self.close_slide(&mut html);
                }
                other => log::warn!("Skipping slide with type {}", describe(other)),
            }
        }
        html
    }

    /// Render an untyped slide description given as JSON text.
    pub fn render_str(&self, text: &str) -> Result<String> {
        let value: Value = serde_json::from_str(text)?;
        Ok(self.render(&value))
    }

    /// Render a validated document tree.
    pub fn render_presentation(&self, presentation: &Presentation) -> String {
        let mut html = String::new();
        for slide in &presentation.slides {
            self.open_slide(&mut html);
            for block in &slide.content {
                typed_block(&mut html, block);
            }
            self.close_slide(&mut html);
        }
        html
    }

    fn open_slide(&self, html: &mut String) {
        if self.slide_wrapper {
            html.push_str("<section class=\"slide\">");
        }
    }

    fn close_slide(&self, html: &mut String) {
        if self.slide_wrapper {
            html.push_str("</section>");
        }
    }
}

fn tag_of(node: &Value) -> Option<&str> {
    node.get("type").and_then(Value::as_str)
}

fn describe(tag: Option<&str>) -> &str {
    tag.unwrap_or("<missing>")
}

fn children(node: &Value) -> &[Value] {
    node.get("content")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn attribute<'v>(node: &'v Value, name: &str) -> Option<&'v Value> {
    node.get("attributes")?.get(name)
}

fn raw_block(html: &mut String, node: &Value) {
    let tag = tag_of(node);
    let Some(kind) = tag.and_then(BlockKind::from_tag) else {
        log::warn!("Skipping unrecognized block type {}", describe(tag));
        return;
    };

    match kind {
        BlockKind::Paragraph => {
            html.push_str("<p>");
            raw_inlines(html, children(node));
            html.push_str("</p>");
        }
        BlockKind::Heading => {
            let level = attribute(node, "level")
                .and_then(Value::as_u64)
                .filter(|level| (1..=6).contains(level));
            match level {
                Some(level) => {
                    html.push_str(&format!("<h{}>", level));
                    raw_inlines(html, children(node));
                    html.push_str(&format!("</h{}>", level));
                }
                None => log::warn!("Skipping heading without a valid level"),
            }
        }
        BlockKind::List => raw_list(html, node),
        BlockKind::BlockQuote => {
            log::warn!("Skipping unsupported block type {}", kind.tag());
        }
    }
}

fn raw_list(html: &mut String, node: &Value) {
    let Some(list_type) = attribute(node, "listType")
        .and_then(Value::as_str)
        .and_then(ListType::from_attribute)
    else {
        log::warn!("Skipping list without a valid listType");
        return;
    };

    let element = list_type.html_tag();
    html.push_str(&format!("<{}>", element));
    for item in children(node) {
        html.push_str("<li>");
        if tag_of(item) == Some(BlockKind::List.tag()) {
            raw_list(html, item);
        } else {
            raw_inlines(html, children(item));
        }
        html.push_str("</li>");
    }
    html.push_str(&format!("</{}>", element));
}

fn raw_inlines(html: &mut String, nodes: &[Value]) {
    for node in nodes {
        raw_inline(html, node);
    }
}

fn raw_inline(html: &mut String, node: &Value) {
    let tag = tag_of(node);
    let Some(kind) = tag.and_then(InlineKind::from_tag) else {
        log::warn!("Skipping unrecognized inline type {}", describe(tag));
        return;
    };

    match kind {
        InlineKind::Text => {
            if let Some(content) = node.get("content").and_then(Value::as_str) {
                html.push_str(content);
            }
        }
        InlineKind::Bold => {
            html.push_str("<strong>");
            raw_inlines(html, children(node));
            html.push_str("</strong>");
        }
        InlineKind::Italic => {
            html.push_str("<em>");
            raw_inlines(html, children(node));
            html.push_str("</em>");
        }
        InlineKind::BoldItalic => {
            html.push_str("<em><strong>");
            raw_inlines(html, children(node));
            html.push_str("</strong></em>");
        }
        InlineKind::Code | InlineKind::Link | InlineKind::Image => {
            log::warn!("Skipping unsupported inline type {}", kind.tag());
        }
    }
}

fn typed_block(html: &mut String, block: &Block) {
    match block {
        Block::Paragraph(paragraph) => {
            html.push_str("<p>");
            typed_inlines(html, &paragraph.content);
            html.push_str("</p>");
        }
        Block::Heading(heading) => {
            html.push_str(&format!("<h{}>", heading.level));
            typed_inlines(html, &heading.content);
            html.push_str(&format!("</h{}>", heading.level));
        }
        Block::List(list) => typed_list(html, list),
        Block::BlockQuote(quote) => {
            html.push_str("<blockquote>");
            for paragraph in &quote.content {
                html.push_str("<p>");
                typed_inlines(html, &paragraph.content);
                html.push_str("</p>");
            }
            html.push_str("</blockquote>");
        }
    }
}

fn typed_list(html: &mut String, list: &List) {
    let element = list.list_type.html_tag();
    html.push_str(&format!("<{}>", element));
    for entry in &list.content {
        html.push_str("<li>");
        match entry {
            ListEntry::ListItem(item) => {
                for content in &item.content {
                    match content {
                        ListContent::Block(block) => typed_block(html, block),
                        ListContent::Inline(inline) => typed_inline(html, inline),
                    }
                }
            }
            ListEntry::List(nested) => typed_list(html, nested),
        }
        html.push_str("</li>");
    }
    html.push_str(&format!("</{}>", element));
}

fn typed_inlines(html: &mut String, inlines: &[Inline]) {
    for inline in inlines {
        typed_inline(html, inline);
    }
}

fn typed_inline(html: &mut String, inline: &Inline) {
    let (open, close, content) = match inline {
        Inline::Text { content } => {
            html.push_str(content);
            return;
        }
        Inline::Link { content, alias } => {
            html.push_str(&format!("<a href=\"{}\">{}</a>", alias, content));
            return;
        }
        Inline::Image { content, alias } => {
            html.push_str(&format!("<img src=\"{}\" alt=\"{}\">", alias, content));
            return;
        }
        Inline::Bold { content } => ("<strong>", "</strong>", content),
        Inline::Italic { content } => ("<em>", "</em>", content),
        Inline::BoldItalic { content } => ("<em><strong>", "</strong></em>", content),
        Inline::Code { content } => ("<code>", "</code>", content),
    };
    html.push_str(open);
    typed_inlines(html, content);
    html.push_str(close);
}
