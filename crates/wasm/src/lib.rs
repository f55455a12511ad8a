//! WASM bindings for the slide editor.
//!
//! This crate exposes parsing, HTML rendering, and region tokenizing to the
//! JavaScript editor and preview pane.

use deck_core::{HtmlRenderer, MarkupParser, Presentation};
use deck_regions::{tokenize, RegionRegistry, TaggedRegion};
use serde::Serialize;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    // Set up better panic messages in the console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Result of validating a slide description.
#[derive(Debug, Serialize)]
pub struct ParseResult {
    /// True when the description validated.
    pub success: bool,
    /// The document tree, present on success.
    pub presentation: Option<Presentation>,
    /// Validation messages, empty on success.
    pub errors: Vec<String>,
}

/// Validate a slide description given as JSON text.
///
/// Malformed JSON throws; validation problems are returned in `errors`.
#[wasm_bindgen]
pub fn parse_presentation(source: &str) -> Result<JsValue, JsValue> {
    let result = parse_presentation_impl(source).map_err(|e| JsValue::from_str(&e))?;

    serde_wasm_bindgen::to_value(&result)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

fn parse_presentation_impl(source: &str) -> Result<ParseResult, String> {
    let value: serde_json::Value =
        serde_json::from_str(source).map_err(|e| format!("JSON parsing error: {}", e))?;

    Ok(match MarkupParser::new().parse(&value) {
        Ok(presentation) => ParseResult {
            success: true,
            presentation: Some(presentation),
            errors: Vec::new(),
        },
        Err(report) => ParseResult {
            success: false,
            presentation: None,
            errors: report.errors,
        },
    })
}

/// Render a slide description given as JSON text to an HTML fragment.
///
/// # Arguments
/// * `source` - The slide description
/// * `typed` - Validate first and render the document tree
/// * `sections` - Wrap each slide in a `<section>` element
#[wasm_bindgen]
pub fn render_presentation(source: &str, typed: bool, sections: bool) -> Result<String, JsValue> {
    render_presentation_impl(source, typed, sections).map_err(|e| JsValue::from_str(&e))
}

fn render_presentation_impl(source: &str, typed: bool, sections: bool) -> Result<String, String> {
    let renderer = HtmlRenderer::new().with_slide_wrapper(sections);

    if !typed {
        return renderer.render_str(source).map_err(|e| e.to_string());
    }

    MarkupParser::new()
        .parse_str(source)
        .map(|presentation| renderer.render_presentation(&presentation))
        .map_err(|e| e.to_string())
}

/// Tokenize editor text into literal runs and tag tokens.
#[wasm_bindgen]
pub fn tokenize_regions(text: &str) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&tokenize(text))
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Tokenize editor text and pair its tags into regions.
#[wasm_bindgen]
pub fn collect_regions(text: &str) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&collect_regions_impl(text))
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

fn collect_regions_impl(text: &str) -> Vec<Rc<TaggedRegion>> {
    RegionRegistry::from_tokens(&tokenize(text)).areas().to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DECK: &str = r#"[{"type":"slide","content":[
        {"type":"paragraph","content":[{"type":"bold","content":[{"type":"text","content":"Hi"}]}]}
    ]}]"#;

    #[test]
    fn test_parse_success() {
        let result = parse_presentation_impl(DECK).unwrap();
        assert!(result.success);
        assert_eq!(result.presentation.map(|p| p.slide_count()), Some(1));
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_parse_validation_errors() {
        let result = parse_presentation_impl(r#"[{"type":"page"}]"#).unwrap();
        assert!(!result.success);
        assert!(result.presentation.is_none());
        assert_eq!(result.errors, vec!["Type page is incorrect."]);
    }

    #[test]
    fn test_parse_bad_json() {
        assert!(parse_presentation_impl("[").is_err());
    }

    #[test]
    fn test_render_raw_and_typed() {
        assert_eq!(
            render_presentation_impl(DECK, false, false).unwrap(),
            "<p><strong>Hi</strong></p>"
        );
        assert_eq!(
            render_presentation_impl(DECK, true, true).unwrap(),
            "<section class=\"slide\"><p><strong>Hi</strong></p></section>"
        );
        assert!(render_presentation_impl(r#"[{"type":"page"}]"#, true, false).is_err());
    }

    #[test]
    fn test_collect_regions() {
        let regions = collect_regions_impl(r#"Say <Loud: id="7">hello</Loud>!"#);
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].id, "7");
        assert_eq!(regions[0].text, "hello");
        assert_eq!(regions[0].metadata.color, "black");
    }
}
