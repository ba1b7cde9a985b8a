//! JavaScript interface
//!
//! `VerseAnnotator` is what the study app's UI talks to. Annotation lists
//! come in as the store's plain JS objects; plans and captures go back as JS
//! objects. Errors cross the boundary as strings.

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::annotations::{self, Annotation};
use crate::compositor;
use crate::config::RenderConfig;
use crate::position::{self, CharRange, SelectionPoint};

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Verse renderer and selection capture for the study UI
#[wasm_bindgen]
pub struct VerseAnnotator {
    config: RenderConfig,
}

#[wasm_bindgen]
impl VerseAnnotator {
    /// Create an annotator with the default render config
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            config: RenderConfig::default(),
        }
    }

    /// Create an annotator from a JSON render config
    #[wasm_bindgen(js_name = "withConfig")]
    pub fn with_config(config_json: &str) -> Result<VerseAnnotator, JsValue> {
        let config = RenderConfig::from_json(config_json).map_err(to_js_error)?;
        Ok(Self { config })
    }

    /// Strip markup from a verse's source text
    #[wasm_bindgen(js_name = "extractPlainText")]
    pub fn extract_plain_text(&self, source: &str) -> String {
        position::extract_plain_text(source)
    }

    /// Word tokens of a plain text, with UTF-16 offsets
    #[wasm_bindgen(js_name = "splitIntoWords")]
    pub fn split_into_words(&self, text: &str) -> Result<JsValue, JsValue> {
        to_js(&position::split_into_words(text))
    }

    /// Build the structured render plan for a verse
    #[wasm_bindgen(js_name = "renderVerse")]
    pub fn render_verse(&self, source: &str, verse: u32, annotations: JsValue) -> Result<JsValue, JsValue> {
        let annotations = annotations_from_js(annotations)?;
        let plan = compositor::render_verse(source, verse, &annotations, &self.config);
        to_js(&plan)
    }

    /// Render a verse straight to markup
    #[wasm_bindgen(js_name = "renderVerseHtml")]
    pub fn render_verse_html(&self, source: &str, verse: u32, annotations: JsValue) -> Result<String, JsValue> {
        let annotations = annotations_from_js(annotations)?;
        Ok(compositor::render_verse_html(source, verse, &annotations, &self.config))
    }

    /// Capture a selection given as plain-text UTF-16 offsets
    #[wasm_bindgen(js_name = "captureSelection")]
    pub fn capture_selection(&self, source: &str, start: usize, end: usize) -> Result<JsValue, JsValue> {
        let plain_text = position::extract_plain_text(source);
        let capture = position::capture_selection(&plain_text, start, end).map_err(to_js_error)?;
        to_js(&capture)
    }

    /// Capture a selection given as boundaries inside rendered segments.
    ///
    /// `segments` is the `segments` array of a plan from `renderVerse`;
    /// `anchor`/`focus` are `{segment, offset}` objects in either order.
    #[wasm_bindgen(js_name = "captureRenderedSelection")]
    pub fn capture_rendered_selection(
        &self,
        source: &str,
        segments: JsValue,
        anchor: JsValue,
        focus: JsValue,
    ) -> Result<JsValue, JsValue> {
        let plain_text = position::extract_plain_text(source);
        let ranges = segment_ranges(segments)?;
        let anchor: SelectionPoint = serde_wasm_bindgen::from_value(anchor)?;
        let focus: SelectionPoint = serde_wasm_bindgen::from_value(focus)?;

        let capture = position::capture_rendered_selection(&plain_text, &ranges, anchor, focus)
            .map_err(to_js_error)?;
        to_js(&capture)
    }

    /// Map one rendered-segment boundary to a plain-text offset
    #[wasm_bindgen(js_name = "selectionToOffset")]
    pub fn selection_to_offset(&self, segments: JsValue, point: JsValue) -> Result<usize, JsValue> {
        let ranges = segment_ranges(segments)?;
        let point: SelectionPoint = serde_wasm_bindgen::from_value(point)?;
        position::selection_point_to_offset(&ranges, point).map_err(to_js_error)
    }
}

impl Default for VerseAnnotator {
    fn default() -> Self {
        Self::new()
    }
}

/// The part of a plan segment a selection needs
#[derive(Deserialize)]
struct SegmentBounds {
    start: usize,
    end: usize,
}

fn segment_ranges(segments: JsValue) -> Result<Vec<CharRange>, JsValue> {
    let bounds: Vec<SegmentBounds> = serde_wasm_bindgen::from_value(segments)?;
    Ok(bounds.into_iter().map(|b| CharRange::new(b.start, b.end)).collect())
}

// Goes through JSON text so integer fields keep their integer type inside
// the untagged record decoding.
fn annotations_from_js(value: JsValue) -> Result<Vec<Annotation>, JsValue> {
    let json: String = js_sys::JSON::stringify(&value)?.into();
    annotations::parse_annotations(&json).map_err(to_js_error)
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn to_js_error(error: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotator_creation() {
        let annotator = VerseAnnotator::default();
        assert_eq!(annotator.config.class_prefix, "va");
        assert_eq!(annotator.extract_plain_text("<b>Amen</b>"), "Amen");
    }

    #[test]
    fn test_annotator_with_config() {
        let annotator = VerseAnnotator::with_config(r#"{"classPrefix": "study"}"#).unwrap();
        assert_eq!(annotator.config.class_prefix, "study");
    }
}
