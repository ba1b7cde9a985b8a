//! Annotation module
//!
//! Records that mark verse text:
//!
//! - Text annotations: highlight, text color, underline
//! - Symbols: verse markers (before/after) or inline glyphs (center)
//!
//! Every record carries word-index and/or legacy character-offset position
//! fields. Records are owned by an external store; this module only models
//! and decodes them.

mod palette;
mod types;

pub use palette::{glyph_for, symbol_keys, Color, UnderlineStyle};
pub use types::{
    Annotation, AnnotationMeta, Position, PositionFields, SpanRole, SymbolAnnotation,
    SymbolPlacement, SymbolPosition, SymbolTag, TextAnnotation, TextKind, VerseRef,
};

use serde_json::Value;

use crate::error::{Error, Result};

/// Decode a JSON array of annotation records.
///
/// Records that fail to decode are skipped so one bad row never blanks a
/// whole chapter. Only a non-array document is an error.
pub fn parse_annotations(json: &str) -> Result<Vec<Annotation>> {
    match serde_json::from_str::<Value>(json)? {
        Value::Array(values) => Ok(from_values(values)),
        other => Err(Error::InvalidInput(format!(
            "expected an array of annotations, got {}",
            json_kind(&other)
        ))),
    }
}

/// Decode already-parsed records, skipping the ones that don't fit
pub fn from_values(values: Vec<Value>) -> Vec<Annotation> {
    values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value::<Annotation>(value) {
            Ok(annotation) => Some(annotation),
            Err(e) => {
                tracing::warn!("Skipping annotation record {}: {}", index, e);
                None
            }
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
