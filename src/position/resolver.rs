//! Range resolution policy
//!
//! Turns an annotation's stored position into a character range over the
//! current plain text: word indices first, legacy offsets second. Anything
//! that no longer fits the text degrades to "no range".

use serde::Serialize;

use super::units::{floor_char_boundary, utf16_len};
use super::words::{split_into_words, word_indices_to_char_offsets};
use crate::annotations::{Position, PositionFields, SpanRole};

/// End-exclusive range of UTF-16 offsets into a verse's plain text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CharRange {
    pub start: usize,
    pub end: usize,
}

impl CharRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Zero-width and inverted ranges are empty
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Strict overlap with `[start, end)`; touching at a boundary is not overlap
    pub fn overlaps(&self, start: usize, end: usize) -> bool {
        self.start < end && self.end > start
    }
}

/// Outcome of resolving one annotation against one verse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedRange {
    /// Inline range over the plain text
    Range(CharRange),
    /// No position data at all: a whole-verse (marker-only) annotation
    WholeVerse,
    /// Position data exists but no longer addresses this text
    Unresolvable,
}

impl ResolvedRange {
    pub fn range(self) -> Option<CharRange> {
        match self {
            ResolvedRange::Range(range) => Some(range),
            _ => None,
        }
    }
}

/// Resolve stored position fields against `plain_text`.
///
/// Tries each stored representation in order and keeps the first non-empty
/// range. Legacy offsets are clamped to the text length and snapped out of
/// surrogate pairs.
pub fn resolve_range(plain_text: &str, fields: &PositionFields) -> ResolvedRange {
    let text_len = utf16_len(plain_text);
    let mut has_position = false;

    for candidate in fields.candidates() {
        has_position = true;
        let range = match candidate {
            Position::WordRange { start, end } => {
                word_indices_to_char_offsets(plain_text, Some(start), Some(end))
            }
            Position::CharOffsetRange { start, end } => clamp_offsets(plain_text, start, end),
            Position::WholeVerse => None,
        };

        match range {
            Some(range) if !range.is_empty() => return ResolvedRange::Range(range),
            _ => tracing::debug!(
                "Position {:?} does not fit text of length {}",
                candidate,
                text_len
            ),
        }
    }

    if has_position {
        ResolvedRange::Unresolvable
    } else {
        ResolvedRange::WholeVerse
    }
}

/// Resolve position fields for one verse of a possibly multi-verse span.
///
/// The stored start addresses the first verse and the stored end the last:
/// the first verse is covered from the start to the end of its text, middle
/// verses entirely, the last verse from its beginning to the stored end.
pub fn resolve_span_range(plain_text: &str, fields: &PositionFields, role: SpanRole) -> ResolvedRange {
    if role == SpanRole::Single {
        return resolve_range(plain_text, fields);
    }
    if fields.is_whole_verse() {
        return ResolvedRange::WholeVerse;
    }

    let text_len = utf16_len(plain_text);
    let range = match role {
        SpanRole::First => span_start(plain_text, fields, text_len).map(|s| CharRange::new(s, text_len)),
        SpanRole::Last => span_end(plain_text, fields, text_len).map(|e| CharRange::new(0, e)),
        SpanRole::Middle | SpanRole::Single => Some(CharRange::new(0, text_len)),
    };

    match range {
        Some(range) if !range.is_empty() => ResolvedRange::Range(range),
        _ => ResolvedRange::Unresolvable,
    }
}

// an offset inside a surrogate pair moves to the start of that character,
// so every cut lands on a char boundary
fn clamp_offsets(plain_text: &str, start: usize, end: usize) -> Option<CharRange> {
    if start >= end {
        return None;
    }
    let range = CharRange::new(
        floor_char_boundary(plain_text, start),
        floor_char_boundary(plain_text, end),
    );
    (!range.is_empty()).then_some(range)
}

fn span_start(plain_text: &str, fields: &PositionFields, text_len: usize) -> Option<usize> {
    fields
        .start_word_index
        .and_then(|index| split_into_words(plain_text).get(index).map(|w| w.start_index))
        .or_else(|| fields.start_offset.filter(|&offset| offset < text_len))
        .map(|offset| floor_char_boundary(plain_text, offset))
}

fn span_end(plain_text: &str, fields: &PositionFields, text_len: usize) -> Option<usize> {
    fields
        .end_word_index
        .and_then(|index| split_into_words(plain_text).get(index).map(|w| w.end_index))
        .or_else(|| fields.end_offset.map(|offset| offset.min(text_len)))
        .map(|offset| floor_char_boundary(plain_text, offset))
}
