//! Position capture for new annotations
//!
//! Turns a user's selection over the rendered verse into the position fields
//! the store persists. Selections arrive either as plain-text offsets or as
//! boundaries inside rendered segments (the data analogue of DOM range
//! boundaries).

use serde::{Deserialize, Serialize};

use super::resolver::CharRange;
use super::units::{slice_utf16, utf16_len};
use super::words::split_into_words;
use super::PositionError;
use crate::annotations::PositionFields;

/// Everything the store needs to persist a new annotation's position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionCapture {
    /// First word touched by the selection (`None` for whitespace-only selections)
    pub start_word_index: Option<usize>,
    /// Last word touched by the selection
    pub end_word_index: Option<usize>,
    pub start_offset: usize,
    pub end_offset: usize,
    pub selected_text: String,
}

impl From<PositionCapture> for PositionFields {
    fn from(capture: PositionCapture) -> Self {
        PositionFields {
            start_word_index: capture.start_word_index,
            end_word_index: capture.end_word_index,
            start_offset: Some(capture.start_offset),
            end_offset: Some(capture.end_offset),
            selected_text: capture.selected_text,
        }
    }
}

/// A selection boundary inside a rendered segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionPoint {
    /// Index of the segment in render order
    pub segment: usize,
    /// UTF-16 offset within that segment's text
    pub offset: usize,
}

/// Capture a selection given as plain-text offsets `[start, end)`
pub fn capture_selection(
    plain_text: &str,
    start: usize,
    end: usize,
) -> Result<PositionCapture, PositionError> {
    let text_len = utf16_len(plain_text);
    if start > end {
        return Err(PositionError::Inverted { start, end });
    }
    if end > text_len {
        return Err(PositionError::OutOfBounds {
            offset: end,
            len: text_len,
        });
    }
    if start == end {
        return Err(PositionError::EmptySelection(start));
    }

    let selected_text = slice_utf16(plain_text, start, end)
        .ok_or(PositionError::OutOfBounds {
            offset: end,
            len: text_len,
        })?
        .to_string();

    let words = split_into_words(plain_text);
    let first = words.iter().position(|w| w.end_index > start);
    let last = words.iter().rposition(|w| w.start_index < end);
    let (start_word_index, end_word_index) = match (first, last) {
        (Some(first), Some(last)) if first <= last => (Some(first), Some(last)),
        _ => (None, None),
    };

    Ok(PositionCapture {
        start_word_index,
        end_word_index,
        start_offset: start,
        end_offset: end,
        selected_text,
    })
}

/// Map a boundary inside a rendered segment to a plain-text offset
pub fn selection_point_to_offset(
    segments: &[CharRange],
    point: SelectionPoint,
) -> Result<usize, PositionError> {
    let segment = segments
        .get(point.segment)
        .ok_or(PositionError::NoSegment(point.segment))?;

    if point.offset > segment.len() {
        return Err(PositionError::OutOfBounds {
            offset: point.offset,
            len: segment.len(),
        });
    }

    Ok(segment.start + point.offset)
}

/// Capture a selection given as two rendered-segment boundaries.
///
/// `anchor` and `focus` may come in either order (backwards selections).
pub fn capture_rendered_selection(
    plain_text: &str,
    segments: &[CharRange],
    anchor: SelectionPoint,
    focus: SelectionPoint,
) -> Result<PositionCapture, PositionError> {
    let a = selection_point_to_offset(segments, anchor)?;
    let b = selection_point_to_offset(segments, focus)?;
    capture_selection(plain_text, a.min(b), a.max(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "In the beginning God created";

    #[test]
    fn test_capture_whole_words() {
        let capture = capture_selection(TEXT, 7, 20).unwrap();
        assert_eq!(capture.start_word_index, Some(2));
        assert_eq!(capture.end_word_index, Some(3));
        assert_eq!(capture.selected_text, "beginning God");
    }

    #[test]
    fn test_capture_partial_words_and_trailing_space() {
        // "ginning God " - starts mid-word, ends on the following space
        let capture = capture_selection(TEXT, 10, 21).unwrap();
        assert_eq!(capture.start_word_index, Some(2));
        assert_eq!(capture.end_word_index, Some(3));
        assert_eq!(capture.start_offset, 10);
        assert_eq!(capture.end_offset, 21);
    }

    #[test]
    fn test_capture_whitespace_only() {
        let capture = capture_selection("In  the", 2, 4).unwrap();
        assert_eq!(capture.start_word_index, None);
        assert_eq!(capture.end_word_index, None);
        assert_eq!(capture.selected_text, "  ");
    }

    #[test]
    fn test_capture_errors() {
        assert!(matches!(capture_selection(TEXT, 5, 3), Err(PositionError::Inverted { .. })));
        assert!(matches!(capture_selection(TEXT, 3, 3), Err(PositionError::EmptySelection(3))));
        assert!(matches!(
            capture_selection(TEXT, 0, 29),
            Err(PositionError::OutOfBounds { offset: 29, len: 28 })
        ));
    }

    #[test]
    fn test_capture_into_fields() {
        let fields: PositionFields = capture_selection(TEXT, 0, 6).unwrap().into();
        assert_eq!(fields.start_word_index, Some(0));
        assert_eq!(fields.end_word_index, Some(1));
        assert_eq!(fields.start_offset, Some(0));
        assert_eq!(fields.selected_text, "In the");
    }

    #[test]
    fn test_rendered_selection_backwards() {
        let segments = [CharRange::new(0, 7), CharRange::new(7, 20), CharRange::new(20, 28)];
        let anchor = SelectionPoint { segment: 1, offset: 13 };
        let focus = SelectionPoint { segment: 1, offset: 0 };

        let capture = capture_rendered_selection(TEXT, &segments, anchor, focus).unwrap();
        assert_eq!((capture.start_offset, capture.end_offset), (7, 20));

        let bad = SelectionPoint { segment: 5, offset: 0 };
        assert_eq!(
            selection_point_to_offset(&segments, bad),
            Err(PositionError::NoSegment(5))
        );
        let past = SelectionPoint { segment: 0, offset: 8 };
        assert!(selection_point_to_offset(&segments, past).is_err());
    }
}
