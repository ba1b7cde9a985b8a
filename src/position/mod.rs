//! Position resolution
//!
//! One coordinate system for every annotation: UTF-16 offsets into the plain
//! text of a verse. This module converts into it from
//!
//! - word indices (preferred, survive text normalization)
//! - legacy character offsets (fallback)
//! - rendered-segment selection boundaries (new selections)

mod capture;
mod plain_text;
mod resolver;
pub mod units;
mod words;

pub use capture::{
    capture_rendered_selection, capture_selection, selection_point_to_offset, PositionCapture,
    SelectionPoint,
};
pub use plain_text::extract_plain_text;
pub use resolver::{resolve_range, resolve_span_range, CharRange, ResolvedRange};
pub use words::{split_into_words, word_indices_to_char_offsets, Word};

use thiserror::Error;

/// Selection errors; only raised for selections handed in by the caller
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PositionError {
    #[error("Selection is empty at offset {0}")]
    EmptySelection(usize),

    #[error("Selection start {start} is after its end {end}")]
    Inverted { start: usize, end: usize },

    #[error("Offset {offset} is out of bounds (length {len})")]
    OutOfBounds { offset: usize, len: usize },

    #[error("No rendered segment at index {0}")]
    NoSegment(usize),
}
