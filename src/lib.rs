//! Verse Annotator
//!
//! The annotation core of a Bible study app, compiled for the browser:
//! - Position resolution between word indices, legacy character offsets and
//!   rendered selections
//! - Segment composition of overlapping highlights, text colors, underlines
//!   and symbols into a render plan or markup
//!
//! Persistence, translation fetching and UI live outside this crate; it only
//! maps (verse text, annotation records) to render output and selections to
//! position records.
//!
//! ```
//! use verse_annotator::annotations::{Annotation, Color, PositionFields, VerseRef};
//! use verse_annotator::compositor::compose_segments;
//!
//! let verse = VerseRef::new("GEN", 1, 1);
//! let highlight = Annotation::new_highlight("KJV", verse, Color::Yellow, PositionFields::words(2, 3));
//! let annotations = [highlight];
//!
//! let segments = compose_segments("In the beginning God created", 1, &annotations);
//! let texts: Vec<_> = segments.iter().map(|s| s.text).collect();
//! assert_eq!(texts, ["In the ", "beginning God", " created"]);
//! ```

pub mod annotations;
pub mod bindings;
pub mod compositor;
pub mod config;
pub mod error;
pub mod position;

pub use annotations::{Annotation, PositionFields, VerseRef};
pub use bindings::VerseAnnotator;
pub use compositor::{compose_segments, render_verse, render_verse_html, Segment, VersePlan};
pub use config::RenderConfig;
pub use error::{Error, Result};
pub use position::{
    capture_selection, extract_plain_text, split_into_words, word_indices_to_char_offsets,
    PositionCapture,
};
