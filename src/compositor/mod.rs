//! Segment compositor
//!
//! Layers any number of overlapping annotations over a verse:
//!
//! 1. Keep the annotations anchored to the verse; split markers from ranges
//! 2. Resolve each range, grouping identical ranges together
//! 3. Cut the text at every range boundary
//! 4. Attach every overlapping range to each segment and merge its style
//!
//! Pure and synchronous: every call takes a complete snapshot of the
//! annotations and returns a fresh plan.

mod render;
mod segments;
mod style;

pub use render::{
    render_verse, render_verse_html, InlineSymbol, Marker, RenderSegment, VersePlan,
};
pub use segments::{
    classify, compose_ranges, compose_segments, AnnotationRange, Segment, VerseAnnotations,
};
pub use style::{CombinedStyle, Underline};
