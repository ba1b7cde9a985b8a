//! Annotation records as persisted by the study app's store
//!
//! Records are camelCase JSON with a `type` tag. Text annotations
//! (`highlight`, `textColor`, `underline`) are anchored by a verse span,
//! symbols by a single `ref` with an optional `endRef`. Both carry the
//! same position fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::palette::{Color, UnderlineStyle};

/// A single verse
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VerseRef {
    pub book: String,
    pub chapter: u32,
    pub verse: u32,
}

impl VerseRef {
    pub fn new(book: &str, chapter: u32, verse: u32) -> Self {
        Self {
            book: book.to_string(),
            chapter,
            verse,
        }
    }
}

/// Fields shared by every annotation record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationMeta {
    /// Unique identifier (UUID)
    pub id: String,
    /// Translation the annotation was made against
    pub module_id: String,
    /// Keyword/preset that produced this annotation, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AnnotationMeta {
    fn new(module_id: &str) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            module_id: module_id.to_string(),
            preset_id: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Stored position of an annotation within its verse text
///
/// Word indices are preferred; character offsets are the legacy form kept
/// for records created before word tracking existed. Offsets are UTF-16
/// code units.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_word_index: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_word_index: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_offset: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_offset: Option<usize>,
    /// Text captured at creation time; display only, never a lookup key
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub selected_text: String,
}

/// Explicit view of the stored position representations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// Inclusive word index pair
    WordRange { start: usize, end: usize },
    /// Legacy end-exclusive character offsets
    CharOffsetRange { start: usize, end: usize },
    /// No position data: the annotation applies to the verse as a whole
    WholeVerse,
}

impl PositionFields {
    /// Position by inclusive word indices
    pub fn words(start: usize, end: usize) -> Self {
        Self {
            start_word_index: Some(start),
            end_word_index: Some(end),
            ..Self::default()
        }
    }

    /// Position by legacy character offsets
    pub fn offsets(start: usize, end: usize) -> Self {
        Self {
            start_offset: Some(start),
            end_offset: Some(end),
            ..Self::default()
        }
    }

    pub fn with_offsets(mut self, start: usize, end: usize) -> Self {
        self.start_offset = Some(start);
        self.end_offset = Some(end);
        self
    }

    pub fn with_selected_text(mut self, text: &str) -> Self {
        self.selected_text = text.to_string();
        self
    }

    /// Stored representations in resolution order: word range first, then
    /// character offsets. Incomplete pairs are skipped.
    pub fn candidates(&self) -> impl Iterator<Item = Position> {
        let words = match (self.start_word_index, self.end_word_index) {
            (Some(start), Some(end)) => Some(Position::WordRange { start, end }),
            _ => None,
        };
        let offsets = match (self.start_offset, self.end_offset) {
            (Some(start), Some(end)) => Some(Position::CharOffsetRange { start, end }),
            _ => None,
        };
        words.into_iter().chain(offsets)
    }

    /// The preferred stored representation
    pub fn position(&self) -> Position {
        self.candidates().next().unwrap_or(Position::WholeVerse)
    }

    pub fn is_whole_verse(&self) -> bool {
        self.position() == Position::WholeVerse
    }
}

/// Kind of text annotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextKind {
    Highlight,
    TextColor,
    Underline,
}

/// Highlight, text color or underline over a verse span
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextAnnotation {
    #[serde(rename = "type")]
    pub kind: TextKind,
    #[serde(flatten)]
    pub meta: AnnotationMeta,
    pub color: Color,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underline_style: Option<UnderlineStyle>,
    pub start_ref: VerseRef,
    pub end_ref: VerseRef,
    #[serde(flatten)]
    pub range: PositionFields,
}

/// Tag value for symbol records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolTag {
    Symbol,
}

/// Where a symbol sits relative to the verse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolPosition {
    /// Marker ahead of the verse text
    Before,
    /// Marker after the verse text
    After,
    /// Inline over a text range
    Center,
}

/// How a centered symbol is drawn over its range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolPlacement {
    Above,
    #[default]
    Overlay,
}

/// Glyph attached to a verse or a range within it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolAnnotation {
    #[serde(rename = "type")]
    pub tag: SymbolTag,
    #[serde(flatten)]
    pub meta: AnnotationMeta,
    /// Key into the glyph table
    pub symbol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    pub position: SymbolPosition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placement: Option<SymbolPlacement>,
    #[serde(rename = "ref")]
    pub verse_ref: VerseRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_ref: Option<VerseRef>,
    #[serde(flatten)]
    pub range: PositionFields,
}

/// A complete annotation record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Annotation {
    Text(TextAnnotation),
    Symbol(SymbolAnnotation),
}

/// Where a verse sits inside an annotation's verse span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanRole {
    /// Span starts and ends on this verse
    Single,
    /// First verse of a longer span
    First,
    /// Strictly inside the span
    Middle,
    /// Last verse of a longer span
    Last,
}

impl SpanRole {
    fn of(start: u32, end: u32, verse: u32) -> Option<Self> {
        if verse < start || verse > end {
            return None;
        }
        Some(match (verse == start, verse == end) {
            (true, true) => SpanRole::Single,
            (true, false) => SpanRole::First,
            (false, true) => SpanRole::Last,
            (false, false) => SpanRole::Middle,
        })
    }
}

impl TextAnnotation {
    pub fn new(
        kind: TextKind,
        module_id: &str,
        verse_ref: VerseRef,
        color: Color,
        range: PositionFields,
    ) -> Self {
        Self {
            kind,
            meta: AnnotationMeta::new(module_id),
            color,
            underline_style: None,
            end_ref: verse_ref.clone(),
            start_ref: verse_ref,
            range,
        }
    }

    pub fn with_underline_style(mut self, style: UnderlineStyle) -> Self {
        self.underline_style = Some(style);
        self
    }

    /// Extend the span to a later verse
    pub fn ending_at(mut self, end_ref: VerseRef) -> Self {
        self.end_ref = end_ref;
        self
    }

    pub fn with_preset(mut self, preset_id: &str) -> Self {
        self.meta.preset_id = Some(preset_id.to_string());
        self
    }
}

impl SymbolAnnotation {
    pub fn new(module_id: &str, verse_ref: VerseRef, symbol: &str, position: SymbolPosition) -> Self {
        Self {
            tag: SymbolTag::Symbol,
            meta: AnnotationMeta::new(module_id),
            symbol: symbol.to_string(),
            color: None,
            position,
            placement: None,
            verse_ref,
            end_ref: None,
            range: PositionFields::default(),
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_placement(mut self, placement: SymbolPlacement) -> Self {
        self.placement = Some(placement);
        self
    }

    pub fn with_range(mut self, range: PositionFields) -> Self {
        self.range = range;
        self
    }

    pub fn ending_at(mut self, end_ref: VerseRef) -> Self {
        self.end_ref = Some(end_ref);
        self
    }

    pub fn with_preset(mut self, preset_id: &str) -> Self {
        self.meta.preset_id = Some(preset_id.to_string());
        self
    }

    /// Placement used when drawing a centered symbol
    pub fn effective_placement(&self) -> SymbolPlacement {
        self.placement.unwrap_or_default()
    }
}

impl Annotation {
    /// Create a new highlight annotation
    pub fn new_highlight(module_id: &str, verse_ref: VerseRef, color: Color, range: PositionFields) -> Self {
        TextAnnotation::new(TextKind::Highlight, module_id, verse_ref, color, range).into()
    }

    /// Create a new text color annotation
    pub fn new_text_color(module_id: &str, verse_ref: VerseRef, color: Color, range: PositionFields) -> Self {
        TextAnnotation::new(TextKind::TextColor, module_id, verse_ref, color, range).into()
    }

    /// Create a new underline annotation
    pub fn new_underline(
        module_id: &str,
        verse_ref: VerseRef,
        color: Color,
        style: UnderlineStyle,
        range: PositionFields,
    ) -> Self {
        TextAnnotation::new(TextKind::Underline, module_id, verse_ref, color, range)
            .with_underline_style(style)
            .into()
    }

    /// Create a new symbol annotation
    pub fn new_symbol(module_id: &str, verse_ref: VerseRef, symbol: &str, position: SymbolPosition) -> Self {
        SymbolAnnotation::new(module_id, verse_ref, symbol, position).into()
    }

    pub fn meta(&self) -> &AnnotationMeta {
        match self {
            Annotation::Text(text) => &text.meta,
            Annotation::Symbol(symbol) => &symbol.meta,
        }
    }

    pub fn id(&self) -> &str {
        &self.meta().id
    }

    pub fn range(&self) -> &PositionFields {
        match self {
            Annotation::Text(text) => &text.range,
            Annotation::Symbol(symbol) => &symbol.range,
        }
    }

    /// First and last verse of the anchor span
    pub fn span(&self) -> (&VerseRef, &VerseRef) {
        match self {
            Annotation::Text(text) => (&text.start_ref, &text.end_ref),
            Annotation::Symbol(symbol) => {
                let end = symbol.end_ref.as_ref().unwrap_or(&symbol.verse_ref);
                (&symbol.verse_ref, end)
            }
        }
    }

    /// Role of `verse` within this annotation's span, `None` when outside it
    pub fn span_role(&self, verse: u32) -> Option<SpanRole> {
        let (start, end) = self.span();
        SpanRole::of(start.verse, end.verse, verse)
    }

    /// Whether the annotation is anchored to `verse`
    pub fn anchors_verse(&self, verse: u32) -> bool {
        self.span_role(verse).is_some()
    }
}

impl From<TextAnnotation> for Annotation {
    fn from(text: TextAnnotation) -> Self {
        Annotation::Text(text)
    }
}

impl From<SymbolAnnotation> for Annotation {
    fn from(symbol: SymbolAnnotation) -> Self {
        Annotation::Symbol(symbol)
    }
}
