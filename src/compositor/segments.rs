//! Verse segmentation
//!
//! Partitions a verse's plain text at every annotation range boundary so
//! each segment is covered by a uniform set of annotations.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use crate::annotations::{glyph_for, Annotation, SymbolAnnotation, SymbolPosition, TextAnnotation};
use crate::position::{resolve_span_range, units, CharRange, ResolvedRange};

/// Annotations that resolved to the exact same range
#[derive(Debug, Clone)]
pub struct AnnotationRange<'a> {
    pub range: CharRange,
    pub annotations: Vec<&'a TextAnnotation>,
    pub symbols: Vec<&'a SymbolAnnotation>,
}

/// Annotations anchored to one verse, sorted by how they render
#[derive(Debug, Clone, Default)]
pub struct VerseAnnotations<'a> {
    /// Markers ahead of the text, in insertion order
    pub before: Vec<&'a SymbolAnnotation>,
    /// Markers after the text, in insertion order
    pub after: Vec<&'a SymbolAnnotation>,
    /// Inline ranges, in order of first appearance
    pub ranges: Vec<AnnotationRange<'a>>,
    /// Anchored here but without an inline range or marker
    pub unplaced: Vec<&'a Annotation>,
}

impl VerseAnnotations<'_> {
    /// Whether anything at all is anchored to the verse
    pub fn is_empty(&self) -> bool {
        self.before.is_empty() && self.after.is_empty() && self.ranges.is_empty() && self.unplaced.is_empty()
    }
}

/// A contiguous piece of plain text with a uniform set of covering annotations
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment<'a> {
    pub start: usize,
    pub end: usize,
    pub text: &'a str,
    pub annotations: Vec<&'a TextAnnotation>,
    pub symbols: Vec<&'a SymbolAnnotation>,
}

impl Segment<'_> {
    pub fn range(&self) -> CharRange {
        CharRange::new(self.start, self.end)
    }

    pub fn is_annotated(&self) -> bool {
        !self.annotations.is_empty() || !self.symbols.is_empty()
    }

    /// Id the remove affordance acts on: first text annotation, else first symbol
    pub fn first_annotation_id(&self) -> Option<&str> {
        self.annotations
            .first()
            .map(|a| a.meta.id.as_str())
            .or_else(|| self.symbols.first().map(|s| s.meta.id.as_str()))
    }
}

/// Pick out the annotations anchored to `verse` and resolve their ranges
pub fn classify<'a>(plain_text: &str, verse: u32, annotations: &'a [Annotation]) -> VerseAnnotations<'a> {
    let mut classified = VerseAnnotations::default();
    let mut by_range: HashMap<CharRange, usize> = HashMap::new();

    for annotation in annotations {
        let Some(role) = annotation.span_role(verse) else {
            continue;
        };

        if let Annotation::Symbol(symbol) = annotation {
            if glyph_for(&symbol.symbol).is_none() {
                tracing::debug!("Unknown symbol {:?} on annotation {}", symbol.symbol, symbol.meta.id);
                classified.unplaced.push(annotation);
                continue;
            }
            match symbol.position {
                SymbolPosition::Before => {
                    classified.before.push(symbol);
                    continue;
                }
                SymbolPosition::After => {
                    classified.after.push(symbol);
                    continue;
                }
                SymbolPosition::Center => {}
            }
        }

        match (resolve_span_range(plain_text, annotation.range(), role), annotation) {
            (ResolvedRange::Range(range), _) => {
                let index = *by_range.entry(range).or_insert_with(|| {
                    classified.ranges.push(AnnotationRange {
                        range,
                        annotations: Vec::new(),
                        symbols: Vec::new(),
                    });
                    classified.ranges.len() - 1
                });
                let group = &mut classified.ranges[index];
                match annotation {
                    Annotation::Text(text) => group.annotations.push(text),
                    Annotation::Symbol(symbol) => group.symbols.push(symbol),
                }
            }
            // legacy whole-verse center symbols predate inline placement
            (ResolvedRange::WholeVerse, Annotation::Symbol(symbol)) => classified.before.push(symbol),
            _ => {
                tracing::debug!("Annotation {} has no inline range in verse {}", annotation.id(), verse);
                classified.unplaced.push(annotation);
            }
        }
    }

    classified
}

/// Compose the segments of `plain_text` for the annotations anchored to `verse`
pub fn compose_segments<'a>(plain_text: &'a str, verse: u32, annotations: &'a [Annotation]) -> Vec<Segment<'a>> {
    let classified = classify(plain_text, verse, annotations);
    compose_ranges(plain_text, &classified.ranges)
}

/// Finest partition of `plain_text` consistent with every range boundary
pub fn compose_ranges<'a>(plain_text: &'a str, ranges: &[AnnotationRange<'a>]) -> Vec<Segment<'a>> {
    let text_len = units::utf16_len(plain_text);

    if ranges.is_empty() {
        return vec![Segment {
            start: 0,
            end: text_len,
            text: plain_text,
            annotations: Vec::new(),
            symbols: Vec::new(),
        }];
    }

    let mut cuts: BTreeSet<usize> = BTreeSet::from([0, text_len]);
    for group in ranges.iter().filter(|g| !g.range.is_empty()) {
        cuts.insert(group.range.start.min(text_len));
        cuts.insert(group.range.end.min(text_len));
    }
    let cuts: Vec<usize> = cuts.into_iter().collect();

    let segments: Vec<Segment<'a>> = cuts
        .windows(2)
        .map(|pair| {
            let (start, end) = (pair[0], pair[1]);
            let mut segment = Segment {
                start,
                end,
                text: units::slice_utf16(plain_text, start, end).unwrap_or_default(),
                annotations: Vec::new(),
                symbols: Vec::new(),
            };
            for group in ranges.iter().filter(|g| g.range.overlaps(start, end)) {
                segment.annotations.extend(group.annotations.iter().copied());
                segment.symbols.extend(group.symbols.iter().copied());
            }
            segment
        })
        .collect();

    tracing::trace!("Composed {} segments from {} ranges", segments.len(), ranges.len());
    segments
}
