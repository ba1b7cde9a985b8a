//! Render plans and markup
//!
//! A [`VersePlan`] is structured data the hosting UI binds interaction to:
//! markers, styled segments, the inline symbol per segment and the id each
//! remove affordance targets. [`render_verse_html`] serializes the same plan
//! to markup for hosts that just want a string.
//!
//! In markup every segment carries its plain-text bounds as `data-start` /
//! `data-end`, and every element that adds text of its own (markers, glyphs,
//! remove buttons) is tagged `data-va-ui`. A DOM selection maps back to a
//! plain-text offset as the enclosing segment's `data-start` plus the
//! UTF-16 length of the segment text before the boundary, skipping tagged
//! elements.

use html_escape::{encode_double_quoted_attribute, encode_text};
use serde::Serialize;

use super::segments::{classify, compose_ranges, Segment};
use super::style::CombinedStyle;
use crate::annotations::{glyph_for, Annotation, Color, SymbolAnnotation, SymbolPlacement};
use crate::config::{RenderConfig, END_ATTRIBUTE, START_ATTRIBUTE, UI_ATTRIBUTE};
use crate::position::extract_plain_text;

/// Verse-level symbol drawn outside the text flow
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Marker {
    pub annotation_id: String,
    pub symbol: String,
    pub glyph: &'static str,
    pub color: Option<Color>,
}

/// Glyph drawn over a segment
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineSymbol {
    pub annotation_id: String,
    pub symbol: String,
    pub glyph: &'static str,
    pub color: Option<Color>,
    pub placement: SymbolPlacement,
}

/// One segment of the render plan
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderSegment {
    pub start: usize,
    pub end: usize,
    pub text: String,
    /// Text annotations covering the segment, in attach order
    pub annotation_ids: Vec<String>,
    /// Symbols covering the segment, in attach order
    pub symbol_ids: Vec<String>,
    pub style: Option<CombinedStyle>,
    /// Inline CSS for `style`, empty when unstyled
    pub css: String,
    pub symbol: Option<InlineSymbol>,
    /// Annotation the remove affordance deletes
    pub remove_target: Option<String>,
}

impl RenderSegment {
    pub fn is_annotated(&self) -> bool {
        self.remove_target.is_some()
    }
}

/// Everything needed to draw one verse
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersePlan {
    pub verse: u32,
    pub plain_text: String,
    pub before: Vec<Marker>,
    pub segments: Vec<RenderSegment>,
    pub after: Vec<Marker>,
    /// Anchored annotations that currently have no inline range
    pub unplaced: Vec<String>,
}

impl VersePlan {
    pub fn has_inline_annotations(&self) -> bool {
        self.segments.iter().any(RenderSegment::is_annotated)
    }
}

/// Build the render plan for one verse
pub fn render_verse(
    source_markup: &str,
    verse: u32,
    annotations: &[Annotation],
    config: &RenderConfig,
) -> VersePlan {
    let plain_text = extract_plain_text(source_markup);
    let classified = classify(&plain_text, verse, annotations);
    let segments = compose_ranges(&plain_text, &classified.ranges)
        .iter()
        .map(|segment| render_segment(segment, config))
        .collect();

    VersePlan {
        verse,
        before: classified.before.iter().filter_map(|s| marker(s)).collect(),
        after: classified.after.iter().filter_map(|s| marker(s)).collect(),
        segments,
        unplaced: classified.unplaced.iter().map(|a| a.id().to_string()).collect(),
        plain_text,
    }
}

/// Render one verse to markup.
///
/// With nothing anchored to the verse the source markup comes back
/// untouched; the same goes for the text body when no annotation has an
/// inline range (markers still wrap it). Otherwise every segment, annotated
/// or not, becomes a span carrying its offsets.
pub fn render_verse_html(
    source_markup: &str,
    verse: u32,
    annotations: &[Annotation],
    config: &RenderConfig,
) -> String {
    if !annotations.iter().any(|a| a.anchors_verse(verse)) {
        return source_markup.to_string();
    }

    let plan = render_verse(source_markup, verse, annotations, config);
    let mut html = String::with_capacity(source_markup.len() * 2);

    for m in &plan.before {
        html.push_str(&marker_html(m, "before", config));
    }

    if plan.has_inline_annotations() {
        for segment in &plan.segments {
            html.push_str(&segment_html(segment, config));
        }
    } else {
        html.push_str(source_markup);
    }

    for m in &plan.after {
        html.push_str(&marker_html(m, "after", config));
    }

    html
}

fn marker(symbol: &SymbolAnnotation) -> Option<Marker> {
    Some(Marker {
        annotation_id: symbol.meta.id.clone(),
        symbol: symbol.symbol.clone(),
        glyph: glyph_for(&symbol.symbol)?,
        color: symbol.color,
    })
}

fn render_segment(segment: &Segment<'_>, config: &RenderConfig) -> RenderSegment {
    let style = (!segment.annotations.is_empty()).then(|| CombinedStyle::from_annotations(&segment.annotations));
    let css = style.as_ref().map(|s| s.to_css(config)).unwrap_or_default();

    // only the first symbol on a segment is drawn
    let symbol = segment.symbols.first().and_then(|s| {
        Some(InlineSymbol {
            annotation_id: s.meta.id.clone(),
            symbol: s.symbol.clone(),
            glyph: glyph_for(&s.symbol)?,
            color: s.color,
            placement: s.effective_placement(),
        })
    });

    RenderSegment {
        start: segment.start,
        end: segment.end,
        text: segment.text.to_string(),
        annotation_ids: segment.annotations.iter().map(|a| a.meta.id.clone()).collect(),
        symbol_ids: segment.symbols.iter().map(|s| s.meta.id.clone()).collect(),
        style,
        css,
        symbol,
        remove_target: segment.first_annotation_id().map(str::to_string),
    }
}

fn style_attr(css: &str, config: &RenderConfig) -> String {
    if !config.include_inline_styles || css.is_empty() {
        return String::new();
    }
    format!(" style=\"{}\"", encode_double_quoted_attribute(css))
}

fn marker_html(marker: &Marker, side: &str, config: &RenderConfig) -> String {
    let css = marker
        .color
        .map(|c| format!("color: {};", c.hex()))
        .unwrap_or_default();

    format!(
        "<span class=\"{} {}\" {}=\"{}\" {}{}>{}</span>",
        config.class("marker"),
        config.class(&format!("marker-{}", side)),
        config.id_attribute,
        encode_double_quoted_attribute(&marker.annotation_id),
        UI_ATTRIBUTE,
        style_attr(&css, config),
        marker.glyph
    )
}

fn symbol_html(text: &str, symbol: &InlineSymbol, config: &RenderConfig) -> String {
    let color = symbol
        .color
        .map(|c| format!(" color: {};", c.hex()))
        .unwrap_or_default();

    let (variant, glyph_css) = match symbol.placement {
        SymbolPlacement::Overlay => (
            "overlay",
            format!(
                "position: absolute; left: 50%; top: 50%; transform: translate(-50%, -50%); \
                 opacity: {}; text-shadow: 0 0 3px {}, 0 0 3px {}; pointer-events: none;{}",
                config.overlay_opacity, config.halo_color, config.halo_color, color
            ),
        ),
        SymbolPlacement::Above => (
            "above",
            format!(
                "position: absolute; left: 50%; top: 0; transform: translate(-50%, -100%) scale({}); \
                 opacity: {}; line-height: 1; pointer-events: none;{}",
                config.above_scale, config.above_opacity, color
            ),
        ),
    };

    format!(
        "<span class=\"{}\"{}>{}<span class=\"{} {}\" aria-hidden=\"true\" {}{}>{}</span></span>",
        config.class("symbol-anchor"),
        style_attr("position: relative; display: inline-block;", config),
        encode_text(text),
        config.class("symbol"),
        config.class(&format!("symbol-{}", variant)),
        UI_ATTRIBUTE,
        style_attr(&glyph_css, config),
        symbol.glyph
    )
}

fn offset_attrs(segment: &RenderSegment) -> String {
    format!(
        " {}=\"{}\" {}=\"{}\"",
        START_ATTRIBUTE, segment.start, END_ATTRIBUTE, segment.end
    )
}

fn segment_html(segment: &RenderSegment, config: &RenderConfig) -> String {
    let Some(target) = segment.remove_target.as_deref() else {
        return format!(
            "<span class=\"{}\"{}>{}</span>",
            config.class("segment"),
            offset_attrs(segment),
            encode_text(&segment.text)
        );
    };

    let inner = match &segment.symbol {
        Some(symbol) => symbol_html(&segment.text, symbol, config),
        None => encode_text(&segment.text).into_owned(),
    };

    let mut classes = vec![config.class("segment")];
    if let Some(style) = &segment.style {
        if !style.highlights.is_empty() {
            classes.push(config.class("highlight"));
        }
        if !style.text_colors.is_empty() {
            classes.push(config.class("text-color"));
        }
        if !style.underlines.is_empty() {
            classes.push(config.class("underline"));
        }
    }

    let target = encode_double_quoted_attribute(target);
    format!(
        "<span class=\"{}\" {}=\"{}\"{}{}>{}<button type=\"button\" class=\"{}\" {}=\"{}\" {} aria-label=\"Remove annotation\">{}</button></span>",
        classes.join(" "),
        config.id_attribute,
        target,
        offset_attrs(segment),
        style_attr(&segment.css, config),
        inner,
        config.class("remove"),
        config.remove_attribute,
        target,
        UI_ATTRIBUTE,
        encode_text(&config.remove_label)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotations::{PositionFields, SymbolPosition, VerseRef};

    fn gen1() -> VerseRef {
        VerseRef::new("GEN", 1, 1)
    }

    #[test]
    fn test_untouched_when_nothing_anchored() {
        let source = "In the <i>beginning</i> God";
        let elsewhere = Annotation::new_highlight("KJV", VerseRef::new("GEN", 1, 2), Color::Yellow, PositionFields::words(0, 0));

        let html = render_verse_html(source, 1, &[elsewhere], &RenderConfig::default());
        assert_eq!(html, source);
    }

    #[test]
    fn test_plan_for_highlight() {
        let highlight = Annotation::new_highlight("KJV", gen1(), Color::Yellow, PositionFields::words(2, 3));
        let plan = render_verse("In the beginning God created", 1, std::slice::from_ref(&highlight), &RenderConfig::default());

        assert_eq!(plan.segments.len(), 3);
        let marked = &plan.segments[1];
        assert_eq!(marked.text, "beginning God");
        assert_eq!(marked.remove_target.as_deref(), Some(highlight.id()));
        assert_eq!(marked.css, "background-color: rgba(250, 204, 21, 0.4);");
        assert!(plan.segments[0].remove_target.is_none());
        assert!(plan.unplaced.is_empty());
    }

    #[test]
    fn test_html_escapes_and_wraps() {
        let highlight = Annotation::new_highlight("KJV", gen1(), Color::Green, PositionFields::offsets(0, 5));
        let html = render_verse_html("<b>a &lt; b</b> end", 1, std::slice::from_ref(&highlight), &RenderConfig::default());

        assert!(html.starts_with("<span class=\"va-segment va-highlight\""));
        assert!(html.contains("a &lt; b"));
        assert!(html.contains(&format!("data-remove-annotation=\"{}\"", highlight.id())));
        assert!(html.ends_with(r#"<span class="va-segment" data-start="5" data-end="9"> end</span>"#));
    }

    #[test]
    fn test_symbol_placements() {
        let above = Annotation::from(
            SymbolAnnotation::new("KJV", gen1(), "crown", SymbolPosition::Center)
                .with_placement(SymbolPlacement::Above)
                .with_color(Color::Purple)
                .with_range(PositionFields::words(3, 3)),
        );
        let html = render_verse_html("In the beginning God created", 1, std::slice::from_ref(&above), &RenderConfig::default());

        assert!(html.contains("va-symbol-anchor"));
        assert!(html.contains("va-symbol-above"));
        assert!(html.contains("translate(-50%, -100%) scale(0.75)"));
        assert!(html.contains("color: #a855f7;"));

        let overlay = Annotation::from(
            SymbolAnnotation::new("KJV", gen1(), "star", SymbolPosition::Center)
                .with_range(PositionFields::words(0, 0)),
        );
        let plan = render_verse("In the beginning", 1, std::slice::from_ref(&overlay), &RenderConfig::default());
        let symbol = plan.segments[0].symbol.as_ref().unwrap();
        assert_eq!(symbol.placement, SymbolPlacement::Overlay);
        assert_eq!(symbol.glyph, "\u{2605}");
        assert!(plan.segments[0].style.is_none());
    }

    #[test]
    fn test_markers_keep_source_body() {
        let before = Annotation::new_symbol("KJV", gen1(), "cross", SymbolPosition::Before);
        let after = Annotation::new_symbol("KJV", gen1(), "heart", SymbolPosition::After);
        let source = "Jesus <span class=\"wj\">wept</span>.";

        let html = render_verse_html(source, 1, &[after, before], &RenderConfig::default());
        let body_at = html.find(source).unwrap();
        assert!(html[..body_at].contains("va-marker-before"));
        assert!(html[body_at..].contains("va-marker-after"));
    }

    #[test]
    fn test_segments_carry_offsets() {
        let highlight = Annotation::new_highlight("KJV", gen1(), Color::Yellow, PositionFields::words(2, 3));
        let html = render_verse_html("In the beginning God created", 1, std::slice::from_ref(&highlight), &RenderConfig::default());

        assert!(html.starts_with(r#"<span class="va-segment" data-start="0" data-end="7">In the </span>"#));
        assert!(html.contains(&format!(
            r#"data-annotation-id="{}" data-start="7" data-end="20" style="#,
            highlight.id()
        )));
        assert!(html.ends_with(r#"<span class="va-segment" data-start="20" data-end="28"> created</span>"#));
        assert!(html.contains(r#"data-va-ui aria-label="Remove annotation""#));
    }

    #[test]
    fn test_generated_text_is_tagged() {
        let before = Annotation::new_symbol("KJV", gen1(), "cross", SymbolPosition::Before);
        let overlay = Annotation::from(
            SymbolAnnotation::new("KJV", gen1(), "star", SymbolPosition::Center)
                .with_range(PositionFields::words(1, 1)),
        );
        let highlight = Annotation::new_highlight("KJV", gen1(), Color::Blue, PositionFields::words(0, 1));
        let source = "Blessed <i>are</i> the meek";

        let html = render_verse_html(source, 1, &[before, overlay, highlight], &RenderConfig::default());
        assert_eq!(extract_plain_text(&html), extract_plain_text(source));
    }

    #[test]
    fn test_inline_styles_disabled() {
        let config = RenderConfig {
            include_inline_styles: false,
            ..RenderConfig::default()
        };
        let highlight = Annotation::new_highlight("KJV", gen1(), Color::Pink, PositionFields::words(0, 0));
        let html = render_verse_html("Blessed are", 1, &[highlight], &config);

        assert!(!html.contains("style="));
        assert!(html.contains("va-highlight"));
    }
}
