//! Combined visual style for one segment
//!
//! Every text annotation covering a segment contributes: highlights stack as
//! translucent fills, underlines as decoration plus extra bands. Only one
//! foreground color can be shown, so the last text color applied wins.

use serde::Serialize;

use crate::annotations::{Color, TextAnnotation, TextKind, UnderlineStyle};
use crate::config::RenderConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Underline {
    pub color: Color,
    pub style: UnderlineStyle,
}

/// Union of the effects of all text annotations on a segment, in attach order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedStyle {
    pub highlights: Vec<Color>,
    pub text_colors: Vec<Color>,
    pub underlines: Vec<Underline>,
}

impl CombinedStyle {
    pub fn from_annotations(annotations: &[&TextAnnotation]) -> Self {
        let mut style = Self::default();
        for annotation in annotations {
            match annotation.kind {
                TextKind::Highlight => style.highlights.push(annotation.color),
                TextKind::TextColor => style.text_colors.push(annotation.color),
                TextKind::Underline => style.underlines.push(Underline {
                    color: annotation.color,
                    style: annotation.underline_style.unwrap_or_default(),
                }),
            }
        }
        style
    }

    pub fn is_empty(&self) -> bool {
        self.highlights.is_empty() && self.text_colors.is_empty() && self.underlines.is_empty()
    }

    /// Inline CSS declarations for the segment
    pub fn to_css(&self, config: &RenderConfig) -> String {
        let mut decls: Vec<String> = Vec::new();

        if let Some((first, rest)) = self.highlights.split_first() {
            decls.push(format!("background-color: {}", first.rgba(config.highlight_opacity)));
            if !rest.is_empty() {
                // later highlights are painted on top of earlier ones
                let layers: Vec<String> = rest
                    .iter()
                    .rev()
                    .map(|color| {
                        let fill = color.rgba(config.highlight_opacity);
                        format!("linear-gradient({}, {})", fill, fill)
                    })
                    .collect();
                decls.push(format!("background-image: {}", layers.join(", ")));
            }
        }

        if let Some(color) = self.text_colors.last() {
            decls.push(format!("color: {}", color.hex()));
        }

        if let Some((first, rest)) = self.underlines.split_first() {
            decls.push("text-decoration-line: underline".to_string());
            decls.push(format!("text-decoration-color: {}", first.color.hex()));
            decls.push(format!("text-decoration-style: {}", first.style.css()));
            if !rest.is_empty() {
                let bands: Vec<String> = rest
                    .iter()
                    .enumerate()
                    .map(|(i, underline)| format!("0 {}px 0 0 {}", 2 * (i + 1), underline.color.hex()))
                    .collect();
                decls.push(format!("box-shadow: {}", bands.join(", ")));
            }
        }

        decls.iter().map(|d| format!("{};", d)).collect::<Vec<_>>().join(" ")
    }
}
