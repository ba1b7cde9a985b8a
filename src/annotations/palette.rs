//! Fixed color palette and symbol glyph table

use serde::{Deserialize, Serialize};

/// Annotation colors offered by the study tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Yellow,
    Green,
    Blue,
    Purple,
    Pink,
    Orange,
    Red,
    Teal,
    Brown,
    Gray,
}

impl Color {
    /// CSS hex value (`#rrggbb`)
    pub fn hex(self) -> &'static str {
        match self {
            Color::Yellow => "#facc15",
            Color::Green => "#22c55e",
            Color::Blue => "#3b82f6",
            Color::Purple => "#a855f7",
            Color::Pink => "#ec4899",
            Color::Orange => "#f97316",
            Color::Red => "#ef4444",
            Color::Teal => "#14b8a6",
            Color::Brown => "#92400e",
            Color::Gray => "#6b7280",
        }
    }

    /// `rgba(...)` with the given alpha, used for translucent fills
    pub fn rgba(self, alpha: f32) -> String {
        let hex = &self.hex()[1..];
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap_or(0);
        format!(
            "rgba({}, {}, {}, {})",
            channel(0),
            channel(2),
            channel(4),
            alpha.clamp(0.0, 1.0)
        )
    }
}

/// Line style for underline annotations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnderlineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    Double,
    Wavy,
}

impl UnderlineStyle {
    pub fn css(self) -> &'static str {
        match self {
            UnderlineStyle::Solid => "solid",
            UnderlineStyle::Dashed => "dashed",
            UnderlineStyle::Dotted => "dotted",
            UnderlineStyle::Double => "double",
            UnderlineStyle::Wavy => "wavy",
        }
    }
}

/// Symbol keys and the glyph each one renders as
const GLYPHS: &[(&str, &str)] = &[
    ("cross", "\u{271d}"),
    ("star", "\u{2605}"),
    ("heart", "\u{2665}"),
    ("crown", "\u{1f451}"),
    ("dove", "\u{1f54a}"),
    ("fire", "\u{1f525}"),
    ("water", "\u{1f4a7}"),
    ("lamb", "\u{1f411}"),
    ("prayer", "\u{1f64f}"),
    ("lightbulb", "\u{1f4a1}"),
    ("key", "\u{1f511}"),
    ("scroll", "\u{1f4dc}"),
    ("clock", "\u{1f552}"),
    ("location", "\u{1f4cd}"),
    ("person", "\u{1f464}"),
    ("question", "?"),
    ("exclamation", "!"),
    ("check", "\u{2713}"),
    ("triangle", "\u{25b3}"),
    ("circle", "\u{25cb}"),
    ("square", "\u{25a1}"),
    ("arrow", "\u{2192}"),
];

/// Look up the glyph for a symbol key
pub fn glyph_for(symbol: &str) -> Option<&'static str> {
    GLYPHS
        .iter()
        .find(|(key, _)| *key == symbol)
        .map(|(_, glyph)| *glyph)
}

/// All known symbol keys, in table order
pub fn symbol_keys() -> impl Iterator<Item = &'static str> {
    GLYPHS.iter().map(|(key, _)| *key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_from_hex() {
        assert_eq!(Color::Yellow.rgba(0.4), "rgba(250, 204, 21, 0.4)");
        assert_eq!(Color::Blue.rgba(2.0), "rgba(59, 130, 246, 1)");
    }

    #[test]
    fn test_glyph_lookup() {
        assert_eq!(glyph_for("cross"), Some("\u{271d}"));
        assert_eq!(glyph_for("unknown"), None);
        assert!(symbol_keys().all(|key| glyph_for(key).is_some()));
    }

    #[test]
    fn test_color_serde_names() {
        let json = serde_json::to_string(&Color::Purple).unwrap();
        assert_eq!(json, "\"purple\"");
        let style: UnderlineStyle = serde_json::from_str("\"wavy\"").unwrap();
        assert_eq!(style.css(), "wavy");
    }
}
