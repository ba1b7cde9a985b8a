//! Render configuration
//!
//! Controls class names, data attributes and the opacity/scale values used
//! when a render plan is serialized to markup.

use serde::Deserialize;

use crate::error::Result;

/// Marks generated elements (markers, glyphs, remove buttons) that are not
/// part of the verse text. Fixed so plain-text extraction can skip them.
pub const UI_ATTRIBUTE: &str = "data-va-ui";

/// Plain-text offsets carried by every rendered segment
pub const START_ATTRIBUTE: &str = "data-start";
pub const END_ATTRIBUTE: &str = "data-end";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderConfig {
    /// CSS class prefix for every generated element
    pub class_prefix: String,
    /// Data attribute carrying the annotation id
    pub id_attribute: String,
    /// Data attribute carrying the id targeted by the remove affordance
    pub remove_attribute: String,
    /// Whether to emit inline `style` attributes
    pub include_inline_styles: bool,
    /// Background opacity for highlights (0.0-1.0)
    pub highlight_opacity: f32,
    /// Glyph opacity for `overlay` symbols
    pub overlay_opacity: f32,
    /// Glyph opacity for `above` symbols
    pub above_opacity: f32,
    /// Glyph scale for `above` symbols
    pub above_scale: f32,
    /// Halo color behind overlay glyphs
    pub halo_color: String,
    /// Text of the remove affordance
    pub remove_label: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            class_prefix: "va".to_string(),
            id_attribute: "data-annotation-id".to_string(),
            remove_attribute: "data-remove-annotation".to_string(),
            include_inline_styles: true,
            highlight_opacity: 0.4,
            overlay_opacity: 0.55,
            above_opacity: 0.85,
            above_scale: 0.75,
            halo_color: "#ffffff".to_string(),
            remove_label: "\u{00d7}".to_string(),
        }
    }
}

impl RenderConfig {
    /// Parse a config from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config = serde_json::from_str(json)?;
        Ok(config)
    }

    /// `prefix-name` class helper
    pub(crate) fn class(&self, name: &str) -> String {
        format!("{}-{}", self.class_prefix, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = RenderConfig::from_json(r#"{"classPrefix": "bible", "highlightOpacity": 0.5}"#)
            .unwrap();

        assert_eq!(config.class_prefix, "bible");
        assert_eq!(config.highlight_opacity, 0.5);
        assert_eq!(config.id_attribute, "data-annotation-id");
        assert!(config.include_inline_styles);
    }

    #[test]
    fn test_invalid_json() {
        assert!(RenderConfig::from_json("{not json").is_err());
    }

    #[test]
    fn test_class_helper() {
        let config = RenderConfig::default();
        assert_eq!(config.class("segment"), "va-segment");
    }
}
