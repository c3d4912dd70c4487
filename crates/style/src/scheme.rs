//! Fully-resolved style types used by every renderer.

use serde::{Deserialize, Serialize};
use vitae_types::Color;

/// The seven semantic color slots of a rendered CV. Unlike the document-side
/// [`vitae_types::PartialColorScheme`], every slot here is a concrete color;
/// a partially-resolved scheme cannot be represented.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct ColorScheme {
    pub primary_color: Color,
    pub secondary_color: Color,
    pub heading_color: Color,
    pub sub_heading_color: Color,
    pub text_color: Color,
    pub background_color: Color,
    pub accent_color: Color,
}

impl ColorScheme {
    /// Slot names paired with their values, in the canonical slot order.
    pub fn slots(&self) -> [(&'static str, Color); 7] {
        [
            ("primaryColor", self.primary_color),
            ("secondaryColor", self.secondary_color),
            ("headingColor", self.heading_color),
            ("subHeadingColor", self.sub_heading_color),
            ("textColor", self.text_color),
            ("backgroundColor", self.background_color),
            ("accentColor", self.accent_color),
        ]
    }
}

/// The font pair and base size a template prescribes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FontSettings {
    pub heading_font: String,
    pub body_font: String,
    /// Body text size in points; headings scale from it.
    pub font_size: f32,
}

impl Default for FontSettings {
    fn default() -> Self {
        Self {
            heading_font: "Helvetica".to_string(),
            body_font: "Helvetica".to_string(),
            font_size: 10.0,
        }
    }
}

/// The complete style for one render: resolved colors plus fonts.
/// Derived fresh per render/export call, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveStyle {
    pub colors: ColorScheme,
    pub fonts: FontSettings,
}
