//! Output element types of the layout engine.

use vitae_types::{Color, FrameStyle};

/// ISO A4, portrait, in PDF points.
pub const A4_WIDTH_PT: f32 = 595.28;
pub const A4_HEIGHT_PT: f32 = 841.89;

/// Outer page margin applied by every layout variant.
pub const PAGE_MARGIN_PT: f32 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Fully resolved text styling for one run. No optional values; the
/// renderer fills every field from the effective style before emitting.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub font_family: String,
    pub font_size: f32,
    pub bold: bool,
    pub italic: bool,
    pub color: Color,
    pub align: TextAlign,
}

impl Default for TextStyle {
    fn default() -> Self {
        TextStyle {
            font_family: "Helvetica".to_string(),
            font_size: 10.0,
            bold: false,
            italic: false,
            color: Color::gray(0x00),
            align: TextAlign::Left,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextElement {
    pub content: String,
    pub style: TextStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RectElement {
    pub fill: Color,
    pub corner_radius: f32,
}

/// A small filled circle: skill-level markers and contact icon stand-ins.
#[derive(Debug, Clone, PartialEq)]
pub struct DotElement {
    pub color: Color,
    pub filled: bool,
}

/// A horizontal rule.
#[derive(Debug, Clone, PartialEq)]
pub struct LineElement {
    pub color: Color,
    pub thickness: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub color: Color,
    pub width: f32,
    pub style: FrameStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageElement {
    /// Resource key; resolved to bytes by the export pipeline.
    pub src: String,
    pub circle: bool,
    pub frame: Option<Frame>,
    pub transparent: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LayoutElement {
    Text(TextElement),
    Rect(RectElement),
    Dot(DotElement),
    Line(LineElement),
    Image(ImageElement),
}

/// Marker flags forming the render-boundary contract with the export
/// pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ElementFlags {
    /// Style-editing affordance; present on screen, stripped from exports.
    pub editor_only: bool,
    /// Icon marker whose baseline the export normalization corrects.
    pub icon: bool,
    /// Overflow line hidden by the on-screen clamp; released for export.
    pub clipped: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PositionedElement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub element: LayoutElement,
    pub flags: ElementFlags,
}

/// One complete rendered layout: A4-wide, naturally tall.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedLayout {
    pub elements: Vec<PositionedElement>,
    pub width: f32,
    pub height: f32,
}

impl RenderedLayout {
    /// All text runs joined with newlines, in element order. Used by
    /// completeness checks.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for el in &self.elements {
            if let LayoutElement::Text(text) = &el.element {
                out.push_str(&text.content);
                out.push('\n');
            }
        }
        out
    }

    /// Lowest element edge, or zero for an empty layout.
    pub fn content_bottom(&self) -> f32 {
        self.elements
            .iter()
            .map(|el| el.y + el.height)
            .fold(0.0, f32::max)
    }
}
