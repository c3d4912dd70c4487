//! Content stream construction for one page.
//!
//! Coordinates arrive in layout space (origin top-left, y down, points);
//! the writer flips to PDF space and tracks the current font, size and fill
//! color so repeated runs do not re-emit state operators.

use lopdf::content::{Content, Operation};
use lopdf::{Object, StringFormat};
use vitae_types::Color;

/// Base-14 font resources registered on every page. Internal names are
/// stable so the resource dictionary can be shared across pages.
pub const BASE14_FONTS: &[(&str, &str)] = &[
    ("F1", "Helvetica"),
    ("F2", "Helvetica-Bold"),
    ("F3", "Helvetica-Oblique"),
    ("F4", "Helvetica-BoldOblique"),
    ("F5", "Times-Roman"),
    ("F6", "Times-Bold"),
    ("F7", "Times-Italic"),
    ("F8", "Times-BoldItalic"),
    ("F9", "Courier"),
];

/// Maps a configured family name onto an internal base-14 resource name.
/// Unknown families land on Helvetica.
pub fn internal_font(family: &str, bold: bool, italic: bool) -> &'static str {
    let family = family.to_lowercase();
    if family.contains("courier") || family.contains("mono") {
        return "F9";
    }
    let serif = family.contains("times") || family.contains("georgia") || family.contains("serif");
    match (serif, bold, italic) {
        (false, false, false) => "F1",
        (false, true, false) => "F2",
        (false, false, true) => "F3",
        (false, true, true) => "F4",
        (true, false, false) => "F5",
        (true, true, false) => "F6",
        (true, false, true) => "F7",
        (true, true, true) => "F8",
    }
}

#[derive(Default, Clone, PartialEq)]
struct GraphicsState {
    font: String,
    font_size: f32,
    fill: Option<Color>,
}

pub struct PageWriter {
    page_height: f32,
    operations: Vec<Operation>,
    state: GraphicsState,
}

impl PageWriter {
    pub fn new(page_height: f32) -> Self {
        Self { page_height, operations: Vec::new(), state: GraphicsState::default() }
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn finish(self) -> Content {
        Content { operations: self.operations }
    }

    fn set_fill(&mut self, color: Color) {
        if self.state.fill != Some(color) {
            self.operations.push(Operation::new(
                "rg",
                vec![
                    (color.r as f32 / 255.0).into(),
                    (color.g as f32 / 255.0).into(),
                    (color.b as f32 / 255.0).into(),
                ],
            ));
            self.state.fill = Some(color);
        }
    }

    fn set_font(&mut self, font: &str, size: f32) {
        if self.state.font != font || self.state.font_size != size {
            self.operations.push(Operation::new(
                "Tf",
                vec![Object::Name(font.as_bytes().to_vec()), size.into()],
            ));
            self.state.font = font.to_string();
            self.state.font_size = size;
        }
    }

    /// Writes one text run with its top edge at `y_top` layout points.
    pub fn text(&mut self, content: &str, font: &str, size: f32, color: Color, x: f32, y_top: f32) {
        if content.trim().is_empty() {
            return;
        }
        self.operations.push(Operation::new("BT", vec![]));
        self.set_font(font, size);
        self.set_fill(color);
        let baseline = y_top + size * 0.8;
        let pdf_y = self.page_height - baseline;
        self.operations.push(Operation::new("Td", vec![x.into(), pdf_y.into()]));
        self.operations.push(Operation::new(
            "Tj",
            vec![Object::String(to_win_ansi(content), StringFormat::Literal)],
        ));
        self.operations.push(Operation::new("ET", vec![]));
    }

    pub fn rect(&mut self, x: f32, y_top: f32, width: f32, height: f32, fill: Color) {
        self.set_fill(fill);
        let pdf_y = self.page_height - (y_top + height);
        self.operations.push(Operation::new(
            "re",
            vec![x.into(), pdf_y.into(), width.into(), height.into()],
        ));
        self.operations.push(Operation::new("f", vec![]));
    }

    pub fn hline(&mut self, x: f32, y_top: f32, width: f32, thickness: f32, color: Color) {
        self.rect(x, y_top, width, thickness, color);
    }

    /// A filled or outlined circle built from four cubics.
    pub fn circle(&mut self, cx: f32, cy_top: f32, radius: f32, color: Color, filled: bool) {
        let cy = self.page_height - cy_top;
        if filled {
            self.set_fill(color);
        } else {
            self.operations.push(Operation::new(
                "RG",
                vec![
                    (color.r as f32 / 255.0).into(),
                    (color.g as f32 / 255.0).into(),
                    (color.b as f32 / 255.0).into(),
                ],
            ));
            self.operations.push(Operation::new("w", vec![0.75.into()]));
        }
        self.push_circle_path(cx, cy, radius);
        self.operations.push(Operation::new(if filled { "f" } else { "S" }, vec![]));
    }

    /// Places a previously registered image XObject, optionally clipped to
    /// the inscribed circle.
    pub fn image(&mut self, name: &str, x: f32, y_top: f32, width: f32, height: f32, circle: bool) {
        let pdf_y = self.page_height - (y_top + height);
        self.operations.push(Operation::new("q", vec![]));
        if circle {
            self.push_circle_path(x + width / 2.0, pdf_y + height / 2.0, width.min(height) / 2.0);
            self.operations.push(Operation::new("W", vec![]));
            self.operations.push(Operation::new("n", vec![]));
        }
        self.operations.push(Operation::new(
            "cm",
            vec![
                width.into(),
                0.into(),
                0.into(),
                height.into(),
                x.into(),
                pdf_y.into(),
            ],
        ));
        self.operations
            .push(Operation::new("Do", vec![Object::Name(name.as_bytes().to_vec())]));
        self.operations.push(Operation::new("Q", vec![]));
        // q/Q discarded any state operators set inside.
        self.state = GraphicsState::default();
    }

    fn push_circle_path(&mut self, cx: f32, cy: f32, r: f32) {
        const K: f32 = 0.552_285;
        let k = K * r;
        self.operations
            .push(Operation::new("m", vec![(cx + r).into(), cy.into()]));
        self.operations.push(Operation::new(
            "c",
            vec![(cx + r).into(), (cy + k).into(), (cx + k).into(), (cy + r).into(), cx.into(), (cy + r).into()],
        ));
        self.operations.push(Operation::new(
            "c",
            vec![(cx - k).into(), (cy + r).into(), (cx - r).into(), (cy + k).into(), (cx - r).into(), cy.into()],
        ));
        self.operations.push(Operation::new(
            "c",
            vec![(cx - r).into(), (cy - k).into(), (cx - k).into(), (cy - r).into(), cx.into(), (cy - r).into()],
        ));
        self.operations.push(Operation::new(
            "c",
            vec![(cx + k).into(), (cy - r).into(), (cx + r).into(), (cy - k).into(), (cx + r).into(), cy.into()],
        ));
        self.operations.push(Operation::new("h", vec![]));
    }
}

/// Lossy WinAnsi narrowing; codepoints past Latin-1 become '?'.
pub fn to_win_ansi(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| if (c as u32) <= 255 { c as u8 } else { b'?' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_mapping_covers_styles() {
        assert_eq!(internal_font("Helvetica", false, false), "F1");
        assert_eq!(internal_font("Helvetica", true, false), "F2");
        assert_eq!(internal_font("Times New Roman", false, true), "F7");
        assert_eq!(internal_font("Courier New", true, true), "F9");
        assert_eq!(internal_font("Comic Sans", false, false), "F1");
    }

    #[test]
    fn text_flips_to_pdf_coordinates() {
        let mut writer = PageWriter::new(800.0);
        writer.text("hi", "F1", 10.0, Color::gray(0), 40.0, 100.0);
        let content = writer.finish();
        let td = content
            .operations
            .iter()
            .find(|op| op.operator == "Td")
            .unwrap();
        // baseline = 100 + 8, flipped: 800 - 108
        assert_eq!(td.operands[1], Object::Real(692.0));
    }

    #[test]
    fn repeated_fill_color_is_emitted_once() {
        let mut writer = PageWriter::new(800.0);
        let c = Color::rgb(10, 20, 30);
        writer.rect(0.0, 0.0, 10.0, 10.0, c);
        writer.rect(20.0, 0.0, 10.0, 10.0, c);
        let content = writer.finish();
        let fills = content.operations.iter().filter(|op| op.operator == "rg").count();
        assert_eq!(fills, 1);
    }

    #[test]
    fn win_ansi_replaces_wide_chars() {
        assert_eq!(to_win_ansi("ab\u{2713}c"), b"ab?c".to_vec());
    }
}
