//! Glyph painting on the raster surface.
//!
//! Text is shaped with rustybuzz and each glyph outline is filled as a
//! tiny-skia path. When no usable face exists the run degrades to greeked
//! bars, one per word, so output stays recognizable on fontless systems.

use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Rect, Transform};
use ttf_parser::{GlyphId, OutlineBuilder};
use vitae_layout::fonts::{FaceEntry, FontLibrary};
use vitae_layout::TextStyle;
use vitae_types::Color;

/// Collects a glyph outline into a tiny-skia path, in font units. The
/// caller applies the scale and y-flip through the fill transform.
struct PathSink {
    builder: PathBuilder,
}

impl OutlineBuilder for PathSink {
    fn move_to(&mut self, x: f32, y: f32) {
        self.builder.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.builder.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.builder.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.builder.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.builder.close();
    }
}

pub fn to_skia_color(color: Color) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(color.r, color.g, color.b, (color.a * 255.0) as u8)
}

/// Paints one line of text with its top edge at `top_y_pt`.
pub fn draw_text(
    pixmap: &mut Pixmap,
    fonts: &FontLibrary,
    text: &str,
    style: &TextStyle,
    x_pt: f32,
    top_y_pt: f32,
    px_per_pt: f32,
) {
    if text.trim().is_empty() {
        return;
    }
    // Same baseline placement the vector renderer uses.
    let baseline_pt = top_y_pt + style.font_size * 0.8;
    if let Some(entry) = fonts.face(&style.font_family, style.bold) {
        if draw_shaped(pixmap, &entry, text, style, x_pt, baseline_pt, px_per_pt).is_some() {
            return;
        }
    }
    draw_greeked(pixmap, text, style, x_pt, top_y_pt, px_per_pt);
}

fn draw_shaped(
    pixmap: &mut Pixmap,
    entry: &FaceEntry,
    text: &str,
    style: &TextStyle,
    x_pt: f32,
    baseline_pt: f32,
    px_per_pt: f32,
) -> Option<()> {
    let face = entry.as_face()?;
    let units_per_em = face.units_per_em() as f32;
    if units_per_em <= 0.0 {
        return None;
    }
    let scale = style.font_size / units_per_em * px_per_pt;

    let mut buffer = rustybuzz::UnicodeBuffer::new();
    buffer.push_str(text);
    let glyphs = rustybuzz::shape(&face, &[], buffer);

    let mut paint = Paint::default();
    paint.set_color(to_skia_color(style.color));
    paint.anti_alias = true;

    let mut pen_x = x_pt * px_per_pt;
    let pen_y = baseline_pt * px_per_pt;
    for (info, pos) in glyphs.glyph_infos().iter().zip(glyphs.glyph_positions()) {
        let mut sink = PathSink { builder: PathBuilder::new() };
        if face
            .outline_glyph(GlyphId(info.glyph_id as u16), &mut sink)
            .is_some()
        {
            if let Some(path) = sink.builder.finish() {
                let transform = Transform::from_row(
                    scale,
                    0.0,
                    0.0,
                    -scale,
                    pen_x + pos.x_offset as f32 * scale,
                    pen_y - pos.y_offset as f32 * scale,
                );
                pixmap.fill_path(&path, &paint, FillRule::Winding, transform, None);
            }
        }
        pen_x += pos.x_advance as f32 * scale;
    }
    Some(())
}

/// One translucent bar per word, sized by the metric approximation the
/// measurement fallback uses, so greeked output occupies the measured box.
pub fn draw_greeked(
    pixmap: &mut Pixmap,
    text: &str,
    style: &TextStyle,
    x_pt: f32,
    top_y_pt: f32,
    px_per_pt: f32,
) {
    let mut paint = Paint::default();
    paint.set_color(to_skia_color(style.color.with_alpha(0.45)));
    paint.anti_alias = true;

    let char_w = style.font_size * 0.6 * px_per_pt;
    let bar_h = style.font_size * 0.5 * px_per_pt;
    let bar_y = (top_y_pt + style.font_size * 0.35) * px_per_pt;

    let mut x = x_pt * px_per_pt;
    for word in text.split_whitespace() {
        let width = word.chars().count() as f32 * char_w;
        if let Some(rect) = Rect::from_xywh(x, bar_y, width, bar_h) {
            pixmap.fill_rect(rect, &paint, Transform::identity(), None);
        }
        x += width + char_w;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank(width: u32, height: u32) -> Pixmap {
        let mut pixmap = Pixmap::new(width, height).unwrap();
        pixmap.fill(tiny_skia::Color::WHITE);
        pixmap
    }

    fn has_ink(pixmap: &Pixmap) -> bool {
        pixmap.pixels().iter().any(|p| p.red() < 250 || p.green() < 250 || p.blue() < 250)
    }

    #[test]
    fn greeked_bars_leave_ink() {
        let mut pixmap = blank(300, 60);
        let style = TextStyle { color: Color::gray(0x20), ..TextStyle::default() };
        draw_greeked(&mut pixmap, "hello world", &style, 4.0, 4.0, 2.0);
        assert!(has_ink(&pixmap));
    }

    #[test]
    fn draw_text_always_produces_output() {
        // Shaped glyphs on systems with fonts, greeked bars otherwise.
        let mut pixmap = blank(400, 60);
        let fonts = FontLibrary::new();
        let style = TextStyle { color: Color::gray(0x00), ..TextStyle::default() };
        draw_text(&mut pixmap, &fonts, "Jane Doe", &style, 4.0, 4.0, 2.0);
        assert!(has_ink(&pixmap));
    }

    #[test]
    fn blank_text_draws_nothing() {
        let mut pixmap = blank(100, 40);
        let fonts = FontLibrary::new();
        let style = TextStyle::default();
        draw_text(&mut pixmap, &fonts, "   ", &style, 4.0, 4.0, 2.0);
        assert!(!has_ink(&pixmap));
    }
}
