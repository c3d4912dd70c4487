//! Watermark compositing.
//!
//! The label is tiled diagonally across the full capture before it is
//! sliced into pages, so watermarking can never change the page count.

use tiny_skia::{Pixmap, PixmapPaint, Transform};
use vitae_layout::fonts::FontLibrary;
use vitae_layout::{TextAlign, TextStyle};
use vitae_types::Color;

use crate::glyphs;

/// The one label free-tier exports carry. Fixed by contract; the toggle is
/// a boolean, never a caller-chosen string.
pub const WATERMARK_LABEL: &str = "DEMO";

const WATERMARK_SIZE_PT: f32 = 28.0;
const WATERMARK_OPACITY: f32 = 0.12;
const TILE_STEP_X_PT: f32 = 170.0;
const TILE_STEP_Y_PT: f32 = 120.0;

/// Stamps the label in rotated translucent tiles over the whole capture.
/// Never fails: if the tile surface cannot be allocated the capture ships
/// unwatermarked with a warning.
pub fn apply_watermark(pixmap: &mut Pixmap, fonts: &FontLibrary, px_per_pt: f32) {
    let label = WATERMARK_LABEL;
    let style = TextStyle {
        font_family: "Helvetica".to_string(),
        font_size: WATERMARK_SIZE_PT,
        bold: true,
        italic: false,
        color: Color::gray(0x55),
        align: TextAlign::Left,
    };
    let text_width_pt = fonts.measure(label, &style.font_family, style.font_size, style.bold);
    let tile_w = ((text_width_pt + 4.0) * px_per_pt).ceil().max(1.0) as u32;
    let tile_h = (WATERMARK_SIZE_PT * 1.3 * px_per_pt).ceil().max(1.0) as u32;
    let Some(mut tile) = Pixmap::new(tile_w, tile_h) else {
        log::warn!("watermark tile allocation failed, exporting without watermark");
        return;
    };
    glyphs::draw_text(&mut tile, fonts, label, &style, 2.0, 2.0, px_per_pt);

    let paint = PixmapPaint { opacity: WATERMARK_OPACITY, ..PixmapPaint::default() };
    let step_x = (TILE_STEP_X_PT * px_per_pt) as i32 + tile_w as i32;
    let step_y = (TILE_STEP_Y_PT * px_per_pt) as i32;

    let mut row = 0;
    let mut y = -(tile_h as i32);
    while y < pixmap.height() as i32 {
        // Stagger odd rows by half a step.
        let mut x = if row % 2 == 0 { -(tile_w as i32) } else { -(tile_w as i32) + step_x / 2 };
        while x < pixmap.width() as i32 {
            let rotate = Transform::from_rotate_at(
                -45.0,
                x as f32 + tile_w as f32 / 2.0,
                y as f32 + tile_h as f32 / 2.0,
            );
            pixmap.draw_pixmap(x, y, tile.as_ref(), &paint, rotate, None);
            x += step_x;
        }
        y += step_y;
        row += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white(width: u32, height: u32) -> Pixmap {
        let mut pixmap = Pixmap::new(width, height).unwrap();
        pixmap.fill(tiny_skia::Color::WHITE);
        pixmap
    }

    fn ink_count(pixmap: &Pixmap) -> usize {
        pixmap.pixels().iter().filter(|p| p.red() < 250).count()
    }

    #[test]
    fn watermark_marks_the_surface() {
        let mut pixmap = white(800, 1100);
        apply_watermark(&mut pixmap, &FontLibrary::new(), 2.0);
        assert!(ink_count(&pixmap) > 0);
    }

    #[test]
    fn watermark_preserves_dimensions() {
        let mut pixmap = white(640, 480);
        apply_watermark(&mut pixmap, &FontLibrary::new(), 1.5);
        assert_eq!((pixmap.width(), pixmap.height()), (640, 480));
    }
}
