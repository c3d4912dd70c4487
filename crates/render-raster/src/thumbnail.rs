//! Degraded first-page previews.
//!
//! List views show dozens of previews at once, so thumbnails never run the
//! layout engine or shape any text. The preview is painted straight from
//! the document fields with primitive ops: greeked bars for text, a flat
//! tile for the photo, dots for skill levels. Colors and the photo/accent
//! arrangement come from the template plan so the preview still matches
//! the chosen template. An empty document gets a synthetic striped
//! placeholder instead.

use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Rect, Transform};
use vitae_layout::{TextStyle, A4_HEIGHT_PT, A4_WIDTH_PT, PAGE_MARGIN_PT};
use vitae_template::{effective_style, get, item_views, plan_for, section_label};
use vitae_types::{Color, CvDocument};

use crate::error::RasterError;
use crate::glyphs;

/// Lines of body text suggested per description block.
const BODY_STRIPES: usize = 2;

/// Renders a first-page preview `width_px * device_pixel_ratio` wide, with
/// the A4 aspect ratio.
pub fn render_thumbnail(
    doc: &CvDocument,
    width_px: u32,
    device_pixel_ratio: f32,
) -> Result<Pixmap, RasterError> {
    let width = (width_px as f32 * device_pixel_ratio.max(0.1)).round().max(1.0) as u32;
    let px_per_pt = width as f32 / A4_WIDTH_PT;
    let height = (A4_HEIGHT_PT * px_per_pt).round().max(1.0) as u32;
    let mut pixmap =
        Pixmap::new(width, height).ok_or(RasterError::Surface { width, height })?;
    pixmap.fill(tiny_skia::Color::WHITE);

    if !doc.has_content() {
        draw_placeholder(&mut pixmap);
        return Ok(pixmap);
    }
    draw_document(&mut pixmap, doc, px_per_pt);
    Ok(pixmap)
}

fn fill(pixmap: &mut Pixmap, x: f32, y: f32, w: f32, h: f32, color: Color, s: f32) {
    let mut paint = Paint::default();
    paint.set_color(glyphs::to_skia_color(color));
    if let Some(r) = Rect::from_xywh(x * s, y * s, w * s, h * s) {
        pixmap.fill_rect(r, &paint, Transform::identity(), None);
    }
}

fn dot(pixmap: &mut Pixmap, cx: f32, cy: f32, radius: f32, color: Color, s: f32) {
    let mut paint = Paint::default();
    paint.set_color(glyphs::to_skia_color(color));
    paint.anti_alias = true;
    if let Some(path) = PathBuilder::from_circle(cx * s, cy * s, radius * s) {
        pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    }
}

fn greeked(pixmap: &mut Pixmap, text: &str, size: f32, color: Color, x: f32, y: f32, s: f32) {
    let style = TextStyle { font_size: size, color, ..TextStyle::default() };
    glyphs::draw_greeked(pixmap, text, &style, x, y, s);
}

/// Body text stand-in: translucent full-width stripes, the last one short.
fn body_stripes(pixmap: &mut Pixmap, color: Color, x: f32, y: f32, width: f32, size: f32, s: f32) -> f32 {
    let mut y = y;
    for i in 0..BODY_STRIPES {
        let w = if i == BODY_STRIPES - 1 { width * 0.6 } else { width };
        fill(pixmap, x, y + size * 0.35, w, size * 0.5, color.with_alpha(0.35), s);
        y += size * 1.35;
    }
    y
}

fn draw_document(pixmap: &mut Pixmap, doc: &CvDocument, s: f32) {
    let style = effective_style(doc);
    let plan = plan_for(get(&doc.template_id).layout);
    let colors = &style.colors;
    let base = style.fonts.font_size;
    let x = PAGE_MARGIN_PT;
    let width = A4_WIDTH_PT - 2.0 * PAGE_MARGIN_PT;
    let bottom = A4_HEIGHT_PT - PAGE_MARGIN_PT;
    let mut y = PAGE_MARGIN_PT;

    if colors.background_color != Color::rgb(0xff, 0xff, 0xff) {
        fill(pixmap, 0.0, 0.0, A4_WIDTH_PT, A4_HEIGHT_PT, colors.background_color, s);
    }
    if plan.accent_band {
        fill(pixmap, 0.0, 0.0, A4_WIDTH_PT, 6.0, colors.accent_color, s);
        y += 10.0;
    }

    let info = &doc.personal_info;
    if info.profile_image.is_some() || plan.reserve_photo_slot {
        let size = plan.photo_size;
        let px = A4_WIDTH_PT - PAGE_MARGIN_PT - size;
        match info.profile_image.as_ref().map(|i| i.is_circle) {
            Some(true) => dot(pixmap, px + size / 2.0, y + size / 2.0, size / 2.0, Color::gray(0xc8), s),
            _ => fill(pixmap, px, y, size, size, Color::gray(0xc8), s),
        }
    }

    if !info.name.trim().is_empty() {
        greeked(pixmap, &info.name, base * 2.2, colors.heading_color, x, y, s);
        y += base * 2.2 * 1.3;
    }
    if !info.title.trim().is_empty() {
        greeked(pixmap, &info.title, base * 1.3, colors.sub_heading_color, x, y, s);
        y += base * 1.3 * 1.4;
    }
    let contacts = info.contact_fields();
    if !contacts.is_empty() {
        let mut cx = x;
        for (_, value) in &contacts {
            dot(pixmap, cx + base * 0.25, y + base * 0.6, base * 0.25, colors.accent_color, s);
            let bar_x = cx + base * 0.8;
            greeked(pixmap, value, base, colors.text_color, bar_x, y, s);
            cx = bar_x + value.chars().count() as f32 * base * 0.6 + base * 1.2;
            if cx > x + width {
                break;
            }
        }
        y += base * 1.8;
    }
    if !info.summary.trim().is_empty() {
        y = body_stripes(pixmap, colors.text_color, x, y, width, base, s);
    }
    y += base;

    for section in &doc.sections {
        if section.items.is_empty() {
            continue;
        }
        // First page only.
        if y + base * 2.0 > bottom {
            break;
        }
        let title = if section.title.trim().is_empty() {
            section_label(section.items.kind())
        } else {
            section.title.trim().to_string()
        };
        greeked(pixmap, &title, base * 1.25, colors.heading_color, x, y, s);
        y += base * 1.25 * 1.35;
        if plan.heading_rule {
            fill(pixmap, x, y, width, 1.0, colors.accent_color, s);
            y += 4.0;
        }

        for view in item_views(&section.items) {
            if y + base * 1.5 > bottom {
                break;
            }
            if let Some(level) = view.level {
                greeked(pixmap, &view.primary, base, colors.text_color, x, y, s);
                let filled = u32::from(level.div_ceil(20).min(5));
                for i in 0..5u32 {
                    let color = if i < filled { colors.accent_color } else { colors.accent_color.with_alpha(0.25) };
                    let cx = x + width - (4 - i) as f32 * base * 0.9 - base * 0.3;
                    dot(pixmap, cx, y + base * 0.6, base * 0.3, color, s);
                }
                y += base * 1.5;
                continue;
            }
            if !view.primary.is_empty() {
                greeked(pixmap, &view.primary, base * 1.05, colors.sub_heading_color, x, y, s);
                y += base * 1.05 * 1.35;
            }
            if !view.secondary.is_empty() {
                greeked(pixmap, &view.secondary, base, colors.text_color, x, y, s);
                y += base * 1.35;
            }
            if !view.body.is_empty() || !view.fields.is_empty() {
                y = body_stripes(pixmap, colors.text_color, x, y, width, base, s);
            }
            y += base * 0.5;
        }
        y += base;
    }
}

/// Gray content stripes suggesting a document, for empty drafts.
fn draw_placeholder(pixmap: &mut Pixmap) {
    let width = pixmap.width() as f32;
    let height = pixmap.height() as f32;
    let margin = width * 0.08;
    let mut paint = Paint::default();
    paint.set_color(glyphs::to_skia_color(Color::gray(0xe3)));

    // Title block.
    if let Some(r) = Rect::from_xywh(margin, margin, width * 0.45, height * 0.035) {
        pixmap.fill_rect(r, &paint, Transform::identity(), None);
    }
    // Body stripes.
    let stripe_h = height * 0.016;
    let gap = stripe_h * 1.8;
    let mut y = margin + height * 0.08;
    let mut i = 0u32;
    while y + stripe_h < height - margin {
        let w = if i % 4 == 3 { width * 0.55 } else { width - 2.0 * margin };
        if let Some(r) = Rect::from_xywh(margin, y, w, stripe_h) {
            pixmap.fill_rect(r, &paint, Transform::identity(), None);
        }
        y += gap + if i % 4 == 3 { stripe_h * 2.0 } else { 0.0 };
        i += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitae_types::{PersonalInfo, ProfileImage, Section, SectionItems, SkillItem};

    fn empty_doc() -> CvDocument {
        CvDocument {
            id: "d".into(),
            title: "CV".into(),
            personal_info: PersonalInfo::default(),
            sections: vec![],
            color_scheme: None,
            template_id: "standard".into(),
        }
    }

    fn filled_doc() -> CvDocument {
        let mut doc = empty_doc();
        doc.personal_info.name = "Jane Doe".into();
        doc.personal_info.summary = "Engineer.".into();
        doc.sections = vec![Section {
            id: "s".into(),
            title: "Skills".into(),
            items: SectionItems::Skills(vec![SkillItem { name: "Rust".into(), level: 90 }]),
        }];
        doc
    }

    fn ink_count(pixmap: &Pixmap) -> usize {
        pixmap.pixels().iter().filter(|p| p.red() < 250).count()
    }

    #[test]
    fn thumbnail_has_a4_aspect() {
        let pixmap = render_thumbnail(&empty_doc(), 200, 1.0).unwrap();
        assert_eq!(pixmap.width(), 200);
        let expected = (200.0 * A4_HEIGHT_PT / A4_WIDTH_PT).round() as u32;
        assert_eq!(pixmap.height(), expected);
    }

    #[test]
    fn device_pixel_ratio_scales_the_surface() {
        let pixmap = render_thumbnail(&empty_doc(), 200, 2.0).unwrap();
        assert_eq!(pixmap.width(), 400);
    }

    #[test]
    fn empty_document_gets_a_placeholder() {
        let pixmap = render_thumbnail(&empty_doc(), 160, 1.0).unwrap();
        assert!(ink_count(&pixmap) > 0);
    }

    #[test]
    fn filled_document_draws_real_content() {
        let pixmap = render_thumbnail(&filled_doc(), 160, 1.0).unwrap();
        assert!(ink_count(&pixmap) > 0);
    }

    #[test]
    fn photo_tile_stands_in_for_the_image() {
        let mut with_photo = filled_doc();
        with_photo.personal_info.profile_image = Some(ProfileImage {
            url: "photo.png".into(),
            ..ProfileImage::default()
        });
        let plain = render_thumbnail(&filled_doc(), 160, 1.0).unwrap();
        let tiled = render_thumbnail(&with_photo, 160, 1.0).unwrap();
        assert!(ink_count(&tiled) > ink_count(&plain));
    }
}
