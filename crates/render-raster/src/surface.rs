//! Captures a layout onto a tiny-skia pixmap.

use std::collections::HashMap;

use tiny_skia::{
    ColorU8, FillRule, Mask, Paint, Path, PathBuilder, Pixmap, PixmapPaint, Rect, Stroke,
    StrokeDash, Transform,
};
use vitae_layout::fonts::FontLibrary;
use vitae_layout::{
    DotElement, ImageElement, LayoutElement, LineElement, PositionedElement, RectElement,
    RenderedLayout,
};
use vitae_types::{Color, FrameStyle, SharedData};

use crate::error::RasterError;
use crate::glyphs;

/// Pre-fetched image bytes keyed by the element's `src`.
pub type ImageSources = HashMap<String, SharedData>;

/// Rasterizes `layout` at `px_per_pt` pixels per point onto a white
/// surface. Elements flagged `editor_only` or `clipped` are skipped; export
/// callers normalize first so nothing carries those flags by then.
pub fn rasterize(
    layout: &RenderedLayout,
    px_per_pt: f32,
    fonts: &FontLibrary,
    images: &ImageSources,
) -> Result<Pixmap, RasterError> {
    let width = (layout.width * px_per_pt).round().max(1.0) as u32;
    let height = (layout.height * px_per_pt).round().max(1.0) as u32;
    let mut pixmap =
        Pixmap::new(width, height).ok_or(RasterError::Surface { width, height })?;
    pixmap.fill(tiny_skia::Color::WHITE);

    for el in &layout.elements {
        if el.flags.editor_only || el.flags.clipped {
            continue;
        }
        match &el.element {
            LayoutElement::Text(text) => {
                glyphs::draw_text(
                    &mut pixmap,
                    fonts,
                    &text.content,
                    &text.style,
                    el.x,
                    el.y,
                    px_per_pt,
                );
            }
            LayoutElement::Rect(rect) => draw_rect(&mut pixmap, el, rect, px_per_pt),
            LayoutElement::Dot(dot) => draw_dot(&mut pixmap, el, dot, px_per_pt),
            LayoutElement::Line(line) => draw_line(&mut pixmap, el, line, px_per_pt),
            LayoutElement::Image(image) => {
                draw_image(&mut pixmap, el, image, px_per_pt, images)?;
            }
        }
    }
    Ok(pixmap)
}

fn solid_paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(glyphs::to_skia_color(color));
    paint.anti_alias = true;
    paint
}

pub(crate) fn draw_rect(
    pixmap: &mut Pixmap,
    el: &PositionedElement,
    rect: &RectElement,
    s: f32,
) {
    if rect.fill.a <= 0.0 {
        return;
    }
    let paint = solid_paint(rect.fill);
    let (x, y, w, h) = (el.x * s, el.y * s, el.width * s, el.height * s);
    if rect.corner_radius > 0.0 {
        if let Some(path) = rounded_rect_path(x, y, w, h, rect.corner_radius * s) {
            pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
        }
    } else if let Some(r) = Rect::from_xywh(x, y, w, h) {
        pixmap.fill_rect(r, &paint, Transform::identity(), None);
    }
}

pub(crate) fn draw_dot(pixmap: &mut Pixmap, el: &PositionedElement, dot: &DotElement, s: f32) {
    let radius = el.width.min(el.height) / 2.0 * s;
    let cx = (el.x + el.width / 2.0) * s;
    let cy = (el.y + el.height / 2.0) * s;
    let Some(path) = PathBuilder::from_circle(cx, cy, radius) else {
        return;
    };
    let paint = solid_paint(dot.color);
    if dot.filled {
        pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    } else {
        let stroke = Stroke { width: (0.75 * s).max(1.0), ..Stroke::default() };
        pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }
}

pub(crate) fn draw_line(
    pixmap: &mut Pixmap,
    el: &PositionedElement,
    line: &LineElement,
    s: f32,
) {
    let thickness = (line.thickness * s).max(1.0);
    if let Some(r) = Rect::from_xywh(el.x * s, el.y * s, el.width * s, thickness) {
        pixmap.fill_rect(r, &solid_paint(line.color), Transform::identity(), None);
    }
}

fn draw_image(
    pixmap: &mut Pixmap,
    el: &PositionedElement,
    image: &ImageElement,
    s: f32,
    images: &ImageSources,
) -> Result<(), RasterError> {
    let (x, y, w, h) = (el.x * s, el.y * s, el.width * s, el.height * s);

    let Some(bytes) = images.get(&image.src) else {
        // Unresolved source degrades to a neutral placeholder box.
        log::warn!("no image data for '{}', drawing placeholder", image.src);
        if let Some(r) = Rect::from_xywh(x, y, w, h) {
            pixmap.fill_rect(r, &solid_paint(Color::gray(0xd9)), Transform::identity(), None);
        }
        return Ok(());
    };

    let decoded = image::load_from_memory(bytes)
        .map_err(|e| RasterError::ImageDecode { src: image.src.clone(), source: e })?
        .to_rgba8();
    let (img_w, img_h) = decoded.dimensions();
    let mut source = Pixmap::new(img_w.max(1), img_h.max(1))
        .ok_or(RasterError::Surface { width: img_w, height: img_h })?;
    for (pixel, out) in decoded.pixels().zip(source.pixels_mut()) {
        let [r, g, b, a] = pixel.0;
        let (r, g, b, a) = if image.transparent {
            (r, g, b, a)
        } else {
            // Opaque mode composites over white up front.
            let over = |c: u8| {
                ((c as u16 * a as u16 + 255 * (255 - a as u16)) / 255) as u8
            };
            (over(r), over(g), over(b), 255)
        };
        *out = ColorU8::from_rgba(r, g, b, a).premultiply();
    }

    let transform =
        Transform::from_row(w / img_w.max(1) as f32, 0.0, 0.0, h / img_h.max(1) as f32, x, y);
    let mask = if image.circle {
        let mut mask = Mask::new(pixmap.width(), pixmap.height())
            .ok_or(RasterError::Surface { width: pixmap.width(), height: pixmap.height() })?;
        if let Some(path) =
            PathBuilder::from_circle(x + w / 2.0, y + h / 2.0, w.min(h) / 2.0)
        {
            mask.fill_path(&path, FillRule::Winding, true, Transform::identity());
        }
        Some(mask)
    } else {
        None
    };
    pixmap.draw_pixmap(
        0,
        0,
        source.as_ref(),
        &PixmapPaint::default(),
        transform,
        mask.as_ref(),
    );

    if let Some(frame) = &image.frame {
        let path = if image.circle {
            PathBuilder::from_circle(x + w / 2.0, y + h / 2.0, w.min(h) / 2.0)
        } else {
            rounded_rect_path(x, y, w, h, 0.0)
        };
        if let Some(path) = path {
            let dash = match frame.style {
                FrameStyle::Solid => None,
                FrameStyle::Dashed => StrokeDash::new(vec![6.0 * s, 4.0 * s], 0.0),
                FrameStyle::Dotted => StrokeDash::new(vec![1.0 * s, 3.0 * s], 0.0),
            };
            let stroke = Stroke { width: (frame.width * s).max(1.0), dash, ..Stroke::default() };
            pixmap.stroke_path(
                &path,
                &solid_paint(frame.color),
                &stroke,
                Transform::identity(),
                None,
            );
        }
    }
    Ok(())
}

/// Rect path with circular corners approximated by cubics. Radius zero
/// yields a plain closed rect path, usable for stroking.
fn rounded_rect_path(x: f32, y: f32, w: f32, h: f32, radius: f32) -> Option<Path> {
    let r = radius.min(w / 2.0).min(h / 2.0);
    let mut pb = PathBuilder::new();
    if r <= 0.0 {
        pb.push_rect(Rect::from_xywh(x, y, w, h)?);
        return pb.finish();
    }
    const K: f32 = 0.552_285;
    let k = K * r;
    pb.move_to(x + r, y);
    pb.line_to(x + w - r, y);
    pb.cubic_to(x + w - r + k, y, x + w, y + r - k, x + w, y + r);
    pb.line_to(x + w, y + h - r);
    pb.cubic_to(x + w, y + h - r + k, x + w - r + k, y + h, x + w - r, y + h);
    pb.line_to(x + r, y + h);
    pb.cubic_to(x + r - k, y + h, x, y + h - r + k, x, y + h - r);
    pb.line_to(x, y + r);
    pb.cubic_to(x, y + r - k, x + r - k, y, x + r, y);
    pb.close();
    pb.finish()
}
