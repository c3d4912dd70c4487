//! Capture, slice and assemble: layout to paginated raster PDF.

use printpdf::image::RawImage;
use printpdf::ops::Op;
use printpdf::xobject::{XObject, XObjectTransform};
use printpdf::{Mm, PdfDocument, PdfPage, PdfSaveOptions, Pt, XObjectId};
use tiny_skia::{Pixmap, PixmapPaint, Transform};
use vitae_layout::fonts::FontLibrary;
use vitae_layout::{normalize_for_export, RenderedLayout, A4_HEIGHT_PT, A4_WIDTH_PT};

use crate::error::RasterError;
use crate::pagination::slice_offsets;
use crate::surface::{rasterize, ImageSources};
use crate::watermark::apply_watermark;

/// CSS pixel dimensions of one A4 page at 96 dpi.
pub const PAGE_PX_WIDTH: u32 = 794;
pub const PAGE_PX_HEIGHT: u32 = 1122;

/// Capture oversampling factor. The bitmap is captured at twice the page
/// pixel size and scaled down by the PDF placement, which keeps small text
/// legible after the raster round trip.
pub const OVERSAMPLE: u32 = 2;

#[derive(Debug, Clone, Copy, Default)]
pub struct RasterExportOptions {
    /// Tiles the fixed label across every page before slicing.
    pub watermark: bool,
}

/// Runs the full raster pipeline over a screen layout and returns the
/// assembled PDF bytes. The layout is normalized here; callers pass the
/// live screen layout untouched.
pub fn export(
    layout: &RenderedLayout,
    fonts: &FontLibrary,
    images: &ImageSources,
    title: &str,
    options: &RasterExportOptions,
) -> Result<Vec<u8>, RasterError> {
    let normalized = normalize_for_export(layout);
    let px_per_pt = (PAGE_PX_WIDTH * OVERSAMPLE) as f32 / A4_WIDTH_PT;
    let mut capture = rasterize(&normalized, px_per_pt, fonts, images)?;
    if options.watermark {
        apply_watermark(&mut capture, fonts, px_per_pt);
    }

    let page_height_px = PAGE_PX_HEIGHT * OVERSAMPLE;
    let offsets = slice_offsets(capture.height(), page_height_px);
    log::debug!(
        "raster export: capture {}x{}, {} page(s)",
        capture.width(),
        capture.height(),
        offsets.len()
    );

    let mut pages = Vec::with_capacity(offsets.len());
    let mut doc = PdfDocument::new(title);
    for offset in offsets {
        let png = slice_page(&capture, offset, page_height_px)?
            .encode_png()
            .map_err(|e| RasterError::PngEncode(e.to_string()))?;

        let mut warnings = Vec::new();
        let raw = RawImage::decode_from_bytes(&png, &mut warnings)
            .map_err(|e| RasterError::PdfAssembly(format!("page image rejected: {}", e)))?;
        let (img_w, img_h) = (raw.width as f32, raw.height as f32);
        let xobj_id = XObjectId::new();
        doc.resources.xobjects.map.insert(xobj_id.clone(), XObject::Image(raw));

        let transform = XObjectTransform {
            translate_x: Some(Pt(0.0)),
            translate_y: Some(Pt(0.0)),
            scale_x: Some(A4_WIDTH_PT / img_w),
            scale_y: Some(A4_HEIGHT_PT / img_h),
            rotate: None,
            dpi: Some(72.0),
        };
        let ops = vec![Op::UseXobject { id: xobj_id, transform }];
        pages.push(PdfPage::new(Mm(210.0), Mm(297.0), ops));
    }

    doc.pages = pages;
    let mut warnings = Vec::new();
    Ok(doc.save(&PdfSaveOptions::default(), &mut warnings))
}

/// Copies one fixed-height page slice out of the capture. The final slice
/// keeps its bottom white instead of shrinking the page.
fn slice_page(capture: &Pixmap, offset: u32, page_height_px: u32) -> Result<Pixmap, RasterError> {
    let width = capture.width();
    let mut page = Pixmap::new(width, page_height_px)
        .ok_or(RasterError::Surface { width, height: page_height_px })?;
    page.fill(tiny_skia::Color::WHITE);
    page.draw_pixmap(
        0,
        -(offset as i32),
        capture.as_ref(),
        &PixmapPaint::default(),
        Transform::identity(),
        None,
    );
    Ok(page)
}
