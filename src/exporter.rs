//! The export façade: rendering views and running the two pipelines.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tiny_skia::Pixmap;
use vitae_layout::{render, FontLibrary, LayoutElement, RenderedLayout};
use vitae_render_raster::{render_thumbnail, ImageSources, RasterExportOptions};
use vitae_style::EffectiveStyle;
use vitae_template::effective_style;
use vitae_types::CvDocument;

use crate::error::ExportError;
use crate::filename::export_filename;
use crate::resource::ResourceProvider;

/// A document rendered for display: the positioned layout plus the style
/// that produced it. Exports start from one of these so what the user sees
/// is exactly what gets captured.
pub struct RenderedView {
    pub document: CvDocument,
    pub style: EffectiveStyle,
    pub layout: RenderedLayout,
}

#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// Tiles the fixed watermark label over every raster page and switches
    /// the filename to the `.demo` form.
    pub watermark: bool,
}

pub struct ExportedPdf {
    pub filename: String,
    pub bytes: Vec<u8>,
}

pub struct Exporter {
    fonts: Arc<FontLibrary>,
    resources: Arc<dyn ResourceProvider>,
    capture_in_flight: AtomicBool,
}

impl Exporter {
    pub fn new(resources: Arc<dyn ResourceProvider>) -> Self {
        Self {
            fonts: Arc::new(FontLibrary::new()),
            resources,
            capture_in_flight: AtomicBool::new(false),
        }
    }

    pub fn fonts(&self) -> &FontLibrary {
        &self.fonts
    }

    /// Renders the display view for a document: style cascade, then layout.
    pub fn render(&self, doc: &CvDocument) -> RenderedView {
        let style = effective_style(doc);
        let layout = render(doc, &style, &self.fonts);
        RenderedView { document: doc.clone(), style, layout }
    }

    /// First-page preview, `width_px` CSS pixels wide.
    pub fn thumbnail(
        &self,
        doc: &CvDocument,
        width_px: u32,
        device_pixel_ratio: f32,
    ) -> Result<Pixmap, ExportError> {
        Ok(render_thumbnail(doc, width_px, device_pixel_ratio)?)
    }

    /// Captures `view` through the raster pipeline. Fails fast on empty
    /// documents and rejects concurrent captures; the capture surface is a
    /// shared resource.
    pub fn export_raster(
        &self,
        view: &RenderedView,
        options: &ExportOptions,
    ) -> Result<ExportedPdf, ExportError> {
        if !view.document.has_renderable_content() {
            return Err(ExportError::NothingToExport);
        }
        let _guard = CaptureGuard::acquire(&self.capture_in_flight)?;

        let images = self.gather_images(&view.layout);
        let raster_options = RasterExportOptions { watermark: options.watermark };
        let bytes = vitae_render_raster::export(
            &view.layout,
            &self.fonts,
            &images,
            &view.document.title,
            &raster_options,
        )?;
        Ok(ExportedPdf {
            filename: export_filename(&view.document.personal_info, options.watermark),
            bytes,
        })
    }

    /// Builds the structured vector PDF straight from the document model.
    /// Independent of the capture path, so it runs even while a raster
    /// export is in flight.
    pub fn export_structured(
        &self,
        doc: &CvDocument,
        options: &ExportOptions,
    ) -> Result<ExportedPdf, ExportError> {
        if !doc.has_renderable_content() {
            return Err(ExportError::NothingToExport);
        }
        let mut images = ImageSources::new();
        if let Some(image) = &doc.personal_info.profile_image {
            self.fetch(&image.url, &mut images);
        }
        let bytes = vitae_render_pdf::export_structured(doc, &self.fonts, &images)?;
        Ok(ExportedPdf {
            filename: export_filename(&doc.personal_info, options.watermark),
            bytes,
        })
    }

    /// Resolves every image source the layout references. A source that
    /// fails to load is logged and left out; the pipelines degrade to
    /// placeholders rather than losing the export.
    fn gather_images(&self, layout: &RenderedLayout) -> ImageSources {
        let mut images = ImageSources::new();
        for el in &layout.elements {
            if let LayoutElement::Image(image) = &el.element {
                self.fetch(&image.src, &mut images);
            }
        }
        images
    }

    fn fetch(&self, src: &str, images: &mut ImageSources) {
        if src.trim().is_empty() || images.contains_key(src) {
            return;
        }
        match self.resources.load(src) {
            Ok(data) => {
                images.insert(src.to_string(), data);
            }
            Err(e) => log::warn!("skipping image '{}': {}", src, e),
        }
    }
}

/// Holds the capture flag for the duration of one raster export.
struct CaptureGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> CaptureGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self, ExportError> {
        if flag
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(ExportError::ExportInProgress);
        }
        Ok(Self { flag })
    }
}

impl Drop for CaptureGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
