//! CV document composition and paginated PDF export.
//!
//! The engine turns a JSON CV document into styled, paginated PDFs through
//! two independent pipelines:
//!
//! - **Raster export**: the visual layout is captured onto an oversampled
//!   bitmap, optionally watermarked, sliced into A4 pages and embedded as
//!   page images. Output matches the on-screen rendering pixel for pixel.
//! - **Structured export**: the same content flows as real vector text and
//!   shapes, selectable and searchable, paginated at line granularity.
//!
//! Styling cascades per color slot: document overrides win over the
//! template scheme, which wins over the global defaults. Template lookup
//! never fails; unknown ids fall back to the standard template.
//!
//! ```no_run
//! use std::sync::Arc;
//! use vitae::{Exporter, ExportOptions, InMemoryResourceProvider};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let doc: vitae::CvDocument = serde_json::from_str(r#"{"id":"1","title":"CV",
//!     "personalInfo":{"name":"Jane Doe","summary":"Engineer."},
//!     "sections":[],"templateId":"modern"}"#)?;
//! let exporter = Exporter::new(Arc::new(InMemoryResourceProvider::new()));
//! let view = exporter.render(&doc);
//! let pdf = exporter.export_raster(&view, &ExportOptions::default())?;
//! std::fs::write(&pdf.filename, &pdf.bytes)?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod exporter;
pub mod filename;
pub mod resource;

pub use error::ExportError;
pub use exporter::{ExportOptions, ExportedPdf, Exporter, RenderedView};
pub use resource::{
    FilesystemResourceProvider, InMemoryResourceProvider, ResourceError, ResourceProvider,
};

pub use vitae_layout::{normalize_for_export, render, FontLibrary, RenderedLayout};
pub use vitae_render_raster::{render_thumbnail, WATERMARK_LABEL};
pub use vitae_style::{resolve_scheme, ColorScheme, EffectiveStyle};
pub use vitae_template::{
    effective_style, get as get_template, list as list_templates, Template, TemplateFilter,
};
pub use vitae_types::{Color, CvDocument, PartialColorScheme, Section, SectionItems};
