use thiserror::Error;

use crate::resource::ResourceError;

/// Top-level error type for both export pipelines.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("document has no exportable content")]
    NothingToExport,

    #[error("an export is already running")]
    ExportInProgress,

    #[error("capture failed: {0}")]
    Capture(#[from] vitae_render_raster::RasterError),

    #[error("assembly failed: {0}")]
    Assembly(#[from] vitae_render_pdf::PdfError),

    #[error("resource loading failed: {0}")]
    Resource(#[from] ResourceError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
