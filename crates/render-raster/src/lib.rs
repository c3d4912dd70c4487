//! Raster export pipeline and degraded preview rendering.
//!
//! The pipeline captures the normalized layout onto an oversampled bitmap,
//! composites the optional watermark, slices the bitmap into fixed-height
//! pages and embeds each page as a PNG in a PDF. Thumbnails take a cheaper
//! path over the same layout: primitives only, text greeked.

pub mod error;
pub mod glyphs;
pub mod pagination;
pub mod pipeline;
pub mod surface;
pub mod thumbnail;
pub mod watermark;

pub use error::RasterError;
pub use pipeline::{export, RasterExportOptions, OVERSAMPLE, PAGE_PX_HEIGHT, PAGE_PX_WIDTH};
pub use surface::{rasterize, ImageSources};
pub use thumbnail::render_thumbnail;
pub use watermark::WATERMARK_LABEL;
