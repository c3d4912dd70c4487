//! Structured vector PDF export.
//!
//! Independent of the raster pipeline: text is written as real text with
//! the base-14 Type1 fonts, rules and dots as vector paths, the photo as an
//! image XObject. Output is selectable and searchable, paginates at line
//! granularity, and never contains bitmap page captures.

pub mod builder;
pub mod error;
pub mod writer;

pub use builder::export_structured;
pub use error::PdfError;
