//! Visual layout construction for CV documents.
//!
//! `render` turns a document plus its resolved style into a flat list of
//! absolutely positioned elements (text runs, rectangles, dots, rules,
//! images) in PDF points on an A4-wide canvas of unbounded height. The
//! raster export pipeline consumes that list; `normalize_for_export`
//! prepares an export-safe copy of it first.

pub mod elements;
pub mod fonts;
pub mod normalize;
pub mod renderer;
pub mod text;

pub use elements::{
    DotElement, ElementFlags, Frame, ImageElement, LayoutElement, LineElement,
    PositionedElement, RectElement, RenderedLayout, TextAlign, TextElement, TextStyle,
    A4_HEIGHT_PT, A4_WIDTH_PT, PAGE_MARGIN_PT,
};
pub use fonts::FontLibrary;
pub use normalize::{normalize_for_export, ICON_BASELINE_NUDGE_PT};
pub use renderer::render;
