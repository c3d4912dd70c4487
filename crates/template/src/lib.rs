//! The process-wide template catalog and the shared layout description both
//! export pipelines dispatch on.
//!
//! The catalog is read-only configuration loaded once at startup; there is
//! deliberately no write path. Template lookup never fails: an unknown id
//! falls back to the `standard` template, because documents may reference a
//! template that was later removed from the catalog.

pub mod catalog;
pub mod content;
pub mod plan;

pub use catalog::{get, list, standard, Category, Template, TemplateFilter};
pub use content::{item_views, section_label, ItemView};
pub use plan::{plan_for, Arrangement, LayoutPlan, LayoutVariant, Side};

use vitae_style::{resolve_scheme, EffectiveStyle};
use vitae_types::CvDocument;

/// Resolves the complete style for one render of `doc`: template defaults
/// cascaded with the document's per-slot color overrides.
pub fn effective_style(doc: &CvDocument) -> EffectiveStyle {
    let template = get(&doc.template_id);
    EffectiveStyle {
        colors: resolve_scheme(doc.color_scheme.as_ref(), &template.color_scheme),
        fonts: template.font_settings.clone(),
    }
}
