//! The static template catalog.

use crate::plan::LayoutVariant;
use once_cell::sync::Lazy;
use vitae_style::resolver::global_default_scheme;
use vitae_style::{ColorScheme, FontSettings};
use vitae_types::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Simple,
    Professional,
    Creative,
}

/// An immutable, process-wide template definition, looked up by id.
#[derive(Debug, Clone)]
pub struct Template {
    pub id: &'static str,
    pub name: &'static str,
    pub layout: LayoutVariant,
    pub color_scheme: ColorScheme,
    pub font_settings: FontSettings,
    pub is_premium: bool,
    pub category: Category,
}

fn fonts(heading: &str, body: &str, size: f32) -> FontSettings {
    FontSettings {
        heading_font: heading.to_string(),
        body_font: body.to_string(),
        font_size: size,
    }
}

static CATALOG: Lazy<Vec<Template>> = Lazy::new(|| {
    vec![
        Template {
            id: "standard",
            name: "Standard",
            layout: LayoutVariant::Standard,
            color_scheme: global_default_scheme(),
            font_settings: fonts("Helvetica", "Helvetica", 10.0),
            is_premium: false,
            category: Category::Simple,
        },
        Template {
            id: "modern",
            name: "Modern",
            layout: LayoutVariant::Modern,
            color_scheme: ColorScheme {
                primary_color: Color::rgb(0x1a, 0xbc, 0x9c),
                secondary_color: Color::rgb(0xf4, 0xf9, 0xf9),
                heading_color: Color::rgb(0x14, 0x3d, 0x3d),
                sub_heading_color: Color::rgb(0x16, 0xa0, 0x85),
                text_color: Color::rgb(0x2d, 0x34, 0x36),
                background_color: Color::rgb(0xff, 0xff, 0xff),
                accent_color: Color::rgb(0x1a, 0xbc, 0x9c),
            },
            font_settings: fonts("Helvetica", "Helvetica", 10.0),
            is_premium: false,
            category: Category::Simple,
        },
        Template {
            id: "minimalist",
            name: "Minimalist",
            layout: LayoutVariant::Minimalist,
            color_scheme: ColorScheme {
                primary_color: Color::rgb(0x21, 0x21, 0x21),
                secondary_color: Color::rgb(0xfa, 0xfa, 0xfa),
                heading_color: Color::rgb(0x21, 0x21, 0x21),
                sub_heading_color: Color::rgb(0x61, 0x61, 0x61),
                text_color: Color::rgb(0x42, 0x42, 0x42),
                background_color: Color::rgb(0xff, 0xff, 0xff),
                accent_color: Color::rgb(0x9e, 0x9e, 0x9e),
            },
            font_settings: fonts("Times New Roman", "Times New Roman", 10.5),
            is_premium: false,
            category: Category::Simple,
        },
        Template {
            id: "creative",
            name: "Creative",
            layout: LayoutVariant::Creative,
            color_scheme: ColorScheme {
                primary_color: Color::rgb(0x8e, 0x44, 0xad),
                secondary_color: Color::rgb(0xf5, 0xee, 0xf8),
                heading_color: Color::rgb(0x4a, 0x23, 0x5e),
                sub_heading_color: Color::rgb(0x8e, 0x44, 0xad),
                text_color: Color::rgb(0x33, 0x33, 0x33),
                background_color: Color::rgb(0xff, 0xff, 0xff),
                accent_color: Color::rgb(0xe6, 0x7e, 0x22),
            },
            font_settings: fonts("Helvetica", "Helvetica", 10.0),
            is_premium: false,
            category: Category::Creative,
        },
        Template {
            id: "professional",
            name: "Professional",
            layout: LayoutVariant::Professional,
            color_scheme: ColorScheme {
                primary_color: Color::rgb(0x2c, 0x3e, 0x50),
                secondary_color: Color::rgb(0xee, 0xf2, 0xf5),
                heading_color: Color::rgb(0x1a, 0x25, 0x30),
                sub_heading_color: Color::rgb(0x2c, 0x3e, 0x50),
                text_color: Color::rgb(0x2d, 0x34, 0x36),
                background_color: Color::rgb(0xff, 0xff, 0xff),
                accent_color: Color::rgb(0xc0, 0x39, 0x2b),
            },
            font_settings: fonts("Times New Roman", "Helvetica", 10.0),
            is_premium: true,
            category: Category::Professional,
        },
        Template {
            id: "executive",
            name: "Executive",
            layout: LayoutVariant::Executive,
            color_scheme: ColorScheme {
                primary_color: Color::rgb(0x1c, 0x28, 0x33),
                secondary_color: Color::rgb(0xd5, 0xc2, 0x9a),
                heading_color: Color::rgb(0x1c, 0x28, 0x33),
                sub_heading_color: Color::rgb(0x8a, 0x6d, 0x3b),
                text_color: Color::rgb(0x2b, 0x2b, 0x2b),
                background_color: Color::rgb(0xff, 0xfd, 0xf7),
                accent_color: Color::rgb(0x8a, 0x6d, 0x3b),
            },
            font_settings: fonts("Times New Roman", "Times New Roman", 10.5),
            is_premium: true,
            category: Category::Professional,
        },
        Template {
            id: "nordic",
            name: "Nordic",
            layout: LayoutVariant::Nordic,
            color_scheme: ColorScheme {
                primary_color: Color::rgb(0x4c, 0x56, 0x6a),
                secondary_color: Color::rgb(0xec, 0xef, 0xf4),
                heading_color: Color::rgb(0x2e, 0x34, 0x40),
                sub_heading_color: Color::rgb(0x5e, 0x81, 0xac),
                text_color: Color::rgb(0x3b, 0x42, 0x52),
                background_color: Color::rgb(0xff, 0xff, 0xff),
                accent_color: Color::rgb(0x88, 0xc0, 0xd0),
            },
            font_settings: fonts("Helvetica", "Helvetica", 10.0),
            is_premium: true,
            category: Category::Simple,
        },
        Template {
            id: "creative-pro",
            name: "Creative Pro",
            layout: LayoutVariant::CreativePro,
            color_scheme: ColorScheme {
                primary_color: Color::rgb(0xd3, 0x54, 0x00),
                secondary_color: Color::rgb(0xfd, 0xf2, 0xe9),
                heading_color: Color::rgb(0x78, 0x2f, 0x00),
                sub_heading_color: Color::rgb(0xd3, 0x54, 0x00),
                text_color: Color::rgb(0x33, 0x33, 0x33),
                background_color: Color::rgb(0xff, 0xff, 0xff),
                accent_color: Color::rgb(0x27, 0xae, 0x60),
            },
            font_settings: fonts("Helvetica", "Helvetica", 10.0),
            is_premium: true,
            category: Category::Creative,
        },
    ]
});

/// Looks up a template by id. Unknown ids return the `standard` template;
/// this is the catalog's fallback policy, not an error.
pub fn get(id: &str) -> &'static Template {
    CATALOG.iter().find(|t| t.id == id).unwrap_or_else(standard)
}

/// The `standard` template every unknown id falls back to.
pub fn standard() -> &'static Template {
    CATALOG
        .iter()
        .find(|t| t.id == "standard")
        .expect("catalog always contains the standard template")
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateFilter {
    pub category: Option<Category>,
    pub premium: Option<bool>,
}

/// Lists catalog templates, optionally filtered by category and premium flag.
pub fn list(filter: TemplateFilter) -> Vec<&'static Template> {
    CATALOG
        .iter()
        .filter(|t| filter.category.is_none_or(|c| t.category == c))
        .filter(|t| filter.premium.is_none_or(|p| t.is_premium == p))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_id_falls_back_to_standard() {
        assert_eq!(get("nonexistent-id").id, standard().id);
        assert_eq!(get("nonexistent-id").layout, LayoutVariant::Standard);
    }

    #[test]
    fn every_template_has_a_distinct_id() {
        let mut ids: Vec<_> = list(TemplateFilter::default()).iter().map(|t| t.id).collect();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }

    #[test]
    fn premium_filter() {
        let free = list(TemplateFilter { premium: Some(false), ..Default::default() });
        assert!(free.iter().all(|t| !t.is_premium));
        assert!(free.iter().any(|t| t.id == "standard"));
    }

    #[test]
    fn category_filter() {
        let creative = list(TemplateFilter {
            category: Some(Category::Creative),
            ..Default::default()
        });
        assert!(!creative.is_empty());
        assert!(creative.iter().all(|t| t.category == Category::Creative));
    }
}
