//! Per-slot cascading color resolution.
//!
//! Each of the seven slots is picked independently: document override first,
//! then the template's default, with the global default scheme as the final
//! backstop. A document overriding only `accentColor` inherits the other six
//! slots from its template untouched.

use crate::scheme::ColorScheme;
use vitae_types::{Color, PartialColorScheme};

/// The hard-coded global defaults, used for templates constructed without a
/// full scheme and as the base of the `standard` template.
pub fn global_default_scheme() -> ColorScheme {
    ColorScheme {
        primary_color: Color::rgb(0x2c, 0x3e, 0x50),
        secondary_color: Color::rgb(0xec, 0xf0, 0xf1),
        heading_color: Color::rgb(0x2c, 0x3e, 0x50),
        sub_heading_color: Color::rgb(0x34, 0x49, 0x5e),
        text_color: Color::rgb(0x33, 0x33, 0x33),
        background_color: Color::rgb(0xff, 0xff, 0xff),
        accent_color: Color::rgb(0x31, 0x98, 0xc1),
    }
}

/// Resolves the effective scheme for one render. Pure and deterministic:
/// identical inputs always produce identical output, which is what keeps the
/// raster and structured export pipelines in agreement on colors.
pub fn resolve_scheme(
    overrides: Option<&PartialColorScheme>,
    template: &ColorScheme,
) -> ColorScheme {
    let pick = |slot: fn(&PartialColorScheme) -> Option<Color>, base: Color| {
        overrides.and_then(slot).unwrap_or(base)
    };
    ColorScheme {
        primary_color: pick(|o| o.primary_color, template.primary_color),
        secondary_color: pick(|o| o.secondary_color, template.secondary_color),
        heading_color: pick(|o| o.heading_color, template.heading_color),
        sub_heading_color: pick(|o| o.sub_heading_color, template.sub_heading_color),
        text_color: pick(|o| o.text_color, template.text_color),
        background_color: pick(|o| o.background_color, template.background_color),
        accent_color: pick(|o| o.accent_color, template.accent_color),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_overrides_yields_template_scheme() {
        let template = global_default_scheme();
        assert_eq!(resolve_scheme(None, &template), template);
    }

    #[test]
    fn accent_only_override_keeps_other_slots() {
        let template = global_default_scheme();
        let overrides = PartialColorScheme {
            accent_color: Some(Color::rgb(0xe7, 0x4c, 0x3c)),
            ..PartialColorScheme::default()
        };
        let resolved = resolve_scheme(Some(&overrides), &template);
        assert_eq!(resolved.accent_color, Color::rgb(0xe7, 0x4c, 0x3c));
        assert_eq!(resolved.primary_color, template.primary_color);
        assert_eq!(resolved.text_color, template.text_color);
        assert_eq!(resolved.background_color, template.background_color);
    }

    #[test]
    fn resolution_is_deterministic() {
        let template = global_default_scheme();
        let overrides = PartialColorScheme {
            primary_color: Some(Color::rgb(1, 2, 3)),
            ..PartialColorScheme::default()
        };
        let a = resolve_scheme(Some(&overrides), &template);
        let b = resolve_scheme(Some(&overrides), &template);
        assert_eq!(a, b);
    }
}
