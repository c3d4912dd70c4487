//! The single normalization pass shared by every export path.
//!
//! The on-screen layout carries editor affordances and overflow clamps that
//! must never reach a reader's PDF. Rather than each pipeline patching the
//! layout its own way, both call [`normalize_for_export`] once and render
//! the result verbatim.

use crate::elements::{PositionedElement, RenderedLayout, PAGE_MARGIN_PT};

/// Downward shift applied to icon-flagged elements. Icon glyphs are laid
/// out against a centered box whose optical baseline sits slightly high;
/// raster output makes the misalignment visible at small sizes.
pub const ICON_BASELINE_NUDGE_PT: f32 = 0.75;

/// Produces the export view of a layout: editor-only elements removed,
/// overflow clamps released, icon baselines corrected, and the height
/// recomputed from the surviving content. The input is untouched; the
/// screen layout stays valid throughout an export.
pub fn normalize_for_export(layout: &RenderedLayout) -> RenderedLayout {
    let elements: Vec<PositionedElement> = layout
        .elements
        .iter()
        .filter(|e| !e.flags.editor_only)
        .map(|e| {
            let mut e = e.clone();
            e.flags.clipped = false;
            if e.flags.icon {
                e.y += ICON_BASELINE_NUDGE_PT;
            }
            e
        })
        .collect();

    let normalized = RenderedLayout { elements, width: layout.width, height: 0.0 };
    let height = (normalized.content_bottom() + PAGE_MARGIN_PT).max(PAGE_MARGIN_PT * 2.0);
    RenderedLayout { height, ..normalized }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{
        DotElement, ElementFlags, LayoutElement, RectElement, TextElement, TextStyle,
    };
    use vitae_types::Color;

    fn text(content: &str, y: f32, flags: ElementFlags) -> PositionedElement {
        PositionedElement {
            x: 40.0,
            y,
            width: 100.0,
            height: 12.0,
            element: LayoutElement::Text(TextElement {
                content: content.into(),
                style: TextStyle::default(),
            }),
            flags,
        }
    }

    #[test]
    fn strips_editor_only_elements() {
        let layout = RenderedLayout {
            elements: vec![
                text("keep", 40.0, ElementFlags::default()),
                PositionedElement {
                    x: 0.0,
                    y: 0.0,
                    width: 12.0,
                    height: 12.0,
                    element: LayoutElement::Rect(RectElement {
                        fill: Color::gray(0x80),
                        corner_radius: 2.0,
                    }),
                    flags: ElementFlags { editor_only: true, ..ElementFlags::default() },
                },
            ],
            width: 595.0,
            height: 100.0,
        };
        let normalized = normalize_for_export(&layout);
        assert_eq!(normalized.elements.len(), 1);
        assert_eq!(normalized.text_content(), "keep");
    }

    #[test]
    fn releases_clipped_lines_and_grows_height() {
        let layout = RenderedLayout {
            elements: vec![
                text("visible", 40.0, ElementFlags::default()),
                text("overflow", 400.0, ElementFlags { clipped: true, ..ElementFlags::default() }),
            ],
            width: 595.0,
            height: 100.0,
        };
        let normalized = normalize_for_export(&layout);
        assert!(normalized.elements.iter().all(|e| !e.flags.clipped));
        assert!(normalized.height >= 400.0 + 12.0 + PAGE_MARGIN_PT);
    }

    #[test]
    fn nudges_icon_baseline() {
        let layout = RenderedLayout {
            elements: vec![PositionedElement {
                x: 40.0,
                y: 50.0,
                width: 4.0,
                height: 4.0,
                element: LayoutElement::Dot(DotElement {
                    color: Color::gray(0x00),
                    filled: true,
                }),
                flags: ElementFlags { icon: true, ..ElementFlags::default() },
            }],
            width: 595.0,
            height: 100.0,
        };
        let normalized = normalize_for_export(&layout);
        assert_eq!(normalized.elements[0].y, 50.0 + ICON_BASELINE_NUDGE_PT);
    }

    #[test]
    fn empty_layout_keeps_minimum_height() {
        let layout = RenderedLayout { elements: vec![], width: 595.0, height: 0.0 };
        let normalized = normalize_for_export(&layout);
        assert_eq!(normalized.height, PAGE_MARGIN_PT * 2.0);
    }
}
