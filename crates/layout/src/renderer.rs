//! Builds the positioned visual layout for a document.
//!
//! Arrangement (column split, sidebar routing, accent treatment) comes from
//! the template's [`LayoutPlan`]; item content comes from the shared
//! [`vitae_template::item_views`] mapping. Variants therefore differ only in
//! placement, never in which data they surface: every populated section and
//! every non-empty field ends up in the element list.

use crate::elements::{
    DotElement, ElementFlags, Frame, ImageElement, LayoutElement, LineElement,
    PositionedElement, RectElement, RenderedLayout, TextAlign, TextElement, TextStyle,
    A4_WIDTH_PT, PAGE_MARGIN_PT,
};
use crate::fonts::FontLibrary;
use crate::text::wrap_text;
use vitae_style::EffectiveStyle;
use vitae_template::{item_views, plan_for, section_label, Arrangement, LayoutPlan, Side};
use vitae_types::{Color, CvDocument, Section};

const LINE_HEIGHT_FACTOR: f32 = 1.35;
const SECTION_GAP_PT: f32 = 14.0;
const ITEM_GAP_PT: f32 = 8.0;
const ACCENT_BAND_PT: f32 = 6.0;
const CONTACT_DOT_PT: f32 = 4.0;
const SKILL_DOT_PT: f32 = 6.0;
const SKILL_DOT_COUNT: u8 = 5;
const SIDEBAR_PAD_PT: f32 = 12.0;
/// On-screen clamp on summary/description blocks; lines past it are flagged
/// `clipped` and only released by the export normalization pass.
const VISIBLE_BODY_LINES: usize = 6;

/// Renders `doc` with an already-resolved style into an A4-wide layout of
/// natural height. Read-only over the document; safe to call repeatedly.
pub fn render(doc: &CvDocument, style: &EffectiveStyle, fonts: &FontLibrary) -> RenderedLayout {
    let plan = plan_for(vitae_template::get(&doc.template_id).layout);
    let builder = LayoutBuilder { doc, style, plan, fonts, elements: Vec::new() };
    builder.build()
}

struct LayoutBuilder<'a> {
    doc: &'a CvDocument,
    style: &'a EffectiveStyle,
    plan: &'a LayoutPlan,
    fonts: &'a FontLibrary,
    elements: Vec<PositionedElement>,
}

/// A column the section flow writes into.
struct Column {
    x: f32,
    width: f32,
    cursor: f32,
}

impl LayoutBuilder<'_> {
    fn build(mut self) -> RenderedLayout {
        let background = self.style.colors.background_color;
        // Page background placeholder; its height is patched once the
        // content height is known.
        self.elements.push(PositionedElement {
            x: 0.0,
            y: 0.0,
            width: A4_WIDTH_PT,
            height: 0.0,
            element: LayoutElement::Rect(RectElement { fill: background, corner_radius: 0.0 }),
            flags: ElementFlags::default(),
        });

        let header_bottom = self.header();
        let body_top = header_bottom + SECTION_GAP_PT;

        let content_x = PAGE_MARGIN_PT;
        let content_width = A4_WIDTH_PT - 2.0 * PAGE_MARGIN_PT;

        let (mut main, mut sidebar, sidebar_rect_index) = match self.plan.arrangement {
            Arrangement::SingleColumn => (
                Column { x: content_x, width: content_width, cursor: body_top },
                None,
                None,
            ),
            Arrangement::Sidebar { side, fraction } => {
                let side_width = content_width * fraction;
                let gap = 16.0;
                let (side_x, main_x) = match side {
                    Side::Left => (content_x, content_x + side_width + gap),
                    Side::Right => (content_x + content_width - side_width, content_x),
                };
                // Tinted sidebar backdrop, behind the sidebar sections;
                // height patched later.
                let index = self.elements.len();
                let tint = self.style.colors.secondary_color;
                self.elements.push(PositionedElement {
                    x: side_x - SIDEBAR_PAD_PT / 2.0,
                    y: body_top - SIDEBAR_PAD_PT / 2.0,
                    width: side_width + SIDEBAR_PAD_PT,
                    height: 0.0,
                    element: LayoutElement::Rect(RectElement { fill: tint, corner_radius: 3.0 }),
                    flags: ElementFlags::default(),
                });
                (
                    Column {
                        x: main_x,
                        width: content_width - side_width - gap,
                        cursor: body_top,
                    },
                    Some(Column { x: side_x, width: side_width, cursor: body_top }),
                    Some(index),
                )
            }
        };

        for section in &self.doc.sections {
            if section.items.is_empty() {
                // Degenerate content: omit locally, never an error and never
                // an empty heading.
                continue;
            }
            let column = match sidebar.as_mut() {
                Some(side) if self.plan.sidebar_kinds.contains(&section.items.kind()) => side,
                _ => &mut main,
            };
            self.section(section, column);
        }

        let sidebar_bottom = sidebar.as_ref().map(|c| c.cursor).unwrap_or(0.0);
        let content_bottom = main.cursor.max(sidebar_bottom).max(header_bottom);
        let height = content_bottom + PAGE_MARGIN_PT;

        if let Some(index) = sidebar_rect_index {
            self.elements[index].height = content_bottom - self.elements[index].y;
        }
        self.elements[0].height = height;

        RenderedLayout { elements: self.elements, width: A4_WIDTH_PT, height }
    }

    // --- header -----------------------------------------------------------

    fn header(&mut self) -> f32 {
        let colors = &self.style.colors;
        let fonts_cfg = &self.style.fonts;
        let base = fonts_cfg.font_size;

        let mut cursor = PAGE_MARGIN_PT;
        if self.plan.accent_band {
            self.push_rect(0.0, 0.0, A4_WIDTH_PT, ACCENT_BAND_PT, colors.accent_color);
            cursor += ACCENT_BAND_PT;
        }

        let photo = self.doc.personal_info.profile_image.clone();
        let photo_size = self.plan.photo_size;
        let show_photo_slot = photo.is_some() || self.plan.reserve_photo_slot;
        let text_width = if show_photo_slot {
            A4_WIDTH_PT - 2.0 * PAGE_MARGIN_PT - photo_size - 16.0
        } else {
            // No image: the header text takes the full width with zero
            // layout shift, no empty box reserved.
            A4_WIDTH_PT - 2.0 * PAGE_MARGIN_PT
        };

        if let Some(image) = &photo {
            if !image.url.trim().is_empty() {
                let frame = image.show_frame.then(|| Frame {
                    color: image.frame_color.unwrap_or(colors.primary_color),
                    width: if image.frame_width > 0.0 { image.frame_width } else { 2.0 },
                    style: image.frame_style,
                });
                self.elements.push(PositionedElement {
                    x: A4_WIDTH_PT - PAGE_MARGIN_PT - photo_size,
                    y: cursor,
                    width: photo_size,
                    height: photo_size,
                    element: LayoutElement::Image(ImageElement {
                        src: image.url.clone(),
                        circle: image.is_circle,
                        frame,
                        transparent: image.is_transparent,
                    }),
                    flags: ElementFlags::default(),
                });
            }
        }

        // Style-editor affordance shown over the header on screen; flagged
        // so the export normalization strips it.
        self.push_editor_handle(PAGE_MARGIN_PT + text_width - 12.0, cursor);

        let info = &self.doc.personal_info;
        if !info.name.trim().is_empty() {
            cursor = self.push_paragraph(
                info.name.trim(),
                PAGE_MARGIN_PT,
                cursor,
                text_width,
                &TextStyle {
                    font_family: fonts_cfg.heading_font.clone(),
                    font_size: base * 2.2,
                    bold: true,
                    italic: false,
                    color: colors.heading_color,
                    align: TextAlign::Left,
                },
                usize::MAX,
            );
        }
        if !info.title.trim().is_empty() {
            cursor = self.push_paragraph(
                info.title.trim(),
                PAGE_MARGIN_PT,
                cursor + 2.0,
                text_width,
                &TextStyle {
                    font_family: fonts_cfg.heading_font.clone(),
                    font_size: base * 1.3,
                    bold: false,
                    italic: false,
                    color: colors.sub_heading_color,
                    align: TextAlign::Left,
                },
                usize::MAX,
            );
        }

        cursor = self.contact_row(cursor + 4.0, text_width);

        if !info.summary.trim().is_empty() {
            cursor = self.push_paragraph(
                info.summary.trim(),
                PAGE_MARGIN_PT,
                cursor + 6.0,
                text_width,
                &TextStyle {
                    font_family: fonts_cfg.body_font.clone(),
                    font_size: base,
                    bold: false,
                    italic: false,
                    color: colors.text_color,
                    align: TextAlign::Left,
                },
                VISIBLE_BODY_LINES,
            );
        }

        let photo_bottom = if show_photo_slot {
            PAGE_MARGIN_PT
                + photo_size
                + if self.plan.accent_band { ACCENT_BAND_PT } else { 0.0 }
        } else {
            0.0
        };
        cursor.max(photo_bottom)
    }

    fn contact_row(&mut self, y: f32, max_width: f32) -> f32 {
        let colors = &self.style.colors;
        let fonts_cfg = &self.style.fonts;
        let size = fonts_cfg.font_size * 0.9;
        let line_height = size * LINE_HEIGHT_FACTOR;
        let fields = self.doc.personal_info.contact_fields();
        if fields.is_empty() {
            return y;
        }

        let mut x = PAGE_MARGIN_PT;
        let mut row_y = y;
        for (_, value) in fields {
            let text_width =
                self.fonts.measure(value, &fonts_cfg.body_font, size, false);
            let entry_width = CONTACT_DOT_PT + 4.0 + text_width + 14.0;
            if x > PAGE_MARGIN_PT && x + entry_width > PAGE_MARGIN_PT + max_width {
                x = PAGE_MARGIN_PT;
                row_y += line_height;
            }
            // Icon stand-in; relies on centering that raster engines
            // mis-measure, hence the `icon` flag for the baseline fix.
            self.elements.push(PositionedElement {
                x,
                y: row_y + (line_height - CONTACT_DOT_PT) / 2.0 - 1.0,
                width: CONTACT_DOT_PT,
                height: CONTACT_DOT_PT,
                element: LayoutElement::Dot(DotElement {
                    color: colors.accent_color,
                    filled: true,
                }),
                flags: ElementFlags { icon: true, ..ElementFlags::default() },
            });
            self.elements.push(PositionedElement {
                x: x + CONTACT_DOT_PT + 4.0,
                y: row_y,
                width: text_width,
                height: line_height,
                element: LayoutElement::Text(TextElement {
                    content: value.to_string(),
                    style: TextStyle {
                        font_family: fonts_cfg.body_font.clone(),
                        font_size: size,
                        bold: false,
                        italic: false,
                        color: colors.text_color,
                        align: TextAlign::Left,
                    },
                }),
                flags: ElementFlags::default(),
            });
            x += entry_width;
        }
        row_y + line_height
    }

    // --- sections ---------------------------------------------------------

    fn section(&mut self, section: &Section, column: &mut Column) {
        let colors = &self.style.colors;
        let fonts_cfg = &self.style.fonts;
        let base = fonts_cfg.font_size;

        column.cursor += SECTION_GAP_PT / 2.0;

        let title = if section.title.trim().is_empty() {
            section_label(section.items.kind())
        } else {
            section.title.trim().to_string()
        };

        self.push_editor_handle(column.x + column.width - 12.0, column.cursor);
        column.cursor = self.push_paragraph(
            &title,
            column.x,
            column.cursor,
            column.width,
            &TextStyle {
                font_family: fonts_cfg.heading_font.clone(),
                font_size: base * 1.25,
                bold: true,
                italic: false,
                color: colors.heading_color,
                align: TextAlign::Left,
            },
            usize::MAX,
        );
        if self.plan.heading_rule {
            self.elements.push(PositionedElement {
                x: column.x,
                y: column.cursor + 1.0,
                width: column.width,
                height: 1.0,
                element: LayoutElement::Line(LineElement {
                    color: colors.accent_color,
                    thickness: 1.0,
                }),
                flags: ElementFlags::default(),
            });
            column.cursor += 4.0;
        }
        column.cursor += 4.0;

        for view in item_views(&section.items) {
            if let Some(level) = view.level {
                self.skill_item(&view.primary, level, column);
                continue;
            }
            if !view.primary.is_empty() {
                column.cursor = self.push_paragraph(
                    &view.primary,
                    column.x,
                    column.cursor,
                    column.width,
                    &TextStyle {
                        font_family: fonts_cfg.body_font.clone(),
                        font_size: base * 1.05,
                        bold: true,
                        italic: false,
                        color: colors.sub_heading_color,
                        align: TextAlign::Left,
                    },
                    usize::MAX,
                );
            }
            if !view.secondary.is_empty() {
                column.cursor = self.push_paragraph(
                    &view.secondary,
                    column.x,
                    column.cursor,
                    column.width,
                    &TextStyle {
                        font_family: fonts_cfg.body_font.clone(),
                        font_size: base,
                        bold: false,
                        italic: false,
                        color: colors.text_color,
                        align: TextAlign::Left,
                    },
                    usize::MAX,
                );
            }
            if !view.meta.is_empty() {
                column.cursor = self.push_paragraph(
                    &view.meta,
                    column.x,
                    column.cursor,
                    column.width,
                    &TextStyle {
                        font_family: fonts_cfg.body_font.clone(),
                        font_size: base * 0.85,
                        bold: false,
                        italic: true,
                        color: colors.sub_heading_color,
                        align: TextAlign::Left,
                    },
                    usize::MAX,
                );
            }
            if !view.body.is_empty() {
                column.cursor = self.push_paragraph(
                    &view.body,
                    column.x,
                    column.cursor + 2.0,
                    column.width,
                    &TextStyle {
                        font_family: fonts_cfg.body_font.clone(),
                        font_size: base,
                        bold: false,
                        italic: false,
                        color: colors.text_color,
                        align: TextAlign::Left,
                    },
                    VISIBLE_BODY_LINES,
                );
            }
            for (label, value) in &view.fields {
                column.cursor = self.push_paragraph(
                    &format!("{}: {}", label, value),
                    column.x,
                    column.cursor,
                    column.width,
                    &TextStyle {
                        font_family: fonts_cfg.body_font.clone(),
                        font_size: base,
                        bold: false,
                        italic: false,
                        color: colors.text_color,
                        align: TextAlign::Left,
                    },
                    usize::MAX,
                );
            }
            column.cursor += ITEM_GAP_PT;
        }
        column.cursor += SECTION_GAP_PT / 2.0;
    }

    fn skill_item(&mut self, name: &str, level: u8, column: &mut Column) {
        let colors = &self.style.colors;
        let fonts_cfg = &self.style.fonts;
        let size = fonts_cfg.font_size;
        let line_height = size * LINE_HEIGHT_FACTOR;

        let name_width = self.fonts.measure(name, &fonts_cfg.body_font, size, false);
        self.elements.push(PositionedElement {
            x: column.x,
            y: column.cursor,
            width: name_width.min(column.width),
            height: line_height,
            element: LayoutElement::Text(TextElement {
                content: name.to_string(),
                style: TextStyle {
                    font_family: fonts_cfg.body_font.clone(),
                    font_size: size,
                    bold: false,
                    italic: false,
                    color: colors.text_color,
                    align: TextAlign::Left,
                },
            }),
            flags: ElementFlags::default(),
        });

        // Proficiency dots, right-aligned in the column: one filled dot per
        // 20 points of level, outlined remainder up to five.
        let filled = level.div_ceil(20).min(SKILL_DOT_COUNT);
        let dots_width = SKILL_DOT_COUNT as f32 * (SKILL_DOT_PT + 3.0);
        let mut dot_x = column.x + column.width - dots_width;
        let dot_y = column.cursor + (line_height - SKILL_DOT_PT) / 2.0;
        for i in 0..SKILL_DOT_COUNT {
            self.elements.push(PositionedElement {
                x: dot_x,
                y: dot_y,
                width: SKILL_DOT_PT,
                height: SKILL_DOT_PT,
                element: LayoutElement::Dot(DotElement {
                    color: if i < filled {
                        colors.accent_color
                    } else {
                        colors.secondary_color
                    },
                    filled: i < filled,
                }),
                flags: ElementFlags::default(),
            });
            dot_x += SKILL_DOT_PT + 3.0;
        }
        column.cursor += line_height + 3.0;
    }

    // --- primitives -------------------------------------------------------

    /// Wraps and emits a paragraph. Lines past `visible_lines` are flagged
    /// `clipped` (the on-screen overflow clamp); export normalization
    /// releases them. Returns the new cursor, counting every line so the
    /// capture height always reflects natural flow.
    fn push_paragraph(
        &mut self,
        content: &str,
        x: f32,
        y: f32,
        width: f32,
        style: &TextStyle,
        visible_lines: usize,
    ) -> f32 {
        let line_height = style.font_size * LINE_HEIGHT_FACTOR;
        let lines = wrap_text(
            self.fonts,
            content,
            &style.font_family,
            style.font_size,
            style.bold,
            width,
        );
        let mut cursor = y;
        for (index, line) in lines.iter().enumerate() {
            let line_x = match style.align {
                TextAlign::Left => x,
                TextAlign::Center => x + (width - line.width).max(0.0) / 2.0,
                TextAlign::Right => x + (width - line.width).max(0.0),
            };
            self.elements.push(PositionedElement {
                x: line_x,
                y: cursor,
                width: line.width.min(width),
                height: line_height,
                element: LayoutElement::Text(TextElement {
                    content: line.text.clone(),
                    style: style.clone(),
                }),
                flags: ElementFlags {
                    clipped: index >= visible_lines,
                    ..ElementFlags::default()
                },
            });
            cursor += line_height;
        }
        cursor
    }

    fn push_rect(&mut self, x: f32, y: f32, width: f32, height: f32, fill: Color) {
        self.elements.push(PositionedElement {
            x,
            y,
            width,
            height,
            element: LayoutElement::Rect(RectElement { fill, corner_radius: 0.0 }),
            flags: ElementFlags::default(),
        });
    }

    fn push_editor_handle(&mut self, x: f32, y: f32) {
        self.elements.push(PositionedElement {
            x,
            y,
            width: 12.0,
            height: 12.0,
            element: LayoutElement::Rect(RectElement {
                fill: self.style.colors.accent_color.with_alpha(0.35),
                corner_radius: 2.0,
            }),
            flags: ElementFlags { editor_only: true, ..ElementFlags::default() },
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitae_template::effective_style;
    use vitae_types::{PersonalInfo, SectionItems, SkillItem};

    fn sample_doc(template_id: &str) -> CvDocument {
        CvDocument {
            id: "doc".into(),
            title: "My CV".into(),
            personal_info: PersonalInfo {
                name: "Jane Doe".into(),
                title: "Engineer".into(),
                email: "jane@example.com".into(),
                summary: "Curious builder of systems.".into(),
                ..PersonalInfo::default()
            },
            sections: vec![Section {
                id: "sk".into(),
                title: "Skills".into(),
                items: SectionItems::Skills(vec![SkillItem { name: "Rust".into(), level: 80 }]),
            }],
            color_scheme: None,
            template_id: template_id.into(),
        }
    }

    #[test]
    fn renders_header_fields() {
        let doc = sample_doc("standard");
        let style = effective_style(&doc);
        let layout = render(&doc, &style, &FontLibrary::new());
        let text = layout.text_content();
        assert!(text.contains("Jane Doe"));
        assert!(text.contains("Engineer"));
        assert!(text.contains("jane@example.com"));
        assert!(text.contains("Rust"));
    }

    #[test]
    fn empty_sections_render_no_heading() {
        let mut doc = sample_doc("standard");
        doc.sections = vec![Section {
            id: "empty".into(),
            title: "Experience".into(),
            items: SectionItems::Experience(vec![]),
        }];
        let style = effective_style(&doc);
        let layout = render(&doc, &style, &FontLibrary::new());
        assert!(!layout.text_content().contains("Experience"));
    }

    #[test]
    fn unknown_template_renders_via_standard() {
        let doc = sample_doc("does-not-exist");
        let style = effective_style(&doc);
        let layout = render(&doc, &style, &FontLibrary::new());
        assert!(layout.text_content().contains("Jane Doe"));
        assert!(layout.height > 0.0);
    }

    #[test]
    fn missing_photo_reserves_no_space_on_standard() {
        let with_photo = {
            let mut doc = sample_doc("standard");
            doc.personal_info.profile_image = Some(vitae_types::ProfileImage {
                url: "profile.png".into(),
                ..vitae_types::ProfileImage::default()
            });
            let style = effective_style(&doc);
            render(&doc, &style, &FontLibrary::new())
        };
        let without_photo = {
            let doc = sample_doc("standard");
            let style = effective_style(&doc);
            render(&doc, &style, &FontLibrary::new())
        };
        // Standard collapses the photo slot entirely; header text may even
        // reflow wider, but no image element exists and no fixed slot is
        // kept.
        assert!(with_photo
            .elements
            .iter()
            .any(|e| matches!(e.element, LayoutElement::Image(_))));
        assert!(!without_photo
            .elements
            .iter()
            .any(|e| matches!(e.element, LayoutElement::Image(_))));
    }

    #[test]
    fn sidebar_variant_routes_skills_into_sidebar() {
        let doc = sample_doc("modern");
        let style = effective_style(&doc);
        let layout = render(&doc, &style, &FontLibrary::new());
        // Sidebar content sits left of the main column on the modern plan.
        let skill = layout
            .elements
            .iter()
            .find(|e| matches!(&e.element, LayoutElement::Text(t) if t.content == "Rust"))
            .expect("skill rendered");
        assert!(skill.x < A4_WIDTH_PT * 0.4, "expected sidebar placement, x={}", skill.x);
    }
}
