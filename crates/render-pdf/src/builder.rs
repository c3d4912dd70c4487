//! Builds the structured PDF from the document model.
//!
//! Content follows the same shared section/item mapping as the visual
//! layout, flowed into a single column in document order so the reading
//! order of extracted text matches the document. Page breaks happen at
//! line granularity and headings keep their first following line.

use std::collections::HashMap;

use lopdf::content::Content;
use lopdf::{dictionary, Dictionary, Document, Object, Stream, StringFormat};
use vitae_layout::fonts::FontLibrary;
use vitae_layout::text::wrap_text;
use vitae_layout::{A4_HEIGHT_PT, A4_WIDTH_PT, PAGE_MARGIN_PT};
use vitae_style::EffectiveStyle;
use vitae_template::{effective_style, get, item_views, plan_for, section_label};
use vitae_types::{Color, CvDocument, SharedData};

use crate::error::PdfError;
use crate::writer::{internal_font, to_win_ansi, PageWriter, BASE14_FONTS};

/// Pre-fetched image bytes keyed by the element's `src`.
pub type ImageSources = HashMap<String, SharedData>;

const LINE_HEIGHT_FACTOR: f32 = 1.35;
const CONTENT_BOTTOM: f32 = A4_HEIGHT_PT - PAGE_MARGIN_PT;
const SECTION_GAP_PT: f32 = 14.0;
const ITEM_GAP_PT: f32 = 8.0;
const ACCENT_BAND_PT: f32 = 6.0;
const SKILL_DOT_PT: f32 = 6.0;
const SKILL_DOT_COUNT: u8 = 5;
const PHOTO_RESOURCE: &str = "Im1";

/// A decoded profile photo ready for XObject registration.
struct Photo {
    width: u32,
    height: u32,
    rgb: Vec<u8>,
    circle: bool,
    size_pt: f32,
}

/// Exports `doc` as a structured vector PDF and returns its bytes.
pub fn export_structured(
    doc: &CvDocument,
    fonts: &FontLibrary,
    images: &ImageSources,
) -> Result<Vec<u8>, PdfError> {
    let style = effective_style(doc);
    let plan = plan_for(get(&doc.template_id).layout);

    let photo = decode_photo(doc, plan.photo_size, images)?;
    let mut flow = Flow::new(fonts, &style);
    emit_content(&mut flow, doc, plan.accent_band, plan.heading_rule, &photo);
    let pages = flow.finish();

    log::debug!("structured export: {} page(s)", pages.len());
    assemble(pages, &doc.title, photo)
}

fn decode_photo(
    doc: &CvDocument,
    size_pt: f32,
    images: &ImageSources,
) -> Result<Option<Photo>, PdfError> {
    let Some(image) = &doc.personal_info.profile_image else {
        return Ok(None);
    };
    if image.url.trim().is_empty() {
        return Ok(None);
    }
    let Some(bytes) = images.get(&image.url) else {
        log::warn!("no image data for '{}', omitting photo", image.url);
        return Ok(None);
    };
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| PdfError::ImageDecode { src: image.url.clone(), source: e })?
        .to_rgb8();
    let (width, height) = decoded.dimensions();
    Ok(Some(Photo {
        width,
        height,
        rgb: decoded.into_raw(),
        circle: image.is_circle,
        size_pt,
    }))
}

/// Line-granularity page flow over a stack of page writers.
struct Flow<'a> {
    fonts: &'a FontLibrary,
    style: &'a EffectiveStyle,
    current: PageWriter,
    done: Vec<PageWriter>,
    cursor: f32,
}

impl<'a> Flow<'a> {
    fn new(fonts: &'a FontLibrary, style: &'a EffectiveStyle) -> Self {
        Self {
            fonts,
            style,
            current: PageWriter::new(A4_HEIGHT_PT),
            done: Vec::new(),
            cursor: PAGE_MARGIN_PT,
        }
    }

    fn finish(mut self) -> Vec<PageWriter> {
        // Never emit a blank trailing page, but always keep at least one.
        if !self.current.is_empty() || self.done.is_empty() {
            self.done.push(self.current);
        }
        self.done
    }

    fn break_page(&mut self) {
        let finished = std::mem::replace(&mut self.current, PageWriter::new(A4_HEIGHT_PT));
        self.done.push(finished);
        self.cursor = PAGE_MARGIN_PT;
    }

    /// Breaks the page if `needed` points do not fit. Never breaks at the
    /// very top: oversized blocks render on the fresh page they start on.
    fn ensure_room(&mut self, needed: f32) {
        if self.cursor + needed > CONTENT_BOTTOM && self.cursor > PAGE_MARGIN_PT {
            self.break_page();
        }
    }

    /// Wraps and writes a paragraph. `keep_with` reserves extra room below
    /// the first line so a heading never strands at a page bottom.
    #[allow(clippy::too_many_arguments)]
    fn paragraph(
        &mut self,
        text: &str,
        family: &str,
        size: f32,
        bold: bool,
        italic: bool,
        color: Color,
        x: f32,
        width: f32,
        keep_with: f32,
    ) {
        let line_height = size * LINE_HEIGHT_FACTOR;
        let font = internal_font(family, bold, italic);
        let lines = wrap_text(self.fonts, text, family, size, bold, width);
        for (index, line) in lines.iter().enumerate() {
            let needed = line_height + if index == 0 { keep_with } else { 0.0 };
            self.ensure_room(needed);
            self.current.text(&line.text, font, size, color, x, self.cursor);
            self.cursor += line_height;
        }
    }
}

fn emit_content(
    flow: &mut Flow<'_>,
    doc: &CvDocument,
    accent_band: bool,
    heading_rule: bool,
    photo: &Option<Photo>,
) {
    let colors = flow.style.colors.clone();
    let fonts_cfg = flow.style.fonts.clone();
    let base = fonts_cfg.font_size;
    let x = PAGE_MARGIN_PT;
    let full_width = A4_WIDTH_PT - 2.0 * PAGE_MARGIN_PT;

    if accent_band {
        flow.current.rect(0.0, 0.0, A4_WIDTH_PT, ACCENT_BAND_PT, colors.accent_color);
        flow.cursor += ACCENT_BAND_PT;
    }

    let header_width = match photo {
        Some(p) => {
            flow.current.image(
                PHOTO_RESOURCE,
                A4_WIDTH_PT - PAGE_MARGIN_PT - p.size_pt,
                flow.cursor,
                p.size_pt,
                p.size_pt,
                p.circle,
            );
            full_width - p.size_pt - 16.0
        }
        None => full_width,
    };

    let info = &doc.personal_info;
    if !info.name.trim().is_empty() {
        flow.paragraph(
            info.name.trim(),
            &fonts_cfg.heading_font,
            base * 2.2,
            true,
            false,
            colors.heading_color,
            x,
            header_width,
            0.0,
        );
    }
    if !info.title.trim().is_empty() {
        flow.cursor += 2.0;
        flow.paragraph(
            info.title.trim(),
            &fonts_cfg.heading_font,
            base * 1.3,
            false,
            false,
            colors.sub_heading_color,
            x,
            header_width,
            0.0,
        );
    }
    let contact = info
        .contact_fields()
        .into_iter()
        .map(|(_, v)| v.to_string())
        .collect::<Vec<_>>()
        .join("  \u{b7}  ");
    if !contact.is_empty() {
        flow.cursor += 4.0;
        flow.paragraph(
            &contact,
            &fonts_cfg.body_font,
            base * 0.9,
            false,
            false,
            colors.text_color,
            x,
            header_width,
            0.0,
        );
    }
    if !info.summary.trim().is_empty() {
        flow.cursor += 6.0;
        flow.paragraph(
            info.summary.trim(),
            &fonts_cfg.body_font,
            base,
            false,
            false,
            colors.text_color,
            x,
            header_width,
            0.0,
        );
    }
    if let Some(p) = photo {
        let photo_bottom =
            PAGE_MARGIN_PT + p.size_pt + if accent_band { ACCENT_BAND_PT } else { 0.0 };
        flow.cursor = flow.cursor.max(photo_bottom);
    }

    for section in &doc.sections {
        if section.items.is_empty() {
            continue;
        }
        flow.cursor += SECTION_GAP_PT;

        let title = if section.title.trim().is_empty() {
            section_label(section.items.kind())
        } else {
            section.title.trim().to_string()
        };
        // Heading keeps the rule plus about one body line with it.
        let keep_with = base * LINE_HEIGHT_FACTOR + 8.0;
        flow.paragraph(
            &title,
            &fonts_cfg.heading_font,
            base * 1.25,
            true,
            false,
            colors.heading_color,
            x,
            full_width,
            keep_with,
        );
        if heading_rule {
            flow.current.hline(x, flow.cursor + 1.0, full_width, 1.0, colors.accent_color);
            flow.cursor += 4.0;
        }
        flow.cursor += 4.0;

        for view in item_views(&section.items) {
            if let Some(level) = view.level {
                let line_height = base * LINE_HEIGHT_FACTOR;
                flow.ensure_room(line_height);
                flow.current.text(
                    &view.primary,
                    internal_font(&fonts_cfg.body_font, false, false),
                    base,
                    colors.text_color,
                    x,
                    flow.cursor,
                );
                let filled = level.div_ceil(20).min(SKILL_DOT_COUNT);
                let mut dot_x =
                    x + full_width - SKILL_DOT_COUNT as f32 * (SKILL_DOT_PT + 3.0);
                let dot_cy = flow.cursor + line_height / 2.0;
                for i in 0..SKILL_DOT_COUNT {
                    let color = if i < filled { colors.accent_color } else { colors.secondary_color };
                    flow.current.circle(
                        dot_x + SKILL_DOT_PT / 2.0,
                        dot_cy,
                        SKILL_DOT_PT / 2.0,
                        color,
                        i < filled,
                    );
                    dot_x += SKILL_DOT_PT + 3.0;
                }
                flow.cursor += line_height + 3.0;
                continue;
            }

            if !view.primary.is_empty() {
                flow.paragraph(
                    &view.primary,
                    &fonts_cfg.body_font,
                    base * 1.05,
                    true,
                    false,
                    colors.sub_heading_color,
                    x,
                    full_width,
                    0.0,
                );
            }
            if !view.secondary.is_empty() {
                flow.paragraph(
                    &view.secondary,
                    &fonts_cfg.body_font,
                    base,
                    false,
                    false,
                    colors.text_color,
                    x,
                    full_width,
                    0.0,
                );
            }
            if !view.meta.is_empty() {
                flow.paragraph(
                    &view.meta,
                    &fonts_cfg.body_font,
                    base * 0.85,
                    false,
                    true,
                    colors.sub_heading_color,
                    x,
                    full_width,
                    0.0,
                );
            }
            if !view.body.is_empty() {
                flow.cursor += 2.0;
                flow.paragraph(
                    &view.body,
                    &fonts_cfg.body_font,
                    base,
                    false,
                    false,
                    colors.text_color,
                    x,
                    full_width,
                    0.0,
                );
            }
            for (label, value) in &view.fields {
                flow.paragraph(
                    &format!("{}: {}", label, value),
                    &fonts_cfg.body_font,
                    base,
                    false,
                    false,
                    colors.text_color,
                    x,
                    full_width,
                    0.0,
                );
            }
            flow.cursor += ITEM_GAP_PT;
        }
    }
}

fn assemble(pages: Vec<PageWriter>, title: &str, photo: Option<Photo>) -> Result<Vec<u8>, PdfError> {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let mut font_dict = Dictionary::new();
    for (name, base) in BASE14_FONTS {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => *base,
            "Encoding" => "WinAnsiEncoding",
        });
        font_dict.set(name.as_bytes(), Object::Reference(font_id));
    }
    let mut resources = dictionary! { "Font" => font_dict };

    if let Some(photo) = photo {
        let stream = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => photo.width as i64,
                "Height" => photo.height as i64,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
            },
            photo.rgb,
        );
        let image_id = doc.add_object(stream);
        let mut xobjects = Dictionary::new();
        xobjects.set(PHOTO_RESOURCE.as_bytes(), Object::Reference(image_id));
        resources.set("XObject", Object::Dictionary(xobjects));
    }
    let resources_id = doc.add_object(resources);

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for page in pages {
        let content: Content = page.finish();
        let encoded = content
            .encode()
            .map_err(|e| PdfError::Encode(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), A4_WIDTH_PT.into(), A4_HEIGHT_PT.into()],
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        dictionary! { "Type" => "Pages", "Kids" => kids, "Count" => count }.into(),
    );
    let catalog_id = doc.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
    doc.trailer.set("Root", catalog_id);
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::String(to_win_ansi(title), StringFormat::Literal),
    });
    doc.trailer.set("Info", info_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)?;
    Ok(buffer)
}
