//! Font discovery and text measurement.
//!
//! With the `system-fonts` feature the library discovers faces through
//! fontdb and measures text by shaping it with rustybuzz. Without a usable
//! face (feature off, or no matching system font) measurement falls back to
//! a fixed per-character approximation so layout stays deterministic.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Approximate advance width per character, as a fraction of font size,
/// used when no face is available.
const APPROX_CHAR_WIDTH: f32 = 0.6;

/// A loaded font binary plus the face index inside it.
pub struct FaceEntry {
    pub data: Arc<Vec<u8>>,
    pub index: u32,
}

impl FaceEntry {
    /// Creates a lightweight shaping view over the font data. Cheap; avoids
    /// holding a self-referential parsed face.
    pub fn as_face(&self) -> Option<rustybuzz::Face<'_>> {
        rustybuzz::Face::from_slice(&self.data, self.index)
    }
}

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
struct FontKey {
    family: String,
    bold: bool,
}

/// Shared font lookup with a cache keyed by normalized family + weight.
pub struct FontLibrary {
    #[cfg(feature = "system-fonts")]
    db: fontdb::Database,
    cache: RwLock<HashMap<FontKey, Option<Arc<FaceEntry>>>>,
}

impl Default for FontLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl FontLibrary {
    pub fn new() -> Self {
        #[cfg(feature = "system-fonts")]
        {
            let mut db = fontdb::Database::new();
            db.load_system_fonts();
            log::debug!("font library initialized with {} system faces", db.len());
            Self { db, cache: RwLock::new(HashMap::new()) }
        }
        #[cfg(not(feature = "system-fonts"))]
        {
            Self { cache: RwLock::new(HashMap::new()) }
        }
    }

    /// Looks up a face for the family, falling back through the generic
    /// sans-serif chain. Returns `None` when nothing matches; callers must
    /// degrade rather than fail.
    pub fn face(&self, family: &str, bold: bool) -> Option<Arc<FaceEntry>> {
        let key = FontKey { family: family.to_lowercase(), bold };
        if let Some(cached) = self.cache.read().expect("font cache poisoned").get(&key) {
            return cached.clone();
        }
        let loaded = self.load_face(family, bold);
        self.cache
            .write()
            .expect("font cache poisoned")
            .insert(key, loaded.clone());
        loaded
    }

    #[cfg(feature = "system-fonts")]
    fn load_face(&self, family: &str, bold: bool) -> Option<Arc<FaceEntry>> {
        let query = fontdb::Query {
            families: &[
                fontdb::Family::Name(family),
                fontdb::Family::SansSerif,
                fontdb::Family::Serif,
            ],
            weight: if bold { fontdb::Weight::BOLD } else { fontdb::Weight::NORMAL },
            stretch: fontdb::Stretch::Normal,
            style: fontdb::Style::Normal,
        };
        let id = self.db.query(&query)?;
        let entry = self.db.with_face_data(id, |data, index| FaceEntry {
            data: Arc::new(data.to_vec()),
            index,
        })?;
        Some(Arc::new(entry))
    }

    #[cfg(not(feature = "system-fonts"))]
    fn load_face(&self, _family: &str, _bold: bool) -> Option<Arc<FaceEntry>> {
        None
    }

    /// Measures the advance width of a text run in points.
    pub fn measure(&self, text: &str, family: &str, size: f32, bold: bool) -> f32 {
        if text.is_empty() {
            return 0.0;
        }
        if let Some(entry) = self.face(family, bold) {
            if let Some(width) = shaped_width(&entry, text, size) {
                return width;
            }
        }
        text.chars().count() as f32 * size * APPROX_CHAR_WIDTH
    }
}

fn shaped_width(entry: &FaceEntry, text: &str, size: f32) -> Option<f32> {
    let face = entry.as_face()?;
    let units_per_em = face.units_per_em() as f32;
    if units_per_em <= 0.0 {
        return None;
    }
    let mut buffer = rustybuzz::UnicodeBuffer::new();
    buffer.push_str(text);
    let glyphs = rustybuzz::shape(&face, &[], buffer);
    let advance_units: i32 = glyphs.glyph_positions().iter().map(|p| p.x_advance).sum();
    Some(advance_units as f32 / units_per_em * size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_measures_zero() {
        let fonts = FontLibrary::new();
        assert_eq!(fonts.measure("", "Helvetica", 12.0, false), 0.0);
    }

    #[test]
    fn measurement_scales_with_font_size() {
        let fonts = FontLibrary::new();
        let small = fonts.measure("hello world", "Helvetica", 10.0, false);
        let large = fonts.measure("hello world", "Helvetica", 20.0, false);
        assert!(large > small * 1.9 && large < small * 2.1);
    }

    #[test]
    fn longer_text_is_wider() {
        let fonts = FontLibrary::new();
        let short = fonts.measure("abc", "Helvetica", 12.0, false);
        let long = fonts.measure("abcdefghij", "Helvetica", 12.0, false);
        assert!(long > short);
    }
}
