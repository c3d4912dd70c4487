//! The structured CV document model.
//!
//! Documents are owned and mutated by the editor; every consumer in this
//! workspace takes them by shared reference. Section order and item order are
//! significant and must be preserved verbatim by all renderers.

use crate::color::Color;
use serde::ser::{SerializeMap, SerializeStruct};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// One résumé as edited by the user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CvDocument {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub sections: Vec<Section>,
    /// Per-document color overrides; any subset of the seven slots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_scheme: Option<PartialColorScheme>,
    pub template_id: String,
}

impl CvDocument {
    /// True when the document carries body content beyond the bare header.
    /// Thumbnails use this to decide on the placeholder.
    pub fn has_content(&self) -> bool {
        !self.personal_info.summary.trim().is_empty()
            || self.sections.iter().any(|s| !s.items.is_empty())
    }

    /// True when anything at all would land on an exported page: any
    /// personal-info field or any section item. A header-only document
    /// still exports one page.
    pub fn has_renderable_content(&self) -> bool {
        let info = &self.personal_info;
        !info.name.trim().is_empty()
            || !info.title.trim().is_empty()
            || !info.contact_fields().is_empty()
            || self.has_content()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub website: String,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<ProfileImage>,
}

impl PersonalInfo {
    /// Contact fields in display order, empty ones skipped.
    pub fn contact_fields(&self) -> Vec<(&'static str, &str)> {
        [
            ("email", self.email.as_str()),
            ("phone", self.phone.as_str()),
            ("location", self.location.as_str()),
            ("website", self.website.as_str()),
        ]
        .into_iter()
        .filter(|(_, v)| !v.trim().is_empty())
        .collect()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileImage {
    pub url: String,
    pub is_circle: bool,
    pub show_frame: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame_color: Option<Color>,
    pub frame_width: f32,
    pub frame_style: FrameStyle,
    pub is_transparent: bool,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum FrameStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

/// The document-side color override. Every slot is optional; empty strings
/// from the editor deserialize to `None` so the resolver never sees a
/// present-but-empty slot.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PartialColorScheme {
    #[serde(deserialize_with = "opt_color", skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<Color>,
    #[serde(deserialize_with = "opt_color", skip_serializing_if = "Option::is_none")]
    pub secondary_color: Option<Color>,
    #[serde(deserialize_with = "opt_color", skip_serializing_if = "Option::is_none")]
    pub heading_color: Option<Color>,
    #[serde(deserialize_with = "opt_color", skip_serializing_if = "Option::is_none")]
    pub sub_heading_color: Option<Color>,
    #[serde(deserialize_with = "opt_color", skip_serializing_if = "Option::is_none")]
    pub text_color: Option<Color>,
    #[serde(deserialize_with = "opt_color", skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Color>,
    #[serde(deserialize_with = "opt_color", skip_serializing_if = "Option::is_none")]
    pub accent_color: Option<Color>,
}

fn opt_color<'de, D>(deserializer: D) -> Result<Option<Color>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => Color::from_css(s).map(Some).map_err(de::Error::custom),
    }
}

/// One ordered section of the CV.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub id: String,
    pub title: String,
    pub items: SectionItems,
}

/// Section content, tagged by the section's `type` on the wire.
///
/// Known kinds carry their typed item lists; everything else (custom
/// sections, shapes from newer editor versions) lands in `Generic` as a
/// label/value dump so no CV content silently disappears.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionItems {
    Education(Vec<EducationItem>),
    Experience(Vec<ExperienceItem>),
    Projects(Vec<ProjectItem>),
    Skills(Vec<SkillItem>),
    Generic { kind: String, items: Vec<GenericItem> },
}

impl SectionItems {
    pub fn kind(&self) -> &str {
        match self {
            SectionItems::Education(_) => "education",
            SectionItems::Experience(_) => "experience",
            SectionItems::Projects(_) => "projects",
            SectionItems::Skills(_) => "skills",
            SectionItems::Generic { kind, .. } => kind,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            SectionItems::Education(v) => v.len(),
            SectionItems::Experience(v) => v.len(),
            SectionItems::Projects(v) => v.len(),
            SectionItems::Skills(v) => v.len(),
            SectionItems::Generic { items, .. } => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationItem {
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceItem {
    pub company: String,
    pub position: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectItem {
    pub name: String,
    pub role: String,
    pub url: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SkillItem {
    pub name: String,
    /// Proficiency on a 0-100 scale; renderers clamp out-of-range input.
    pub level: u8,
}

/// Best-effort representation of an item whose shape we do not know.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenericItem {
    /// Ordered (label, value) pairs, stringified from the raw object.
    pub fields: Vec<(String, String)>,
}

impl GenericItem {
    /// Flattens a raw JSON object into displayable pairs. Internal `id`
    /// fields and null values are skipped; scalars keep their natural
    /// formatting; nested structures are dumped as compact JSON.
    pub fn from_value(value: &serde_json::Value) -> Self {
        let mut fields = Vec::new();
        if let serde_json::Value::Object(map) = value {
            for (key, val) in map {
                if key == "id" {
                    continue;
                }
                let rendered = match val {
                    serde_json::Value::Null => continue,
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                if rendered.trim().is_empty() {
                    continue;
                }
                fields.push((key.clone(), rendered));
            }
        }
        GenericItem { fields }
    }
}

impl Serialize for GenericItem {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (label, value) in &self.fields {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSection {
    #[serde(default)]
    id: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    items: Vec<serde_json::Value>,
}

fn typed_items<T: serde::de::DeserializeOwned>(raw: &[serde_json::Value]) -> Option<Vec<T>> {
    raw.iter()
        .map(|v| serde_json::from_value(v.clone()).ok())
        .collect()
}

fn generic_items(kind: &str, raw: &[serde_json::Value]) -> SectionItems {
    SectionItems::Generic {
        kind: kind.to_string(),
        items: raw.iter().map(GenericItem::from_value).collect(),
    }
}

impl<'de> Deserialize<'de> for Section {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawSection::deserialize(deserializer)?;
        // A known kind whose items fail to parse degrades to the generic
        // dump rather than rejecting the document.
        let items = match raw.kind.as_str() {
            "education" => typed_items(&raw.items)
                .map(SectionItems::Education)
                .unwrap_or_else(|| generic_items(&raw.kind, &raw.items)),
            "experience" => typed_items(&raw.items)
                .map(SectionItems::Experience)
                .unwrap_or_else(|| generic_items(&raw.kind, &raw.items)),
            "projects" => typed_items(&raw.items)
                .map(SectionItems::Projects)
                .unwrap_or_else(|| generic_items(&raw.kind, &raw.items)),
            "skills" => typed_items(&raw.items)
                .map(SectionItems::Skills)
                .unwrap_or_else(|| generic_items(&raw.kind, &raw.items)),
            other => generic_items(other, &raw.items),
        };
        Ok(Section { id: raw.id, title: raw.title, items })
    }
}

impl Serialize for Section {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut st = serializer.serialize_struct("Section", 4)?;
        st.serialize_field("id", &self.id)?;
        st.serialize_field("type", self.items.kind())?;
        st.serialize_field("title", &self.title)?;
        match &self.items {
            SectionItems::Education(v) => st.serialize_field("items", v)?,
            SectionItems::Experience(v) => st.serialize_field("items", v)?,
            SectionItems::Projects(v) => st.serialize_field("items", v)?,
            SectionItems::Skills(v) => st.serialize_field("items", v)?,
            SectionItems::Generic { items, .. } => st.serialize_field("items", items)?,
        }
        st.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_known_section_kinds() {
        let section: Section = serde_json::from_value(json!({
            "id": "s1",
            "type": "experience",
            "title": "Work",
            "items": [{
                "company": "Acme",
                "position": "Engineer",
                "startDate": "2020",
                "endDate": "2023",
            }]
        }))
        .unwrap();
        match &section.items {
            SectionItems::Experience(items) => {
                assert_eq!(items.len(), 1);
                assert_eq!(items[0].company, "Acme");
                assert_eq!(items[0].position, "Engineer");
            }
            other => panic!("expected experience items, got {:?}", other),
        }
    }

    #[test]
    fn unknown_section_kind_becomes_generic_dump() {
        let section: Section = serde_json::from_value(json!({
            "id": "s2",
            "type": "publications",
            "title": "Publications",
            "items": [{"id": "x", "journal": "Nature", "year": 2021, "draft": null}]
        }))
        .unwrap();
        match &section.items {
            SectionItems::Generic { kind, items } => {
                assert_eq!(kind, "publications");
                assert_eq!(items.len(), 1);
                // `id` and null fields are dropped, scalars stringified.
                assert!(items[0].fields.contains(&("journal".into(), "Nature".into())));
                assert!(items[0].fields.contains(&("year".into(), "2021".into())));
                assert!(!items[0].fields.iter().any(|(l, _)| l == "id" || l == "draft"));
            }
            other => panic!("expected generic items, got {:?}", other),
        }
    }

    #[test]
    fn malformed_known_items_degrade_to_generic() {
        let section: Section = serde_json::from_value(json!({
            "id": "s3",
            "type": "skills",
            "title": "Skills",
            "items": [{"name": "Rust", "level": "expert"}]
        }))
        .unwrap();
        assert!(matches!(section.items, SectionItems::Generic { .. }));
    }

    #[test]
    fn header_only_document_is_renderable_but_has_no_body() {
        let doc: CvDocument = serde_json::from_value(json!({
            "id": "d",
            "personalInfo": {"name": "Jane Doe", "title": "Engineer",
                             "email": "jane@example.com", "summary": ""},
            "sections": [],
            "templateId": "standard"
        }))
        .unwrap();
        assert!(doc.has_renderable_content());
        assert!(!doc.has_content());
    }

    #[test]
    fn blank_document_is_not_renderable() {
        let doc: CvDocument = serde_json::from_value(json!({
            "id": "d",
            "personalInfo": {},
            "sections": [],
            "templateId": "standard"
        }))
        .unwrap();
        assert!(!doc.has_renderable_content());
    }

    #[test]
    fn empty_color_override_is_absent() {
        let doc: CvDocument = serde_json::from_value(json!({
            "id": "d1",
            "personalInfo": {"name": "Ada Lovelace"},
            "templateId": "standard",
            "colorScheme": {"accentColor": "#e74c3c", "primaryColor": ""}
        }))
        .unwrap();
        let scheme = doc.color_scheme.unwrap();
        assert_eq!(scheme.accent_color, Some(Color::rgb(0xe7, 0x4c, 0x3c)));
        assert_eq!(scheme.primary_color, None);
    }

    #[test]
    fn section_order_survives_round_trip() {
        let doc: CvDocument = serde_json::from_value(json!({
            "id": "d2",
            "personalInfo": {"name": "A"},
            "templateId": "modern",
            "sections": [
                {"id": "a", "type": "skills", "title": "Skills", "items": []},
                {"id": "b", "type": "education", "title": "Education", "items": []},
            ]
        }))
        .unwrap();
        let back: CvDocument =
            serde_json::from_str(&serde_json::to_string(&doc).unwrap()).unwrap();
        let kinds: Vec<&str> = back.sections.iter().map(|s| s.items.kind()).collect();
        assert_eq!(kinds, vec!["skills", "education"]);
    }
}
