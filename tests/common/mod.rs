use std::sync::Arc;

use lopdf::Document as LopdfDocument;
use serde_json::json;
use vitae::{CvDocument, Exporter, InMemoryResourceProvider};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Wrapper around exported PDF bytes with parse-based assertions.
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Raw content stream text of one page (1-based), lossily decoded.
    pub fn page_text(&self, page: u32) -> String {
        let pages = self.doc.get_pages();
        let Some(id) = pages.get(&page) else {
            return String::new();
        };
        self.doc
            .get_page_content(*id)
            .map(|c| String::from_utf8_lossy(&c).into_owned())
            .unwrap_or_default()
    }
}

pub fn test_exporter() -> Exporter {
    let _ = env_logger::builder().is_test(true).try_init();
    Exporter::new(Arc::new(InMemoryResourceProvider::new()))
}

/// A small but fully populated document.
pub fn sample_doc(template_id: &str) -> CvDocument {
    serde_json::from_value(json!({
        "id": "test-doc",
        "title": "Test CV",
        "templateId": template_id,
        "personalInfo": {
            "name": "Jane Doe",
            "title": "Engineer",
            "email": "jane@example.com",
            "location": "Oslo",
            "summary": "Engineer who builds document pipelines."
        },
        "sections": [
            {
                "id": "xp",
                "type": "experience",
                "title": "Experience",
                "items": [{
                    "position": "Senior Engineer",
                    "company": "Acme",
                    "startDate": "2019",
                    "endDate": "",
                    "description": "Owns the export pipeline."
                }]
            },
            {
                "id": "sk",
                "type": "skills",
                "title": "Skills",
                "items": [
                    { "name": "Rust", "level": 90 },
                    { "name": "SQL", "level": 60 }
                ]
            }
        ]
    }))
    .expect("sample document is valid")
}

/// A document long enough to paginate in both pipelines.
pub fn long_doc() -> CvDocument {
    let items: Vec<_> = (0..40)
        .map(|i| {
            json!({
                "position": format!("Role {}", i),
                "company": "Acme",
                "startDate": "2019",
                "endDate": "2020",
                "description": "Shipped several projects across teams with a \
                                long description that wraps over lines."
            })
        })
        .collect();
    serde_json::from_value(json!({
        "id": "long-doc",
        "title": "Long CV",
        "templateId": "standard",
        "personalInfo": { "name": "Jane Doe", "summary": "Engineer." },
        "sections": [{
            "id": "xp",
            "type": "experience",
            "title": "Experience",
            "items": items
        }]
    }))
    .expect("long document is valid")
}

/// Header fields only: no summary, no section items.
pub fn header_only_doc() -> CvDocument {
    serde_json::from_value(json!({
        "id": "header-doc",
        "title": "Header CV",
        "templateId": "standard",
        "personalInfo": {
            "name": "Jane Doe",
            "title": "Engineer",
            "email": "jane@example.com",
            "summary": ""
        },
        "sections": []
    }))
    .expect("header document is valid")
}

pub fn empty_doc() -> CvDocument {
    serde_json::from_value(json!({
        "id": "empty-doc",
        "title": "Empty CV",
        "templateId": "standard",
        "personalInfo": { "name": "" },
        "sections": []
    }))
    .expect("empty document is valid")
}
