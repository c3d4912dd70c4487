//! End-to-end demo: build a CV document and export it through both
//! pipelines.
//!
//! Run with: cargo run --example cv

use std::env;
use std::sync::Arc;

use serde_json::json;
use vitae::{CvDocument, ExportError, ExportOptions, Exporter, InMemoryResourceProvider};

fn main() -> Result<(), ExportError> {
    if env::var("RUST_LOG").is_err() {
        unsafe {
            env::set_var("RUST_LOG", "vitae=info");
        }
    }
    env_logger::init();

    println!("Running CV export demo...");

    let data = json!({
        "id": "demo-1",
        "title": "Jane Doe - CV",
        "templateId": "modern",
        "personalInfo": {
            "name": "Jane Doe",
            "title": "Senior Systems Engineer",
            "email": "jane.doe@example.com",
            "phone": "+47 555 01 234",
            "location": "Oslo, Norway",
            "summary": "Systems engineer with a decade of experience in \
                        high-throughput document processing, storage engines \
                        and developer tooling."
        },
        "colorScheme": { "accentColor": "#d27d2c" },
        "sections": [
            {
                "id": "xp",
                "type": "experience",
                "title": "Experience",
                "items": [
                    {
                        "position": "Senior Engineer",
                        "company": "Fjord Analytics",
                        "location": "Oslo",
                        "startDate": "2019",
                        "endDate": "",
                        "description": "Leads the ingestion platform team. \
                            Rebuilt the document pipeline around a streaming \
                            architecture, cutting export latency by 80%."
                    },
                    {
                        "position": "Backend Developer",
                        "company": "Nordlys Software",
                        "location": "Bergen",
                        "startDate": "2014",
                        "endDate": "2019",
                        "description": "Built billing and reporting services."
                    }
                ]
            },
            {
                "id": "edu",
                "type": "education",
                "title": "Education",
                "items": [
                    {
                        "institution": "NTNU",
                        "degree": "M.Sc.",
                        "field": "Computer Science",
                        "startDate": "2009",
                        "endDate": "2014"
                    }
                ]
            },
            {
                "id": "sk",
                "type": "skills",
                "title": "Skills",
                "items": [
                    { "name": "Rust", "level": 90 },
                    { "name": "Distributed systems", "level": 80 },
                    { "name": "PostgreSQL", "level": 70 },
                    { "name": "Kubernetes", "level": 55 }
                ]
            }
        ]
    });
    let doc: CvDocument = serde_json::from_value(data).map_err(|e| {
        ExportError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })?;
    println!("✓ Document loaded ({} sections).", doc.sections.len());

    let exporter = Exporter::new(Arc::new(InMemoryResourceProvider::new()));
    let view = exporter.render(&doc);
    println!(
        "✓ Layout rendered: {} elements, {:.0}pt tall.",
        view.layout.elements.len(),
        view.layout.height
    );

    let raster = exporter.export_raster(&view, &ExportOptions::default())?;
    std::fs::write(&raster.filename, &raster.bytes)?;
    println!("✓ Raster export: {} ({} bytes)", raster.filename, raster.bytes.len());

    let options = ExportOptions { watermark: true };
    let demo = exporter.export_raster(&view, &options)?;
    std::fs::write(&demo.filename, &demo.bytes)?;
    println!("✓ Watermarked export: {}", demo.filename);

    let structured = exporter.export_structured(&doc, &ExportOptions::default())?;
    let structured_name = format!("structured_{}", structured.filename);
    std::fs::write(&structured_name, &structured.bytes)?;
    println!("✓ Structured export: {}", structured_name);

    println!("\nSuccess!");
    Ok(())
}
