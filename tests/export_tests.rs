mod common;

use common::{empty_doc, header_only_doc, long_doc, sample_doc, test_exporter, GeneratedPdf, TestResult};
use vitae::{ExportError, ExportOptions};

#[test]
fn raster_export_produces_single_page_pdf() -> TestResult {
    let exporter = test_exporter();
    let view = exporter.render(&sample_doc("standard"));
    let pdf = exporter.export_raster(&view, &ExportOptions::default())?;
    let parsed = GeneratedPdf::from_bytes(pdf.bytes)?;
    assert_eq!(parsed.page_count(), 1);
    assert_eq!(pdf.filename, "Jane_Doe_CV.pdf");
    Ok(())
}

#[test]
fn long_documents_paginate() -> TestResult {
    let exporter = test_exporter();
    let view = exporter.render(&long_doc());
    let pdf = exporter.export_raster(&view, &ExportOptions::default())?;
    let parsed = GeneratedPdf::from_bytes(pdf.bytes)?;
    assert!(parsed.page_count() > 1, "got {} pages", parsed.page_count());
    Ok(())
}

#[test]
fn watermark_never_changes_page_count() -> TestResult {
    let exporter = test_exporter();
    for doc in [sample_doc("modern"), long_doc()] {
        let view = exporter.render(&doc);
        let clean = exporter.export_raster(&view, &ExportOptions::default())?;
        let marked = exporter.export_raster(&view, &ExportOptions { watermark: true })?;
        let clean = GeneratedPdf::from_bytes(clean.bytes)?;
        let marked_parsed = GeneratedPdf::from_bytes(marked.bytes.clone())?;
        assert_eq!(clean.page_count(), marked_parsed.page_count());
        // The watermark must actually change the page bitmaps.
        assert_ne!(clean.bytes, marked.bytes);
    }
    Ok(())
}

#[test]
fn watermarked_export_uses_demo_filename() -> TestResult {
    let exporter = test_exporter();
    let view = exporter.render(&sample_doc("standard"));
    let pdf = exporter.export_raster(&view, &ExportOptions { watermark: true })?;
    assert_eq!(pdf.filename, "Jane_Doe_CV.demo.pdf");
    Ok(())
}

#[test]
fn header_only_document_exports_one_page() -> TestResult {
    // Name, title and contact fields alone still produce a 1-page PDF.
    let exporter = test_exporter();
    let view = exporter.render(&header_only_doc());
    let pdf = exporter.export_raster(&view, &ExportOptions::default())?;
    assert_eq!(GeneratedPdf::from_bytes(pdf.bytes)?.page_count(), 1);
    Ok(())
}

#[test]
fn empty_document_is_rejected() {
    let exporter = test_exporter();
    let view = exporter.render(&empty_doc());
    assert!(matches!(
        exporter.export_raster(&view, &ExportOptions::default()),
        Err(ExportError::NothingToExport)
    ));
}

#[test]
fn unknown_template_exports_via_fallback() -> TestResult {
    let exporter = test_exporter();
    let view = exporter.render(&sample_doc("no-such-template"));
    let pdf = exporter.export_raster(&view, &ExportOptions::default())?;
    assert!(GeneratedPdf::from_bytes(pdf.bytes)?.page_count() >= 1);
    Ok(())
}

#[test]
fn sequential_exports_reuse_the_exporter() -> TestResult {
    // The capture guard must release between runs.
    let exporter = test_exporter();
    let view = exporter.render(&sample_doc("standard"));
    exporter.export_raster(&view, &ExportOptions::default())?;
    exporter.export_raster(&view, &ExportOptions::default())?;
    Ok(())
}

#[test]
fn every_template_exports() -> TestResult {
    let exporter = test_exporter();
    for template in vitae::list_templates(vitae::TemplateFilter::default()) {
        let view = exporter.render(&sample_doc(template.id));
        let pdf = exporter.export_raster(&view, &ExportOptions::default())?;
        assert!(
            GeneratedPdf::from_bytes(pdf.bytes)?.page_count() >= 1,
            "template '{}' failed",
            template.id
        );
    }
    Ok(())
}

#[test]
fn thumbnail_renders_for_any_document() -> TestResult {
    let exporter = test_exporter();
    let thumb = exporter.thumbnail(&sample_doc("creative"), 200, 2.0)?;
    assert_eq!(thumb.width(), 400);
    let placeholder = exporter.thumbnail(&empty_doc(), 200, 1.0)?;
    assert_eq!(placeholder.width(), 200);
    Ok(())
}
