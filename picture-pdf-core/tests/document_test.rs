use picture_pdf_core::{DocumentInfo, PdfDocument, Picture, PictureRecorder, Timestamp};

fn test_info() -> DocumentInfo {
    DocumentInfo::new(
        "Engine Test",
        "picture-pdf tests",
        Timestamp {
            year: 2025,
            month: 3,
            day: 1,
            day_of_week: 6,
            hour: 12,
            minute: 0,
            second: 0,
            utc_offset_minutes: 120,
        },
    )
}

fn text_heavy_picture() -> Picture {
    let mut rec = PictureRecorder::new();
    for line in 0..40 {
        rec.draw_text(
            "repetitive content that compresses well",
            72.0,
            720.0 - f64::from(line) * 16.0,
            12.0,
        );
    }
    rec.finish()
}

#[test]
fn empty_document_has_header_and_trailer() {
    let mut doc = PdfDocument::new(Vec::new(), test_info()).unwrap();
    doc.begin_page(612.0, 792.0);
    doc.end_page().unwrap();
    let bytes = doc.close().unwrap();
    let out = String::from_utf8_lossy(&bytes);
    assert!(out.starts_with("%PDF-1.7"));
    assert!(out.contains("/Type /Catalog"));
    assert!(out.contains("/Type /Pages"));
    assert!(out.contains("/Count 1"));
    assert!(out.ends_with("%%EOF\n"));
}

#[test]
fn info_dictionary_is_written_at_close() {
    let mut doc = PdfDocument::new(Vec::new(), test_info()).unwrap();
    doc.begin_page(612.0, 792.0);
    doc.end_page().unwrap();
    let bytes = doc.close().unwrap();
    let out = String::from_utf8_lossy(&bytes);
    assert!(out.contains("/Title (Engine Test)"));
    assert!(out.contains("/Creator (picture-pdf tests)"));
    // Creation and modification dates are the same instant.
    assert_eq!(out.matches("(D:20250301120000+02'00')").count(), 2);
}

#[test]
fn media_box_uses_page_dimensions() {
    let mut doc = PdfDocument::new(Vec::new(), test_info()).unwrap();
    doc.begin_page(300.0, 500.5);
    doc.end_page().unwrap();
    let bytes = doc.close().unwrap();
    assert!(String::from_utf8_lossy(&bytes).contains("/MediaBox [0 0 300 500.5]"));
}

#[test]
fn close_finishes_an_open_page() {
    let mut doc = PdfDocument::new(Vec::new(), test_info()).unwrap();
    doc.begin_page(612.0, 792.0);
    doc.draw_picture(&text_heavy_picture()).unwrap();
    // close without an explicit end_page
    let bytes = doc.close().unwrap();
    let out = String::from_utf8_lossy(&bytes);
    assert!(out.contains("/Count 1"));
    assert!(out.contains("(repetitive content that compresses well) Tj"));
}

#[test]
fn beginning_a_page_closes_the_previous_one() {
    let mut doc = PdfDocument::new(Vec::new(), test_info()).unwrap();
    doc.begin_page(612.0, 792.0);
    doc.begin_page(612.0, 792.0);
    doc.end_page().unwrap();
    let bytes = doc.close().unwrap();
    assert!(String::from_utf8_lossy(&bytes).contains("/Count 2"));
}

#[test]
fn trailer_references_catalog_and_info() {
    let mut doc = PdfDocument::new(Vec::new(), test_info()).unwrap();
    doc.begin_page(612.0, 792.0);
    doc.end_page().unwrap();
    let bytes = doc.close().unwrap();
    let out = String::from_utf8_lossy(&bytes);
    assert!(out.contains("/Root 1 0 R"));
    assert!(out.contains("/Info"));
    assert!(out.contains("startxref"));
}

#[test]
fn compression_shrinks_repetitive_content() {
    let picture = text_heavy_picture();

    let render = |compress: bool| -> Vec<u8> {
        let mut doc = PdfDocument::new(Vec::new(), test_info()).unwrap();
        doc.set_compression(compress);
        doc.begin_page(612.0, 792.0);
        doc.draw_picture(&picture).unwrap();
        doc.end_page().unwrap();
        doc.close().unwrap()
    };

    let plain = render(false);
    let compressed = render(true);
    assert!(
        compressed.len() < plain.len(),
        "compressed ({}) should be smaller than plain ({})",
        compressed.len(),
        plain.len(),
    );
}

#[test]
fn compressed_content_stream_declares_flatedecode() {
    let mut doc = PdfDocument::new(Vec::new(), test_info()).unwrap();
    doc.set_compression(true);
    doc.begin_page(612.0, 792.0);
    doc.draw_picture(&text_heavy_picture()).unwrap();
    doc.end_page().unwrap();
    let bytes = doc.close().unwrap();
    assert!(String::from_utf8_lossy(&bytes).contains("/Filter /FlateDecode"));
}

#[test]
fn uncompressed_output_has_no_filter() {
    let mut doc = PdfDocument::new(Vec::new(), test_info()).unwrap();
    doc.begin_page(612.0, 792.0);
    doc.draw_picture(&text_heavy_picture()).unwrap();
    doc.end_page().unwrap();
    let bytes = doc.close().unwrap();
    assert!(!String::from_utf8_lossy(&bytes).contains("FlateDecode"));
}
