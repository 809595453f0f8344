//! PDF parser (spec.md §4.2). `pdf-extract` gives back the whole
//! document's text with form-feed (`\x0c`) page separators. Sparse
//! extraction relative to the source file's size is the signal that a
//! PDF is a scanned image and should be routed to OCR instead.

use crate::base::{compute_quality, detect_language, heading_confidence, looks_like_heading, normalize_text};
use crate::error::{ParseOutcome, ParserError};
use dealmemo_core::model::{
    DocumentMetadata, DocumentSection, ExtractionMethod, ProcessedDocument, SourceType,
};

/// Whether the extracted text is sparse enough that this PDF looks
/// scanned rather than text-native.
pub fn needs_ocr(byte_size: u64, extracted_text: &str, page_count: usize) -> bool {
    let char_count = extracted_text.chars().count();
    let density = if byte_size == 0 { 0.0 } else { char_count as f64 / byte_size as f64 };
    let words_per_page = if page_count == 0 {
        0.0
    } else {
        extracted_text.split_whitespace().count() as f64 / page_count as f64
    };
    let large_but_empty = byte_size > 100_000 && char_count < 1_000;

    density < 0.01 || words_per_page < 50.0 || large_but_empty
}

/// Parse a PDF document's raw bytes into a [`ProcessedDocument`].
///
/// Always returns `extraction_method: `[`ExtractionMethod::Text`] —
/// this parser never runs OCR itself. When the heuristics in
/// [`needs_ocr`] trip, a `ocrRequired` warning flags the document as a
/// scan candidate so the caller can decide whether to route it through
/// OCR; only a caller that actually runs OCR and merges its output may
/// promote the result to [`ExtractionMethod::Hybrid`].
pub fn parse(bytes: &[u8], metadata: DocumentMetadata) -> ParseOutcome<ProcessedDocument> {
    let raw_text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| ParserError::Other(format!("failed to extract PDF text: {e}")))?;

    let pages: Vec<&str> = raw_text.split('\x0c').collect();
    let mut sections = Vec::with_capacity(pages.len());
    let mut full_text_parts = Vec::with_capacity(pages.len());

    for (i, page) in pages.iter().enumerate() {
        let body = normalize_text(page);
        if body.trim().is_empty() {
            continue;
        }
        let first_line = body.lines().next().unwrap_or_default();
        let title = if looks_like_heading(first_line) {
            first_line.to_string()
        } else {
            format!("Page {}", i + 1)
        };
        let confidence = heading_confidence(&title);

        full_text_parts.push(body.clone());
        sections.push(DocumentSection {
            title,
            content: body,
            page_number: Some((i + 1) as u32),
            source_document: metadata.filename.clone(),
            confidence,
        });
    }

    let extracted_text = full_text_parts.join("\n\n");
    let mut warnings = Vec::new();
    if needs_ocr(metadata.byte_size, &extracted_text, pages.len()) {
        warnings.push(
            "ocrRequired: extracted text is sparse relative to the file size; this PDF may be scanned"
                .to_string(),
        );
    }
    let extraction_method = ExtractionMethod::Text;

    let language = detect_language(&extracted_text);
    let quality = compute_quality(&extracted_text, sections.len(), &warnings);

    Ok(ProcessedDocument {
        id: metadata.filename.clone(),
        source_type: SourceType::Pdf,
        word_count: ProcessedDocument::word_count_of(&extracted_text),
        extracted_text,
        sections,
        metadata,
        language,
        encoding: "utf-8".to_string(),
        extraction_method,
        quality,
        warnings,
        processing_timestamp: chrono::Utc::now(),
        processing_duration: std::time::Duration::default(),
    })
}
