//! Plain text parser (spec.md §4.2). No container to unwrap; sections
//! come from grouping lines under the nearest preceding heading-like
//! line, the same heuristic the structured DOCX and PDF parsers use.

use crate::base::{compute_quality, detect_language, heading_confidence, looks_like_heading, normalize_text};
use crate::error::ParseOutcome;
use dealmemo_core::model::{
    DocumentMetadata, DocumentSection, ExtractionMethod, ProcessedDocument, SourceType,
};

/// Parse a plain-text document's raw bytes into a [`ProcessedDocument`].
pub fn parse(bytes: &[u8], metadata: DocumentMetadata) -> ParseOutcome<ProcessedDocument> {
    let raw = String::from_utf8_lossy(bytes);
    let normalized = normalize_text(&raw);

    let mut sections = Vec::new();
    let mut current_title: Option<String> = None;
    let mut current_body: Vec<&str> = Vec::new();

    for line in normalized.lines() {
        if looks_like_heading(line) {
            flush_section(&current_title, &current_body, &metadata.filename, &mut sections);
            current_title = Some(line.trim().to_string());
            current_body.clear();
        } else {
            current_body.push(line);
        }
    }
    flush_section(&current_title, &current_body, &metadata.filename, &mut sections);

    if sections.is_empty() && !normalized.trim().is_empty() {
        sections.push(DocumentSection {
            title: "Document".to_string(),
            content: normalized.clone(),
            page_number: None,
            source_document: metadata.filename.clone(),
            confidence: 0.5,
        });
    }

    let warnings = Vec::new();
    let language = detect_language(&normalized);
    let quality = compute_quality(&normalized, sections.len(), &warnings);

    Ok(ProcessedDocument {
        id: metadata.filename.clone(),
        source_type: SourceType::Text,
        word_count: ProcessedDocument::word_count_of(&normalized),
        extracted_text: normalized,
        sections,
        metadata,
        language,
        encoding: "utf-8".to_string(),
        extraction_method: ExtractionMethod::Text,
        quality,
        warnings,
        processing_timestamp: chrono::Utc::now(),
        processing_duration: std::time::Duration::default(),
    })
}

fn flush_section(
    title: &Option<String>,
    body: &[&str],
    filename: &str,
    sections: &mut Vec<DocumentSection>,
) {
    let content = body.join("\n").trim().to_string();
    if title.is_none() && content.is_empty() {
        return;
    }
    let title = title.clone().unwrap_or_else(|| "Untitled Section".to_string());
    let confidence = heading_confidence(&title);
    sections.push(DocumentSection {
        title,
        content,
        page_number: None,
        source_document: filename.to_string(),
        confidence,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_metadata() -> DocumentMetadata {
        DocumentMetadata {
            filename: "notes.txt".to_string(),
            byte_size: 0,
            mime_type: "text/plain".to_string(),
            uploaded_at: chrono::Utc::now(),
            processing_status: dealmemo_core::model::ProcessingStatus::InProgress,
        }
    }

    #[test]
    fn groups_lines_under_headings() {
        let input = "EXECUTIVE SUMMARY\nWe are growing fast.\n\nTEAM\nTwo founders.";
        let doc = parse(input.as_bytes(), fixture_metadata()).unwrap();
        assert_eq!(doc.sections.len(), 2);
        assert_eq!(doc.sections[0].title, "EXECUTIVE SUMMARY");
        assert_eq!(doc.sections[1].title, "TEAM");
    }

    #[test]
    fn headingless_text_becomes_one_section() {
        let input = "just some plain prose about the company.";
        let doc = parse(input.as_bytes(), fixture_metadata()).unwrap();
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.sections[0].title, "Document");
    }

    #[test]
    fn empty_input_has_no_sections() {
        let doc = parse(b"", fixture_metadata()).unwrap();
        assert!(doc.sections.is_empty());
    }
}
