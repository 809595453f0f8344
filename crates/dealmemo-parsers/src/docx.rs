//! Word-processed document parser (spec.md §4.2, DOCX). Walks
//! `word/document.xml`, grouping runs into paragraphs and paragraphs
//! tagged with a heading style (`w:pStyle w:val="HeadingN"`) into
//! sections. Falls back to a single flat section when no heading
//! styles are present.

use crate::base::{compute_quality, detect_language, heading_confidence, normalize_text};
use crate::error::{ParseOutcome, ParserError};
use dealmemo_core::model::{
    DocumentMetadata, DocumentSection, ExtractionMethod, ProcessedDocument, SourceType,
};
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use std::io::{Cursor, Read};

struct Paragraph {
    text: String,
    heading_style: Option<String>,
}

fn parse_paragraphs(xml: &str) -> Vec<Paragraph> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();

    let mut paragraphs = Vec::new();
    let mut in_paragraph = false;
    let mut in_text = false;
    let mut current_text = String::new();
    let mut current_style: Option<String> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                let local = e.local_name();
                match local.as_ref() {
                    b"p" => {
                        in_paragraph = true;
                        current_text.clear();
                        current_style = None;
                    }
                    b"pStyle" => {
                        for attr in e.attributes().flatten() {
                            if attr.key.local_name().as_ref() == b"val" {
                                if let Ok(value) = attr.unescape_value() {
                                    current_style = Some(value.to_string());
                                }
                            }
                        }
                    }
                    b"t" => in_text = true,
                    _ => {}
                }
            }
            Ok(Event::End(e)) => {
                let local = e.local_name();
                match local.as_ref() {
                    b"p" => {
                        if in_paragraph {
                            let text = current_text.trim().to_string();
                            if !text.is_empty() {
                                paragraphs.push(Paragraph {
                                    text,
                                    heading_style: current_style.clone(),
                                });
                            }
                        }
                        in_paragraph = false;
                    }
                    b"t" => in_text = false,
                    _ => {}
                }
            }
            Ok(Event::Text(e)) if in_text => {
                if let Ok(text) = e.unescape() {
                    current_text.push_str(&text);
                }
            }
            Ok(Event::Eof) => break,
            Err(_) => break,
            _ => {}
        }
        buf.clear();
    }
    paragraphs
}

fn is_heading_style(style: &str) -> bool {
    let lower = style.to_lowercase();
    lower.starts_with("heading") || lower == "title"
}

fn structured_sections(paragraphs: &[Paragraph], filename: &str) -> Vec<DocumentSection> {
    let mut sections = Vec::new();
    let mut current_title: Option<String> = None;
    let mut current_body: Vec<&str> = Vec::new();

    let flush = |title: &Option<String>, body: &[&str], sections: &mut Vec<DocumentSection>| {
        if title.is_none() && body.is_empty() {
            return;
        }
        let title = title.clone().unwrap_or_else(|| "Untitled Section".to_string());
        let content = normalize_text(&body.join("\n"));
        let confidence = heading_confidence(&title);
        sections.push(DocumentSection {
            title,
            content,
            page_number: None,
            source_document: filename.to_string(),
            confidence,
        });
    };

    for paragraph in paragraphs {
        let is_heading = paragraph.heading_style.as_deref().map(is_heading_style).unwrap_or(false);
        if is_heading {
            flush(&current_title, &current_body, &mut sections);
            current_title = Some(paragraph.text.clone());
            current_body.clear();
        } else {
            current_body.push(paragraph.text.as_str());
        }
    }
    flush(&current_title, &current_body, &mut sections);
    sections
}

fn flat_section(paragraphs: &[Paragraph], filename: &str) -> Vec<DocumentSection> {
    let body: Vec<&str> = paragraphs.iter().map(|p| p.text.as_str()).collect();
    vec![DocumentSection {
        title: "Document".to_string(),
        content: normalize_text(&body.join("\n\n")),
        page_number: None,
        source_document: filename.to_string(),
        confidence: 0.5,
    }]
}

/// Parse a DOCX document's raw bytes into a [`ProcessedDocument`].
pub fn parse(bytes: &[u8], metadata: DocumentMetadata) -> ParseOutcome<ProcessedDocument> {
    let cursor = Cursor::new(bytes);
    let mut archive = zip::ZipArchive::new(cursor)
        .map_err(|e| ParserError::MalformedContainer(format!("not a valid DOCX container: {e}")))?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|_| ParserError::MalformedContainer("missing word/document.xml".to_string()))?
        .read_to_string(&mut xml)?;

    let paragraphs = parse_paragraphs(&xml);
    let structured = structured_sections(&paragraphs, &metadata.filename);
    let flat = flat_section(&paragraphs, &metadata.filename);

    // Prefer the heading-walk variant only when it yields strictly more
    // sections than the flat fallback.
    let sections = if structured.len() > flat.len() { structured } else { flat };

    let extracted_text = paragraphs
        .iter()
        .map(|p| p.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");
    let extracted_text = normalize_text(&extracted_text);

    let warnings = Vec::new();
    let language = detect_language(&extracted_text);
    let quality = compute_quality(&extracted_text, sections.len(), &warnings);

    Ok(ProcessedDocument {
        id: metadata.filename.clone(),
        source_type: SourceType::Docx,
        word_count: ProcessedDocument::word_count_of(&extracted_text),
        extracted_text,
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn fixture_metadata() -> DocumentMetadata {
        DocumentMetadata {
            filename: "memo.docx".to_string(),
            byte_size: 0,
            mime_type: "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
                .to_string(),
            uploaded_at: chrono::Utc::now(),
            processing_status: dealmemo_core::model::ProcessingStatus::InProgress,
        }
    }

    fn build_docx(document_xml: &str) -> Vec<u8> {
        let mut buf = Vec::new();
        {
            let cursor = Cursor::new(&mut buf);
            let mut writer = zip::ZipWriter::new(cursor);
            let options: zip::write::FileOptions<()> = zip::write::FileOptions::default();
            writer.start_file("word/document.xml", options).unwrap();
            writer.write_all(document_xml.as_bytes()).unwrap();
            writer.finish().unwrap();
        }
        buf
    }

    #[test]
    fn groups_paragraphs_by_heading_style() {
        let xml = r#"
            <w:document>
              <w:body>
                <w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr><w:r><w:t>Executive Summary</w:t></w:r></w:p>
                <w:p><w:r><w:t>We are growing fast.</w:t></w:r></w:p>
                <w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr><w:r><w:t>Team</w:t></w:r></w:p>
                <w:p><w:r><w:t>Two founders.</w:t></w:r></w:p>
              </w:body>
            </w:document>
        "#;
        let bytes = build_docx(xml);
        let doc = parse(&bytes, fixture_metadata()).unwrap();
        assert_eq!(doc.sections.len(), 2);
        assert_eq!(doc.sections[0].title, "Executive Summary");
        assert_eq!(doc.sections[1].title, "Team");
    }

    #[test]
    fn falls_back_to_flat_section_without_headings() {
        let xml = r#"
            <w:document>
              <w:body>
                <w:p><w:r><w:t>Just a paragraph.</w:t></w:r></w:p>
              </w:body>
            </w:document>
        "#;
        let bytes = build_docx(xml);
        let doc = parse(&bytes, fixture_metadata()).unwrap();
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.sections[0].title, "Document");
    }

    #[test]
    fn rejects_container_missing_document_xml() {
        let mut buf = Vec::new();
        {
            let cursor = Cursor::new(&mut buf);
            let mut writer = zip::ZipWriter::new(cursor);
            let options: zip::write::FileOptions<()> = zip::write::FileOptions::default();
            writer.start_file("word/other.xml", options).unwrap();
            writer.write_all(b"<x/>").unwrap();
            writer.finish().unwrap();
        }
        assert!(parse(&buf, fixture_metadata()).is_err());
    }
}
