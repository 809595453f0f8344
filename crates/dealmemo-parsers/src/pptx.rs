//! Slide-deck parser (spec.md §4.2, PPTX). Slides are OOXML parts under
//! `ppt/slides/slideN.xml`; each `<a:t>` run holds a run of text inside a
//! paragraph inside a shape.

use crate::base::{compute_quality, detect_language, heading_confidence, normalize_text};
use crate::error::{ParseOutcome, ParserError};
use dealmemo_core::model::{
    DocumentMetadata, DocumentSection, ExtractionMethod, ProcessedDocument, SourceType,
};
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use std::io::{Cursor, Read};

struct Slide {
    number: u32,
    text_runs: Vec<String>,
}

fn slide_number(entry_name: &str) -> Option<u32> {
    let stem = entry_name.strip_prefix("ppt/slides/slide")?.strip_suffix(".xml")?;
    stem.parse().ok()
}

fn extract_runs(xml: &str) -> Vec<String> {
    let mut reader = Reader::from_str(xml);

    let mut runs = Vec::new();
    let mut in_text = false;
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"t" => in_text = true,
            Ok(Event::End(e)) if e.local_name().as_ref() == b"t" => in_text = false,
            Ok(Event::Text(e)) if in_text => {
                if let Ok(text) = e.unescape() {
                    let text = text.trim();
                    if !text.is_empty() {
                        runs.push(text.to_string());
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(_) => break,
            _ => {}
        }
        buf.clear();
    }
    runs
}

/// Whether `candidate`, the slide's first text run, should stand as its
/// title: short, no sentence-terminal punctuation, and not the only run
/// on the slide. Otherwise the title is synthesized from the content.
fn is_title_run(candidate: &str, run_count: usize) -> bool {
    run_count > 1
        && candidate.chars().count() <= 100
        && !candidate.contains(['.', '!', '?'])
}

fn synthesize_title(body: &str) -> String {
    body.chars().take(50).collect()
}

fn read_slide(archive: &mut zip::ZipArchive<Cursor<&[u8]>>, name: &str, number: u32) -> ParseOutcome<Slide> {
    let mut file = archive
        .by_name(name)
        .map_err(|e| ParserError::MalformedContainer(format!("missing slide part {name}: {e}")))?;
    let mut xml = String::new();
    file.read_to_string(&mut xml)?;
    Ok(Slide {
        number,
        text_runs: extract_runs(&xml),
    })
}

/// Parse a PPTX document's raw bytes into a [`ProcessedDocument`].
pub fn parse(bytes: &[u8], metadata: DocumentMetadata) -> ParseOutcome<ProcessedDocument> {
    let cursor = Cursor::new(bytes);
    let mut archive = zip::ZipArchive::new(cursor)
        .map_err(|e| ParserError::MalformedContainer(format!("not a valid PPTX container: {e}")))?;

    let mut slide_names: Vec<(String, u32)> = Vec::new();
    for i in 0..archive.len() {
        let name = archive
            .by_index(i)
            .map_err(|e| ParserError::MalformedContainer(format!("corrupt archive entry: {e}")))?
            .name()
            .to_string();
        if let Some(n) = slide_number(&name) {
            slide_names.push((name, n));
        }
    }
    if slide_names.is_empty() {
        return Err(ParserError::MalformedContainer(
            "no slides found under ppt/slides/".to_string(),
        ));
    }
    slide_names.sort_by_key(|(_, n)| *n);

    let mut slides = Vec::with_capacity(slide_names.len());
    for (name, number) in &slide_names {
        slides.push(read_slide(&mut archive, name, *number)?);
    }

    let mut sections = Vec::with_capacity(slides.len());
    let mut sufficiently_textual = 0usize;
    let mut full_text_parts = Vec::with_capacity(slides.len());

    for slide in &slides {
        let body = normalize_text(&slide.text_runs.join("\n"));
        if body.chars().count() > 20 {
            sufficiently_textual += 1;
        }

        let title = slide
            .text_runs
            .first()
            .filter(|candidate| is_title_run(candidate, slide.text_runs.len()))
            .cloned()
            .unwrap_or_else(|| synthesize_title(&body));

        let confidence = slide
            .text_runs
            .first()
            .map(|candidate| heading_confidence(candidate))
            .unwrap_or(0.5);

        full_text_parts.push(body.clone());
        sections.push(DocumentSection {
            title,
            content: body,
            page_number: Some(slide.number),
            source_document: metadata.filename.clone(),
            confidence,
        });
    }

    let extracted_text = full_text_parts.join("\n\n");
    let mut warnings = Vec::new();
    if sufficiently_textual * 2 < slides.len() {
        warnings.push(
            "fewer than half of slides contain substantive text; this deck may be scanned and benefit from OCR"
                .to_string(),
        );
    }

    let language = detect_language(&extracted_text);
    let quality = compute_quality(&extracted_text, sections.len(), &warnings);

    Ok(ProcessedDocument {
        id: metadata.filename.clone(),
        source_type: SourceType::Pptx,
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
