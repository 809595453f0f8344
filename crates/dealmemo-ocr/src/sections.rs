//! Block-to-section grouping (spec.md §4.3). Blocks come back from the
//! vision provider in no particular order; this reconstructs reading
//! order and regroups them the way the base parsers group lines.

use crate::client::{OcrBlock, OcrPage};
use dealmemo_core::model::DocumentSection;
use dealmemo_parsers::base::looks_like_heading;

const ROW_TOLERANCE: f64 = 20.0;
const TOP_OF_PAGE: f64 = 100.0;
const WHITESPACE_GAP: f64 = 10.0;

/// Sort `blocks` top-to-bottom, then left-to-right, treating rows
/// within [`ROW_TOLERANCE`] vertical units of each other as the same
/// row.
fn reading_order(blocks: &[OcrBlock]) -> Vec<&OcrBlock> {
    let mut ordered: Vec<&OcrBlock> = blocks.iter().collect();
    ordered.sort_by(|a, b| {
        let row_a = (a.bounding_box.y / ROW_TOLERANCE).floor();
        let row_b = (b.bounding_box.y / ROW_TOLERANCE).floor();
        row_a
            .partial_cmp(&row_b)
            .unwrap()
            .then(a.bounding_box.x.partial_cmp(&b.bounding_box.x).unwrap())
    });
    ordered
}

fn is_heading_block(block: &OcrBlock, next: Option<&OcrBlock>) -> bool {
    if !looks_like_heading(&block.text) {
        return false;
    }
    let near_top = block.bounding_box.y < TOP_OF_PAGE;
    let followed_by_gap = next
        .map(|n| n.bounding_box.y - (block.bounding_box.y + block.bounding_box.h) >= WHITESPACE_GAP)
        .unwrap_or(false);
    near_top || followed_by_gap
}

/// Convert one OCR page's blocks into [`DocumentSection`]s.
pub fn page_to_sections(page: &OcrPage, source_document: &str) -> Vec<DocumentSection> {
    let ordered = reading_order(&page.blocks);
    let mut sections = Vec::new();
    let mut current_title: Option<String> = None;
    let mut current_confidence = page.confidence;
    let mut current_body: Vec<&str> = Vec::new();

    let flush = |title: &Option<String>,
                 body: &[&str],
                 confidence: f64,
                 sections: &mut Vec<DocumentSection>| {
        if title.is_none() && body.is_empty() {
            return;
        }
        sections.push(DocumentSection {
            title: title.clone().unwrap_or_else(|| format!("Page {}", page.page_number)),
            content: body.join("\n"),
            page_number: Some(page.page_number),
            source_document: source_document.to_string(),
            confidence,
        });
    };

    for (i, block) in ordered.iter().enumerate() {
        let next = ordered.get(i + 1).copied();
        if is_heading_block(block, next) {
            flush(&current_title, &current_body, current_confidence, &mut sections);
            current_title = Some(block.text.clone());
            current_confidence = block.confidence;
            current_body.clear();
        } else {
            current_body.push(block.text.as_str());
            current_confidence = current_confidence.min(block.confidence);
        }
    }
    flush(&current_title, &current_body, current_confidence, &mut sections);

    sections
}

/// Convert every page of an OCR result into [`DocumentSection`]s, in
/// page order.
pub fn pages_to_sections(pages: &[OcrPage], source_document: &str) -> Vec<DocumentSection> {
    pages.iter().flat_map(|page| page_to_sections(page, source_document)).collect()
}
