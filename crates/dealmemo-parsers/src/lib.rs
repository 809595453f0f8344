//! # dealmemo-parsers
//!
//! Format-specific document parsers for slide decks, word-processed
//! files, PDFs, and plain text. Every parser produces a
//! [`dealmemo_core::model::ProcessedDocument`] and every failure comes
//! back as a non-retryable `document_processing`
//! [`dealmemo_core::CoreError`].

pub mod base;
pub mod docx;
pub mod error;
pub mod pdf;
pub mod pptx;
pub mod text;

pub use error::{ParseOutcome, ParserError};

use dealmemo_core::model::{DocumentMetadata, ProcessedDocument, SourceType};

/// A format-specific document parser.
pub trait DocumentParser {
    /// Whether this parser handles `metadata`'s declared MIME type.
    fn accepts(&self, metadata: &DocumentMetadata) -> bool;

    /// Parse `bytes` into a [`ProcessedDocument`].
    fn parse(&self, bytes: &[u8], metadata: DocumentMetadata) -> ParseOutcome<ProcessedDocument>;
}

macro_rules! format_parser {
    ($name:ident, $module:ident, $($mime:literal)|+, $($ext:literal)|+) => {
        /// See the module-level docs in [`crate::$module`].
        pub struct $name;

        impl DocumentParser for $name {
            fn accepts(&self, metadata: &DocumentMetadata) -> bool {
                let mime = metadata.mime_type.to_lowercase();
                let name = metadata.filename.to_lowercase();
                [$($mime),+].contains(&mime.as_str())
                    || [$($ext),+].iter().any(|ext| name.ends_with(ext))
            }

            fn parse(&self, bytes: &[u8], metadata: DocumentMetadata) -> ParseOutcome<ProcessedDocument> {
                $module::parse(bytes, metadata)
            }
        }
    };
}

format_parser!(
    PptxParser,
    pptx,
    "application/vnd.openxmlformats-officedocument.presentationml.presentation" | "application/vnd.ms-powerpoint",
    ".pptx" | ".ppt"
);
format_parser!(
    DocxParser,
    docx,
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document" | "application/msword",
    ".docx" | ".doc"
);
format_parser!(PdfParser, pdf, "application/pdf", ".pdf");
format_parser!(TextParser, text, "text/plain", ".txt" | ".md");

/// Dispatches `bytes` to the parser matching `metadata`'s declared MIME
/// type (falling back to the filename extension), and runs it.
pub fn parse_document(bytes: &[u8], metadata: DocumentMetadata) -> ParseOutcome<ProcessedDocument> {
    let parsers: [&dyn DocumentParser; 4] = [&PptxParser, &DocxParser, &PdfParser, &TextParser];
    for parser in parsers {
        if parser.accepts(&metadata) {
            return parser.parse(bytes, metadata);
        }
    }
    Err(ParserError::Other(format!(
        "no parser registered for mime type '{}' (filename '{}')",
        metadata.mime_type, metadata.filename
    )))
}

/// Maps a [`dealmemo_core::model::SourceType`] back to a canonical MIME
/// type, used by callers assembling [`DocumentMetadata`] from a known
/// source type rather than a raw upload.
pub fn mime_type_for(source_type: SourceType) -> &'static str {
    match source_type {
        SourceType::Pptx => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        SourceType::Docx => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        SourceType::Pdf => "application/pdf",
        SourceType::Text => "text/plain",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dealmemo_core::model::ProcessingStatus;

    fn metadata(filename: &str, mime_type: &str) -> DocumentMetadata {
        DocumentMetadata {
            filename: filename.to_string(),
            byte_size: 0,
            mime_type: mime_type.to_string(),
            uploaded_at: chrono::Utc::now(),
            processing_status: ProcessingStatus::Pending,
        }
    }

    #[test]
    fn dispatches_text_by_extension_when_mime_is_generic() {
        let doc = parse_document(b"EXECUTIVE SUMMARY\nGrowing fast.", metadata("pitch.txt", "application/octet-stream"))
            .unwrap();
        assert_eq!(doc.source_type, SourceType::Text);
    }

    #[test]
    fn unrecognized_format_is_an_error() {
        let result = parse_document(b"???", metadata("thing.xyz", "application/octet-stream"));
        assert!(result.is_err());
    }
}
