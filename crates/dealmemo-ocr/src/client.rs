//! The OCR capability contract (spec.md §4.3) and the document-then-text
//! detector fallback that sits in front of it.

use crate::error::{OcrError, OcrOutcome};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrBlock {
    pub text: String,
    pub confidence: f64,
    pub bounding_box: BoundingBox,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrPage {
    pub page_number: u32,
    pub text: String,
    pub confidence: f64,
    pub blocks: Vec<OcrBlock>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrResult {
    pub text: String,
    pub confidence: f64,
    pub pages: Vec<OcrPage>,
    pub language: String,
    #[serde(default)]
    pub warnings: Vec<String>,
}

/// A vision backend capable of the two detector strategies spec.md
/// requires. Implementations talk to whatever concrete OCR provider
/// the deployment wires in; the pipeline only ever sees this trait.
#[async_trait]
pub trait OcrClient: Send + Sync {
    /// Document-oriented detection: pages -> blocks -> paragraphs ->
    /// words -> symbols, flattened to [`OcrResult`] by the provider.
    async fn detect_document(&self, bytes: &[u8], language_hints: &[String]) -> OcrOutcome<OcrResult>;

    /// Plain text detection, cheaper but with coarser block structure.
    async fn detect_text(&self, bytes: &[u8], language_hints: &[String]) -> OcrOutcome<OcrResult>;
}

/// Runs the document detector, falling back to the text detector when
/// the document detector comes back empty. The first detector whose
/// text is non-empty wins; a result below `confidence_threshold` gets a
/// warning appended rather than being rejected.
pub async fn run_ocr(
    client: &dyn OcrClient,
    bytes: &[u8],
    language_hints: &[String],
    confidence_threshold: f64,
) -> OcrOutcome<OcrResult> {
    let mut result = match client.detect_document(bytes, language_hints).await {
        Ok(result) if !result.text.trim().is_empty() => result,
        _ => client.detect_text(bytes, language_hints).await?,
    };

    if result.text.trim().is_empty() {
        return Err(OcrError::NoTextDetected);
    }

    if result.confidence < confidence_threshold {
        result.warnings.push(format!(
            "OCR confidence {:.2} is below the configured threshold {:.2}",
            result.confidence, confidence_threshold
        ));
    }

    Ok(result)
}
