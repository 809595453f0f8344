//! Deterministic stand-ins for the LLM, OCR, and benchmark providers.
//!
//! The pipeline only ever depends on the `LlmClient`/`OcrClient`/
//! `BenchmarkClient` capability contracts; the deployment wires in a
//! concrete provider behind them. This binary has none, so `analyze`
//! runs against these fixtures: the LLM mock derives its JSON answers
//! from the same pattern catalog the extraction stage uses, so the
//! memo it produces is driven by the input documents rather than by
//! canned text.

use async_trait::async_trait;
use dealmemo_benchmarks::{BenchmarkClient, PercentileBand, SectorBenchmarks};
use dealmemo_core::model::{EntityValue, ExtractedEntity};
use dealmemo_core::CoreError;
use dealmemo_extraction::extract_entities;
use dealmemo_llm::{FinishReason, GenerationConfig, GenerationResult, LlmClient, SafetyConfig};
use dealmemo_ocr::{BoundingBox, OcrBlock, OcrClient, OcrOutcome, OcrPage, OcrResult};
use regex::Regex;
use serde_json::json;
use std::collections::HashMap;

fn metric(entities: &[ExtractedEntity], name: &str) -> Option<f64> {
    entities.iter().find(|e| e.name == name).and_then(|e| match e.value {
        EntityValue::Number(v) => Some(v),
        _ => None,
    })
}

fn document_text(user_text: &str) -> &str {
    user_text.split_once("Documents:\n").map(|(_, rest)| rest).unwrap_or(user_text)
}

fn company_name(text: &str) -> String {
    static COMPANY_LINE: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    let pattern = COMPANY_LINE.get_or_init(|| Regex::new(r"(?m)^\s*Company:\s*(.+?)\s*$").unwrap());
    pattern
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| "Unknown Company".to_string())
}

fn sector_hint(text: &str) -> Option<String> {
    static SECTOR_LINE: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    let pattern = SECTOR_LINE.get_or_init(|| Regex::new(r"(?mi)^\s*Sector:\s*(.+?)\s*$").unwrap());
    pattern.captures(text).and_then(|c| c.get(1)).map(|m| m.as_str().to_string())
}

/// Answers the four workflow prompts from the extraction pattern
/// catalog run over the concatenated document text, rather than a
/// real model call.
pub struct PatternBackedLlmClient;

#[async_trait]
impl LlmClient for PatternBackedLlmClient {
    async fn generate(
        &self,
        _system_text: &str,
        user_text: &str,
        _config: &GenerationConfig,
        _safety: &SafetyConfig,
    ) -> Result<GenerationResult, CoreError> {
        let text = document_text(user_text);
        let entities = extract_entities(text, "combined");

        let body = if user_text.contains("oneLiner") {
            json!({
                "name": company_name(text),
                "sector": sector_hint(text),
                "foundedYear": metric(&entities, "foundedYear"),
            })
        } else if user_text.contains("fields revenue, traction, team, funding") {
            json!({
                "revenue": {
                    "arr": metric(&entities, "arr"),
                    "mrr": metric(&entities, "mrr"),
                    "growthRate": metric(&entities, "growthRate"),
                },
                "traction": {
                    "customers": metric(&entities, "customers"),
                    "churnRate": metric(&entities, "churnRate"),
                    "nps": metric(&entities, "nps"),
                },
                "team": {
                    "size": metric(&entities, "teamSize"),
                    "foundersCount": metric(&entities, "foundersCount"),
                },
                "funding": {
                    "totalRaised": metric(&entities, "totalRaised"),
                    "valuation": metric(&entities, "valuation"),
                },
            })
        } else if user_text.contains("tam, sam, som") {
            json!({
                "tam": metric(&entities, "tam"),
                "sam": metric(&entities, "sam"),
                "marketGrowthRate": metric(&entities, "growthRate"),
            })
        } else if user_text.contains("founders, domainExpertiseYears") {
            json!({})
        } else {
            json!({})
        };

        Ok(GenerationResult {
            text: body.to_string(),
            finish_reason: FinishReason::Stop,
            safety_ratings: None,
            citation_metadata: None,
        })
    }
}

/// Always reports empty vision output, forcing callers through the
/// text-detector fallback; used when a document's extracted text is
/// too thin to trust and the pipeline falls back to OCR.
pub struct EmptyOcrClient;

#[async_trait]
impl OcrClient for EmptyOcrClient {
    async fn detect_document(&self, _bytes: &[u8], _language_hints: &[String]) -> OcrOutcome<OcrResult> {
        Ok(OcrResult { text: String::new(), confidence: 0.0, pages: Vec::new(), language: "unknown".to_string(), warnings: Vec::new() })
    }

    async fn detect_text(&self, bytes: &[u8], _language_hints: &[String]) -> OcrOutcome<OcrResult> {
        let text = String::from_utf8_lossy(bytes).to_string();
        let page = OcrPage {
            page_number: 1,
            text: text.clone(),
            confidence: 0.6,
            blocks: vec![OcrBlock {
                text,
                confidence: 0.6,
                bounding_box: BoundingBox { x: 0.0, y: 0.0, w: 0.0, h: 0.0 },
            }],
        };
        Ok(OcrResult { text: page.text.clone(), confidence: 0.6, pages: vec![page], language: "en".to_string(), warnings: Vec::new() })
    }
}

/// A small built-in sector percentile table, standing in for a real
/// benchmarking provider.
pub struct StaticBenchmarkClient {
    sectors: HashMap<String, SectorBenchmarks>,
}

impl Default for StaticBenchmarkClient {
    fn default() -> Self {
        let mut sectors = HashMap::new();
        sectors.insert(
            "saas".to_string(),
            SectorBenchmarks {
                sector: "saas".to_string(),
                sample_size: 500,
                metrics: HashMap::from([
                    ("arr".to_string(), PercentileBand { p25: 500_000.0, p50: 1_500_000.0, p75: 4_000_000.0, p90: 10_000_000.0 }),
                    ("growthRate".to_string(), PercentileBand { p25: 20.0, p50: 60.0, p75: 120.0, p90: 200.0 }),
                    ("churnRate".to_string(), PercentileBand { p25: 1.0, p50: 3.0, p75: 6.0, p90: 12.0 }),
                ]),
                last_updated: chrono_now(),
            },
        );
        Self { sectors }
    }
}

fn chrono_now() -> chrono::DateTime<chrono::Utc> {
    // Fixed reference point: this fixture never needs wall-clock freshness.
    chrono::DateTime::from_timestamp(1_700_000_000, 0).unwrap_or_else(chrono::Utc::now)
}

#[async_trait]
impl BenchmarkClient for StaticBenchmarkClient {
    async fn get_benchmarks(&self, sector: &str) -> Result<SectorBenchmarks, CoreError> {
        self.sectors
            .get(sector)
            .cloned()
            .ok_or_else(|| CoreError::validation(format!("no benchmark data for sector '{sector}'")))
    }
}
