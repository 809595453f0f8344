//! Consistency report assembly (spec.md §4.8 step 7): runs the full
//! pipeline over a batch of analysis results and scores the outcome.

use crate::discrepancy::{detect_discrepancies, Discrepancy};
use crate::index::build_index;
use crate::missing_data::{missing_data_issues, MissingDataIssue};
use crate::similarity::document_similarity;
use crate::temporal::{check_timeline, TimelineIssue};
use crate::tolerance::CRITICAL_METRICS;
use dealmemo_core::model::{AnalysisResult, ProcessedDocument, RiskSeverity};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct ConsistencyOptions {
    pub require_all_documents: bool,
    pub prioritize_recent: bool,
}

#[derive(Debug, Clone)]
pub struct ConsistencyReport {
    pub discrepancies: Vec<Discrepancy>,
    pub missing_data: Vec<MissingDataIssue>,
    pub timeline_issues: Vec<TimelineIssue>,
    pub document_similarity: HashMap<(String, String), f64>,
    pub overall_score: f64,
}

fn severity_weight(severity: RiskSeverity) -> u32 {
    match severity {
        RiskSeverity::High => 3,
        RiskSeverity::Medium => 2,
        RiskSeverity::Low => 1,
    }
}

/// Runs the full consistency pipeline over `results`, using `documents`
/// to resolve source ids and timestamps.
pub fn check_consistency(
    results: &[AnalysisResult],
    documents: &[ProcessedDocument],
    options: &ConsistencyOptions,
) -> ConsistencyReport {
    let index = build_index(results, documents);
    let document_ids: Vec<String> = documents.iter().map(|doc| doc.id.clone()).collect();

    let discrepancies = detect_discrepancies(&index, options.prioritize_recent);
    let missing_data = missing_data_issues(&index, &document_ids, options.require_all_documents);
    let timeline_issues = check_timeline(results);
    let document_similarity = document_similarity(&index, &document_ids);

    let penalty: u32 = discrepancies.iter().map(|d| severity_weight(d.severity)).sum::<u32>()
        + missing_data.len() as u32 * severity_weight(RiskSeverity::Medium)
        + timeline_issues.len() as u32 * severity_weight(RiskSeverity::High);

    let denominator = (CRITICAL_METRICS.len() * document_ids.len().max(1)) as f64;
    let overall_score = (1.0 - penalty as f64 / denominator).max(0.0);

    ConsistencyReport { discrepancies, missing_data, timeline_issues, document_similarity, overall_score }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dealmemo_core::model::{
        AnalysisType, CompanyProfile, CompetitiveAnalysis, DocumentMetadata, EntityExtractionMethod,
        EntityType, EntityValue, ExtractedEntity, ExtractionMethod, FundingMetrics, InvestmentMetrics,
        MarketClaims, ProcessingStatus, ProductProfile, QualityScores, SourceType, TeamAssessment,
    };
    use std::time::Duration;

    fn document(id: &str) -> ProcessedDocument {
        ProcessedDocument {
            id: id.to_string(),
            source_type: SourceType::Text,
            extracted_text: String::new(),
            sections: Vec::new(),
            metadata: DocumentMetadata {
                filename: id.to_string(),
                byte_size: 0,
                mime_type: "text/plain".to_string(),
                uploaded_at: chrono::Utc::now(),
                processing_status: ProcessingStatus::Completed,
            },
            word_count: 0,
            language: "en".to_string(),
            encoding: "utf-8".to_string(),
            extraction_method: ExtractionMethod::Text,
            quality: QualityScores { text_clarity: 1.0, structure_preservation: 1.0, completeness: 1.0 },
            warnings: Vec::new(),
            processing_timestamp: chrono::Utc::now(),
            processing_duration: Duration::default(),
        }
    }

    fn entity(name: &str, doc: &str, value: f64) -> ExtractedEntity {
        ExtractedEntity {
            entity_type: EntityType::Financial,
            name: name.to_string(),
            value: EntityValue::Number(value),
            unit: None,
            confidence: 0.8,
            source_document_id: doc.to_string(),
            context: String::new(),
            extraction_method: EntityExtractionMethod::Pattern,
        }
    }

    fn analysis(entities: Vec<ExtractedEntity>, source_document_ids: Vec<String>) -> AnalysisResult {
        AnalysisResult {
            company_profile: CompanyProfile::default(),
            investment_metrics: InvestmentMetrics { funding: FundingMetrics::default(), ..Default::default() },
            market_claims: MarketClaims::default(),
            team_assessment: TeamAssessment::default(),
            product_profile: ProductProfile::default(),
            competitive_analysis: CompetitiveAnalysis::default(),
            entities,
            analysis_type: AnalysisType::Full,
            confidence: 0.8,
            processing_time: Duration::default(),
            source_document_ids,
            consistency_flags: Vec::new(),
            warnings: Vec::new(),
        }
    }

    #[test]
    fn contradictory_arr_lowers_overall_score_below_one() {
        let docs = vec![document("a"), document("b")];
        let results = vec![analysis(
            vec![entity("arr", "a", 2_000_000.0), entity("arr", "b", 5_000_000.0)],
            vec!["a".to_string(), "b".to_string()],
        )];

        let report = check_consistency(&results, &docs, &ConsistencyOptions::default());
        assert_eq!(report.discrepancies.len(), 1);
        assert!(report.overall_score < 0.9);
    }

    #[test]
    fn agreeing_documents_score_close_to_one() {
        let docs = vec![document("a"), document("b")];
        let results = vec![analysis(
            vec![entity("arr", "a", 2_000_000.0), entity("arr", "b", 2_040_000.0)],
            vec!["a".to_string(), "b".to_string()],
        )];

        let report = check_consistency(&results, &docs, &ConsistencyOptions::default());
        assert!(report.discrepancies.is_empty());
        assert_eq!(report.overall_score, 1.0);
    }
}
