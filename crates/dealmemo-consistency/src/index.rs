//! Metric index (spec.md §4.8 step 1): flattens every analysis
//! result's extracted entities into `metricName -> [MetricValue]`,
//! resolving each value's timestamp from the source document's
//! upload time.

use chrono::{DateTime, Utc};
use dealmemo_core::model::{AnalysisResult, EntityValue, ProcessedDocument};
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct MetricValue {
    pub value: EntityValue,
    pub source: String,
    pub confidence: f64,
    pub context: String,
    pub timestamp: Option<DateTime<Utc>>,
}

/// Builds the metric index across every analysis result, looking up
/// each entity's source document by id to attach a timestamp.
pub fn build_index(
    results: &[AnalysisResult],
    documents: &[ProcessedDocument],
) -> HashMap<String, Vec<MetricValue>> {
    let uploaded_at: HashMap<&str, DateTime<Utc>> = documents
        .iter()
        .map(|doc| (doc.id.as_str(), doc.metadata.uploaded_at))
        .collect();

    let mut index: HashMap<String, Vec<MetricValue>> = HashMap::new();
    for result in results {
        for entity in &result.entities {
            index.entry(entity.name.clone()).or_default().push(MetricValue {
                value: entity.value.clone(),
                source: entity.source_document_id.clone(),
                confidence: entity.confidence,
                context: entity.context.clone(),
                timestamp: uploaded_at.get(entity.source_document_id.as_str()).copied(),
            });
        }
    }
    index
}
