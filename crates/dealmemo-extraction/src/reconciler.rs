//! Entity reconciler (spec.md §4.7): merges pattern- and LLM-sourced
//! entities, validates per-metric, and drops anything below the
//! confidence threshold.

use crate::pattern::validate_metric;
use dealmemo_core::model::{EntityExtractionMethod, EntityValue, ExtractedEntity};
use std::cmp::Ordering;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct ReconcileOptions {
    pub validate_numeric_values: bool,
    pub confidence_threshold: f64,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self {
            validate_numeric_values: true,
            confidence_threshold: 0.6,
        }
    }
}

fn prefers(a: &ExtractedEntity, b: &ExtractedEntity) -> Ordering {
    match b.confidence.partial_cmp(&a.confidence).unwrap_or(Ordering::Equal) {
        Ordering::Equal => match (a.extraction_method, b.extraction_method) {
            (EntityExtractionMethod::Ai, EntityExtractionMethod::Ai) => Ordering::Equal,
            (EntityExtractionMethod::Ai, _) => Ordering::Less,
            (_, EntityExtractionMethod::Ai) => Ordering::Greater,
            _ => Ordering::Equal,
        },
        other => other,
    }
}

fn is_valid(entity: &ExtractedEntity) -> bool {
    match &entity.value {
        EntityValue::Number(value) => validate_metric(&entity.name, *value),
        _ => true,
    }
}

/// Merges `pattern_entities` and `llm_entities` sharing `(name,
/// sourceDocumentId)`, keeping the higher-confidence value (ties favor
/// `ai`), marking entities with counterparts of both methods as
/// `merged`, then validates and threshold-filters the result.
pub fn reconcile(
    pattern_entities: Vec<ExtractedEntity>,
    llm_entities: Vec<ExtractedEntity>,
    options: &ReconcileOptions,
) -> Vec<ExtractedEntity> {
    let mut groups: HashMap<(String, String), Vec<ExtractedEntity>> = HashMap::new();
    for entity in pattern_entities.into_iter().chain(llm_entities.into_iter()) {
        groups
            .entry((entity.name.clone(), entity.source_document_id.clone()))
            .or_default()
            .push(entity);
    }

    let mut merged = Vec::with_capacity(groups.len());
    for (_, mut group) in groups {
        let has_mixed_methods = group
            .first()
            .map(|first| group.iter().any(|e| e.extraction_method != first.extraction_method))
            .unwrap_or(false);

        group.sort_by(prefers);
        let mut winner = group.into_iter().next().expect("group is never empty");
        if has_mixed_methods {
            winner.extraction_method = EntityExtractionMethod::Merged;
        }
        merged.push(winner);
    }

    if options.validate_numeric_values {
        merged.retain(is_valid);
    }
    merged.retain(|entity| entity.confidence >= options.confidence_threshold);

    merged.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.source_document_id.cmp(&b.source_document_id)));
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(name: &str, doc: &str, value: f64, confidence: f64, method: EntityExtractionMethod) -> ExtractedEntity {
        ExtractedEntity {
            entity_type: dealmemo_core::model::EntityType::Financial,
            name: name.to_string(),
            value: EntityValue::Number(value),
            unit: None,
            confidence,
            source_document_id: doc.to_string(),
            context: String::new(),
            extraction_method: method,
        }
    }

    #[test]
    fn merges_matching_entities_and_keeps_higher_confidence() {
        let pattern = vec![entity("arr", "doc1", 1_000_000.0, 0.8, EntityExtractionMethod::Pattern)];
        let llm = vec![entity("arr", "doc1", 1_200_000.0, 0.9, EntityExtractionMethod::Ai)];
        let merged = reconcile(pattern, llm, &ReconcileOptions::default());
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].value, EntityValue::Number(1_200_000.0));
        assert_eq!(merged[0].extraction_method, EntityExtractionMethod::Merged);
    }

    #[test]
    fn ties_prefer_ai_extraction() {
        let pattern = vec![entity("arr", "doc1", 1_000_000.0, 0.8, EntityExtractionMethod::Pattern)];
        let llm = vec![entity("arr", "doc1", 1_200_000.0, 0.8, EntityExtractionMethod::Ai)];
        let merged = reconcile(pattern, llm, &ReconcileOptions::default());
        assert_eq!(merged[0].value, EntityValue::Number(1_200_000.0));
    }

    #[test]
    fn drops_entities_below_confidence_threshold() {
        let pattern = vec![entity("arr", "doc1", 1_000_000.0, 0.3, EntityExtractionMethod::Pattern)];
        let merged = reconcile(pattern, Vec::new(), &ReconcileOptions::default());
        assert!(merged.is_empty());
    }

    #[test]
    fn drops_invalid_metric_values_unless_validation_disabled() {
        let pattern = vec![entity("churnRate", "doc1", 250.0, 0.9, EntityExtractionMethod::Pattern)];
        assert!(reconcile(pattern.clone(), Vec::new(), &ReconcileOptions::default()).is_empty());

        let lenient = ReconcileOptions { validate_numeric_values: false, ..ReconcileOptions::default() };
        assert_eq!(reconcile(pattern, Vec::new(), &lenient).len(), 1);
    }
}
