//! Missing-data check (spec.md §4.8 step 4): when `requireAllDocuments`
//! is set, a critical metric that a document failed to surface at all
//! is itself a finding.

use crate::index::MetricValue;
use crate::tolerance::CRITICAL_METRICS;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone)]
pub struct MissingDataIssue {
    pub metric: String,
    pub present_in: Vec<String>,
    pub missing_from: Vec<String>,
}

pub fn missing_data_issues(
    index: &HashMap<String, Vec<MetricValue>>,
    document_ids: &[String],
    require_all_documents: bool,
) -> Vec<MissingDataIssue> {
    if !require_all_documents {
        return Vec::new();
    }

    let mut issues = Vec::new();
    for metric in CRITICAL_METRICS {
        let Some(values) = index.get(*metric) else { continue };
        let present: HashSet<&str> = values.iter().map(|v| v.source.as_str()).collect();
        if present.is_empty() || present.len() >= document_ids.len() {
            continue;
        }

        let missing_from = document_ids.iter().filter(|id| !present.contains(id.as_str())).cloned().collect();
        issues.push(MissingDataIssue {
            metric: metric.to_string(),
            present_in: present.into_iter().map(str::to_string).collect(),
            missing_from,
        });
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use dealmemo_core::model::EntityValue;

    fn value(doc: &str) -> MetricValue {
        MetricValue { value: EntityValue::Number(1.0), source: doc.to_string(), confidence: 0.8, context: String::new(), timestamp: None }
    }

    #[test]
    fn flags_critical_metric_missing_from_some_documents() {
        let mut index = HashMap::new();
        index.insert("arr".to_string(), vec![value("a")]);
        let document_ids = vec!["a".to_string(), "b".to_string()];

        let issues = missing_data_issues(&index, &document_ids, true);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].missing_from, vec!["b".to_string()]);
    }

    #[test]
    fn disabled_without_require_all_documents() {
        let mut index = HashMap::new();
        index.insert("arr".to_string(), vec![value("a")]);
        let document_ids = vec!["a".to_string(), "b".to_string()];
        assert!(missing_data_issues(&index, &document_ids, false).is_empty());
    }
}
