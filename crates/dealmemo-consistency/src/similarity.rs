//! Pairwise document similarity (spec.md §4.8 step 6): how often two
//! documents land in the same tolerance group, over the metrics they
//! both report.

use crate::grouping::group_values;
use crate::index::MetricValue;
use crate::tolerance::classify;
use std::collections::HashMap;

/// `similarity[(a, b)] = alignedMetrics / (alignedMetrics + conflictingMetrics)`
/// over the set of metrics both `a` and `b` report at least one value for.
pub fn document_similarity(
    index: &HashMap<String, Vec<MetricValue>>,
    document_ids: &[String],
) -> HashMap<(String, String), f64> {
    let mut tallies: HashMap<(String, String), (u32, u32)> = HashMap::new();

    for (metric, values) in index {
        let class = classify(metric);
        let groups = group_values(class, values.clone());

        let mut source_group: HashMap<&str, usize> = HashMap::new();
        for (group_index, group) in groups.iter().enumerate() {
            for member in &group.members {
                source_group.entry(member.source.as_str()).or_insert(group_index);
            }
        }

        for i in 0..document_ids.len() {
            for j in (i + 1)..document_ids.len() {
                let (a, b) = (document_ids[i].as_str(), document_ids[j].as_str());
                let (Some(&ga), Some(&gb)) = (source_group.get(a), source_group.get(b)) else { continue };

                let tally = tallies.entry((document_ids[i].clone(), document_ids[j].clone())).or_insert((0, 0));
                if ga == gb {
                    tally.0 += 1;
                } else {
                    tally.1 += 1;
                }
            }
        }
    }

    tallies
        .into_iter()
        .map(|(pair, (aligned, conflicting))| {
            let total = aligned + conflicting;
            let similarity = if total == 0 { 1.0 } else { aligned as f64 / total as f64 };
            (pair, similarity)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dealmemo_core::model::EntityValue;

    fn value(doc: &str, n: f64) -> MetricValue {
        MetricValue { value: EntityValue::Number(n), source: doc.to_string(), confidence: 0.8, context: String::new(), timestamp: None }
    }

    #[test]
    fn documents_agreeing_on_every_shared_metric_score_one() {
        let mut index = HashMap::new();
        index.insert("arr".to_string(), vec![value("a", 2_000_000.0), value("b", 2_050_000.0)]);
        index.insert("customers".to_string(), vec![value("a", 150.0), value("b", 152.0)]);

        let similarity = document_similarity(&index, &vec!["a".to_string(), "b".to_string()]);
        assert_eq!(similarity[&("a".to_string(), "b".to_string())], 1.0);
    }

    #[test]
    fn conflicting_metric_lowers_similarity() {
        let mut index = HashMap::new();
        index.insert("arr".to_string(), vec![value("a", 2_000_000.0), value("b", 5_000_000.0)]);

        let similarity = document_similarity(&index, &vec!["a".to_string(), "b".to_string()]);
        assert_eq!(similarity[&("a".to_string(), "b".to_string())], 0.0);
    }
}
