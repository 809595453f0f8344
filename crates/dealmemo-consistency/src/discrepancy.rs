//! Discrepancy emission (spec.md §4.8 step 3): a metric with more than
//! one value group is a discrepancy; severity follows the fixed
//! critical-metric set, and the resolution favors the most-trusted
//! group.

use crate::grouping::{group_values, ValueGroup};
use crate::index::MetricValue;
use crate::tolerance::{classify, is_critical};
use dealmemo_core::model::{EntityValue, RiskSeverity};
use std::cmp::Ordering;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct Discrepancy {
    pub metric: String,
    pub severity: RiskSeverity,
    pub groups: Vec<ValueGroup>,
    pub resolution: Option<EntityValue>,
}

fn resolve(groups: &[ValueGroup], prioritize_recent: bool) -> Option<EntityValue> {
    groups
        .iter()
        .max_by(|a, b| {
            a.mean_confidence()
                .partial_cmp(&b.mean_confidence())
                .unwrap_or(Ordering::Equal)
                .then_with(|| {
                    if prioritize_recent {
                        a.most_recent_timestamp().cmp(&b.most_recent_timestamp())
                    } else {
                        Ordering::Equal
                    }
                })
        })
        .map(|group| group.representative.clone())
}

/// Detects discrepancies across the full metric index, sorted by
/// metric name ascending then severity descending for deterministic
/// output.
pub fn detect_discrepancies(
    index: &HashMap<String, Vec<MetricValue>>,
    prioritize_recent: bool,
) -> Vec<Discrepancy> {
    let mut discrepancies = Vec::new();

    for (metric, values) in index {
        let class = classify(metric);
        let groups = group_values(class, values.clone());
        if groups.len() <= 1 {
            continue;
        }

        let severity = if is_critical(metric) { RiskSeverity::High } else { RiskSeverity::Medium };
        let resolution = resolve(&groups, prioritize_recent);

        discrepancies.push(Discrepancy { metric: metric.clone(), severity, groups, resolution });
    }

    discrepancies.sort_by(|a, b| a.metric.cmp(&b.metric).then_with(|| b.severity.cmp(&a.severity)));
    discrepancies
}
