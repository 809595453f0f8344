//! Equivalence grouping (spec.md §4.8 step 2): partitions a metric's
//! values into groups using chain clustering — each value joins the
//! group of the nearest already-placed value if it's within
//! tolerance, else starts a new group.

use crate::index::MetricValue;
use crate::tolerance::{within_tolerance, ToleranceClass};
use dealmemo_core::model::EntityValue;

#[derive(Debug, Clone)]
pub struct ValueGroup {
    pub representative: EntityValue,
    pub members: Vec<MetricValue>,
}

impl ValueGroup {
    pub fn mean_confidence(&self) -> f64 {
        self.members.iter().map(|m| m.confidence).sum::<f64>() / self.members.len() as f64
    }

    pub fn most_recent_timestamp(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        self.members.iter().filter_map(|m| m.timestamp).max()
    }
}

fn as_number(value: &EntityValue) -> Option<f64> {
    match value {
        EntityValue::Number(n) => Some(*n),
        _ => None,
    }
}

fn text_key(value: &EntityValue) -> String {
    match value {
        EntityValue::Text(s) => s.trim().to_lowercase(),
        EntityValue::Date(d) => d.to_string(),
        EntityValue::Number(n) => n.to_string(),
    }
}

/// Groups `values` for one metric into equivalence classes under
/// `class`'s tolerance rule.
pub fn group_values(class: ToleranceClass, values: Vec<MetricValue>) -> Vec<ValueGroup> {
    if class == ToleranceClass::Text {
        return group_by_text(values);
    }
    group_by_numeric_tolerance(class, values)
}

fn group_by_text(values: Vec<MetricValue>) -> Vec<ValueGroup> {
    let mut groups: Vec<ValueGroup> = Vec::new();
    for value in values {
        let key = text_key(&value.value);
        if let Some(group) = groups.iter_mut().find(|g| text_key(&g.representative) == key) {
            group.members.push(value);
        } else {
            groups.push(ValueGroup { representative: value.value.clone(), members: vec![value] });
        }
    }
    groups
}

fn group_by_numeric_tolerance(class: ToleranceClass, mut values: Vec<MetricValue>) -> Vec<ValueGroup> {
    values.sort_by(|a, b| {
        let av = as_number(&a.value).unwrap_or(f64::NAN);
        let bv = as_number(&b.value).unwrap_or(f64::NAN);
        av.partial_cmp(&bv).unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut groups: Vec<ValueGroup> = Vec::new();
    for value in values {
        let Some(number) = as_number(&value.value) else {
            groups.push(ValueGroup { representative: value.value.clone(), members: vec![value] });
            continue;
        };

        let joinable = groups.last_mut().filter(|group| {
            as_number(&group.representative).map(|rep| within_tolerance(class, rep, number)).unwrap_or(false)
        });

        match joinable {
            Some(group) => group.members.push(value),
            None => groups.push(ValueGroup { representative: value.value.clone(), members: vec![value] }),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(n: f64) -> MetricValue {
        MetricValue { value: EntityValue::Number(n), source: "doc".to_string(), confidence: 0.8, context: String::new(), timestamp: None }
    }

    #[test]
    fn financial_values_within_tolerance_join_one_group() {
        let groups = group_values(ToleranceClass::Financial, vec![value(1_000_000.0), value(1_030_000.0)]);
        assert_eq!(groups.len(), 1);
    }

    #[test]
    fn contradictory_arr_splits_into_two_groups() {
        let groups = group_values(ToleranceClass::Financial, vec![value(2_000_000.0), value(5_000_000.0)]);
        assert_eq!(groups.len(), 2);
    }
}
