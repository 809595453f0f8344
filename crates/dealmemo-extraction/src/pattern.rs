//! Pattern entity extractor (spec.md §4.6): a fixed regex catalog, one
//! entry per metric, each with a unit parser, a validator, and a
//! default confidence of 0.8.

use dealmemo_core::model::{EntityExtractionMethod, EntityType, EntityValue, ExtractedEntity};
use once_cell::sync::Lazy;
use regex::Regex;

/// Normalizes a monetary magnitude suffix to its multiplier.
fn suffix_multiplier(suffix: &str) -> f64 {
    match suffix.to_lowercase().as_str() {
        "k" | "thousand" => 1e3,
        "m" | "million" => 1e6,
        "b" | "billion" => 1e9,
        "t" | "trillion" => 1e12,
        _ => 1.0,
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.replace(',', "").parse::<f64>().ok()
}

/// Parses a monetary string like `$2.5M`, `$250K`, or `$2 billion` to a
/// plain dollar amount.
pub fn parse_money(number: &str, suffix: Option<&str>) -> Option<f64> {
    let base = parse_number(number)?;
    Some(base * suffix.map(suffix_multiplier).unwrap_or(1.0))
}

/// Picks whichever alternation branch of a pattern matched and returns
/// its captured digits. Patterns with a single value-capturing group
/// just use `get(1)`; [`MetricSpec::count`] matches label-before-number
/// or number-before-label and so carries one capture group per branch.
type ValueGroup = for<'t> fn(&regex::Captures<'t>) -> Option<&'t str>;

fn single_group<'t>(capture: &regex::Captures<'t>) -> Option<&'t str> {
    capture.get(1).map(|m| m.as_str())
}

fn first_of_two_groups<'t>(capture: &regex::Captures<'t>) -> Option<&'t str> {
    capture.get(1).or_else(|| capture.get(2)).map(|m| m.as_str())
}

pub struct MetricSpec {
    pub name: &'static str,
    pub entity_type: EntityType,
    pub pattern: Regex,
    pub validator: fn(f64) -> bool,
    pub unit: Option<&'static str>,
    pub confidence: f64,
    value_group: ValueGroup,
}

impl MetricSpec {
    fn money(name: &'static str, entity_type: EntityType, label: &str) -> Self {
        let pattern = Regex::new(&format!(
            r"(?i){label}[^$\n]{{0,25}}\$\s*([0-9][0-9,\.]*)\s*(K|M|B|T|thousand|million|billion|trillion)?"
        ))
        .unwrap();
        Self {
            name,
            entity_type,
            pattern,
            validator: |v| v >= 0.0,
            unit: Some("usd"),
            confidence: 0.8,
            value_group: single_group,
        }
    }

    fn percent(name: &'static str, entity_type: EntityType, label: &str, validator: fn(f64) -> bool) -> Self {
        let pattern =
            Regex::new(&format!(r"(?i){label}[^%\n]{{0,20}}?(-?[0-9]+(?:\.[0-9]+)?)\s*%")).unwrap();
        Self {
            name,
            entity_type,
            pattern,
            validator,
            unit: Some("percent"),
            confidence: 0.8,
            value_group: single_group,
        }
    }

    /// Matches `{label}` before or after the digits (e.g. both "team of
    /// 25" and "150 customers"), since count phrasings go either way.
    fn count(name: &'static str, entity_type: EntityType, label: &str) -> Self {
        let pattern = Regex::new(&format!(
            r"(?i)(?:{label}[^0-9\n]{{0,20}}([0-9][0-9,]*)|([0-9][0-9,]*)[^0-9\n]{{0,20}}{label})"
        ))
        .unwrap();
        Self {
            name,
            entity_type,
            pattern,
            validator: |v| v >= 0.0,
            unit: None,
            confidence: 0.8,
            value_group: first_of_two_groups,
        }
    }

    fn year(name: &'static str, entity_type: EntityType, label: &str) -> Self {
        let pattern = Regex::new(&format!(r"(?i){label}[^0-9\n]{{0,15}}(19[5-9][0-9]|20[0-4][0-9])")).unwrap();
        Self {
            name,
            entity_type,
            pattern,
            validator: |v| (1950.0..=2049.0).contains(&v),
            unit: None,
            confidence: 0.8,
            value_group: single_group,
        }
    }
}

pub static CATALOG: Lazy<Vec<MetricSpec>> = Lazy::new(|| {
    vec![
        MetricSpec::money("arr", EntityType::Financial, r"\bARR\b"),
        MetricSpec::money("mrr", EntityType::Financial, r"\bMRR\b"),
        MetricSpec::percent("growthRate", EntityType::Financial, r"growth rate", |v| v >= 0.0),
        MetricSpec::count("customers", EntityType::Market, r"customers"),
        MetricSpec::percent("churnRate", EntityType::Market, r"churn", |v| (0.0..=100.0).contains(&v)),
        MetricSpec::percent("nps", EntityType::Market, r"\bNPS\b", |v| (-100.0..=100.0).contains(&v)),
        MetricSpec::count("teamSize", EntityType::Team, r"team (?:of|size)"),
        MetricSpec::count("foundersCount", EntityType::Team, r"founders?"),
        MetricSpec::money("totalRaised", EntityType::Funding, r"(?:total raised|raised)"),
        MetricSpec::money("valuation", EntityType::Funding, r"valuation"),
        MetricSpec::money("tam", EntityType::Market, r"\bTAM\b"),
        MetricSpec::money("sam", EntityType::Market, r"\bSAM\b"),
        MetricSpec::year("foundedYear", EntityType::Company, r"founded(?: in)?"),
    ]
});

/// Whether `value` satisfies the named metric's validator. Unknown
/// metric names are always considered valid (nothing to check against).
pub fn validate_metric(name: &str, value: f64) -> bool {
    CATALOG
        .iter()
        .find(|spec| spec.name == name)
        .map(|spec| (spec.validator)(value))
        .unwrap_or(true)
}

fn context_window(text: &str, start: usize, end: usize) -> String {
    let window_start = text[..start].char_indices().rev().nth(30).map(|(i, _)| i).unwrap_or(0);
    let window_end = (end + 30).min(text.len());
    text[window_start..window_end].trim().to_string()
}

/// Scans `text` against the fixed metric catalog and returns every
/// match as an [`ExtractedEntity`].
pub fn extract_entities(text: &str, source_document_id: &str) -> Vec<ExtractedEntity> {
    let mut entities = Vec::new();

    for spec in CATALOG.iter() {
        for capture in spec.pattern.captures_iter(text) {
            let whole = capture.get(0).unwrap();
            let value = if spec.unit == Some("usd") {
                let number = capture.get(1).map(|m| m.as_str()).unwrap_or_default();
                let suffix = capture.get(2).map(|m| m.as_str());
                parse_money(number, suffix)
            } else {
                (spec.value_group)(&capture).and_then(parse_number)
            };

            let Some(value) = value else { continue };
            if !(spec.validator)(value) {
                continue;
            }

            entities.push(ExtractedEntity {
                entity_type: spec.entity_type,
                name: spec.name.to_string(),
                value: EntityValue::Number(value),
                unit: spec.unit.map(|u| u.to_string()),
                confidence: spec.confidence,
                source_document_id: source_document_id.to_string(),
                context: context_window(text, whole.start(), whole.end()),
                extraction_method: EntityExtractionMethod::Pattern,
            });
        }
    }

    entities
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_million_suffix() {
        assert_eq!(parse_money("2.5", Some("M")), Some(2_500_000.0));
    }

    #[test]
    fn parses_billion_word_suffix() {
        assert_eq!(parse_money("2", Some("billion")), Some(2_000_000_000.0));
    }

    #[test]
    fn extracts_arr_from_narrative_text() {
        let text = "Our ARR is currently $2.5M and growing fast.";
        let entities = extract_entities(text, "pitch.pdf");
        let arr = entities.iter().find(|e| e.name == "arr").unwrap();
        assert_eq!(arr.value, EntityValue::Number(2_500_000.0));
    }

    #[test]
    fn rejects_churn_outside_valid_range() {
        assert!(!validate_metric("churnRate", 150.0));
        assert!(validate_metric("churnRate", 5.0));
    }

    #[test]
    fn extracts_count_with_number_before_label() {
        let text = "We serve 150 customers and have 2 founders.";
        let entities = extract_entities(text, "deck.pptx");
        let customers = entities.iter().find(|e| e.name == "customers").unwrap();
        assert_eq!(customers.value, EntityValue::Number(150.0));
        let founders = entities.iter().find(|e| e.name == "foundersCount").unwrap();
        assert_eq!(founders.value, EntityValue::Number(2.0));
    }

    #[test]
    fn extracts_founded_year_within_range() {
        let text = "Acme was founded in 2018 by two engineers.";
        let entities = extract_entities(text, "deck.pptx");
        let year = entities.iter().find(|e| e.name == "foundedYear").unwrap();
        assert_eq!(year.value, EntityValue::Number(2018.0));
    }
}
