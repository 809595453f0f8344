//! Diligence question generation (spec.md §4.10): the union of
//! risk-derived and weak-component-derived questions, deduplicated and
//! capped.

use dealmemo_core::model::{RawComponents, RiskFlag, RiskType};
use std::collections::HashSet;

const MAX_QUESTIONS: usize = 8;
const WEAK_COMPONENT_THRESHOLD: f64 = 40.0;

fn questions_for_risk_type(risk_type: RiskType) -> &'static str {
    match risk_type {
        RiskType::FinancialInconsistency => "Which document's financial figures are authoritative, and why do they diverge?",
        RiskType::MarketSizeConcern => "What is the source and methodology behind the market sizing claims?",
        RiskType::CompetitiveThreat => "How does the company differentiate against its named competitors?",
        RiskType::TeamGap => "What hiring plan closes the identified team gaps?",
        RiskType::ProductRisk => "What is the product's technical moat and how defensible is it?",
        RiskType::Regulatory => "What regulatory approvals or exposures affect this business?",
        RiskType::TimelineInconsistency => "Can the company clarify its founding and funding timeline?",
    }
}

fn questions_for_component(name: &str) -> &'static str {
    match name {
        "marketOpportunity" => "Is the addressable market large and well-evidenced enough to support this thesis?",
        "team" => "Does the founding team have the domain expertise to execute this plan?",
        "traction" => "What early traction validates product-market fit?",
        "product" => "What differentiates the product from incumbent and emerging alternatives?",
        "competitivePosition" => "How defensible is the company's competitive position?",
        other => unreachable!("unknown raw component: {other}"),
    }
}

pub fn build_diligence_questions(risks: &[RiskFlag], raw_components: &RawComponents) -> Vec<String> {
    let mut questions = Vec::new();
    let mut seen = HashSet::new();

    for risk in risks {
        let question = questions_for_risk_type(risk.risk_type);
        if seen.insert(question) {
            questions.push(question.to_string());
        }
    }

    for (name, value) in raw_components.as_array() {
        if value < WEAK_COMPONENT_THRESHOLD {
            let question = questions_for_component(name);
            if seen.insert(question) {
                questions.push(question.to_string());
            }
        }
    }

    questions.truncate(MAX_QUESTIONS);
    questions
}

#[cfg(test)]
mod tests {
    use super::*;
    use dealmemo_core::model::RiskSeverity;

    fn risk(risk_type: RiskType) -> RiskFlag {
        RiskFlag {
            id: "r1".to_string(),
            risk_type,
            severity: RiskSeverity::High,
            description: String::new(),
            affected_metrics: Vec::new(),
            suggested_mitigation: String::new(),
            source_documents: Vec::new(),
        }
    }

    #[test]
    fn a_single_weak_component_contributes_one_question() {
        let components = RawComponents {
            market_opportunity: 10.0,
            team: 90.0,
            traction: 90.0,
            product: 90.0,
            competitive_position: 90.0,
        };
        let questions = build_diligence_questions(&[], &components);
        assert_eq!(questions.len(), 1);
    }

    #[test]
    fn duplicate_risk_types_are_deduplicated() {
        let risks = vec![risk(RiskType::FinancialInconsistency), risk(RiskType::FinancialInconsistency)];
        let questions = build_diligence_questions(&risks, &RawComponents::default());
        assert_eq!(questions.len(), 1);
    }

    #[test]
    fn question_list_is_capped_at_eight() {
        let risks = vec![
            risk(RiskType::FinancialInconsistency),
            risk(RiskType::MarketSizeConcern),
            risk(RiskType::CompetitiveThreat),
            risk(RiskType::TeamGap),
            risk(RiskType::ProductRisk),
            risk(RiskType::Regulatory),
            risk(RiskType::TimelineInconsistency),
        ];
        let components = RawComponents::default();
        let questions = build_diligence_questions(&risks, &components);
        assert!(questions.len() <= 8);
    }
}
