//! Risk-flag derivation from a consistency report (spec.md §4.8/§4.10
//! boundary): discrepancies and timeline issues become [`RiskFlag`]s,
//! then partition by severity for the memo's risk assessment.

use dealmemo_consistency::{ConsistencyReport, Discrepancy, TimelineIssue};
use dealmemo_core::model::{RiskFlag, RiskSeverity, RiskType};

fn risk_type_for_metric(metric: &str) -> RiskType {
    match metric {
        "arr" | "mrr" | "totalRaised" | "valuation" => RiskType::FinancialInconsistency,
        "tam" | "sam" | "som" | "marketGrowthRate" => RiskType::MarketSizeConcern,
        "teamSize" | "foundersCount" => RiskType::TeamGap,
        "foundedYear" => RiskType::TimelineInconsistency,
        _ => RiskType::FinancialInconsistency,
    }
}

fn discrepancy_to_flag(discrepancy: &Discrepancy) -> RiskFlag {
    let source_documents: Vec<String> =
        discrepancy.groups.iter().flat_map(|group| group.members.iter().map(|m| m.source.clone())).collect();

    RiskFlag {
        id: format!("discrepancy-{}", discrepancy.metric),
        risk_type: risk_type_for_metric(&discrepancy.metric),
        severity: discrepancy.severity,
        description: format!(
            "Documents disagree on {}: {} distinct value groups reported.",
            discrepancy.metric,
            discrepancy.groups.len()
        ),
        affected_metrics: vec![discrepancy.metric.clone()],
        suggested_mitigation: "Confirm the authoritative figure directly with the company.".to_string(),
        source_documents,
    }
}

fn timeline_issue_to_flag(issue: &TimelineIssue) -> RiskFlag {
    RiskFlag {
        id: format!("timeline-{}", issue.source),
        risk_type: RiskType::TimelineInconsistency,
        severity: RiskSeverity::High,
        description: format!(
            "Funding round dated {} precedes the company's stated founding year {}.",
            issue.round_date, issue.founded_year
        ),
        affected_metrics: vec!["foundedYear".to_string(), "lastRoundDate".to_string()],
        suggested_mitigation: "Verify the founding date and funding history with the company.".to_string(),
        source_documents: vec![issue.source.clone()],
    }
}

pub fn build_risk_flags(report: &ConsistencyReport) -> Vec<RiskFlag> {
    let mut flags: Vec<RiskFlag> = report.discrepancies.iter().map(discrepancy_to_flag).collect();
    flags.extend(report.timeline_issues.iter().map(timeline_issue_to_flag));
    flags
}

pub fn partition_by_severity(flags: Vec<RiskFlag>) -> (Vec<RiskFlag>, Vec<RiskFlag>, Vec<RiskFlag>) {
    let mut high = Vec::new();
    let mut medium = Vec::new();
    let mut low = Vec::new();
    for flag in flags {
        match flag.severity {
            RiskSeverity::High => high.push(flag),
            RiskSeverity::Medium => medium.push(flag),
            RiskSeverity::Low => low.push(flag),
        }
    }
    (high, medium, low)
}
