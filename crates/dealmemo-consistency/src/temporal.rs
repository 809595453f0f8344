//! Temporal check (spec.md §4.8 step 5): a funding round cannot close
//! before the company existed.

use chrono::NaiveDate;
use dealmemo_core::model::AnalysisResult;

#[derive(Debug, Clone)]
pub struct TimelineIssue {
    pub founded_year: i32,
    pub round_date: NaiveDate,
    pub source: String,
}

pub fn check_timeline(results: &[AnalysisResult]) -> Vec<TimelineIssue> {
    let mut issues = Vec::new();
    for result in results {
        let Some(founded_year) = result.company_profile.founded_year else { continue };
        let Some(round_date) = result.investment_metrics.funding.last_round_date else { continue };
        let Some(founded_jan1) = NaiveDate::from_ymd_opt(founded_year, 1, 1) else { continue };

        if round_date < founded_jan1 {
            issues.push(TimelineIssue {
                founded_year,
                round_date,
                source: result.source_document_ids.first().cloned().unwrap_or_default(),
            });
        }
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use dealmemo_core::model::{
        AnalysisType, CompanyProfile, CompetitiveAnalysis, FundingMetrics, InvestmentMetrics, MarketClaims,
        ProductProfile, TeamAssessment,
    };
    use std::time::Duration;

    fn result(founded_year: Option<i32>, last_round_date: Option<NaiveDate>) -> AnalysisResult {
        AnalysisResult {
            company_profile: CompanyProfile { founded_year, ..CompanyProfile::default() },
            investment_metrics: InvestmentMetrics {
                funding: FundingMetrics { last_round_date, ..Default::default() },
                ..Default::default()
            },
            market_claims: MarketClaims::default(),
            team_assessment: TeamAssessment::default(),
            product_profile: ProductProfile::default(),
            competitive_analysis: CompetitiveAnalysis::default(),
            entities: Vec::new(),
            analysis_type: AnalysisType::Full,
            confidence: 0.8,
            processing_time: Duration::default(),
            source_document_ids: vec!["a".to_string()],
            consistency_flags: Vec::new(),
            warnings: Vec::new(),
        }
    }

    #[test]
    fn flags_round_date_before_founding() {
        let results = vec![result(Some(2023), NaiveDate::from_ymd_opt(2020, 6, 1))];
        let issues = check_timeline(&results);
        assert_eq!(issues.len(), 1);
    }

    #[test]
    fn allows_round_date_after_founding() {
        let results = vec![result(Some(2018), NaiveDate::from_ymd_opt(2020, 6, 1))];
        assert!(check_timeline(&results).is_empty());
    }
}
