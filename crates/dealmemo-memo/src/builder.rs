//! Deal memo assembly (spec.md §4.10): wires score, consistency,
//! benchmarks and risk flags into the final [`DealMemo`].

use crate::benchmarks::build_benchmark_comparisons;
use crate::diligence::build_diligence_questions;
use crate::projection::project_growth;
use crate::recommendation::recommend;
use crate::risks::{build_risk_flags, partition_by_severity};
use crate::terms::{suggest_check_size, valuation_cap_band};
use crate::timeline::suggest_timeline;
use dealmemo_benchmarks::SectorBenchmarks;
use dealmemo_consistency::ConsistencyReport;
use dealmemo_core::model::{
    AnalysisResult, DealMemo, DealMemoMetadata, InvestmentRecommendation, MemoSummary, RiskAssessment, ScoreBreakdown,
};

#[derive(Debug, Clone)]
pub struct MemoOptions {
    pub allow_hold_tier: bool,
    pub generated_by: String,
    pub analysis_version: String,
}

impl Default for MemoOptions {
    fn default() -> Self {
        Self {
            allow_hold_tier: true,
            generated_by: "dealmemo-pipeline".to_string(),
            analysis_version: "1.0.0".to_string(),
        }
    }
}

/// Builds the final memo from a completed analysis pass. `benchmarks`
/// is `None` when the lookup degraded; `benchmark_warnings` carries the
/// degradation notice through to [`DealMemoMetadata::warnings`].
pub fn build_deal_memo(
    analysis: &AnalysisResult,
    score: &ScoreBreakdown,
    consistency: &ConsistencyReport,
    benchmarks: Option<&SectorBenchmarks>,
    benchmark_warnings: &[String],
    options: &MemoOptions,
) -> DealMemo {
    let risk_flags = build_risk_flags(consistency);
    let (high_risks, medium_risks, low_risks) = partition_by_severity(risk_flags);

    let recommendation = recommend(score.total_score, high_risks.len(), options.allow_hold_tier);

    let growth_potential = analysis.investment_metrics.revenue.arr.map(|arr| {
        let sector_median_growth = benchmarks.and_then(|b| b.metrics.get("growthRate")).map(|band| band.p50);
        project_growth(arr, analysis.investment_metrics.revenue.growth_rate.unwrap_or(0.0), sector_median_growth)
    });

    let all_risks: Vec<_> = high_risks.iter().chain(medium_risks.iter()).chain(low_risks.iter()).cloned().collect();
    let diligence_questions = build_diligence_questions(&all_risks, &score.raw_components);
    let timeline = suggest_timeline(recommendation, high_risks.len());
    let suggested_check_size =
        suggest_check_size(score.total_score, analysis.investment_metrics.funding.current_ask);
    let valuation_cap_band = valuation_cap_band(
        analysis.investment_metrics.revenue.arr,
        analysis.company_profile.stage,
    );

    let thesis = format!(
        "{} scores {:.1}/100 with {} high-priority risk(s); recommendation: {recommendation:?}.",
        analysis.company_profile.name, score.total_score, high_risks.len()
    );

    let mut warnings = analysis.warnings.clone();
    warnings.extend(benchmark_warnings.iter().cloned());

    tracing::info!(
        company = %analysis.company_profile.name,
        score = score.total_score,
        recommendation = ?recommendation,
        high_risks = high_risks.len(),
        "deal memo assembled"
    );

    DealMemo {
        summary: MemoSummary {
            company_name: analysis.company_profile.name.clone(),
            one_liner: analysis.company_profile.one_liner.clone(),
            sector: analysis.company_profile.sector.clone(),
            stage: analysis.company_profile.stage,
            signal_score: score.total_score,
            recommendation,
        },
        key_benchmarks: build_benchmark_comparisons(analysis, benchmarks),
        growth_potential,
        risk_assessment: RiskAssessment {
            high_priority_risks: high_risks,
            medium_priority_risks: medium_risks,
            low_priority_risks: low_risks,
            overall_consistency_score: consistency.overall_score,
        },
        investment_recommendation: InvestmentRecommendation {
            recommendation,
            thesis,
            suggested_check_size,
            valuation_cap_band,
            diligence_questions,
            timeline,
        },
        analysis_weightings: score.weightings,
        metadata: DealMemoMetadata {
            generated_by: options.generated_by.clone(),
            analysis_version: options.analysis_version.clone(),
            source_documents: analysis.source_document_ids.clone(),
            processing_time: analysis.processing_time,
            data_quality: consistency.overall_score,
            warnings,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dealmemo_core::model::{
        AnalysisType, CompanyProfile, CompetitiveAnalysis, FundingMetrics, InvestmentMetrics, MarketClaims,
        ProductProfile, RawComponents, RevenueMetrics, TeamAssessment, Weightings,
    };
    use std::time::Duration;

    fn analysis() -> AnalysisResult {
        AnalysisResult {
            company_profile: CompanyProfile { name: "Acme".to_string(), ..CompanyProfile::default() },
            investment_metrics: InvestmentMetrics {
                revenue: RevenueMetrics { arr: Some(2_000_000.0), growth_rate: Some(15.0), ..Default::default() },
                funding: FundingMetrics { current_ask: Some(1_000_000.0), ..Default::default() },
                ..Default::default()
            },
            market_claims: MarketClaims::default(),
            team_assessment: TeamAssessment::default(),
            product_profile: ProductProfile::default(),
            competitive_analysis: CompetitiveAnalysis::default(),
            entities: Vec::new(),
            analysis_type: AnalysisType::Full,
            confidence: 0.9,
            processing_time: Duration::from_millis(500),
            source_document_ids: vec!["doc1".to_string()],
            consistency_flags: Vec::new(),
            warnings: Vec::new(),
        }
    }

    fn score(total: f64) -> ScoreBreakdown {
        ScoreBreakdown {
            raw_components: RawComponents { market_opportunity: 80.0, team: 80.0, traction: 80.0, product: 80.0, competitive_position: 80.0 },
            weighted_components: RawComponents::default(),
            total_score: total,
            weightings: Weightings::default(),
            confidence: 0.9,
            methodology: "deterministic-v1".to_string(),
        }
    }

    fn empty_report() -> ConsistencyReport {
        ConsistencyReport {
            discrepancies: Vec::new(),
            missing_data: Vec::new(),
            timeline_issues: Vec::new(),
            document_similarity: Default::default(),
            overall_score: 1.0,
        }
    }

    #[test]
    fn high_score_with_no_risks_is_strong_buy_on_a_fast_track() {
        let memo = build_deal_memo(&analysis(), &score(85.0), &empty_report(), None, &[], &MemoOptions::default());
        assert_eq!(memo.summary.recommendation, dealmemo_core::model::Recommendation::StrongBuy);
        assert_eq!(memo.investment_recommendation.timeline, "2-3 weeks fast track");
    }

    #[test]
    fn growth_potential_is_absent_without_arr() {
        let mut source = analysis();
        source.investment_metrics.revenue.arr = None;
        let memo = build_deal_memo(&source, &score(85.0), &empty_report(), None, &[], &MemoOptions::default());
        assert!(memo.growth_potential.is_none());
    }

    #[test]
    fn benchmark_warnings_flow_into_metadata() {
        let warnings = vec!["benchmark lookup unavailable".to_string()];
        let memo = build_deal_memo(&analysis(), &score(85.0), &empty_report(), None, &warnings, &MemoOptions::default());
        assert!(memo.metadata.warnings.contains(&"benchmark lookup unavailable".to_string()));
    }
}
