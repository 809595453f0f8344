//! Scoring strategy (spec.md §9 Open Question #1): the five raw
//! component formulas are externalized behind a trait so a different
//! implementation can be swapped in without touching the calculator.
//! [`DefaultScoringStrategy`] is the reference implementation whose
//! outputs the test suite treats as golden.

use dealmemo_benchmarks::SectorBenchmarks;
use dealmemo_core::model::{CompetitiveAnalysis, InvestmentMetrics, MarketClaims, ProductProfile, TeamAssessment};

pub trait ScoringStrategy: Send + Sync {
    fn market_opportunity(&self, market_claims: &MarketClaims, benchmarks: Option<&SectorBenchmarks>) -> f64;
    fn team(&self, team_assessment: &TeamAssessment) -> f64;
    fn traction(&self, investment_metrics: &InvestmentMetrics, benchmarks: Option<&SectorBenchmarks>) -> f64;
    fn product(&self, product_profile: &ProductProfile) -> f64;
    fn competitive_position(&self, competitive_analysis: &CompetitiveAnalysis) -> f64;
}

pub struct DefaultScoringStrategy;

impl ScoringStrategy for DefaultScoringStrategy {
    fn market_opportunity(&self, market_claims: &MarketClaims, benchmarks: Option<&SectorBenchmarks>) -> f64 {
        let tam_score = market_claims.tam.map(|tam| (tam / 1_000_000_000.0).min(10.0) * 6.0).unwrap_or(0.0);
        let growth_score = market_claims.market_growth_rate.map(|g| g.max(0.0).min(50.0) * 0.4).unwrap_or(0.0);
        let benchmark_score = market_claims
            .tam
            .zip(benchmarks.and_then(|b| b.metrics.get("tam")))
            .map(|(tam, band)| band.percentile_rank(tam) as f64 * 0.2)
            .unwrap_or(0.0);
        (tam_score + growth_score + benchmark_score).clamp(0.0, 100.0)
    }

    fn team(&self, team_assessment: &TeamAssessment) -> f64 {
        let expertise_score = team_assessment.domain_expertise_years.unwrap_or(0.0).max(0.0).min(20.0) * 2.0;
        let exits_score = team_assessment.prior_exits.unwrap_or(0) as f64 * 15.0;
        let founders_score = (team_assessment.founders.len() as f64).min(4.0) * 5.0;
        let advisors_score = (team_assessment.notable_advisors.len() as f64).min(2.0) * 5.0;
        (expertise_score + exits_score + founders_score + advisors_score).clamp(0.0, 100.0)
    }

    fn traction(&self, investment_metrics: &InvestmentMetrics, benchmarks: Option<&SectorBenchmarks>) -> f64 {
        let revenue = &investment_metrics.revenue;
        let traction = &investment_metrics.traction;

        let arr_score = revenue
            .arr
            .map(|arr| {
                let rank = benchmarks.and_then(|b| b.metrics.get("arr")).map(|band| band.percentile_rank(arr) as f64).unwrap_or(50.0);
                rank * 0.4
            })
            .unwrap_or(0.0);
        let growth_score = revenue.growth_rate.map(|g| g.max(0.0).min(100.0) * 0.2).unwrap_or(0.0);
        let customers_score = traction.customers.map(|c| (c / 10.0).min(20.0)).unwrap_or(0.0);
        let nps_score = traction.nps.map(|nps| ((nps + 100.0) / 200.0) * 10.0).unwrap_or(0.0);
        let churn_score = traction.churn_rate.map(|churn| (10.0 - churn.clamp(0.0, 10.0))).unwrap_or(0.0);

        (arr_score + growth_score + customers_score + nps_score + churn_score).clamp(0.0, 100.0)
    }

    fn product(&self, product_profile: &ProductProfile) -> f64 {
        let features_score = (product_profile.key_features.len() as f64).min(6.0) * 10.0;
        let differentiation_score = if product_profile.differentiation.is_some() { 20.0 } else { 0.0 };
        let moat_score = if product_profile.technical_moat.is_some() { 20.0 } else { 0.0 };
        (features_score + differentiation_score + moat_score).clamp(0.0, 100.0)
    }

    fn competitive_position(&self, competitive_analysis: &CompetitiveAnalysis) -> f64 {
        let mut score = 0.0;
        if competitive_analysis.competitive_advantage.is_some() {
            score += 40.0;
        }
        if competitive_analysis.market_position.is_some() {
            score += 30.0;
        }
        if !competitive_analysis.direct_competitors.is_empty() || !competitive_analysis.indirect_competitors.is_empty() {
            score += 30.0 - (competitive_analysis.direct_competitors.len() as f64).min(5.0) * 2.0;
        }
        score.clamp(0.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_inputs_contribute_zero_to_every_component() {
        let strategy = DefaultScoringStrategy;
        assert_eq!(strategy.market_opportunity(&MarketClaims::default(), None), 0.0);
        assert_eq!(strategy.team(&TeamAssessment::default()), 0.0);
        assert_eq!(strategy.traction(&InvestmentMetrics::default(), None), 0.0);
        assert_eq!(strategy.product(&ProductProfile::default()), 0.0);
        assert_eq!(strategy.competitive_position(&CompetitiveAnalysis::default()), 0.0);
    }

    #[test]
    fn rich_market_claims_score_above_zero() {
        let strategy = DefaultScoringStrategy;
        let claims = MarketClaims { tam: Some(50_000_000_000.0), market_growth_rate: Some(20.0), ..Default::default() };
        assert!(strategy.market_opportunity(&claims, None) > 0.0);
    }
}
