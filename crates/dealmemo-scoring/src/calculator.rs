//! Score calculator (spec.md §4.9): weights the five raw components
//! and assembles the [`ScoreBreakdown`] the memo's summary is derived
//! from.

use crate::strategy::ScoringStrategy;
use dealmemo_benchmarks::SectorBenchmarks;
use dealmemo_core::model::{AnalysisResult, RawComponents, ScoreBreakdown, Weightings};

pub struct ScoreCalculator<S: ScoringStrategy> {
    strategy: S,
}

impl<S: ScoringStrategy> ScoreCalculator<S> {
    pub fn new(strategy: S) -> Self {
        Self { strategy }
    }

    /// `benchmarks` is `None` when the benchmark lookup degraded; in
    /// that case confidence is penalized to 0.7 per spec.md §4.9.
    pub fn calculate(
        &self,
        analysis: &AnalysisResult,
        benchmarks: Option<&SectorBenchmarks>,
        weightings: &Weightings,
    ) -> ScoreBreakdown {
        let raw = RawComponents {
            market_opportunity: self.strategy.market_opportunity(&analysis.market_claims, benchmarks),
            team: self.strategy.team(&analysis.team_assessment),
            traction: self.strategy.traction(&analysis.investment_metrics, benchmarks),
            product: self.strategy.product(&analysis.product_profile),
            competitive_position: self.strategy.competitive_position(&analysis.competitive_analysis),
        };

        let weighted = RawComponents {
            market_opportunity: raw.market_opportunity * weightings.market_opportunity / 100.0,
            team: raw.team * weightings.team / 100.0,
            traction: raw.traction * weightings.traction / 100.0,
            product: raw.product * weightings.product / 100.0,
            competitive_position: raw.competitive_position * weightings.competitive_position / 100.0,
        };

        let total_score = weighted.market_opportunity
            + weighted.team
            + weighted.traction
            + weighted.product
            + weighted.competitive_position;

        let benchmark_availability = if benchmarks.is_some() { 1.0 } else { 0.7 };
        let confidence = (analysis.confidence + benchmark_availability) / 2.0;

        ScoreBreakdown {
            raw_components: raw,
            weighted_components: weighted,
            total_score: round_to_one_decimal(total_score.clamp(0.0, 100.0)),
            weightings: *weightings,
            confidence,
            methodology: "deterministic-v1".to_string(),
        }
    }
}

fn round_to_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
