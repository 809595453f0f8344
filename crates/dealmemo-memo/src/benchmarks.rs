//! Key-benchmark comparisons for the memo summary (spec.md §4.10): the
//! handful of headline metrics the company can be placed against the
//! sector for.

use dealmemo_benchmarks::SectorBenchmarks;
use dealmemo_core::model::{AnalysisResult, BenchmarkComparison};

const HEADLINE_METRICS: &[&str] = &["arr", "mrr", "customers", "churnRate", "tam"];

fn metric_value(analysis: &AnalysisResult, metric: &str) -> Option<f64> {
    match metric {
        "arr" => analysis.investment_metrics.revenue.arr,
        "mrr" => analysis.investment_metrics.revenue.mrr,
        "customers" => analysis.investment_metrics.traction.customers,
        "churnRate" => analysis.investment_metrics.traction.churn_rate,
        "tam" => analysis.market_claims.tam,
        _ => None,
    }
}

pub fn build_benchmark_comparisons(
    analysis: &AnalysisResult,
    benchmarks: Option<&SectorBenchmarks>,
) -> Vec<BenchmarkComparison> {
    let Some(benchmarks) = benchmarks else { return Vec::new() };

    HEADLINE_METRICS
        .iter()
        .filter_map(|&metric| {
            let value = metric_value(analysis, metric)?;
            let band = benchmarks.metrics.get(metric)?;
            Some(BenchmarkComparison {
                metric_name: metric.to_string(),
                company_value: value,
                sector_p50: band.p50,
                percentile_rank: band.percentile_rank(value),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use dealmemo_benchmarks::PercentileBand;
    use dealmemo_core::model::RevenueMetrics;
    use std::collections::HashMap;

    fn analysis_with_arr(arr: f64) -> AnalysisResult {
        let mut analysis = AnalysisResult {
            company_profile: Default::default(),
            investment_metrics: Default::default(),
            market_claims: Default::default(),
            team_assessment: Default::default(),
            product_profile: Default::default(),
            competitive_analysis: Default::default(),
            entities: Vec::new(),
            analysis_type: dealmemo_core::model::AnalysisType::Full,
            confidence: 0.8,
            processing_time: Default::default(),
            source_document_ids: vec!["doc1".to_string()],
            consistency_flags: Vec::new(),
            warnings: Vec::new(),
        };
        analysis.investment_metrics.revenue = RevenueMetrics { arr: Some(arr), ..Default::default() };
        analysis
    }

    #[test]
    fn no_benchmarks_means_no_comparisons() {
        assert!(build_benchmark_comparisons(&analysis_with_arr(1.0), None).is_empty());
    }

    #[test]
    fn metrics_present_in_both_analysis_and_benchmarks_are_compared() {
        let mut metrics = HashMap::new();
        metrics.insert("arr".to_string(), PercentileBand { p25: 1.0, p50: 2_000_000.0, p75: 3.0, p90: 4.0 });
        let benchmarks =
            SectorBenchmarks { sector: "saas".to_string(), sample_size: 100, metrics, last_updated: Utc::now() };

        let comparisons = build_benchmark_comparisons(&analysis_with_arr(2_000_000.0), Some(&benchmarks));
        assert_eq!(comparisons.len(), 1);
        assert_eq!(comparisons[0].metric_name, "arr");
    }
}
