//! Benchmark capability contract (spec.md §4.9, §6): sector percentile
//! distributions fetched from a provider the pipeline does not own.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dealmemo_core::CoreError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PercentileBand {
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub p90: f64,
}

impl PercentileBand {
    /// Linear-interpolated percentile rank (0-100) of `value` within this
    /// band. Values outside [p25, p90] clamp to the nearest edge.
    pub fn percentile_rank(&self, value: f64) -> i32 {
        let points = [(25.0, self.p25), (50.0, self.p50), (75.0, self.p75), (90.0, self.p90)];

        if value <= points[0].1 {
            return 25;
        }
        if value >= points[3].1 {
            return 90;
        }

        for window in points.windows(2) {
            let (lo_rank, lo_val) = window[0];
            let (hi_rank, hi_val) = window[1];
            if value >= lo_val && value <= hi_val {
                if (hi_val - lo_val).abs() < f64::EPSILON {
                    return lo_rank as i32;
                }
                let fraction = (value - lo_val) / (hi_val - lo_val);
                return (lo_rank + fraction * (hi_rank - lo_rank)).round() as i32;
            }
        }
        50
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorBenchmarks {
    pub sector: String,
    pub sample_size: u32,
    pub metrics: HashMap<String, PercentileBand>,
    pub last_updated: DateTime<Utc>,
}

#[async_trait]
pub trait BenchmarkClient: Send + Sync {
    async fn get_benchmarks(&self, sector: &str) -> Result<SectorBenchmarks, CoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentile_rank_interpolates_within_band() {
        let band = PercentileBand { p25: 100.0, p50: 200.0, p75: 300.0, p90: 400.0 };
        assert_eq!(band.percentile_rank(150.0), 38);
    }

    #[test]
    fn percentile_rank_clamps_below_p25() {
        let band = PercentileBand { p25: 100.0, p50: 200.0, p75: 300.0, p90: 400.0 };
        assert_eq!(band.percentile_rank(10.0), 25);
    }
}
