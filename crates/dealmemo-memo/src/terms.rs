//! Check-size and valuation band suggestions (spec.md §4.10).

use dealmemo_core::model::FundingStage;

/// Monotonically non-decreasing in `total_score`, capped at the
/// company's own ask.
pub fn suggest_check_size(total_score: f64, current_ask: Option<f64>) -> Option<f64> {
    let ask = current_ask?;
    let fraction = match total_score {
        s if s >= 80.0 => 1.0,
        s if s >= 60.0 => 0.75,
        s if s >= 40.0 => 0.5,
        _ => 0.25,
    };
    Some(ask * fraction)
}

fn stage_multiple_range(stage: FundingStage) -> (f64, f64) {
    match stage {
        FundingStage::PreSeed => (10.0, 20.0),
        FundingStage::Seed => (8.0, 15.0),
        FundingStage::SeriesA => (6.0, 12.0),
        FundingStage::SeriesB => (5.0, 10.0),
        FundingStage::SeriesC => (4.0, 8.0),
        FundingStage::Growth => (3.0, 6.0),
        FundingStage::Ipo => (2.0, 4.0),
    }
}

/// A (low, high) ARR-multiple band for the company's stated funding stage.
pub fn valuation_cap_band(arr: Option<f64>, stage: Option<FundingStage>) -> Option<(f64, f64)> {
    let arr = arr?;
    let stage = stage?;
    let (low_multiple, high_multiple) = stage_multiple_range(stage);
    Some((arr * low_multiple, arr * high_multiple))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_size_is_capped_at_the_current_ask() {
        assert_eq!(suggest_check_size(90.0, Some(2_000_000.0)), Some(2_000_000.0));
    }

    #[test]
    fn check_size_is_monotonic_in_score() {
        let ask = Some(1_000_000.0);
        let low = suggest_check_size(20.0, ask).unwrap();
        let mid = suggest_check_size(50.0, ask).unwrap();
        let high = suggest_check_size(85.0, ask).unwrap();
        assert!(low <= mid);
        assert!(mid <= high);
    }

    #[test]
    fn no_ask_means_no_suggestion() {
        assert_eq!(suggest_check_size(90.0, None), None);
    }

    #[test]
    fn valuation_band_scales_with_arr_and_stage() {
        let band = valuation_cap_band(Some(2_000_000.0), Some(FundingStage::SeriesA)).unwrap();
        assert_eq!(band, (12_000_000.0, 24_000_000.0));
    }
}
