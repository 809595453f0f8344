//! Recommendation mapping (spec.md §4.10): first matching rule wins.

use dealmemo_core::model::Recommendation;

/// `allow_hold_tier` resolves spec.md §9 Open Question #2 (HOLD vs PASS):
/// when the pipeline config disables the HOLD tier, scores that would
/// otherwise land on HOLD collapse to PASS.
pub fn recommend(total_score: f64, high_risk_count: usize, allow_hold_tier: bool) -> Recommendation {
    if high_risk_count >= 3 {
        return Recommendation::Pass;
    }
    if total_score >= 80.0 && high_risk_count == 0 {
        return Recommendation::StrongBuy;
    }
    if total_score >= 60.0 && high_risk_count <= 1 {
        return Recommendation::Buy;
    }
    if total_score >= 40.0 {
        return if allow_hold_tier { Recommendation::Hold } else { Recommendation::Pass };
    }
    Recommendation::Pass
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_high_risks_force_pass_regardless_of_score() {
        assert_eq!(recommend(95.0, 3, true), Recommendation::Pass);
    }

    #[test]
    fn high_score_with_no_high_risks_is_strong_buy() {
        assert_eq!(recommend(85.0, 0, true), Recommendation::StrongBuy);
    }

    #[test]
    fn high_score_with_one_high_risk_is_not_strong_buy() {
        assert_eq!(recommend(85.0, 1, true), Recommendation::Buy);
    }

    #[test]
    fn mid_score_is_buy_with_at_most_one_high_risk() {
        assert_eq!(recommend(65.0, 1, true), Recommendation::Buy);
        assert_eq!(recommend(65.0, 2, true), Recommendation::Pass);
    }

    #[test]
    fn low_forties_score_is_hold_when_allowed() {
        assert_eq!(recommend(45.0, 0, true), Recommendation::Hold);
    }

    #[test]
    fn hold_collapses_to_pass_when_disallowed() {
        assert_eq!(recommend(45.0, 0, false), Recommendation::Pass);
    }

    #[test]
    fn sub_forty_score_is_pass() {
        assert_eq!(recommend(20.0, 0, true), Recommendation::Pass);
    }
}
