//! Diligence timeline estimate (spec.md §4.10).

use dealmemo_core::model::Recommendation;

pub fn suggest_timeline(recommendation: Recommendation, high_risk_count: usize) -> String {
    if recommendation == Recommendation::StrongBuy && high_risk_count == 0 {
        "2-3 weeks fast track".to_string()
    } else if high_risk_count >= 1 {
        "6-8 weeks extended".to_string()
    } else {
        "4-5 weeks standard".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strong_buy_with_no_high_risks_is_fast_track() {
        assert_eq!(suggest_timeline(Recommendation::StrongBuy, 0), "2-3 weeks fast track");
    }

    #[test]
    fn any_high_risk_extends_the_timeline() {
        assert_eq!(suggest_timeline(Recommendation::Buy, 1), "6-8 weeks extended");
    }

    #[test]
    fn otherwise_standard() {
        assert_eq!(suggest_timeline(Recommendation::Hold, 0), "4-5 weeks standard");
    }
}
