//! Revenue projection (spec.md §4.10): compounds the observed growth
//! rate forward, decaying it toward the sector median each year.

use dealmemo_core::model::GrowthPotential;

fn decay(rate: f64, sector_median_growth: Option<f64>) -> f64 {
    let decayed = rate * 0.8;
    match sector_median_growth {
        Some(median) => decayed.max(median),
        None => decayed,
    }
}

/// `growth_rate_percent` and `sector_median_growth_percent` are
/// percentages (e.g. `15.0` for 15%), matching [`dealmemo_core::model::RevenueMetrics::growth_rate`].
pub fn project_growth(
    current_arr: f64,
    growth_rate_percent: f64,
    sector_median_growth_percent: Option<f64>,
) -> GrowthPotential {
    let growth = growth_rate_percent / 100.0;
    let sector_median = sector_median_growth_percent.map(|p| p / 100.0);

    let year1_projection = current_arr * (1.0 + growth);

    let growth_year2 = decay(growth, sector_median);
    let year3_projection = year1_projection * (1.0 + growth_year2).powi(2);

    let growth_year4 = decay(growth_year2, sector_median);
    let year5_projection = year3_projection * (1.0 + growth_year4);

    GrowthPotential { current_arr, year1_projection, year3_projection, year5_projection }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_arr_projects_to_zero() {
        let projection = project_growth(0.0, 0.0, None);
        assert_eq!(projection.year1_projection, 0.0);
        assert_eq!(projection.year3_projection, 0.0);
        assert_eq!(projection.year5_projection, 0.0);
    }

    #[test]
    fn positive_growth_compounds_forward() {
        let projection = project_growth(1_000_000.0, 20.0, None);
        assert!(projection.year1_projection > 1_000_000.0);
        assert!(projection.year3_projection > projection.year1_projection);
        assert!(projection.year5_projection > projection.year3_projection);
    }

    #[test]
    fn sector_median_floors_the_decayed_growth_rate() {
        let without_floor = project_growth(1_000_000.0, 5.0, None);
        let with_floor = project_growth(1_000_000.0, 5.0, Some(40.0));
        assert!(with_floor.year3_projection > without_floor.year3_projection);
    }
}
