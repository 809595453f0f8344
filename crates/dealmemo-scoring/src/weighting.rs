//! Weighting manager (spec.md §4.9): validates, normalizes, and holds
//! the named profile registry behind the five scoring components.

use crate::error::ScoringError;
use dealmemo_core::model::Weightings;
use dealmemo_core::CoreError;
use std::collections::HashMap;

/// Caller-supplied weights before defaults are filled in. Any field
/// left `None` takes the corresponding field from [`Weightings::default`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PartialWeightings {
    pub market_opportunity: Option<f64>,
    pub team: Option<f64>,
    pub traction: Option<f64>,
    pub product: Option<f64>,
    pub competitive_position: Option<f64>,
}

#[derive(Debug, Clone, Copy)]
pub struct ValidateOptions {
    pub allow_zero_weights: bool,
    pub require_all_weights: bool,
    pub tolerance_percent: f64,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self { allow_zero_weights: false, require_all_weights: true, tolerance_percent: 0.01 }
    }
}

/// Validates `weightings`, returning non-fatal warnings on success.
/// Out-of-range or non-finite fields, or a sum too far from 100, are
/// fatal.
pub fn validate(weightings: &Weightings, options: &ValidateOptions) -> Result<Vec<String>, CoreError> {
    let mut warnings = Vec::new();

    for (name, value) in weightings.as_array() {
        if !value.is_finite() {
            return Err(ScoringError::InvalidWeightings(format!("{name} must be finite, got {value}")).into());
        }
        if !(0.0..=100.0).contains(&value) {
            return Err(ScoringError::InvalidWeightings(format!("{name} must be within [0, 100], got {value}")).into());
        }
        if value == 0.0 {
            if options.require_all_weights && !options.allow_zero_weights {
                return Err(ScoringError::InvalidWeightings(format!(
                    "{name} is zero but allowZeroWeights is false"
                ))
                .into());
            }
            warnings.push(format!("{name} weight is zero"));
        }
    }

    let sum = weightings.sum();
    let tolerance = options.tolerance_percent * 100.0;
    if (sum - 100.0).abs() > tolerance {
        return Err(ScoringError::InvalidWeightings(format!(
            "weightings sum to {sum}, expected 100 within tolerance {tolerance}"
        ))
        .into());
    }

    Ok(warnings)
}

/// Fills missing fields from [`Weightings::default`], then scales the
/// result so it sums to 100. An all-zero input returns the defaults
/// unchanged.
pub fn normalize(partial: &PartialWeightings) -> Weightings {
    let defaults = Weightings::default();
    let filled = Weightings {
        market_opportunity: partial.market_opportunity.unwrap_or(defaults.market_opportunity),
        team: partial.team.unwrap_or(defaults.team),
        traction: partial.traction.unwrap_or(defaults.traction),
        product: partial.product.unwrap_or(defaults.product),
        competitive_position: partial.competitive_position.unwrap_or(defaults.competitive_position),
    };

    let sum = filled.sum();
    if sum == 0.0 {
        return defaults;
    }

    let scale = 100.0 / sum;
    Weightings {
        market_opportunity: filled.market_opportunity * scale,
        team: filled.team * scale,
        traction: filled.traction * scale,
        product: filled.product * scale,
        competitive_position: filled.competitive_position * scale,
    }
}

#[derive(Debug, Clone)]
pub struct WeightingProfile {
    pub name: String,
    pub weightings: Weightings,
    pub protected: bool,
}

/// Named weighting-profile registry with a protected, non-deletable
/// `"default"` entry.
pub struct WeightingManager {
    profiles: HashMap<String, WeightingProfile>,
}

impl Default for WeightingManager {
    fn default() -> Self {
        let mut profiles = HashMap::new();
        profiles.insert(
            "default".to_string(),
            WeightingProfile { name: "default".to_string(), weightings: Weightings::default(), protected: true },
        );
        Self { profiles }
    }
}

impl WeightingManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&WeightingProfile> {
        self.profiles.get(name)
    }

    pub fn register(&mut self, name: &str, weightings: Weightings) -> Result<(), CoreError> {
        if self.profiles.get(name).is_some_and(|p| p.protected) {
            return Err(ScoringError::ProtectedProfile(name.to_string()).into());
        }
        self.profiles
            .insert(name.to_string(), WeightingProfile { name: name.to_string(), weightings, protected: false });
        Ok(())
    }

    pub fn delete(&mut self, name: &str) -> Result<(), CoreError> {
        match self.profiles.get(name) {
            Some(profile) if profile.protected => Err(ScoringError::ProtectedProfile(name.to_string()).into()),
            Some(_) => {
                self.profiles.remove(name);
                Ok(())
            }
            None => Err(ScoringError::UnknownProfile(name.to_string()).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_fills_missing_fields_from_defaults() {
        let partial = PartialWeightings { market_opportunity: Some(50.0), ..Default::default() };
        let normalized = normalize(&partial);
        assert!((normalized.sum() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn normalize_all_zero_returns_defaults() {
        let partial = PartialWeightings {
            market_opportunity: Some(0.0),
            team: Some(0.0),
            traction: Some(0.0),
            product: Some(0.0),
            competitive_position: Some(0.0),
        };
        assert_eq!(normalize(&partial), Weightings::default());
    }

    #[test]
    fn zero_weight_profile_is_valid_with_allow_zero_weights() {
        let weightings = Weightings { market_opportunity: 100.0, team: 0.0, traction: 0.0, product: 0.0, competitive_position: 0.0 };
        let options = ValidateOptions { allow_zero_weights: true, ..ValidateOptions::default() };
        let warnings = validate(&weightings, &options).unwrap();
        assert_eq!(warnings.len(), 4);
    }

    #[test]
    fn zero_weight_without_allow_zero_weights_is_an_error() {
        let weightings = Weightings { market_opportunity: 100.0, team: 0.0, traction: 0.0, product: 0.0, competitive_position: 0.0 };
        assert!(validate(&weightings, &ValidateOptions::default()).is_err());
    }

    #[test]
    fn sum_within_tolerance_is_valid() {
        let weightings =
            Weightings { market_opportunity: 19.999, team: 20.0, traction: 20.0, product: 20.0, competitive_position: 20.0 };
        let options = ValidateOptions { tolerance_percent: 0.01, ..ValidateOptions::default() };
        assert!(validate(&weightings, &options).is_ok());
    }

    #[test]
    fn default_profile_cannot_be_overwritten_or_deleted() {
        let mut manager = WeightingManager::new();
        assert!(manager.register("default", Weightings::default()).is_err());
        assert!(manager.delete("default").is_err());
    }

    #[test]
    fn custom_profiles_register_and_delete() {
        let mut manager = WeightingManager::new();
        manager.register("aggressive-growth", Weightings::default()).unwrap();
        assert!(manager.get("aggressive-growth").is_some());
        manager.delete("aggressive-growth").unwrap();
        assert!(manager.get("aggressive-growth").is_none());
    }

    proptest::proptest! {
        #[test]
        fn normalize_always_sums_to_100_or_is_the_default(
            market_opportunity in 0.0f64..100.0,
            team in 0.0f64..100.0,
            traction in 0.0f64..100.0,
            product in 0.0f64..100.0,
            competitive_position in 0.0f64..100.0,
        ) {
            let partial = PartialWeightings {
                market_opportunity: Some(market_opportunity),
                team: Some(team),
                traction: Some(traction),
                product: Some(product),
                competitive_position: Some(competitive_position),
            };
            let normalized = normalize(&partial);
            let sum = normalized.sum();
            proptest::prop_assert!((sum - 100.0).abs() < 1e-6 || normalized == Weightings::default());
        }

        #[test]
        fn normalize_is_idempotent_on_its_own_output(
            market_opportunity in 1.0f64..100.0,
            team in 1.0f64..100.0,
            traction in 1.0f64..100.0,
            product in 1.0f64..100.0,
            competitive_position in 1.0f64..100.0,
        ) {
            let partial = PartialWeightings {
                market_opportunity: Some(market_opportunity),
                team: Some(team),
                traction: Some(traction),
                product: Some(product),
                competitive_position: Some(competitive_position),
            };
            let once = normalize(&partial);
            let twice = normalize(&PartialWeightings {
                market_opportunity: Some(once.market_opportunity),
                team: Some(once.team),
                traction: Some(once.traction),
                product: Some(once.product),
                competitive_position: Some(once.competitive_position),
            });
            proptest::prop_assert!((once.market_opportunity - twice.market_opportunity).abs() < 1e-6);
            proptest::prop_assert!((once.team - twice.team).abs() < 1e-6);
            proptest::prop_assert!((once.traction - twice.traction).abs() < 1e-6);
            proptest::prop_assert!((once.product - twice.product).abs() < 1e-6);
            proptest::prop_assert!((once.competitive_position - twice.competitive_position).abs() < 1e-6);
        }

        #[test]
        fn a_normalized_profile_always_validates(
            market_opportunity in 1.0f64..100.0,
            team in 1.0f64..100.0,
            traction in 1.0f64..100.0,
            product in 1.0f64..100.0,
            competitive_position in 1.0f64..100.0,
        ) {
            let normalized = normalize(&PartialWeightings {
                market_opportunity: Some(market_opportunity),
                team: Some(team),
                traction: Some(traction),
                product: Some(product),
                competitive_position: Some(competitive_position),
            });
            proptest::prop_assert!(validate(&normalized, &ValidateOptions::default()).is_ok());
        }
    }
}
