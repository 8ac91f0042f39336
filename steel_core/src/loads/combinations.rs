//! NBC 2020 Load Combinations
//!
//! Ultimate (ULS) combinations follow Table 4.1.3.2-A: one principal load with
//! its principal factor plus companion loads. Serviceability (SLS)
//! combinations use specified loads with companion factors for deflection.
//!
//! Wind and earthquake are entered as positive magnitudes acting with gravity;
//! uplift is outside this engine's beam design scope.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::load_types::LoadType;
use super::{LimitState, LoadCase};

/// A load combination with factors for each load type
///
/// # Example
/// ```
/// use steel_core::loads::{LimitState, LoadCombination, LoadCase, LoadType};
///
/// let combo = LoadCombination::new("ULS-2a", "1.25D + 1.5L", LimitState::Ultimate)
///     .with_factor(LoadType::Dead, 1.25)
///     .with_factor(LoadType::Live, 1.5);
///
/// let case = LoadCase::new("Floor")
///     .with_load(LoadType::Dead, 4.0)
///     .with_load(LoadType::Live, 6.0);
///
/// assert!((combo.apply(&case) - 14.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadCombination {
    /// Combination identifier (e.g., "ULS-2a", "SLS-1")
    pub name: String,

    /// Human-readable equation (e.g., "1.25D + 1.5L")
    pub equation: String,

    pub limit_state: LimitState,

    /// Load factors keyed by load type
    pub factors: BTreeMap<LoadType, f64>,
}

impl LoadCombination {
    pub fn new(name: impl Into<String>, equation: impl Into<String>, limit_state: LimitState) -> Self {
        LoadCombination {
            name: name.into(),
            equation: equation.into(),
            limit_state,
            factors: BTreeMap::new(),
        }
    }

    /// Add a load factor (builder pattern)
    pub fn with_factor(mut self, load_type: LoadType, factor: f64) -> Self {
        self.factors.insert(load_type, factor);
        self
    }

    /// Total factored line load for a case. Missing loads count as zero.
    pub fn apply(&self, case: &LoadCase) -> f64 {
        self.factors
            .iter()
            .map(|(load_type, factor)| factor * case.get(*load_type))
            .sum()
    }

    /// Factor for a load type (0.0 if absent)
    pub fn get_factor(&self, load_type: LoadType) -> f64 {
        self.factors.get(&load_type).copied().unwrap_or(0.0)
    }
}

/// NBC 2020 Table 4.1.3.2-A ultimate limit state combinations
///
/// ```
/// use steel_core::loads::nbc_uls_combinations;
/// assert_eq!(nbc_uls_combinations().len(), 12);
/// ```
pub fn nbc_uls_combinations() -> Vec<LoadCombination> {
    use LoadType::*;
    let uls = LimitState::Ultimate;
    vec![
        // Case 1: dead load principal
        LoadCombination::new("ULS-1", "1.4D", uls).with_factor(Dead, 1.4),

        // Case 2: live load principal
        LoadCombination::new("ULS-2a", "1.25D + 1.5L", uls)
            .with_factor(Dead, 1.25)
            .with_factor(Live, 1.5),
        LoadCombination::new("ULS-2b", "1.25D + 1.5L + 1.0S", uls)
            .with_factor(Dead, 1.25)
            .with_factor(Live, 1.5)
            .with_factor(Snow, 1.0),
        LoadCombination::new("ULS-2c", "1.25D + 1.5L + 0.4W", uls)
            .with_factor(Dead, 1.25)
            .with_factor(Live, 1.5)
            .with_factor(Wind, 0.4),

        // Case 3: snow load principal
        LoadCombination::new("ULS-3a", "1.25D + 1.5S", uls)
            .with_factor(Dead, 1.25)
            .with_factor(Snow, 1.5),
        LoadCombination::new("ULS-3b", "1.25D + 1.5S + 1.0L", uls)
            .with_factor(Dead, 1.25)
            .with_factor(Snow, 1.5)
            .with_factor(Live, 1.0),
        LoadCombination::new("ULS-3c", "1.25D + 1.5S + 0.4W", uls)
            .with_factor(Dead, 1.25)
            .with_factor(Snow, 1.5)
            .with_factor(Wind, 0.4),

        // Case 4: wind load principal
        LoadCombination::new("ULS-4a", "1.25D + 1.4W", uls)
            .with_factor(Dead, 1.25)
            .with_factor(Wind, 1.4),
        LoadCombination::new("ULS-4b", "1.25D + 1.4W + 0.5L", uls)
            .with_factor(Dead, 1.25)
            .with_factor(Wind, 1.4)
            .with_factor(Live, 0.5),
        LoadCombination::new("ULS-4c", "1.25D + 1.4W + 0.5S", uls)
            .with_factor(Dead, 1.25)
            .with_factor(Wind, 1.4)
            .with_factor(Snow, 0.5),

        // Case 5: earthquake principal
        LoadCombination::new("ULS-5a", "1.0D + 1.0E", uls)
            .with_factor(Dead, 1.0)
            .with_factor(Earthquake, 1.0),
        LoadCombination::new("ULS-5b", "1.0D + 1.0E + 0.5L + 0.25S", uls)
            .with_factor(Dead, 1.0)
            .with_factor(Earthquake, 1.0)
            .with_factor(Live, 0.5)
            .with_factor(Snow, 0.25),
    ]
}

/// Serviceability combinations used for deflection
pub fn nbc_sls_combinations() -> Vec<LoadCombination> {
    use LoadType::*;
    let sls = LimitState::Serviceability;
    vec![
        LoadCombination::new("SLS-1", "1.0D + 1.0L", sls)
            .with_factor(Dead, 1.0)
            .with_factor(Live, 1.0),
        LoadCombination::new("SLS-2", "1.0D + 1.0S", sls)
            .with_factor(Dead, 1.0)
            .with_factor(Snow, 1.0),
        LoadCombination::new("SLS-3", "1.0D + 1.0L + 0.5S", sls)
            .with_factor(Dead, 1.0)
            .with_factor(Live, 1.0)
            .with_factor(Snow, 0.5),
        LoadCombination::new("SLS-4", "1.0D + 0.5L + 1.0S", sls)
            .with_factor(Dead, 1.0)
            .with_factor(Live, 0.5)
            .with_factor(Snow, 1.0),
        LoadCombination::new("SLS-5", "1.0D + 0.75W", sls)
            .with_factor(Dead, 1.0)
            .with_factor(Wind, 0.75),
    ]
}

/// One evaluated combination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinationValue {
    pub name: String,
    pub equation: String,
    /// Factored line load (kN/m)
    pub value_kn_per_m: f64,
}

/// Evaluate every combination against a load case, in order
pub fn evaluate_combinations(case: &LoadCase, combinations: &[LoadCombination]) -> Vec<CombinationValue> {
    combinations
        .iter()
        .map(|combo| CombinationValue {
            name: combo.name.clone(),
            equation: combo.equation.clone(),
            value_kn_per_m: combo.apply(case),
        })
        .collect()
}

/// Largest positive value; the first of equal maxima wins.
///
/// Returns `None` when no combination is positive.
///
/// # Example
/// ```
/// use steel_core::loads::{find_governing_combination, evaluate_combinations, nbc_uls_combinations, LoadCase, LoadType};
///
/// let case = LoadCase::new("Floor")
///     .with_load(LoadType::Dead, 4.0)
///     .with_load(LoadType::Live, 6.0);
/// let values = evaluate_combinations(&case, &nbc_uls_combinations());
/// let governing = find_governing_combination(&values).unwrap();
/// assert_eq!(governing.name, "ULS-2a");
/// ```
pub fn find_governing_combination(values: &[CombinationValue]) -> Option<CombinationValue> {
    let mut governing: Option<&CombinationValue> = None;
    for value in values {
        if !(value.value_kn_per_m > 0.0) {
            continue;
        }
        match governing {
            Some(best) if value.value_kn_per_m <= best.value_kn_per_m => {}
            _ => governing = Some(value),
        }
    }
    governing.cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn governing_for(case: &LoadCase, combos: &[LoadCombination]) -> Option<CombinationValue> {
        find_governing_combination(&evaluate_combinations(case, combos))
    }

    #[test]
    fn test_combination_counts() {
        assert_eq!(nbc_uls_combinations().len(), 12);
        assert_eq!(nbc_sls_combinations().len(), 5);
        assert!(nbc_uls_combinations().iter().all(|c| c.limit_state == LimitState::Ultimate));
        assert!(nbc_sls_combinations().iter().all(|c| c.limit_state == LimitState::Serviceability));
    }

    #[test]
    fn test_dead_only_factor() {
        let combos = nbc_uls_combinations();
        let first = combos.iter().find(|c| c.name == "ULS-1").unwrap();
        assert_eq!(first.get_factor(LoadType::Dead), 1.4);
        assert_eq!(first.get_factor(LoadType::Live), 0.0);
    }

    #[test]
    fn test_live_principal_governs() {
        // 1.25*4 + 1.5*6 = 14.0 > 1.4*4 = 5.6
        let case = LoadCase::new("Floor")
            .with_load(LoadType::Dead, 4.0)
            .with_load(LoadType::Live, 6.0);
        let governing = governing_for(&case, &nbc_uls_combinations()).unwrap();
        assert_eq!(governing.name, "ULS-2a");
        assert!((governing.value_kn_per_m - 14.0).abs() < 1e-9);
    }

    #[test]
    fn test_snow_with_companion_live() {
        // ULS-2b: 5 + 9 + 3 = 17.0, ULS-3b: 5 + 4.5 + 6 = 15.5
        let case = LoadCase::new("Roof")
            .with_load(LoadType::Dead, 4.0)
            .with_load(LoadType::Live, 6.0)
            .with_load(LoadType::Snow, 3.0);
        let governing = governing_for(&case, &nbc_uls_combinations()).unwrap();
        assert_eq!(governing.name, "ULS-2b");
        assert!((governing.value_kn_per_m - 17.0).abs() < 1e-9);
    }

    #[test]
    fn test_first_wins_on_tie() {
        // Dead only: the 1.25D variants tie with each other, 1.4D beats them
        let case = LoadCase::new("Dead").with_load(LoadType::Dead, 10.0);
        let governing = governing_for(&case, &nbc_uls_combinations()).unwrap();
        assert_eq!(governing.name, "ULS-1");

        // SLS with dead only: every combination is 10.0, the first is reported
        let governing = governing_for(&case, &nbc_sls_combinations()).unwrap();
        assert_eq!(governing.name, "SLS-1");
        assert!((governing.value_kn_per_m - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_no_positive_combination() {
        let case = LoadCase::new("Empty");
        assert!(governing_for(&case, &nbc_uls_combinations()).is_none());

        let values = vec![CombinationValue {
            name: "X".to_string(),
            equation: "-1.0W".to_string(),
            value_kn_per_m: -2.0,
        }];
        assert!(find_governing_combination(&values).is_none());
    }

    #[test]
    fn test_sls_with_wind() {
        let case = LoadCase::new("Wall")
            .with_load(LoadType::Dead, 1.0)
            .with_load(LoadType::Wind, 8.0);
        let governing = governing_for(&case, &nbc_sls_combinations()).unwrap();
        assert_eq!(governing.name, "SLS-5");
        assert!((governing.value_kn_per_m - 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_combination_serialization() {
        let combo = LoadCombination::new("ULS-1", "1.4D", LimitState::Ultimate).with_factor(LoadType::Dead, 1.4);
        let json = serde_json::to_string(&combo).unwrap();
        let parsed: LoadCombination = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, combo);
    }
}
