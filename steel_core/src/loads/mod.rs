//! Loads, NBC 2020 combinations and load derivation
//!
//! # Overview
//!
//! - [`LoadType`] - Specified load categories (D, L, S, W, E)
//! - [`LoadCase`] - Unfactored uniform line loads for one member
//! - [`LoadCombination`] - Factors for a code combination
//! - [`derivation`] - Mf/Vf from a uniform load, deflection requirement,
//!   governing code combinations
//!
//! # Example
//!
//! ```
//! use steel_core::loads::{derive_code_combinations, LoadCase, LoadType};
//!
//! let case = LoadCase::new("Floor beam")
//!     .with_load(LoadType::Dead, 4.0)   // kN/m
//!     .with_load(LoadType::Live, 6.0);  // kN/m
//!
//! let result = derive_code_combinations(&case).unwrap();
//! let uls = result.governing_uls.unwrap();
//! assert_eq!(uls.equation, "1.25D + 1.5L");
//! ```

pub mod combinations;
pub mod derivation;
pub mod load_types;

pub use combinations::{
    evaluate_combinations,
    find_governing_combination,
    nbc_sls_combinations,
    nbc_uls_combinations,
    CombinationValue,
    LoadCombination,
};
pub use derivation::{
    actual_deflection,
    derive_code_combinations,
    derive_simply_supported_loads,
    required_inertia_for_deflection,
    CodeCombinationResult,
    DeflectionCheck,
    DeflectionRequirement,
    SimplySupportedLoads,
};
pub use load_types::LoadType;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::errors::{CalcError, CalcResult};

/// Limit state a combination belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LimitState {
    /// Strength (factored loads)
    Ultimate,
    /// Deflection (specified loads)
    Serviceability,
}

impl LimitState {
    pub fn code(&self) -> &'static str {
        match self {
            LimitState::Ultimate => "ULS",
            LimitState::Serviceability => "SLS",
        }
    }

    /// The NBC combination set for this limit state
    pub fn combinations(&self) -> Vec<LoadCombination> {
        match self {
            LimitState::Ultimate => nbc_uls_combinations(),
            LimitState::Serviceability => nbc_sls_combinations(),
        }
    }
}

impl std::fmt::Display for LimitState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Unfactored uniform line loads (kN/m) by type
///
/// # Example
/// ```
/// use steel_core::loads::{LoadCase, LoadType};
///
/// let case = LoadCase::new("Roof")
///     .with_load(LoadType::Dead, 3.0)
///     .with_load(LoadType::Snow, 5.0);
///
/// assert_eq!(case.get(LoadType::Snow), 5.0);
/// assert_eq!(case.get(LoadType::Live), 0.0);
/// ```
///
/// # JSON Format
/// ```json
/// {
///   "label": "Roof",
///   "loads": { "Dead": 3.0, "Snow": 5.0 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadCase {
    pub label: String,

    /// Line loads keyed by type (kN/m)
    #[serde(default)]
    pub loads: BTreeMap<LoadType, f64>,
}

impl LoadCase {
    pub fn new(label: impl Into<String>) -> Self {
        LoadCase {
            label: label.into(),
            loads: BTreeMap::new(),
        }
    }

    /// Add or update a load value (builder pattern)
    pub fn with_load(mut self, load_type: LoadType, value: f64) -> Self {
        self.loads.insert(load_type, value);
        self
    }

    /// Load value for a type, 0.0 if not set
    pub fn get(&self, load_type: LoadType) -> f64 {
        self.loads.get(&load_type).copied().unwrap_or(0.0)
    }

    /// All values finite; gravity loads non-negative.
    pub fn validate(&self) -> CalcResult<()> {
        for (load_type, value) in &self.loads {
            let field = format!("load_{}", load_type.code());
            if !value.is_finite() {
                return Err(CalcError::invalid_input(field, value.to_string(), "Load must be finite"));
            }
            if load_type.is_gravity() && *value < 0.0 {
                return Err(CalcError::invalid_input(
                    field,
                    value.to_string(),
                    format!("{} cannot be negative", load_type.description()),
                ));
            }
        }
        Ok(())
    }
}

impl Default for LoadCase {
    fn default() -> Self {
        LoadCase::new("Unnamed")
    }
}
