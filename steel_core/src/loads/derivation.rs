//! Load derivation for simply-supported members
//!
//! Turns a span and uniform line load into design actions:
//!
//! ```text
//! Mf = wL²/8      (kN·m, w in kN/m, L in m)
//! Vf = wL/2       (kN)
//! I_req = 5wL⁴ / (384·E·δ),  δ = L / limit   (mm⁴, w in N/mm, L in mm)
//! ```
//!
//! A kN/m line load is numerically N/mm, so the deflection formulas take the
//! kN/m value directly with lengths in millimetres.

use serde::{Deserialize, Serialize};

use super::combinations::{evaluate_combinations, find_governing_combination, CombinationValue};
use super::{LimitState, LoadCase};
use crate::equations::{
    uniform_load_max_deflection,
    uniform_load_max_moment,
    uniform_load_max_shear,
    uniform_load_required_inertia,
};
use crate::errors::{CalcError, CalcResult};
use crate::materials::E_MPA;
use crate::units::{KiloNewtonsPerMeter, Meters, Millimeters};

/// Factored actions of a simply-supported span under a uniform load
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimplySupportedLoads {
    /// Factored line load (kN/m)
    pub line_load_kn_per_m: f64,
    pub span_mm: f64,
    /// Mf (kN·m)
    pub mf_knm: f64,
    /// Vf (kN)
    pub vf_kn: f64,
}

/// Serviceability gate: minimum strong-axis Ix for a deflection limit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeflectionRequirement {
    /// Specified (SLS) line load (kN/m)
    pub service_load_kn_per_m: f64,
    pub span_mm: f64,
    /// Denominator of L/limit (e.g. 360)
    pub deflection_limit: f64,
    /// L / limit (mm)
    pub allowable_deflection_mm: f64,
    /// Ix needed to meet the allowable deflection (mm⁴)
    pub required_ix_mm4: f64,
}

/// Achieved deflection of one section against a requirement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeflectionCheck {
    pub actual_deflection_mm: f64,
    pub allowable_deflection_mm: f64,
    /// actual / allowable
    pub utilization: f64,
}

/// Every ULS and SLS value plus the governing one of each set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeCombinationResult {
    pub uls: Vec<CombinationValue>,
    pub sls: Vec<CombinationValue>,
    /// `None` when no ULS combination is positive
    pub governing_uls: Option<CombinationValue>,
    /// `None` when no SLS combination is positive
    pub governing_sls: Option<CombinationValue>,
}

fn require_span(span_mm: f64) -> CalcResult<()> {
    if !(span_mm > 0.0) || !span_mm.is_finite() {
        return Err(CalcError::invalid_input("span_mm", span_mm.to_string(), "Span must be positive"));
    }
    Ok(())
}

fn require_line_load(field: &str, w: f64) -> CalcResult<()> {
    if !(w >= 0.0) || !w.is_finite() {
        return Err(CalcError::invalid_input(field, w.to_string(), "Line load must be non-negative"));
    }
    Ok(())
}

/// Mf and Vf for a simply-supported span under a full-length uniform load.
///
/// # Example
/// ```
/// use steel_core::loads::derive_simply_supported_loads;
///
/// let loads = derive_simply_supported_loads(25.0, 6000.0).unwrap();
/// assert!((loads.mf_knm - 112.5).abs() < 1e-9);
/// assert!((loads.vf_kn - 75.0).abs() < 1e-9);
/// ```
pub fn derive_simply_supported_loads(w_kn_per_m: f64, span_mm: f64) -> CalcResult<SimplySupportedLoads> {
    require_line_load("line_load_kn_per_m", w_kn_per_m)?;
    require_span(span_mm)?;

    let span_m = Meters::from(Millimeters(span_mm)).0;
    Ok(SimplySupportedLoads {
        line_load_kn_per_m: w_kn_per_m,
        span_mm,
        mf_knm: uniform_load_max_moment(w_kn_per_m, span_m),
        vf_kn: uniform_load_max_shear(w_kn_per_m, span_m),
    })
}

/// Ix needed to hold midspan deflection to `span / deflection_limit`.
pub fn required_inertia_for_deflection(
    w_sls_kn_per_m: f64,
    span_mm: f64,
    deflection_limit: f64,
) -> CalcResult<DeflectionRequirement> {
    require_line_load("service_load_kn_per_m", w_sls_kn_per_m)?;
    require_span(span_mm)?;
    if !(deflection_limit > 0.0) || !deflection_limit.is_finite() {
        return Err(CalcError::invalid_input(
            "deflection_limit",
            deflection_limit.to_string(),
            "Deflection limit must be positive",
        ));
    }

    let w = KiloNewtonsPerMeter(w_sls_kn_per_m).n_per_mm();
    let allowable = span_mm / deflection_limit;
    Ok(DeflectionRequirement {
        service_load_kn_per_m: w_sls_kn_per_m,
        span_mm,
        deflection_limit,
        allowable_deflection_mm: allowable,
        required_ix_mm4: uniform_load_required_inertia(w, span_mm, E_MPA, allowable),
    })
}

/// Midspan deflection (mm) of a section with strong-axis inertia `ix_mm4`.
pub fn actual_deflection(w_sls_kn_per_m: f64, span_mm: f64, ix_mm4: f64) -> CalcResult<f64> {
    require_line_load("service_load_kn_per_m", w_sls_kn_per_m)?;
    require_span(span_mm)?;
    if !(ix_mm4 > 0.0) {
        return Err(CalcError::invalid_input("ix_mm4", ix_mm4.to_string(), "Moment of inertia must be positive"));
    }

    let w = KiloNewtonsPerMeter(w_sls_kn_per_m).n_per_mm();
    Ok(uniform_load_max_deflection(w, span_mm, E_MPA, ix_mm4))
}

impl DeflectionRequirement {
    /// Whether a section's Ix clears the gate
    pub fn admits(&self, ix_mm4: f64) -> bool {
        ix_mm4 >= self.required_ix_mm4
    }

    /// Achieved deflection for a candidate's Ix.
    ///
    /// Utilization is taken as required Ix / Ix, equal to δ / δ_allow, so a
    /// section admitted by [`admits`](Self::admits) never reports more than 1.
    pub fn check(&self, ix_mm4: f64) -> CalcResult<DeflectionCheck> {
        let actual = actual_deflection(self.service_load_kn_per_m, self.span_mm, ix_mm4)?;
        Ok(DeflectionCheck {
            actual_deflection_mm: actual,
            allowable_deflection_mm: self.allowable_deflection_mm,
            utilization: self.required_ix_mm4 / ix_mm4,
        })
    }
}

/// Evaluate the NBC ULS and SLS sets for a load case.
pub fn derive_code_combinations(case: &LoadCase) -> CalcResult<CodeCombinationResult> {
    case.validate()?;

    let uls = evaluate_combinations(case, &LimitState::Ultimate.combinations());
    let sls = evaluate_combinations(case, &LimitState::Serviceability.combinations());
    let governing_uls = find_governing_combination(&uls);
    let governing_sls = find_governing_combination(&sls);

    tracing::debug!(
        case = %case.label,
        uls = ?governing_uls.as_ref().map(|c| (&c.name, c.value_kn_per_m)),
        sls = ?governing_sls.as_ref().map(|c| (&c.name, c.value_kn_per_m)),
        "code combinations derived"
    );

    Ok(CodeCombinationResult {
        uls,
        sls,
        governing_uls,
        governing_sls,
    })
}
