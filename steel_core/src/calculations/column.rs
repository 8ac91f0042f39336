//! # Column Calculation
//!
//! Factored compressive resistance per CSA S16-19 Clause 13.3.1:
//!
//! ```text
//! Fe = π²E / (KL/r)²
//! λ  = √(Fy / Fe)
//! Cr = φ·A·Fy·(1 + λ^(2n))^(-1/n),  n = 1.34
//! ```
//!
//! The curve is smooth from the yield plateau to the Euler hyperbola, so Cr
//! never increases as KL/r grows.
//!
//! ## Example
//!
//! ```rust
//! use steel_core::calculations::column::{column_resistance, BucklingAxis};
//! use steel_core::sections::SectionCatalog;
//!
//! let catalog = SectionCatalog::builtin().unwrap();
//! let section = catalog.lookup("W250x73").unwrap();
//! let result = column_resistance(section, 350.0, 1.0, 4000.0, BucklingAxis::Weak).unwrap();
//! assert!(result.cr_kn > 0.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::{column_curve_factor, euler_stress};
use crate::errors::{CalcError, CalcResult};
use crate::materials::{COLUMN_EXPONENT_N, E_MPA, PHI};
use crate::sections::SectionRecord;
use crate::units::{KiloNewtons, Newtons};

/// Axis used for the slenderness ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BucklingAxis {
    /// X-X, r = rx
    Strong,
    /// Y-Y, r = ry
    Weak,
    /// Smallest radius of gyration, including r_z of single angles
    #[default]
    Governing,
}

impl BucklingAxis {
    /// Radius of gyration about this axis (mm)
    pub fn radius_of_gyration(&self, section: &SectionRecord) -> f64 {
        match self {
            BucklingAxis::Strong => section.rx_mm,
            BucklingAxis::Weak => section.ry_mm,
            BucklingAxis::Governing => section.r_min(),
        }
    }
}

/// Compression sub-calculation detail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnBucklingResult {
    pub designation: String,
    pub axis: BucklingAxis,
    pub k_factor: f64,
    /// KL (mm)
    pub effective_length_mm: f64,
    /// r used (mm)
    pub radius_of_gyration_mm: f64,
    /// KL/r
    pub slenderness_ratio: f64,
    /// Fe (MPa)
    pub euler_stress_mpa: f64,
    /// λ = √(Fy/Fe)
    pub lambda: f64,
    /// Cr (kN)
    pub cr_kn: f64,
}

/// Factored compressive resistance about the chosen axis.
///
/// # Errors
///
/// * `InvalidInput` for non-positive Fy, K or L
/// * `DataIntegrity` when the radius of gyration is zero
pub fn column_resistance(
    section: &SectionRecord,
    fy_mpa: f64,
    k_factor: f64,
    length_mm: f64,
    axis: BucklingAxis,
) -> CalcResult<ColumnBucklingResult> {
    if !(fy_mpa > 0.0) {
        return Err(CalcError::invalid_input("fy_mpa", fy_mpa.to_string(), "Yield stress must be positive"));
    }
    if !(k_factor > 0.0) || !k_factor.is_finite() {
        return Err(CalcError::invalid_input("k_factor", k_factor.to_string(), "K factor must be positive"));
    }
    if !(length_mm > 0.0) || !length_mm.is_finite() {
        return Err(CalcError::invalid_input("length_mm", length_mm.to_string(), "Length must be positive"));
    }

    let r = axis.radius_of_gyration(section);
    if !(r > 0.0) {
        return Err(CalcError::data_integrity(
            section.family.code(),
            &section.designation,
            "r",
            "Radius of gyration must be positive for a compression member",
        ));
    }

    let kl = k_factor * length_mm;
    let slenderness = kl / r;
    let fe = euler_stress(E_MPA, slenderness);
    let lambda = (fy_mpa / fe).sqrt();
    let cr = PHI * section.area_mm2 * fy_mpa * column_curve_factor(lambda, COLUMN_EXPONENT_N);

    Ok(ColumnBucklingResult {
        designation: section.designation.clone(),
        axis,
        k_factor,
        effective_length_mm: kl,
        radius_of_gyration_mm: r,
        slenderness_ratio: slenderness,
        euler_stress_mpa: fe,
        lambda,
        cr_kn: KiloNewtons::from(Newtons(cr)).0,
    })
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn resistance_never_grows_with_length(
            length in 100.0_f64..20_000.0,
            extra in 0.0_f64..10_000.0,
            fy in 250.0_f64..450.0,
        ) {
            let section = crate::sections::test_support::w310x39();
            let short = column_resistance(&section, fy, 1.0, length, BucklingAxis::Weak).unwrap();
            let long = column_resistance(&section, fy, 1.0, length + extra, BucklingAxis::Weak).unwrap();
            prop_assert!(long.cr_kn <= short.cr_kn * (1.0 + 1e-12));
            prop_assert!(short.cr_kn <= PHI * section.area_mm2 * fy / 1000.0 * (1.0 + 1e-12));
        }
    }
}
