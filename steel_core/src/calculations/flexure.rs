//! # Flexural Resistance
//!
//! Factored moment resistance per CSA S16-19 Clause 13.5 (laterally supported)
//! and Clause 13.6 (laterally unsupported).
//!
//! ## Laterally supported
//!
//! ```text
//! Mr = φ·Z·Fy   (class 1, 2)
//! Mr = φ·S·Fy   (class 3, 4)
//! ```
//!
//! ## Laterally unsupported (class 1, 2 only)
//!
//! ```text
//! Mp = Z·Fy
//! Mu = (ω₂π / L)·√(E·Iy·G·J + (πE/L)²·Iy·Cw)
//!
//! Mu > 0.67·Mp:  Mr = min(1.15·φ·Mp·(1 − 0.28·Mp/Mu), φ·Mp)
//! Mu ≤ 0.67·Mp:  Mr = φ·Mu
//! ```
//!
//! Section properties arrive in mm/mm³/mm⁴/mm⁶, so every product is in N·mm
//! and is converted to kN·m only when the result is built.

use serde::{Deserialize, Serialize};

use super::classification::{classify, SectionClass};
use crate::equations::elastic_ltb_moment;
use crate::errors::{CalcError, CalcResult};
use crate::materials::{E_MPA, G_MPA, PHI};
use crate::sections::SectionRecord;
use crate::units::{KiloNewtonMeters, NewtonMillimeters};

/// Inelastic/elastic regime boundary as a fraction of Mp
const INELASTIC_THRESHOLD: f64 = 0.67;

/// Largest moment gradient coefficient accepted
pub const MAX_OMEGA2: f64 = 2.5;

/// Bending axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BendingAxis {
    Strong,
    Weak,
}

/// Section modulus used for the resistance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModulusKind {
    Plastic,
    Elastic,
}

/// Laterally supported moment resistance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MomentResistance {
    pub designation: String,
    pub axis: BendingAxis,
    pub class: SectionClass,
    pub modulus: ModulusKind,
    /// Modulus value used (mm³)
    pub modulus_mm3: f64,
    /// Factored moment resistance Mr (kN·m)
    pub mr_knm: f64,
}

/// Governing regime of a laterally unsupported member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LtbCase {
    /// φ·Mp cap binds
    Yielding,
    InelasticLtb,
    ElasticLtb,
}

impl std::fmt::Display for LtbCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LtbCase::Yielding => "yielding",
            LtbCase::InelasticLtb => "inelastic_ltb",
            LtbCase::ElasticLtb => "elastic_ltb",
        };
        write!(f, "{}", s)
    }
}

/// Lateral-torsional buckling result, with the inputs used
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LateralTorsionalBucklingResult {
    pub designation: String,
    pub unbraced_length_mm: f64,
    pub omega2: f64,
    /// Critical elastic moment Mu (kN·m)
    pub mu_knm: f64,
    /// Plastic moment Mp = Z·Fy (kN·m)
    pub mp_knm: f64,
    /// Factored moment resistance Mr (kN·m)
    pub mr_knm: f64,
    pub case: LtbCase,
}

fn to_knm(moment_nmm: f64) -> f64 {
    KiloNewtonMeters::from(NewtonMillimeters(moment_nmm)).0
}

fn resistance_about(section: &SectionRecord, fy_mpa: f64, axis: BendingAxis) -> CalcResult<MomentResistance> {
    let classification = classify(section, fy_mpa)?;
    let class = classification.overall;

    let (plastic, elastic) = match axis {
        BendingAxis::Strong => (section.zx_mm3, section.sx_mm3),
        BendingAxis::Weak => (section.zy_mm3, section.sy_mm3),
    };
    let (modulus, modulus_mm3) = if class.is_plastic() {
        (ModulusKind::Plastic, plastic)
    } else {
        (ModulusKind::Elastic, elastic)
    };

    Ok(MomentResistance {
        designation: section.designation.clone(),
        axis,
        class,
        modulus,
        modulus_mm3,
        mr_knm: to_knm(PHI * modulus_mm3 * fy_mpa),
    })
}

/// Strong-axis moment resistance with continuous lateral support.
///
/// Class 4 sections use S, the same as class 3.
///
/// # Errors
///
/// Propagates classification errors (`InvalidInput` Fy, `UnsupportedSection`
/// for angles and tees).
pub fn moment_resistance(section: &SectionRecord, fy_mpa: f64) -> CalcResult<MomentResistance> {
    resistance_about(section, fy_mpa, BendingAxis::Strong)
}

/// Weak-axis moment resistance, Zy or Sy by class.
pub fn weak_axis_moment_resistance(section: &SectionRecord, fy_mpa: f64) -> CalcResult<MomentResistance> {
    resistance_about(section, fy_mpa, BendingAxis::Weak)
}

/// Factored resistance from Mp and Mu (both N·mm) and the regime that governs.
pub fn unsupported_moment_resistance(mp: f64, mu: f64) -> (f64, LtbCase) {
    if mu > INELASTIC_THRESHOLD * mp {
        let cap = PHI * mp;
        let inelastic = 1.15 * PHI * mp * (1.0 - 0.28 * mp / mu);
        if inelastic >= cap {
            (cap, LtbCase::Yielding)
        } else {
            (inelastic, LtbCase::InelasticLtb)
        }
    } else {
        (PHI * mu, LtbCase::ElasticLtb)
    }
}

/// Moment resistance of a class 1 or 2 member with an unbraced compression flange.
///
/// # Errors
///
/// * `InvalidInput` for a non-positive length or ω₂ outside (0, 2.5]
/// * `UnsupportedSection` for class 3 or 4 sections, angles and tees
pub fn lateral_torsional_buckling(
    section: &SectionRecord,
    fy_mpa: f64,
    unbraced_length_mm: f64,
    omega2: f64,
) -> CalcResult<LateralTorsionalBucklingResult> {
    if !(unbraced_length_mm > 0.0) || !unbraced_length_mm.is_finite() {
        return Err(CalcError::invalid_input(
            "unbraced_length_mm",
            unbraced_length_mm.to_string(),
            "Unbraced length must be positive",
        ));
    }
    if !(omega2 > 0.0 && omega2 <= MAX_OMEGA2) {
        return Err(CalcError::invalid_input(
            "omega2",
            omega2.to_string(),
            format!("Moment gradient coefficient must be in (0, {}]", MAX_OMEGA2),
        ));
    }

    let classification = classify(section, fy_mpa)?;
    if !classification.overall.is_plastic() {
        return Err(CalcError::unsupported_section(
            &section.designation,
            "lateral-torsional buckling",
            format!("{} section with an unbraced compression flange", classification.overall),
        ));
    }

    let mp = section.zx_mm3 * fy_mpa;
    let mu = elastic_ltb_moment(
        omega2,
        unbraced_length_mm,
        E_MPA,
        G_MPA,
        section.iy_mm4,
        section.j_mm4,
        section.cw_mm6,
    );
    let (mr, case) = unsupported_moment_resistance(mp, mu);

    Ok(LateralTorsionalBucklingResult {
        designation: section.designation.clone(),
        unbraced_length_mm,
        omega2,
        mu_knm: to_knm(mu),
        mp_knm: to_knm(mp),
        mr_knm: to_knm(mr),
        case,
    })
}
