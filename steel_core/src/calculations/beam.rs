//! # Beam Check
//!
//! Checks one section against factored moment and shear, with optional
//! lateral-torsional buckling and a deflection requirement. The optimal-section
//! search runs this check on every candidate.
//!
//! ## Example
//!
//! ```rust
//! use steel_core::calculations::beam::{check_beam, BeamCheckInput, LateralSupport};
//! use steel_core::materials::SteelGrade;
//! use steel_core::sections::SectionCatalog;
//!
//! let catalog = SectionCatalog::builtin().unwrap();
//! let section = catalog.lookup("W460x74").unwrap();
//!
//! let input = BeamCheckInput {
//!     factored_moment_knm: 250.0,
//!     factored_shear_kn: 120.0,
//!     grade: SteelGrade::G350W,
//!     lateral_support: LateralSupport::Continuous,
//! };
//!
//! let result = check_beam(section, &input, None).unwrap();
//! println!("Mr = {:.1} kN·m, governs: {}", result.moment_resistance_knm, result.governing_condition());
//! assert!(result.passes());
//! ```

use serde::{Deserialize, Serialize};

use super::classification::{classify, SectionClassification};
use super::flexure::{lateral_torsional_buckling, moment_resistance, LateralTorsionalBucklingResult, MAX_OMEGA2};
use super::shear::shear_resistance;
use crate::errors::{CalcError, CalcResult};
use crate::loads::{DeflectionCheck, DeflectionRequirement};
use crate::materials::SteelGrade;
use crate::sections::SectionRecord;

/// Lateral restraint of the compression flange
///
/// ## JSON
///
/// ```json
/// { "mode": "unsupported", "unbraced_length_mm": 4000.0, "omega2": 1.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum LateralSupport {
    #[default]
    Continuous,
    Unsupported {
        unbraced_length_mm: f64,
        /// Moment gradient coefficient ω₂ (1.0 for uniform moment)
        omega2: f64,
    },
}

/// Design actions for a single beam check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamCheckInput {
    /// Mf (kN·m)
    pub factored_moment_knm: f64,
    /// Vf (kN)
    pub factored_shear_kn: f64,
    #[serde(default)]
    pub grade: SteelGrade,
    #[serde(default)]
    pub lateral_support: LateralSupport,
}

impl BeamCheckInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if !(self.factored_moment_knm >= 0.0) || !self.factored_moment_knm.is_finite() {
            return Err(CalcError::invalid_input(
                "factored_moment_knm",
                self.factored_moment_knm.to_string(),
                "Factored moment must be non-negative",
            ));
        }
        if !(self.factored_shear_kn >= 0.0) || !self.factored_shear_kn.is_finite() {
            return Err(CalcError::invalid_input(
                "factored_shear_kn",
                self.factored_shear_kn.to_string(),
                "Factored shear must be non-negative",
            ));
        }
        if let LateralSupport::Unsupported { unbraced_length_mm, omega2 } = self.lateral_support {
            if !(unbraced_length_mm > 0.0) || !unbraced_length_mm.is_finite() {
                return Err(CalcError::invalid_input(
                    "unbraced_length_mm",
                    unbraced_length_mm.to_string(),
                    "Unbraced length must be positive for an unsupported beam",
                ));
            }
            if !(omega2 > 0.0 && omega2 <= MAX_OMEGA2) {
                return Err(CalcError::invalid_input(
                    "omega2",
                    omega2.to_string(),
                    format!("Moment gradient coefficient must be in (0, {}]", MAX_OMEGA2),
                ));
            }
        }
        Ok(())
    }

    /// True when there is nothing to design for
    pub fn is_zero_demand(&self) -> bool {
        self.factored_moment_knm == 0.0 && self.factored_shear_kn == 0.0
    }
}

/// Result of checking one section as a beam
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamCheckResult {
    pub designation: String,
    pub mass_kg_per_m: f64,
    pub classification: SectionClassification,

    // === Resistances ===
    /// Mr (kN·m), reduced for LTB when unsupported
    pub moment_resistance_knm: f64,
    /// Vr (kN)
    pub shear_resistance_kn: f64,

    // === Unity checks ===
    /// Mf / Mr
    pub moment_utilization: f64,
    /// Vf / Vr
    pub shear_utilization: f64,

    /// Present when the compression flange is unsupported
    pub lateral_torsional_buckling: Option<LateralTorsionalBucklingResult>,
    /// Present when a deflection requirement was supplied
    pub deflection: Option<DeflectionCheck>,
}

impl BeamCheckResult {
    /// Check if all unity checks pass (≤ 1.0)
    pub fn passes(&self) -> bool {
        self.moment_utilization <= 1.0
            && self.shear_utilization <= 1.0
            && self.deflection.as_ref().map_or(true, |d| d.utilization <= 1.0)
    }

    /// Get the governing (highest) unity ratio
    pub fn governing_unity(&self) -> f64 {
        let deflection = self.deflection.as_ref().map_or(0.0, |d| d.utilization);
        self.moment_utilization.max(self.shear_utilization).max(deflection)
    }

    /// Get a description of what governs the design
    pub fn governing_condition(&self) -> &'static str {
        let deflection = self.deflection.as_ref().map_or(0.0, |d| d.utilization);
        if self.moment_utilization >= self.shear_utilization && self.moment_utilization >= deflection {
            if self.lateral_torsional_buckling.is_some() {
                "Lateral-torsional buckling"
            } else {
                "Bending"
            }
        } else if self.shear_utilization >= deflection {
            "Shear"
        } else {
            "Deflection"
        }
    }
}

/// Applied / resistance. A zero or non-finite resistance means the catalog
/// record is broken and is reported as a data fault.
pub fn utilization(section: &SectionRecord, property: &str, applied: f64, resistance: f64) -> CalcResult<f64> {
    if !(resistance > 0.0) || !resistance.is_finite() {
        return Err(CalcError::data_integrity(
            section.family.code(),
            &section.designation,
            property,
            format!("Resistance {} is not a positive finite value", resistance),
        ));
    }
    Ok(applied / resistance)
}

/// Check one section as a beam.
///
/// # Errors
///
/// * `InvalidInput` for negative actions or a non-positive unbraced length
/// * `UnsupportedSection` for angles, tees, and class 3/4 sections with an
///   unsupported compression flange
/// * `DataIntegrity` when a resistance comes out as zero
pub fn check_beam(
    section: &SectionRecord,
    input: &BeamCheckInput,
    deflection: Option<&DeflectionRequirement>,
) -> CalcResult<BeamCheckResult> {
    input.validate()?;
    let fy = input.grade.fy_mpa();

    let classification = classify(section, fy)?;
    let (moment_resistance_knm, ltb) = match input.lateral_support {
        LateralSupport::Continuous => (moment_resistance(section, fy)?.mr_knm, None),
        LateralSupport::Unsupported { unbraced_length_mm, omega2 } => {
            let ltb = lateral_torsional_buckling(section, fy, unbraced_length_mm, omega2)?;
            (ltb.mr_knm, Some(ltb))
        }
    };
    let shear_resistance_kn = shear_resistance(section, fy)?.vr_kn;

    let moment_utilization = utilization(section, "Mr", input.factored_moment_knm, moment_resistance_knm)?;
    let shear_utilization = utilization(section, "Vr", input.factored_shear_kn, shear_resistance_kn)?;
    let deflection = deflection.map(|req| req.check(section.ix_mm4)).transpose()?;

    Ok(BeamCheckResult {
        designation: section.designation.clone(),
        mass_kg_per_m: section.mass_kg_per_m,
        classification,
        moment_resistance_knm,
        shear_resistance_kn,
        moment_utilization,
        shear_utilization,
        lateral_torsional_buckling: ltb,
        deflection,
    })
}
