//! # Tensile Resistance
//!
//! Gross-section yielding only, `Tr = φ·Ag·Fy`. Net-section fracture needs
//! bolt-hole geometry and is not modelled.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::materials::PHI;
use crate::sections::SectionRecord;
use crate::units::{KiloNewtons, Newtons};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TensileResistance {
    pub designation: String,
    /// Ag (mm²)
    pub gross_area_mm2: f64,
    pub fy_mpa: f64,
    /// Tr (kN)
    pub tr_kn: f64,
}

/// Factored tensile resistance. Applies to every family.
pub fn tensile_resistance(section: &SectionRecord, fy_mpa: f64) -> CalcResult<TensileResistance> {
    if !(fy_mpa > 0.0) {
        return Err(CalcError::invalid_input("fy_mpa", fy_mpa.to_string(), "Yield stress must be positive"));
    }

    Ok(TensileResistance {
        designation: section.designation.clone(),
        gross_area_mm2: section.area_mm2,
        fy_mpa,
        tr_kn: KiloNewtons::from(Newtons(PHI * section.area_mm2 * fy_mpa)).0,
    })
}
