//! Tension member search
//!
//! Factored axial tension against gross-section yielding, with the same
//! filter and ordering contract as the beam and column searches.

use serde::{Deserialize, Serialize};

use super::filters::DimensionFilters;
use super::{default_tension_families, log_summary, sort_by_mass, Ranked};
use crate::calculations::beam::utilization;
use crate::calculations::tension::{tensile_resistance, TensileResistance};
use crate::errors::{CalcError, CalcResult};
use crate::materials::SteelGrade;
use crate::sections::{SectionCatalog, SectionFamily, SectionRecord};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TensionSearchInput {
    /// Tf (kN)
    pub factored_tension_kn: f64,
    #[serde(default)]
    pub grade: SteelGrade,
    #[serde(default)]
    pub filters: DimensionFilters,
    #[serde(default = "default_tension_families")]
    pub families: Vec<SectionFamily>,
}

impl TensionSearchInput {
    pub fn new(factored_tension_kn: f64) -> Self {
        TensionSearchInput {
            factored_tension_kn,
            grade: SteelGrade::default(),
            filters: DimensionFilters::default(),
            families: default_tension_families(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TensionDesignResult {
    pub section: SectionRecord,
    pub resistance: TensileResistance,
    /// Tf / Tr
    pub utilization: f64,
    pub adequate: bool,
}

impl Ranked for TensionDesignResult {
    fn section(&self) -> &SectionRecord {
        &self.section
    }
}

/// Lightest-first list of sections with Tr ≥ Tf.
pub fn search_optimal_tension_member(
    catalog: &SectionCatalog,
    input: &TensionSearchInput,
) -> CalcResult<Vec<TensionDesignResult>> {
    if !(input.factored_tension_kn >= 0.0) || !input.factored_tension_kn.is_finite() {
        return Err(CalcError::invalid_input(
            "factored_tension_kn",
            input.factored_tension_kn.to_string(),
            "Factored tension must be non-negative",
        ));
    }
    input.filters.validate()?;
    if input.factored_tension_kn == 0.0 {
        return Ok(Vec::new());
    }

    let fy = input.grade.fy_mpa();
    let candidates = catalog.families(&input.families);
    let mut results = Vec::new();

    for section in &candidates {
        if !input.filters.admits(section) {
            continue;
        }
        let resistance = tensile_resistance(section, fy)?;
        let ratio = utilization(section, "Tr", input.factored_tension_kn, resistance.tr_kn)?;
        if ratio <= 1.0 {
            results.push(TensionDesignResult {
                section: (*section).clone(),
                resistance,
                utilization: ratio,
                adequate: true,
            });
        }
    }

    sort_by_mass(&mut results);
    log_summary("tension", &input.families, candidates.len(), &results);
    Ok(results)
}
