//! Column search
//!
//! Mirrors the beam search with a single limit state: factored axial
//! compression against Cr about the chosen buckling axis.

use serde::{Deserialize, Serialize};

use super::filters::DimensionFilters;
use super::{default_column_families, log_summary, sort_by_mass, Ranked};
use crate::calculations::beam::utilization;
use crate::calculations::column::{column_resistance, BucklingAxis, ColumnBucklingResult};
use crate::errors::{CalcError, CalcResult};
use crate::materials::SteelGrade;
use crate::sections::{SectionCatalog, SectionFamily, SectionRecord};

fn default_k_factor() -> f64 {
    1.0
}

/// Column search request
///
/// ## JSON Example
///
/// ```json
/// {
///   "factored_axial_load_kn": 1200.0,
///   "length_mm": 4000.0,
///   "k_factor": 1.0,
///   "axis": "governing",
///   "grade": "350W"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSearchInput {
    /// Cf (kN)
    pub factored_axial_load_kn: f64,
    /// Unbraced length L (mm)
    pub length_mm: f64,
    #[serde(default = "default_k_factor")]
    pub k_factor: f64,
    #[serde(default)]
    pub axis: BucklingAxis,
    #[serde(default)]
    pub grade: SteelGrade,
    #[serde(default)]
    pub filters: DimensionFilters,
    #[serde(default = "default_column_families")]
    pub families: Vec<SectionFamily>,
}

impl ColumnSearchInput {
    pub fn new(factored_axial_load_kn: f64, length_mm: f64) -> Self {
        ColumnSearchInput {
            factored_axial_load_kn,
            length_mm,
            k_factor: default_k_factor(),
            axis: BucklingAxis::default(),
            grade: SteelGrade::default(),
            filters: DimensionFilters::default(),
            families: default_column_families(),
        }
    }

    pub fn validate(&self) -> CalcResult<()> {
        if !(self.factored_axial_load_kn >= 0.0) || !self.factored_axial_load_kn.is_finite() {
            return Err(CalcError::invalid_input(
                "factored_axial_load_kn",
                self.factored_axial_load_kn.to_string(),
                "Factored axial load must be non-negative",
            ));
        }
        if !(self.k_factor > 0.0) || !self.k_factor.is_finite() {
            return Err(CalcError::invalid_input("k_factor", self.k_factor.to_string(), "K factor must be positive"));
        }
        if !(self.length_mm > 0.0) || !self.length_mm.is_finite() {
            return Err(CalcError::invalid_input("length_mm", self.length_mm.to_string(), "Length must be positive"));
        }
        self.filters.validate()
    }
}

/// An adequate column candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDesignResult {
    pub section: SectionRecord,
    pub buckling: ColumnBucklingResult,
    /// Cf / Cr
    pub utilization: f64,
    pub adequate: bool,
}

impl Ranked for ColumnDesignResult {
    fn section(&self) -> &SectionRecord {
        &self.section
    }
}

/// Lightest-first list of sections with Cr ≥ Cf.
///
/// A zero axial load returns an empty list.
pub fn search_optimal_column(
    catalog: &SectionCatalog,
    input: &ColumnSearchInput,
) -> CalcResult<Vec<ColumnDesignResult>> {
    input.validate()?;
    if input.factored_axial_load_kn == 0.0 {
        tracing::info!("zero factored axial load, nothing to design");
        return Ok(Vec::new());
    }

    let fy = input.grade.fy_mpa();
    let candidates = catalog.families(&input.families);
    let mut results = Vec::new();

    for section in &candidates {
        if let Some(bound) = input.filters.rejection(section) {
            tracing::trace!(section = %section.designation, bound, "rejected by filter");
            continue;
        }

        let buckling = column_resistance(section, fy, input.k_factor, input.length_mm, input.axis)?;
        let ratio = utilization(section, "Cr", input.factored_axial_load_kn, buckling.cr_kn)?;
        if ratio <= 1.0 {
            results.push(ColumnDesignResult {
                section: (*section).clone(),
                buckling,
                utilization: ratio,
                adequate: true,
            });
        } else {
            tracing::debug!(
                section = %section.designation,
                slenderness = buckling.slenderness_ratio,
                unity = ratio,
                "rejected by compression"
            );
        }
    }

    sort_by_mass(&mut results);
    log_summary("column", &input.families, candidates.len(), &results);
    Ok(results)
}
