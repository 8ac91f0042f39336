//! Beam search and the beam design pipeline
//!
//! [`search_optimal_beam`] takes factored actions directly. [`design_beam`]
//! first derives them from the loading mode (direct, uniform load or NBC
//! code combinations), builds the deflection requirement when a span and a
//! service load are known, and then runs the search.
//!
//! ## Example
//!
//! ```rust
//! use steel_core::selection::{design_beam, BeamDesignRequest, BeamLoading};
//! use steel_core::sections::SectionCatalog;
//!
//! let catalog = SectionCatalog::builtin().unwrap();
//! let request = BeamDesignRequest::new(BeamLoading::UniformLoad {
//!     span_mm: 6000.0,
//!     factored_load_kn_per_m: 25.0,
//!     service_load_kn_per_m: Some(18.0),
//! });
//!
//! let outcome = design_beam(catalog, &request).unwrap();
//! assert!((outcome.factored_moment_knm - 112.5).abs() < 1e-9);
//! let lightest = &outcome.candidates[0];
//! println!("{} ({} kg/m)", lightest.section.designation, lightest.section.mass_kg_per_m);
//! ```

use serde::{Deserialize, Serialize};

use super::filters::DimensionFilters;
use super::{default_beam_families, log_summary, sort_by_mass, Ranked};
use crate::calculations::beam::{check_beam, BeamCheckInput, BeamCheckResult, LateralSupport};
use crate::errors::{CalcError, CalcResult};
use crate::loads::{
    derive_code_combinations,
    derive_simply_supported_loads,
    required_inertia_for_deflection,
    CodeCombinationResult,
    DeflectionRequirement,
    LoadCase,
};
use crate::materials::SteelGrade;
use crate::sections::{SectionCatalog, SectionFamily, SectionRecord};

/// Default serviceability limit, span / 360
pub const DEFAULT_DEFLECTION_LIMIT: f64 = 360.0;

fn default_deflection_limit() -> f64 {
    DEFAULT_DEFLECTION_LIMIT
}

/// Factored actions and search options for a beam search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamSearchInput {
    /// Mf (kN·m)
    pub factored_moment_knm: f64,
    /// Vf (kN)
    pub factored_shear_kn: f64,
    #[serde(default)]
    pub grade: SteelGrade,
    #[serde(default)]
    pub lateral_support: LateralSupport,
    #[serde(default)]
    pub filters: DimensionFilters,
    #[serde(default = "default_beam_families")]
    pub families: Vec<SectionFamily>,
}

impl BeamSearchInput {
    pub fn new(factored_moment_knm: f64, factored_shear_kn: f64) -> Self {
        BeamSearchInput {
            factored_moment_knm,
            factored_shear_kn,
            grade: SteelGrade::default(),
            lateral_support: LateralSupport::default(),
            filters: DimensionFilters::default(),
            families: default_beam_families(),
        }
    }

    fn check_input(&self) -> BeamCheckInput {
        BeamCheckInput {
            factored_moment_knm: self.factored_moment_knm,
            factored_shear_kn: self.factored_shear_kn,
            grade: self.grade,
            lateral_support: self.lateral_support,
        }
    }
}

/// An adequate beam candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamDesignResult {
    pub section: SectionRecord,
    pub check: BeamCheckResult,
    /// Always true for returned candidates
    pub adequate: bool,
}

impl Ranked for BeamDesignResult {
    fn section(&self) -> &SectionRecord {
        &self.section
    }
}

/// Lightest-first list of sections adequate for Mf and Vf.
///
/// With a deflection requirement, sections whose Ix is below the required
/// value are rejected before any strength check. Unsupported beams only
/// consider class 1 and 2 sections.
///
/// # Errors
///
/// * `InvalidInput` for negative actions, bad filters or LTB parameters
/// * `DataIntegrity` when a catalog record yields a zero resistance
pub fn search_optimal_beam(
    catalog: &SectionCatalog,
    input: &BeamSearchInput,
    deflection: Option<&DeflectionRequirement>,
) -> CalcResult<Vec<BeamDesignResult>> {
    let check_input = input.check_input();
    check_input.validate()?;
    input.filters.validate()?;

    if check_input.is_zero_demand() {
        tracing::info!("zero factored moment and shear, nothing to design");
        return Ok(Vec::new());
    }

    let candidates = catalog.families(&input.families);
    let mut results = Vec::new();

    for section in &candidates {
        if let Some(bound) = input.filters.rejection(section) {
            tracing::trace!(section = %section.designation, bound, "rejected by filter");
            continue;
        }
        if let Some(requirement) = deflection {
            if !requirement.admits(section.ix_mm4) {
                tracing::trace!(
                    section = %section.designation,
                    ix_mm4 = section.ix_mm4,
                    required_ix_mm4 = requirement.required_ix_mm4,
                    "rejected by deflection"
                );
                continue;
            }
        }

        let check = match check_beam(section, &check_input, deflection) {
            Ok(check) => check,
            Err(CalcError::UnsupportedSection { reason, .. }) => {
                tracing::debug!(section = %section.designation, %reason, "skipped");
                continue;
            }
            Err(e) => return Err(e),
        };

        if check.passes() {
            results.push(BeamDesignResult {
                section: (*section).clone(),
                check,
                adequate: true,
            });
        } else {
            tracing::debug!(
                section = %section.designation,
                governs = check.governing_condition(),
                unity = check.governing_unity(),
                "rejected by unity check"
            );
        }
    }

    sort_by_mass(&mut results);
    log_summary("beam", &input.families, candidates.len(), &results);
    Ok(results)
}

/// How the design actions are obtained
///
/// ## JSON Examples
///
/// ```json
/// { "mode": "direct", "factored_moment_knm": 500.0, "factored_shear_kn": 200.0 }
/// { "mode": "uniform_load", "span_mm": 6000.0, "factored_load_kn_per_m": 25.0, "service_load_kn_per_m": 18.0 }
/// { "mode": "code_combinations", "span_mm": 6000.0, "loads": { "label": "Floor", "loads": { "Dead": 4.0, "Live": 6.0 } } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum BeamLoading {
    /// Mf and Vf given
    Direct {
        factored_moment_knm: f64,
        factored_shear_kn: f64,
    },
    /// Simply-supported span under a factored uniform load
    UniformLoad {
        span_mm: f64,
        factored_load_kn_per_m: f64,
        /// Specified load for the deflection check
        #[serde(default)]
        service_load_kn_per_m: Option<f64>,
    },
    /// Simply-supported span, governing NBC ULS and SLS combinations
    CodeCombinations { span_mm: f64, loads: LoadCase },
}

/// Full beam design request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamDesignRequest {
    pub loading: BeamLoading,
    #[serde(default)]
    pub grade: SteelGrade,
    #[serde(default)]
    pub lateral_support: LateralSupport,
    #[serde(default)]
    pub filters: DimensionFilters,
    #[serde(default = "default_beam_families")]
    pub families: Vec<SectionFamily>,
    /// Denominator of the L/limit deflection criterion
    #[serde(default = "default_deflection_limit")]
    pub deflection_limit: f64,
}

impl BeamDesignRequest {
    pub fn new(loading: BeamLoading) -> Self {
        BeamDesignRequest {
            loading,
            grade: SteelGrade::default(),
            lateral_support: LateralSupport::default(),
            filters: DimensionFilters::default(),
            families: default_beam_families(),
            deflection_limit: DEFAULT_DEFLECTION_LIMIT,
        }
    }
}

/// Derived actions plus the ranked candidates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamDesignOutcome {
    pub factored_moment_knm: f64,
    pub factored_shear_kn: f64,
    /// Present in code-combination mode
    pub combinations: Option<CodeCombinationResult>,
    pub deflection_requirement: Option<DeflectionRequirement>,
    pub candidates: Vec<BeamDesignResult>,
}

/// Derive loads for the request's mode and run the beam search.
pub fn design_beam(catalog: &SectionCatalog, request: &BeamDesignRequest) -> CalcResult<BeamDesignOutcome> {
    let (mf, vf, combinations, deflection_requirement) = match &request.loading {
        BeamLoading::Direct { factored_moment_knm, factored_shear_kn } => {
            (*factored_moment_knm, *factored_shear_kn, None, None)
        }
        BeamLoading::UniformLoad { span_mm, factored_load_kn_per_m, service_load_kn_per_m } => {
            let loads = derive_simply_supported_loads(*factored_load_kn_per_m, *span_mm)?;
            let requirement = service_load_kn_per_m
                .map(|w| required_inertia_for_deflection(w, *span_mm, request.deflection_limit))
                .transpose()?;
            (loads.mf_knm, loads.vf_kn, None, requirement)
        }
        BeamLoading::CodeCombinations { span_mm, loads } => {
            let combos = derive_code_combinations(loads)?;
            let uls = combos.governing_uls.as_ref().map_or(0.0, |c| c.value_kn_per_m);
            let derived = derive_simply_supported_loads(uls, *span_mm)?;
            let requirement = combos
                .governing_sls
                .as_ref()
                .map(|c| required_inertia_for_deflection(c.value_kn_per_m, *span_mm, request.deflection_limit))
                .transpose()?;
            (derived.mf_knm, derived.vf_kn, Some(combos), requirement)
        }
    };

    let input = BeamSearchInput {
        factored_moment_knm: mf,
        factored_shear_kn: vf,
        grade: request.grade,
        lateral_support: request.lateral_support,
        filters: request.filters,
        families: request.families.clone(),
    };
    let candidates = search_optimal_beam(catalog, &input, deflection_requirement.as_ref())?;

    Ok(BeamDesignOutcome {
        factored_moment_knm: mf,
        factored_shear_kn: vf,
        combinations,
        deflection_requirement,
        candidates,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::classification::{classify, SectionClass};
    use crate::loads::LoadType;

    fn catalog() -> &'static SectionCatalog {
        SectionCatalog::builtin().unwrap()
    }

    #[test]
    fn test_results_are_adequate_and_sorted() {
        let results = search_optimal_beam(catalog(), &BeamSearchInput::new(300.0, 150.0), None).unwrap();
        assert!(!results.is_empty());
        for r in &results {
            assert!(r.adequate);
            assert!(r.check.moment_utilization <= 1.0);
            assert!(r.check.shear_utilization <= 1.0);
            assert!(r.check.moment_resistance_knm >= 300.0);
        }
        for pair in results.windows(2) {
            assert!(pair[0].section.mass_kg_per_m <= pair[1].section.mass_kg_per_m);
        }
    }

    #[test]
    fn test_equal_mass_sorted_by_designation() {
        // W460x74 and W530x74 share a mass
        let results = search_optimal_beam(catalog(), &BeamSearchInput::new(100.0, 50.0), None).unwrap();
        let names: Vec<&str> = results
            .iter()
            .filter(|r| r.section.mass_kg_per_m == 74.0)
            .map(|r| r.section.designation.as_str())
            .collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert!(names.contains(&"W460x74") && names.contains(&"W530x74"));
    }

    #[test]
    fn test_zero_demand_is_empty() {
        let results = search_optimal_beam(catalog(), &BeamSearchInput::new(0.0, 0.0), None).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_impossible_demand_is_empty() {
        let results = search_optimal_beam(catalog(), &BeamSearchInput::new(1.0e6, 10.0), None).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_filters_apply() {
        let mut input = BeamSearchInput::new(100.0, 50.0);
        input.filters.min_depth_mm = Some(400.0);
        input.filters.max_mass_kg_per_m = Some(90.0);
        let results = search_optimal_beam(catalog(), &input, None).unwrap();
        assert!(!results.is_empty());
        assert!(results.iter().all(|r| r.section.depth_mm >= 400.0 && r.section.mass_kg_per_m <= 90.0));
    }

    #[test]
    fn test_deflection_gate() {
        let requirement = required_inertia_for_deflection(18.0, 6000.0, 360.0).unwrap();
        let results = search_optimal_beam(catalog(), &BeamSearchInput::new(50.0, 30.0), Some(&requirement)).unwrap();
        assert!(!results.is_empty());
        for r in &results {
            assert!(r.section.ix_mm4 >= requirement.required_ix_mm4);
            assert!(r.check.deflection.is_some());
        }
    }

    #[test]
    fn test_unsupported_search_skips_noncompact() {
        let mut input = BeamSearchInput::new(60.0, 30.0);
        input.lateral_support = LateralSupport::Unsupported {
            unbraced_length_mm: 4000.0,
            omega2: 1.0,
        };
        let results = search_optimal_beam(catalog(), &input, None).unwrap();
        assert!(!results.is_empty());
        for r in &results {
            assert!(r.check.lateral_torsional_buckling.is_some());
            let class = classify(&r.section, 350.0).unwrap().overall;
            assert!(class <= SectionClass::Class2);
        }
        assert!(results.iter().all(|r| r.section.designation != "W250x18"));
    }

    #[test]
    fn test_unsupported_rejects_bad_omega2() {
        let mut input = BeamSearchInput::new(60.0, 30.0);
        input.lateral_support = LateralSupport::Unsupported {
            unbraced_length_mm: 4000.0,
            omega2: 3.0,
        };
        assert!(search_optimal_beam(catalog(), &input, None).is_err());
    }

    #[test]
    fn test_angle_family_is_skipped() {
        let mut input = BeamSearchInput::new(10.0, 5.0);
        input.families = vec![SectionFamily::L, SectionFamily::W];
        let results = search_optimal_beam(catalog(), &input, None).unwrap();
        assert!(results.iter().all(|r| r.section.family == SectionFamily::W));
    }

    #[test]
    fn test_design_beam_uniform_load() {
        let request = BeamDesignRequest::new(BeamLoading::UniformLoad {
            span_mm: 6000.0,
            factored_load_kn_per_m: 25.0,
            service_load_kn_per_m: Some(18.0),
        });
        let outcome = design_beam(catalog(), &request).unwrap();
        assert!((outcome.factored_moment_knm - 112.5).abs() < 1e-9);
        assert!((outcome.factored_shear_kn - 75.0).abs() < 1e-9);
        let requirement = outcome.deflection_requirement.as_ref().unwrap();
        assert!(outcome.candidates.iter().all(|c| c.section.ix_mm4 >= requirement.required_ix_mm4));
        assert!(!outcome.candidates.is_empty());
    }

    #[test]
    fn test_design_beam_code_combinations() {
        let loads = LoadCase::new("Floor")
            .with_load(LoadType::Dead, 4.0)
            .with_load(LoadType::Live, 6.0);
        let request = BeamDesignRequest::new(BeamLoading::CodeCombinations { span_mm: 6000.0, loads });
        let outcome = design_beam(catalog(), &request).unwrap();
        // ULS 14 kN/m -> Mf = 14 * 36 / 8 = 63 kN·m
        assert!((outcome.factored_moment_knm - 63.0).abs() < 1e-9);
        assert!((outcome.factored_shear_kn - 42.0).abs() < 1e-9);
        let requirement = outcome.deflection_requirement.as_ref().unwrap();
        assert!((requirement.service_load_kn_per_m - 10.0).abs() < 1e-9);
        assert!(outcome.combinations.is_some());
    }

    #[test]
    fn test_design_beam_empty_loads() {
        let request = BeamDesignRequest::new(BeamLoading::CodeCombinations {
            span_mm: 6000.0,
            loads: LoadCase::new("Empty"),
        });
        let outcome = design_beam(catalog(), &request).unwrap();
        assert!(outcome.candidates.is_empty());
        assert!(outcome.deflection_requirement.is_none());
    }

    #[test]
    fn test_request_json() {
        let json = r#"{
            "loading": { "mode": "direct", "factored_moment_knm": 500.0, "factored_shear_kn": 200.0 },
            "grade": "350W"
        }"#;
        let request: BeamDesignRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.families, vec![SectionFamily::W]);
        assert_eq!(request.deflection_limit, 360.0);
        assert_eq!(request.lateral_support, LateralSupport::Continuous);
    }
}
