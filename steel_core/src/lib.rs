//! # steel_core - CSA S16-19 Steel Member Design Engine
//!
//! `steel_core` classifies rolled steel sections, computes factored
//! resistances and searches a section catalog for the lightest member that
//! satisfies a set of design actions. All inputs and outputs are
//! JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions over an immutable catalog
//! - **JSON-First**: All request and result types implement Serialize/Deserialize
//! - **Rich Errors**: Structured `CalcError`, never panics on bad input
//! - **SI throughout**: Catalog values are normalized to mm/N/MPa at load time
//!
//! ## Quick Start
//!
//! ```rust
//! use steel_core::sections::SectionCatalog;
//! use steel_core::selection::{search_optimal_beam, BeamSearchInput};
//!
//! let catalog = SectionCatalog::builtin().unwrap();
//!
//! // Mf = 500 kN·m, Vf = 200 kN, 350W, continuous lateral support
//! let results = search_optimal_beam(catalog, &BeamSearchInput::new(500.0, 200.0), None).unwrap();
//!
//! let lightest = &results[0];
//! assert!(lightest.check.moment_resistance_knm >= 500.0);
//! println!("{}", lightest.section);
//! ```
//!
//! ## Modules
//!
//! - [`sections`] - Section families, records and the catalog
//! - [`calculations`] - Classification and resistance calculators
//! - [`loads`] - NBC combinations and load derivation
//! - [`selection`] - Optimal-section search
//! - [`materials`] - Steel grades and material constants
//! - [`equations`] - Closed-form mechanics formulas
//! - [`settings`] - Engine settings file
//! - [`units`] - SI unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod equations;
pub mod errors;
pub mod loads;
pub mod materials;
pub mod sections;
pub mod selection;
pub mod settings;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{
    classify,
    column_resistance,
    lateral_torsional_buckling,
    moment_resistance,
    shear_resistance,
    tensile_resistance,
};
pub use errors::{CalcError, CalcResult};
pub use loads::{actual_deflection, derive_code_combinations, derive_simply_supported_loads, required_inertia_for_deflection};
pub use materials::SteelGrade;
pub use sections::{SectionCatalog, SectionFamily, SectionRecord};
pub use selection::{design_beam, search_optimal_beam, search_optimal_column, search_optimal_tension_member};
pub use settings::EngineSettings;
