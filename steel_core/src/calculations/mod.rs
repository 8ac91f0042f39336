//! # Structural Calculations
//!
//! CSA S16-19 resistance calculators. Each is a pure function of a section
//! record and a yield stress, returning a JSON-serializable result that
//! carries the intermediate values used, or a structured `CalcError`.
//!
//! ## Available Calculations
//!
//! - [`classification`] - Local-buckling class of flange and web
//! - [`flexure`] - Moment resistance, laterally supported and unsupported
//! - [`shear`] - Web shear resistance
//! - [`tension`] - Gross-section yielding
//! - [`column`] - Flexural buckling of compression members
//! - [`beam`] - Full check of one section as a beam

pub mod beam;
pub mod classification;
pub mod column;
pub mod flexure;
pub mod shear;
pub mod tension;

pub use beam::{check_beam, utilization, BeamCheckInput, BeamCheckResult, LateralSupport};
pub use classification::{classify, GoverningElement, SectionClass, SectionClassification};
pub use column::{column_resistance, BucklingAxis, ColumnBucklingResult};
pub use flexure::{
    lateral_torsional_buckling,
    moment_resistance,
    weak_axis_moment_resistance,
    LateralTorsionalBucklingResult,
    LtbCase,
    MomentResistance,
};
pub use shear::{shear_resistance, ShearResistance};
pub use tension::{tensile_resistance, TensileResistance};
