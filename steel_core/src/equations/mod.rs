//! # Structural Engineering Equations
//!
//! Closed-form mechanics used by the calculators, kept in one place so each
//! formula can be checked against its reference on its own.
//!
//! ## Modules
//!
//! - [`beam`] - Simply-supported uniform load formulas (moment, shear, deflection)
//! - [`stability`] - Euler stress, elastic lateral-torsional buckling, column curve
//!
//! ## References
//!
//! - CSA S16-19: Design of Steel Structures
//! - Roark's Formulas for Stress and Strain, 8th Edition

pub mod beam;
pub mod stability;

pub use beam::{
    uniform_load_max_deflection,
    uniform_load_max_moment,
    uniform_load_max_shear,
    uniform_load_required_inertia,
};

pub use stability::{column_curve_factor, elastic_ltb_moment, euler_stress};
