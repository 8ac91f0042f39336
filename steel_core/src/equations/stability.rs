//! # Member Stability Formulas
//!
//! Elastic buckling quantities used by the CSA S16 resistance calculators.
//! Inputs in N, mm, MPa.
//!
//! ## References
//!
//! - CSA S16-19 Clause 13.3.1 (axial compression)
//! - CSA S16-19 Clause 13.6 (laterally unsupported members)

use std::f64::consts::PI;

/// Euler buckling stress for slenderness KL/r
///
/// # Formula
/// Fe = π²E / (KL/r)²
#[inline]
pub fn euler_stress(e: f64, slenderness: f64) -> f64 {
    PI * PI * e / (slenderness * slenderness)
}

/// Elastic lateral-torsional buckling moment of a doubly symmetric member
///
/// # Formula
/// Mu = (ω₂π / L) · √(E·Iy·G·J + (πE/L)²·Iy·Cw)
///
/// # Arguments
/// * `omega2` - Moment gradient coefficient ω₂
/// * `l` - Unbraced length (mm)
/// * `e`, `g` - Elastic and shear moduli (MPa)
/// * `iy` - Weak-axis moment of inertia (mm⁴)
/// * `j` - Torsional constant (mm⁴)
/// * `cw` - Warping constant (mm⁶)
///
/// # Returns
/// Critical moment in N·mm
#[inline]
pub fn elastic_ltb_moment(omega2: f64, l: f64, e: f64, g: f64, iy: f64, j: f64, cw: f64) -> f64 {
    let warping = (PI * e / l).powi(2) * iy * cw;
    (omega2 * PI / l) * (e * iy * g * j + warping).sqrt()
}

/// CSA column curve: Cr / (φ·A·Fy) as a function of λ
///
/// # Formula
/// (1 + λ^(2n))^(-1/n)
#[inline]
pub fn column_curve_factor(lambda: f64, n: f64) -> f64 {
    (1.0 + lambda.powf(2.0 * n)).powf(-1.0 / n)
}
