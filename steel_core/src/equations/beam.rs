//! Simply-supported span under a full-length uniform load.
//!
//! Any consistent unit set works; the engine passes N/mm, mm, MPa and mm⁴
//! (or kN/m and m when it wants kN and kN·m back).
//!
//! Reference: Roark's Formulas for Stress and Strain, 8th Ed., Table 8.1, case 2a.

/// End shear, V = wL/2
#[inline]
pub fn uniform_load_max_shear(w: f64, l: f64) -> f64 {
    0.5 * w * l
}

/// Midspan moment, M = wL²/8
#[inline]
pub fn uniform_load_max_moment(w: f64, l: f64) -> f64 {
    w * l.powi(2) / 8.0
}

/// Midspan deflection, δ = 5wL⁴ / 384EI
#[inline]
pub fn uniform_load_max_deflection(w: f64, l: f64, e: f64, i: f64) -> f64 {
    5.0 * w * l.powi(4) / (384.0 * e * i)
}

/// Inertia that holds midspan deflection to `delta`, I = 5wL⁴ / 384Eδ
#[inline]
pub fn uniform_load_required_inertia(w: f64, l: f64, e: f64, delta: f64) -> f64 {
    5.0 * w * l.powi(4) / (384.0 * e * delta)
}
