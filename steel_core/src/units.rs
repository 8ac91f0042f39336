//! # Unit Types
//!
//! Lightweight newtype wrappers for the SI units the engine works in.
//! They serialize as plain numbers (`#[serde(transparent)]`).
//!
//! ## Internal unit system
//!
//! Catalog values are normalized at load time so that calculators only see:
//! - Length: millimetres (mm); section properties in mm², mm³, mm⁴, mm⁶
//! - Stress: megapascals (MPa = N/mm²)
//! - Force: newtons internally, reported in kilonewtons (kN)
//! - Moment: newton-millimetres internally, reported in kilonewton-metres (kN·m)
//! - Line load: kilonewtons per metre (kN/m), numerically equal to N/mm
//!
//! ## Example
//!
//! ```rust
//! use steel_core::units::{Millimeters, Meters, NewtonMillimeters, KiloNewtonMeters};
//!
//! let span: Meters = Millimeters(6000.0).into();
//! assert_eq!(span.0, 6.0);
//!
//! let m: KiloNewtonMeters = NewtonMillimeters(500.0e6).into();
//! assert!((m.0 - 500.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

/// ×10³ catalog multiplier
pub const SCALE_E3: f64 = 1.0e3;
/// ×10⁶ catalog multiplier
pub const SCALE_E6: f64 = 1.0e6;
/// ×10⁹ catalog multiplier
pub const SCALE_E9: f64 = 1.0e9;

// ============================================================================
// Length Units
// ============================================================================

/// Length in millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

/// Length in metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

impl From<Millimeters> for Meters {
    fn from(mm: Millimeters) -> Self {
        Meters(mm.0 / 1000.0)
    }
}

impl From<Meters> for Millimeters {
    fn from(m: Meters) -> Self {
        Millimeters(m.0 * 1000.0)
    }
}

// ============================================================================
// Force Units
// ============================================================================

/// Force in newtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Newtons(pub f64);

/// Force in kilonewtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KiloNewtons(pub f64);

impl From<Newtons> for KiloNewtons {
    fn from(n: Newtons) -> Self {
        KiloNewtons(n.0 / 1000.0)
    }
}

impl From<KiloNewtons> for Newtons {
    fn from(kn: KiloNewtons) -> Self {
        Newtons(kn.0 * 1000.0)
    }
}

// ============================================================================
// Moment Units
// ============================================================================

/// Moment in newton-millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewtonMillimeters(pub f64);

/// Moment in kilonewton-metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KiloNewtonMeters(pub f64);

impl From<NewtonMillimeters> for KiloNewtonMeters {
    fn from(nmm: NewtonMillimeters) -> Self {
        KiloNewtonMeters(nmm.0 / 1.0e6)
    }
}

impl From<KiloNewtonMeters> for NewtonMillimeters {
    fn from(knm: KiloNewtonMeters) -> Self {
        NewtonMillimeters(knm.0 * 1.0e6)
    }
}

// ============================================================================
// Distributed Load Units
// ============================================================================

/// Line load in kilonewtons per metre (numerically N/mm)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KiloNewtonsPerMeter(pub f64);

impl KiloNewtonsPerMeter {
    /// Same load expressed in N/mm
    pub fn n_per_mm(self) -> f64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_conversions() {
        let m: Meters = Millimeters(6000.0).into();
        assert_eq!(m.0, 6.0);
        let mm: Millimeters = Meters(2.5).into();
        assert_eq!(mm.0, 2500.0);
    }

    #[test]
    fn test_force_and_moment_conversions() {
        let kn: KiloNewtons = Newtons(200_000.0).into();
        assert_eq!(kn.0, 200.0);
        let knm: KiloNewtonMeters = NewtonMillimeters(112.5e6).into();
        assert!((knm.0 - 112.5).abs() < 1e-9);
        let back: NewtonMillimeters = knm.into();
        assert!((back.0 - 112.5e6).abs() < 1e-3);
    }

    #[test]
    fn test_transparent_serialization() {
        let json = serde_json::to_string(&Millimeters(6000.0)).unwrap();
        assert_eq!(json, "6000.0");
        let load: KiloNewtonsPerMeter = serde_json::from_str("25.0").unwrap();
        assert_eq!(load.n_per_mm(), 25.0);
    }
}
