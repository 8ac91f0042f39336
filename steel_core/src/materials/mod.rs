//! # Steel Materials
//!
//! CSA G40.21 structural steel grades and the fixed material constants used by
//! every resistance calculation.
//!
//! ## Example
//!
//! ```rust
//! use steel_core::materials::SteelGrade;
//!
//! let grade = SteelGrade::G350W;
//! assert_eq!(grade.fy_mpa(), 350.0);
//! assert_eq!(grade.fu_mpa(), 450.0);
//! assert_eq!(grade.code(), "350W");
//! ```

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::CalcError;

/// Elastic modulus E (MPa)
pub const E_MPA: f64 = 200_000.0;

/// Shear modulus G (MPa)
pub const G_MPA: f64 = 77_000.0;

/// Resistance factor φ for structural steel
pub const PHI: f64 = 0.9;

/// Column curve exponent n for rolled and welded shapes
pub const COLUMN_EXPONENT_N: f64 = 1.34;

/// Recognized steel grades.
///
/// Closed set. Adding a grade means extending this enum and its stress table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SteelGrade {
    /// G40.21 300W
    #[serde(rename = "300W")]
    G300W,
    /// G40.21 345WM (rolled W-shapes, equivalent to ASTM A992)
    #[serde(rename = "345WM")]
    G345WM,
    /// G40.21 350W
    #[default]
    #[serde(rename = "350W")]
    G350W,
}

impl SteelGrade {
    /// All grades in ascending yield order
    pub const ALL: [SteelGrade; 3] = [SteelGrade::G300W, SteelGrade::G345WM, SteelGrade::G350W];

    /// Yield stress Fy (MPa)
    pub fn fy_mpa(&self) -> f64 {
        match self {
            SteelGrade::G300W => 300.0,
            SteelGrade::G345WM => 345.0,
            SteelGrade::G350W => 350.0,
        }
    }

    /// Ultimate tensile stress Fu (MPa)
    pub fn fu_mpa(&self) -> f64 {
        match self {
            SteelGrade::G300W => 450.0,
            SteelGrade::G345WM => 450.0,
            SteelGrade::G350W => 450.0,
        }
    }

    /// Grade designation as written on drawings
    pub fn code(&self) -> &'static str {
        match self {
            SteelGrade::G300W => "300W",
            SteelGrade::G345WM => "345WM",
            SteelGrade::G350W => "350W",
        }
    }
}

impl std::fmt::Display for SteelGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for SteelGrade {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SteelGrade::ALL
            .iter()
            .copied()
            .find(|g| g.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CalcError::invalid_input("grade", s, "Expected one of 300W, 345WM, 350W"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_stresses() {
        assert_eq!(SteelGrade::G300W.fy_mpa(), 300.0);
        assert_eq!(SteelGrade::G345WM.fy_mpa(), 345.0);
        assert_eq!(SteelGrade::G350W.fy_mpa(), 350.0);
        for grade in SteelGrade::ALL {
            assert!(grade.fu_mpa() > grade.fy_mpa());
        }
    }

    #[test]
    fn test_grade_parsing() {
        assert_eq!("350W".parse::<SteelGrade>().unwrap(), SteelGrade::G350W);
        assert_eq!("345wm".parse::<SteelGrade>().unwrap(), SteelGrade::G345WM);
        assert!("A36".parse::<SteelGrade>().is_err());
    }

    #[test]
    fn test_grade_serialization() {
        let json = serde_json::to_string(&SteelGrade::G300W).unwrap();
        assert_eq!(json, "\"300W\"");
        let parsed: SteelGrade = serde_json::from_str("\"350W\"").unwrap();
        assert_eq!(parsed, SteelGrade::G350W);
        assert_eq!(SteelGrade::default(), SteelGrade::G350W);
    }
}
