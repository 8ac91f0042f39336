//! # Structural Sections
//!
//! Section property records for rolled and welded steel shapes, grouped by
//! family. Properties are stored in base SI units (mm, mm², mm³, mm⁴, mm⁶,
//! kg/m); the catalog loader resolves the handbook scale multipliers once at
//! load time so calculators never see scaled values.
//!
//! Family-specific geometry lives in [`SectionShape`], a tagged union: each
//! variant carries only the fields that make sense for it, and calculators
//! dispatch on it with `match` instead of probing optional fields.
//!
//! ## Example
//!
//! ```rust
//! use steel_core::sections::{SectionCatalog, SectionFamily};
//!
//! let catalog = SectionCatalog::builtin().unwrap();
//! let w = catalog.lookup("W310x39").unwrap();
//!
//! assert_eq!(w.family, SectionFamily::W);
//! println!("Zx = {:.0} mm³", w.zx_mm3);
//! ```

pub mod catalog;

pub use catalog::SectionCatalog;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Section family (shape series)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SectionFamily {
    /// Wide flange (W)
    W,
    /// American standard beam (S)
    S,
    /// Miscellaneous beam (M)
    M,
    /// Bearing pile (HP)
    HP,
    /// Welded wide flange (WWF)
    WWF,
    /// Welded reduced flange (WRF)
    WRF,
    /// Super light beam (SLB)
    SLB,
    /// Standard channel (C)
    C,
    /// Miscellaneous channel (MC)
    MC,
    /// Single angle (L)
    L,
    /// Double angle (2L)
    #[serde(rename = "2L")]
    TwoL,
    /// Tee cut from W (WT)
    WT,
    /// Tee cut from WWF (WWT)
    WWT,
    /// Rectangular or square hollow structural section
    #[serde(rename = "HSS")]
    HssRect,
    /// Round hollow structural section
    #[serde(rename = "HSSR")]
    HssRound,
}

/// Geometric kind a family belongs to; selects the [`SectionShape`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    IShape,
    Channel,
    Angle,
    Tee,
    RectangularHss,
    RoundHss,
}

impl SectionFamily {
    /// All families
    pub const ALL: [SectionFamily; 15] = [
        SectionFamily::W,
        SectionFamily::S,
        SectionFamily::M,
        SectionFamily::HP,
        SectionFamily::WWF,
        SectionFamily::WRF,
        SectionFamily::SLB,
        SectionFamily::C,
        SectionFamily::MC,
        SectionFamily::L,
        SectionFamily::TwoL,
        SectionFamily::WT,
        SectionFamily::WWT,
        SectionFamily::HssRect,
        SectionFamily::HssRound,
    ];

    /// Parse from the catalog family code
    pub fn from_code(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "W" => Some(SectionFamily::W),
            "S" => Some(SectionFamily::S),
            "M" => Some(SectionFamily::M),
            "HP" => Some(SectionFamily::HP),
            "WWF" => Some(SectionFamily::WWF),
            "WRF" => Some(SectionFamily::WRF),
            "SLB" => Some(SectionFamily::SLB),
            "C" => Some(SectionFamily::C),
            "MC" => Some(SectionFamily::MC),
            "L" => Some(SectionFamily::L),
            "2L" => Some(SectionFamily::TwoL),
            "WT" => Some(SectionFamily::WT),
            "WWT" => Some(SectionFamily::WWT),
            "HSS" => Some(SectionFamily::HssRect),
            "HSSR" => Some(SectionFamily::HssRound),
            _ => None,
        }
    }

    /// Catalog family code
    pub fn code(&self) -> &'static str {
        match self {
            SectionFamily::W => "W",
            SectionFamily::S => "S",
            SectionFamily::M => "M",
            SectionFamily::HP => "HP",
            SectionFamily::WWF => "WWF",
            SectionFamily::WRF => "WRF",
            SectionFamily::SLB => "SLB",
            SectionFamily::C => "C",
            SectionFamily::MC => "MC",
            SectionFamily::L => "L",
            SectionFamily::TwoL => "2L",
            SectionFamily::WT => "WT",
            SectionFamily::WWT => "WWT",
            SectionFamily::HssRect => "HSS",
            SectionFamily::HssRound => "HSSR",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            SectionFamily::W => "Wide Flange (W)",
            SectionFamily::S => "Standard Beam (S)",
            SectionFamily::M => "Miscellaneous Beam (M)",
            SectionFamily::HP => "Bearing Pile (HP)",
            SectionFamily::WWF => "Welded Wide Flange (WWF)",
            SectionFamily::WRF => "Welded Reduced Flange (WRF)",
            SectionFamily::SLB => "Super Light Beam (SLB)",
            SectionFamily::C => "Channel (C)",
            SectionFamily::MC => "Miscellaneous Channel (MC)",
            SectionFamily::L => "Angle (L)",
            SectionFamily::TwoL => "Double Angle (2L)",
            SectionFamily::WT => "Tee (WT)",
            SectionFamily::WWT => "Welded Tee (WWT)",
            SectionFamily::HssRect => "HSS Rectangular/Square",
            SectionFamily::HssRound => "HSS Round",
        }
    }

    /// Geometric kind of the family
    pub fn shape_kind(&self) -> ShapeKind {
        match self {
            SectionFamily::W
            | SectionFamily::S
            | SectionFamily::M
            | SectionFamily::HP
            | SectionFamily::WWF
            | SectionFamily::WRF
            | SectionFamily::SLB => ShapeKind::IShape,
            SectionFamily::C | SectionFamily::MC => ShapeKind::Channel,
            SectionFamily::L | SectionFamily::TwoL => ShapeKind::Angle,
            SectionFamily::WT | SectionFamily::WWT => ShapeKind::Tee,
            SectionFamily::HssRect => ShapeKind::RectangularHss,
            SectionFamily::HssRound => ShapeKind::RoundHss,
        }
    }
}

impl std::fmt::Display for SectionFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Family-specific geometry.
///
/// Ratios are stored as published in the handbook tables:
/// I-shapes and tees use b/2t for the flange, channels use b/t,
/// HSS use the flat width over wall thickness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum SectionShape {
    IShape {
        flange_width_mm: f64,
        flange_thickness_mm: f64,
        web_thickness_mm: f64,
        /// b / 2t
        flange_ratio: f64,
        /// h / w
        web_ratio: f64,
    },
    Channel {
        flange_width_mm: f64,
        flange_thickness_mm: f64,
        web_thickness_mm: f64,
        /// b / t
        flange_ratio: f64,
        /// h / w
        web_ratio: f64,
        /// Centroid distance from the web back
        x_bar_mm: f64,
        /// Shear centre distance from the centroid
        x_o_mm: f64,
    },
    Angle {
        long_leg_mm: f64,
        short_leg_mm: f64,
        thickness_mm: f64,
        /// long leg b / t
        leg_ratio: f64,
        x_bar_mm: f64,
        y_bar_mm: f64,
        /// Radius of gyration about the minor principal axis
        r_z_mm: f64,
    },
    Tee {
        flange_width_mm: f64,
        flange_thickness_mm: f64,
        stem_thickness_mm: f64,
        /// b / 2t
        flange_ratio: f64,
        /// d / w
        stem_ratio: f64,
        /// Centroid distance from the flange face
        y_bar_mm: f64,
        /// Shear centre distance from the centroid
        y_o_mm: f64,
    },
    RectangularHss {
        width_mm: f64,
        wall_thickness_mm: f64,
        corner_radius_mm: f64,
        /// flat width b / t
        flange_ratio: f64,
        /// flat height h / t
        web_ratio: f64,
    },
    RoundHss {
        outside_diameter_mm: f64,
        wall_thickness_mm: f64,
        /// D / t
        diameter_ratio: f64,
    },
}

impl SectionShape {
    fn dimensions(&self) -> Vec<(&'static str, f64)> {
        match self {
            SectionShape::IShape { flange_width_mm, flange_thickness_mm, web_thickness_mm, flange_ratio, web_ratio } => vec![
                ("B", *flange_width_mm),
                ("T", *flange_thickness_mm),
                ("W", *web_thickness_mm),
                ("BT", *flange_ratio),
                ("HW", *web_ratio),
            ],
            SectionShape::Channel {
                flange_width_mm,
                flange_thickness_mm,
                web_thickness_mm,
                flange_ratio,
                web_ratio,
                x_bar_mm,
                x_o_mm,
            } => vec![
                ("B", *flange_width_mm),
                ("T", *flange_thickness_mm),
                ("W", *web_thickness_mm),
                ("BT", *flange_ratio),
                ("HW", *web_ratio),
                ("X", *x_bar_mm),
                ("Xo", *x_o_mm),
            ],
            SectionShape::Angle { long_leg_mm, short_leg_mm, thickness_mm, leg_ratio, x_bar_mm, y_bar_mm, r_z_mm } => vec![
                ("D", *long_leg_mm),
                ("B", *short_leg_mm),
                ("T", *thickness_mm),
                ("BT", *leg_ratio),
                ("X", *x_bar_mm),
                ("Y", *y_bar_mm),
                ("Rz", *r_z_mm),
            ],
            SectionShape::Tee {
                flange_width_mm,
                flange_thickness_mm,
                stem_thickness_mm,
                flange_ratio,
                stem_ratio,
                y_bar_mm,
                y_o_mm,
            } => vec![
                ("B", *flange_width_mm),
                ("T", *flange_thickness_mm),
                ("W", *stem_thickness_mm),
                ("BT", *flange_ratio),
                ("DW", *stem_ratio),
                ("Y", *y_bar_mm),
                ("Yo", *y_o_mm),
            ],
            SectionShape::RectangularHss { width_mm, wall_thickness_mm, corner_radius_mm, flange_ratio, web_ratio } => vec![
                ("B", *width_mm),
                ("T", *wall_thickness_mm),
                ("R", *corner_radius_mm),
                ("BT", *flange_ratio),
                ("HT", *web_ratio),
            ],
            SectionShape::RoundHss { outside_diameter_mm, wall_thickness_mm, diameter_ratio } => vec![
                ("OD", *outside_diameter_mm),
                ("T", *wall_thickness_mm),
                ("DT", *diameter_ratio),
            ],
        }
    }
}

/// One catalog entry with section properties in base SI units.
///
/// Immutable after catalog load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionRecord {
    /// Handbook designation (e.g. "W310x39"), unique within its family
    pub designation: String,

    pub family: SectionFamily,

    /// Mass per unit length (kg/m)
    pub mass_kg_per_m: f64,

    /// Gross area (mm²)
    pub area_mm2: f64,

    /// Overall depth (mm); outside diameter for round HSS, long leg for angles
    pub depth_mm: f64,

    // === Strong Axis (X-X) ===
    pub ix_mm4: f64,
    pub sx_mm3: f64,
    pub rx_mm: f64,
    pub zx_mm3: f64,

    // === Weak Axis (Y-Y) ===
    pub iy_mm4: f64,
    pub sy_mm3: f64,
    pub ry_mm: f64,
    pub zy_mm3: f64,

    // === Torsion ===
    /// St. Venant torsional constant (mm⁴)
    pub j_mm4: f64,
    /// Warping constant (mm⁶)
    pub cw_mm6: f64,

    pub shape: SectionShape,
}

impl SectionRecord {
    /// Check the record invariants: every property non-negative, area and depth positive.
    pub fn validate(&self) -> CalcResult<()> {
        let fault = |code: &str, reason: &str| {
            CalcError::data_integrity(self.family.code(), &self.designation, code, reason)
        };

        if self.designation.trim().is_empty() {
            return Err(fault("Dsg", "Designation is empty"));
        }

        let common = [
            ("Mass", self.mass_kg_per_m),
            ("A", self.area_mm2),
            ("D", self.depth_mm),
            ("Ix", self.ix_mm4),
            ("Sx", self.sx_mm3),
            ("Rx", self.rx_mm),
            ("Zx", self.zx_mm3),
            ("Iy", self.iy_mm4),
            ("Sy", self.sy_mm3),
            ("Ry", self.ry_mm),
            ("Zy", self.zy_mm3),
            ("J", self.j_mm4),
            ("Cw", self.cw_mm6),
        ];
        for (code, value) in common.into_iter().chain(self.shape.dimensions()) {
            if !value.is_finite() || value < 0.0 {
                return Err(fault(code, &format!("Value {} must be finite and non-negative", value)));
            }
        }

        if self.area_mm2 <= 0.0 {
            return Err(fault("A", "Area must be positive"));
        }
        if self.depth_mm <= 0.0 {
            return Err(fault("D", "Depth must be positive"));
        }
        Ok(())
    }

    /// Width used by geometric filters: flange width, HSS width, round HSS
    /// diameter or short leg of an angle.
    pub fn width_mm(&self) -> f64 {
        match &self.shape {
            SectionShape::IShape { flange_width_mm, .. }
            | SectionShape::Channel { flange_width_mm, .. }
            | SectionShape::Tee { flange_width_mm, .. } => *flange_width_mm,
            SectionShape::RectangularHss { width_mm, .. } => *width_mm,
            SectionShape::RoundHss { outside_diameter_mm, .. } => *outside_diameter_mm,
            SectionShape::Angle { short_leg_mm, .. } => *short_leg_mm,
        }
    }

    /// Smallest published radius of gyration (includes r_z for angles)
    pub fn r_min(&self) -> f64 {
        let r = self.rx_mm.min(self.ry_mm);
        match &self.shape {
            SectionShape::Angle { r_z_mm, .. } => r.min(*r_z_mm),
            _ => r,
        }
    }
}

impl std::fmt::Display for SectionRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({:.1} kg/m, A={:.0} mm², Ix={:.1}e6 mm⁴, Zx={:.0}e3 mm³)",
            self.designation,
            self.mass_kg_per_m,
            self.area_mm2,
            self.ix_mm4 / 1.0e6,
            self.zx_mm3 / 1.0e3
        )
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::w310x39;
    use super::*;

    #[test]
    fn test_family_parsing() {
        assert_eq!(SectionFamily::from_code("W"), Some(SectionFamily::W));
        assert_eq!(SectionFamily::from_code("hss"), Some(SectionFamily::HssRect));
        assert_eq!(SectionFamily::from_code("2L"), Some(SectionFamily::TwoL));
        assert_eq!(SectionFamily::from_code("PIPE"), None);
        for family in SectionFamily::ALL {
            assert_eq!(SectionFamily::from_code(family.code()), Some(family));
        }
    }

    #[test]
    fn test_shape_kinds() {
        assert_eq!(SectionFamily::WWF.shape_kind(), ShapeKind::IShape);
        assert_eq!(SectionFamily::MC.shape_kind(), ShapeKind::Channel);
        assert_eq!(SectionFamily::WT.shape_kind(), ShapeKind::Tee);
        assert_eq!(SectionFamily::HssRound.shape_kind(), ShapeKind::RoundHss);
    }

    #[test]
    fn test_record_validation() {
        let mut record = w310x39();
        assert!(record.validate().is_ok());

        record.ix_mm4 = -1.0;
        let err = record.validate().unwrap_err();
        assert_eq!(err.error_code(), "DATA_INTEGRITY");

        let mut record = w310x39();
        record.shape = SectionShape::IShape {
            flange_width_mm: 165.0,
            flange_thickness_mm: f64::NAN,
            web_thickness_mm: 5.8,
            flange_ratio: 8.51,
            web_ratio: 50.1,
        };
        assert!(record.validate().is_err());
    }

    #[test]
    fn test_record_geometry_helpers() {
        let record = w310x39();
        assert_eq!(record.width_mm(), 165.0);
        assert_eq!(record.r_min(), 38.3);
        assert!(format!("{}", record).contains("W310x39"));
    }

    #[test]
    fn test_shape_serialization_tag() {
        let record = w310x39();
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"kind\":\"IShape\""));
        let roundtrip: SectionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, roundtrip);
    }
}
