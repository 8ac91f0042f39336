//! # Shear Resistance
//!
//! Simplified web shear per CSA S16-19 Clause 13.4.1.1:
//!
//! ```text
//! threshold = 1014 / √Fy
//! Fs = 0.66·Fy                          (h/w ≤ threshold)
//! Fs = 0.66·Fy · (threshold / (h/w))    (h/w > threshold)
//! Vr = φ·Aw·Fs
//! ```
//!
//! Shear area by shape: `d·w` for I-shapes and channels, `2·d·t` for
//! rectangular HSS, `A/2` for round HSS. Round HSS compare D/t against the
//! same threshold. The full tension-field provisions are not modelled.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::materials::PHI;
use crate::sections::{SectionRecord, SectionShape};
use crate::units::{KiloNewtons, Newtons};

const SHEAR_YIELD_FRACTION: f64 = 0.66;
const WEB_SLENDERNESS_CONSTANT: f64 = 1014.0;

/// Factored shear resistance with the intermediate values used
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShearResistance {
    pub designation: String,
    /// Aw (mm²)
    pub shear_area_mm2: f64,
    /// Web slenderness h/w (D/t for round HSS)
    pub web_ratio: f64,
    /// 1014/√Fy
    pub threshold: f64,
    /// Shear stress Fs (MPa)
    pub fs_mpa: f64,
    /// True when the buckling reduction was applied
    pub reduced: bool,
    /// Vr (kN)
    pub vr_kn: f64,
}

/// Shear area and governing slenderness for a section
fn shear_area(section: &SectionRecord) -> CalcResult<(f64, f64)> {
    match &section.shape {
        SectionShape::IShape { web_thickness_mm, web_ratio, .. }
        | SectionShape::Channel { web_thickness_mm, web_ratio, .. } => {
            Ok((section.depth_mm * web_thickness_mm, *web_ratio))
        }
        SectionShape::RectangularHss { wall_thickness_mm, web_ratio, .. } => {
            Ok((2.0 * section.depth_mm * wall_thickness_mm, *web_ratio))
        }
        SectionShape::RoundHss { diameter_ratio, .. } => Ok((section.area_mm2 / 2.0, *diameter_ratio)),
        SectionShape::Angle { .. } | SectionShape::Tee { .. } => Err(CalcError::unsupported_section(
            &section.designation,
            "shear resistance",
            format!("{} sections have no web shear model", section.family.display_name()),
        )),
    }
}

/// Factored shear resistance of the web.
///
/// # Errors
///
/// * `InvalidInput` for non-positive Fy
/// * `UnsupportedSection` for angles and tees
pub fn shear_resistance(section: &SectionRecord, fy_mpa: f64) -> CalcResult<ShearResistance> {
    if !(fy_mpa > 0.0) {
        return Err(CalcError::invalid_input("fy_mpa", fy_mpa.to_string(), "Yield stress must be positive"));
    }

    let (area, ratio) = shear_area(section)?;
    let threshold = WEB_SLENDERNESS_CONSTANT / fy_mpa.sqrt();
    let yield_stress = SHEAR_YIELD_FRACTION * fy_mpa;
    let reduced = ratio > threshold;
    let fs = if reduced {
        yield_stress * (threshold / ratio)
    } else {
        yield_stress
    };

    Ok(ShearResistance {
        designation: section.designation.clone(),
        shear_area_mm2: area,
        web_ratio: ratio,
        threshold,
        fs_mpa: fs,
        reduced,
        vr_kn: KiloNewtons::from(Newtons(PHI * area * fs)).0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::test_support::w310x39;
    use crate::sections::SectionCatalog;

    #[test]
    fn test_stocky_web_yields() {
        // Aw = 310 * 5.8 = 1798 mm², Vr = 0.9 * 1798 * 0.66 * 350 / 1000 = 373.8 kN
        let result = shear_resistance(&w310x39(), 350.0).unwrap();
        assert!(!result.reduced);
        assert!((result.shear_area_mm2 - 1798.0).abs() < 1e-9);
        assert!((result.vr_kn - 373.8042).abs() < 1e-3, "Vr = {}", result.vr_kn);
    }

    #[test]
    fn test_slender_web_is_reduced() {
        let mut section = w310x39();
        section.shape = SectionShape::IShape {
            flange_width_mm: 165.0,
            flange_thickness_mm: 9.7,
            web_thickness_mm: 5.8,
            flange_ratio: 8.51,
            web_ratio: 80.0,
        };
        let result = shear_resistance(&section, 350.0).unwrap();
        assert!(result.reduced);
        let expected_fs = 0.66 * 350.0 * (1014.0 / 350f64.sqrt()) / 80.0;
        assert!((result.fs_mpa - expected_fs).abs() < 1e-9);
        assert!(result.fs_mpa < 0.66 * 350.0);
    }

    #[test]
    fn test_hss_shear_areas() {
        let catalog = SectionCatalog::builtin().unwrap();
        let rect = catalog.lookup("HSS203x203x9.5").unwrap();
        let result = shear_resistance(rect, 350.0).unwrap();
        assert!((result.shear_area_mm2 - 2.0 * 203.0 * 9.5).abs() < 1e-6);

        let round = catalog.lookup("HSS219.1x8").unwrap();
        let result = shear_resistance(round, 350.0).unwrap();
        assert!((result.shear_area_mm2 - round.area_mm2 / 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_angle_unsupported() {
        let catalog = SectionCatalog::builtin().unwrap();
        let angle = catalog.lookup("L102x102x9.5").unwrap();
        let err = shear_resistance(angle, 350.0).unwrap_err();
        assert_eq!(err.error_code(), "UNSUPPORTED_SECTION");
    }
}
