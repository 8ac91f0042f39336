//! # Section Classification
//!
//! Local-buckling class (1 to 4) of the flange and web elements per CSA S16-19
//! Table 2 (members in flexure, no axial load).
//!
//! | Element | Class 1 | Class 2 | Class 3 |
//! |---|---|---|---|
//! | I-shape / channel flange, b/t | 145/√Fy | 170/√Fy | 200/√Fy |
//! | Web, h/w | 1100/√Fy | 1700/√Fy | 1900/√Fy |
//! | Rectangular HSS flange, b/t | 420/√Fy | 525/√Fy | 670/√Fy |
//! | Round HSS, D/t | 13000/Fy | 18000/Fy | 66000/Fy |
//!
//! Anything above the class 3 limit is class 4. Higher Fy shrinks every limit,
//! so class never improves as Fy grows.
//!
//! ## Example
//!
//! ```rust
//! use steel_core::calculations::classification::{classify, SectionClass};
//! use steel_core::sections::SectionCatalog;
//!
//! let catalog = SectionCatalog::builtin().unwrap();
//! let section = catalog.lookup("W610x125").unwrap();
//! let result = classify(section, 350.0).unwrap();
//! assert!(result.overall <= SectionClass::Class2);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::sections::{SectionRecord, SectionShape};

const FLANGE_CONSTANTS: [f64; 3] = [145.0, 170.0, 200.0];
const WEB_CONSTANTS: [f64; 3] = [1100.0, 1700.0, 1900.0];
const HSS_FLANGE_CONSTANTS: [f64; 3] = [420.0, 525.0, 670.0];
const ROUND_HSS_CONSTANTS: [f64; 3] = [13_000.0, 18_000.0, 66_000.0];

/// Local-buckling class. Ordered: `Class1 < Class2 < Class3 < Class4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SectionClass {
    Class1,
    Class2,
    Class3,
    Class4,
}

impl SectionClass {
    /// Class number 1-4
    pub fn number(&self) -> u8 {
        match self {
            SectionClass::Class1 => 1,
            SectionClass::Class2 => 2,
            SectionClass::Class3 => 3,
            SectionClass::Class4 => 4,
        }
    }

    /// Class 1 and 2 sections reach the plastic moment
    pub fn is_plastic(&self) -> bool {
        *self <= SectionClass::Class2
    }
}

impl std::fmt::Display for SectionClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Class {}", self.number())
    }
}

/// Element that sets the overall class (display only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoverningElement {
    Flange,
    Web,
}

/// Upper slenderness bounds of classes 1, 2 and 3
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassLimits {
    pub class1: f64,
    pub class2: f64,
    pub class3: f64,
}

impl ClassLimits {
    /// Limits of the form constant / √Fy
    pub fn over_sqrt_fy(constants: [f64; 3], fy_mpa: f64) -> Self {
        let root = fy_mpa.sqrt();
        ClassLimits {
            class1: constants[0] / root,
            class2: constants[1] / root,
            class3: constants[2] / root,
        }
    }

    /// Limits of the form constant / Fy (round HSS)
    pub fn over_fy(constants: [f64; 3], fy_mpa: f64) -> Self {
        ClassLimits {
            class1: constants[0] / fy_mpa,
            class2: constants[1] / fy_mpa,
            class3: constants[2] / fy_mpa,
        }
    }

    /// Class of an element with the given slenderness ratio
    pub fn classify(&self, ratio: f64) -> SectionClass {
        if ratio <= self.class1 {
            SectionClass::Class1
        } else if ratio <= self.class2 {
            SectionClass::Class2
        } else if ratio <= self.class3 {
            SectionClass::Class3
        } else {
            SectionClass::Class4
        }
    }
}

/// Classification of one plate element
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementClassification {
    /// Width/thickness ratio used
    pub ratio: f64,
    pub limits: ClassLimits,
    pub class: SectionClass,
}

impl ElementClassification {
    fn new(ratio: f64, limits: ClassLimits) -> Self {
        ElementClassification {
            ratio,
            limits,
            class: limits.classify(ratio),
        }
    }
}

/// Full classification result. Recomputed on every evaluation.
///
/// Round HSS have a single wall element, reported as both flange and web.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionClassification {
    pub designation: String,
    pub fy_mpa: f64,
    pub flange: ElementClassification,
    pub web: ElementClassification,
    /// max(flange, web)
    pub overall: SectionClass,
    pub governing: GoverningElement,
}

/// Classify a section for flexure at yield stress `fy_mpa`.
///
/// # Errors
///
/// * `InvalidInput` when Fy is not positive
/// * `UnsupportedSection` for angles and tees
pub fn classify(section: &SectionRecord, fy_mpa: f64) -> CalcResult<SectionClassification> {
    if !(fy_mpa > 0.0) {
        return Err(CalcError::invalid_input("fy_mpa", fy_mpa.to_string(), "Yield stress must be positive"));
    }

    let (flange, web) = match &section.shape {
        SectionShape::IShape { flange_ratio, web_ratio, .. }
        | SectionShape::Channel { flange_ratio, web_ratio, .. } => (
            ElementClassification::new(*flange_ratio, ClassLimits::over_sqrt_fy(FLANGE_CONSTANTS, fy_mpa)),
            ElementClassification::new(*web_ratio, ClassLimits::over_sqrt_fy(WEB_CONSTANTS, fy_mpa)),
        ),
        SectionShape::RectangularHss { flange_ratio, web_ratio, .. } => (
            ElementClassification::new(*flange_ratio, ClassLimits::over_sqrt_fy(HSS_FLANGE_CONSTANTS, fy_mpa)),
            ElementClassification::new(*web_ratio, ClassLimits::over_sqrt_fy(WEB_CONSTANTS, fy_mpa)),
        ),
        SectionShape::RoundHss { diameter_ratio, .. } => {
            let wall = ElementClassification::new(*diameter_ratio, ClassLimits::over_fy(ROUND_HSS_CONSTANTS, fy_mpa));
            (wall, wall)
        }
        SectionShape::Angle { .. } | SectionShape::Tee { .. } => {
            return Err(CalcError::unsupported_section(
                &section.designation,
                "classification",
                format!("{} sections are not classified for flexure", section.family.display_name()),
            ));
        }
    };

    let (overall, governing) = if flange.class >= web.class {
        (flange.class, GoverningElement::Flange)
    } else {
        (web.class, GoverningElement::Web)
    };

    Ok(SectionClassification {
        designation: section.designation.clone(),
        fy_mpa,
        flange,
        web,
        overall,
        governing,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::test_support::w310x39;
    use crate::sections::{SectionCatalog, SectionFamily};

    #[test]
    fn test_w310x39_at_350() {
        // b/2t = 8.51: 145/√350 = 7.75 < 8.51 <= 170/√350 = 9.09 -> class 2
        // h/w = 50.1 <= 1100/√350 = 58.8 -> class 1
        let result = classify(&w310x39(), 350.0).unwrap();
        assert_eq!(result.flange.class, SectionClass::Class2);
        assert_eq!(result.web.class, SectionClass::Class1);
        assert_eq!(result.overall, SectionClass::Class2);
        assert_eq!(result.governing, GoverningElement::Flange);
        assert!((result.flange.limits.class1 - 145.0 / 350f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_slender_flange_is_class3() {
        // W250x18: b/2t = 9.43, between 170/√350 and 200/√350
        let catalog = SectionCatalog::builtin().unwrap();
        let section = catalog.lookup("W250x18").unwrap();
        let result = classify(section, 350.0).unwrap();
        assert_eq!(result.flange.class, SectionClass::Class3);
        assert!(!result.overall.is_plastic());
    }

    #[test]
    fn test_class_boundaries_inclusive() {
        let limits = ClassLimits { class1: 10.0, class2: 12.0, class3: 14.0 };
        assert_eq!(limits.classify(10.0), SectionClass::Class1);
        assert_eq!(limits.classify(10.0001), SectionClass::Class2);
        assert_eq!(limits.classify(14.0), SectionClass::Class3);
        assert_eq!(limits.classify(14.1), SectionClass::Class4);
    }

    #[test]
    fn test_web_governs_when_worse() {
        let mut section = w310x39();
        section.shape = SectionShape::IShape {
            flange_width_mm: 165.0,
            flange_thickness_mm: 9.7,
            web_thickness_mm: 5.8,
            flange_ratio: 5.0,
            web_ratio: 120.0,
        };
        let result = classify(&section, 350.0).unwrap();
        assert_eq!(result.web.class, SectionClass::Class4);
        assert_eq!(result.overall, SectionClass::Class4);
        assert_eq!(result.governing, GoverningElement::Web);
    }

    #[test]
    fn test_hss_limits() {
        let catalog = SectionCatalog::builtin().unwrap();
        let hss = catalog.lookup("HSS203x203x9.5").unwrap();
        let result = classify(hss, 350.0).unwrap();
        assert!((result.flange.limits.class1 - 420.0 / 350f64.sqrt()).abs() < 1e-9);
        assert_eq!(result.overall, SectionClass::Class1);

        let round = catalog.lookup("HSS219.1x8").unwrap();
        let result = classify(round, 350.0).unwrap();
        // D/t = 27.4 <= 13000/350 = 37.1
        assert_eq!(result.overall, SectionClass::Class1);
        assert_eq!(result.flange, result.web);
    }

    #[test]
    fn test_angles_and_tees_unsupported() {
        let catalog = SectionCatalog::builtin().unwrap();
        for family in [SectionFamily::L, SectionFamily::WT] {
            let section = catalog.family(family)[0];
            let err = classify(section, 350.0).unwrap_err();
            assert_eq!(err.error_code(), "UNSUPPORTED_SECTION");
        }
    }

    #[test]
    fn test_invalid_fy() {
        assert!(classify(&w310x39(), 0.0).is_err());
        assert!(classify(&w310x39(), f64::NAN).is_err());
    }

    #[test]
    fn test_classification_serialization() {
        let result = classify(&w310x39(), 300.0).unwrap();
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"overall\":\"Class2\""));
        let roundtrip: SectionClassification = serde_json::from_str(&json).unwrap();
        assert_eq!(result, roundtrip);
    }
}
