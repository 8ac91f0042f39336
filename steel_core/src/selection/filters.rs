//! Geometric candidate filters
//!
//! Applied before any strength check. Each bound is optional; an absent
//! bound admits every section.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::sections::SectionRecord;

/// Optional dimension and mass bounds for a search
///
/// ## JSON Example
///
/// ```json
/// { "min_depth_mm": 300.0, "max_mass_kg_per_m": 80.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DimensionFilters {
    pub min_depth_mm: Option<f64>,
    pub min_flange_width_mm: Option<f64>,
    pub max_depth_mm: Option<f64>,
    pub max_mass_kg_per_m: Option<f64>,
}

impl DimensionFilters {
    /// Bounds must be finite and non-negative, and min depth ≤ max depth.
    pub fn validate(&self) -> CalcResult<()> {
        let bounds = [
            ("min_depth_mm", self.min_depth_mm),
            ("min_flange_width_mm", self.min_flange_width_mm),
            ("max_depth_mm", self.max_depth_mm),
            ("max_mass_kg_per_m", self.max_mass_kg_per_m),
        ];
        for (field, bound) in bounds {
            if let Some(value) = bound {
                if !(value >= 0.0) || !value.is_finite() {
                    return Err(CalcError::invalid_input(field, value.to_string(), "Filter bound must be non-negative"));
                }
            }
        }
        if let (Some(min), Some(max)) = (self.min_depth_mm, self.max_depth_mm) {
            if min > max {
                return Err(CalcError::invalid_input(
                    "max_depth_mm",
                    max.to_string(),
                    format!("Maximum depth is below the minimum depth {}", min),
                ));
            }
        }
        Ok(())
    }

    /// Name of the first bound the section violates, if any
    pub fn rejection(&self, section: &SectionRecord) -> Option<&'static str> {
        if self.min_depth_mm.is_some_and(|min| section.depth_mm < min) {
            return Some("min_depth_mm");
        }
        if self.min_flange_width_mm.is_some_and(|min| section.width_mm() < min) {
            return Some("min_flange_width_mm");
        }
        if self.max_depth_mm.is_some_and(|max| section.depth_mm > max) {
            return Some("max_depth_mm");
        }
        if self.max_mass_kg_per_m.is_some_and(|max| section.mass_kg_per_m > max) {
            return Some("max_mass_kg_per_m");
        }
        None
    }

    pub fn admits(&self, section: &SectionRecord) -> bool {
        self.rejection(section).is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::test_support::w310x39;

    #[test]
    fn test_empty_filters_admit_everything() {
        assert!(DimensionFilters::default().admits(&w310x39()));
    }

    #[test]
    fn test_each_bound() {
        let section = w310x39();
        let deep = DimensionFilters { min_depth_mm: Some(350.0), ..Default::default() };
        assert_eq!(deep.rejection(&section), Some("min_depth_mm"));

        let wide = DimensionFilters { min_flange_width_mm: Some(170.0), ..Default::default() };
        assert_eq!(wide.rejection(&section), Some("min_flange_width_mm"));

        let shallow = DimensionFilters { max_depth_mm: Some(300.0), ..Default::default() };
        assert_eq!(shallow.rejection(&section), Some("max_depth_mm"));

        let light = DimensionFilters { max_mass_kg_per_m: Some(35.0), ..Default::default() };
        assert_eq!(light.rejection(&section), Some("max_mass_kg_per_m"));

        let exact = DimensionFilters {
            min_depth_mm: Some(310.0),
            max_depth_mm: Some(310.0),
            ..Default::default()
        };
        assert!(exact.admits(&section));
    }

    #[test]
    fn test_validation() {
        let negative = DimensionFilters { min_depth_mm: Some(-1.0), ..Default::default() };
        assert!(negative.validate().is_err());

        let inverted = DimensionFilters {
            min_depth_mm: Some(400.0),
            max_depth_mm: Some(300.0),
            ..Default::default()
        };
        assert!(inverted.validate().is_err());
        assert!(DimensionFilters::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let filters: DimensionFilters = serde_json::from_str(r#"{"min_depth_mm": 300.0}"#).unwrap();
        assert_eq!(filters.min_depth_mm, Some(300.0));
        assert_eq!(filters.max_mass_kg_per_m, None);
    }
}
