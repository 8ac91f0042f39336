//! Load type definitions per NBC 2020 Part 4
//!
//! The principal and companion loads that appear in the limit-states
//! combinations of Table 4.1.3.2-A.

use serde::{Deserialize, Serialize};

/// Specified (unfactored) load categories
///
/// JSON accepts either the variant name or the code (`"Dead"` or `"D"`).
///
/// # Example
/// ```
/// use steel_core::loads::LoadType;
///
/// let dead = LoadType::Dead;
/// assert_eq!(dead.code(), "D");
/// assert_eq!(dead.description(), "Dead load");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LoadType {
    /// D - Dead load (self-weight and permanent attachments)
    #[serde(alias = "D")]
    Dead,
    /// L - Live load due to use and occupancy
    #[serde(alias = "L")]
    Live,
    /// S - Snow load, including rain
    #[serde(alias = "S")]
    Snow,
    /// W - Wind load
    #[serde(alias = "W")]
    Wind,
    /// E - Earthquake load
    #[serde(alias = "E")]
    Earthquake,
}

impl LoadType {
    /// All load types in standard order
    pub const ALL: [LoadType; 5] = [
        LoadType::Dead,
        LoadType::Live,
        LoadType::Snow,
        LoadType::Wind,
        LoadType::Earthquake,
    ];

    /// Standard abbreviation code (D, L, S, W, E)
    pub fn code(&self) -> &'static str {
        match self {
            LoadType::Dead => "D",
            LoadType::Live => "L",
            LoadType::Snow => "S",
            LoadType::Wind => "W",
            LoadType::Earthquake => "E",
        }
    }

    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            LoadType::Dead => "Dead load",
            LoadType::Live => "Live load",
            LoadType::Snow => "Snow load",
            LoadType::Wind => "Wind load",
            LoadType::Earthquake => "Earthquake load",
        }
    }

    /// Gravity loads act downward and cannot be negative
    pub fn is_gravity(&self) -> bool {
        matches!(self, LoadType::Dead | LoadType::Live | LoadType::Snow)
    }
}

impl std::fmt::Display for LoadType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_type_codes() {
        let codes: Vec<&str> = LoadType::ALL.iter().map(|t| t.code()).collect();
        assert_eq!(codes, vec!["D", "L", "S", "W", "E"]);
    }

    #[test]
    fn test_gravity() {
        assert!(LoadType::Snow.is_gravity());
        assert!(!LoadType::Wind.is_gravity());
        assert!(!LoadType::Earthquake.is_gravity());
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&LoadType::Earthquake).unwrap();
        assert_eq!(json, "\"Earthquake\"");
        let parsed: LoadType = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, LoadType::Earthquake);
    }

    #[test]
    fn test_code_aliases_as_map_keys() {
        let loads: std::collections::BTreeMap<LoadType, f64> =
            serde_json::from_str(r#"{"D": 5.0, "S": 8.0, "Live": 2.0}"#).unwrap();
        assert_eq!(loads.get(&LoadType::Dead), Some(&5.0));
        assert_eq!(loads.get(&LoadType::Snow), Some(&8.0));
        assert_eq!(loads.get(&LoadType::Live), Some(&2.0));
        assert!(serde_json::from_str::<LoadType>("\"Lr\"").is_err());
    }
}
