//! Engine settings
//!
//! A small JSON file of defaults for the command-line driver and other
//! hosts. Every field is optional in the file.
//!
//! ```json
//! {
//!   "catalog_path": "data/sections.json",
//!   "default_grade": "350W",
//!   "default_deflection_limit": 360.0,
//!   "max_results": 10,
//!   "beam_families": ["W"],
//!   "column_families": ["W", "HSS"],
//!   "tension_families": ["L"]
//! }
//! ```
//!
//! Material constants (E, G, φ, n) are not configurable.

use std::borrow::Cow;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::materials::SteelGrade;
use crate::sections::{SectionCatalog, SectionFamily};
use crate::selection::beam::DEFAULT_DEFLECTION_LIMIT;
use crate::selection::{default_beam_families, default_column_families, default_tension_families};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// External catalog file; the built-in catalog when absent
    pub catalog_path: Option<PathBuf>,
    pub default_grade: SteelGrade,
    /// Denominator of L/limit
    pub default_deflection_limit: f64,
    /// Truncate result lists for display
    pub max_results: Option<usize>,
    pub beam_families: Vec<SectionFamily>,
    pub column_families: Vec<SectionFamily>,
    pub tension_families: Vec<SectionFamily>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            catalog_path: None,
            default_grade: SteelGrade::default(),
            default_deflection_limit: DEFAULT_DEFLECTION_LIMIT,
            max_results: None,
            beam_families: default_beam_families(),
            column_families: default_column_families(),
            tension_families: default_tension_families(),
        }
    }
}

impl EngineSettings {
    /// Read settings from a JSON file.
    ///
    /// # Errors
    ///
    /// * `FileError` when the file cannot be read
    /// * `SerializationError` when it is not valid settings JSON
    pub fn load(path: impl AsRef<Path>) -> CalcResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;
        let settings: EngineSettings = serde_json::from_str(&text).map_err(|e| CalcError::SerializationError {
            reason: format!("Invalid settings in {}: {}", path.display(), e),
        })?;
        settings.validate()?;
        tracing::debug!(path = %path.display(), "engine settings loaded");
        Ok(settings)
    }

    /// Write settings through a temp file and rename, so a partial write
    /// never replaces a good file.
    pub fn save(&self, path: impl AsRef<Path>) -> CalcResult<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        let tmp_path = path.with_extension("json.tmp");

        let mut tmp_file = File::create(&tmp_path)
            .map_err(|e| CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string()))?;
        tmp_file
            .write_all(json.as_bytes())
            .map_err(|e| CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string()))?;
        tmp_file
            .sync_all()
            .map_err(|e| CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string()))?;

        fs::rename(&tmp_path, path).map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
        })
    }

    pub fn validate(&self) -> CalcResult<()> {
        if !(self.default_deflection_limit > 0.0) || !self.default_deflection_limit.is_finite() {
            return Err(CalcError::invalid_input(
                "default_deflection_limit",
                self.default_deflection_limit.to_string(),
                "Deflection limit must be positive",
            ));
        }
        for (field, families) in [
            ("beam_families", &self.beam_families),
            ("column_families", &self.column_families),
            ("tension_families", &self.tension_families),
        ] {
            if families.is_empty() {
                return Err(CalcError::invalid_input(field, "[]", "At least one section family is required"));
            }
        }
        if self.max_results == Some(0) {
            return Err(CalcError::invalid_input("max_results", "0", "Must be at least 1 when set"));
        }
        Ok(())
    }

    /// The configured catalog: the external file when set, else the built-in one.
    pub fn catalog(&self) -> CalcResult<Cow<'static, SectionCatalog>> {
        match &self.catalog_path {
            Some(path) => SectionCatalog::load_from_file(path).map(Cow::Owned),
            None => SectionCatalog::builtin().map(Cow::Borrowed),
        }
    }

    /// Apply `max_results` to a result list
    pub fn truncate<T>(&self, results: &mut Vec<T>) {
        if let Some(max) = self.max_results {
            results.truncate(max);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;

    fn temp_path(name: &str) -> PathBuf {
        temp_dir().join(format!("steel_settings_test_{}.json", name))
    }

    #[test]
    fn test_defaults() {
        let settings = EngineSettings::default();
        assert_eq!(settings.default_grade, SteelGrade::G350W);
        assert_eq!(settings.default_deflection_limit, 360.0);
        assert_eq!(settings.beam_families, vec![SectionFamily::W]);
        assert_eq!(settings.tension_families, vec![SectionFamily::L]);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: EngineSettings = serde_json::from_str(r#"{"default_grade": "300W", "max_results": 5}"#).unwrap();
        assert_eq!(settings.default_grade, SteelGrade::G300W);
        assert_eq!(settings.max_results, Some(5));
        assert_eq!(settings.default_deflection_limit, 360.0);
        assert!(settings.catalog_path.is_none());
    }

    #[test]
    fn test_save_load_round_trip() {
        let path = temp_path("round_trip");
        let settings = EngineSettings {
            max_results: Some(3),
            column_families: vec![SectionFamily::W, SectionFamily::HssRect],
            ..Default::default()
        };
        settings.save(&path).unwrap();
        let loaded = EngineSettings::load(&path).unwrap();
        assert_eq!(loaded, settings);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file() {
        let err = EngineSettings::load(temp_path("does_not_exist")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_invalid_json() {
        let path = temp_path("invalid");
        fs::write(&path, "{ not json").unwrap();
        let err = EngineSettings::load(&path).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_empty_family_list_rejected() {
        let settings = EngineSettings { column_families: Vec::new(), ..Default::default() };
        assert_eq!(settings.validate().unwrap_err().error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_truncate() {
        let settings = EngineSettings { max_results: Some(2), ..Default::default() };
        let mut values = vec![1, 2, 3];
        settings.truncate(&mut values);
        assert_eq!(values, vec![1, 2]);
    }

    #[test]
    fn test_builtin_catalog_by_default() {
        let catalog = EngineSettings::default().catalog().unwrap();
        assert!(matches!(catalog, Cow::Borrowed(_)));
        assert!(!catalog.is_empty());
    }
}
