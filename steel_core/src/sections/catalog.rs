//! Section Catalog
//!
//! Read-only collection of section records, loaded once and shared for the
//! process lifetime.
//!
//! ## Input format
//!
//! One JSON object keyed by family code. Each family holds a list of flat
//! records mapping handbook property codes to decimal strings:
//!
//! ```json
//! {
//!   "W": [
//!     { "Dsg": "W310x39", "Mass": "39", "A": "4930", "D": "310", "B": "165",
//!       "T": "9.7", "W": "5.8", "BT": "8.51", "HW": "50.1",
//!       "Ix": "85.1", "Sx": "549", "Rx": "131", "Zx": "610",
//!       "Iy": "7.23", "Sy": "87.5", "Ry": "38.3", "Zy": "134",
//!       "J": "86.0", "Cw": "163" }
//!   ]
//! }
//! ```
//!
//! Values are stored at the handbook scale: I in 10⁶ mm⁴, S/Z and J in
//! 10³ mm³/mm⁴, Cw in 10⁹ mm⁶ for I-shapes and channels and in 10⁶ mm⁶ for
//! the smaller families. [`SectionCatalog::from_json_str`] resolves every
//! multiplier in one pass, so records only ever hold base SI values.
//!
//! Unparseable or negative values are data-integrity faults, not user errors.

use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::str::FromStr;

use super::{SectionFamily, SectionRecord, SectionShape, ShapeKind};
use crate::errors::{CalcError, CalcResult};
use crate::units::{SCALE_E3, SCALE_E6, SCALE_E9};

static BUILTIN_JSON: &str = include_str!("../../assets/sections.json");

static BUILTIN: Lazy<CalcResult<SectionCatalog>> = Lazy::new(|| {
    let catalog = SectionCatalog::from_json_str(BUILTIN_JSON);
    if let Ok(catalog) = &catalog {
        tracing::info!(records = catalog.len(), "built-in section catalog loaded");
    }
    catalog
});

/// Raw catalog file: family code -> records of code -> decimal string
#[derive(Debug, Deserialize)]
#[serde(transparent)]
struct RawCatalog(BTreeMap<String, Vec<HashMap<String, String>>>);

/// Records of one family
#[derive(Debug, Clone, Default)]
struct FamilyTable {
    /// Records indexed by uppercase designation
    records: HashMap<String, SectionRecord>,
    /// Keys ascending by mass then designation
    order: Vec<String>,
}

impl FamilyTable {
    fn ordered(&self) -> impl Iterator<Item = &SectionRecord> {
        self.order.iter().filter_map(|k| self.records.get(k))
    }
}

/// Section catalog indexed by family, then by designation.
///
/// A designation is unique within its family; two families may share one.
#[derive(Debug, Clone, Default)]
pub struct SectionCatalog {
    tables: BTreeMap<SectionFamily, FamilyTable>,
}

impl SectionCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// The embedded catalog, parsed on first use.
    pub fn builtin() -> CalcResult<&'static SectionCatalog> {
        match &*BUILTIN {
            Ok(catalog) => Ok(catalog),
            Err(e) => Err(e.clone()),
        }
    }

    /// Load a catalog from a JSON file on disk.
    pub fn load_from_file(path: impl AsRef<Path>) -> CalcResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            CalcError::file_error("read", path.display().to_string(), format!("Failed to read catalog: {}", e))
        })?;
        let catalog = Self::from_json_str(&text)?;
        tracing::info!(path = %path.display(), records = catalog.len(), "section catalog loaded");
        Ok(catalog)
    }

    /// Parse and normalize a catalog from its JSON text.
    ///
    /// Unknown family codes are skipped with a warning. Any malformed value
    /// in a known family fails the whole load.
    pub fn from_json_str(json: &str) -> CalcResult<Self> {
        let raw: RawCatalog = serde_json::from_str(json)?;
        let mut catalog = SectionCatalog::new();

        for (family_code, rows) in raw.0 {
            let Some(family) = SectionFamily::from_code(&family_code) else {
                tracing::warn!(family = %family_code, rows = rows.len(), "skipping unknown section family");
                continue;
            };

            for row in &rows {
                let record = RawRecord::new(family, row)?.normalize()?;
                catalog.insert(record)?;
            }
            tracing::debug!(family = %family, rows = rows.len(), "family normalized");
        }

        Ok(catalog)
    }

    /// Insert a record, keeping its family ordered by mass.
    ///
    /// Fails on invalid properties or a designation already present in the
    /// same family.
    pub fn insert(&mut self, record: SectionRecord) -> CalcResult<()> {
        record.validate()?;

        let key = record.designation.to_uppercase();
        let table = self.tables.entry(record.family).or_default();
        if table.records.contains_key(&key) {
            return Err(CalcError::data_integrity(
                record.family.code(),
                &record.designation,
                "Dsg",
                "Duplicate designation within family",
            ));
        }

        let rank = (record.mass_kg_per_m, record.designation.clone());
        let records = &table.records;
        let position = table.order.partition_point(|k| {
            records
                .get(k)
                .map(|r| (r.mass_kg_per_m, r.designation.as_str()) < (rank.0, rank.1.as_str()))
                .unwrap_or(true)
        });
        table.order.insert(position, key.clone());
        table.records.insert(key, record);
        Ok(())
    }

    /// Look up a section by designation (case-insensitive).
    ///
    /// When several families carry the designation, the first family in
    /// [`SectionFamily`] order wins; use [`lookup_in`](Self::lookup_in) to pick one.
    pub fn lookup(&self, designation: &str) -> CalcResult<&SectionRecord> {
        let key = designation.trim().to_uppercase();
        self.tables
            .values()
            .find_map(|table| table.records.get(&key))
            .ok_or_else(|| CalcError::section_not_found(designation))
    }

    /// Look up a section by designation within one family
    pub fn lookup_in(&self, family: SectionFamily, designation: &str) -> CalcResult<&SectionRecord> {
        self.tables
            .get(&family)
            .and_then(|table| table.records.get(&designation.trim().to_uppercase()))
            .ok_or_else(|| CalcError::section_not_found(designation))
    }

    /// All sections of one family, lightest first
    pub fn family(&self, family: SectionFamily) -> Vec<&SectionRecord> {
        self.tables
            .get(&family)
            .map(|table| table.ordered().collect())
            .unwrap_or_default()
    }

    /// Sections of several families, concatenated family by family
    pub fn families(&self, families: &[SectionFamily]) -> Vec<&SectionRecord> {
        families.iter().flat_map(|f| self.family(*f)).collect()
    }

    /// Prefix search on designation (e.g. "W310" matches every W310),
    /// lightest first with designation breaking ties.
    pub fn search(&self, prefix: &str) -> Vec<&SectionRecord> {
        let prefix = prefix.trim().to_uppercase();
        let mut found: Vec<&SectionRecord> = self
            .tables
            .values()
            .flat_map(|table| table.ordered())
            .filter(|r| r.designation.to_uppercase().starts_with(&prefix))
            .collect();
        found.sort_by(|a, b| {
            a.mass_kg_per_m
                .total_cmp(&b.mass_kg_per_m)
                .then_with(|| a.designation.cmp(&b.designation))
        });
        found
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.tables.values().map(|table| table.records.len()).sum()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Handbook scale multiplier for a property code in a given family.
fn property_scale(kind: ShapeKind, code: &str) -> f64 {
    match code {
        "Ix" | "Iy" => SCALE_E6,
        "Sx" | "Sy" | "Zx" | "Zy" | "J" => SCALE_E3,
        "Cw" => match kind {
            ShapeKind::IShape | ShapeKind::Channel => SCALE_E9,
            _ => SCALE_E6,
        },
        _ => 1.0,
    }
}

/// Parse a decimal string from the catalog.
///
/// Empty cells and dashes mean "not published" and give `Ok(None)`.
fn parse_decimal(raw: &str) -> Result<Option<f64>, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "-" || trimmed == "—" {
        return Ok(None);
    }
    match f64::from_str(trimmed) {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        Ok(_) => Err(format!("'{}' is not finite", trimmed)),
        Err(_) => Err(format!("'{}' is not a decimal number", trimmed)),
    }
}

/// One unnormalized catalog row
struct RawRecord<'a> {
    family: SectionFamily,
    designation: &'a str,
    values: &'a HashMap<String, String>,
}

impl<'a> RawRecord<'a> {
    fn new(family: SectionFamily, values: &'a HashMap<String, String>) -> CalcResult<Self> {
        let designation = values
            .get("Dsg")
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| CalcError::data_integrity(family.code(), "?", "Dsg", "Record has no designation"))?;
        Ok(RawRecord { family, designation, values })
    }

    fn fault(&self, code: &str, reason: impl Into<String>) -> CalcError {
        CalcError::data_integrity(self.family.code(), self.designation, code, reason)
    }

    /// Scaled value, `None` when the cell is absent or blank
    fn optional(&self, code: &str) -> CalcResult<Option<f64>> {
        let Some(raw) = self.values.get(code) else {
            return Ok(None);
        };
        let value = parse_decimal(raw).map_err(|reason| self.fault(code, reason))?;
        Ok(value.map(|v| v * property_scale(self.family.shape_kind(), code)))
    }

    fn required(&self, code: &str) -> CalcResult<f64> {
        self.optional(code)?
            .ok_or_else(|| self.fault(code, "Required property is missing"))
    }

    fn normalize(&self) -> CalcResult<SectionRecord> {
        let kind = self.family.shape_kind();

        let shape = match kind {
            ShapeKind::IShape => SectionShape::IShape {
                flange_width_mm: self.required("B")?,
                flange_thickness_mm: self.required("T")?,
                web_thickness_mm: self.required("W")?,
                flange_ratio: self.required("BT")?,
                web_ratio: self.required("HW")?,
            },
            ShapeKind::Channel => SectionShape::Channel {
                flange_width_mm: self.required("B")?,
                flange_thickness_mm: self.required("T")?,
                web_thickness_mm: self.required("W")?,
                flange_ratio: self.required("BT")?,
                web_ratio: self.required("HW")?,
                x_bar_mm: self.required("X")?,
                x_o_mm: self.required("Xo")?,
            },
            ShapeKind::Angle => SectionShape::Angle {
                long_leg_mm: self.required("D")?,
                short_leg_mm: self.required("B")?,
                thickness_mm: self.required("T")?,
                leg_ratio: self.required("BT")?,
                x_bar_mm: self.required("X")?,
                y_bar_mm: self.required("Y")?,
                r_z_mm: self.required("Rz")?,
            },
            ShapeKind::Tee => SectionShape::Tee {
                flange_width_mm: self.required("B")?,
                flange_thickness_mm: self.required("T")?,
                stem_thickness_mm: self.required("W")?,
                flange_ratio: self.required("BT")?,
                stem_ratio: self.required("DW")?,
                y_bar_mm: self.required("Y")?,
                y_o_mm: self.required("Yo")?,
            },
            ShapeKind::RectangularHss => {
                let t = self.required("T")?;
                SectionShape::RectangularHss {
                    width_mm: self.required("B")?,
                    wall_thickness_mm: t,
                    // Class C tubes: outside corner radius 2t when not published
                    corner_radius_mm: self.optional("R")?.unwrap_or(2.0 * t),
                    flange_ratio: self.required("BT")?,
                    web_ratio: self.required("HT")?,
                }
            }
            ShapeKind::RoundHss => SectionShape::RoundHss {
                outside_diameter_mm: self.required("OD")?,
                wall_thickness_mm: self.required("T")?,
                diameter_ratio: self.required("DT")?,
            },
        };

        let depth_mm = match kind {
            ShapeKind::RoundHss => self.required("OD")?,
            _ => self.required("D")?,
        };

        // Warping is negligible for closed and single-element-junction shapes
        let cw_mm6 = match kind {
            ShapeKind::IShape | ShapeKind::Channel => self.required("Cw")?,
            _ => self.optional("Cw")?.unwrap_or(0.0),
        };

        Ok(SectionRecord {
            designation: self.designation.to_string(),
            family: self.family,
            mass_kg_per_m: self.required("Mass")?,
            area_mm2: self.required("A")?,
            depth_mm,
            ix_mm4: self.required("Ix")?,
            sx_mm3: self.required("Sx")?,
            rx_mm: self.required("Rx")?,
            zx_mm3: self.required("Zx")?,
            iy_mm4: self.required("Iy")?,
            sy_mm3: self.required("Sy")?,
            ry_mm: self.required("Ry")?,
            zy_mm3: self.required("Zy")?,
            j_mm4: self.required("J")?,
            cw_mm6,
            shape,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_W: &str = r#"{
        "W": [
            { "Dsg": "W310x39", "Mass": "39", "A": "4930", "D": "310", "B": "165",
              "T": "9.7", "W": "5.8", "BT": "8.51", "HW": "50.1",
              "Ix": "85.1", "Sx": "549", "Rx": "131", "Zx": "610",
              "Iy": "7.23", "Sy": "87.5", "Ry": "38.3", "Zy": "134",
              "J": "86.0", "Cw": "163" }
        ]
    }"#;

    #[test]
    fn test_scale_normalization() {
        let catalog = SectionCatalog::from_json_str(ONE_W).unwrap();
        let w = catalog.lookup("W310x39").unwrap();
        assert!((w.ix_mm4 - 85.1e6).abs() < 1.0);
        assert!((w.zx_mm3 - 610.0e3).abs() < 1e-6);
        assert!((w.j_mm4 - 86.0e3).abs() < 1e-6);
        assert!((w.cw_mm6 - 163.0e9).abs() < 1.0);
        assert_eq!(w.mass_kg_per_m, 39.0);
    }

    #[test]
    fn test_cw_scale_is_family_specific() {
        assert_eq!(property_scale(ShapeKind::IShape, "Cw"), 1.0e9);
        assert_eq!(property_scale(ShapeKind::Channel, "Cw"), 1.0e9);
        assert_eq!(property_scale(ShapeKind::Angle, "Cw"), 1.0e6);
        assert_eq!(property_scale(ShapeKind::Tee, "Cw"), 1.0e6);
        assert_eq!(property_scale(ShapeKind::IShape, "Rx"), 1.0);
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("123.45"), Ok(Some(123.45)));
        assert_eq!(parse_decimal("  456  "), Ok(Some(456.0)));
        assert_eq!(parse_decimal(""), Ok(None));
        assert_eq!(parse_decimal("-"), Ok(None));
        assert_eq!(parse_decimal("—"), Ok(None));
        assert!(parse_decimal("not a number").is_err());
        assert!(parse_decimal("inf").is_err());
    }

    #[test]
    fn test_bad_value_is_data_fault() {
        let json = ONE_W.replace("\"85.1\"", "\"8x5\"");
        let err = SectionCatalog::from_json_str(&json).unwrap_err();
        assert!(err.is_data_fault());
        assert!(err.to_string().contains("Ix"));
    }

    #[test]
    fn test_missing_required_property() {
        let json = ONE_W.replace("\"Cw\": \"163\"", "\"Cw\": \"\"");
        let err = SectionCatalog::from_json_str(&json).unwrap_err();
        assert_eq!(err.error_code(), "DATA_INTEGRITY");
    }

    #[test]
    fn test_negative_value_rejected() {
        let json = ONE_W.replace("\"Zy\": \"134\"", "\"Zy\": \"-134\"");
        assert!(SectionCatalog::from_json_str(&json).is_err());
    }

    #[test]
    fn test_duplicate_designation_rejected() {
        let mut catalog = SectionCatalog::from_json_str(ONE_W).unwrap();
        let copy = catalog.lookup("W310x39").unwrap().clone();
        let err = catalog.insert(copy).unwrap_err();
        assert!(err.is_data_fault());
    }

    #[test]
    fn test_designation_unique_per_family_only() {
        let mut catalog = SectionCatalog::from_json_str(ONE_W).unwrap();
        let mut as_s = catalog.lookup("W310x39").unwrap().clone();
        as_s.family = SectionFamily::S;
        as_s.mass_kg_per_m = 40.0;
        catalog.insert(as_s).unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.lookup("W310x39").unwrap().family, SectionFamily::W);
        assert_eq!(catalog.lookup_in(SectionFamily::S, "w310x39").unwrap().mass_kg_per_m, 40.0);
        assert_eq!(catalog.family(SectionFamily::S).len(), 1);
        assert!(catalog.lookup_in(SectionFamily::C, "W310x39").is_err());
    }

    #[test]
    fn test_unknown_family_skipped() {
        let json = r#"{ "PIPE": [ { "Dsg": "P1" } ] }"#;
        let catalog = SectionCatalog::from_json_str(json).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_builtin_catalog() {
        let catalog = SectionCatalog::builtin().unwrap();
        assert!(catalog.len() > 100);
        for family in [
            SectionFamily::W,
            SectionFamily::S,
            SectionFamily::C,
            SectionFamily::HssRect,
            SectionFamily::HssRound,
            SectionFamily::L,
            SectionFamily::WT,
        ] {
            assert!(!catalog.family(family).is_empty(), "no {} records", family);
        }

        let lower = catalog.lookup("w310x39").unwrap();
        let upper = catalog.lookup("W310X39").unwrap();
        assert_eq!(lower.designation, upper.designation);
    }

    #[test]
    fn test_family_listing_sorted_by_mass() {
        let catalog = SectionCatalog::builtin().unwrap();
        let ws = catalog.family(SectionFamily::W);
        assert!(ws.iter().all(|s| s.family == SectionFamily::W));
        for pair in ws.windows(2) {
            assert!(pair[0].mass_kg_per_m <= pair[1].mass_kg_per_m);
        }
    }

    #[test]
    fn test_family_specific_shapes() {
        let catalog = SectionCatalog::builtin().unwrap();
        let channel = catalog.family(SectionFamily::C)[0];
        assert!(matches!(channel.shape, SectionShape::Channel { .. }));

        let round = catalog.family(SectionFamily::HssRound)[0];
        match round.shape {
            SectionShape::RoundHss { outside_diameter_mm, .. } => assert_eq!(round.depth_mm, outside_diameter_mm),
            _ => panic!("round HSS parsed as {:?}", round.shape),
        }

        let angle = catalog.family(SectionFamily::L)[0];
        assert!(angle.r_min() < angle.rx_mm.min(angle.ry_mm));
    }

    #[test]
    fn test_search_prefix() {
        let catalog = SectionCatalog::builtin().unwrap();
        let w310 = catalog.search("W310");
        assert!(!w310.is_empty());
        assert!(w310.iter().all(|s| s.designation.starts_with("W310")));
    }

    #[test]
    fn test_search_breaks_mass_ties_by_designation() {
        let catalog = SectionCatalog::builtin().unwrap();
        let found = catalog.search("W");
        for pair in found.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            assert!(
                a.mass_kg_per_m < b.mass_kg_per_m
                    || (a.mass_kg_per_m == b.mass_kg_per_m && a.designation <= b.designation)
            );
        }
        let w74: Vec<&str> = found
            .iter()
            .filter(|s| s.mass_kg_per_m == 74.0)
            .map(|s| s.designation.as_str())
            .collect();
        assert_eq!(w74, vec!["W310x74", "W410x74", "W460x74", "W530x74"]);
    }

    #[test]
    fn test_section_not_found() {
        let catalog = SectionCatalog::builtin().unwrap();
        let err = catalog.lookup("W999x999").unwrap_err();
        assert_eq!(err.error_code(), "SECTION_NOT_FOUND");
    }
}
