//! # Optimal-Section Search
//!
//! Scans catalog families for the lightest adequate section.
//!
//! Every search follows the same contract:
//!
//! 1. Zero applied demand returns an empty list.
//! 2. Geometric filters reject candidates before any strength check.
//! 3. Each remaining candidate is checked; only sections with every
//!    utilization ≤ 1.0 are kept.
//! 4. Results are sorted by mass, then designation, ascending.
//!
//! Families a calculator does not cover (angles in a beam search, for
//! example) are skipped, never reported as failures.

pub mod beam;
pub mod column;
pub mod filters;
pub mod tension;

pub use beam::{
    design_beam,
    search_optimal_beam,
    BeamDesignOutcome,
    BeamDesignRequest,
    BeamDesignResult,
    BeamLoading,
    BeamSearchInput,
};
pub use column::{search_optimal_column, ColumnDesignResult, ColumnSearchInput};
pub use filters::DimensionFilters;
pub use tension::{search_optimal_tension_member, TensionDesignResult, TensionSearchInput};

use crate::sections::{SectionFamily, SectionRecord};

/// Families searched for beams when none are named
pub fn default_beam_families() -> Vec<SectionFamily> {
    vec![SectionFamily::W]
}

/// Families searched for columns when none are named
pub fn default_column_families() -> Vec<SectionFamily> {
    vec![SectionFamily::W]
}

/// Families searched for tension members when none are named
pub fn default_tension_families() -> Vec<SectionFamily> {
    vec![SectionFamily::L]
}

/// A search result that can be ranked by economy
pub trait Ranked {
    fn section(&self) -> &SectionRecord;
}

/// Stable sort by mass, then designation
pub fn sort_by_mass<T: Ranked>(results: &mut [T]) {
    results.sort_by(|a, b| {
        let (a, b) = (a.section(), b.section());
        a.mass_kg_per_m
            .total_cmp(&b.mass_kg_per_m)
            .then_with(|| a.designation.cmp(&b.designation))
    });
}

/// Log the outcome of a search
fn log_summary<T: Ranked>(kind: &str, families: &[SectionFamily], candidates: usize, results: &[T]) {
    tracing::info!(
        kind,
        families = ?families,
        candidates,
        accepted = results.len(),
        lightest = results.first().map(|r| r.section().designation.as_str()).unwrap_or("-"),
        "section search complete"
    );
}
