//! Pipeline orchestrators, one per CLI surface.
//!
//! Each flow processes a list of units (a language, or the single archive).
//! A unit either reaches `Persisted` (final artifact on disk, temporaries
//! removed) or `Failed` (best-effort cleanup of partial artifacts); one
//! unit's failure never aborts its siblings.

pub mod features;
pub mod locales;
pub mod modules;

use crate::error::DistError;

/// Terminal state of one pipeline unit.
#[derive(Debug)]
pub enum UnitOutcome {
    Persisted,
    Failed(DistError),
}

/// Outcome report for one unit of pipeline work.
#[derive(Debug)]
pub struct UnitReport {
    /// Unit identifier (typically the language code).
    pub unit: String,
    pub outcome: UnitOutcome,
}

impl UnitReport {
    pub fn persisted(unit: impl Into<String>) -> Self {
        Self {
            unit: unit.into(),
            outcome: UnitOutcome::Persisted,
        }
    }

    pub fn failed(unit: impl Into<String>, error: DistError) -> Self {
        Self {
            unit: unit.into(),
            outcome: UnitOutcome::Failed(error),
        }
    }

    pub fn is_persisted(&self) -> bool {
        matches!(self.outcome, UnitOutcome::Persisted)
    }
}
