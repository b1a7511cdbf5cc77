use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::SchemaError;
use super::filter::PayloadRange;

// ---------------------------------------------------------------------------
// Column names of the source file
// ---------------------------------------------------------------------------

/// Header names shared by every supported input format and by the CSV export.
pub mod columns {
    pub const FLIGHT_NUMBER: &str = "Flight Number";
    pub const LAUNCH_SITE: &str = "Launch Site";
    pub const PAYLOAD_MASS: &str = "Payload Mass (kg)";
    pub const BOOSTER_VERSION: &str = "Booster Version";
    pub const BOOSTER_CATEGORY: &str = "Booster Version Category";
    pub const CLASS: &str = "class";

    /// Columns without which the dashboard cannot start.
    pub const REQUIRED: [&str; 4] = [LAUNCH_SITE, PAYLOAD_MASS, BOOSTER_CATEGORY, CLASS];
}

// ---------------------------------------------------------------------------
// Outcome – the binary `class` column
// ---------------------------------------------------------------------------

/// Launch outcome. Serialized as the `class` integer (1 = success, 0 = failure).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "i64", try_from = "i64")]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    pub fn from_class(class: i64) -> Option<Self> {
        match class {
            0 => Some(Outcome::Failure),
            1 => Some(Outcome::Success),
            _ => None,
        }
    }

    pub fn class(self) -> i64 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    /// Human label used for pie slices and the launches table.
    pub fn label(self) -> &'static str {
        match self {
            Outcome::Failure => "Failed",
            Outcome::Success => "Success",
        }
    }
}

impl From<Outcome> for i64 {
    fn from(outcome: Outcome) -> Self {
        outcome.class()
    }
}

impl TryFrom<i64> for Outcome {
    type Error = String;

    fn try_from(class: i64) -> Result<Self, Self::Error> {
        Outcome::from_class(class).ok_or_else(|| format!("class {class} is neither 0 nor 1"))
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the source file
// ---------------------------------------------------------------------------

/// A single launch attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    pub flight_number: Option<i64>,
    pub launch_site: String,
    pub payload_mass_kg: f64,
    pub booster_version: Option<String>,
    /// Only used to colour scatter points.
    pub booster_category: String,
    pub outcome: Outcome,
}

// ---------------------------------------------------------------------------
// LaunchTable – the immutable loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with payload bounds and distinct-value indices.
///
/// Built once at startup; there is no way to mutate it afterwards.
#[derive(Debug, Clone)]
pub struct LaunchTable {
    records: Vec<LaunchRecord>,
    min_payload: i64,
    max_payload: i64,
    sites: Vec<String>,
    booster_categories: Vec<String>,
}

impl LaunchTable {
    /// Validate the rows and derive the payload bounds and value indices.
    ///
    /// The lower bound is truncated and the upper bound rounded up, so every
    /// record lies inside `[min_payload, max_payload]` even for fractional
    /// masses. For whole-kilogram data both equal the plain min/max.
    pub fn from_records(records: Vec<LaunchRecord>) -> Result<Self, SchemaError> {
        if records.is_empty() {
            return Err(SchemaError::EmptyTable);
        }

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sites = BTreeSet::new();
        let mut booster_categories = BTreeSet::new();

        for (row, rec) in records.iter().enumerate() {
            let mass = rec.payload_mass_kg;
            if !mass.is_finite() || mass < 0.0 {
                return Err(SchemaError::InvalidPayload { row, value: mass });
            }
            min = min.min(mass);
            max = max.max(mass);
            sites.insert(rec.launch_site.clone());
            booster_categories.insert(rec.booster_category.clone());
        }

        Ok(LaunchTable {
            records,
            min_payload: min as i64,
            max_payload: max.ceil() as i64,
            sites: sites.into_iter().collect(),
            booster_categories: booster_categories.into_iter().collect(),
        })
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    /// Number of launches.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn min_payload(&self) -> i64 {
        self.min_payload
    }

    pub fn max_payload(&self) -> i64 {
        self.max_payload
    }

    /// `[min_payload, max_payload]`, the initial value of the range control.
    pub fn full_range(&self) -> PayloadRange {
        PayloadRange::new(self.min_payload as f64, self.max_payload as f64)
    }

    /// Distinct launch sites, sorted.
    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    /// Distinct booster categories, sorted.
    pub fn booster_categories(&self) -> &[String] {
        &self.booster_categories
    }
}
