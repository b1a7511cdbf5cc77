use std::fmt;

use serde::{Deserialize, Serialize};

use super::model::{LaunchRecord, LaunchTable, Outcome};

// ---------------------------------------------------------------------------
// Site selection: the "ALL" sentinel or one launch site
// ---------------------------------------------------------------------------

/// Value of the site selector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SiteSelection {
    /// No site filter.
    #[default]
    All,
    Site(String),
}

impl SiteSelection {
    pub const ALL: &'static str = "ALL";

    /// Whether a record launched from `site` passes this selection.
    pub fn matches(&self, site: &str) -> bool {
        match self {
            SiteSelection::All => true,
            SiteSelection::Site(selected) => selected == site,
        }
    }

    /// Label shown in the selector drop-down.
    pub fn option_label(&self) -> &str {
        match self {
            SiteSelection::All => "All Sites",
            SiteSelection::Site(site) => site,
        }
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteSelection::All => f.write_str(Self::ALL),
            SiteSelection::Site(site) => f.write_str(site),
        }
    }
}

// ---------------------------------------------------------------------------
// Payload range: inclusive on both ends
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Self {
        PayloadRange { low, high }
    }

    /// Inclusive membership test. An inverted range contains nothing.
    pub fn contains(&self, payload_mass_kg: f64) -> bool {
        self.low <= payload_mass_kg && payload_mass_kg <= self.high
    }
}

// ---------------------------------------------------------------------------
// Correlation filter
// ---------------------------------------------------------------------------

/// One surviving row, projected to the fields the scatter chart needs.
///
/// Serializes with the source file's column names (see
/// [`columns`](super::model::columns)) so exported points can be loaded back
/// as a launch table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    #[serde(rename = "Launch Site")]
    pub launch_site: String,
    #[serde(rename = "Payload Mass (kg)")]
    pub payload_mass_kg: f64,
    #[serde(rename = "Booster Version Category")]
    pub booster_category: String,
    #[serde(rename = "class")]
    pub outcome: Outcome,
}

impl From<&LaunchRecord> for ScatterPoint {
    fn from(rec: &LaunchRecord) -> Self {
        ScatterPoint {
            launch_site: rec.launch_site.clone(),
            payload_mass_kg: rec.payload_mass_kg,
            booster_category: rec.booster_category.clone(),
            outcome: rec.outcome,
        }
    }
}

/// Return the launches whose payload lies in `range` and, unless `site` is
/// [`SiteSelection::All`], that launched from `site`.
///
/// Table order is preserved. Unknown sites and inverted ranges yield an
/// empty vector.
pub fn filter_for_scatter(
    table: &LaunchTable,
    site: &SiteSelection,
    range: PayloadRange,
) -> Vec<ScatterPoint> {
    table
        .records()
        .iter()
        .filter(|rec| range.contains(rec.payload_mass_kg) && site.matches(&rec.launch_site))
        .map(ScatterPoint::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::data::model::tests::{record, two_site_table};

    impl SiteSelection {
        /// Selector value as the drop-down emits it: `"ALL"` or a site id.
        pub(crate) fn parse(value: &str) -> Self {
            if value == Self::ALL {
                SiteSelection::All
            } else {
                SiteSelection::Site(value.to_string())
            }
        }
    }

    fn site(id: &str) -> SiteSelection {
        SiteSelection::parse(id)
    }

    #[test]
    fn all_sites_wide_range_returns_every_record_in_order() {
        let table = two_site_table();
        let wide = PayloadRange::new(0.0, 2000.0);
        let points = filter_for_scatter(&table, &SiteSelection::All, wide);
        let sites: Vec<_> = points.iter().map(|p| p.launch_site.as_str()).collect();
        assert_eq!(sites, ["site1", "site2"]);
        assert_eq!(points[0].outcome, Outcome::Success);
        assert_eq!(points[1].booster_category, "v2");
    }

    #[test]
    fn site_filter_keeps_only_that_site() {
        let table = two_site_table();
        let points = filter_for_scatter(&table, &site("site1"), PayloadRange::new(0.0, 2000.0));
        assert_eq!(
            points,
            vec![ScatterPoint {
                launch_site: "site1".into(),
                payload_mass_kg: 500.0,
                booster_category: "v1".into(),
                outcome: Outcome::Success,
            }]
        );
    }

    #[test]
    fn unknown_site_and_inverted_range_are_empty() {
        let table = two_site_table();
        let wide = PayloadRange::new(0.0, 2000.0);
        let inverted = PayloadRange::new(2000.0, 0.0);
        assert!(filter_for_scatter(&table, &site("site3"), wide).is_empty());
        assert!(filter_for_scatter(&table, &SiteSelection::All, inverted).is_empty());
    }

    #[test]
    fn full_range_returns_whole_table() {
        let table = LaunchTable::from_records(vec![
            record("a", 0.0, Outcome::Failure, "v1.0"),
            record("b", 15600.0, Outcome::Success, "B5"),
            record("a", 2500.5, Outcome::Success, "FT"),
        ])
        .unwrap();
        let points = filter_for_scatter(&table, &SiteSelection::All, table.full_range());
        assert_eq!(points.len(), table.len());
    }

    #[test]
    fn bounds_are_inclusive_and_point_range_matches_exact_mass() {
        let table = LaunchTable::from_records(vec![
            record("a", 1000.0, Outcome::Success, "FT"),
            record("a", 2000.0, Outcome::Failure, "FT"),
            record("a", 3000.0, Outcome::Success, "FT"),
            record("b", 2000.0, Outcome::Success, "B4"),
        ])
        .unwrap();

        let all = SiteSelection::All;
        let edges = filter_for_scatter(&table, &all, PayloadRange::new(1000.0, 3000.0));
        assert_eq!(edges.len(), 4);

        let exact = filter_for_scatter(&table, &all, PayloadRange::new(2000.0, 2000.0));
        assert_eq!(exact.len(), 2);
        assert!(exact.iter().all(|p| p.payload_mass_kg == 2000.0));
    }

    #[test]
    fn survivors_satisfy_predicate_and_none_are_missing() {
        let table = LaunchTable::from_records(
            (0..40)
                .map(|i| {
                    let site = ["a", "b", "c"][i % 3];
                    let outcome = if i % 4 == 0 { Outcome::Failure } else { Outcome::Success };
                    record(site, (i * 350) as f64, outcome, "FT")
                })
                .collect(),
        )
        .unwrap();
        let range = PayloadRange::new(2000.0, 9000.0);
        let selection = site("b");

        let points = filter_for_scatter(&table, &selection, range);
        assert!(points.iter().all(|p| range.contains(p.payload_mass_kg) && p.launch_site == "b"));

        let expected: Vec<ScatterPoint> = table
            .records()
            .iter()
            .filter(|r| r.launch_site == "b" && range.contains(r.payload_mass_kg))
            .map(ScatterPoint::from)
            .collect();
        assert_eq!(points, expected);
        assert_eq!(filter_for_scatter(&table, &selection, range), points);
    }

    #[test]
    fn selection_parses_sentinel() {
        assert_eq!(SiteSelection::parse("ALL"), SiteSelection::All);
        assert_eq!(SiteSelection::parse("site2"), SiteSelection::Site("site2".into()));
        assert_eq!(SiteSelection::All.to_string(), "ALL");
        assert_eq!(SiteSelection::All.option_label(), "All Sites");
    }
}
