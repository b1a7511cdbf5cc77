use std::collections::BTreeMap;

use super::filter::SiteSelection;
use super::model::{LaunchTable, Outcome};

/// Launch counts per outcome. Only outcomes that occur have an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutcomeCounts(BTreeMap<Outcome, usize>);

impl OutcomeCounts {
    /// Number of distinct outcomes present (0, 1 or 2).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all counts, i.e. the number of rows that were grouped.
    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    /// Entries in outcome order (failure first).
    pub fn iter(&self) -> impl Iterator<Item = (Outcome, usize)> + '_ {
        self.0.iter().map(|(o, c)| (*o, *c))
    }

    /// Entries by descending count, successes first on ties. Pie slices are
    /// drawn in this order.
    pub fn by_frequency(&self) -> Vec<(Outcome, usize)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|(oa, ca), (ob, cb)| cb.cmp(ca).then(ob.cmp(oa)));
        entries
    }
}

impl FromIterator<Outcome> for OutcomeCounts {
    fn from_iter<I: IntoIterator<Item = Outcome>>(iter: I) -> Self {
        let mut counts = BTreeMap::new();
        for outcome in iter {
            *counts.entry(outcome).or_insert(0) += 1;
        }
        OutcomeCounts(counts)
    }
}

/// Count launches per outcome, over the whole table for
/// [`SiteSelection::All`] or over one site's launches otherwise.
pub fn compute_outcome_counts(table: &LaunchTable, site: &SiteSelection) -> OutcomeCounts {
    table
        .records()
        .iter()
        .filter(|rec| site.matches(&rec.launch_site))
        .map(|rec| rec.outcome)
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::data::model::tests::{record, two_site_table};

    impl OutcomeCounts {
        fn get(&self, outcome: Outcome) -> usize {
            self.0.get(&outcome).copied().unwrap_or(0)
        }
    }

    #[test]
    fn all_sites_counts_each_outcome_once() {
        let counts = compute_outcome_counts(&two_site_table(), &SiteSelection::All);
        assert_eq!(
            counts.iter().collect::<Vec<_>>(),
            vec![(Outcome::Failure, 1), (Outcome::Success, 1)]
        );
    }

    #[test]
    fn unknown_site_gives_empty_mapping() {
        let counts = compute_outcome_counts(&two_site_table(), &SiteSelection::parse("site3"));
        assert!(counts.is_empty());
        assert_eq!(counts.total(), 0);
        assert_eq!(counts.get(Outcome::Success), 0);
    }

    #[test]
    fn totals_match_site_row_counts() {
        let table = LaunchTable::from_records(vec![
            record("CCAFS LC-40", 0.0, Outcome::Failure, "v1.0"),
            record("CCAFS LC-40", 525.0, Outcome::Failure, "v1.0"),
            record("VAFB SLC-4E", 500.0, Outcome::Failure, "v1.1"),
            record("KSC LC-39A", 2490.0, Outcome::Success, "FT"),
            record("CCAFS LC-40", 3170.0, Outcome::Success, "FT"),
            record("KSC LC-39A", 5300.0, Outcome::Success, "FT"),
        ])
        .unwrap();

        assert_eq!(compute_outcome_counts(&table, &SiteSelection::All).total(), table.len());
        for site in table.sites() {
            let expected = table.records().iter().filter(|r| &r.launch_site == site).count();
            let counts = compute_outcome_counts(&table, &SiteSelection::Site(site.clone()));
            assert_eq!(counts.total(), expected, "site {site}");
        }

        let ksc = compute_outcome_counts(&table, &SiteSelection::parse("KSC LC-39A"));
        assert_eq!(ksc.len(), 1);
        assert_eq!(ksc.get(Outcome::Success), 2);
    }

    #[test]
    fn frequency_order_is_stable() {
        let counts: OutcomeCounts = [Outcome::Failure, Outcome::Success, Outcome::Failure]
            .into_iter()
            .collect();
        assert_eq!(counts.by_frequency(), vec![(Outcome::Failure, 2), (Outcome::Success, 1)]);

        let tied: OutcomeCounts = [Outcome::Failure, Outcome::Success].into_iter().collect();
        assert_eq!(tied.by_frequency(), vec![(Outcome::Success, 1), (Outcome::Failure, 1)]);
        assert_eq!(tied.by_frequency(), tied.by_frequency());
    }

    #[test]
    fn repeated_calls_are_identical() {
        let table = two_site_table();
        let site = SiteSelection::parse("site2");
        assert_eq!(compute_outcome_counts(&table, &site), compute_outcome_counts(&table, &site));
    }
}
