use std::sync::Arc;

use crate::data::aggregate::compute_outcome_counts;
use crate::data::filter::{filter_for_scatter, PayloadRange, ScatterPoint, SiteSelection};
use crate::data::model::LaunchTable;
use crate::figure::{PieFigure, ScatterFigure};

// ---------------------------------------------------------------------------
// Selection and events
// ---------------------------------------------------------------------------

/// Current values of the two controls.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub site: SiteSelection,
    pub payload_range: PayloadRange,
}

impl Selection {
    /// `ALL` sites and the table's full payload range.
    pub fn initial(table: &LaunchTable) -> Self {
        Selection {
            site: SiteSelection::All,
            payload_range: table.full_range(),
        }
    }
}

/// A control change emitted by the side panel.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionEvent {
    SiteSelected(SiteSelection),
    PayloadRangeChanged(PayloadRange),
}

/// Rendering boundary: receives fresh figures whenever a query reruns.
pub trait ChartObserver {
    fn pie_updated(&mut self, figure: &PieFigure);
    fn scatter_updated(&mut self, points: &[ScatterPoint], figure: &ScatterFigure);
}

// ---------------------------------------------------------------------------
// Dashboard state
// ---------------------------------------------------------------------------

/// Owns the selection and reruns the queries affected by each event.
pub struct DashboardState {
    table: Arc<LaunchTable>,
    selection: Selection,
    site_options: Vec<SiteSelection>,
}

impl DashboardState {
    pub fn new(table: Arc<LaunchTable>) -> Self {
        let site_options = std::iter::once(SiteSelection::All)
            .chain(table.sites().iter().cloned().map(SiteSelection::Site))
            .collect();
        DashboardState {
            selection: Selection::initial(&table),
            table,
            site_options,
        }
    }

    pub fn table(&self) -> &LaunchTable {
        &self.table
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Selector options: `ALL` followed by every site present in the table.
    pub fn site_options(&self) -> &[SiteSelection] {
        &self.site_options
    }

    /// Push both figures for the current selection (first frame).
    pub fn publish_all(&self, observer: &mut dyn ChartObserver) {
        self.publish_pie(observer);
        self.publish_scatter(observer);
    }

    /// Apply a control change. A site change refreshes both charts, a range
    /// change only the scatter chart. Returns false if nothing changed.
    pub fn dispatch(&mut self, event: SelectionEvent, observer: &mut dyn ChartObserver) -> bool {
        log::debug!("selection event: {event:?}");
        match event {
            SelectionEvent::SiteSelected(site) => {
                if site == self.selection.site {
                    return false;
                }
                self.selection.site = site;
                self.publish_all(observer);
            }
            SelectionEvent::PayloadRangeChanged(range) => {
                if range == self.selection.payload_range {
                    return false;
                }
                self.selection.payload_range = range;
                self.publish_scatter(observer);
            }
        }
        true
    }

    fn publish_pie(&self, observer: &mut dyn ChartObserver) {
        let counts = compute_outcome_counts(&self.table, &self.selection.site);
        if counts.is_empty() {
            log::debug!("pie: no launches for {}", self.selection.site);
        } else {
            log::debug!("pie: {} outcomes over {} launches", counts.len(), counts.total());
        }
        let figure = PieFigure::build(&counts, &self.selection.site);
        observer.pie_updated(&figure);
    }

    fn publish_scatter(&self, observer: &mut dyn ChartObserver) {
        let points = filter_for_scatter(
            &self.table,
            &self.selection.site,
            self.selection.payload_range,
        );
        let figure = ScatterFigure::build(&points, &self.selection.site);
        log::debug!("scatter: {} points", points.len());
        observer.scatter_updated(&points, &figure);
    }
}
