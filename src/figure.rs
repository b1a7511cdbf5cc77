//! Chart-ready value structures handed to the rendering layer and the JSON
//! export. Nothing in here knows about egui.

use serde::Serialize;

use crate::color::outcome_hex;
use crate::data::aggregate::OutcomeCounts;
use crate::data::filter::{ScatterPoint, SiteSelection};
use crate::data::model::Outcome;

pub const PAYLOAD_AXIS_LABEL: &str = "Payload Mass (kg)";
pub const SUCCESS_AXIS_LABEL: &str = "Launch Success";

/// Inner radius of the donut as a fraction of the outer radius.
pub const PIE_HOLE: f64 = 0.5;

// ---------------------------------------------------------------------------
// Proportion chart
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieFigure {
    pub title: String,
    pub labels: Vec<String>,
    pub values: Vec<usize>,
    pub colors: Vec<String>,
    pub hole: f64,
    #[serde(skip)]
    pub outcomes: Vec<Outcome>,
}

impl PieFigure {
    /// Slices are ordered by descending count.
    pub fn build(counts: &OutcomeCounts, site: &SiteSelection) -> Self {
        let slices = counts.by_frequency();
        PieFigure {
            title: pie_title(site),
            labels: slices.iter().map(|(o, _)| o.label().to_string()).collect(),
            values: slices.iter().map(|(_, c)| *c).collect(),
            colors: slices.iter().map(|(o, _)| outcome_hex(*o).to_string()).collect(),
            hole: PIE_HOLE,
            outcomes: slices.iter().map(|(o, _)| *o).collect(),
        }
    }

    pub fn total(&self) -> usize {
        self.values.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

pub fn pie_title(site: &SiteSelection) -> String {
    match site {
        SiteSelection::All => "Total Successful Launches".to_string(),
        SiteSelection::Site(id) => format!("Success vs. Failed for {id}"),
    }
}

// ---------------------------------------------------------------------------
// Correlation chart
// ---------------------------------------------------------------------------

/// One marker: x = payload, y = outcome class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub x: f64,
    pub y: i64,
    pub color_category: String,
    pub tooltip_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterFigure {
    pub title: String,
    pub x_axis_label: &'static str,
    pub y_axis_label: &'static str,
    pub points: Vec<Marker>,
}

impl ScatterFigure {
    pub fn build(points: &[ScatterPoint], site: &SiteSelection) -> Self {
        ScatterFigure {
            title: format!("Payload vs. Launch Success for {site}"),
            x_axis_label: PAYLOAD_AXIS_LABEL,
            y_axis_label: SUCCESS_AXIS_LABEL,
            points: points
                .iter()
                .map(|p| Marker {
                    x: p.payload_mass_kg,
                    y: p.outcome.class(),
                    color_category: p.booster_category.clone(),
                    tooltip_text: p.launch_site.clone(),
                })
                .collect(),
        }
    }
}
