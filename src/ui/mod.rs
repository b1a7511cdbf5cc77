pub mod panels;
pub mod plot;
pub mod table;

use crate::color::ColorMap;
use crate::data::filter::ScatterPoint;
use crate::figure::{PieFigure, ScatterFigure};
use crate::state::ChartObserver;

/// Last figures pushed by the dashboard state; what the panels draw from.
pub struct ChartView {
    pub pie: Option<PieFigure>,
    pub scatter: Option<ScatterFigure>,
    /// Filtered launches behind `scatter`, for the table and CSV export.
    pub points: Vec<ScatterPoint>,
    pub color_map: ColorMap,
}

impl ChartView {
    pub fn new(color_map: ColorMap) -> Self {
        Self {
            pie: None,
            scatter: None,
            points: Vec::new(),
            color_map,
        }
    }
}

impl ChartObserver for ChartView {
    fn pie_updated(&mut self, figure: &PieFigure) {
        self.pie = Some(figure.clone());
    }

    fn scatter_updated(&mut self, points: &[ScatterPoint], figure: &ScatterFigure) {
        self.points = points.to_vec();
        self.scatter = Some(figure.clone());
    }
}
