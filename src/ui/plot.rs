use std::collections::BTreeMap;
use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::color::{outcome_color, ColorMap};
use crate::figure::{Marker, PieFigure, ScatterFigure};

const PIE_HEIGHT: f32 = 260.0;
const SCATTER_HEIGHT: f32 = 300.0;

/// Arc resolution: segments per full turn of the donut.
const SEGMENTS_PER_TURN: f64 = 96.0;

// ---------------------------------------------------------------------------
// Outcome donut (proportion chart)
// ---------------------------------------------------------------------------

/// Render the outcome proportions as a donut chart.
pub fn outcome_pie(ui: &mut Ui, figure: &PieFigure) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(&figure.title);
    });

    if figure.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("No launches for this site.");
        });
        return;
    }

    let total = figure.total() as f64;
    let label_radius = (1.0 + figure.hole) / 2.0;

    Plot::new("outcome_pie")
        .height(PIE_HEIGHT)
        .data_aspect(1.0)
        .legend(Legend::default())
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            let mut start = 0.0;
            for ((label, &value), &outcome) in figure
                .labels
                .iter()
                .zip(&figure.values)
                .zip(&figure.outcomes)
            {
                let fraction = value as f64 / total;
                let color = outcome_color(outcome);
                let name = format!("{label} ({value})");

                for quad in donut_segments(start, start + fraction, figure.hole) {
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::new(quad.to_vec()))
                            .fill_color(color)
                            .stroke(Stroke::new(1.0, color))
                            .name(&name),
                    );
                }

                let [x, y] = turn_point(start + fraction / 2.0, label_radius);
                plot_ui.text(Text::new(
                    PlotPoint::new(x, y),
                    RichText::new(format!("{:.1}%", fraction * 100.0))
                        .color(Color32::WHITE)
                        .strong(),
                ));

                start += fraction;
            }
        });
}

/// Point at `turn` (0..1, clockwise from 12 o'clock) on a circle of `radius`.
fn turn_point(turn: f64, radius: f64) -> [f64; 2] {
    let angle = FRAC_PI_2 - turn * TAU;
    [radius * angle.cos(), radius * angle.sin()]
}

/// Split the ring between `start` and `end` (in turns) into convex quads
/// with outer radius 1 and inner radius `hole`.
fn donut_segments(start: f64, end: f64, hole: f64) -> Vec<[[f64; 2]; 4]> {
    if end <= start {
        return Vec::new();
    }
    let n = ((end - start) * SEGMENTS_PER_TURN).ceil().max(1.0) as usize;
    let step = (end - start) / n as f64;

    (0..n)
        .map(|i| {
            let a = start + i as f64 * step;
            let b = a + step;
            [
                turn_point(a, 1.0),
                turn_point(b, 1.0),
                turn_point(b, hole),
                turn_point(a, hole),
            ]
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Payload vs outcome (correlation chart)
// ---------------------------------------------------------------------------

/// Render the payload/outcome scatter, one series per booster category.
pub fn payload_scatter(ui: &mut Ui, figure: &ScatterFigure, color_map: &ColorMap) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(&figure.title);
    });

    let markers = figure.points.clone();

    Plot::new("payload_scatter")
        .height(SCATTER_HEIGHT)
        .legend(Legend::default())
        .x_axis_label(figure.x_axis_label)
        .y_axis_label(figure.y_axis_label)
        .include_x(0.0)
        .include_y(-0.25)
        .include_y(1.25)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .label_formatter(move |name, value| hover_label(&markers, name, value.x, value.y))
        .show(ui, |plot_ui| {
            for (category, series) in series_by_category(&figure.points) {
                plot_ui.points(
                    Points::new(PlotPoints::new(series))
                        .name(category)
                        .color(color_map.color_for(category))
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(5.0),
                );
            }
        });
}

/// Group markers into one `[payload, class]` series per booster category,
/// in category order. Categories without markers get no series.
fn series_by_category(markers: &[Marker]) -> BTreeMap<&str, Vec<[f64; 2]>> {
    let mut series: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
    for m in markers {
        series
            .entry(m.color_category.as_str())
            .or_default()
            .push([m.x, m.y as f64]);
    }
    series
}

/// Hover text: the launch site of the nearest marker in the hovered series,
/// or plain coordinates over empty space.
fn hover_label(markers: &[Marker], series: &str, x: f64, y: f64) -> String {
    let nearest = markers
        .iter()
        .filter(|m| m.color_category == series)
        .min_by(|a, b| {
            let da = (a.x - x).powi(2) + (a.y as f64 - y).powi(2);
            let db = (b.x - x).powi(2) + (b.y as f64 - y).powi(2);
            da.total_cmp(&db)
        });

    match nearest {
        Some(m) => format!(
            "{}\n{}\npayload: {:.0} kg\nclass: {}",
            m.tooltip_text, m.color_category, m.x, m.y
        ),
        None => format!("payload: {x:.0} kg\nclass: {y:.2}"),
    }
}
