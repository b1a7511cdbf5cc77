use eframe::egui::{Align, Layout, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::outcome_color;
use crate::data::filter::ScatterPoint;

const ROW_HEIGHT: f32 = 18.0;

/// Table of the launches currently shown in the scatter chart.
pub fn launches_table(ui: &mut Ui, points: &[ScatterPoint]) {
    if points.is_empty() {
        ui.label("No launches in the selected range.");
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(Layout::left_to_right(Align::Center))
        .column(Column::auto().at_least(120.0))
        .column(Column::auto().at_least(110.0))
        .column(Column::auto().at_least(80.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Launch Site");
            });
            header.col(|ui| {
                ui.strong("Payload Mass (kg)");
            });
            header.col(|ui| {
                ui.strong("Booster");
            });
            header.col(|ui| {
                ui.strong("Outcome");
            });
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, points.len(), |mut row| {
                let p = &points[row.index()];
                row.col(|ui| {
                    ui.label(&p.launch_site);
                });
                row.col(|ui| {
                    ui.label(format!("{:.0}", p.payload_mass_kg));
                });
                row.col(|ui| {
                    ui.label(&p.booster_category);
                });
                row.col(|ui| {
                    ui.label(RichText::new(p.outcome.label()).color(outcome_color(p.outcome)));
                });
            });
        });
}
