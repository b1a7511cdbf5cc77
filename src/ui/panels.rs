use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::config::DashboardConfig;
use crate::data::filter::{PayloadRange, SiteSelection};
use crate::export;
use crate::state::{DashboardState, SelectionEvent};
use crate::ui::ChartView;

/// One-line feedback shown in the top bar.
#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Info(String),
    Error(String),
}

// ---------------------------------------------------------------------------
// Left side panel – the two controls
// ---------------------------------------------------------------------------

/// Render the control panel and return the changes the user made this frame.
pub fn side_panel(
    ui: &mut Ui,
    state: &DashboardState,
    view: &ChartView,
    config: &DashboardConfig,
) -> Vec<SelectionEvent> {
    let mut events = Vec::new();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Site selector ----
            ui.heading("Launch Site");
            let current = state.selection().site.clone();
            let mut chosen = current.clone();
            egui::ComboBox::from_id_salt("site_dropdown")
                .selected_text(chosen.option_label().to_string())
                .width(ui.available_width())
                .show_ui(ui, |ui: &mut Ui| {
                    for option in state.site_options() {
                        ui.selectable_value(&mut chosen, option.clone(), option.option_label());
                    }
                })
                .response
                .on_hover_text("Select a Launch Site here");
            if chosen != current {
                events.push(SelectionEvent::SiteSelected(chosen));
            }
            ui.separator();

            // ---- Payload range ----
            ui.heading("Payload range (kg)");
            let table = state.table();
            let bounds = table.min_payload() as f64..=table.max_payload() as f64;
            let mut range = state.selection().payload_range;

            let low_changed = ui
                .add(egui::Slider::new(&mut range.low, bounds.clone()).text("from"))
                .changed();
            let high_changed = ui
                .add(egui::Slider::new(&mut range.high, bounds).text("to"))
                .changed();

            if low_changed || high_changed {
                let settled = settle_range(
                    range,
                    table.min_payload() as f64,
                    table.max_payload() as f64,
                    config.payload_step,
                    low_changed,
                );
                events.push(SelectionEvent::PayloadRangeChanged(settled));
            }

            let marks =
                payload_marks(table.min_payload(), table.max_payload(), config.mark_spacing);
            ui.label(
                RichText::new(
                    marks
                        .iter()
                        .map(|m| m.to_string())
                        .collect::<Vec<_>>()
                        .join("  ·  "),
                )
                .small()
                .weak(),
            );
            ui.separator();

            // ---- Booster legend ----
            ui.strong("Booster version category");
            for (category, color) in view.color_map.legend_entries() {
                ui.label(RichText::new(format!("●  {category}")).color(color));
            }
        });

    events
}

/// Snap both ends of a dragged range to `step` increments from `min`, clamp
/// them to `[min, max]` and keep `low <= high`.
///
/// A handle dragged to either end keeps the exact bound even when the span
/// is not a multiple of `step`. If the handles cross, the one that was not
/// moved follows the one that was.
pub fn settle_range(
    mut range: PayloadRange,
    min: f64,
    max: f64,
    step: f64,
    low_moved: bool,
) -> PayloadRange {
    let snap = |value: f64| {
        let snapped = if step > 0.0 && value > min && value < max {
            min + ((value - min) / step).round() * step
        } else {
            value
        };
        snapped.max(min).min(max)
    };
    range.low = snap(range.low);
    range.high = snap(range.high);

    if range.low > range.high {
        if low_moved {
            range.high = range.low;
        } else {
            range.low = range.high;
        }
    }
    range
}

/// Tick labels for the payload sliders: every `spacing` kg from `min`,
/// stopping before `max`.
pub fn payload_marks(min: i64, max: i64, spacing: i64) -> Vec<i64> {
    if spacing <= 0 {
        return Vec::new();
    }
    (min..max).step_by(spacing as usize).collect()
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / status bar.
pub fn top_bar(
    ui: &mut Ui,
    state: &DashboardState,
    view: &ChartView,
    status: &mut Option<Status>,
) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Export filtered launches…").clicked() {
                export_points_dialog(view, status);
                ui.close_menu();
            }
            if ui.button("Export figures…").clicked() {
                export_figures_dialog(view, status);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} launches loaded, {} in range",
            state.table().len(),
            view.points.len()
        ));

        if let SiteSelection::Site(site) = &state.selection().site {
            ui.separator();
            ui.label(format!("site: {site}"));
        }

        match status {
            Some(Status::Info(msg)) => {
                ui.separator();
                ui.label(msg.as_str());
            }
            Some(Status::Error(msg)) => {
                ui.separator();
                ui.label(RichText::new(msg.as_str()).color(Color32::RED));
            }
            None => {}
        }
    });
}

// ---------------------------------------------------------------------------
// Export dialogs
// ---------------------------------------------------------------------------

fn export_points_dialog(view: &ChartView, status: &mut Option<Status>) {
    let file = rfd::FileDialog::new()
        .set_title("Export filtered launches")
        .add_filter("CSV", &["csv"])
        .set_file_name("filtered_launches.csv")
        .save_file();

    if let Some(path) = file {
        match export::write_points_csv(&path, &view.points) {
            Ok(()) => {
                log::info!("Exported {} launches to {}", view.points.len(), path.display());
                *status = Some(Status::Info(format!(
                    "Exported {} launches",
                    view.points.len()
                )));
            }
            Err(e) => {
                log::error!("Failed to export launches: {e:#}");
                *status = Some(Status::Error(format!("Error: {e:#}")));
            }
        }
    }
}

fn export_figures_dialog(view: &ChartView, status: &mut Option<Status>) {
    let (Some(pie), Some(scatter)) = (&view.pie, &view.scatter) else {
        return;
    };

    let file = rfd::FileDialog::new()
        .set_title("Export figures")
        .add_filter("JSON", &["json"])
        .set_file_name("figures.json")
        .save_file();

    if let Some(path) = file {
        match export::write_figures_json(&path, pie, scatter) {
            Ok(()) => {
                log::info!("Exported figures to {}", path.display());
                *status = Some(Status::Info("Exported figures".to_string()));
            }
            Err(e) => {
                log::error!("Failed to export figures: {e:#}");
                *status = Some(Status::Error(format!("Error: {e:#}")));
            }
        }
    }
}
