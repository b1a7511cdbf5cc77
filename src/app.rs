use std::sync::Arc;

use eframe::egui::{self, Color32, RichText};

use crate::color::ColorMap;
use crate::config::DashboardConfig;
use crate::data::model::LaunchTable;
use crate::state::DashboardState;
use crate::ui::panels::{self, Status};
use crate::ui::{plot, table, ChartView};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LaunchDashApp {
    pub state: DashboardState,
    pub view: ChartView,
    pub config: DashboardConfig,
    pub status: Option<Status>,
}

impl LaunchDashApp {
    pub fn new(table: LaunchTable, config: DashboardConfig) -> Self {
        let table = Arc::new(table);
        let state = DashboardState::new(table.clone());
        let mut view = ChartView::new(ColorMap::new(table.booster_categories()));
        state.publish_all(&mut view);

        Self {
            state,
            view,
            config,
            status: None,
        }
    }
}

impl eframe::App for LaunchDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state, &self.view, &mut self.status);
        });

        // ---- Left side panel: controls ----
        let events = egui::SidePanel::left("control_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| panels::side_panel(ui, &self.state, &self.view, &self.config))
            .inner;

        for event in events {
            self.state.dispatch(event, &mut self.view);
        }

        // ---- Central panel: charts and table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading(
                    RichText::new(&self.config.window_title)
                        .size(40.0)
                        .color(Color32::from_rgb(0x50, 0x3D, 0x36)),
                );
            });
            ui.separator();
            if let Some(pie) = &self.view.pie {
                plot::outcome_pie(ui, pie);
            }
            ui.separator();
            if let Some(scatter) = &self.view.scatter {
                plot::payload_scatter(ui, scatter, &self.view.color_map);
            }
            ui.separator();
            table::launches_table(ui, &self.view.points);
        });
    }
}
