use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::config::{DEFAULT_DATA_PATH, DashboardConfig};
use crate::data::loader;
use crate::state::AppState;
use crate::ui::{narrative, panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct RemoteWorkApp {
    pub state: AppState,
    pub config: DashboardConfig,
}

impl RemoteWorkApp {
    /// Load the dataset (once per process) and build the initial state.
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            state: AppState::from_load(loader::load()),
            config,
        }
    }
}

impl eframe::App for RemoteWorkApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Central panel: the dashboard page ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.table.is_none() {
                unavailable(ui, &self.state);
                return;
            }

            let config = &self.config;
            let state = &mut self.state;
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    narrative::header(ui);
                    ui.add_space(12.0);

                    panels::industry_selector(ui, state);
                    egui::CollapsingHeader::new("Display DataFrame")
                        .default_open(false)
                        .show(ui, |ui: &mut Ui| {
                            panels::data_table(ui, state, config.table_max_height);
                        });
                    ui.separator();

                    if state.visible_indices.is_empty() {
                        ui.label("No workers match the current selection.");
                    }
                    plot::distribution_tabs(ui, state, config.chart_height);
                    ui.separator();

                    narrative::findings(ui);
                    ui.add_space(8.0);
                    plot::habit_tabs(ui, state, config.chart_height);
                    narrative::closing(ui);
                });
        });
    }
}

/// Shown instead of the dashboard when no table could be loaded.
fn unavailable(ui: &mut Ui, state: &AppState) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.vertical_centered(|ui: &mut Ui| {
            ui.heading(narrative::TITLE);
            ui.add_space(8.0);
            let msg = state
                .load_error
                .clone()
                .unwrap_or_else(|| format!("No data loaded from {DEFAULT_DATA_PATH}"));
            ui.label(RichText::new(msg).color(Color32::RED));
            ui.label("Generate a sample with `cargo run --bin generate_sample`, or use File → Open…");
        });
    });
}
