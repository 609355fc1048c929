use std::sync::Arc;

use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column as TableColumn, TableBuilder};

use crate::data::export::export_csv;
use crate::data::loader::load_file;
use crate::state::{AppState, Status};

// ---------------------------------------------------------------------------
// Industry multi-select
// ---------------------------------------------------------------------------

/// Render the industry selector. Empty selection shows every worker.
pub fn industry_selector(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Workers by the Industry Sector");

    let summary = if state.selection.is_empty() {
        "Choose an option".to_string()
    } else {
        state.selection.iter().collect::<Vec<_>>().join(", ")
    };

    let mut toggled: Option<String> = None;
    let mut cleared = false;

    ui.horizontal_wrapped(|ui: &mut Ui| {
        egui::ComboBox::from_id_salt("industry_sector")
            .selected_text(summary)
            .width(320.0)
            .close_behavior(egui::PopupCloseBehavior::CloseOnClickOutside)
            .show_ui(ui, |ui: &mut Ui| {
                for sector in &state.sectors {
                    let mut checked = state.selection.contains(sector);
                    if ui.checkbox(&mut checked, sector).changed() {
                        toggled = Some(sector.clone());
                    }
                }
            });

        if ui
            .add_enabled(!state.selection.is_empty(), egui::Button::new("Clear"))
            .clicked()
        {
            cleared = true;
        }
    });

    if let Some(sector) = toggled {
        state.toggle_sector(&sector);
    }
    if cleared {
        state.clear_selection();
    }
}

// ---------------------------------------------------------------------------
// Raw table inspector
// ---------------------------------------------------------------------------

/// Render the filtered rows, every column in source order.
pub fn data_table(ui: &mut Ui, state: &AppState, max_height: f32) {
    let Some(view) = state.view() else {
        return;
    };
    let headers = &view.table().headers;

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .max_scroll_height(max_height)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(TableColumn::auto())
        .columns(TableColumn::auto().at_least(60.0), headers.len())
        .header(20.0, |mut header| {
            header.col(|ui: &mut Ui| {
                ui.strong("#");
            });
            for name in headers {
                header.col(|ui: &mut Ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, view.len(), |mut row| {
                let n = row.index();
                let Some(rec) = view.get(n) else {
                    return;
                };
                row.col(|ui: &mut Ui| {
                    ui.label(view.indices()[n].to_string());
                });
                for name in headers {
                    row.col(|ui: &mut Ui| {
                        ui.label(rec.cell(name).to_string());
                    });
                }
            });
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let has_table = state.table.is_some();
            if ui
                .add_enabled(has_table, egui::Button::new("Export filtered rows…"))
                .clicked()
            {
                export_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(table) = &state.table {
            ui.label(format!(
                "{} workers loaded, {} visible",
                table.len(),
                state.visible_indices.len()
            ));
        }

        match &state.status {
            Some(Status::Error(msg)) => {
                ui.separator();
                ui.label(RichText::new(msg).color(Color32::RED));
            }
            Some(Status::Info(msg)) => {
                ui.separator();
                ui.label(msg);
            }
            None => {}
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open worker data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    let Some(path) = file else {
        return;
    };
    match load_file(&path) {
        Ok(table) => {
            log::info!(
                "Loaded {} workers from {} with columns {:?}",
                table.len(),
                path.display(),
                table.headers
            );
            state.set_table(Arc::new(table));
            state.status = Some(Status::Info(format!("Opened {}", path.display())));
        }
        Err(e) if state.table.is_some() => {
            log::warn!("Keeping current table, failed to open file: {e}");
            state.status = Some(Status::Error(format!("Error: {e}")));
        }
        Err(e) => state.fail_load(&e),
    }
}

pub fn export_file_dialog(state: &mut AppState) {
    let Some(view) = state.view() else {
        return;
    };
    if view.is_empty() {
        state.status = Some(Status::Info("No workers match the selection; nothing to export".into()));
        return;
    }
    let file = rfd::FileDialog::new()
        .set_title("Export filtered rows")
        .add_filter("CSV", &["csv"])
        .set_file_name("filtered_workers.csv")
        .save_file();

    let Some(path) = file else {
        return;
    };
    let status = match export_csv(&view, &path) {
        Ok(()) => {
            log::info!("Exported {} workers to {}", view.len(), path.display());
            Status::Info(format!("Exported {} rows to {}", view.len(), path.display()))
        }
        Err(e) => {
            log::error!("{e}");
            Status::Error(format!("Error: {e}"))
        }
    };
    state.status = Some(status);
}
