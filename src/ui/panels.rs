use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::{AppState, Page};

// ---------------------------------------------------------------------------
// Left side panel – page menu and column projection
// ---------------------------------------------------------------------------

/// Render the left settings panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Pengaturan Dashboard");
    ui.separator();

    ui.strong("Pilih Halaman:");
    for page in Page::ALL {
        ui.radio_value(&mut state.page, page, page.label());
    }
    ui.separator();

    let Some(table) = &state.table else {
        ui.label("Belum ada data. File → Open…");
        return;
    };

    // Clone the names so we can mutate state inside the loop.
    let columns = table.column_names();

    ui.strong("Variabel tidak dibutuhkan:");
    ScrollArea::vertical()
        .auto_shrink([false, true])
        .max_height(220.0)
        .show(ui, |ui: &mut Ui| {
            for col in &columns {
                let mut checked = state.drop_selection.contains(col);
                if ui.checkbox(&mut checked, col).changed() {
                    if checked {
                        state.drop_selection.insert(col.clone());
                    } else {
                        state.drop_selection.remove(col);
                    }
                }
            }
        });

    let any = !state.drop_selection.is_empty();
    if ui
        .add_enabled(any, egui::Button::new("Hapus variabel"))
        .clicked()
    {
        state.apply_projection();
    }
    if any {
        ui.label(
            RichText::new("Penghapusan berlaku sampai file dimuat ulang.")
                .small()
                .color(Color32::GRAY),
        );
    }
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
        });

        ui.separator();

        if let Some(table) = &state.table {
            ui.label(format!(
                "{} baris, {} variabel",
                table.n_rows(),
                table.n_cols()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open survey data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(table) => {
                log::info!(
                    "Loaded {} rows with columns {:?}",
                    table.n_rows(),
                    table.column_names()
                );
                state.set_table(table);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
