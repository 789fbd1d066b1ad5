use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column as TableColumn, TableBuilder};

use crate::data::filter;
use crate::data::model::Table;
use crate::data::stats;
use crate::state::{AppState, Page};
use crate::ui::charts;

// ---------------------------------------------------------------------------
// Central panel dispatch
// ---------------------------------------------------------------------------

/// Render the page selected in the side panel.
pub fn central(ui: &mut Ui, state: &mut AppState) {
    if state.table.is_none() && state.page != Page::About {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Buka file data untuk memulai  (File → Open…)");
        });
        return;
    }

    match state.page {
        Page::Home => {
            if let Some(table) = &state.table {
                home(ui, table);
            }
        }
        Page::Data => {
            if let Some(table) = &state.table {
                data(ui, table);
            }
        }
        Page::Filter => filter_page(ui, state),
        Page::Statistics => {
            if let Some(table) = &state.table {
                statistics(ui, table);
            }
        }
        Page::Visualization => visualization(ui, state),
        Page::About => about(ui),
    }
}

// ---------------------------------------------------------------------------
// Shared widgets
// ---------------------------------------------------------------------------

fn metric_card(ui: &mut Ui, label: &str, value: String) {
    egui::Frame::group(ui.style())
        .inner_margin(egui::Margin::same(12))
        .show(ui, |ui: &mut Ui| {
            ui.vertical_centered(|ui: &mut Ui| {
                ui.label(RichText::new(label).small().color(Color32::GRAY));
                ui.heading(value);
            });
        });
}

fn fmt2(v: f64) -> String {
    format!("{v:.2}")
}

fn fmt2_opt(v: Option<f64>) -> String {
    v.map_or_else(|| "–".to_string(), fmt2)
}

/// Virtualized table widget used by the Data and Filter pages.
fn table_grid(ui: &mut Ui, table: &Table, max_height: f32) {
    if table.n_cols() == 0 {
        ui.label("Tidak ada kolom untuk ditampilkan.");
        return;
    }
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .columns(TableColumn::auto().at_least(90.0), table.n_cols())
        .max_scroll_height(max_height)
        .header(22.0, |mut header| {
            for col in &table.columns {
                header.col(|ui| {
                    ui.strong(&col.name);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, table.n_rows(), |mut row| {
                let i = row.index();
                for col in &table.columns {
                    row.col(|ui| {
                        ui.label(col.values[i].to_string());
                    });
                }
            });
        });
}

/// The pandas-`describe` style grid over all numeric columns.
fn describe_grid(ui: &mut Ui, table: &Table) {
    egui::Grid::new("describe_grid")
        .striped(true)
        .min_col_width(60.0)
        .show(ui, |ui: &mut Ui| {
            for h in ["Variabel", "N", "Mean", "Std", "Min", "25%", "50%", "75%", "Max"] {
                ui.strong(h);
            }
            ui.end_row();

            for name in table.numeric_columns() {
                let Some(col) = table.column(&name) else { continue };
                let Some(d) = stats::describe(col) else {
                    ui.label(&name);
                    ui.label("0");
                    ui.end_row();
                    continue;
                };
                ui.label(&name);
                ui.label(d.count.to_string());
                ui.label(fmt2(d.mean));
                ui.label(fmt2_opt(d.std));
                ui.label(fmt2(d.min));
                ui.label(fmt2(d.q1));
                ui.label(fmt2(d.median));
                ui.label(fmt2(d.q3));
                ui.label(fmt2(d.max));
                ui.end_row();
            }
        });
}

// ---------------------------------------------------------------------------
// 1. Home
// ---------------------------------------------------------------------------

fn home(ui: &mut Ui, table: &Table) {
    ui.heading(RichText::new("Dashboard Stunting").size(32.0));
    ui.label(RichText::new("Ringkasan umum dataset").color(Color32::GRAY));
    ui.add_space(8.0);

    ui.columns(4, |cols: &mut [Ui]| {
        metric_card(&mut cols[0], "Jumlah Baris", table.n_rows().to_string());
        metric_card(&mut cols[1], "Jumlah Variabel", table.n_cols().to_string());
        metric_card(
            &mut cols[2],
            "Variabel Numerik",
            table.numeric_columns().len().to_string(),
        );
        metric_card(
            &mut cols[3],
            "Variabel Kategorik",
            table.categorical_columns().len().to_string(),
        );
    });

    ui.add_space(8.0);
    ui.strong("Statistik Numerik");
    ScrollArea::both().show(ui, |ui: &mut Ui| {
        describe_grid(ui, table);

        ui.add_space(12.0);
        ui.label(
            "Dataset ini menggambarkan karakteristik anak serta faktor-faktor yang \
             berkaitan dengan stunting, seperti umur, berat lahir, panjang badan, dan \
             kondisi orang tua. Informasi tambahan seperti jenis kelamin, provinsi, dan \
             kepemilikan jaminan kesehatan memberi gambaran konteks sosial dari data.",
        );
    });
}

// ---------------------------------------------------------------------------
// 2. Data
// ---------------------------------------------------------------------------

fn data(ui: &mut Ui, table: &Table) {
    ui.heading("Data Lengkap");
    ui.add_space(4.0);
    table_grid(ui, table, ui.available_height());
}

// ---------------------------------------------------------------------------
// 3. Filter
// ---------------------------------------------------------------------------

fn filter_page(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter Interaktif");
    ui.add_space(4.0);

    filter_controls(ui, state);
    ui.separator();

    let Some(table) = &state.table else { return };
    let Some(spec) = state.filter_spec() else {
        ui.label("Tidak ada variabel numerik untuk difilter.");
        return;
    };

    let result = match filter::apply(table, &spec) {
        Ok(r) => r,
        Err(e) => {
            // fields come from the schema widgets, so this is a bug
            log::error!("filter over known schema failed: {e}");
            ui.colored_label(Color32::RED, e.to_string());
            return;
        }
    };

    ui.strong("Hasil Filter");
    let subset = filter::subset_table(table, &result.rows);
    table_grid(ui, &subset, ui.available_height() * 0.5);

    ui.add_space(8.0);
    ui.strong("Ringkasan Hasil Filter");
    let num = &spec.range.field;
    ui.columns(3, |cols: &mut [Ui]| {
        metric_card(&mut cols[0], "Jumlah Data", result.count.to_string());
        metric_card(&mut cols[1], &format!("Rata-rata {num}"), fmt2_opt(result.mean));
        metric_card(&mut cols[2], &format!("Median {num}"), fmt2_opt(result.median));
    });

    let describe_set = |values: &std::collections::BTreeSet<String>| {
        if values.is_empty() {
            "Semua".to_string()
        } else {
            values.iter().cloned().collect::<Vec<_>>().join(", ")
        }
    };
    let cat1 = spec.cat1.as_ref();
    let cat2 = spec.cat2.as_ref();
    ui.add_space(4.0);
    ui.label(format!(
        "{} dipilih: {}.  {} dipilih: {}.  Rentang {}: {} s/d {}.  \
         Data tersaring sebanyak {} observasi.",
        cat1.map_or("-", |c| c.field.as_str()),
        cat1.map_or_else(|| "Semua".to_string(), |c| describe_set(&c.allowed)),
        cat2.map_or("-", |c| c.field.as_str()),
        cat2.map_or_else(|| "Semua".to_string(), |c| describe_set(&c.allowed)),
        num,
        fmt2(spec.range.min),
        fmt2(spec.range.max),
        result.count,
    ));
}

fn filter_controls(ui: &mut Ui, state: &mut AppState) {
    let (cats, nums, labels1, labels2) = {
        let Some(table) = &state.table else { return };
        let unique = |name: &Option<String>| {
            name.as_ref()
                .and_then(|n| table.column(n))
                .map(|c| c.unique_labels())
                .unwrap_or_default()
        };
        (
            table.categorical_columns(),
            table.numeric_columns(),
            unique(&state.filter.cat1_field),
            unique(&state.filter.cat2_field),
        )
    };

    ui.columns(3, |cols: &mut [Ui]| {
        // ---- categorical slot 1 ----
        {
            let ui = &mut cols[0];
            ui.label("Variabel kategori 1:");
            let current = state.filter.cat1_field.clone().unwrap_or_default();
            egui::ComboBox::from_id_salt("cat1_field")
                .selected_text(&current)
                .show_ui(ui, |ui: &mut Ui| {
                    for col in &cats {
                        if ui.selectable_label(current == *col, col).clicked() {
                            state.set_cat_field(0, col.clone());
                        }
                    }
                });
            ScrollArea::vertical()
                .id_salt("cat1_values")
                .max_height(140.0)
                .show(ui, |ui: &mut Ui| {
                    for label in &labels1 {
                        let mut checked = state.filter.cat1_values.contains(label);
                        if ui.checkbox(&mut checked, label).changed() {
                            if checked {
                                state.filter.cat1_values.insert(label.clone());
                            } else {
                                state.filter.cat1_values.remove(label);
                            }
                        }
                    }
                });
        }

        // ---- categorical slot 2 ----
        {
            let ui = &mut cols[1];
            ui.label("Variabel kategori 2:");
            let current = state.filter.cat2_field.clone().unwrap_or_default();
            egui::ComboBox::from_id_salt("cat2_field")
                .selected_text(&current)
                .show_ui(ui, |ui: &mut Ui| {
                    for col in &cats {
                        if ui.selectable_label(current == *col, col).clicked() {
                            state.set_cat_field(1, col.clone());
                        }
                    }
                });
            ScrollArea::vertical()
                .id_salt("cat2_values")
                .max_height(140.0)
                .show(ui, |ui: &mut Ui| {
                    for label in &labels2 {
                        let mut checked = state.filter.cat2_values.contains(label);
                        if ui.checkbox(&mut checked, label).changed() {
                            if checked {
                                state.filter.cat2_values.insert(label.clone());
                            } else {
                                state.filter.cat2_values.remove(label);
                            }
                        }
                    }
                });
        }

        // ---- numeric range ----
        {
            let ui = &mut cols[2];
            ui.label("Variabel numerik:");
            let current = state.filter.num_field.clone().unwrap_or_default();
            egui::ComboBox::from_id_salt("num_field")
                .selected_text(&current)
                .show_ui(ui, |ui: &mut Ui| {
                    for col in &nums {
                        if ui.selectable_label(current == *col, col).clicked() {
                            state.set_numeric_field(col.clone());
                        }
                    }
                });

            let (lo, hi) = state.filter.bounds;
            ui.add(
                egui::Slider::new(&mut state.filter.range.0, lo..=hi)
                    .text("min")
                    .fixed_decimals(2),
            );
            ui.add(
                egui::Slider::new(&mut state.filter.range.1, lo..=hi)
                    .text("max")
                    .fixed_decimals(2),
            );
            // keep min <= max regardless of which slider moved
            if state.filter.range.0 > state.filter.range.1 {
                state.filter.range.1 = state.filter.range.0;
            }
        }
    });
}

// ---------------------------------------------------------------------------
// 4. Statistics
// ---------------------------------------------------------------------------

fn statistics(ui: &mut Ui, table: &Table) {
    ui.heading("Statistik Deskriptif");
    ui.add_space(4.0);

    ScrollArea::vertical().show(ui, |ui: &mut Ui| {
        ui.strong("Statistik Numerik Lengkap");
        describe_grid(ui, table);

        ui.add_space(12.0);
        ui.strong("Boxplot Semua Variabel Numerik");
        charts::boxplot_all(ui, table, 320.0);

        ui.add_space(8.0);
        ui.label(
            "Boxplot di atas menunjukkan sebaran data serta outlier yang mungkin \
             muncul pada variabel numerik. Outlier dapat mengindikasikan kondisi \
             ekstrem yang patut diperhatikan, misalnya berat lahir yang sangat \
             rendah atau umur yang tidak lazim.",
        );
    });
}

// ---------------------------------------------------------------------------
// 5. Visualization
// ---------------------------------------------------------------------------

fn visualization(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Visualisasi Interaktif");
    ui.add_space(4.0);

    let columns = match &state.table {
        Some(table) => table.column_names(),
        None => return,
    };

    ui.horizontal(|ui: &mut Ui| {
        ui.label("Jenis grafik:");
        egui::ComboBox::from_id_salt("chart_kind")
            .selected_text(state.chart.kind.to_string())
            .show_ui(ui, |ui: &mut Ui| {
                for kind in crate::data::chart::ChartKind::ALL {
                    ui.selectable_value(&mut state.chart.kind, kind, kind.to_string());
                }
            });

        ui.label("Variabel:");
        let current = state.chart.field.clone().unwrap_or_default();
        egui::ComboBox::from_id_salt("chart_field")
            .selected_text(&current)
            .show_ui(ui, |ui: &mut Ui| {
                for col in &columns {
                    if ui.selectable_label(current == *col, col).clicked() {
                        state.chart.field = Some(col.clone());
                    }
                }
            });
    });
    ui.add_space(8.0);

    let Some(spec) = state.chart_spec() else {
        ui.label("Pilih variabel untuk digambar.");
        return;
    };
    let Some(table) = &state.table else { return };

    match crate::data::chart::compute(table, &spec) {
        Ok(data) => {
            charts::render(ui, &spec, &data, 360.0);
            ui.add_space(8.0);
            ui.label(format!(
                "Grafik {} untuk variabel {} menunjukkan pola distribusi atau \
                 komposisi kategori yang dapat membantu memahami faktor yang \
                 berhubungan dengan stunting.",
                spec.kind, spec.field
            ));
        }
        Err(e) => {
            ui.colored_label(Color32::RED, e.to_string());
        }
    }
}

// ---------------------------------------------------------------------------
// 6. About
// ---------------------------------------------------------------------------

fn about(ui: &mut Ui) {
    ui.heading("Tentang Dashboard");
    ui.add_space(4.0);
    ui.label(
        "Dashboard ini dibuat untuk visualisasi data Stunting.\n\n\
         Fitur-fitur:\n\
         • Statistik deskriptif otomatis\n\
         • Visualisasi interaktif\n\
         • Filter kategori & numerik\n\n\
         Dashboard ini juga dibuat sebagai bentuk pemenuhan Tugas Ujian Akhir \
         Semester Mata Kuliah Komputasi Statistika.",
    );
}
