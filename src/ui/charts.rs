use std::f32::consts::TAU;

use eframe::egui::{Align2, Color32, CornerRadius, FontId, Sense, Shape, Stroke, Ui, Vec2};
use egui_plot::{Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Legend, Plot, Points};

use crate::color::{self, ACCENT};
use crate::data::chart::{ChartData, ChartSpec, HistBin, PieSlice};
use crate::data::model::Table;
use crate::data::stats::{self, BoxSummary};

// ---------------------------------------------------------------------------
// Chart rendering (visualisation page)
// ---------------------------------------------------------------------------

/// Draw a computed chart series.
pub fn render(ui: &mut Ui, spec: &ChartSpec, data: &ChartData, height: f32) {
    match data {
        ChartData::Bar(counts) => bar_chart(ui, &spec.field, counts, height),
        ChartData::Pie(slices) => pie_chart(ui, slices, height),
        ChartData::Histogram(bins) => histogram(ui, &spec.field, bins, height),
        ChartData::Boxplot(summary) => boxplot_single(ui, &spec.field, summary, height),
    }
}

fn bar_chart(ui: &mut Ui, field: &str, counts: &[(String, usize)], height: f32) {
    let palette = color::generate_palette(counts.len());

    Plot::new("bar_chart")
        .legend(Legend::default())
        .height(height)
        .y_axis_label("Jumlah")
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (i, (label, count)) in counts.iter().enumerate() {
                let bar = Bar::new(i as f64, *count as f64).width(0.7);
                plot_ui.bar_chart(
                    BarChart::new(vec![bar])
                        .name(label)
                        .color(palette[i % palette.len()]),
                );
            }
        });
    ui.label(format!("Bar Chart - {field}"));
}

fn histogram(ui: &mut Ui, field: &str, bins: &[HistBin], height: f32) {
    let bars: Vec<Bar> = bins
        .iter()
        .map(|b| {
            let center = (b.start + b.end) / 2.0;
            let width = (b.end - b.start).max(f64::EPSILON);
            Bar::new(center, b.count as f64).width(width)
        })
        .collect();

    Plot::new("histogram")
        .height(height)
        .x_axis_label(field.to_string())
        .y_axis_label("Frekuensi")
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(ACCENT).name(field));
        });
    ui.label(format!("Histogram - {field}"));
}

fn boxplot_single(ui: &mut Ui, field: &str, summary: &BoxSummary, height: f32) {
    Plot::new("boxplot")
        .height(height)
        .y_axis_label(field.to_string())
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.box_plot(
                BoxPlot::new(vec![box_elem(0.0, field, summary)])
                    .name(field)
                    .color(ACCENT),
            );
            plot_outliers(plot_ui, 0.0, &summary.outliers);
        });
    ui.label(format!("Boxplot - {field}"));
}

// ---------------------------------------------------------------------------
// Statistics page: one boxplot per numeric column
// ---------------------------------------------------------------------------

pub fn boxplot_all(ui: &mut Ui, table: &Table, height: f32) {
    let numeric = table.numeric_columns();
    if numeric.is_empty() {
        ui.label("Tidak ada variabel numerik.");
        return;
    }
    let palette = color::generate_palette(numeric.len());

    Plot::new("boxplot_all")
        .legend(Legend::default())
        .height(height)
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (i, name) in numeric.iter().enumerate() {
                let Some(col) = table.column(name) else { continue };
                let Some(summary) = stats::box_summary(col) else {
                    continue;
                };
                plot_ui.box_plot(
                    BoxPlot::new(vec![box_elem(i as f64, name, &summary)])
                        .name(name)
                        .color(palette[i % palette.len()]),
                );
                plot_outliers(plot_ui, i as f64, &summary.outliers);
            }
        });
}

fn box_elem(x: f64, name: &str, s: &BoxSummary) -> BoxElem {
    BoxElem::new(
        x,
        BoxSpread::new(s.whisker_low, s.q1, s.median, s.q3, s.whisker_high),
    )
    .name(name)
    .box_width(0.5)
}

fn plot_outliers(plot_ui: &mut egui_plot::PlotUi, x: f64, outliers: &[f64]) {
    if outliers.is_empty() {
        return;
    }
    let points: Vec<[f64; 2]> = outliers.iter().map(|&y| [x, y]).collect();
    plot_ui.points(Points::new(points).radius(2.5).color(Color32::DARK_GRAY));
}

// ---------------------------------------------------------------------------
// Pie chart – drawn directly with the painter (egui_plot has no pie)
// ---------------------------------------------------------------------------

fn pie_chart(ui: &mut Ui, slices: &[PieSlice], height: f32) {
    let palette = color::generate_palette(slices.len());

    ui.horizontal(|ui: &mut Ui| {
        let (rect, _response) =
            ui.allocate_exact_size(Vec2::splat(height), Sense::hover());
        let painter = ui.painter_at(rect);
        let center = rect.center();
        let radius = rect.width() * 0.45;

        let mut angle = -TAU / 4.0; // start at twelve o'clock
        for (i, slice) in slices.iter().enumerate() {
            let sweep = slice.fraction as f32 * TAU;
            let steps = ((sweep / 0.05).ceil() as usize).max(2);
            let mut points = vec![center];
            for s in 0..=steps {
                let a = angle + sweep * s as f32 / steps as f32;
                points.push(center + radius * Vec2::angled(a));
            }
            painter.add(Shape::convex_polygon(
                points,
                palette[i % palette.len()],
                Stroke::new(1.0, Color32::WHITE),
            ));

            // percentage label at the wedge midpoint
            if slice.fraction >= 0.04 {
                let mid = angle + sweep / 2.0;
                let pos = center + radius * 0.6 * Vec2::angled(mid);
                painter.text(
                    pos,
                    Align2::CENTER_CENTER,
                    format!("{:.1}%", slice.fraction * 100.0),
                    FontId::proportional(12.0),
                    Color32::WHITE,
                );
            }
            angle += sweep;
        }

        // legend
        ui.vertical(|ui: &mut Ui| {
            for (i, slice) in slices.iter().enumerate() {
                ui.horizontal(|ui: &mut Ui| {
                    let (swatch, _) =
                        ui.allocate_exact_size(Vec2::splat(10.0), Sense::hover());
                    ui.painter_at(swatch).rect_filled(
                        swatch,
                        CornerRadius::same(2),
                        palette[i % palette.len()],
                    );
                    ui.label(format!(
                        "{}: {} ({:.1}%)",
                        slice.label,
                        slice.count,
                        slice.fraction * 100.0
                    ));
                });
            }
        });
    });
}
