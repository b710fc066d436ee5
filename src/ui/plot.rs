use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoint, PlotPoints, Polygon, Text};

use crate::dashboard::{ComparisonChart, ProportionChart, Wedge};

/// Share of each category slot taken up by its group of bars.
const GROUP_WIDTH: f64 = 0.8;
/// Wedge pieces span at most a quarter turn, so each polygon is convex.
const MAX_PIECE_ANGLE: f64 = std::f64::consts::FRAC_PI_2;
const ARC_STEP: f64 = 0.05;

// ---------------------------------------------------------------------------
// Grouped bar chart (filtered vs. total)
// ---------------------------------------------------------------------------

pub fn health_chart(ui: &mut Ui, chart: &ComparisonChart) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(chart.title);
    });

    let n = chart.series.len().max(1) as f64;
    let width = GROUP_WIDTH / n;
    let bar_charts: Vec<BarChart> = chart
        .series
        .iter()
        .enumerate()
        .map(|(s, series)| {
            let offset = (s as f64 - (n - 1.0) / 2.0) * width;
            let bars = series
                .values
                .iter()
                .zip(&chart.categories)
                .enumerate()
                .map(|(i, (&value, category))| {
                    Bar::new(i as f64 + offset, value)
                        .width(width)
                        .name(category)
                        .fill(series.color)
                })
                .collect();
            BarChart::new(bars).name(series.name).color(series.color)
        })
        .collect();

    let categories = chart.categories.clone();
    Plot::new("health_chart")
        .legend(Legend::default())
        .x_axis_label(chart.x_label)
        .y_axis_label(chart.y_label)
        .x_axis_formatter(move |mark, _range| category_label(&categories, mark.value))
        .include_y(0.0)
        .include_y(100.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            for bar_chart in bar_charts {
                plot_ui.bar_chart(bar_chart);
            }
        });
}

/// Axis tick text: category names at integer positions, nothing in between.
fn category_label(categories: &[&str], value: f64) -> String {
    let index = value.round();
    if (value - index).abs() > 1e-6 || index < 0.0 {
        return String::new();
    }
    categories
        .get(index as usize)
        .map(|c| c.to_string())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Pie chart (sleep-problem perception)
// ---------------------------------------------------------------------------

pub fn perception_chart(ui: &mut Ui, chart: &ProportionChart) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(RichText::new(&chart.title).strong().size(12.0));
    });

    let wedges = chart.wedges();
    if wedges.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("No answers for the current selection");
        });
        return;
    }

    Plot::new("perception_chart")
        .legend(Legend::default())
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .include_x(-1.1)
        .include_x(1.1)
        .include_y(-1.2)
        .include_y(1.2)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            for wedge in &wedges {
                let slice = &chart.slices[wedge.slice];
                // pieces share a name so the legend shows one entry per slice
                for piece in wedge_pieces(wedge) {
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::new(piece))
                            .name(slice.label)
                            .fill_color(slice.color)
                            .stroke(Stroke::new(1.0, Color32::WHITE)),
                    );
                }
                let (sin, cos) = wedge.mid().sin_cos();
                plot_ui.text(Text::new(
                    PlotPoint::new(0.65 * cos, 0.65 * sin),
                    RichText::new(format!("{:.1}%", wedge.share * 100.0)).color(Color32::BLACK),
                ));
            }
        });
}

/// Split a wedge of the unit circle into convex polygons (centre + arc).
fn wedge_pieces(wedge: &Wedge) -> Vec<Vec<[f64; 2]>> {
    let sweep = wedge.end - wedge.start;
    let n_pieces = (sweep / MAX_PIECE_ANGLE - 1e-9).ceil().max(1.0) as usize;
    let piece_sweep = sweep / n_pieces as f64;

    (0..n_pieces)
        .map(|p| {
            let start = wedge.start + p as f64 * piece_sweep;
            let steps = (piece_sweep / ARC_STEP).ceil().max(1.0) as usize;
            let mut points = Vec::with_capacity(steps + 2);
            points.push([0.0, 0.0]);
            for k in 0..=steps {
                let angle = start + piece_sweep * k as f64 / steps as f64;
                points.push([angle.cos(), angle.sin()]);
            }
            points
        })
        .collect()
}
