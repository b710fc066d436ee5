use eframe::egui::{self, RichText, ScrollArea, Slider, Ui};
use eframe::egui::emath::round_to_decimals;

use crate::data::model::{Bounds, Edge};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let dataset = state.dataset();
    if dataset.is_empty() {
        ui.label("The survey file has no rows.");
        return;
    }

    // Copy what we need so we can mutate state inside the scroll area.
    let weight = dataset.weight_bounds().unwrap_or_default();
    let age = dataset.age_bounds().unwrap_or_default();
    let sleep = dataset.sleep_hours_bounds().unwrap_or_default();
    let genders: Vec<String> = dataset.genders().iter().cloned().collect();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            range_controls(ui, "Weight Range:", &mut state.controls.weight, weight, 1.0);
            ui.separator();
            range_controls(ui, "Age Range:", &mut state.controls.age, age, 1.0);
            ui.separator();

            // ---- Gender checklist ----
            let n_selected = state.controls.genders.len();
            ui.strong(format!("Gender:  ({n_selected}/{})", genders.len()));
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all_genders();
                }
                if ui.small_button("None").clicked() {
                    state.select_no_genders();
                }
            });
            for gender in &genders {
                let mut checked = state.controls.genders.contains(gender);
                if ui.checkbox(&mut checked, gender.as_str()).changed() {
                    state.toggle_gender(gender);
                }
            }
            ui.separator();

            range_controls(
                ui,
                "Sleep Hours Range:",
                &mut state.controls.sleep_hours,
                sleep,
                0.1,
            );
            ui.separator();

            if ui.button("Reset filters").clicked() {
                state.reset_filters();
            }
        });

    // Recompute the charts after any slider change.
    state.refresh();
}

/// A pair of sliders editing one inclusive range. Moving one end past the
/// other drags the other end along.
fn range_controls(ui: &mut Ui, label: &str, bounds: &mut Bounds, full: Bounds, step: f64) {
    ui.strong(label);
    let range = full.min..=full.max;
    let decimals = step_decimals(step);
    if ui
        .add(
            Slider::new(&mut bounds.min, range.clone())
                .step_by(step)
                .max_decimals(decimals)
                .text("min"),
        )
        .changed()
    {
        bounds.min = snap_to_step(bounds.min, step, full);
        bounds.settle(Edge::Min);
    }
    if ui
        .add(
            Slider::new(&mut bounds.max, range)
                .step_by(step)
                .max_decimals(decimals)
                .text("max"),
        )
        .changed()
    {
        bounds.max = snap_to_step(bounds.max, step, full);
        bounds.settle(Edge::Max);
    }
}

/// Decimal places a slider step can produce: 1 → 0, 0.1 → 1, 0.25 → 2.
fn step_decimals(step: f64) -> usize {
    (0..=6)
        .find(|&d| {
            let scaled = step * 10f64.powi(d as i32);
            (scaled - scaled.round()).abs() < 1e-9
        })
        .unwrap_or(6)
}

/// Drop the float noise of `start + k * step` so the bound equals the value
/// shown on the slider. The ends of the observed range are kept exact.
fn snap_to_step(value: f64, step: f64, full: Bounds) -> f64 {
    if value == full.min || value == full.max {
        return value;
    }
    round_to_decimals(value, step_decimals(step))
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top bar with the two population counts.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    let snapshot = state.snapshot();
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(RichText::new(&snapshot.characteristics_info).strong());
        ui.label(&snapshot.total_people_info);
    });
    ui.add_space(2.0);
    egui::warn_if_debug_build(ui);
}
