use eframe::egui;
use egui_extras::{Size, StripBuilder};

use crate::data::model::SurveyDataset;
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SleepDashboardApp {
    pub state: AppState,
}

impl SleepDashboardApp {
    pub fn new(dataset: SurveyDataset) -> Self {
        Self {
            state: AppState::new(dataset),
        }
    }
}

impl eframe::App for SleepDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Top panel: population counts ----
        egui::TopBottomPanel::top("summary_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // ---- Central panel: bar chart (3/4) and pie chart (1/4) ----
        let snapshot = self.state.snapshot();
        egui::CentralPanel::default().show(ctx, |ui| {
            StripBuilder::new(ui)
                .size(Size::relative(0.75))
                .size(Size::remainder())
                .horizontal(|mut strip| {
                    strip.cell(|ui| plot::health_chart(ui, &snapshot.health_chart));
                    strip.cell(|ui| plot::perception_chart(ui, &snapshot.perception_chart));
                });
        });
    }
}
