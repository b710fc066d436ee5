use crate::dashboard::{render, DashboardSnapshot};
use crate::data::filter::Constraint;
use crate::data::model::SurveyDataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded once at startup, never replaced.
    dataset: SurveyDataset,

    /// Values of the four filter controls.
    pub controls: Constraint,

    /// Constraint the current snapshot was computed for.
    rendered_for: Constraint,

    /// Counts and charts for `rendered_for`.
    snapshot: DashboardSnapshot,
}

impl AppState {
    /// Start with every control at its full range.
    pub fn new(dataset: SurveyDataset) -> Self {
        let controls = Constraint::full(&dataset);
        let snapshot = render(&dataset, &controls);
        Self {
            rendered_for: controls.clone(),
            controls,
            dataset,
            snapshot,
        }
    }

    pub fn dataset(&self) -> &SurveyDataset {
        &self.dataset
    }

    pub fn snapshot(&self) -> &DashboardSnapshot {
        &self.snapshot
    }

    /// Recompute the snapshot if the controls changed since the last call.
    /// Returns whether anything was recomputed.
    pub fn refresh(&mut self) -> bool {
        if self.controls == self.rendered_for {
            return false;
        }
        self.snapshot = render(&self.dataset, &self.controls);
        self.rendered_for = self.controls.clone();
        log::debug!(
            "recomputed dashboard: {} of {} respondents",
            self.snapshot.filtered_count,
            self.snapshot.total_count
        );
        true
    }

    /// Put every control back to its full range.
    pub fn reset_filters(&mut self) {
        self.controls = Constraint::full(&self.dataset);
        self.refresh();
    }

    /// Toggle a single gender in the selection.
    pub fn toggle_gender(&mut self, gender: &str) {
        if !self.controls.genders.remove(gender) {
            self.controls.genders.insert(gender.to_string());
        }
        self.refresh();
    }

    /// Select every observed gender.
    pub fn select_all_genders(&mut self) {
        self.controls.genders = self.dataset.genders().clone();
        self.refresh();
    }

    /// Deselect every gender.
    pub fn select_no_genders(&mut self) {
        self.controls.genders.clear();
        self.refresh();
    }
}
