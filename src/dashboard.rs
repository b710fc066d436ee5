//! Turns the current filter selection into everything the dashboard shows.
//!
//! [`render`] is a pure function of the dataset and a [`Constraint`]; the UI
//! calls it again whenever a control changes and only draws what it returns.

use std::f64::consts::TAU;

use eframe::egui::Color32;

use crate::color::{from_hex, sunset_palette, FILTERED_HEX, TOTAL_HEX};
use crate::data::aggregate::{
    binary_percentages, count, ternary_percentages, DISORDER_FIELDS,
};
use crate::data::filter::{filter, Constraint};
use crate::data::model::SurveyDataset;

const HEALTH_TITLE: &str = "Percentage of People with Health Disorders";
const PERCEPTION_TITLE: &str = "Percentage of People Who Think They Have a Sleep Disorder";
const TITLE_WIDTH: usize = 30;

// ---------------------------------------------------------------------------
// Chart descriptions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    pub name: &'static str,
    pub color: Color32,
    /// One value per category, in category order.
    pub values: Vec<f64>,
}

/// Grouped bar chart: one group per category, one bar per series.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonChart {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub categories: Vec<&'static str>,
    pub series: Vec<BarSeries>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub label: &'static str,
    pub value: f64,
    pub color: Color32,
}

/// Angular extent of one pie slice, in radians counter-clockwise from +x.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wedge {
    /// Index into [`ProportionChart::slices`].
    pub slice: usize,
    pub start: f64,
    pub end: f64,
    /// Fraction of the whole pie, 0–1.
    pub share: f64,
}

impl Wedge {
    pub fn mid(&self) -> f64 {
        (self.start + self.end) / 2.0
    }
}

/// Pie chart. Slice values are percentages; the pie is drawn relative to
/// their sum.
#[derive(Debug, Clone, PartialEq)]
pub struct ProportionChart {
    /// May contain `\n` line breaks.
    pub title: String,
    pub slices: Vec<Slice>,
}

impl ProportionChart {
    /// Wedges for every non-empty slice, starting at 12 o'clock.
    /// Empty when all slices are zero.
    pub fn wedges(&self) -> Vec<Wedge> {
        let total: f64 = self.slices.iter().map(|s| s.value.max(0.0)).sum();
        if total <= 0.0 {
            return Vec::new();
        }

        let mut angle = TAU / 4.0;
        let mut wedges = Vec::new();
        for (i, slice) in self.slices.iter().enumerate() {
            let share = slice.value.max(0.0) / total;
            if share == 0.0 {
                continue;
            }
            // clockwise, like the usual pie chart
            let end = angle - share * TAU;
            wedges.push(Wedge {
                slice: i,
                start: end,
                end: angle,
                share,
            });
            angle = end;
        }
        wedges
    }
}

/// Everything drawn for one filter selection.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    pub filtered_count: usize,
    pub total_count: usize,
    pub characteristics_info: String,
    pub total_people_info: String,
    pub health_chart: ComparisonChart,
    pub perception_chart: ProportionChart,
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

pub fn render(dataset: &SurveyDataset, constraint: &Constraint) -> DashboardSnapshot {
    let everyone = dataset.view();
    let view = filter(dataset, constraint);

    let filtered_count = count(&view);
    let total_count = count(&everyone);
    log::debug!(
        "filter weight={} age={} sleep={} genders={:?} → {filtered_count}/{total_count}",
        constraint.weight,
        constraint.age,
        constraint.sleep_hours,
        constraint.genders,
    );

    let health_chart = ComparisonChart {
        title: HEALTH_TITLE,
        x_label: "Condition",
        y_label: "Percentage of People (%)",
        categories: DISORDER_FIELDS.iter().map(|q| q.column()).collect(),
        series: vec![
            BarSeries {
                name: "Filtered",
                color: from_hex(FILTERED_HEX),
                values: binary_percentages(&view, &DISORDER_FIELDS).values(),
            },
            BarSeries {
                name: "Total",
                color: from_hex(TOTAL_HEX),
                values: binary_percentages(&everyone, &DISORDER_FIELDS).values(),
            },
        ],
    };

    let perception = ternary_percentages(&view);
    let [yes, no, maybe] = sunset_palette();
    let perception_chart = ProportionChart {
        title: wrap_title(PERCEPTION_TITLE, TITLE_WIDTH),
        slices: vec![
            Slice { label: "Yes", value: perception.yes, color: yes },
            Slice { label: "No", value: perception.no, color: no },
            Slice { label: "Maybe", value: perception.maybe, color: maybe },
        ],
    };

    DashboardSnapshot {
        filtered_count,
        total_count,
        characteristics_info: format!(
            "Number of people with your characteristics: {filtered_count}"
        ),
        total_people_info: format!("Total number of people: {total_count}"),
        health_chart,
        perception_chart,
    }
}

/// Greedy word wrap. Words longer than `width` get a line of their own.
pub fn wrap_title(text: &str, width: usize) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines.join("\n")
}
