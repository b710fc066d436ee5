use std::collections::BTreeSet;

use super::model::{Bounds, Record, SurveyDataset};

// ---------------------------------------------------------------------------
// Constraint – the four dashboard filters
// ---------------------------------------------------------------------------

/// Current selection of the four filter controls.
///
/// A record passes when every predicate holds. A missing value never passes
/// the predicate for its column; an empty gender set or an inverted range
/// therefore yields an empty view.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    pub weight: Bounds,
    pub age: Bounds,
    pub genders: BTreeSet<String>,
    pub sleep_hours: Bounds,
}

impl Constraint {
    /// The constraint that selects the whole dataset (initial control state).
    pub fn full(dataset: &SurveyDataset) -> Self {
        Constraint {
            weight: dataset.weight_bounds().unwrap_or_default(),
            age: dataset.age_bounds().unwrap_or_default(),
            genders: dataset.genders().clone(),
            sleep_hours: dataset.sleep_hours_bounds().unwrap_or_default(),
        }
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.weight.contains(record.weight)
            && self.age.contains(record.age)
            && record
                .gender
                .as_ref()
                .is_some_and(|g| self.genders.contains(g))
            && self.sleep_hours.contains(record.work_sleep_hours)
    }
}

// ---------------------------------------------------------------------------
// FilteredView – borrowed subset of a dataset
// ---------------------------------------------------------------------------

/// Records of a dataset that satisfy some constraint, in dataset order.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredView<'a> {
    records: Vec<&'a Record>,
}

impl<'a> FilteredView<'a> {
    pub(crate) fn new(records: Vec<&'a Record>) -> Self {
        FilteredView { records }
    }

    /// Narrow this view further.
    pub fn refine(&self, constraint: &Constraint) -> FilteredView<'a> {
        FilteredView {
            records: self
                .records
                .iter()
                .copied()
                .filter(|r| constraint.matches(r))
                .collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Record> + '_ {
        self.records.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Return the records of `dataset` that pass `constraint`.
pub fn filter<'a>(dataset: &'a SurveyDataset, constraint: &Constraint) -> FilteredView<'a> {
    dataset.view().refine(constraint)
}
