use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use super::filter::FilteredView;

// ---------------------------------------------------------------------------
// Column names
// ---------------------------------------------------------------------------

pub const WEIGHT: &str = "weight";
pub const AGE: &str = "age";
pub const GENDER: &str = "gender";
pub const WORK_SLEEP_HOURS: &str = "work_sleep_hours";

/// Raw answers that carry no information and are read as missing.
pub const MISSING_SENTINELS: [&str; 2] = ["Don't Know", "Refused"];

/// Cell text that means "no value" in any column, matching the default
/// `na_values` of pandas' `read_csv`.
pub const NA_TOKENS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Whether a raw cell holds no value: blank or one of [`NA_TOKENS`].
pub fn is_na(raw: &str) -> bool {
    let raw = raw.trim();
    raw.is_empty() || NA_TOKENS.contains(&raw)
}

/// Every column a survey file must provide.
pub fn required_columns() -> impl Iterator<Item = &'static str> {
    [WEIGHT, AGE, GENDER, WORK_SLEEP_HOURS]
        .into_iter()
        .chain(Question::ALL.into_iter().map(Question::column))
}

// ---------------------------------------------------------------------------
// Question – one categorical survey column
// ---------------------------------------------------------------------------

/// The categorical health / sleep-aid questions of the survey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Question {
    Depression,
    AnxietyDisorder,
    LungDisease,
    HighBloodPressure,
    ThinkSleepProblem,
    OtcMedsAid,
    PrescribedMedsAid,
    AlcoholAid,
    EyemaskEarplugsAid,
    MelatoninAid,
}

impl Question {
    pub const ALL: [Question; 10] = [
        Question::Depression,
        Question::AnxietyDisorder,
        Question::LungDisease,
        Question::HighBloodPressure,
        Question::ThinkSleepProblem,
        Question::OtcMedsAid,
        Question::PrescribedMedsAid,
        Question::AlcoholAid,
        Question::EyemaskEarplugsAid,
        Question::MelatoninAid,
    ];

    /// Column header used in the source file.
    pub fn column(self) -> &'static str {
        match self {
            Question::Depression => "depression",
            Question::AnxietyDisorder => "anxiety_disorder",
            Question::LungDisease => "lung_disease",
            Question::HighBloodPressure => "high_blood_pressure",
            Question::ThinkSleepProblem => "think_sleep_problem",
            Question::OtcMedsAid => "otc_meds_aid",
            Question::PrescribedMedsAid => "prescribed_meds_aid",
            Question::AlcoholAid => "alcohol_aid",
            Question::EyemaskEarplugsAid => "eyemask_earplugs_aid",
            Question::MelatoninAid => "melatonin_aid",
        }
    }
}

// ---------------------------------------------------------------------------
// Response – a normalized answer
// ---------------------------------------------------------------------------

/// A non-missing answer to a [`Question`].
///
/// "Don't Know" and "Refused" have no variant: they become a missing answer
/// while parsing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Response {
    Yes,
    No,
    Maybe,
    Other(String),
}

impl Response {
    /// Normalize a raw cell. Blank cells, [`NA_TOKENS`] and
    /// [`MISSING_SENTINELS`] yield `None`.
    pub fn parse(raw: &str) -> Option<Response> {
        let raw = raw.trim();
        if is_na(raw) || MISSING_SENTINELS.contains(&raw) {
            return None;
        }
        Some(match raw {
            "Yes" => Response::Yes,
            "No" => Response::No,
            "Maybe" => Response::Maybe,
            other => Response::Other(other.to_string()),
        })
    }
}

// ---------------------------------------------------------------------------
// Bounds – an inclusive numeric range
// ---------------------------------------------------------------------------

/// Inclusive `[min, max]` range. An inverted range contains nothing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

/// Which end of a [`Bounds`] the user just moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Min,
    Max,
}

impl Bounds {
    pub fn new(min: f64, max: f64) -> Self {
        Bounds { min, max }
    }

    /// A missing value is never inside any range.
    pub fn contains(&self, value: Option<f64>) -> bool {
        match value {
            Some(v) => self.min <= v && v <= self.max,
            None => false,
        }
    }

    /// Smallest range covering every present value, `None` if there are none.
    pub fn observed(values: impl IntoIterator<Item = Option<f64>>) -> Option<Bounds> {
        values.into_iter().flatten().fold(None, |acc, v| {
            Some(match acc {
                None => Bounds::new(v, v),
                Some(b) => Bounds::new(b.min.min(v), b.max.max(v)),
            })
        })
    }

    /// Re-order after editing one end: the other end is dragged along.
    pub fn settle(&mut self, edited: Edge) {
        if self.min > self.max {
            match edited {
                Edge::Min => self.max = self.min,
                Edge::Max => self.min = self.max,
            }
        }
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

// ---------------------------------------------------------------------------
// Record – one survey respondent
// ---------------------------------------------------------------------------

/// One row of the survey.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub weight: Option<f64>,
    pub age: Option<f64>,
    pub gender: Option<String>,
    pub work_sleep_hours: Option<f64>,
    /// Non-missing answers; an absent question is missing.
    pub answers: BTreeMap<Question, Response>,
}

impl Record {
    pub fn new(
        weight: Option<f64>,
        age: Option<f64>,
        gender: Option<String>,
        work_sleep_hours: Option<f64>,
    ) -> Self {
        Record {
            weight,
            age,
            gender,
            work_sleep_hours,
            answers: BTreeMap::new(),
        }
    }

    pub fn with_answer(mut self, question: Question, response: Response) -> Self {
        self.answers.insert(question, response);
        self
    }

    pub fn answer(&self, question: Question) -> Option<&Response> {
        self.answers.get(&question)
    }
}

// ---------------------------------------------------------------------------
// SurveyDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The loaded survey with indices for the filter controls.
///
/// Read-only once built: there are no `&mut self` methods.
#[derive(Debug, Clone)]
pub struct SurveyDataset {
    records: Vec<Record>,
    genders: BTreeSet<String>,
    weight: Option<Bounds>,
    age: Option<Bounds>,
    sleep_hours: Option<Bounds>,
}

impl SurveyDataset {
    /// Build control indices from already-normalized records.
    pub fn from_records(records: Vec<Record>) -> Self {
        let genders = records.iter().filter_map(|r| r.gender.clone()).collect();
        let weight = Bounds::observed(records.iter().map(|r| r.weight));
        let age = Bounds::observed(records.iter().map(|r| r.age));
        let sleep_hours = Bounds::observed(records.iter().map(|r| r.work_sleep_hours));
        SurveyDataset {
            records,
            genders,
            weight,
            age,
            sleep_hours,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// The whole dataset as a view, in file order.
    pub fn view(&self) -> FilteredView<'_> {
        FilteredView::new(self.records().iter().collect())
    }

    /// Sorted set of observed gender values.
    pub fn genders(&self) -> &BTreeSet<String> {
        &self.genders
    }

    pub fn weight_bounds(&self) -> Option<Bounds> {
        self.weight
    }

    pub fn age_bounds(&self) -> Option<Bounds> {
        self.age
    }

    pub fn sleep_hours_bounds(&self) -> Option<Bounds> {
        self.sleep_hours
    }

    /// Number of respondents.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
