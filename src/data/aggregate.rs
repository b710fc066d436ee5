use super::filter::FilteredView;
use super::model::{Question, Response};

/// Disorders compared between the filtered view and the whole population.
pub const DISORDER_FIELDS: [Question; 4] = [
    Question::Depression,
    Question::AnxietyDisorder,
    Question::LungDisease,
    Question::HighBloodPressure,
];

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Percentage of "Yes" answers per question, in the order requested.
#[derive(Debug, Clone, PartialEq)]
pub struct PercentageSummary {
    entries: Vec<(Question, f64)>,
}

impl PercentageSummary {
    pub fn iter(&self) -> impl Iterator<Item = (Question, f64)> + '_ {
        self.entries.iter().copied()
    }

    pub fn values(&self) -> Vec<f64> {
        self.iter().map(|(_, p)| p).collect()
    }
}

/// Breakdown of `think_sleep_problem`. Each share is relative to the
/// respondents who answered, so the three need not sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SleepPerception {
    pub yes: f64,
    pub no: f64,
    pub maybe: f64,
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Share (0–100) of answered records whose answer equals `target`.
/// Missing answers count towards neither side; no answers at all gives 0.
fn frequency(view: &FilteredView<'_>, question: Question, target: &Response) -> f64 {
    let (answered, hits) = view
        .iter()
        .filter_map(|r| r.answer(question))
        .fold((0usize, 0usize), |(answered, hits), answer| {
            (answered + 1, hits + usize::from(answer == target))
        });

    if answered == 0 {
        0.0
    } else {
        hits as f64 / answered as f64 * 100.0
    }
}

/// Percentage of "Yes" for each of `fields`.
pub fn binary_percentages(view: &FilteredView<'_>, fields: &[Question]) -> PercentageSummary {
    PercentageSummary {
        entries: fields
            .iter()
            .map(|&q| (q, frequency(view, q, &Response::Yes)))
            .collect(),
    }
}

pub fn ternary_percentages(view: &FilteredView<'_>) -> SleepPerception {
    let q = Question::ThinkSleepProblem;
    SleepPerception {
        yes: frequency(view, q, &Response::Yes),
        no: frequency(view, q, &Response::No),
        maybe: frequency(view, q, &Response::Maybe),
    }
}

/// Number of rows, regardless of missing fields.
pub fn count(view: &FilteredView<'_>) -> usize {
    view.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{filter, Constraint};
    use crate::data::model::{Record, SurveyDataset};

    fn pct(summary: &PercentageSummary, question: Question) -> Option<f64> {
        summary.iter().find(|(q, _)| *q == question).map(|(_, p)| p)
    }

    fn blank() -> Record {
        Record::new(Some(150.0), Some(40.0), Some("Female".into()), Some(7.0))
    }

    fn answering(question: Question, answers: &[Option<Response>]) -> SurveyDataset {
        SurveyDataset::from_records(
            answers
                .iter()
                .map(|a| match a {
                    Some(r) => blank().with_answer(question, r.clone()),
                    None => blank(),
                })
                .collect(),
        )
    }

    #[test]
    fn six_of_ten_depressed_is_sixty_percent() {
        let mut answers = vec![Some(Response::Yes); 6];
        answers.extend(vec![Some(Response::No); 4]);
        let ds = answering(Question::Depression, &answers);

        let summary = binary_percentages(&ds.view(), &DISORDER_FIELDS);
        assert_eq!(pct(&summary, Question::Depression), Some(60.0));
        // nobody answered the others
        assert_eq!(pct(&summary, Question::LungDisease), Some(0.0));
        assert_eq!(
            summary.iter().map(|(q, _)| q).collect::<Vec<_>>(),
            DISORDER_FIELDS
        );
    }

    #[test]
    fn sleep_perception_breakdown() {
        let ds = answering(
            Question::ThinkSleepProblem,
            &[
                Some(Response::Yes),
                Some(Response::No),
                Some(Response::Maybe),
                Some(Response::Yes),
                Some(Response::No),
            ],
        );
        let p = ternary_percentages(&ds.view());
        assert_eq!(
            p,
            SleepPerception {
                yes: 40.0,
                no: 40.0,
                maybe: 20.0
            }
        );
    }

    #[test]
    fn missing_answers_leave_numerator_and_denominator() {
        let ds = answering(
            Question::Depression,
            &[Some(Response::Yes), None, Some(Response::No), None],
        );
        let summary = binary_percentages(&ds.view(), &[Question::Depression]);
        assert_eq!(summary.values(), [50.0]);
        assert_eq!(count(&ds.view()), 4);
    }

    #[test]
    fn unexpected_answers_stay_in_the_denominator() {
        let ds = answering(
            Question::ThinkSleepProblem,
            &[
                Some(Response::Yes),
                Some(Response::Other("Often".into())),
                None,
                Some(Response::No),
            ],
        );
        let p = ternary_percentages(&ds.view());
        let third = 100.0 / 3.0;
        assert!((p.yes - third).abs() < 1e-9);
        assert!((p.no - third).abs() < 1e-9);
        assert_eq!(p.maybe, 0.0);
        assert!(p.yes + p.no + p.maybe < 100.0);
    }

    #[test]
    fn empty_view_is_all_zero() {
        let ds = answering(Question::Depression, &[Some(Response::Yes)]);
        let mut c = Constraint::full(&ds);
        c.genders.clear();
        let view = filter(&ds, &c);

        assert_eq!(count(&view), 0);
        assert!(binary_percentages(&view, &DISORDER_FIELDS)
            .iter()
            .all(|(_, p)| p == 0.0));
        assert_eq!(ternary_percentages(&view), SleepPerception::default());
    }

    #[test]
    fn percentages_stay_within_bounds() {
        let ds = SurveyDataset::from_records(
            (0..37)
                .map(|i| {
                    let mut r = blank();
                    for (k, q) in Question::ALL.into_iter().enumerate() {
                        match (i + k) % 4 {
                            0 => r = r.with_answer(q, Response::Yes),
                            1 => r = r.with_answer(q, Response::No),
                            2 => r = r.with_answer(q, Response::Maybe),
                            _ => {}
                        }
                    }
                    r
                })
                .collect(),
        );
        let view = ds.view();
        for (_, p) in binary_percentages(&view, &Question::ALL).iter() {
            assert!((0.0..=100.0).contains(&p));
        }
        let t = ternary_percentages(&view);
        for p in [t.yes, t.no, t.maybe] {
            assert!((0.0..=100.0).contains(&p));
        }
    }
}
