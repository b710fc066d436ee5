/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .tsv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file, "Don't Know"/"Refused" → missing
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ SurveyDataset  │  Vec<Record>, gender set, observed ranges
///   └───────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  Constraint → FilteredView (borrowed rows)
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  % "Yes" per question, sleep-problem breakdown
///   └───────────┘
/// ```

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
