use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::LoadError;
use super::model::{
    is_na, required_columns, Question, Record, Response, SurveyDataset, AGE, GENDER, WEIGHT,
    WORK_SLEEP_HOURS,
};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a survey file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`             – comma-separated, header row
/// * `.tsv` / `.tab`    – tab-separated, header row
/// * `.json`            – `[{ "weight": 150, "gender": "Female", ... }, ...]`
/// * `.parquet` / `.pq` – one column per field (string or numeric types)
///
/// "Don't Know" / "Refused" answers are normalized to missing here, once.
pub fn load_file(path: &Path) -> Result<SurveyDataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "csv" => load_delimited(path, b',')?,
        "tsv" | "tab" => load_delimited(path, b'\t')?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(LoadError::UnsupportedFormat(other.to_string())),
    };

    Ok(SurveyDataset::from_records(records))
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Format-independent row assembly
// ---------------------------------------------------------------------------

/// A raw cell before it is interpreted for its column.
#[derive(Debug, Clone, PartialEq)]
enum Cell {
    Missing,
    Number(f64),
    Text(String),
}

fn check_columns<'a>(available: impl IntoIterator<Item = &'a str>) -> Result<(), LoadError> {
    let available: Vec<&str> = available.into_iter().collect();
    let missing: Vec<String> = required_columns()
        .filter(|c| !available.contains(c))
        .map(str::to_string)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(LoadError::MissingColumns(missing))
    }
}

/// Build one [`Record`] by asking `cell` for each required column.
fn assemble(row: usize, mut cell: impl FnMut(&str) -> Cell) -> Result<Record, LoadError> {
    let weight = numeric(row, WEIGHT, cell(WEIGHT))?;
    let age = numeric(row, AGE, cell(AGE))?;
    let gender = text(cell(GENDER));
    let sleep = numeric(row, WORK_SLEEP_HOURS, cell(WORK_SLEEP_HOURS))?;

    let mut record = Record::new(weight, age, gender, sleep);
    for question in Question::ALL {
        if let Some(response) = text(cell(question.column())).as_deref().and_then(Response::parse) {
            record = record.with_answer(question, response);
        }
    }
    Ok(record)
}

/// NaN and the NA tokens are read as missing, like an empty cell.
fn numeric(row: usize, column: &str, cell: Cell) -> Result<Option<f64>, LoadError> {
    let value = match cell {
        Cell::Missing => return Ok(None),
        Cell::Number(v) => v,
        Cell::Text(s) => {
            let s = s.trim();
            if is_na(s) {
                return Ok(None);
            }
            s.parse::<f64>().map_err(|_| LoadError::InvalidValue {
                row,
                column: column.to_string(),
                value: s.to_string(),
            })?
        }
    };
    Ok((!value.is_nan()).then_some(value))
}

fn text(cell: Cell) -> Option<String> {
    match cell {
        Cell::Missing => None,
        Cell::Number(v) => Some(v.to_string()),
        Cell::Text(s) => {
            let s = s.trim();
            (!is_na(s)).then(|| s.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// Delimited (CSV / TSV) loader
// ---------------------------------------------------------------------------

/// Header row with column names, one respondent per line.
/// Columns beyond the required set are ignored.
fn load_delimited(path: &Path, delimiter: u8) -> Result<Vec<Record>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::Headers)
        .from_reader(open(path)?);

    let headers: HashMap<String, usize> = reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| (h.to_string(), i))
        .collect();
    check_columns(headers.keys().map(String::as_str))?;

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let row = result?;
        records.push(assemble(row_no, |column| {
            match headers.get(column).and_then(|&i| row.get(i)) {
                Some("") | None => Cell::Missing,
                Some(value) => Cell::Text(value.to_string()),
            }
        })?);
    }
    Ok(records)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "weight": 150, "age": 34, "gender": "Female", "work_sleep_hours": 6.5,
///     "depression": "No", "think_sleep_problem": "Maybe", ... },
///   ...
/// ]
/// ```
///
/// Columns are checked against the first object; later objects may omit keys.
/// An empty array has no columns at all and is rejected.
fn load_json(path: &Path) -> Result<Vec<Record>, LoadError> {
    let root: JsonValue = serde_json::from_reader(std::io::BufReader::new(open(path)?))?;
    let rows = match root {
        JsonValue::Array(rows) => rows,
        _ => return Err(LoadError::NotARecord { row: 0 }),
    };

    if rows.is_empty() {
        check_columns(std::iter::empty::<&str>())?;
    }

    let mut records = Vec::with_capacity(rows.len());
    for (row_no, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .ok_or(LoadError::NotARecord { row: row_no })?;
        if row_no == 0 {
            check_columns(obj.keys().map(String::as_str))?;
        }
        records.push(assemble(row_no, |column| json_cell(obj.get(column)))?);
    }
    Ok(records)
}

fn json_cell(value: Option<&JsonValue>) -> Cell {
    match value {
        None | Some(JsonValue::Null) => Cell::Missing,
        Some(JsonValue::String(s)) => Cell::Text(s.clone()),
        Some(JsonValue::Number(n)) => n
            .as_f64()
            .map(Cell::Number)
            .unwrap_or_else(|| Cell::Text(n.to_string())),
        Some(other) => Cell::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one column per field.
///
/// Accepted column types: Utf8 / LargeUtf8 for any column, and
/// Int32 / Int64 / Float32 / Float64 for the numeric ones. Nulls are missing.
/// Works with files written by both Pandas and Polars.
fn load_parquet(path: &Path) -> Result<Vec<Record>, LoadError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(open(path)?)?;
    check_columns(builder.schema().fields().iter().map(|f| f.name().as_str()))?;
    let reader = builder.build()?;

    let mut records = Vec::new();
    for batch in reader {
        let batch = batch?;

        let mut columns: HashMap<&str, &ArrayRef> = HashMap::new();
        for name in required_columns() {
            let col = batch
                .column_by_name(name)
                .ok_or_else(|| LoadError::MissingColumns(vec![name.to_string()]))?;
            if !supported_type(col.data_type()) {
                return Err(LoadError::UnsupportedColumnType {
                    column: name.to_string(),
                    data_type: col.data_type().to_string(),
                });
            }
            columns.insert(name, col);
        }

        let offset = records.len();
        for row in 0..batch.num_rows() {
            records.push(assemble(offset + row, |column| match columns.get(column) {
                Some(col) => arrow_cell(col, row),
                None => Cell::Missing,
            })?);
        }
    }
    Ok(records)
}

fn supported_type(data_type: &DataType) -> bool {
    matches!(
        data_type,
        DataType::Utf8
            | DataType::LargeUtf8
            | DataType::Int32
            | DataType::Int64
            | DataType::Float32
            | DataType::Float64
            | DataType::Null
    )
}

/// Extract a single cell from an Arrow column; the type was checked up front.
fn arrow_cell(col: &ArrayRef, row: usize) -> Cell {
    if col.is_null(row) {
        return Cell::Missing;
    }
    match col.data_type() {
        DataType::Utf8 => Cell::Text(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => Cell::Text(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => Cell::Number(col.as_primitive::<Int32Type>().value(row) as f64),
        DataType::Int64 => Cell::Number(col.as_primitive::<Int64Type>().value(row) as f64),
        DataType::Float32 => Cell::Number(col.as_primitive::<Float32Type>().value(row) as f64),
        DataType::Float64 => Cell::Number(col.as_primitive::<Float64Type>().value(row)),
        _ => Cell::Missing,
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::{Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;
    use tempfile::{Builder, NamedTempFile};

    use super::*;

    const HEADER: &str = "id,weight,age,gender,work_sleep_hours,depression,anxiety_disorder,\
lung_disease,high_blood_pressure,think_sleep_problem,otc_meds_aid,prescribed_meds_aid,\
alcohol_aid,eyemask_earplugs_aid,melatonin_aid";

    fn fixture(suffix: &str, contents: &str) -> NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn csv_rows_are_parsed_and_normalized() {
        let csv = format!(
            "{HEADER}\n\
1,150,34,Female,6.5,Yes,No,Don't Know,Refused,Maybe,No,No,No,No,Yes\n\
2,,61,Male,,No,Refused,No,Yes,No,,No,Don't Know,No,No\n"
        );
        let file = fixture(".csv", &csv);
        let ds = load_file(file.path()).unwrap();

        assert_eq!(ds.len(), 2);
        let first = &ds.records()[0];
        assert_eq!(first.weight, Some(150.0));
        assert_eq!(first.work_sleep_hours, Some(6.5));
        assert_eq!(first.gender.as_deref(), Some("Female"));
        assert_eq!(first.answer(Question::Depression), Some(&Response::Yes));
        assert_eq!(first.answer(Question::LungDisease), None);
        assert_eq!(first.answer(Question::HighBloodPressure), None);
        assert_eq!(first.answer(Question::ThinkSleepProblem), Some(&Response::Maybe));

        let second = &ds.records()[1];
        assert_eq!(second.weight, None);
        assert_eq!(second.work_sleep_hours, None);
        assert_eq!(second.answer(Question::AnxietyDisorder), None);
        assert_eq!(second.answer(Question::OtcMedsAid), None);
        assert_eq!(second.answer(Question::AlcoholAid), None);
        assert_eq!(second.answer(Question::HighBloodPressure), Some(&Response::Yes));
    }

    #[test]
    fn tab_separated_files_are_accepted() {
        let tsv = format!(
            "{}\n3\t200\t45\tMale\t7.2\tNo\tNo\tNo\tNo\tYes\tNo\tNo\tNo\tNo\tNo\n",
            HEADER.replace(',', "\t")
        );
        let file = fixture(".tsv", &tsv);
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.records()[0].age, Some(45.0));
        assert_eq!(ds.genders().len(), 1);
    }

    #[test]
    fn missing_columns_are_all_reported() {
        let file = fixture(".csv", "weight,age,gender\n150,30,Male\n");
        match load_file(file.path()) {
            Err(LoadError::MissingColumns(cols)) => {
                assert_eq!(cols.len(), 11);
                assert!(cols.contains(&"work_sleep_hours".to_string()));
                assert!(cols.contains(&"melatonin_aid".to_string()));
            }
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn non_numeric_weight_is_rejected() {
        let csv = format!("{HEADER}\n1,heavy,34,Female,6.5,Yes,No,No,No,Maybe,No,No,No,No,Yes\n");
        let file = fixture(".csv", &csv);
        match load_file(file.path()) {
            Err(LoadError::InvalidValue { row, column, value }) => {
                assert_eq!(row, 0);
                assert_eq!(column, "weight");
                assert_eq!(value, "heavy");
            }
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn absent_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_file(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let file = fixture(".xlsx", "");
        assert!(matches!(
            load_file(file.path()),
            Err(LoadError::UnsupportedFormat(ext)) if ext == "xlsx"
        ));
    }

    #[test]
    fn json_records_are_loaded() {
        let json = r#"[
            {"weight": 140, "age": 28, "gender": "Female", "work_sleep_hours": 7.5,
             "depression": "No", "anxiety_disorder": "Yes", "lung_disease": null,
             "high_blood_pressure": "No", "think_sleep_problem": "Yes",
             "otc_meds_aid": "No", "prescribed_meds_aid": "No", "alcohol_aid": "Refused",
             "eyemask_earplugs_aid": "No", "melatonin_aid": "No"},
            {"weight": 190.5, "age": 52, "gender": "Male",
             "depression": "Don't Know"}
        ]"#;
        let file = fixture(".json", json);
        let ds = load_file(file.path()).unwrap();

        assert_eq!(ds.len(), 2);
        let first = &ds.records()[0];
        assert_eq!(first.answer(Question::AnxietyDisorder), Some(&Response::Yes));
        assert_eq!(first.answer(Question::LungDisease), None);
        assert_eq!(first.answer(Question::AlcoholAid), None);
        let second = &ds.records()[1];
        assert_eq!(second.weight, Some(190.5));
        assert_eq!(second.work_sleep_hours, None);
        assert!(second.answers.is_empty());
    }

    #[test]
    fn na_tokens_are_missing_not_errors() {
        let csv = format!(
            "{HEADER}\n\
1,NA,34,N/A,nan,NA,<NA>,NULL,None,Maybe,null,No,No,No,Yes\n\
2,180,NULL,Male,6.8,No,No,No,Yes,No,No,No,No,No,No\n"
        );
        let file = fixture(".csv", &csv);
        let ds = load_file(file.path()).unwrap();

        let first = &ds.records()[0];
        assert_eq!(first.weight, None);
        assert_eq!(first.age, Some(34.0));
        assert_eq!(first.gender, None);
        assert_eq!(first.work_sleep_hours, None);
        for q in [
            Question::Depression,
            Question::AnxietyDisorder,
            Question::LungDisease,
            Question::HighBloodPressure,
            Question::OtcMedsAid,
        ] {
            assert_eq!(first.answer(q), None, "{q:?}");
        }
        assert_eq!(first.answer(Question::ThinkSleepProblem), Some(&Response::Maybe));

        let second = &ds.records()[1];
        assert_eq!(second.age, None);
        assert_eq!(second.work_sleep_hours, Some(6.8));
        assert_eq!(ds.genders().len(), 1);
    }

    #[test]
    fn na_strings_in_json_are_missing() {
        let json = r#"[
            {"weight": "NA", "age": 28, "gender": "Female", "work_sleep_hours": "N/A",
             "depression": "NA", "anxiety_disorder": "Yes", "lung_disease": "null",
             "high_blood_pressure": "No", "think_sleep_problem": "Yes",
             "otc_meds_aid": "No", "prescribed_meds_aid": "No", "alcohol_aid": "No",
             "eyemask_earplugs_aid": "No", "melatonin_aid": "No"}
        ]"#;
        let file = fixture(".json", json);
        let ds = load_file(file.path()).unwrap();
        let only = &ds.records()[0];
        assert_eq!(only.weight, None);
        assert_eq!(only.work_sleep_hours, None);
        assert_eq!(only.answer(Question::Depression), None);
        assert_eq!(only.answer(Question::LungDisease), None);
        assert_eq!(only.answer(Question::AnxietyDisorder), Some(&Response::Yes));
    }

    #[test]
    fn empty_json_array_has_no_columns() {
        let file = fixture(".json", "[]");
        match load_file(file.path()) {
            Err(LoadError::MissingColumns(cols)) => assert_eq!(cols.len(), 14),
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn json_must_be_an_array_of_objects() {
        let file = fixture(".json", "[1, 2]");
        assert!(matches!(
            load_file(file.path()),
            Err(LoadError::NotARecord { row: 0 })
        ));
    }

    #[test]
    fn parquet_columns_are_loaded() {
        let mut fields = vec![
            Field::new("weight", DataType::Int64, true),
            Field::new("age", DataType::Int64, true),
            Field::new("gender", DataType::Utf8, true),
            Field::new("work_sleep_hours", DataType::Float64, true),
        ];
        let mut arrays: Vec<ArrayRef> = vec![
            Arc::new(Int64Array::from(vec![Some(160), None])),
            Arc::new(Int64Array::from(vec![Some(39), Some(70)])),
            Arc::new(StringArray::from(vec![Some("Male"), Some("Female")])),
            Arc::new(Float64Array::from(vec![Some(6.3), Some(f64::NAN)])),
        ];
        for q in Question::ALL {
            fields.push(Field::new(q.column(), DataType::Utf8, true));
            arrays.push(Arc::new(StringArray::from(vec![Some("Yes"), Some("Don't Know")])));
        }
        let schema = Arc::new(Schema::new(fields));
        let batch = RecordBatch::try_new(schema.clone(), arrays).unwrap();

        let file = Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        let first = &ds.records()[0];
        assert_eq!(first.weight, Some(160.0));
        assert_eq!(first.work_sleep_hours, Some(6.3));
        assert_eq!(first.answer(Question::MelatoninAid), Some(&Response::Yes));
        let second = &ds.records()[1];
        assert_eq!(second.weight, None);
        assert_eq!(second.work_sleep_hours, None);
        assert!(second.answers.is_empty());
    }
}
