use std::path::Path;

use anyhow::{Context, Result};
use arrow::array::{
    Array, ArrayRef, AsArray, Float32Array, Float64Array, Int32Array, Int64Array,
};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::error::SchemaError;
use super::model::{columns, LaunchRecord, LaunchTable, Outcome};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the launch table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the launch columns (the usual export)
/// * `.json`    – `[{ "Launch Site": ..., "Payload Mass (kg)": ..., ... }, ...]`
/// * `.parquet` – flat columns with the same names
///
/// Any failure here is fatal for the dashboard.
pub fn load_file(path: &Path) -> Result<LaunchTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(SchemaError::UnsupportedExtension(other.to_string()).into()),
    };

    Ok(LaunchTable::from_records(records)?)
}

// ---------------------------------------------------------------------------
// Row shape shared by the CSV and JSON loaders
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawLaunchRow {
    #[serde(rename = "Flight Number", default)]
    flight_number: Option<i64>,
    #[serde(rename = "Launch Site")]
    launch_site: String,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    #[serde(rename = "Booster Version", default)]
    booster_version: Option<String>,
    #[serde(rename = "Booster Version Category")]
    booster_category: String,
    #[serde(rename = "class")]
    class: i64,
}

impl RawLaunchRow {
    fn into_record(self, row: usize) -> Result<LaunchRecord, SchemaError> {
        for (column, value) in [
            (columns::LAUNCH_SITE, &self.launch_site),
            (columns::BOOSTER_CATEGORY, &self.booster_category),
        ] {
            if value.trim().is_empty() {
                return Err(SchemaError::EmptyCell {
                    row,
                    column: column.to_string(),
                });
            }
        }
        let outcome = Outcome::from_class(self.class)
            .ok_or(SchemaError::InvalidOutcome { row, value: self.class })?;

        Ok(LaunchRecord {
            flight_number: self.flight_number,
            launch_site: self.launch_site,
            payload_mass_kg: self.payload_mass_kg,
            booster_version: self.booster_version.filter(|v| !v.is_empty()),
            booster_category: self.booster_category,
            outcome,
        })
    }
}

fn check_required(mut present: impl FnMut(&str) -> bool) -> Result<(), SchemaError> {
    match columns::REQUIRED.into_iter().find(|&col| !present(col)) {
        Some(col) => Err(SchemaError::MissingColumn {
            column: col.to_string(),
        }),
        None => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one launch per row.
/// Extra columns (e.g. a leading pandas index) are ignored.
fn load_csv(path: &Path) -> Result<Vec<LaunchRecord>> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers = reader.headers().context("reading CSV headers")?.clone();
    check_required(|col| headers.iter().any(|h| h == col))?;

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<RawLaunchRow>().enumerate() {
        let raw = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(raw.into_record(row_no)?);
    }

    Ok(records)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`.
fn load_json(path: &Path) -> Result<Vec<LaunchRecord>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = root.as_array().context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        check_required(|col| obj.contains_key(col))?;

        let raw: RawLaunchRow = serde_json::from_value(row.clone())
            .with_context(|| format!("Row {i}: invalid launch record"))?;
        records.push(raw.into_record(i)?);
    }

    Ok(records)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with flat launch columns.
///
/// String columns may be Utf8 or LargeUtf8; numeric columns any of
/// Int32/Int64/Float32/Float64. Works with files written by both **Pandas**
/// and **Polars**.
fn load_parquet(path: &Path) -> Result<Vec<LaunchRecord>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let offset = records.len();
        read_batch(&batch, offset, &mut records)?;
    }

    Ok(records)
}

fn read_batch(batch: &RecordBatch, offset: usize, out: &mut Vec<LaunchRecord>) -> Result<()> {
    let schema = batch.schema();
    let column = |name: &str| schema.index_of(name).ok().map(|i| batch.column(i).clone());
    let required = |name: &str| {
        column(name).ok_or_else(|| SchemaError::MissingColumn {
            column: name.to_string(),
        })
    };

    let site_col = required(columns::LAUNCH_SITE)?;
    let payload_col = required(columns::PAYLOAD_MASS)?;
    let category_col = required(columns::BOOSTER_CATEGORY)?;
    let class_col = required(columns::CLASS)?;
    let flight_col = column(columns::FLIGHT_NUMBER);
    let version_col = column(columns::BOOSTER_VERSION);

    for i in 0..batch.num_rows() {
        let row = offset + i;
        let empty = |name: &str| SchemaError::EmptyCell {
            row,
            column: name.to_string(),
        };

        let launch_site = string_cell(&site_col, i).ok_or_else(|| empty(columns::LAUNCH_SITE))?;
        let payload_mass_kg =
            number_cell(&payload_col, i).ok_or_else(|| empty(columns::PAYLOAD_MASS))?;
        let booster_category =
            string_cell(&category_col, i).ok_or_else(|| empty(columns::BOOSTER_CATEGORY))?;
        let class = number_cell(&class_col, i).ok_or_else(|| empty(columns::CLASS))?;
        let class = whole(class, row, columns::CLASS)?;
        let flight_number = flight_col
            .as_ref()
            .and_then(|c| number_cell(c, i))
            .map(|n| whole(n, row, columns::FLIGHT_NUMBER))
            .transpose()?;

        let raw = RawLaunchRow {
            flight_number,
            launch_site,
            payload_mass_kg,
            booster_version: version_col.as_ref().and_then(|c| string_cell(c, i)),
            booster_category,
            class,
        };
        out.push(raw.into_record(row)?);
    }

    Ok(())
}

// -- Arrow helpers --

/// Integer columns may arrive as floats; only whole values are accepted.
fn whole(value: f64, row: usize, column: &str) -> Result<i64, SchemaError> {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Ok(value as i64)
    } else {
        Err(SchemaError::NotAnInteger {
            row,
            column: column.to_string(),
            value,
        })
    }
}

/// Read a string cell; `None` for nulls and non-string columns.
fn string_cell(col: &ArrayRef, row: usize) -> Option<String> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Utf8 => Some(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => Some(col.as_string::<i64>().value(row).to_string()),
        _ => None,
    }
}

/// Read a numeric cell as `f64`; `None` for nulls and non-numeric columns.
fn number_cell(col: &ArrayRef, row: usize) -> Option<f64> {
    if col.is_null(row) {
        return None;
    }
    let any = col.as_any();
    match col.data_type() {
        DataType::Int32 => any.downcast_ref::<Int32Array>().map(|a| a.value(row) as f64),
        DataType::Int64 => any.downcast_ref::<Int64Array>().map(|a| a.value(row) as f64),
        DataType::Float32 => any.downcast_ref::<Float32Array>().map(|a| a.value(row) as f64),
        DataType::Float64 => any.downcast_ref::<Float64Array>().map(|a| a.value(row)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::StringArray;
    use arrow::datatypes::{Field, Schema};
    use parquet::arrow::ArrowWriter;
    use pretty_assertions::assert_eq;
    use tempfile::NamedTempFile;

    use super::*;

    const HEADER: &str = "Launch Site,Payload Mass (kg),Booster Version Category,class";

    const SAMPLE_CSV: &str = "\
Unnamed: 0,Flight Number,Launch Site,class,\
Payload Mass (kg),Booster Version,Booster Version Category
0,1,CCAFS LC-40,0,0.0,F9 v1.0  B0003,v1.0
1,2,CCAFS LC-40,0,525.0,F9 v1.0  B0004,v1.0
2,3,VAFB SLC-4E,0,500.0,F9 v1.1  B1003,v1.1
3,4,KSC LC-39A,1,2490.0,F9 FT B1031.1,FT
4,5,CCAFS LC-40,1,9600.0,F9 B4 B1041.1,B4
";

    fn temp_with(suffix: &str, contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    fn schema_error(err: &anyhow::Error) -> Option<&SchemaError> {
        err.root_cause().downcast_ref::<SchemaError>()
    }

    #[test]
    fn loads_launch_csv_with_extra_columns() {
        let file = temp_with(".csv", SAMPLE_CSV);
        let table = load_file(file.path()).unwrap();

        assert_eq!(table.len(), 5);
        assert_eq!(table.min_payload(), 0);
        assert_eq!(table.max_payload(), 9600);
        assert_eq!(table.sites(), ["CCAFS LC-40", "KSC LC-39A", "VAFB SLC-4E"]);

        let first = &table.records()[0];
        assert_eq!(first.flight_number, Some(1));
        assert_eq!(first.booster_version.as_deref(), Some("F9 v1.0  B0003"));
        assert_eq!(first.outcome, Outcome::Failure);
        assert_eq!(table.records()[3].booster_category, "FT");
    }

    #[test]
    fn optional_columns_may_be_absent() {
        let file = temp_with(
            ".csv",
            "Launch Site,Payload Mass (kg),Booster Version Category,class\nsite1,500,v1,1\n",
        );
        let table = load_file(file.path()).unwrap();
        assert_eq!(table.records()[0].flight_number, None);
        assert_eq!(table.records()[0].booster_version, None);
    }

    #[test]
    fn missing_required_column_is_fatal() {
        let file = temp_with(".csv", "Launch Site,Payload Mass (kg),class\nsite1,500,1\n");
        let err = load_file(file.path()).unwrap_err();
        assert_eq!(
            schema_error(&err),
            Some(&SchemaError::MissingColumn {
                column: columns::BOOSTER_CATEGORY.to_string()
            })
        );
    }

    #[test]
    fn bad_rows_are_fatal() {
        let bad_class = temp_with(
            ".csv",
            "Launch Site,Payload Mass (kg),Booster Version Category,class\nsite1,500,v1,2\n",
        );
        let err = load_file(bad_class.path()).unwrap_err();
        assert_eq!(
            schema_error(&err),
            Some(&SchemaError::InvalidOutcome { row: 0, value: 2 })
        );

        let bad_payload = temp_with(
            ".csv",
            "Launch Site,Payload Mass (kg),Booster Version Category,class\nsite1,heavy,v1,1\n",
        );
        let err = load_file(bad_payload.path()).unwrap_err();
        assert!(format!("{err:#}").contains("CSV row 0"));
    }

    #[test]
    fn header_only_file_is_an_empty_table() {
        let file = temp_with(".csv", &format!("{HEADER}\n"));
        let err = load_file(file.path()).unwrap_err();
        assert_eq!(schema_error(&err), Some(&SchemaError::EmptyTable));
    }

    #[test]
    fn missing_file_and_unknown_extension_fail() {
        assert!(load_file(Path::new("/definitely/not/here/launches.csv")).is_err());

        let file = temp_with(".xlsx", "");
        let err = load_file(file.path()).unwrap_err();
        assert_eq!(
            schema_error(&err),
            Some(&SchemaError::UnsupportedExtension("xlsx".to_string()))
        );
    }

    #[test]
    fn loads_records_oriented_json() {
        let file = temp_with(
            ".json",
            r#"[
                {"Flight Number": 7, "Launch Site": "site1", "Payload Mass (kg)": 500.0,
                 "Booster Version Category": "v1", "class": 1},
                {"Launch Site": "site2", "Payload Mass (kg)": 1500,
                 "Booster Version Category": "v2", "class": 0, "extra": true}
            ]"#,
        );
        let table = load_file(file.path()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[0].flight_number, Some(7));
        assert_eq!(table.records()[1].outcome, Outcome::Failure);
        assert_eq!(table.max_payload(), 1500);

        let missing = temp_with(".json", r#"[{"Launch Site": "site1", "class": 1}]"#);
        let err = load_file(missing.path()).unwrap_err();
        assert!(matches!(schema_error(&err), Some(SchemaError::MissingColumn { .. })));
    }

    #[test]
    fn blank_booster_category_is_fatal() {
        let csv = temp_with(".csv", &format!("{HEADER}\nsite1,500,v1,1\nsite2,900,  ,0\n"));
        let err = load_file(csv.path()).unwrap_err();
        assert_eq!(
            schema_error(&err),
            Some(&SchemaError::EmptyCell {
                row: 1,
                column: columns::BOOSTER_CATEGORY.to_string()
            })
        );

        let json = temp_with(
            ".json",
            r#"[{"Launch Site": "site1", "Payload Mass (kg)": 500,
                 "Booster Version Category": "", "class": 1}]"#,
        );
        let err = load_file(json.path()).unwrap_err();
        assert!(matches!(schema_error(&err), Some(SchemaError::EmptyCell { row: 0, .. })));
    }

    /// Write one batch with the required columns, `class` typed by the caller.
    fn parquet_with_class(class_type: DataType, class: ArrayRef) -> NamedTempFile {
        let schema = Arc::new(Schema::new(vec![
            Field::new(columns::LAUNCH_SITE, DataType::Utf8, false),
            Field::new(columns::PAYLOAD_MASS, DataType::Float64, false),
            Field::new(columns::BOOSTER_CATEGORY, DataType::Utf8, false),
            Field::new(columns::CLASS, class_type, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["site1", "site2"])),
                Arc::new(Float64Array::from(vec![500.0, 1500.0])),
                Arc::new(StringArray::from(vec!["v1", "v2"])),
                class,
            ],
        )
        .unwrap();

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let sink = file.as_file().try_clone().unwrap();
        let mut writer = ArrowWriter::try_new(sink, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();
        file
    }

    #[test]
    fn loads_flat_parquet() {
        let file = parquet_with_class(DataType::Int64, Arc::new(Int64Array::from(vec![1, 0])));

        let table = load_file(file.path()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[0].launch_site, "site1");
        assert_eq!(table.records()[0].outcome, Outcome::Success);
        assert_eq!(table.records()[1].payload_mass_kg, 1500.0);
        assert_eq!(table.booster_categories(), ["v1", "v2"]);
    }

    #[test]
    fn float_class_column_must_hold_whole_numbers() {
        let whole_floats = parquet_with_class(
            DataType::Float64,
            Arc::new(Float64Array::from(vec![1.0, 0.0])),
        );
        let table = load_file(whole_floats.path()).unwrap();
        assert_eq!(table.records()[0].outcome, Outcome::Success);
        assert_eq!(table.records()[1].outcome, Outcome::Failure);

        let fractional = parquet_with_class(
            DataType::Float64,
            Arc::new(Float64Array::from(vec![1.7, 0.4])),
        );
        let err = load_file(fractional.path()).unwrap_err();
        assert_eq!(
            schema_error(&err),
            Some(&SchemaError::NotAnInteger {
                row: 0,
                column: columns::CLASS.to_string(),
                value: 1.7
            })
        );
    }

    #[test]
    fn whole_rejects_fractions_and_nan() {
        assert_eq!(whole(7.0, 0, columns::FLIGHT_NUMBER), Ok(7));
        assert!(whole(7.5, 3, columns::FLIGHT_NUMBER).is_err());
        assert!(whole(f64::NAN, 0, columns::CLASS).is_err());
        assert!(whole(f64::INFINITY, 0, columns::CLASS).is_err());
    }
}
