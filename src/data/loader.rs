use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use once_cell::sync::{Lazy, OnceCell};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{CellValue, Column, ColumnKind, WorkerRecord, WorkerTable};
use crate::config::DEFAULT_DATA_PATH;
use crate::error::DashboardError;

// ---------------------------------------------------------------------------
// Memoized entry-point
// ---------------------------------------------------------------------------

/// A dataset path plus the table read from it, read at most once.
///
/// Failed reads are not cached; the next `get` tries the file again.
#[derive(Debug)]
pub struct DatasetCache {
    path: PathBuf,
    table: OnceCell<Arc<WorkerTable>>,
    reads: AtomicUsize,
}

impl DatasetCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DatasetCache {
            path: path.into(),
            table: OnceCell::new(),
            reads: AtomicUsize::new(0),
        }
    }

    /// Return the cached table, reading the file on first use.
    pub fn get(&self) -> Result<Arc<WorkerTable>, DashboardError> {
        self.table
            .get_or_try_init(|| -> Result<Arc<WorkerTable>, DashboardError> {
                let attempt = self.reads.fetch_add(1, Ordering::SeqCst) + 1;
                log::debug!("Reading {} (attempt {attempt})", self.path.display());
                let table = load_file(&self.path)?;
                log::info!(
                    "Loaded {} workers from {} with columns {:?}",
                    table.len(),
                    self.path.display(),
                    table.headers
                );
                Ok(Arc::new(table))
            })
            .cloned()
    }

    /// How many times the file has actually been read.
    #[cfg(test)]
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

static DEFAULT_CACHE: Lazy<DatasetCache> = Lazy::new(|| DatasetCache::new(DEFAULT_DATA_PATH));

/// Load the dashboard dataset from its fixed path, once per process.
pub fn load() -> Result<Arc<WorkerTable>, DashboardError> {
    DEFAULT_CACHE.get()
}

// ---------------------------------------------------------------------------
// Uncached entry-point
// ---------------------------------------------------------------------------

/// Load a worker table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one worker per line (the dashboard's own format)
/// * `.json`    – `[{ "industry_sector": "IT", "age": 42, ... }, ...]`
/// * `.parquet` – flat columns with the same names
pub fn load_file(path: &Path) -> Result<WorkerTable, DashboardError> {
    read_table(path).map_err(|e| DashboardError::data_unavailable(path, &e))
}

fn read_table(path: &Path) -> Result<WorkerTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// Row assembly shared by every format
// ---------------------------------------------------------------------------

fn check_required(headers: &[String]) -> Result<()> {
    for col in Column::ALL {
        if !headers.iter().any(|h| h == col.name()) {
            bail!("missing required column '{col}'");
        }
    }
    Ok(())
}

/// Turn one row of cells (aligned with `headers`) into a typed record.
fn build_record(headers: &[String], cells: Vec<CellValue>, row: usize) -> Result<WorkerRecord> {
    let mut by_name: BTreeMap<String, CellValue> = headers.iter().cloned().zip(cells).collect();

    let mut take = |col: Column| -> Result<CellValue> {
        match by_name.remove(col.name()) {
            Some(CellValue::Null) | None => bail!("row {row}: '{col}' is empty"),
            Some(v) => Ok(v),
        }
    };

    let industry_sector = text(take(Column::IndustrySector)?);
    let location_type = text(take(Column::LocationType)?);
    let age = integer(take(Column::Age)?, row, Column::Age)?;
    let experience_years = integer(take(Column::ExperienceYears)?, row, Column::ExperienceYears)?;
    let calendar_scheduled_usage = float(
        take(Column::CalendarScheduledUsage)?,
        row,
        Column::CalendarScheduledUsage,
    )?;
    let focus_time_minutes = float(take(Column::FocusTimeMinutes)?, row, Column::FocusTimeMinutes)?;
    let task_completion_rate = float(
        take(Column::TaskCompletionRate)?,
        row,
        Column::TaskCompletionRate,
    )?;
    let productivity_score = float(take(Column::ProductivityScore)?, row, Column::ProductivityScore)?;

    Ok(WorkerRecord {
        industry_sector,
        location_type,
        age,
        experience_years,
        calendar_scheduled_usage,
        focus_time_minutes,
        task_completion_rate,
        productivity_score,
        extra: by_name,
    })
}

fn text(v: CellValue) -> String {
    match v {
        CellValue::String(s) => s,
        other => other.to_string(),
    }
}

fn integer(v: CellValue, row: usize, col: Column) -> Result<i64> {
    debug_assert_eq!(col.kind(), ColumnKind::Integer);
    match v {
        CellValue::Integer(i) => Ok(i),
        // Pandas writes integer columns with NaNs upstream as floats.
        CellValue::Float(f) if f.fract() == 0.0 && f.is_finite() => Ok(f as i64),
        other => bail!("row {row}: '{col}' value '{other}' is not an integer"),
    }
}

fn float(v: CellValue, row: usize, col: Column) -> Result<f64> {
    v.as_f64()
        .with_context(|| format!("row {row}: '{col}' value '{v}' is not a number"))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one worker per line.
/// Columns outside the required schema are kept with inferred types.
fn load_csv(path: &Path) -> Result<WorkerTable> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    check_required(&headers)?;

    // Category labels are opaque: "1" and "1.0" are different sectors.
    let is_label: Vec<bool> = headers
        .iter()
        .map(|h| matches!(h.parse::<Column>(), Ok(col) if col.kind() == ColumnKind::Categorical))
        .collect();

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let cells = record
            .iter()
            .zip(&is_label)
            .map(|(s, &label)| match (label, s.is_empty()) {
                (true, false) => CellValue::String(s.to_string()),
                _ => CellValue::infer(s.trim()),
            })
            .collect();
        records.push(build_record(&headers, cells, row_no)?);
    }

    Ok(WorkerTable::new(records, headers))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "industry_sector": "IT", "location_type": "City", "age": 42, ... },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<WorkerTable> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = root.as_array().context("Expected top-level JSON array")?;

    // Required columns first, then any extra keys in the order first seen.
    let mut headers: Vec<String> = Column::ALL.iter().map(|c| c.name().to_string()).collect();
    for row in rows {
        if let Some(obj) = row.as_object() {
            for key in obj.keys() {
                if !headers.contains(key) {
                    headers.push(key.clone());
                }
            }
        }
    }

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        let cells = headers
            .iter()
            .map(|h| obj.get(h).map(json_to_cell).unwrap_or(CellValue::Null))
            .collect();
        records.push(build_record(&headers, cells, i)?);
    }

    Ok(WorkerTable::new(records, headers))
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file holding the worker table as flat columns.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<WorkerTable> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    check_required(&headers)?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        for row in 0..batch.num_rows() {
            let cells = batch
                .columns()
                .iter()
                .map(|col| extract_cell(col.as_ref(), row))
                .collect();
            let row_no = records.len();
            records.push(build_record(&headers, cells, row_no)?);
        }
    }

    Ok(WorkerTable::new(records, headers))
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell(col: &dyn Array, row: usize) -> CellValue {
    if col.is_null(row) {
        return CellValue::Null;
    }
    match col.data_type() {
        DataType::Utf8 => CellValue::String(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => CellValue::String(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => CellValue::Integer(col.as_primitive::<Int32Type>().value(row) as i64),
        DataType::Int64 => CellValue::Integer(col.as_primitive::<Int64Type>().value(row)),
        DataType::Float32 => CellValue::Float(col.as_primitive::<Float32Type>().value(row) as f64),
        DataType::Float64 => CellValue::Float(col.as_primitive::<Float64Type>().value(row)),
        DataType::Boolean => CellValue::Bool(col.as_boolean().value(row)),
        other => CellValue::String(format!("{other:?}")),
    }
}
