use crate::error::{GenerationError, Result};
use anyhow::Context;
use serde_json::{Map, Number, Value};
use std::io::Read;

/// One row of input: field name -> scalar, in input key order.
pub type Record = Map<String, Value>;

/// Coarse type of a sampled value, as seen by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleKind {
    Numeric,
    Text,
    /// Booleans, nulls, nested values and missing entries.
    Other,
}

impl SampleKind {
    pub fn of(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Number(_)) => SampleKind::Numeric,
            Some(Value::String(_)) => SampleKind::Text,
            _ => SampleKind::Other,
        }
    }
}

/// Normalized, non-empty sequence of records sharing the first record's fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    fields: Vec<String>,
    records: Vec<Record>,
}

impl Dataset {
    /// Build a dataset from decoded records. Returns `None` for an empty list.
    pub fn from_records(records: Vec<Record>) -> Option<Self> {
        let fields = records.first()?.keys().cloned().collect();
        Some(Self { fields, records })
    }

    /// Built-in dataset substituted for absent or malformed chart input.
    pub fn fallback() -> Self {
        Self::from_pairs(&[("A", 28), ("B", 55), ("C", 43)])
    }

    /// Single-row dataset used when the first record is too narrow to chart.
    pub fn minimal_fallback() -> Self {
        Self::from_pairs(&[("A", 28)])
    }

    fn from_pairs(pairs: &[(&str, i64)]) -> Self {
        let records = pairs
            .iter()
            .map(|(category, value)| {
                let mut record = Record::new();
                record.insert("category".to_string(), Value::from(*category));
                record.insert("value".to_string(), Value::from(*value));
                record
            })
            .collect();
        Self {
            fields: vec!["category".to_string(), "value".to_string()],
            records,
        }
    }

    /// Strict decode accepting every supported shape:
    /// an array of objects, `{columns, rows}`, or a single object.
    pub fn parse(payload: &str) -> Result<Self> {
        if payload.trim().is_empty() {
            return Err(GenerationError::EmptyInput { what: "data_sample" });
        }
        let value: Value =
            serde_json::from_str(payload).map_err(|_| GenerationError::UnparseableData)?;

        let records = match value {
            Value::Object(obj) if obj.contains_key("columns") && obj.contains_key("rows") => {
                zip_tabular(&obj)?
            }
            Value::Array(items) => objects_only(items)?,
            Value::Object(obj) => vec![obj],
            _ => return Err(GenerationError::UnparseableData),
        };

        Self::from_records(records).ok_or(GenerationError::UnparseableData)
    }

    /// Lenient decode for chart generation: anything but a non-empty array
    /// becomes the built-in fallback dataset. An array whose first element is
    /// not a record of at least two fields becomes the minimal one.
    pub fn parse_rows_or_fallback(payload: &str) -> Self {
        let items = match serde_json::from_str::<Value>(payload) {
            Ok(Value::Array(items)) if !items.is_empty() => items,
            _ => {
                tracing::warn!("chart data missing or malformed, using built-in sample");
                return Self::fallback();
            }
        };

        let width = match items.first() {
            Some(Value::Object(first)) => first.len(),
            _ => 0,
        };
        if width < 2 {
            tracing::warn!(
                fields = width,
                "first row is not a record of two or more fields, using minimal sample"
            );
            return Self::minimal_fallback();
        }

        let total = items.len();
        let records: Vec<Record> = items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(obj) => Some(obj),
                _ => None,
            })
            .collect();
        if records.len() < total {
            tracing::warn!(skipped = total - records.len(), "skipping rows that are not records");
        }
        Self::from_records(records).unwrap_or_else(Self::minimal_fallback)
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Value of `field` in the first record, the classifier's type sample.
    pub fn sample(&self, field: &str) -> Option<&Value> {
        self.records.first().and_then(|r| r.get(field))
    }

    pub fn sample_kind(&self, field: &str) -> SampleKind {
        SampleKind::of(self.sample(field))
    }

    /// Numeric entries of `field` across all records, skipping anything else.
    pub fn numbers<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a Number> + 'a {
        self.records.iter().filter_map(move |r| match r.get(field) {
            Some(Value::Number(n)) => Some(n),
            _ => None,
        })
    }

    pub fn head(&self, n: usize) -> &[Record] {
        &self.records[..n.min(self.records.len())]
    }
}

fn objects_only(items: Vec<Value>) -> Result<Vec<Record>> {
    items
        .into_iter()
        .map(|item| match item {
            Value::Object(obj) => Ok(obj),
            _ => Err(GenerationError::UnparseableData),
        })
        .collect()
}

/// Zip `{columns: [...], rows: [[...], ...]}` into records. Rows and columns
/// of unequal length are truncated to the shorter side.
fn zip_tabular(obj: &Map<String, Value>) -> Result<Vec<Record>> {
    let columns = obj
        .get("columns")
        .and_then(Value::as_array)
        .ok_or(GenerationError::UnparseableData)?
        .iter()
        .map(|c| c.as_str().map(str::to_string))
        .collect::<Option<Vec<_>>>()
        .ok_or(GenerationError::UnparseableData)?;

    let rows = obj
        .get("rows")
        .and_then(Value::as_array)
        .ok_or(GenerationError::UnparseableData)?;

    rows.iter()
        .map(|row| {
            let cells = row.as_array().ok_or(GenerationError::UnparseableData)?;
            let record: Record = columns.iter().cloned().zip(cells.iter().cloned()).collect();
            Ok(record)
        })
        .collect()
}

/// Render a scalar the way it appears in category listings.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Read CSV text and convert it to a JSON array of records, which both
/// entry points accept. Numeric-looking cells become numbers and empty cells
/// become null.
pub fn csv_to_records_json<R: Read>(reader: R) -> anyhow::Result<String> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns: Vec<String> = csv_reader
        .headers()
        .context("Failed to read CSV headers")?
        .iter()
        .map(str::to_string)
        .collect();

    let mut records = Vec::new();
    for (line, result) in csv_reader.records().enumerate() {
        let row = result.with_context(|| format!("Failed to read CSV row {}", line + 1))?;
        let record: Record = columns
            .iter()
            .cloned()
            .zip(row.iter().map(coerce_cell))
            .collect();
        records.push(Value::Object(record));
    }

    serde_json::to_string(&records).context("Failed to encode CSV as JSON")
}

fn coerce_cell(cell: &str) -> Value {
    if cell.is_empty() {
        return Value::Null;
    }
    if let Ok(i) = cell.parse::<i64>() {
        return Value::from(i);
    }
    match cell.parse::<f64>().ok().and_then(Number::from_f64) {
        Some(n) => Value::Number(n),
        None => Value::from(cell),
    }
}
