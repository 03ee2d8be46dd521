//! Dataset profiling and descriptive statistics for the data processing
//! entry point.
//!
//! The profile lists come from field names and first-record samples alone
//! and are independent of the classifier roles reported next to them. A
//! field can be listed as both numeric and date (`Year`), and every
//! low-cardinality text field counts as a category. High-cardinality text
//! is never a category, even when the classifier picked it as the axis.

use crate::classify::FieldRoles;
use crate::data::{display_value, Dataset, SampleKind};
use crate::keywords::{self, contains_any};
use crate::parser::ast::ChartFamily;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Number, Value};
use std::collections::HashSet;

/// Largest dataset still recommended as a bar chart when a scatter plot is
/// also possible.
const BAR_ROW_LIMIT: usize = 20;

/// Distinct values reported per categorical field.
const CATEGORY_SAMPLE_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct DataProfile {
    pub row_count: usize,
    pub fields: Vec<String>,
    pub numeric_fields: Vec<String>,
    pub text_fields: Vec<String>,
    pub date_fields: Vec<String>,
    pub category_fields: Vec<String>,
    pub has_time_series: bool,
    pub has_categories: bool,
    pub has_numeric: bool,
    pub recommended_viz: Option<ChartFamily>,
    pub roles: FieldRoles,
}

/// Build the profile from the dataset and its classified roles.
pub fn profile_dataset(data: &Dataset, roles: &FieldRoles) -> DataProfile {
    let mut numeric_fields = Vec::new();
    let mut text_fields = Vec::new();
    let mut date_fields = Vec::new();
    let mut category_fields = Vec::new();

    for field in data.fields() {
        let name = field.to_lowercase();
        let kind = data.sample_kind(field);
        let dated_text = matches!(
            data.sample(field),
            Some(Value::String(s)) if keywords::YEAR_PREFIX.is_match(s)
        );
        let date_name = contains_any(&name, keywords::PROFILE_DATE);

        if date_name || dated_text {
            date_fields.push(field.clone());
        }

        let is_category = (!date_name && contains_any(&name, keywords::PROFILE_CATEGORY))
            || (kind == SampleKind::Text && !dated_text && is_low_cardinality(data, field));
        if is_category {
            category_fields.push(field.clone());
        }

        match kind {
            SampleKind::Numeric => numeric_fields.push(field.clone()),
            SampleKind::Text if !dated_text => text_fields.push(field.clone()),
            _ => {}
        }
    }

    let has_time_series = !date_fields.is_empty();
    let has_categories = !category_fields.is_empty();
    let has_numeric = !numeric_fields.is_empty();

    let recommended_viz = if has_time_series && has_numeric {
        Some(ChartFamily::Line)
    } else if has_categories && has_numeric && data.len() <= BAR_ROW_LIMIT {
        Some(ChartFamily::Bar)
    } else if numeric_fields.len() >= 2 {
        Some(ChartFamily::Scatter)
    } else if has_categories && has_numeric {
        Some(ChartFamily::Bar)
    } else {
        None
    };

    tracing::debug!(?recommended_viz, rows = data.len(), "profiled dataset");

    DataProfile {
        row_count: data.len(),
        fields: data.fields().to_vec(),
        numeric_fields,
        text_fields,
        date_fields,
        category_fields,
        has_time_series,
        has_categories,
        has_numeric,
        recommended_viz,
        roles: roles.clone(),
    }
}

/// Few enough distinct values, relative to the row count, to group by.
fn is_low_cardinality(data: &Dataset, field: &str) -> bool {
    let distinct: HashSet<String> = data
        .records()
        .iter()
        .map(|r| r.get(field).map(display_value).unwrap_or_default())
        .collect();
    distinct.len() as f64 <= f64::max(10.0, data.len() as f64 * 0.5)
}

// =============================================================================
// Summary statistics
// =============================================================================

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldStats {
    Numeric {
        min: Number,
        max: Number,
        avg: f64,
        count: usize,
    },
    Categorical {
        unique_count: usize,
        /// First distinct values in order of appearance.
        values: Vec<String>,
        count: usize,
    },
}

/// Per-field statistics in insertion order. Re-inserting a field replaces
/// its entry in place.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldStatsMap(Vec<(String, FieldStats)>);

impl FieldStatsMap {
    pub fn insert(&mut self, field: &str, stats: FieldStats) {
        match self.0.iter_mut().find(|(f, _)| f == field) {
            Some(entry) => entry.1 = stats,
            None => self.0.push((field.to_string(), stats)),
        }
    }

    pub fn get(&self, field: &str) -> Option<&FieldStats> {
        self.0.iter().find(|(f, _)| f == field).map(|(_, s)| s)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for FieldStatsMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (field, stats) in &self.0 {
            map.serialize_entry(field, stats)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SummaryStatistics {
    pub row_count: usize,
    pub column_count: usize,
    pub numeric_columns: usize,
    pub text_columns: usize,
    pub field_stats: FieldStatsMap,
}

/// Descriptive statistics for the profiled numeric and category fields.
pub fn summarize(data: &Dataset, profile: &DataProfile) -> SummaryStatistics {
    let mut field_stats = FieldStatsMap::default();

    for field in &profile.numeric_fields {
        if let Some(stats) = numeric_stats(data, field) {
            field_stats.insert(field, stats);
        }
    }

    for field in &profile.category_fields {
        field_stats.insert(field, categorical_stats(data, field));
    }

    SummaryStatistics {
        row_count: profile.row_count,
        column_count: profile.fields.len(),
        numeric_columns: profile.numeric_fields.len(),
        text_columns: profile.text_fields.len(),
        field_stats,
    }
}

fn numeric_stats(data: &Dataset, field: &str) -> Option<FieldStats> {
    let mut min: Option<(&Number, f64)> = None;
    let mut max: Option<(&Number, f64)> = None;
    let mut sum = 0.0;
    let mut count = 0;

    for number in data.numbers(field) {
        let Some(val) = number.as_f64() else { continue };
        if min.map_or(true, |(_, m)| val < m) { min = Some((number, val)); }
        if max.map_or(true, |(_, m)| val > m) { max = Some((number, val)); }
        sum += val;
        count += 1;
    }

    let ((min, _), (max, _)) = (min?, max?);
    Some(FieldStats::Numeric {
        min: min.clone(),
        max: max.clone(),
        avg: sum / count as f64,
        count,
    })
}

fn categorical_stats(data: &Dataset, field: &str) -> FieldStats {
    let mut seen = HashSet::new();
    let mut distinct = Vec::new();
    let mut count = 0;

    for value in data.records().iter().filter_map(|r| r.get(field)) {
        count += 1;
        let text = display_value(value);
        if seen.insert(text.clone()) {
            distinct.push(text);
        }
    }

    let unique_count = distinct.len();
    distinct.truncate(CATEGORY_SAMPLE_LIMIT);
    FieldStats::Categorical { unique_count, values: distinct, count }
}
