//! Keyword tables and value patterns used for field-role inference.
//!
//! Every list is matched as a substring of the lower-cased field name or
//! description, so `sales_usd` carries both `sales` and `usd`.

use regex::Regex;
use std::sync::LazyLock;

pub const TEMPORAL: &[&str] = &["year", "date", "time", "month", "day", "quarter", "week"];

pub const CATEGORICAL: &[&str] = &[
    "name", "region", "category", "type", "brand", "segment", "product", "customer",
    "location", "country", "state", "city",
];

pub const MEASURE: &[&str] = &[
    "sales", "revenue", "volume", "amount", "value", "price", "qty", "quantity", "usd",
    "count", "total", "sum", "avg", "mean",
];

/// Identifier marker that keeps a numeric field out of the measure list.
pub const IDENTIFIER: &str = "id";

/// Name hints the data profile uses for its date column list.
pub const PROFILE_DATE: &[&str] = &["year", "date", "time", "month", "day", "quarter"];

/// Name hints the data profile uses for its category column list.
pub const PROFILE_CATEGORY: &[&str] =
    &["name", "region", "category", "type", "brand", "segment", "id"];

pub const FAMILY_LINE: &[&str] = &["line", "trend", "time series"];
pub const FAMILY_BAR: &[&str] = &["bar", "column", "histogram"];
pub const FAMILY_SCATTER: &[&str] = &["scatter", "point"];
pub const FAMILY_PIE: &[&str] = &["pie", "donut"];

pub const COMPARISON: &[&str] = &["compare", "vs", "versus"];

pub const MULTI_METRIC: &[&str] = &["grouped", "two bars", "both", "multiple", "including", "compare"];

/// Text that starts with a four digit year, e.g. `2023`, `2023-Q1`.
pub static YEAR_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}").expect("valid year prefix regex"));

/// Text that starts with an ISO calendar date, e.g. `2023-04-01`.
pub static ISO_DATE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}").expect("valid ISO date regex"));

/// True when `haystack` contains any of `keywords`.
pub fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| haystack.contains(k))
}
