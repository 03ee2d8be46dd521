//! Field role inference.
//!
//! Roles are decided from the field name and the first record's value only.
//! Later records may disagree in type; consumers skip values that do not fit.

use crate::data::{Dataset, SampleKind};
use crate::keywords::{self, contains_any};
use serde::Serialize;
use serde_json::Value;

/// Measure name used when the dataset has no fields to fall back on.
pub const SYNTHETIC_MEASURE: &str = "value";

/// Semantic roles resolved for a dataset's fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldRoles {
    pub temporal: Option<String>,
    pub categorical: Option<String>,
    /// Never empty.
    pub measures: Vec<String>,
}

impl FieldRoles {
    pub fn primary_measure(&self) -> &str {
        self.measures.first().map(String::as_str).unwrap_or(SYNTHETIC_MEASURE)
    }
}

struct CategoricalPick {
    field: String,
    keyword: bool,
}

/// Assign temporal, categorical and measure roles to the dataset's fields.
pub fn classify_fields(data: &Dataset) -> FieldRoles {
    let fields = data.fields();
    let mut temporal: Option<String> = None;
    let mut categorical: Option<CategoricalPick> = None;
    let mut measures: Vec<String> = Vec::new();

    for field in fields {
        let name = field.to_lowercase();
        let kind = data.sample_kind(field);
        let has_temporal_kw = contains_any(&name, keywords::TEMPORAL);

        if has_temporal_kw {
            if matches!(kind, SampleKind::Numeric | SampleKind::Text) {
                // Only the first one becomes the time axis; later ones get no role.
                if temporal.is_none() {
                    temporal = Some(field.clone());
                }
                continue;
            }
        } else if temporal.is_none() && starts_with_year(data.sample(field)) {
            temporal = Some(field.clone());
            continue;
        }

        match kind {
            SampleKind::Numeric => {
                let has_measure_kw = contains_any(&name, keywords::MEASURE);
                if has_measure_kw || (!has_temporal_kw && !name.contains(keywords::IDENTIFIER)) {
                    measures.push(field.clone());
                }
            }
            SampleKind::Text => {
                let keyword = contains_any(&name, keywords::CATEGORICAL);
                let replace = match &categorical {
                    None => true,
                    Some(current) => keyword && !current.keyword,
                };
                if replace {
                    categorical = Some(CategoricalPick { field: field.clone(), keyword });
                }
            }
            SampleKind::Other => {}
        }
    }

    let mut categorical = categorical.map(|c| c.field);

    if measures.is_empty() {
        let numeric = fields
            .iter()
            .rev()
            .find(|f| data.sample_kind(f) == SampleKind::Numeric);
        let pick = numeric
            .or_else(|| fields.last())
            .cloned()
            .unwrap_or_else(|| SYNTHETIC_MEASURE.to_string());
        tracing::debug!(field = %pick, "no measure classified, falling back");
        measures.push(pick);
    }

    if categorical.is_none() && temporal.is_none() {
        categorical = fields
            .iter()
            .find(|f| data.sample_kind(f) != SampleKind::Numeric)
            .or_else(|| fields.first())
            .cloned();
        tracing::debug!(field = ?categorical, "no axis field classified, falling back");
    }

    let roles = FieldRoles { temporal, categorical, measures };
    tracing::debug!(?roles, "classified fields");
    roles
}

fn starts_with_year(sample: Option<&Value>) -> bool {
    matches!(sample, Some(Value::String(s)) if keywords::YEAR_PREFIX.is_match(s))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roles(json: &str) -> FieldRoles {
        classify_fields(&Dataset::parse(json).unwrap())
    }

    #[test]
    fn test_year_region_sales() {
        let r = roles(r#"[{"Year": 2021, "Region": "EU", "Sales": 10.5}]"#);
        assert_eq!(r.temporal.as_deref(), Some("Year"));
        assert_eq!(r.categorical.as_deref(), Some("Region"));
        assert_eq!(r.measures, vec!["Sales"]);
    }

    #[test]
    fn test_first_temporal_keyword_wins() {
        let r = roles(r#"[{"order_date": "2021-01-01", "ship_date": "2021-01-05", "qty": 3}]"#);
        assert_eq!(r.temporal.as_deref(), Some("order_date"));
        assert_eq!(r.categorical, None);
        assert_eq!(r.measures, vec!["qty"]);

        let r = roles(r#"[{"year": 2020, "fiscal_year": 2021, "store": "N", "units": 4}]"#);
        assert_eq!(r.temporal.as_deref(), Some("year"));
        assert_eq!(r.categorical.as_deref(), Some("store"));
        assert_eq!(r.measures, vec!["units"]);
    }

    #[test]
    fn test_year_prefixed_string_is_temporal() {
        let r = roles(r#"[{"period": "2023-Q1", "store": "North", "units": 4}]"#);
        assert_eq!(r.temporal.as_deref(), Some("period"));
        assert_eq!(r.categorical.as_deref(), Some("store"));
    }

    #[test]
    fn test_identifier_columns_are_not_measures() {
        let r = roles(r#"[{"customer_id": 7, "segment": "SMB", "revenue": 99}]"#);
        assert_eq!(r.measures, vec!["revenue"]);
    }

    #[test]
    fn test_measure_keyword_overrides_identifier() {
        let r = roles(r#"[{"id_count": 7, "label": "x"}]"#);
        assert_eq!(r.measures, vec!["id_count"]);
    }

    #[test]
    fn test_categorical_keyword_preferred() {
        let r = roles(r#"[{"note": "hello", "brand": "Acme", "price": 2}]"#);
        assert_eq!(r.categorical.as_deref(), Some("brand"));

        let r = roles(r#"[{"brand": "Acme", "country": "FR", "price": 2}]"#);
        assert_eq!(r.categorical.as_deref(), Some("brand"));
    }

    #[test]
    fn test_measure_fallback_prefers_last_numeric() {
        let r = roles(r#"[{"user_id": 1, "label": "a", "row_id": 2}]"#);
        assert_eq!(r.measures, vec!["row_id"]);

        let r = roles(r#"[{"a": "x", "b": "y"}]"#);
        assert_eq!(r.measures, vec!["b"]);
    }

    #[test]
    fn test_axis_fallback() {
        let r = roles(r#"[{"x": 1, "y": 2}]"#);
        assert_eq!(r.categorical.as_deref(), Some("x"));

        let r = roles(r#"[{"x": 1, "flag": true}]"#);
        assert_eq!(r.categorical.as_deref(), Some("flag"));
    }

    #[test]
    fn test_empty_record_uses_synthetic_measure() {
        let r = roles("[{}]");
        assert_eq!(r.measures, vec![SYNTHETIC_MEASURE]);
        assert_eq!(r.categorical, None);
    }
}
