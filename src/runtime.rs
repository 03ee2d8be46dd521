// Entry points: chart generation from a description, and data processing
//
// Both always return one complete JSON document. Failures are reported as
// `{"error": ..., "status": "failed"}` envelopes, never raised.

use crate::classify::{classify_fields, FieldRoles};
use crate::compiler::{compile_document, DocumentBase};
use crate::data::Dataset;
use crate::error::{GenerationError, Result};
use crate::ir::ChartDocument;
use crate::parser::{parse_description, parse_mode, ChartFamily, ChartRequest, ProcessingMode};
use crate::profile::{profile_dataset, summarize, DataProfile};
use crate::resolve::{resolve_layout, Contract};
use crate::scale::detect_divergence;
use crate::ChartOptions;
use serde::Serialize;
use serde_json::{json, Value};

const FORMAT_NAME: &str = "vega-lite";
const SUMMARY_PREVIEW_ROWS: usize = 5;
const AUTO_PREVIEW_ROWS: usize = 10;
const NO_PATTERN_HINT: &str = "No clear visualization pattern detected. Use processing_instruction='chart:bar' or 'chart:line' to force a specific chart type.";

/// Generate a chart document from a description and a JSON array of records.
///
/// Missing or malformed data is replaced by a built-in sample; only a blank
/// description is an error. The document gets a trailing `"status"` key so
/// callers can tell it apart from a failure envelope.
pub fn generate_chart_spec(description: &str, data: &str) -> String {
    generate_chart_spec_with(description, data, &ChartOptions::default())
}

pub fn generate_chart_spec_with(description: &str, data: &str, options: &ChartOptions) -> String {
    match build_chart(description, data, options) {
        Ok(document) => {
            tracing::info!("generated chart document");
            let mut output = json!(document);
            output["status"] = Value::from("success");
            to_json(&output)
        }
        Err(err) => failure(&err),
    }
}

/// Typed core of [`generate_chart_spec`].
pub fn build_chart(description: &str, data: &str, options: &ChartOptions) -> Result<ChartDocument> {
    if description.trim().is_empty() {
        return Err(GenerationError::EmptyInput { what: "chart_description" });
    }

    let dataset = Dataset::parse_rows_or_fallback(data);
    let request = parse_description(description);
    tracing::debug!(?request, "parsed chart description");

    let roles = classify_fields(&dataset);
    Ok(chart_document(&dataset, &roles, &request, Some(description), Contract::Lenient, options))
}

/// Analyze, summarize, format or chart a dataset according to `mode`.
///
/// Accepts an array of records, a single record, or `{columns, rows}`.
/// Unlike [`generate_chart_spec`], unusable data is an error.
pub fn process_data(data: &str, mode: &str) -> String {
    process_data_with(data, mode, &ChartOptions::default())
}

pub fn process_data_with(data: &str, mode: &str, options: &ChartOptions) -> String {
    match run_processing(data, mode, options) {
        Ok(output) => output,
        Err(err) => failure(&err),
    }
}

fn run_processing(data: &str, mode: &str, options: &ChartOptions) -> Result<String> {
    let dataset = Dataset::parse(data)?;
    let roles = classify_fields(&dataset);
    let profile = profile_dataset(&dataset, &roles);
    let mode = parse_mode(mode);
    tracing::debug!(?mode, rows = dataset.len(), "processing dataset");

    let output = match mode {
        ProcessingMode::Chart(token) => {
            let family = ChartFamily::from_token(&token);
            let chart = chart_output(&dataset, &roles, family, options);
            json!({
                "status": "success",
                "type": "visualization",
                "format": FORMAT_NAME,
                "chart_type": token,
                "data_analysis": profile,
                "output": chart,
            })
        }
        ProcessingMode::Summarize => json!({
            "status": "success",
            "type": "summary",
            "data_preview": dataset.head(SUMMARY_PREVIEW_ROWS),
            "analysis": profile,
            "statistics": summarize(&dataset, &profile),
        }),
        ProcessingMode::Format => json!({
            "status": "success",
            "type": "formatted_data",
            "data": dataset.records(),
            "analysis": profile,
            "row_count": dataset.len(),
            "columns": profile.fields,
        }),
        ProcessingMode::Auto | ProcessingMode::Visualize => match profile.recommended_viz {
            Some(family) => {
                let chart = chart_output(&dataset, &roles, Some(family), options);
                json!({
                    "status": "success",
                    "type": "auto_visualization",
                    "format": FORMAT_NAME,
                    "chart_type": family,
                    "data_analysis": profile,
                    "statistics": summarize(&dataset, &profile),
                    "output": chart,
                })
            }
            None => summary_with_hint(&dataset, &profile),
        },
        ProcessingMode::Other(_) => summary_with_hint(&dataset, &profile),
    };

    tracing::info!(kind = %output["type"], "processed dataset");
    Ok(to_json(&output))
}

fn summary_with_hint(dataset: &Dataset, profile: &DataProfile) -> Value {
    json!({
        "status": "success",
        "type": "summary",
        "data_preview": dataset.head(AUTO_PREVIEW_ROWS),
        "analysis": profile,
        "statistics": summarize(dataset, profile),
        "hint": NO_PATTERN_HINT,
    })
}

/// Chart payload for the processing envelope, or an inline error object.
fn chart_output(
    dataset: &Dataset,
    roles: &FieldRoles,
    family: Option<ChartFamily>,
    options: &ChartOptions,
) -> Value {
    if dataset.fields().is_empty() {
        return json!({ "error": GenerationError::NoFields.to_string() });
    }
    let request = ChartRequest::explicit(family);
    let document = chart_document(dataset, roles, &request, None, Contract::Strict, options);
    json!(document)
}

/// Classifier output -> divergence -> layout -> document.
fn chart_document(
    dataset: &Dataset,
    roles: &FieldRoles,
    request: &ChartRequest,
    description: Option<&str>,
    contract: Contract,
    options: &ChartOptions,
) -> ChartDocument {
    let divergence = detect_divergence(dataset, &roles.measures);
    let layout = resolve_layout(request, roles, &divergence, dataset, contract);
    let base = DocumentBase::new(options, description, dataset);
    compile_document(&layout, &base)
}

fn failure(err: &GenerationError) -> String {
    tracing::warn!(error = %err, "request failed");
    let mut envelope = json!({
        "error": err.to_string(),
        "status": "failed",
    });
    if let Some(hint) = err.hint() {
        envelope["hint"] = Value::from(hint);
    }
    to_json(&envelope)
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|err| {
        json!({ "error": format!("Failed to encode output: {err}"), "status": "failed" })
            .to_string()
    })
}
