use autochart::data::csv_to_records_json;
use autochart::{generate_chart_spec, generate_chart_spec_with, process_data, ChartOptions};
use proptest::prelude::*;
use serde_json::{json, Value};

/// Helper function to run chart generation and decode its output
fn run_chart(description: &str, data: &str) -> Value {
    let output = generate_chart_spec(description, data);
    serde_json::from_str(&output).expect("chart output is JSON")
}

/// Helper function to run data processing and decode its output
fn run_process(data: &str, mode: &str) -> Value {
    let output = process_data(data, mode);
    serde_json::from_str(&output).expect("process output is JSON")
}

const VODKA: &str = r#"[
    {"region": "North", "sales_usd": 1200000, "volume": 300},
    {"region": "South", "sales_usd": 800000, "volume": 150},
    {"region": "East", "sales_usd": 640000, "volume": 120},
    {"region": "West", "sales_usd": 50000, "volume": 90}
]"#;

const REGIONAL_SALES: &str = r#"[
    {"Region": "North", "Year": 2022, "Sales": 120},
    {"Region": "North", "Year": 2023, "Sales": 135},
    {"Region": "South", "Year": 2022, "Sales": 80},
    {"Region": "South", "Year": 2023, "Sales": 95}
]"#;

#[test]
fn test_end_to_end_dual_axis_comparison() {
    let doc = run_chart("compare vodka sales USD vs volume by region", VODKA);

    assert_eq!(doc["status"], "success");
    assert_eq!(doc["$schema"], "https://vega.github.io/schema/vega-lite/v5.json");
    assert_eq!(doc["description"], "compare vodka sales USD vs volume by region");

    let layers = doc["layer"].as_array().expect("layered document");
    assert_eq!(layers.len(), 2);
    assert_eq!(layers[0]["mark"]["type"], "bar");
    assert_eq!(layers[0]["encoding"]["y"]["field"], "sales_usd");
    assert_eq!(layers[0]["encoding"]["x"]["field"], "region");
    assert_eq!(layers[1]["mark"]["type"], "line");
    assert_eq!(layers[1]["encoding"]["y"]["field"], "volume");
    assert_eq!(layers[1]["encoding"]["y"]["axis"]["orient"], "right");
    assert_eq!(doc["resolve"]["scale"]["y"], "independent");
}

#[test]
fn test_end_to_end_grouped_bars_for_close_scales() {
    let data = r#"[
        {"brand": "A", "revenue": 100, "profit": 40},
        {"brand": "B", "revenue": 80, "profit": 20}
    ]"#;
    let doc = run_chart("grouped bar of revenue and profit", data);

    assert_eq!(doc["mark"]["type"], "bar");
    assert_eq!(doc["encoding"]["xOffset"]["field"], "metric");
    assert_eq!(doc["encoding"]["color"]["field"], "metric");
    let values = doc["data"]["values"].as_array().unwrap();
    assert_eq!(values.len(), 4);
    assert_eq!(values[0], json!({"brand": "A", "metric": "Revenue", "value": 100}));
    assert_eq!(values[1], json!({"brand": "A", "metric": "Profit", "value": 40}));
}

#[test]
fn test_end_to_end_stacked_subplots() {
    let data = r#"[
        {"brand": "A", "revenue": 10, "volume": 12, "profit": 3},
        {"brand": "B", "revenue": 14, "volume": 9, "profit": 5}
    ]"#;
    let doc = run_chart("bar chart including revenue, volume and profit", data);

    let views = doc["vconcat"].as_array().expect("stacked document");
    assert_eq!(views.len(), 3);
    assert_eq!(views[0]["title"]["text"], "Revenue");
    assert_eq!(views[2]["encoding"]["y"]["field"], "profit");
    assert_eq!(views[1]["height"], 200);
}

#[test]
fn test_end_to_end_auto_mode_time_series() {
    let out = run_process(REGIONAL_SALES, "auto");

    assert_eq!(out["status"], "success");
    assert_eq!(out["type"], "auto_visualization");
    assert_eq!(out["format"], "vega-lite");
    assert_eq!(out["data_analysis"]["recommended_viz"], "line");
    assert_eq!(out["chart_type"], "line");

    let chart = &out["output"];
    assert_eq!(chart["mark"]["type"], "line");
    assert_eq!(chart["encoding"]["x"]["field"], "Year");
    assert_eq!(chart["encoding"]["x"]["type"], "temporal");
    assert_eq!(chart["encoding"]["y"]["field"], "Sales");
    assert_eq!(chart["encoding"]["color"]["field"], "Region");
    assert!(chart.get("description").is_none());
}

#[test]
fn test_end_to_end_forced_pie_from_columns_and_rows() {
    let data = r#"{"columns": ["Category", "Value"], "rows": [["A", 100], ["B", 150], ["C", 75]]}"#;
    let out = run_process(data, "chart:pie");

    assert_eq!(out["type"], "visualization");
    assert_eq!(out["chart_type"], "pie");
    assert_eq!(out["output"]["mark"]["type"], "arc");
    assert_eq!(out["output"]["encoding"]["theta"]["field"], "Value");
    assert_eq!(out["output"]["encoding"]["color"]["field"], "Category");
    assert_eq!(out["output"]["data"]["values"].as_array().unwrap().len(), 3);
}

#[test]
fn test_end_to_end_fallback_dataset() {
    for data in ["[]", "not json at all", r#"{"a": 1}"#] {
        let doc = run_chart("bar chart", data);
        assert_eq!(doc["status"], "success", "input: {data}");
        assert_eq!(
            doc["data"]["values"],
            json!([
                {"category": "A", "value": 28},
                {"category": "B", "value": 55},
                {"category": "C", "value": 43}
            ])
        );
        assert_eq!(doc["encoding"]["x"]["field"], "category");
        assert_eq!(doc["encoding"]["y"]["field"], "value");
    }
}

#[test]
fn test_end_to_end_narrow_record_uses_minimal_sample() {
    let doc = run_chart("bar chart", r#"[{"only": 3}]"#);
    assert_eq!(doc["data"]["values"], json!([{"category": "A", "value": 28}]));
}

#[test]
fn test_end_to_end_non_record_array_uses_minimal_sample() {
    let doc = run_chart("bar chart", "[1, 2]");
    assert_eq!(doc["status"], "success");
    assert_eq!(doc["data"]["values"], json!([{"category": "A", "value": 28}]));
}

#[test]
fn test_end_to_end_second_date_field_is_not_a_series() {
    let data = r#"[
        {"start_date": "2024-01-01", "end_date": "2024-02-01", "amount": 5},
        {"start_date": "2024-01-08", "end_date": "2024-02-08", "amount": 7}
    ]"#;
    let doc = run_chart("line trend of amount", data);

    assert_eq!(doc["mark"]["type"], "line");
    assert_eq!(doc["encoding"]["x"]["field"], "start_date");
    assert_eq!(doc["encoding"]["x"]["type"], "temporal");
    assert_eq!(doc["encoding"]["y"]["field"], "amount");
    assert!(doc["encoding"].get("color").is_none());
}

#[test]
fn test_end_to_end_stacked_views_hide_y_title() {
    let data = r#"[
        {"brand": "A", "revenue": 10, "volume": 12, "profit": 3},
        {"brand": "B", "revenue": 14, "volume": 9, "profit": 5}
    ]"#;
    let doc = run_chart("bar chart including revenue, volume and profit", data);
    let y = &doc["vconcat"][0]["encoding"]["y"];
    assert_eq!(y["field"], "revenue");
    assert_eq!(y.get("title"), Some(&Value::Null));
}

#[test]
fn test_end_to_end_numeric_week_recommends_scatter() {
    let out = run_process(r#"[{"week": 1, "sales": 3}, {"week": 2, "sales": 5}]"#, "auto");
    assert_eq!(out["data_analysis"]["recommended_viz"], "scatter");
    assert_eq!(out["data_analysis"]["date_fields"], json!([]));
    assert_eq!(out["chart_type"], "scatter");
}

#[test]
fn test_end_to_end_strict_parse_error() {
    let out = run_process("{broken", "auto");
    assert_eq!(
        out,
        json!({
            "error": "Could not parse data_sample",
            "status": "failed",
            "hint": "Expected JSON array of objects or SQL result format"
        })
    );
}

#[test]
fn test_end_to_end_summary_and_format_modes() {
    let out = run_process(REGIONAL_SALES, "summarize");
    assert_eq!(out["type"], "summary");
    assert_eq!(out["data_preview"].as_array().unwrap().len(), 4);
    assert_eq!(out["statistics"]["field_stats"]["Sales"]["type"], "numeric");
    assert_eq!(out["statistics"]["field_stats"]["Sales"]["min"], 80);

    let out = run_process(REGIONAL_SALES, "FORMAT");
    assert_eq!(out["type"], "formatted_data");
    assert_eq!(out["row_count"], 4);
    assert_eq!(out["columns"], json!(["Region", "Year", "Sales"]));
}

#[test]
fn test_end_to_end_csv_input() {
    let csv = "region,sales_usd,volume\nNorth,1200000,300\nSouth,800000,150\nWest,50000,90\n";
    let data = csv_to_records_json(csv.as_bytes()).expect("CSV converts");
    let doc = run_chart("compare sales vs volume", &data);
    assert_eq!(doc["layer"][0]["encoding"]["y"]["field"], "sales_usd");
    assert_eq!(doc["layer"][1]["encoding"]["y"]["field"], "volume");
}

#[test]
fn test_end_to_end_custom_options() {
    let options = ChartOptions { width: 800, height: 400, ..Default::default() };
    let output = generate_chart_spec_with("pie of share", r#"[{"segment": "a", "share": 1}]"#, &options);
    let doc: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(doc["width"], 800);
    assert_eq!(doc["height"], 400);
    assert_eq!(doc["config"]["view"]["stroke"], Value::Null);
}

#[test]
fn test_end_to_end_idempotent() {
    let first = generate_chart_spec("compare vodka sales USD vs volume by region", VODKA);
    let second = generate_chart_spec("compare vodka sales USD vs volume by region", VODKA);
    assert_eq!(first, second);

    let first = process_data(REGIONAL_SALES, "auto");
    let second = process_data(REGIONAL_SALES, "auto");
    assert_eq!(first, second);
}

fn status_of(output: &str) -> String {
    let value: Value = serde_json::from_str(output).expect("output is JSON");
    value["status"].as_str().expect("status is a string").to_string()
}

fn record_strategy() -> impl Strategy<Value = Value> {
    prop::collection::vec(
        (
            prop::sample::select(vec!["region", "year", "sales", "volume", "id", "name", "x"]),
            prop_oneof![
                any::<i32>().prop_map(Value::from),
                (-1.0e9f64..1.0e9).prop_map(Value::from),
                "[a-z0-9-]{0,8}".prop_map(Value::from),
                Just(Value::Null),
                any::<bool>().prop_map(Value::from),
            ],
        ),
        0..5,
    )
    .prop_map(|pairs| {
        Value::Object(pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
    })
}

proptest! {
    #[test]
    fn prop_chart_output_always_has_status(
        description in "[a-z ]{0,30}",
        data in "[\\[\\]{}\":,0-9a-z ]{0,40}",
    ) {
        let status = status_of(&generate_chart_spec(&description, &data));
        prop_assert!(status == "success" || status == "failed");
    }

    #[test]
    fn prop_process_output_always_has_status(
        data in "[\\[\\]{}\":,0-9a-z ]{0,40}",
        mode in prop::sample::select(vec!["auto", "visualize", "summarize", "format", "chart:bar", "chart:line", "chart:scatter", "chart:pie", "chart:", "other"]),
    ) {
        let status = status_of(&process_data(&data, mode));
        prop_assert!(status == "success" || status == "failed");
    }

    #[test]
    fn prop_record_arrays_always_chart(
        records in prop::collection::vec(record_strategy(), 0..6),
        description in prop::sample::select(vec!["line", "bar chart", "compare sales vs volume", "scatter", "pie", "anything"]),
    ) {
        let data = Value::Array(records).to_string();
        prop_assert_eq!(status_of(&generate_chart_spec(description, &data)), "success");

        let status = status_of(&process_data(&data, "auto"));
        prop_assert!(status == "success" || status == "failed");
    }
}
