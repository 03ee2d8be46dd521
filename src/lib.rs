// Library exports for autochart

pub mod classify;
pub mod compiler;
pub mod data;
pub mod error;
pub mod ir;
pub mod keywords;
pub mod logging;
pub mod parser;
pub mod profile;
pub mod resolve;
pub mod runtime;
pub mod scale;

pub use error::GenerationError;
pub use runtime::{
    build_chart, generate_chart_spec, generate_chart_spec_with, process_data, process_data_with,
};

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Canvas and styling defaults applied to every emitted document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChartOptions {
    #[serde(default = "default_schema")]
    pub schema: String,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    /// Height of each view in a vertically stacked layout.
    #[serde(default = "default_subplot_height")]
    pub subplot_height: u32,
    #[serde(default = "default_subplot_title_size")]
    pub subplot_title_size: u32,
    /// Rotation of category axis labels, in degrees.
    #[serde(default = "default_label_angle")]
    pub label_angle: i32,
    #[serde(default = "default_primary_color")]
    pub primary_color: String,
    /// Color of the right-hand series in dual-axis charts.
    #[serde(default = "default_secondary_color")]
    pub secondary_color: String,
}

fn default_schema() -> String { "https://vega.github.io/schema/vega-lite/v5.json".to_string() }
fn default_width() -> u32 { 500 }
fn default_height() -> u32 { 300 }
fn default_subplot_height() -> u32 { 200 }
fn default_subplot_title_size() -> u32 { 14 }
fn default_label_angle() -> i32 { -45 }
fn default_primary_color() -> String { "#4c78a8".to_string() }
fn default_secondary_color() -> String { "#e45756".to_string() }

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            schema: default_schema(),
            width: default_width(),
            height: default_height(),
            subplot_height: default_subplot_height(),
            subplot_title_size: default_subplot_title_size(),
            label_angle: default_label_angle(),
            primary_color: default_primary_color(),
            secondary_color: default_secondary_color(),
        }
    }
}

impl ChartOptions {
    /// Load options from a JSON file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }
}
