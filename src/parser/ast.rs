// Parsed forms of the caller's hints: chart descriptions and processing modes

use serde::Serialize;

/// Chart family requested explicitly or inferred from a description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartFamily {
    Line,
    Bar,
    Scatter,
    Pie,
}

impl ChartFamily {
    /// Parse an explicit family token (`line`, `bar`, `scatter`, `pie`).
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "line" => Some(ChartFamily::Line),
            "bar" => Some(ChartFamily::Bar),
            "scatter" => Some(ChartFamily::Scatter),
            "pie" => Some(ChartFamily::Pie),
            _ => None,
        }
    }
}

/// What the caller asked for, reduced to the cues layout selection uses.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChartRequest {
    /// `None` (an unrecognized explicit token) selects the plain
    /// single-measure bar.
    pub family: Option<ChartFamily>,
    /// `compare`, `vs`, `versus`, or "year" mentioned twice.
    pub comparison: bool,
    /// Phrasing that asks for several measures side by side.
    pub multi_metric: bool,
}

impl ChartRequest {
    /// A request that names a family and carries no phrasing cues.
    pub fn explicit(family: Option<ChartFamily>) -> Self {
        Self { family, ..Default::default() }
    }
}

/// Processing instruction accepted by the data processing entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessingMode {
    Auto,
    Visualize,
    Summarize,
    Format,
    /// `chart:<family>`; holds the lower-cased family token as given.
    Chart(String),
    /// Anything unrecognized.
    Other(String),
}
