use crate::data::Record;
use serde::Serialize;

// =============================================================================
// Phase 1: Layout
// =============================================================================

/// Value type annotation attached to an encoding channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Quantitative,
    Nominal,
    Ordinal,
    /// Continuous time.
    Temporal,
}

/// A field bound to a positional axis together with its value type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisBinding {
    pub field: String,
    pub field_type: FieldType,
}

impl AxisBinding {
    pub fn new(field: impl Into<String>, field_type: FieldType) -> Self {
        Self { field: field.into(), field_type }
    }
}

/// The chart structure chosen for a dataset, with every field binding the
/// emitter needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartLayout {
    /// Line chart, one series per `color` value when present.
    Line {
        x: AxisBinding,
        y: String,
        color: Option<String>,
    },
    BarSingle {
        x: AxisBinding,
        y: String,
    },
    /// Same-scale measures as offset bars, via a (x, metric, value) reshape.
    BarGrouped {
        x: AxisBinding,
        measures: Vec<String>,
    },
    /// Bars offset and colored by period.
    BarPeriodCompare {
        x: AxisBinding,
        period: String,
        y: String,
    },
    /// Bar layer on the left axis, line layer on the right axis.
    BarDualAxis {
        x: AxisBinding,
        left: String,
        right: String,
    },
    /// One bar view per measure, stacked vertically.
    BarStackedSubplots {
        x: AxisBinding,
        measures: Vec<String>,
    },
    Scatter {
        x: String,
        y: String,
    },
    Pie {
        theta: String,
        color: String,
    },
}

impl ChartLayout {
    pub fn name(&self) -> &'static str {
        match self {
            ChartLayout::Line { .. } => "line",
            ChartLayout::BarSingle { .. } => "bar",
            ChartLayout::BarGrouped { .. } => "bar-grouped",
            ChartLayout::BarPeriodCompare { .. } => "bar-period-compare",
            ChartLayout::BarDualAxis { .. } => "bar-dual-axis",
            ChartLayout::BarStackedSubplots { .. } => "bar-stacked-subplots",
            ChartLayout::Scatter { .. } => "scatter",
            ChartLayout::Pie { .. } => "pie",
        }
    }
}

// =============================================================================
// Phase 2: Document
// =============================================================================

/// Declarative (Vega-Lite) chart document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartDocument {
    #[serde(rename = "$schema")]
    pub schema: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub data: InlineData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(flatten)]
    pub view: Composition,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolve: Option<Resolve>,
    pub config: Config,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InlineData {
    pub values: Vec<Record>,
}

/// Top-level view structure of a document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Composition {
    Unit { mark: Mark, encoding: Encoding },
    Layer { layer: Vec<UnitView> },
    VConcat { vconcat: Vec<UnitView> },
}

/// A single mark + encoding view, used inside layers and concatenations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<ViewTitle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    pub mark: Mark,
    pub encoding: Encoding,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewTitle {
    pub text: String,
    #[serde(rename = "fontSize")]
    pub font_size: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkKind {
    Bar,
    Line,
    Point,
    Arc,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mark {
    #[serde(rename = "type")]
    pub kind: MarkKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point: Option<PointMarker>,
    #[serde(rename = "strokeWidth", skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    pub tooltip: bool,
}

impl Mark {
    pub fn new(kind: MarkKind) -> Self {
        Self {
            kind,
            color: None,
            opacity: None,
            point: None,
            stroke_width: None,
            tooltip: true,
        }
    }
}

/// Point overlay on a line mark.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PointMarker {
    Enabled(bool),
    Styled { filled: bool, size: u32 },
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Encoding {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<Channel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<Channel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theta: Option<Channel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Channel>,
    #[serde(rename = "xOffset", skip_serializing_if = "Option::is_none")]
    pub x_offset: Option<Channel>,
}

/// One encoding channel: a field binding or a constant value.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Channel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub field_type: Option<FieldType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<ChannelTitle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Axis or legend title of a channel. `Hidden` serializes as `null`, which
/// suppresses the default field-name title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ChannelTitle {
    Text(String),
    Hidden,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Axis {
    #[serde(rename = "labelAngle", skip_serializing_if = "Option::is_none")]
    pub label_angle: Option<i32>,
    #[serde(rename = "titleColor", skip_serializing_if = "Option::is_none")]
    pub title_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orient: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolve {
    pub scale: ResolveScale,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolveScale {
    pub y: ScaleResolution,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleResolution {
    Shared,
    Independent,
}

impl Resolve {
    pub fn independent_y() -> Self {
        Self { scale: ResolveScale { y: ScaleResolution::Independent } }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Config {
    pub view: ViewConfig,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ViewConfig {
    /// `None` serializes as `null`, which removes the view border.
    pub stroke: Option<String>,
}
