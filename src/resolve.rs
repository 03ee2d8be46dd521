use crate::classify::FieldRoles;
use crate::data::{Dataset, SampleKind};
use crate::ir::{AxisBinding, ChartLayout, FieldType};
use crate::keywords;
use crate::parser::ast::{ChartFamily, ChartRequest};
use crate::scale::ScaleDivergence;
use serde_json::Value;

/// Behavior set of an entry point.
///
/// The chart-description entry point and the data-processing entry point
/// evolved separately and disagree on a few details. Both are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contract {
    /// Chart generation from a description: bad data is replaced by a
    /// built-in sample, line x is continuous time only for ISO dates, and
    /// scatter plots the first two declared fields.
    Lenient,
    /// Data processing: bad data is an error, line x is continuous time
    /// whenever it is the temporal field, and scatter plots numeric fields.
    Strict,
}

impl Contract {
    fn temporal_axis_type(&self, sample: Option<&Value>) -> FieldType {
        match self {
            Contract::Strict => FieldType::Temporal,
            Contract::Lenient => match sample {
                Some(Value::String(s)) if keywords::ISO_DATE_PREFIX.is_match(s) => {
                    FieldType::Temporal
                }
                _ => FieldType::Ordinal,
            },
        }
    }
}

/// Pick the chart layout for a request and the classified fields.
pub fn resolve_layout(
    request: &ChartRequest,
    roles: &FieldRoles,
    divergence: &ScaleDivergence,
    data: &Dataset,
    contract: Contract,
) -> ChartLayout {
    let layout = match request.family {
        Some(ChartFamily::Line) => resolve_line(roles, data, contract),
        Some(ChartFamily::Bar) => resolve_bar(request, roles, divergence, data),
        Some(ChartFamily::Scatter) => resolve_scatter(data, contract),
        Some(ChartFamily::Pie) => ChartLayout::Pie {
            theta: roles.primary_measure().to_string(),
            color: roles.categorical.clone().unwrap_or_else(|| first_field(data)),
        },
        None => ChartLayout::BarSingle {
            x: AxisBinding::new(
                roles.categorical.clone().unwrap_or_else(|| first_field(data)),
                FieldType::Nominal,
            ),
            y: roles.primary_measure().to_string(),
        },
    };
    tracing::debug!(layout = layout.name(), "resolved chart layout");
    layout
}

fn first_field(data: &Dataset) -> String {
    data.fields().first().cloned().unwrap_or_default()
}

fn resolve_line(roles: &FieldRoles, data: &Dataset, contract: Contract) -> ChartLayout {
    let x = roles
        .temporal
        .clone()
        .or_else(|| roles.categorical.clone())
        .unwrap_or_else(|| first_field(data));

    let x_type = if roles.temporal.as_deref() == Some(x.as_str()) {
        contract.temporal_axis_type(data.sample(&x))
    } else {
        FieldType::Ordinal
    };

    // Multi-series when both a time axis and a grouping field exist.
    let color = roles.temporal.as_ref().and(roles.categorical.clone());

    ChartLayout::Line {
        x: AxisBinding::new(x, x_type),
        y: roles.primary_measure().to_string(),
        color,
    }
}

fn resolve_bar(
    request: &ChartRequest,
    roles: &FieldRoles,
    divergence: &ScaleDivergence,
    data: &Dataset,
) -> ChartLayout {
    let x_field = roles
        .categorical
        .clone()
        .or_else(|| roles.temporal.clone())
        .unwrap_or_else(|| first_field(data));
    let x_type = if roles.categorical.as_deref() == Some(x_field.as_str()) {
        FieldType::Nominal
    } else {
        FieldType::Ordinal
    };
    let x = AxisBinding::new(x_field, x_type);

    if let (Some(period), true) = (&roles.temporal, request.comparison) {
        return ChartLayout::BarPeriodCompare {
            x,
            period: period.clone(),
            y: roles.primary_measure().to_string(),
        };
    }

    let measures = &roles.measures;
    if measures.len() > 1 && request.multi_metric {
        if divergence.divergent && measures.len() == 2 {
            return ChartLayout::BarDualAxis {
                x,
                left: measures[0].clone(),
                right: measures[1].clone(),
            };
        }
        if divergence.divergent || measures.len() > 2 {
            return ChartLayout::BarStackedSubplots { x, measures: measures.clone() };
        }
        return ChartLayout::BarGrouped { x, measures: measures.clone() };
    }

    ChartLayout::BarSingle { x, y: roles.primary_measure().to_string() }
}

fn resolve_scatter(data: &Dataset, contract: Contract) -> ChartLayout {
    let fields = data.fields();
    match contract {
        Contract::Lenient => {
            if fields.len() >= 2 {
                ChartLayout::Scatter { x: fields[0].clone(), y: fields[1].clone() }
            } else {
                ChartLayout::Scatter { x: "x".to_string(), y: "y".to_string() }
            }
        }
        Contract::Strict => {
            let numeric: Vec<&String> = fields
                .iter()
                .filter(|f| data.sample_kind(f) == SampleKind::Numeric)
                .collect();
            let first = first_field(data);
            let x = numeric.first().map(|f| f.to_string()).unwrap_or_else(|| first.clone());
            let y = numeric
                .get(1)
                .map(|f| f.to_string())
                .or_else(|| fields.get(1).cloned())
                .unwrap_or(first);
            ChartLayout::Scatter { x, y }
        }
    }
}
