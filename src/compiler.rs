use crate::data::{Dataset, Record};
use crate::ir::{
    Axis, AxisBinding, Channel, ChannelTitle, ChartDocument, ChartLayout, Composition, Config,
    Encoding, FieldType, InlineData, Mark, MarkKind, PointMarker, Resolve, UnitView, ViewTitle,
};
use crate::ChartOptions;
use serde_json::Value;

/// Field names introduced by the grouped-bar reshape.
const METRIC_FIELD: &str = "metric";
const VALUE_FIELD: &str = "value";

/// Turn a field name into a display title: `sales_usd` -> `Sales Usd`.
pub fn humanize(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut prev_alpha = false;
    for c in field.chars() {
        let c = if c == '_' { ' ' } else { c };
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

impl Channel {
    /// Field binding with a humanized title.
    fn titled(field: &str, field_type: FieldType) -> Self {
        Self {
            field: Some(field.to_string()),
            field_type: Some(field_type),
            title: Some(ChannelTitle::Text(humanize(field))),
            ..Default::default()
        }
    }

    fn quantitative(field: &str) -> Self {
        Self::titled(field, FieldType::Quantitative)
    }

    fn offset(field: &str) -> Self {
        Self { field: Some(field.to_string()), ..Default::default() }
    }

    fn constant(value: &str) -> Self {
        Self { value: Some(value.to_string()), ..Default::default() }
    }

    fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = Some(axis);
        self
    }
}

/// Shared top-level fields of every document. Each output shape gets its own
/// constructor so no shape can pick up another's keys.
pub struct DocumentBase<'a> {
    options: &'a ChartOptions,
    description: Option<&'a str>,
    data: &'a Dataset,
}

impl<'a> DocumentBase<'a> {
    pub fn new(options: &'a ChartOptions, description: Option<&'a str>, data: &'a Dataset) -> Self {
        Self { options, description, data }
    }

    fn document(&self, values: Vec<Record>, sized: bool, view: Composition, resolve: Option<Resolve>) -> ChartDocument {
        ChartDocument {
            schema: self.options.schema.clone(),
            description: self.description.map(str::to_string),
            data: InlineData { values },
            width: sized.then_some(self.options.width),
            height: sized.then_some(self.options.height),
            view,
            resolve,
            config: Config::default(),
        }
    }

    /// Mark + encoding document over the original records.
    pub fn unit(&self, mark: Mark, encoding: Encoding) -> ChartDocument {
        self.unit_with_values(self.data.records().to_vec(), mark, encoding)
    }

    /// Mark + encoding document over reshaped records.
    pub fn unit_with_values(&self, values: Vec<Record>, mark: Mark, encoding: Encoding) -> ChartDocument {
        self.document(values, true, Composition::Unit { mark, encoding }, None)
    }

    /// Overlaid layers with independent y scales.
    pub fn layered(&self, layer: Vec<UnitView>) -> ChartDocument {
        self.document(
            self.data.records().to_vec(),
            true,
            Composition::Layer { layer },
            Some(Resolve::independent_y()),
        )
    }

    /// Vertically concatenated views with independent y scales. Each view
    /// carries its own size.
    pub fn vconcat(&self, vconcat: Vec<UnitView>) -> ChartDocument {
        self.document(
            self.data.records().to_vec(),
            false,
            Composition::VConcat { vconcat },
            Some(Resolve::independent_y()),
        )
    }
}

/// Compile a resolved layout into a chart document.
pub fn compile_document(layout: &ChartLayout, base: &DocumentBase) -> ChartDocument {
    let options = base.options;
    let angled = || Axis { label_angle: Some(options.label_angle), ..Default::default() };
    let category_axis = |x: &AxisBinding| Channel::titled(&x.field, x.field_type).with_axis(angled());

    match layout {
        ChartLayout::Line { x, y, color } => {
            let mut mark = Mark::new(MarkKind::Line);
            mark.point = Some(PointMarker::Enabled(true));
            base.unit(
                mark,
                Encoding {
                    x: Some(Channel::titled(&x.field, x.field_type)),
                    y: Some(Channel::quantitative(y)),
                    color: color.as_deref().map(|c| Channel::titled(c, FieldType::Nominal)),
                    ..Default::default()
                },
            )
        }

        ChartLayout::BarSingle { x, y } => base.unit(
            Mark::new(MarkKind::Bar),
            Encoding {
                x: Some(category_axis(x)),
                y: Some(Channel::quantitative(y)),
                ..Default::default()
            },
        ),

        ChartLayout::BarPeriodCompare { x, period, y } => base.unit(
            Mark::new(MarkKind::Bar),
            Encoding {
                x: Some(category_axis(x)),
                y: Some(Channel::quantitative(y)),
                color: Some(Channel::titled(period, FieldType::Ordinal)),
                x_offset: Some(Channel::offset(period)),
                ..Default::default()
            },
        ),

        ChartLayout::BarGrouped { x, measures } => {
            let values = reshape_long(base.data, &x.field, measures);
            base.unit_with_values(
                values,
                Mark::new(MarkKind::Bar),
                Encoding {
                    x: Some(category_axis(x)),
                    y: Some(Channel::quantitative(VALUE_FIELD)),
                    color: Some(Channel::titled(METRIC_FIELD, FieldType::Nominal)),
                    x_offset: Some(Channel::offset(METRIC_FIELD)),
                    ..Default::default()
                },
            )
        }

        ChartLayout::BarDualAxis { x, left, right } => {
            let mut bar = Mark::new(MarkKind::Bar);
            bar.opacity = Some(0.7);
            bar.color = Some(options.primary_color.clone());

            let mut line = Mark::new(MarkKind::Line);
            line.color = Some(options.secondary_color.clone());
            line.point = Some(PointMarker::Styled { filled: true, size: 80 });
            line.stroke_width = Some(3.0);

            let left_axis = Axis { title_color: Some(options.primary_color.clone()), ..Default::default() };
            let right_axis = Axis {
                title_color: Some(options.secondary_color.clone()),
                orient: Some("right".to_string()),
                ..Default::default()
            };

            base.layered(vec![
                UnitView {
                    title: None,
                    width: None,
                    height: None,
                    mark: bar,
                    encoding: Encoding {
                        x: Some(category_axis(x)),
                        y: Some(Channel::quantitative(left).with_axis(left_axis)),
                        ..Default::default()
                    },
                },
                UnitView {
                    title: None,
                    width: None,
                    height: None,
                    mark: line,
                    encoding: Encoding {
                        x: Some(Channel::titled(&x.field, x.field_type)),
                        y: Some(Channel::quantitative(right).with_axis(right_axis)),
                        ..Default::default()
                    },
                },
            ])
        }

        ChartLayout::BarStackedSubplots { x, measures } => {
            let views = measures
                .iter()
                .map(|measure| UnitView {
                    title: Some(ViewTitle {
                        text: humanize(measure),
                        font_size: options.subplot_title_size,
                    }),
                    width: Some(options.width),
                    height: Some(options.subplot_height),
                    mark: Mark::new(MarkKind::Bar),
                    encoding: Encoding {
                        x: Some(category_axis(x)),
                        // The view title already names the measure.
                        y: Some(Channel {
                            field: Some(measure.clone()),
                            field_type: Some(FieldType::Quantitative),
                            title: Some(ChannelTitle::Hidden),
                            ..Default::default()
                        }),
                        color: Some(Channel::constant(&options.primary_color)),
                        ..Default::default()
                    },
                })
                .collect();
            base.vconcat(views)
        }

        ChartLayout::Scatter { x, y } => base.unit(
            Mark::new(MarkKind::Point),
            Encoding {
                x: Some(Channel::quantitative(x)),
                y: Some(Channel::quantitative(y)),
                ..Default::default()
            },
        ),

        ChartLayout::Pie { theta, color } => base.unit(
            Mark::new(MarkKind::Arc),
            Encoding {
                theta: Some(Channel::quantitative(theta)),
                color: Some(Channel::titled(color, FieldType::Nominal)),
                ..Default::default()
            },
        ),
    }
}

/// One output record per input row and measure: `{x, metric, value}`.
/// Missing entries become null.
fn reshape_long(data: &Dataset, x_field: &str, measures: &[String]) -> Vec<Record> {
    let mut values = Vec::with_capacity(data.len() * measures.len());
    for row in data.records() {
        for measure in measures {
            let mut record = Record::new();
            record.insert(x_field.to_string(), row.get(x_field).cloned().unwrap_or(Value::Null));
            record.insert(METRIC_FIELD.to_string(), Value::from(humanize(measure)));
            record.insert(VALUE_FIELD.to_string(), row.get(measure).cloned().unwrap_or(Value::Null));
            values.push(record);
        }
    }
    values
}
