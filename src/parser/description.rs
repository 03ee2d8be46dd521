// Free-text chart description scanning

use super::ast::{ChartFamily, ChartRequest};
use crate::keywords::{self, contains_any};

/// Family keyword tables in the order they are tried.
const FAMILY_TABLES: &[(ChartFamily, &[&str])] = &[
    (ChartFamily::Line, keywords::FAMILY_LINE),
    (ChartFamily::Bar, keywords::FAMILY_BAR),
    (ChartFamily::Scatter, keywords::FAMILY_SCATTER),
    (ChartFamily::Pie, keywords::FAMILY_PIE),
];

/// Reduce a description to a family and the phrasing cues layout needs.
/// Text naming no family asks for a bar chart.
pub fn parse_description(description: &str) -> ChartRequest {
    let text = description.to_lowercase();

    let family = FAMILY_TABLES
        .iter()
        .find(|(_, words)| contains_any(&text, words))
        .map_or(ChartFamily::Bar, |(family, _)| *family);

    let comparison =
        contains_any(&text, keywords::COMPARISON) || text.matches("year").count() >= 2;

    ChartRequest {
        family: Some(family),
        comparison,
        multi_metric: contains_any(&text, keywords::MULTI_METRIC),
    }
}
