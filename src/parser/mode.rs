// Processing mode parser
//
// Grammar (case-insensitive, surrounding whitespace ignored):
//   mode := "chart:" family | "auto" | "visualize" | "summarize" | "format"

use super::ast::ProcessingMode;
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::multispace0,
    combinator::{all_consuming, map, rest, value},
    sequence::{delimited, preceded},
    IResult,
};

fn parse_chart_mode(input: &str) -> IResult<&str, ProcessingMode> {
    map(preceded(tag("chart:"), rest), |family: &str| {
        ProcessingMode::Chart(family.trim().to_string())
    })(input)
}

fn parse_keyword_mode(input: &str) -> IResult<&str, ProcessingMode> {
    alt((
        value(ProcessingMode::Auto, tag("auto")),
        value(ProcessingMode::Visualize, tag("visualize")),
        value(ProcessingMode::Summarize, tag("summarize")),
        value(ProcessingMode::Format, tag("format")),
    ))(input)
}

/// Parse a processing instruction. Unknown instructions become
/// [`ProcessingMode::Other`] rather than an error.
pub fn parse_mode(input: &str) -> ProcessingMode {
    let lowered = input.trim().to_lowercase();
    let parsed = all_consuming(delimited(
        multispace0,
        alt((parse_chart_mode, parse_keyword_mode)),
        multispace0,
    ))(lowered.as_str());

    match parsed {
        Ok((_, mode)) => mode,
        Err(_) => ProcessingMode::Other(lowered),
    }
}
