use crate::data::Dataset;
use serde::Serialize;
use serde_json::Number;

/// Ratio between two measure ranges above which they get separate axes.
pub const DIVERGENCE_THRESHOLD: f64 = 100.0;

/// Numeric extent of one measure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaleProfile {
    pub min: f64,
    pub max: f64,
    /// `max - min`, or `max` for a constant series.
    pub range: f64,
}

/// Outcome of comparing measure ranges.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScaleDivergence {
    pub divergent: bool,
    /// Profiles in measure order; measures without numeric values are absent.
    pub profiles: Vec<(String, ScaleProfile)>,
}

impl ScaleDivergence {
    pub fn profile(&self, measure: &str) -> Option<&ScaleProfile> {
        self.profiles.iter().find(|(m, _)| m == measure).map(|(_, p)| p)
    }
}

/// Compute a measure's extent over every record. `None` when the field holds
/// no numeric values.
pub fn scale_profile(data: &Dataset, measure: &str) -> Option<ScaleProfile> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for val in data.numbers(measure).filter_map(Number::as_f64) {
        if val < min { min = val; }
        if val > max { max = val; }
    }

    if min == f64::INFINITY {
        return None;
    }

    let range = if max != min { max - min } else { max };
    Some(ScaleProfile { min, max, range })
}

/// Flag measures whose ranges differ by more than [`DIVERGENCE_THRESHOLD`].
pub fn detect_divergence(data: &Dataset, measures: &[String]) -> ScaleDivergence {
    if measures.len() < 2 {
        return ScaleDivergence::default();
    }

    let profiles: Vec<(String, ScaleProfile)> = measures
        .iter()
        .filter_map(|m| scale_profile(data, m).map(|p| (m.clone(), p)))
        .collect();

    if profiles.len() < 2 {
        return ScaleDivergence { divergent: false, profiles };
    }

    let mut max_ratio: f64 = 1.0;
    for (i, (_, a)) in profiles.iter().enumerate() {
        for (_, b) in &profiles[i + 1..] {
            // Zero or negative ranges give no usable ratio.
            if a.range > 0.0 && b.range > 0.0 {
                let ratio = a.range / b.range;
                max_ratio = max_ratio.max(ratio).max(1.0 / ratio);
            }
        }
    }

    let divergent = max_ratio > DIVERGENCE_THRESHOLD;
    tracing::debug!(max_ratio, divergent, "compared measure scales");
    ScaleDivergence { divergent, profiles }
}
