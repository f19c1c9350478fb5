use serde::{Deserialize, Serialize};

use super::reading::Reading;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatSummary {
    pub reading_count: usize,
    pub distance_total: f64,
    pub distance_mean: f64,
    pub distance_max: f64,
    pub rotation_mean: f64,
    pub rotation_max: f64,
    pub uv_mean: f64,
    pub uv_max: f64,
}

/// Summary statistics for one persona, or `NoData` when it has no readings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PersonaStats {
    NoData,
    Summary(StatSummary),
}

impl PersonaStats {
    pub fn summary(&self) -> Option<&StatSummary> {
        match self {
            PersonaStats::NoData => None,
            PersonaStats::Summary(summary) => Some(summary),
        }
    }

    pub fn uv_mean(&self) -> Option<f64> {
        self.summary().map(|s| s.uv_mean)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn mean_and_max(values: impl Iterator<Item = f64> + Clone) -> (f64, f64, f64) {
    let count = values.clone().count() as f64;
    let total: f64 = values.clone().sum();
    let max = values.fold(f64::NEG_INFINITY, f64::max);
    (total, total / count, max)
}

/// Aggregate a persona's full reading history.
pub fn aggregate(readings: &[Reading]) -> PersonaStats {
    if readings.is_empty() {
        return PersonaStats::NoData;
    }

    let (distance_total, distance_mean, distance_max) =
        mean_and_max(readings.iter().map(|r| r.distance_traveled));
    let (_, rotation_mean, rotation_max) =
        mean_and_max(readings.iter().map(|r| r.rotation_degrees));
    let (_, uv_mean, uv_max) = mean_and_max(readings.iter().map(|r| r.uv_level_percent));

    PersonaStats::Summary(StatSummary {
        reading_count: readings.len(),
        distance_total: round2(distance_total),
        distance_mean: round2(distance_mean),
        distance_max: round2(distance_max),
        rotation_mean: round2(rotation_mean),
        rotation_max: round2(rotation_max),
        uv_mean: round2(uv_mean),
        uv_max: round2(uv_max),
    })
}
