pub mod frames;
pub mod position;
pub mod reading;
pub mod stats;

#[cfg(feature = "desktop")]
pub mod commands;

use std::path::Path;

use serde::Serialize;

use crate::error::JournalError;

pub use frames::{build_frames, group_tracks, plot_bounds, Frame, PersonaTrack, PlotBounds};
pub use position::{integrate, Position};
pub use reading::{load_batch, load_readings, parse_readings, Reading, ReadingBatch};
pub use stats::{aggregate, PersonaStats, StatSummary};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackInfo {
    pub name: String,
    pub color: String,
    pub stats: PersonaStats,
}

/// Everything a renderer needs to animate the day's paths.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementPlot {
    pub tracks: Vec<TrackInfo>,
    pub frames: Vec<Frame>,
    pub bounds: PlotBounds,
    /// Informational message when no readings could be shown.
    pub notice: Option<String>,
    pub warnings: Vec<String>,
}

impl MovementPlot {
    fn unavailable(err: &JournalError, skipped: &[JournalError]) -> Self {
        Self {
            tracks: Vec::new(),
            frames: Vec::new(),
            bounds: PlotBounds::default(),
            notice: Some(err.to_string()),
            warnings: skipped.iter().map(ToString::to_string).collect(),
        }
    }

    pub fn from_batch(batch: &ReadingBatch) -> Self {
        let tracks = group_tracks(&batch.readings);
        Self {
            frames: build_frames(&tracks),
            bounds: plot_bounds(&tracks),
            tracks: tracks
                .iter()
                .map(|track| TrackInfo {
                    name: track.name.clone(),
                    color: track.color.to_string(),
                    stats: aggregate(&track.readings),
                })
                .collect(),
            notice: None,
            warnings: batch.skipped.iter().map(ToString::to_string).collect(),
        }
    }

    /// Load the readings at `path`; a missing or unusable source degrades to an empty
    /// plot that still lists any skipped rows.
    pub fn load(path: &Path) -> Self {
        let (result, skipped) = match load_batch(path) {
            Ok(batch) => {
                let skipped = batch.skipped.clone();
                (batch.into_usable(), skipped)
            }
            Err(err) => (Err(err), Vec::new()),
        };

        match result {
            Ok(batch) => Self::from_batch(&batch),
            Err(err) => {
                log::info!("Movement plot unavailable: {err}");
                Self::unavailable(&err, &skipped)
            }
        }
    }

    pub fn stats_for(&self, name: &str) -> PersonaStats {
        self.tracks
            .iter()
            .find(|track| track.name == name)
            .map(|track| track.stats.clone())
            .unwrap_or(PersonaStats::NoData)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_source_degrades_to_empty_plot_with_notice() {
        let plot = MovementPlot::load(Path::new("/nowhere/plant_movements.csv"));
        assert!(plot.frames.is_empty());
        assert!(plot.tracks.is_empty());
        assert!(plot.notice.as_deref().unwrap().contains("No movement readings"));
        assert_eq!(plot.stats_for("Fern"), PersonaStats::NoData);
    }

    #[test]
    fn batch_builds_tracks_frames_and_stats() {
        let batch = parse_readings(
            "Name,Timestamp,Rotation (°),Distance Traveled (in),UV Levels (%)\n\
             Fern,2025-02-15 10:00:00,0,2,10\n\
             Fern,2025-02-15 10:01:00,0,4,90\n\
             Ivy,2025-02-15 10:02:00,90,1,abc\n",
        )
        .unwrap();
        let plot = MovementPlot::from_batch(&batch);

        assert_eq!(plot.tracks.len(), 1);
        assert_eq!(plot.frames.len(), 2);
        assert_eq!(plot.warnings.len(), 1);
        assert_eq!(plot.bounds.x_range, [1.0, 7.0]);
        let summary = plot.tracks[0].stats.summary().cloned().unwrap();
        assert_eq!(summary.distance_mean, 3.0);
    }
}
