//! Animation frames over the integrated persona paths.

use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{position::integrate, position::Position, reading::Reading};

/// Marker and path colours, assigned to personas in tracking order.
pub const PALETTE: [&str; 10] = [
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FFEEAD", "#D4A5A5", "#9A8C98", "#C9ADA7",
    "#A5A58D", "#FFB4A2",
];

pub const FRAME_LABEL_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One persona's time-ordered readings and the positions integrated from them.
#[derive(Debug, Clone)]
pub struct PersonaTrack {
    pub name: String,
    pub color: &'static str,
    pub readings: Vec<Reading>,
    pub positions: Vec<Position>,
}

impl PersonaTrack {
    fn new(name: String, index: usize, mut readings: Vec<Reading>) -> Self {
        readings.sort_by_key(|r| r.timestamp);
        let positions = integrate(&readings);
        Self {
            name,
            color: PALETTE[index % PALETTE.len()],
            readings,
            positions,
        }
    }

    /// Range of indices with `timestamp < at` (start) and `timestamp <= at` (end).
    fn bounds_at(&self, at: NaiveDateTime) -> (usize, usize) {
        let start = self.positions.partition_point(|p| p.timestamp < at);
        let end = self.positions.partition_point(|p| p.timestamp <= at);
        (start, end)
    }
}

/// Group readings by persona in order of first appearance.
pub fn group_tracks(readings: &[Reading]) -> Vec<PersonaTrack> {
    let mut groups: Vec<(String, Vec<Reading>)> = Vec::new();
    for reading in readings {
        match groups.iter_mut().find(|(name, _)| *name == reading.persona_name) {
            Some((_, group)) => group.push(reading.clone()),
            None => groups.push((reading.persona_name.clone(), vec![reading.clone()])),
        }
    }

    groups
        .into_iter()
        .enumerate()
        .map(|(index, (name, readings))| PersonaTrack::new(name, index, readings))
        .collect()
}

/// A reading rendered as the persona's marker, with hover details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentPoint {
    pub x: f64,
    pub y: f64,
    pub timestamp_label: String,
    pub rotation_degrees: f64,
    pub distance_traveled: f64,
    pub uv_level_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FramePersona {
    pub name: String,
    pub path: Vec<Position>,
    pub current: Vec<CurrentPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    pub timestamp: NaiveDateTime,
    pub label: String,
    pub personas: Vec<FramePersona>,
}

/// Build one frame per distinct timestamp across every track, in ascending order.
pub fn build_frames(tracks: &[PersonaTrack]) -> Vec<Frame> {
    let timestamps: BTreeSet<NaiveDateTime> = tracks
        .iter()
        .flat_map(|track| track.positions.iter().map(|p| p.timestamp))
        .collect();

    timestamps
        .into_iter()
        .map(|at| Frame {
            timestamp: at,
            label: at.format(FRAME_LABEL_FORMAT).to_string(),
            personas: tracks.iter().map(|track| frame_persona(track, at)).collect(),
        })
        .collect()
}

fn frame_persona(track: &PersonaTrack, at: NaiveDateTime) -> FramePersona {
    let (start, end) = track.bounds_at(at);
    let current = track.positions[start..end]
        .iter()
        .zip(&track.readings[start..end])
        .map(|(position, reading)| CurrentPoint {
            x: position.x,
            y: position.y,
            timestamp_label: position.timestamp.format(FRAME_LABEL_FORMAT).to_string(),
            rotation_degrees: reading.rotation_degrees,
            distance_traveled: reading.distance_traveled,
            uv_level_percent: reading.uv_level_percent,
        })
        .collect();

    FramePersona {
        name: track.name.clone(),
        path: track.positions[..end].to_vec(),
        current,
    }
}

/// Fixed axis ranges, padded by one unit around every position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotBounds {
    pub x_range: [f64; 2],
    pub y_range: [f64; 2],
}

impl Default for PlotBounds {
    fn default() -> Self {
        Self {
            x_range: [-1.0, 1.0],
            y_range: [-1.0, 1.0],
        }
    }
}

pub fn plot_bounds(tracks: &[PersonaTrack]) -> PlotBounds {
    let mut positions = tracks.iter().flat_map(|track| track.positions.iter());
    let Some(first) = positions.next() else {
        return PlotBounds::default();
    };

    let (mut min_x, mut max_x, mut min_y, mut max_y) = (first.x, first.x, first.y, first.y);
    for p in positions {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }

    PlotBounds {
        x_range: [min_x - 1.0, max_x + 1.0],
        y_range: [min_y - 1.0, max_y + 1.0],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn at(minute: i64) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 2, 15)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
            + Duration::minutes(minute)
    }

    fn reading(name: &str, minute: i64, distance: f64) -> Reading {
        Reading {
            persona_name: name.into(),
            timestamp: at(minute),
            rotation_degrees: 0.0,
            distance_traveled: distance,
            uv_level_percent: 20.0,
        }
    }

    #[test]
    fn one_frame_per_distinct_timestamp_across_personas() {
        let readings = vec![
            reading("A", 0, 1.0),
            reading("A", 2, 1.0),
            reading("A", 4, 1.0),
            reading("B", 3, 1.0),
        ];
        let tracks = group_tracks(&readings);
        let frames = build_frames(&tracks);

        assert_eq!(frames.len(), 4);
        assert!(frames.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
        for frame in &frames {
            let with_current = frame
                .personas
                .iter()
                .filter(|p| !p.current.is_empty())
                .count();
            assert!(with_current <= 1);
        }

        // B has no path until its first reading at minute 3.
        let b_paths: Vec<usize> = frames.iter().map(|f| f.personas[1].path.len()).collect();
        assert_eq!(b_paths, vec![0, 0, 1, 1]);
        let a_paths: Vec<usize> = frames.iter().map(|f| f.personas[0].path.len()).collect();
        assert_eq!(a_paths, vec![1, 2, 2, 3]);
    }

    #[test]
    fn shared_timestamps_collapse_into_one_frame() {
        let readings = vec![reading("A", 0, 1.0), reading("B", 0, 2.0), reading("A", 1, 1.0)];
        let frames = build_frames(&group_tracks(&readings));
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].personas[0].current.len(), 1);
        assert_eq!(frames[0].personas[1].current.len(), 1);
        assert!(frames[1].personas[1].current.is_empty());
        assert_eq!(frames[1].personas[1].path.len(), 1);
    }

    #[test]
    fn duplicate_timestamps_are_concurrent_current_points() {
        let readings = vec![reading("A", 0, 1.0), reading("A", 0, 2.0)];
        let frames = build_frames(&group_tracks(&readings));
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].personas[0].current.len(), 2);
        assert_eq!(frames[0].personas[0].path.len(), 2);
    }

    #[test]
    fn single_reading_single_frame() {
        let frames = build_frames(&group_tracks(&[reading("A", 0, 1.0)]));
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].label, "2025-02-15 08:00:00");
    }

    #[test]
    fn tracks_sort_their_own_readings_and_cycle_colours() {
        let mut readings = vec![reading("A", 5, 1.0), reading("A", 1, 2.0)];
        for i in 0..10 {
            readings.push(reading(&format!("P{i}"), 0, 1.0));
        }
        let tracks = group_tracks(&readings);

        assert_eq!(tracks[0].readings[0].timestamp, at(1));
        assert_eq!(tracks[0].positions[0].x, 2.0);
        assert_eq!(tracks[0].color, PALETTE[0]);
        assert_eq!(tracks[10].color, PALETTE[0]);
    }

    #[test]
    fn bounds_pad_every_position() {
        let tracks = group_tracks(&[reading("A", 0, 3.0), reading("B", 0, -2.0)]);
        let bounds = plot_bounds(&tracks);
        assert_eq!(bounds.x_range, [-3.0, 4.0]);
        assert_eq!(plot_bounds(&[]), PlotBounds::default());
    }

    #[test]
    fn no_tracks_no_frames() {
        assert!(build_frames(&[]).is_empty());
    }
}
