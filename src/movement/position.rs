use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::reading::Reading;

/// Cumulative location of a persona after one reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub timestamp: NaiveDateTime,
    pub x: f64,
    pub y: f64,
}

/// Displacement contributed by a single reading.
pub fn step(reading: &Reading) -> (f64, f64) {
    let radians = reading.rotation_degrees.to_radians();
    (
        reading.distance_traveled * radians.cos(),
        reading.distance_traveled * radians.sin(),
    )
}

/// Integrate one persona's readings into positions.
///
/// `readings` must already be in ascending timestamp order. The path starts from an
/// implicit origin, so the first position is the first step vector. Zero and negative
/// distances go through the same formula.
pub fn integrate(readings: &[Reading]) -> Vec<Position> {
    let mut x_cursor = 0.0;
    let mut y_cursor = 0.0;

    readings
        .iter()
        .map(|reading| {
            let (step_x, step_y) = step(reading);
            x_cursor += step_x;
            y_cursor += step_y;
            Position {
                timestamp: reading.timestamp,
                x: x_cursor,
                y: y_cursor,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    const EPSILON: f64 = 1e-9;

    fn reading(minute: i64, rotation: f64, distance: f64) -> Reading {
        let base = NaiveDate::from_ymd_opt(2025, 2, 15)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        Reading {
            persona_name: "Fern".into(),
            timestamp: base + Duration::minutes(minute),
            rotation_degrees: rotation,
            distance_traveled: distance,
            uv_level_percent: 50.0,
        }
    }

    #[test]
    fn positions_are_running_sums_of_steps() {
        let readings = vec![
            reading(0, 30.0, 2.0),
            reading(1, 145.0, 1.25),
            reading(2, 270.0, 3.0),
            reading(3, 12.5, 0.75),
        ];

        let positions = integrate(&readings);
        assert_eq!(positions.len(), readings.len());

        for k in 0..readings.len() {
            let (sum_x, sum_y) = readings[..=k]
                .iter()
                .map(step)
                .fold((0.0, 0.0), |(ax, ay), (sx, sy)| (ax + sx, ay + sy));
            assert!((positions[k].x - sum_x).abs() < EPSILON);
            assert!((positions[k].y - sum_y).abs() < EPSILON);
            assert_eq!(positions[k].timestamp, readings[k].timestamp);
        }
    }

    #[test]
    fn cardinal_rotations_produce_axis_steps() {
        let (x, y) = step(&reading(0, 0.0, 4.0));
        assert!((x - 4.0).abs() < EPSILON && y.abs() < EPSILON);

        let (x, y) = step(&reading(0, 90.0, 4.0));
        assert!(x.abs() < EPSILON && (y - 4.0).abs() < EPSILON);
    }

    #[test]
    fn first_position_is_its_own_step_and_pauses_hold_still() {
        let positions = integrate(&[reading(0, 90.0, 2.0), reading(1, 45.0, 0.0)]);
        assert!(positions[0].x.abs() < EPSILON);
        assert!((positions[0].y - 2.0).abs() < EPSILON);
        assert_eq!(positions[0].x, positions[1].x);
        assert_eq!(positions[0].y, positions[1].y);
    }

    #[test]
    fn negative_distance_walks_backwards() {
        let positions = integrate(&[reading(0, 0.0, -3.0)]);
        assert!((positions[0].x + 3.0).abs() < EPSILON);
    }

    #[test]
    fn no_readings_no_positions() {
        assert!(integrate(&[]).is_empty());
    }
}
