use std::path::Path;

use plant_crew_lib::movement::{load_readings, MovementPlot, PersonaStats};

fn fixture() -> &'static Path {
    Path::new(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/plant_movements.csv"
    ))
}

#[test]
fn fixture_loads_with_one_skipped_row() {
    let batch = load_readings(fixture()).unwrap();
    assert_eq!(batch.readings.len(), 5);
    assert_eq!(batch.skipped.len(), 1);
    assert!(batch.skipped[0].to_string().contains("line 5"));
}

#[test]
fn plot_has_one_frame_per_timestamp_and_tracks_in_appearance_order() {
    let plot = MovementPlot::load(fixture());

    assert_eq!(plot.notice, None);
    assert_eq!(plot.warnings.len(), 1);
    assert_eq!(plot.frames.len(), 5);
    assert!(plot
        .frames
        .windows(2)
        .all(|pair| pair[0].timestamp < pair[1].timestamp));

    let names: Vec<&str> = plot.tracks.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Fern", "Basil"]);

    // Fern: (2,0), then (2,4), then a paused step.
    let last = plot.frames.last().unwrap();
    let fern = &last.personas[0];
    let end = fern.path.last().unwrap();
    assert!((end.x - 2.0).abs() < 1e-9);
    assert!((end.y - 4.0).abs() < 1e-9);

    // Every frame has exactly one persona with a current point.
    for frame in &plot.frames {
        let active = frame.personas.iter().filter(|p| !p.current.is_empty()).count();
        assert_eq!(active, 1, "frame {}", frame.label);
    }

    match &plot.stats_for("Fern") {
        PersonaStats::Summary(summary) => {
            assert_eq!(summary.reading_count, 3);
            assert_eq!(summary.distance_mean, 2.0);
            assert_eq!(summary.uv_max, 90.0);
        }
        PersonaStats::NoData => panic!("Fern has readings"),
    }
}

#[test]
fn missing_readings_degrade_to_an_empty_plot_with_notice() {
    let dir = tempfile::tempdir().unwrap();
    let plot = MovementPlot::load(&dir.path().join("absent.csv"));

    assert!(plot.frames.is_empty());
    assert!(plot.tracks.is_empty());
    assert_eq!(plot.bounds.x_range, [-1.0, 1.0]);
    assert!(plot.notice.as_deref().unwrap().contains("No movement readings"));
    assert_eq!(plot.stats_for("Fern"), PersonaStats::NoData);
}

#[test]
fn unusable_file_keeps_the_reasons_rows_were_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plant_movements.csv");
    std::fs::write(
        &path,
        "Name,Timestamp,Rotation (°),Distance Traveled (in),UV Levels (%)\n\
         Fern,2024-05-01 08:00:00,0,NaN,10\n\
         Basil,yesterday,90,1,10\n",
    )
    .unwrap();

    let plot = MovementPlot::load(&path);

    assert!(plot.frames.is_empty());
    assert!(plot.notice.as_deref().unwrap().contains("no usable rows"));
    assert_eq!(plot.warnings.len(), 2);
    assert!(plot.warnings[0].contains("line 2"));
    assert!(plot.warnings[1].contains("not a date-time"));
}
