//! Movement readings loaded from the sensor export CSV.

use std::{fs, path::Path};

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::JournalError;
use crate::{log_info, log_warn};

const ENABLE_LOGS: bool = true;

const NAME_COLUMN: &str = "Name";
const TIMESTAMP_COLUMN: &str = "Timestamp";
const ROTATION_COLUMNS: [&str; 2] = ["Rotation (°)", "Rotation (¬∞)"];
const DISTANCE_COLUMN: &str = "Distance Traveled (in)";
const UV_COLUMN: &str = "UV Levels (%)";

const TIMESTAMP_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// One sensor sample for a persona.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    pub persona_name: String,
    pub timestamp: NaiveDateTime,
    pub rotation_degrees: f64,
    pub distance_traveled: f64,
    pub uv_level_percent: f64,
}

/// Every usable reading in a source plus the rows that had to be skipped.
#[derive(Debug, Clone, Default)]
pub struct ReadingBatch {
    pub readings: Vec<Reading>,
    pub skipped: Vec<JournalError>,
}

impl ReadingBatch {
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// A batch with no usable rows is `DataUnavailable`.
    pub fn into_usable(self) -> Result<Self, JournalError> {
        if self.is_empty() {
            return Err(JournalError::DataUnavailable {
                reason: "readings file has no usable rows".into(),
            });
        }
        Ok(self)
    }
}

struct ColumnIndex {
    name: usize,
    timestamp: usize,
    rotation: usize,
    distance: usize,
    uv: usize,
}

impl ColumnIndex {
    fn from_header(header: &[String]) -> Result<Self, JournalError> {
        let find = |candidates: &[&str]| {
            header
                .iter()
                .position(|column| candidates.iter().any(|c| column == c))
                .ok_or_else(|| JournalError::DataUnavailable {
                    reason: format!("missing column '{}'", candidates[0]),
                })
        };

        Ok(Self {
            name: find(&[NAME_COLUMN])?,
            timestamp: find(&[TIMESTAMP_COLUMN])?,
            rotation: find(&ROTATION_COLUMNS)?,
            distance: find(&[DISTANCE_COLUMN])?,
            uv: find(&[UV_COLUMN])?,
        })
    }
}

/// Load the readings file. A missing or empty file is `DataUnavailable`.
pub fn load_readings(path: &Path) -> Result<ReadingBatch, JournalError> {
    load_batch(path)?.into_usable()
}

/// Like [`load_readings`], but a file whose rows were all skipped still comes back with
/// its skipped rows.
pub fn load_batch(path: &Path) -> Result<ReadingBatch, JournalError> {
    if !path.exists() {
        return Err(JournalError::DataUnavailable {
            reason: format!("{} does not exist", path.display()),
        });
    }

    let contents = fs::read_to_string(path).map_err(|err| JournalError::DataUnavailable {
        reason: format!("failed to read {}: {err}", path.display()),
    })?;

    let batch = parse_batch(&contents)?;
    log_info!(
        "Loaded {} readings from {} ({} skipped)",
        batch.readings.len(),
        path.display(),
        batch.skipped.len()
    );
    Ok(batch)
}

/// Parse CSV text. Bad rows are skipped and recorded, never fatal.
pub fn parse_readings(contents: &str) -> Result<ReadingBatch, JournalError> {
    parse_batch(contents)?.into_usable()
}

fn parse_batch(contents: &str) -> Result<ReadingBatch, JournalError> {
    let mut lines = contents
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    let (_, header_line) = lines.next().ok_or_else(|| JournalError::DataUnavailable {
        reason: "readings file is empty".into(),
    })?;
    let header = split_record(header_line.trim_start_matches('\u{feff}'));
    let columns = ColumnIndex::from_header(&header)?;

    let mut batch = ReadingBatch::default();
    for (index, line) in lines {
        let line_number = index + 1;
        match parse_row(&split_record(line), &columns) {
            Ok(reading) => batch.readings.push(reading),
            Err(reason) => {
                log_warn!("Skipping readings line {}: {}", line_number, reason);
                batch.skipped.push(JournalError::MalformedReading {
                    line: line_number,
                    reason,
                });
            }
        }
    }

    Ok(batch)
}

fn parse_row(fields: &[String], columns: &ColumnIndex) -> Result<Reading, String> {
    let field = |index: usize, label: &str| -> Result<&str, String> {
        fields
            .get(index)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| format!("missing {label}"))
    };
    let number = |index: usize, label: &str| -> Result<f64, String> {
        let raw = field(index, label)?;
        raw.parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| format!("{label} '{raw}' is not a finite number"))
    };

    Ok(Reading {
        persona_name: field(columns.name, NAME_COLUMN)?.to_string(),
        timestamp: parse_timestamp(field(columns.timestamp, TIMESTAMP_COLUMN)?)?,
        rotation_degrees: number(columns.rotation, "rotation")?,
        distance_traveled: number(columns.distance, "distance")?,
        uv_level_percent: number(columns.uv, "UV level")?,
    })
}

pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.naive_utc());
    }

    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .ok_or_else(|| format!("timestamp '{raw}' is not a date-time"))
}

/// Split one CSV record, honouring double-quoted fields and `""` escapes.
fn split_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    fields.push(current);

    fields.into_iter().map(|f| f.trim().to_string()).collect()
}
