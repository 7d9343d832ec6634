//! Batch scoring of an uploaded sensor table with per-row severity and counts.

use super::CsvTable;
use crate::artifacts::Artifacts;
use crate::error::{Error, Result};
use crate::scoring::{PredictionResult, SeverityBucket};
use crate::sensors::SensorReading;
use serde::Serialize;
use tracing::info;

/// Columns every batch file must carry, in any order.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "sensor_id",
    "latitude",
    "longitude",
    "motion_detected",
    "sound_level_db",
    "thermal_level",
    "vibration_level",
    "visibility",
];

/// Columns appended to the uploaded table.
pub const RESULT_COLUMNS: [&str; 3] = ["intrusion_detected", "intrusion_probability", "alert_severity"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchRow {
    pub reading: SensorReading,
    pub result: PredictionResult,
    pub severity: SeverityBucket,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchSummary {
    pub rows: Vec<BatchRow>,
    pub total: usize,
    pub intrusions: usize,
    pub normal: usize,
}

impl BatchSummary {
    /// (latitude, longitude) per row, for the map view.
    pub fn map_points(&self) -> Vec<(f64, f64)> {
        self.rows
            .iter()
            .map(|r| (r.reading.latitude, r.reading.longitude))
            .collect()
    }

    /// GeoJSON FeatureCollection of the map points.
    pub fn to_geojson(&self) -> serde_json::Value {
        let features: Vec<serde_json::Value> = self
            .rows
            .iter()
            .map(|r| {
                serde_json::json!({
                    "type": "Feature",
                    "geometry": {
                        "type": "Point",
                        "coordinates": [r.reading.longitude, r.reading.latitude],
                    },
                    "properties": {
                        "sensor_id": r.reading.sensor_id,
                        "intrusion_detected": r.result.label.class(),
                        "intrusion_probability": r.result.probability,
                        "alert_severity": r.severity.as_str(),
                    },
                })
            })
            .collect();
        serde_json::json!({ "type": "FeatureCollection", "features": features })
    }
}

/// Score a batch of readings. Any failure aborts the whole batch.
pub fn summarize(artifacts: &Artifacts, readings: &[SensorReading]) -> Result<BatchSummary> {
    let vectors = artifacts.codec().transform_batch(readings)?;
    let graded = artifacts.engine().score_batch_graded(&vectors)?;

    let rows: Vec<BatchRow> = readings
        .iter()
        .zip(graded)
        .map(|(reading, (result, severity))| BatchRow {
            reading: reading.clone(),
            result,
            severity,
        })
        .collect();
    let intrusions = rows.iter().filter(|r| r.result.is_intrusion()).count();
    let summary = BatchSummary {
        total: rows.len(),
        intrusions,
        normal: rows.len() - intrusions,
        rows,
    };
    info!(
        total = summary.total,
        intrusions = summary.intrusions,
        normal = summary.normal,
        "batch scored"
    );
    Ok(summary)
}

/// `visibility` first, then the remaining required columns.
pub fn validate_columns(table: &CsvTable) -> Result<()> {
    if table.column("visibility").is_none() {
        return Err(Error::MissingColumn("visibility".into()));
    }
    for col in REQUIRED_COLUMNS {
        if table.column(col).is_none() {
            return Err(Error::MissingColumn(col.to_string()));
        }
    }
    Ok(())
}

struct ColumnIndex {
    sensor_id: usize,
    latitude: usize,
    longitude: usize,
    motion_detected: usize,
    sound_level_db: usize,
    thermal_level: usize,
    vibration_level: usize,
    visibility: usize,
}

impl ColumnIndex {
    fn resolve(table: &CsvTable) -> Result<Self> {
        let col = |name: &str| {
            table
                .column(name)
                .ok_or_else(|| Error::MissingColumn(name.to_string()))
        };
        Ok(Self {
            sensor_id: col("sensor_id")?,
            latitude: col("latitude")?,
            longitude: col("longitude")?,
            motion_detected: col("motion_detected")?,
            sound_level_db: col("sound_level_db")?,
            thermal_level: col("thermal_level")?,
            vibration_level: col("vibration_level")?,
            visibility: col("visibility")?,
        })
    }
}

fn invalid(row: usize, column: &str, value: &str) -> Error {
    Error::InvalidField {
        row,
        column: column.to_string(),
        value: value.to_string(),
    }
}

fn parse_f64(fields: &[String], idx: usize, row: usize, column: &str) -> Result<f64> {
    let raw = fields[idx].trim();
    match raw.parse::<f64>() {
        // `NaN` and `inf` parse, but the scaler and model cannot use them.
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(invalid(row, column, raw)),
    }
}

/// Whole numbers; accepts `10` and `10.0`.
fn parse_whole(fields: &[String], idx: usize, row: usize, column: &str) -> Result<i64> {
    let raw = fields[idx].trim();
    if let Ok(v) = raw.parse::<i64>() {
        return Ok(v);
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < i64::MAX as f64 => Ok(v as i64),
        _ => Err(invalid(row, column, raw)),
    }
}

/// Parse every row into a reading. Row numbers in errors are 1-based data rows.
pub fn parse_readings(table: &CsvTable) -> Result<Vec<SensorReading>> {
    validate_columns(table)?;
    let ix = ColumnIndex::resolve(table)?;

    table
        .rows
        .iter()
        .enumerate()
        .map(|(i, f)| -> Result<SensorReading> {
            let row = i + 1;
            let motion = parse_whole(f, ix.motion_detected, row, "motion_detected")?;
            let motion_detected = match motion {
                0 | 1 => motion as u8,
                _ => return Err(invalid(row, "motion_detected", f[ix.motion_detected].trim())),
            };
            Ok(SensorReading {
                sensor_id: parse_whole(f, ix.sensor_id, row, "sensor_id")?,
                latitude: parse_f64(f, ix.latitude, row, "latitude")?,
                longitude: parse_f64(f, ix.longitude, row, "longitude")?,
                motion_detected,
                sound_level_db: parse_f64(f, ix.sound_level_db, row, "sound_level_db")?,
                thermal_level: parse_f64(f, ix.thermal_level, row, "thermal_level")?,
                vibration_level: parse_f64(f, ix.vibration_level, row, "vibration_level")?,
                visibility: f[ix.visibility].trim().to_string(),
            })
        })
        .collect()
}

/// CSV entry point: validate columns, parse rows, score.
pub fn summarize_table(artifacts: &Artifacts, table: &CsvTable) -> Result<BatchSummary> {
    let readings = parse_readings(table)?;
    summarize(artifacts, &readings)
}

/// Input table with the result columns appended.
pub fn augment(table: &CsvTable, summary: &BatchSummary) -> CsvTable {
    let mut headers = table.headers.clone();
    headers.extend(RESULT_COLUMNS.iter().map(|c| c.to_string()));
    let rows = table
        .rows
        .iter()
        .zip(&summary.rows)
        .map(|(fields, r)| {
            let mut out = fields.clone();
            out.push(r.result.label.class().to_string());
            out.push(r.result.probability.to_string());
            out.push(r.severity.as_str().to_string());
            out
        })
        .collect();
    CsvTable { headers, rows }
}
