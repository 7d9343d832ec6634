//! Input ranges enforced by the single-reading form.

use super::{SensorReading, VISIBILITY_CATEGORIES};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    fn check(&self, field: &'static str, value: f64) -> Result<()> {
        if value.is_nan() || value < self.min || value > self.max {
            return Err(Error::OutOfRange {
                field,
                value,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct FormBounds {
    pub sensor_id: Range,
    pub latitude: Range,
    pub longitude: Range,
    pub sound_level_db: Range,
    pub thermal_level: Range,
    pub vibration_level: Range,
}

impl Default for FormBounds {
    fn default() -> Self {
        Self {
            sensor_id: Range::new(1.0, 100.0),
            latitude: Range::new(20.0, 35.0),
            longitude: Range::new(70.0, 90.0),
            sound_level_db: Range::new(20.0, 130.0),
            thermal_level: Range::new(5.0, 100.0),
            vibration_level: Range::new(0.0, 15.0),
        }
    }
}

impl FormBounds {
    /// Reject readings the form widgets could not have produced.
    pub fn check(&self, r: &SensorReading) -> Result<()> {
        self.sensor_id.check("sensor_id", r.sensor_id as f64)?;
        self.latitude.check("latitude", r.latitude)?;
        self.longitude.check("longitude", r.longitude)?;
        Range::new(0.0, 1.0).check("motion_detected", f64::from(r.motion_detected))?;
        self.sound_level_db.check("sound_level_db", r.sound_level_db)?;
        self.thermal_level.check("thermal_level", r.thermal_level)?;
        self.vibration_level.check("vibration_level", r.vibration_level)?;
        if !VISIBILITY_CATEGORIES.contains(&r.visibility.as_str()) {
            return Err(Error::UnknownCategory {
                value: r.visibility.clone(),
            });
        }
        Ok(())
    }
}
