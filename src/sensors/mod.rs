//! Raw sensor readings as they arrive from the form, the session stream or a CSV row.

mod bounds;

pub use bounds::{FormBounds, Range};

use serde::{Deserialize, Serialize};

/// Visibility categories the shipped encoder is fitted on, in form order.
pub const VISIBILITY_CATEGORIES: [&str; 4] = ["clear", "fog", "rain", "night"];

/// One reading from a border sensor post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub sensor_id: i64,
    pub latitude: f64,
    pub longitude: f64,
    /// 0 or 1
    pub motion_detected: u8,
    pub sound_level_db: f64,
    pub thermal_level: f64,
    pub vibration_level: f64,
    /// Kept as the raw label; the codec rejects anything it was not fitted on.
    pub visibility: String,
}

impl Default for SensorReading {
    /// Dashboard form defaults
    fn default() -> Self {
        Self {
            sensor_id: 10,
            latitude: 28.0,
            longitude: 78.0,
            motion_detected: 0,
            sound_level_db: 60.0,
            thermal_level: 35.0,
            vibration_level: 3.0,
            visibility: "clear".to_string(),
        }
    }
}
