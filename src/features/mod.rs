//! Feature codec: raw reading → encoded vector → scaled model input.

mod encoder;
mod pipeline;
mod scaler;

pub use encoder::VisibilityEncoder;
pub use pipeline::FeatureCodec;
pub use scaler::StandardScaler;

use serde::{Deserialize, Serialize};

/// Number of model input features.
pub const FEATURE_DIM: usize = 8;

/// Training-time column order. Reordering silently corrupts predictions.
pub const FEATURE_COLUMNS: [&str; FEATURE_DIM] = [
    "sensor_id",
    "latitude",
    "longitude",
    "motion_detected",
    "sound_level_db",
    "thermal_level",
    "vibration_level",
    "visibility_encoded",
];

/// Fixed-order numeric encoding of one reading, before or after scaling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub values: Vec<f64>,
}

impl FeatureVector {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn dim(&self) -> usize {
        self.values.len()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Encoded visibility code (last column).
    pub fn visibility_code(&self) -> Option<f64> {
        self.values.get(FEATURE_DIM - 1).copied()
    }
}
