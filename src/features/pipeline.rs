//! Codec pipeline: reading → visibility code → fixed-order vector → scaled vector.

use super::{FeatureVector, StandardScaler, VisibilityEncoder};
use crate::error::Result;
use crate::sensors::SensorReading;

#[derive(Debug, Clone)]
pub struct FeatureCodec {
    encoder: VisibilityEncoder,
    scaler: StandardScaler,
}

impl FeatureCodec {
    pub fn new(encoder: VisibilityEncoder, scaler: StandardScaler) -> Self {
        Self { encoder, scaler }
    }

    /// Unscaled vector in training column order.
    pub fn encode(&self, r: &SensorReading) -> Result<FeatureVector> {
        let visibility = self.encoder.transform(&r.visibility)?;
        Ok(FeatureVector::new(vec![
            r.sensor_id as f64,
            r.latitude,
            r.longitude,
            f64::from(r.motion_detected),
            r.sound_level_db,
            r.thermal_level,
            r.vibration_level,
            f64::from(visibility),
        ]))
    }

    /// Model input for one reading.
    pub fn transform(&self, r: &SensorReading) -> Result<FeatureVector> {
        self.scaler.transform(&self.encode(r)?)
    }

    /// Model inputs for a batch; the first bad row fails the whole batch.
    pub fn transform_batch(&self, readings: &[SensorReading]) -> Result<Vec<FeatureVector>> {
        readings.iter().map(|r| self.transform(r)).collect()
    }

    pub fn encoder(&self) -> &VisibilityEncoder {
        &self.encoder
    }

    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }
}
