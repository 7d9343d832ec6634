//! Pre-fitted artifacts loaded once at startup and held read-only.

use crate::config::{ArtifactsConfig, SeverityConfig};
use crate::error::{Error, Result};
use crate::features::{FeatureCodec, FeatureVector, StandardScaler, VisibilityEncoder, FEATURE_DIM};
use crate::model::{load_classifier, Classifier};
use crate::scoring::{PredictionResult, ScoringEngine};
use crate::sensors::SensorReading;
use sha2::{Digest, Sha256};
use std::path::Path;
use tracing::info;

/// SHA-256 of each artifact file, for audit logs.
#[derive(Debug, Clone, Default)]
pub struct ArtifactDigests {
    pub model: String,
    pub scaler: String,
    pub encoder: String,
}

fn digest_file(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|e| Error::artifact(path, e))?;
    Ok(format!("{:x}", Sha256::digest(&bytes)))
}

pub struct Artifacts {
    codec: FeatureCodec,
    engine: ScoringEngine,
    digests: ArtifactDigests,
}

impl Artifacts {
    pub fn load(config: &ArtifactsConfig, severity: SeverityConfig) -> Result<Self> {
        let digests = ArtifactDigests {
            model: digest_file(&config.model_path)?,
            scaler: digest_file(&config.scaler_path)?,
            encoder: digest_file(&config.encoder_path)?,
        };
        let encoder = VisibilityEncoder::load(&config.encoder_path)?;
        let scaler = StandardScaler::load(&config.scaler_path)?;
        let classifier = load_classifier(&config.model_path)?;

        info!(
            model = %config.model_path.display(),
            model_sha256 = %digests.model,
            scaler_sha256 = %digests.scaler,
            encoder_sha256 = %digests.encoder,
            classes = ?encoder.classes(),
            kind = classifier.kind(),
            "artifacts loaded"
        );
        Self::from_parts(encoder, scaler, classifier, severity).map(|mut a| {
            a.digests = digests;
            a
        })
    }

    /// Assemble from in-memory parts. Fails if the classifier width disagrees with the codec.
    pub fn from_parts(
        encoder: VisibilityEncoder,
        scaler: StandardScaler,
        classifier: Box<dyn Classifier>,
        severity: SeverityConfig,
    ) -> Result<Self> {
        if classifier.feature_count() != FEATURE_DIM {
            return Err(Error::ShapeMismatch {
                expected: FEATURE_DIM,
                got: classifier.feature_count(),
            });
        }
        Ok(Self {
            codec: FeatureCodec::new(encoder, scaler),
            engine: ScoringEngine::new(classifier, severity)?,
            digests: ArtifactDigests::default(),
        })
    }

    pub fn codec(&self) -> &FeatureCodec {
        &self.codec
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    pub fn digests(&self) -> &ArtifactDigests {
        &self.digests
    }

    /// Codec then classifier for one reading.
    pub fn predict(&self, reading: &SensorReading) -> Result<PredictionResult> {
        let features: FeatureVector = self.codec.transform(reading)?;
        self.engine.score(&features)
    }
}
