//! Runs the classifier and derives the prediction and its severity tier.

use super::SeverityBucket;
use crate::config::SeverityConfig;
use crate::error::{Error, Result};
use crate::features::FeatureVector;
use crate::model::{Classifier, Label};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Prediction for a single reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub label: Label,
    /// P(Intrusion), in [0, 1]
    pub probability: f64,
}

impl PredictionResult {
    pub fn is_intrusion(&self) -> bool {
        self.label == Label::Intrusion
    }

    pub fn intrusion_probability(&self) -> f64 {
        self.probability
    }

    pub fn normal_probability(&self) -> f64 {
        1.0 - self.probability
    }

    /// Probability of the predicted label.
    pub fn confidence(&self) -> f64 {
        match self.label {
            Label::Intrusion => self.intrusion_probability(),
            Label::Normal => self.normal_probability(),
        }
    }
}

pub struct ScoringEngine {
    classifier: Box<dyn Classifier>,
    config: SeverityConfig,
}

impl ScoringEngine {
    /// Fails on severity edges that are out of [0, 1] or inverted.
    pub fn new(classifier: Box<dyn Classifier>, config: SeverityConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { classifier, config })
    }

    pub fn score(&self, vector: &FeatureVector) -> Result<PredictionResult> {
        let mut out = self.score_batch(std::slice::from_ref(vector))?;
        out.pop().ok_or_else(|| Error::Model("classifier returned no rows".into()))
    }

    /// One result per input vector, same order.
    pub fn score_batch(&self, vectors: &[FeatureVector]) -> Result<Vec<PredictionResult>> {
        let width = self.classifier.feature_count();
        let mut flat = Vec::with_capacity(vectors.len() * width);
        for v in vectors {
            if v.dim() != width {
                return Err(Error::ShapeMismatch {
                    expected: width,
                    got: v.dim(),
                });
            }
            flat.extend_from_slice(v.as_slice());
        }
        let batch = Array2::from_shape_vec((vectors.len(), width), flat).map_err(|_| {
            Error::ShapeMismatch {
                expected: width,
                got: 0,
            }
        })?;

        let inferences = self.classifier.infer(&batch)?;
        if inferences.len() != vectors.len() {
            return Err(Error::Model(format!(
                "classifier returned {} rows for {} inputs",
                inferences.len(),
                vectors.len()
            )));
        }
        inferences
            .into_iter()
            .enumerate()
            .map(|(row, i)| {
                // clamp keeps NaN as NaN
                if !i.probability.is_finite() {
                    return Err(Error::Model(format!(
                        "non-finite probability {} for row {}",
                        i.probability, row
                    )));
                }
                Ok(PredictionResult {
                    label: i.label,
                    probability: i.probability.clamp(0.0, 1.0),
                })
            })
            .collect()
    }

    /// Batch scoring with a severity bucket per row.
    pub fn score_batch_graded(
        &self,
        vectors: &[FeatureVector],
    ) -> Result<Vec<(PredictionResult, SeverityBucket)>> {
        Ok(self
            .score_batch(vectors)?
            .into_iter()
            .map(|r| (r, self.severity(&r)))
            .collect())
    }

    pub fn severity(&self, result: &PredictionResult) -> SeverityBucket {
        SeverityBucket::from_probability(result.probability, &self.config)
    }

    pub fn config(&self) -> &SeverityConfig {
        &self.config
    }

    pub fn classifier_kind(&self) -> &'static str {
        self.classifier.kind()
    }
}
