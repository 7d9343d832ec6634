//! Logistic regression from exported coefficients: `p = sigmoid(coef · x + intercept)`.

use super::{Classifier, Inference, Label};
use crate::error::{Error, Result};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LogisticArtifact {
    coef: Vec<f64>,
    intercept: f64,
}

#[derive(Debug, Clone)]
pub struct LogisticClassifier {
    coef: Array1<f64>,
    intercept: f64,
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

impl LogisticClassifier {
    pub fn new(coef: Vec<f64>, intercept: f64) -> Self {
        Self {
            coef: Array1::from(coef),
            intercept,
        }
    }

    /// Load `{"coef": [...], "intercept": f}`.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path).map_err(|e| Error::artifact(path, e))?;
        let a: LogisticArtifact =
            serde_json::from_str(&data).map_err(|e| Error::artifact(path, e))?;
        if a.coef.is_empty() {
            return Err(Error::artifact(path, "model has no coefficients"));
        }
        Ok(Self::new(a.coef, a.intercept))
    }
}

impl Classifier for LogisticClassifier {
    fn feature_count(&self) -> usize {
        self.coef.len()
    }

    fn infer(&self, batch: &Array2<f64>) -> Result<Vec<Inference>> {
        if batch.ncols() != self.coef.len() {
            return Err(Error::ShapeMismatch {
                expected: self.coef.len(),
                got: batch.ncols(),
            });
        }
        let logits = batch.dot(&self.coef) + self.intercept;
        Ok(logits
            .iter()
            .map(|&z| {
                let probability = sigmoid(z);
                // Decision function > 0 is the positive class.
                let label = if z > 0.0 {
                    Label::Intrusion
                } else {
                    Label::Normal
                };
                Inference { label, probability }
            })
            .collect())
    }

    fn kind(&self) -> &'static str {
        "logistic"
    }
}
