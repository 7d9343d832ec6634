//! Fitted per-feature standardisation: `(x - mean) / scale`.

use super::{FeatureVector, FEATURE_COLUMNS, FEATURE_DIM};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    /// Column names seen at fit time, when the artifact records them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<String>>,
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self> {
        let s = Self {
            columns: None,
            mean,
            scale,
        };
        s.validate()?;
        Ok(s)
    }

    /// Pass-through transform, used when features are already on model scale.
    pub fn identity() -> Self {
        Self {
            columns: None,
            mean: vec![0.0; FEATURE_DIM],
            scale: vec![1.0; FEATURE_DIM],
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path).map_err(|e| Error::artifact(path, e))?;
        let s: StandardScaler = serde_json::from_str(&data).map_err(|e| Error::artifact(path, e))?;
        if let Some(ref cols) = s.columns {
            if cols.iter().map(String::as_str).ne(FEATURE_COLUMNS.iter().copied()) {
                return Err(Error::artifact(
                    path,
                    format!(
                        "fitted on columns {:?}, expected {:?}",
                        cols, FEATURE_COLUMNS
                    ),
                ));
            }
        }
        s.validate()?;
        Ok(s)
    }

    fn validate(&self) -> Result<()> {
        for len in [self.mean.len(), self.scale.len()] {
            if len != FEATURE_DIM {
                return Err(Error::ShapeMismatch {
                    expected: FEATURE_DIM,
                    got: len,
                });
            }
        }
        Ok(())
    }

    pub fn transform(&self, v: &FeatureVector) -> Result<FeatureVector> {
        if v.dim() != self.mean.len() {
            return Err(Error::ShapeMismatch {
                expected: self.mean.len(),
                got: v.dim(),
            });
        }
        let values = v
            .values
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (m, s))| {
                // Constant feature at fit time
                let s = if *s == 0.0 { 1.0 } else { *s };
                (x - m) / s
            })
            .collect();
        Ok(FeatureVector::new(values))
    }
}
