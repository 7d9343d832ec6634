//! Pre-trained binary intrusion classifier.
//!
//! The classifier is an opaque artifact behind the [`Classifier`] trait:
//! - [`OnnxClassifier`]: ONNX export run through ONNX Runtime
//! - [`LogisticClassifier`]: logistic-regression coefficients stored as JSON

mod linear;
mod onnx;

pub use linear::LogisticClassifier;
pub use onnx::OnnxClassifier;

use crate::error::{Error, Result};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Classifier output class. 0 = Normal, 1 = Intrusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    Normal,
    Intrusion,
}

impl Label {
    pub fn from_class(class: i64) -> Self {
        if class == 1 {
            Label::Intrusion
        } else {
            Label::Normal
        }
    }

    pub fn class(self) -> u8 {
        match self {
            Label::Normal => 0,
            Label::Intrusion => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Label::Normal => "Normal",
            Label::Intrusion => "Intrusion",
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw classifier output for one row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Inference {
    pub label: Label,
    /// P(Intrusion)
    pub probability: f64,
}

pub trait Classifier {
    /// Input width the model was trained on.
    fn feature_count(&self) -> usize;

    /// One inference per row of `batch`, in row order.
    fn infer(&self, batch: &Array2<f64>) -> Result<Vec<Inference>>;

    fn kind(&self) -> &'static str;
}

/// Load a classifier, picking the format from the file extension.
pub fn load_classifier(path: &Path) -> Result<Box<dyn Classifier>> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("onnx") => Ok(Box::new(OnnxClassifier::load(path)?)),
        Some("json") => Ok(Box::new(LogisticClassifier::load(path)?)),
        other => Err(Error::artifact(
            path,
            format!("unsupported model format {:?} (expected .onnx or .json)", other),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_mapping() {
        assert_eq!(Label::from_class(1), Label::Intrusion);
        assert_eq!(Label::from_class(0), Label::Normal);
        assert_eq!(Label::Intrusion.class(), 1);
        assert_eq!(Label::Normal.to_string(), "Normal");
    }

    #[test]
    fn unknown_extension_rejected() {
        let err = load_classifier(Path::new("model.pkl")).err().unwrap();
        assert!(matches!(err, Error::Artifact { .. }));
    }
}
