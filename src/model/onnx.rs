//! ONNX Runtime inference. Input: [N, feature_count] f32.
//! Outputs follow the scikit-learn converter layout: an optional int64 `label`
//! tensor and a float `probabilities` tensor ([N, 2], or [N] of P(class 1)).

use super::{Classifier, Inference, Label};
use crate::error::{Error, Result};
use crate::features::FEATURE_DIM;
use ndarray::{Array2, CowArray};
use ort::tensor::OrtOwnedTensor;
use ort::{Environment, GraphOptimizationLevel, Session, SessionBuilder, Value};
use std::path::Path;
use std::sync::Arc;

fn model_err(e: ort::OrtError) -> Error {
    Error::Model(e.to_string())
}

pub struct OnnxClassifier {
    _env: Arc<Environment>,
    session: Session,
    feature_count: usize,
    label_output: Option<usize>,
    proba_output: usize,
}

impl OnnxClassifier {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::artifact(path, "model file not found"));
        }
        let env = Environment::builder()
            .with_name("border-watch")
            .build()
            .map_err(|e| Error::artifact(path, e))?
            .into_arc();

        let session = SessionBuilder::new(&env)
            .and_then(|b| b.with_optimization_level(GraphOptimizationLevel::Level1))
            .and_then(|b| b.with_intra_threads(1))
            .and_then(|b| b.with_model_from_file(path))
            .map_err(|e| Error::artifact(path, e))?;

        let feature_count = session
            .inputs
            .first()
            .and_then(|i| i.dimensions.last().copied().flatten())
            .map(|d| d as usize)
            .unwrap_or(FEATURE_DIM);

        let label_output = session.outputs.iter().position(|o| o.name == "label");
        let proba_output = session
            .outputs
            .iter()
            .position(|o| o.name == "probabilities")
            .or_else(|| session.outputs.len().checked_sub(1))
            .ok_or_else(|| Error::artifact(path, "model declares no outputs"))?;

        tracing::info!(
            path = %path.display(),
            feature_count,
            has_label_output = label_output.is_some(),
            "ONNX classifier loaded"
        );

        Ok(Self {
            _env: env,
            session,
            feature_count,
            label_output,
            proba_output,
        })
    }

    /// P(class 1) per row from a [N, 2] or [N] probability tensor.
    fn positive_probabilities(&self, outputs: &[Value<'_>], rows: usize) -> Result<Vec<f64>> {
        let tensor: OrtOwnedTensor<f32, _> = outputs[self.proba_output]
            .try_extract()
            .map_err(model_err)?;
        let view = tensor.view();
        let shape = view.shape().to_vec();
        let flat: Vec<f32> = view.iter().copied().collect();

        match shape.as_slice() {
            [n, 2] if *n == rows => Ok(flat.chunks(2).map(|c| f64::from(c[1])).collect()),
            [n] | [n, 1] if *n == rows => Ok(flat.into_iter().map(f64::from).collect()),
            _ => Err(Error::Model(format!(
                "unexpected probability output shape {:?} for {} rows",
                shape, rows
            ))),
        }
    }

    fn labels(&self, outputs: &[Value<'_>], rows: usize) -> Result<Option<Vec<i64>>> {
        let Some(idx) = self.label_output else {
            return Ok(None);
        };
        let tensor: OrtOwnedTensor<i64, _> = outputs[idx].try_extract().map_err(model_err)?;
        let labels: Vec<i64> = tensor.view().iter().copied().collect();
        if labels.len() != rows {
            return Err(Error::Model(format!(
                "label output has {} entries for {} rows",
                labels.len(),
                rows
            )));
        }
        Ok(Some(labels))
    }
}

impl Classifier for OnnxClassifier {
    fn feature_count(&self) -> usize {
        self.feature_count
    }

    fn infer(&self, batch: &Array2<f64>) -> Result<Vec<Inference>> {
        if batch.ncols() != self.feature_count {
            return Err(Error::ShapeMismatch {
                expected: self.feature_count,
                got: batch.ncols(),
            });
        }
        let rows = batch.nrows();
        if rows == 0 {
            return Ok(Vec::new());
        }

        let input = CowArray::from(batch.mapv(|x| x as f32).into_dyn());
        let value = Value::from_array(self.session.allocator(), &input).map_err(model_err)?;
        let outputs = self.session.run(vec![value]).map_err(model_err)?;

        let probabilities = self.positive_probabilities(&outputs, rows)?;
        let labels = self.labels(&outputs, rows)?;

        Ok(probabilities
            .into_iter()
            .enumerate()
            .map(|(i, probability)| {
                let label = match labels {
                    Some(ref l) => Label::from_class(l[i]),
                    None if probability > 0.5 => Label::Intrusion,
                    None => Label::Normal,
                };
                Inference { label, probability }
            })
            .collect())
    }

    fn kind(&self) -> &'static str {
        "onnx"
    }
}
