//! ONNX Runtime backend for forests exported with `skl2onnx`.
//!
//! The exported graph must be built with `zipmap=False`, so its outputs are
//! `[label, probabilities]` with probabilities as a `[batch, n_classes]`
//! float tensor in label-encoder order.

use std::path::Path;
use std::sync::Mutex;

use ort::session::Session;
use ort::value::Tensor;
use tracing::info;
use triage_core::TriageError;

use crate::model::ProbabilisticModel;

/// Output index of the probability tensor in a `skl2onnx` classifier.
const PROBABILITIES_OUTPUT: usize = 1;

/// Forest served by ONNX Runtime.
///
/// `Session::run` needs exclusive access, so calls are serialized behind a
/// mutex; the model itself is never mutated.
pub struct OnnxForest {
    session: Mutex<Session>,
    n_features: usize,
    n_classes: usize,
}

impl OnnxForest {
    pub fn load(path: &Path, n_features: usize, n_classes: usize) -> Result<Self, TriageError> {
        let session = Session::builder()
            .and_then(|builder| builder.commit_from_file(path))
            .map_err(|e| TriageError::load(path, format!("onnx session: {e}")))?;

        if session.outputs().len() <= PROBABILITIES_OUTPUT {
            return Err(TriageError::load(
                path,
                "expected [label, probabilities] outputs; export with zipmap=False",
            ));
        }

        info!(model = %path.display(), n_features, n_classes, "loaded onnx classifier");
        Ok(Self {
            session: Mutex::new(session),
            n_features,
            n_classes,
        })
    }
}

impl ProbabilisticModel for OnnxForest {
    fn kind(&self) -> &'static str {
        "onnx"
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn n_classes(&self) -> usize {
        self.n_classes
    }

    fn predict_proba(&self, features: &[f32]) -> Result<Vec<f32>, TriageError> {
        let shape = [1i64, features.len() as i64];
        let input = Tensor::from_array((shape, features.to_vec().into_boxed_slice()))
            .map_err(|e| TriageError::Inference(format!("build input tensor: {e}")))?;

        // The session keeps no per-request state, so a poisoned lock is reusable.
        let mut session = self
            .session
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let outputs = session
            .run(ort::inputs![input])
            .map_err(|e| TriageError::Inference(format!("onnx run: {e}")))?;

        let (_, data) = outputs[PROBABILITIES_OUTPUT]
            .try_extract_tensor::<f32>()
            .map_err(|e| TriageError::Inference(format!("read probabilities: {e}")))?;

        Ok(data.to_vec())
    }
}
