use std::path::{Path, PathBuf};

use inkling_helpers::{Classifier, ClassifierError, INPUT_CHANNELS, INPUT_SIDE, InputTensor};
use thiserror::Error;
use tract_onnx::prelude::*;
use tracing::{debug, info};

/// Errors that can occur when loading or running an ONNX classifier.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TractCnnError {
    /// The model file does not exist
    #[error("model file {} not found", .0.display())]
    NotFound(PathBuf),
    /// The file exists but could not be parsed, typed or optimized
    #[error("cannot load model {}: {reason}", path.display())]
    Load { path: PathBuf, reason: String },
    /// The forward pass itself failed
    #[error("inference failed: {0}")]
    Inference(String),
    /// The model produced no usable output tensor
    #[error("unexpected model output: {0}")]
    Output(String),
}

type TractSimplePlan = SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

/// A convolutional classifier exported to ONNX and executed with tract.
///
/// The graph is typed against a fixed `f32` input of shape `(1, 32, 32, 1)`
/// and optimized once at load time, so every call to `predict` is a plain
/// forward pass.
pub struct TractClassifier {
    plan: TractSimplePlan,
    path: PathBuf,
}

impl TractClassifier {
    /// Loads and optimizes the model stored at `path`.
    ///
    /// # Errors
    ///
    /// Returns `TractCnnError::NotFound` if the file is missing and
    /// `TractCnnError::Load` if tract rejects it, for example because its
    /// input does not accept a `(1, 32, 32, 1)` tensor.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TractCnnError> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Err(TractCnnError::NotFound(path));
        }
        let load_err = |e: TractError| TractCnnError::Load {
            path: path.clone(),
            reason: format!("{e:#}"),
        };

        let input_shape = tvec!(1, INPUT_SIDE, INPUT_SIDE, INPUT_CHANNELS);
        let plan = tract_onnx::onnx()
            .model_for_path(&path)
            .map_err(load_err)?
            .with_input_fact(0, InferenceFact::dt_shape(f32::datum_type(), input_shape))
            .map_err(load_err)?
            .into_optimized()
            .map_err(load_err)?
            .into_runnable()
            .map_err(load_err)?;

        info!(model = %path.display(), "loaded ONNX classifier");
        Ok(Self { plan, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Runs the forward pass and flattens the first output into one score per class.
    pub fn run(&self, input: &InputTensor) -> Result<Vec<f32>, TractCnnError> {
        let data = input.to_vec();
        let tensor = Tensor::from_shape(input.shape(), &data)
            .map_err(|e| TractCnnError::Inference(format!("{e:#}")))?;

        let outputs = self
            .plan
            .run(tvec!(tensor.into()))
            .map_err(|e| TractCnnError::Inference(format!("{e:#}")))?;
        let first = outputs
            .first()
            .ok_or_else(|| TractCnnError::Output("model returned no outputs".to_string()))?;
        let scores: Vec<f32> = first
            .to_array_view::<f32>()
            .map_err(|e| TractCnnError::Output(format!("{e:#}")))?
            .iter()
            .copied()
            .collect();

        debug!(classes = scores.len(), "forward pass complete");
        Ok(scores)
    }
}

impl Classifier for TractClassifier {
    fn predict(&self, input: &InputTensor) -> Result<Vec<f32>, ClassifierError> {
        self.run(input).map_err(|e| e.into())
    }

    fn name(&self) -> String {
        format!("tract-onnx ({})", self.path.display())
    }
}
