use thiserror::Error;
use tract_cnn::TractCnnError;

use crate::capture::CaptureError;
use crate::labels::LabelError;
use crate::preprocess::PreprocessError;
use inkling_helpers::ClassifierError;

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, InklingError>;

/// Everything that can stop a prediction or the startup sequence.
#[derive(Debug, Error)]
pub enum InklingError {
    #[error(transparent)]
    Labels(#[from] LabelError),

    #[error(transparent)]
    Model(#[from] TractCnnError),

    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error(transparent)]
    Preprocess(#[from] PreprocessError),

    #[error("classifier failed: {0}")]
    Classify(#[source] ClassifierError),

    #[error("classifier returned no usable scores")]
    EmptyOutput,

    #[error("model predicts {model} classes but the label mapping has {labels}")]
    ClassCountMismatch { model: usize, labels: usize },
}
