//! Handwritten character recognition pipeline.
//!
//! An acquired raster (a capture of the drawing canvas or an uploaded file)
//! flows through [`Preprocessor`] into a [`Classifier`], and the winning class
//! index is turned into a display label by [`present`].

// Include submodules
mod capture;
mod config;
mod error;
mod labels;
mod loader;
mod present;
mod preprocess;
mod recognizer;
mod upload;

// Re-export types from submodules
pub use capture::{CaptureError, RegionCapturer};
pub use config::InklingConfig;
pub use error::{InklingError, Result};
pub use labels::{LabelError, LabelMapping};
pub use loader::load;
pub use present::{Notice, prediction_message, present};
pub use preprocess::{PreprocessError, Preprocessor};
pub use recognizer::{Recognition, Recognizer};
pub use upload::{UPLOAD_FILTERS, UploadOutcome, decode_upload};

pub use inkling_helpers::{
    Classifier, ClassifierError, INPUT_CHANNELS, INPUT_SIDE, InputTensor, Prediction,
    TensorShapeError, argmax,
};

/// Side length of the square drawing canvas, in logical pixels.
pub const CANVAS_SIDE: u32 = 300;
