//! Loads an ONNX classifier and prints its scores for a blank canvas.
//!
//! Useful to check that an exported model accepts a `(1, 32, 32, 1)` input
//! and to read off how many classes it predicts before writing the label
//! mapping for it.
//!
//! ```text
//! cargo run -p tract-cnn --example probe -- train/model.onnx
//! ```

use inkling_helpers::{Classifier, InputTensor, Prediction};
use tract_cnn::{TractClassifier, TractCnnError};

fn main() {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "train/model.onnx".to_string());

    println!("Probing {}", path);
    match probe(&path) {
        Ok(prediction) => {
            println!("   ✓ {} classes", prediction.probabilities.len());
            println!(
                "   ✓ blank input scores highest on class {} ({:.4})",
                prediction.index,
                prediction.confidence()
            );
        }
        Err(e) => println!("   ✗ {}", e),
    }
}

fn probe(path: &str) -> Result<Prediction, Box<dyn std::error::Error + Send + Sync>> {
    let classifier = TractClassifier::load(path)?;
    println!("   loaded {}", classifier.name());
    let scores = classifier.predict(&InputTensor::zeros())?;
    Prediction::from_scores(scores)
        .ok_or_else(|| TractCnnError::Output("no usable scores".to_string()).into())
}
