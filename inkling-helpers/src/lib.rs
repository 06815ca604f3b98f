use std::error::Error;

// Include submodules
mod common;
mod tensor;

// Re-export types from submodules
pub use common::Prediction;
pub use tensor::{InputTensor, TensorShapeError, INPUT_CHANNELS, INPUT_SIDE};

/// The boxed error every classifier backend reports through.
pub type ClassifierError = Box<dyn Error + Send + Sync>;

/// A trained model that maps one input tensor to a probability vector.
///
/// Implementations must be pure with respect to their loaded weights: the
/// same tensor always yields the same vector.
pub trait Classifier: Send + Sync {
    /// Run a single forward pass and return one score per known class.
    fn predict(&self, input: &InputTensor) -> Result<Vec<f32>, ClassifierError>;

    /// Short human readable name of the backend, used in logs.
    fn name(&self) -> String;
}

impl<C: Classifier + ?Sized> Classifier for Box<C> {
    fn predict(&self, input: &InputTensor) -> Result<Vec<f32>, ClassifierError> {
        (**self).predict(input)
    }

    fn name(&self) -> String {
        (**self).name()
    }
}

/// Returns the index of the largest value.
///
/// Ties resolve to the lowest index and NaN entries never win. `None` is
/// returned for an empty slice or a slice made only of NaN.
pub fn argmax(values: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &v) in values.iter().enumerate() {
        if v.is_nan() {
            continue;
        }
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argmax_unique_maximum() {
        assert_eq!(argmax(&[0.1, 0.7, 0.2]), Some(1));
        assert_eq!(argmax(&[0.9, 0.1]), Some(0));
    }

    #[test]
    fn test_argmax_ties_pick_first() {
        assert_eq!(argmax(&[0.4, 0.4, 0.2]), Some(0));
        assert_eq!(argmax(&[0.1, 0.45, 0.45]), Some(1));
    }

    #[test]
    fn test_argmax_skips_nan() {
        assert_eq!(argmax(&[f32::NAN, 0.2, 0.1]), Some(1));
        assert_eq!(argmax(&[f32::NAN, f32::NAN]), None);
    }

    #[test]
    fn test_argmax_empty() {
        assert_eq!(argmax(&[]), None);
    }

    struct Constant(Vec<f32>);

    impl Classifier for Constant {
        fn predict(&self, _input: &InputTensor) -> Result<Vec<f32>, ClassifierError> {
            Ok(self.0.clone())
        }

        fn name(&self) -> String {
            "constant".to_string()
        }
    }

    #[test]
    fn test_boxed_classifier_delegates() {
        let boxed: Box<dyn Classifier> = Box::new(Constant(vec![0.3, 0.7]));
        let scores = boxed.predict(&InputTensor::zeros()).unwrap();
        assert_eq!(scores, vec![0.3, 0.7]);
        assert_eq!(boxed.name(), "constant");
    }
}
