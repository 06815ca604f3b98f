use crate::argmax;

/// The outcome of one forward pass.
///
/// `index` is the arg-max of `probabilities`; the full vector is kept so
/// callers can log the confidence of the winning class.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub index: usize,
    pub probabilities: Vec<f32>,
}

impl Prediction {
    /// Builds a prediction from raw scores, or `None` if no score is usable.
    pub fn from_scores(probabilities: Vec<f32>) -> Option<Self> {
        let index = argmax(&probabilities)?;
        Some(Prediction {
            index,
            probabilities,
        })
    }

    /// Score of the winning class.
    pub fn confidence(&self) -> f32 {
        self.probabilities[self.index]
    }
}
