use ndarray::{Array4, ArrayView4};
use thiserror::Error;

/// Side length, in pixels, of the square image the model was trained on.
pub const INPUT_SIDE: usize = 32;
/// The model consumes single-channel (grayscale) images.
pub const INPUT_CHANNELS: usize = 1;

const INPUT_SHAPE: [usize; 4] = [1, INPUT_SIDE, INPUT_SIDE, INPUT_CHANNELS];

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TensorShapeError {
    #[error("expected an input of shape {expected:?}, got {actual:?}")]
    Shape {
        expected: [usize; 4],
        actual: Vec<usize>,
    },
    #[error("input value {value} at flat index {index} is outside [0, 1]")]
    OutOfRange { index: usize, value: f32 },
}

/// A batch of one normalized grayscale image laid out as NHWC.
///
/// The shape is always `(1, 32, 32, 1)` and every value lies in `[0, 1]`;
/// both are checked on construction so a backend never sees anything else.
#[derive(Debug, Clone, PartialEq)]
pub struct InputTensor {
    data: Array4<f32>,
}

impl InputTensor {
    /// Wraps an array after checking its shape and value range.
    pub fn new(data: Array4<f32>) -> Result<Self, TensorShapeError> {
        if data.shape() != INPUT_SHAPE {
            return Err(TensorShapeError::Shape {
                expected: INPUT_SHAPE,
                actual: data.shape().to_vec(),
            });
        }
        if let Some((index, &value)) = data
            .iter()
            .enumerate()
            .find(|(_, v)| !(0.0..=1.0).contains(*v))
        {
            return Err(TensorShapeError::OutOfRange { index, value });
        }
        Ok(Self { data })
    }

    /// An all-black input.
    pub fn zeros() -> Self {
        Self {
            data: Array4::zeros(INPUT_SHAPE),
        }
    }

    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    pub fn view(&self) -> ArrayView4<'_, f32> {
        self.data.view()
    }

    /// Values in row-major (NHWC) order.
    pub fn to_vec(&self) -> Vec<f32> {
        self.data.iter().copied().collect()
    }
}
