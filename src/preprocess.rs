use enum_dispatch::enum_dispatch;
use image::imageops::{FilterType, resize};
use image::{DynamicImage, GrayImage, Luma, RgbImage};
use ndarray::Array4;
use thiserror::Error;

use inkling_helpers::{INPUT_SIDE, InputTensor, TensorShapeError};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PreprocessError {
    #[error("cannot preprocess an empty {width}x{height} image")]
    EmptyImage { width: u32, height: u32 },

    #[error("{step} is not implemented for {input}")]
    Unsupported {
        step: &'static str,
        input: &'static str,
    },

    #[error("preprocessing ended with {0} instead of an array")]
    Unfinished(&'static str),

    #[error(transparent)]
    Tensor(#[from] TensorShapeError),
}

/// Intermediate value handed from one step to the next.
enum Stage {
    Rgb(RgbImage),
    Gray(GrayImage),
    Array(Array4<f32>),
}

impl Stage {
    fn kind(&self) -> &'static str {
        match self {
            Stage::Rgb(_) => "an RGB image",
            Stage::Gray(_) => "a grayscale image",
            Stage::Array(_) => "an array",
        }
    }
}

#[enum_dispatch]
trait Transform {
    fn name(&self) -> &'static str;

    fn transform(&self, input: Stage) -> Result<Stage, PreprocessError>;

    fn unsupported(&self, input: &Stage) -> PreprocessError {
        PreprocessError::Unsupported {
            step: self.name(),
            input: input.kind(),
        }
    }
}

#[enum_dispatch(Transform)]
#[derive(Debug, Clone)]
enum Step {
    Resize(Resize),
    Grayscale(Grayscale),
    ToArray(ToArray),
    Scale(Scale),
}

#[derive(Debug, Clone)]
struct Resize {
    side: u32,
    filter: FilterType,
}

impl Transform for Resize {
    fn name(&self) -> &'static str {
        "Resize"
    }

    fn transform(&self, input: Stage) -> Result<Stage, PreprocessError> {
        match input {
            Stage::Rgb(image) => Ok(Stage::Rgb(resize(&image, self.side, self.side, self.filter))),
            Stage::Gray(image) => Ok(Stage::Gray(resize(&image, self.side, self.side, self.filter))),
            other => Err(self.unsupported(&other)),
        }
    }
}

/// ITU-R 601-2 luma in 16.16 fixed point, the same integer transform the
/// training images went through.
fn luma(r: u8, g: u8, b: u8) -> u8 {
    let l = (19595 * r as u32 + 38470 * g as u32 + 7471 * b as u32 + 0x8000) >> 16;
    l as u8
}

#[derive(Debug, Clone)]
struct Grayscale;

impl Transform for Grayscale {
    fn name(&self) -> &'static str {
        "Grayscale"
    }

    fn transform(&self, input: Stage) -> Result<Stage, PreprocessError> {
        match input {
            Stage::Rgb(image) => {
                let (width, height) = image.dimensions();
                let gray = GrayImage::from_fn(width, height, |x, y| {
                    let [r, g, b] = image.get_pixel(x, y).0;
                    Luma([luma(r, g, b)])
                });
                Ok(Stage::Gray(gray))
            }
            // already single channel
            Stage::Gray(image) => Ok(Stage::Gray(image)),
            other => Err(self.unsupported(&other)),
        }
    }
}

/// Lays a grayscale image out as NHWC with a batch of one.
#[derive(Debug, Clone)]
struct ToArray;

impl Transform for ToArray {
    fn name(&self) -> &'static str {
        "ToArray"
    }

    fn transform(&self, input: Stage) -> Result<Stage, PreprocessError> {
        match input {
            Stage::Gray(image) => {
                let (width, height) = image.dimensions();
                let arr = Array4::from_shape_fn(
                    (1, height as usize, width as usize, 1),
                    |(_, y, x, _)| image.get_pixel(x as u32, y as u32)[0] as f32,
                );
                Ok(Stage::Array(arr))
            }
            Stage::Array(arr) => Ok(Stage::Array(arr)),
            other => Err(self.unsupported(&other)),
        }
    }
}

#[derive(Debug, Clone)]
struct Scale {
    divisor: f32,
}

impl Transform for Scale {
    fn name(&self) -> &'static str {
        "Scale"
    }

    fn transform(&self, input: Stage) -> Result<Stage, PreprocessError> {
        match input {
            Stage::Array(arr) => Ok(Stage::Array(arr.mapv_into(|v| v / self.divisor))),
            other => Err(self.unsupported(&other)),
        }
    }
}

/// Turns any acquired raster into the tensor the model was trained on.
///
/// The steps are fixed: bicubic resize to 32×32, luma conversion, reshape
/// to `(1, 32, 32, 1)` and division by 255. Changing any of them silently
/// degrades accuracy, so none is configurable.
#[derive(Debug, Clone)]
pub struct Preprocessor {
    steps: Vec<Step>,
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}

impl Preprocessor {
    pub fn new() -> Self {
        Preprocessor {
            steps: vec![
                Resize {
                    side: INPUT_SIDE as u32,
                    filter: FilterType::CatmullRom,
                }
                .into(),
                Grayscale.into(),
                ToArray.into(),
                Scale { divisor: 255.0 }.into(),
            ],
        }
    }

    pub fn run(&self, image: &DynamicImage) -> Result<InputTensor, PreprocessError> {
        let (width, height) = (image.width(), image.height());
        if width == 0 || height == 0 {
            return Err(PreprocessError::EmptyImage { width, height });
        }

        let mut stage = Stage::Rgb(image.to_rgb8());
        for step in &self.steps {
            stage = step.transform(stage)?;
        }

        match stage {
            Stage::Array(arr) => Ok(InputTensor::new(arr)?),
            other => Err(PreprocessError::Unfinished(other.kind())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    fn checker(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            if (x / 7 + y / 5) % 2 == 0 {
                Rgb([255, 255, 255])
            } else {
                Rgb([10, 40, 90])
            }
        }))
    }

    #[test]
    fn test_shape_and_range_for_any_size() {
        let preprocessor = Preprocessor::new();
        for (w, h) in [(1, 1), (32, 32), (300, 300), (500, 200), (7, 1000)] {
            let tensor = preprocessor.run(&checker(w, h)).unwrap();
            assert_eq!(tensor.shape(), &[1, 32, 32, 1], "{w}x{h}");
            assert!(
                tensor.to_vec().iter().all(|v| (0.0..=1.0).contains(v)),
                "{w}x{h}"
            );
        }
    }

    #[test]
    fn test_is_deterministic() {
        let preprocessor = Preprocessor::new();
        let image = checker(300, 300);
        let first = preprocessor.run(&image).unwrap();
        let second = preprocessor.run(&image.clone()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_blank_canvas_is_all_zero() {
        let blank = DynamicImage::ImageRgba8(RgbaImage::from_pixel(300, 300, Rgba([0, 0, 0, 255])));
        let tensor = Preprocessor::new().run(&blank).unwrap();
        assert!(tensor.to_vec().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_white_is_one() {
        let white = DynamicImage::ImageRgb8(RgbImage::from_pixel(64, 64, Rgb([255, 255, 255])));
        let tensor = Preprocessor::new().run(&white).unwrap();
        for v in tensor.to_vec() {
            assert_relative_eq!(v, 1.0);
        }
    }

    #[test]
    fn test_uses_fixed_luma_weights() {
        assert_eq!(luma(255, 0, 0), 76);
        assert_eq!(luma(0, 255, 0), 150);
        assert_eq!(luma(0, 0, 255), 29);
        assert_eq!(luma(255, 255, 255), 255);

        let red = DynamicImage::ImageRgb8(RgbImage::from_pixel(40, 40, Rgb([255, 0, 0])));
        let tensor = Preprocessor::new().run(&red).unwrap();
        assert_relative_eq!(tensor.view()[[0, 16, 16, 0]], 76.0 / 255.0, epsilon = 1e-6);
    }

    #[test]
    fn test_keeps_row_major_layout() {
        // Top half white, bottom half black.
        let image = DynamicImage::ImageRgb8(RgbImage::from_fn(32, 32, |_, y| {
            if y < 16 { Rgb([255, 255, 255]) } else { Rgb([0, 0, 0]) }
        }));
        let tensor = Preprocessor::new().run(&image).unwrap();
        let view = tensor.view();
        assert_relative_eq!(view[[0, 0, 31, 0]], 1.0);
        assert_relative_eq!(view[[0, 31, 0, 0]], 0.0);
    }

    #[test]
    fn test_empty_image() {
        let empty = DynamicImage::ImageRgb8(RgbImage::new(0, 10));
        let result = Preprocessor::new().run(&empty);
        assert_eq!(
            result,
            Err(PreprocessError::EmptyImage {
                width: 0,
                height: 10
            })
        );
    }

    #[test]
    fn test_step_order_is_checked() {
        let preprocessor = Preprocessor {
            steps: vec![Scale { divisor: 255.0 }.into()],
        };
        let result = preprocessor.run(&checker(8, 8));
        assert_eq!(
            result,
            Err(PreprocessError::Unsupported {
                step: "Scale",
                input: "an RGB image"
            })
        );
    }
}
