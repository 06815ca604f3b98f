use image::DynamicImage;
use tracing::{debug, info};

use crate::capture::RegionCapturer;
use crate::error::{InklingError, Result};
use crate::labels::LabelMapping;
use crate::present::{Notice, present};
use crate::preprocess::Preprocessor;
use inkling_helpers::{Classifier, InputTensor, Prediction};

/// A prediction together with the notice presenting it.
#[derive(Debug, Clone, PartialEq)]
pub struct Recognition {
    pub prediction: Prediction,
    pub notice: Notice,
}

/// The loaded model plus everything needed to go from pixels to a label.
pub struct Recognizer {
    classifier: Box<dyn Classifier>,
    labels: LabelMapping,
    preprocessor: Preprocessor,
}

impl Recognizer {
    /// Pairs a classifier with its label mapping.
    ///
    /// One probe inference on a blank input checks that the classifier's
    /// output length matches the number of labels.
    ///
    /// # Errors
    ///
    /// Returns `InklingError::ClassCountMismatch` if the lengths differ and
    /// `InklingError::Classify` if the probe itself fails.
    pub fn new(classifier: Box<dyn Classifier>, labels: LabelMapping) -> Result<Self> {
        let probe = classifier
            .predict(&InputTensor::zeros())
            .map_err(InklingError::Classify)?;
        if probe.len() != labels.len() {
            return Err(InklingError::ClassCountMismatch {
                model: probe.len(),
                labels: labels.len(),
            });
        }
        info!(classifier = %classifier.name(), classes = labels.len(), "recognizer ready");
        Ok(Self {
            classifier,
            labels,
            preprocessor: Preprocessor::new(),
        })
    }

    pub fn labels(&self) -> &LabelMapping {
        &self.labels
    }

    pub fn preprocess(&self, image: &DynamicImage) -> Result<InputTensor> {
        Ok(self.preprocessor.run(image)?)
    }

    /// Preprocesses `image`, runs the forward pass and picks the arg-max.
    pub fn classify(&self, image: &DynamicImage) -> Result<Prediction> {
        let input = self.preprocess(image)?;
        let scores = self
            .classifier
            .predict(&input)
            .map_err(InklingError::Classify)?;
        let prediction = Prediction::from_scores(scores).ok_or(InklingError::EmptyOutput)?;
        debug!(index = prediction.index, "classified image");
        Ok(prediction)
    }

    /// Classifies `image` and looks up the label of the winning class.
    pub fn recognize(&self, image: &DynamicImage) -> Result<Recognition> {
        let prediction = self.classify(image)?;
        let notice = present(prediction.index, &self.labels)?;
        info!(
            index = prediction.index,
            label = notice.label().unwrap_or_default(),
            confidence = prediction.confidence(),
            "recognized character"
        );
        Ok(Recognition { prediction, notice })
    }

    /// Captures the region behind `capturer` and recognizes it.
    pub fn recognize_region(&self, capturer: &dyn RegionCapturer) -> Result<Recognition> {
        let pixels = capturer.capture()?;
        self.recognize(&DynamicImage::ImageRgba8(pixels))
    }
}
