use std::fmt::Display;

use crate::labels::{LabelError, LabelMapping};

/// The text shown after a successful prediction.
pub fn prediction_message(label: &str) -> String {
    format!("I believe it's the {}", label)
}

/// A modal message waiting for the user to acknowledge it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Prediction { label: String },
    Error { message: String },
}

impl Notice {
    pub fn error(err: impl Display) -> Self {
        Notice::Error {
            message: err.to_string(),
        }
    }

    /// The predicted label, if this notice reports a prediction.
    pub fn label(&self) -> Option<&str> {
        match self {
            Notice::Prediction { label } => Some(label),
            Notice::Error { .. } => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Notice::Prediction { .. } => "Prediction",
            Notice::Error { .. } => "Error",
        }
    }

    pub fn body(&self) -> String {
        match self {
            Notice::Prediction { label } => prediction_message(label),
            Notice::Error { message } => message.clone(),
        }
    }
}

/// Maps a predicted class index to the notice the user should see.
///
/// An index outside the mapping is an invariant violation and is reported
/// as `LabelError::UnknownClass`, never as an empty label.
pub fn present(index: usize, labels: &LabelMapping) -> Result<Notice, LabelError> {
    let label = labels.get(index)?;
    Ok(Notice::Prediction {
        label: label.to_string(),
    })
}
