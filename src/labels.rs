use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum LabelError {
    #[error("cannot read label mapping {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("label mapping is not a JSON object of strings: {0}")]
    Json(#[from] serde_json::Error),

    #[error("label mapping is empty")]
    Empty,

    #[error("label key {0:?} is not a non-negative integer")]
    InvalidKey(String),

    #[error("label key {0} appears more than once")]
    DuplicateKey(usize),

    #[error("label mapping has no entry for class {0}")]
    MissingClass(usize),

    #[error("class index {index} is outside the {len} known labels")]
    UnknownClass { index: usize, len: usize },
}

/// On-disk form: `{"0": "A", "1": "B", ...}`.
#[derive(Deserialize)]
#[serde(transparent)]
struct RawMapping(HashMap<String, String>);

/// Dense class index to display label table.
///
/// Keys always form the range `0..len()`, so the mapping can be indexed by
/// the arg-max of a classifier output of the same length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMapping {
    labels: Vec<String>,
}

impl LabelMapping {
    /// Builds a mapping whose class `i` is `labels[i]`.
    pub fn from_labels(labels: Vec<String>) -> Result<Self, LabelError> {
        if labels.is_empty() {
            return Err(LabelError::Empty);
        }
        Ok(Self { labels })
    }

    /// Parses the JSON object form, checking that the keys are exactly `0..n`.
    pub fn from_json_str(json: &str) -> Result<Self, LabelError> {
        let RawMapping(raw) = serde_json::from_str(json)?;

        let mut by_index = BTreeMap::new();
        for (key, label) in raw {
            let index: usize = key
                .trim()
                .parse()
                .map_err(|_| LabelError::InvalidKey(key.clone()))?;
            if by_index.insert(index, label).is_some() {
                return Err(LabelError::DuplicateKey(index));
            }
        }

        // Sorted keys are dense exactly when the i-th key equals i.
        let mut labels = Vec::with_capacity(by_index.len());
        for (expected, (index, label)) in by_index.into_iter().enumerate() {
            if index != expected {
                return Err(LabelError::MissingClass(expected));
            }
            labels.push(label);
        }
        Self::from_labels(labels)
    }

    /// Reads and parses the mapping file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LabelError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| LabelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mapping = Self::from_json_str(&json)?;
        info!(path = %path.display(), classes = mapping.len(), "loaded label mapping");
        Ok(mapping)
    }

    /// The label for class `index`.
    pub fn get(&self, index: usize) -> Result<&str, LabelError> {
        self.labels
            .get(index)
            .map(String::as_str)
            .ok_or(LabelError::UnknownClass {
                index,
                len: self.labels.len(),
            })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.labels.iter().map(String::as_str).enumerate()
    }
}
