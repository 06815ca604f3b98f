use std::path::{Path, PathBuf};

use image::RgbaImage;
use image::imageops::FilterType;
use tracing::{debug, warn};

/// File dialog filters offered for uploads, as (description, extensions).
pub const UPLOAD_FILTERS: [(&str, &[&str]); 2] = [
    ("png files (*.png)", &["png"]),
    ("jpg files (*.jpg)", &["jpg"]),
];

/// What happened when the user asked to upload an image.
///
/// Only `Loaded` changes what the canvas shows. The other two are kept
/// distinct so a caller can decide to surface them; by default they are
/// only logged.
#[derive(Debug)]
pub enum UploadOutcome {
    /// Decoded and resized to the canvas size
    Loaded(RgbaImage),
    /// The dialog was closed without choosing a file
    Cancelled,
    /// The chosen file could not be read or decoded
    DecodeFailed { path: PathBuf, reason: String },
}

impl UploadOutcome {
    /// Builds the outcome for an optional dialog selection.
    pub fn from_selection(selection: Option<&Path>, side: u32) -> Self {
        match selection {
            Some(path) => decode_upload(path, side),
            None => UploadOutcome::Cancelled,
        }
    }

    /// Applies the silent-failure policy: logs the outcome and yields the
    /// image only when one was loaded.
    pub fn into_image(self) -> Option<RgbaImage> {
        match self {
            UploadOutcome::Loaded(image) => {
                debug!(width = image.width(), height = image.height(), "upload loaded");
                Some(image)
            }
            UploadOutcome::Cancelled => {
                debug!("upload cancelled");
                None
            }
            UploadOutcome::DecodeFailed { path, reason } => {
                warn!(path = %path.display(), %reason, "ignoring upload that failed to decode");
                None
            }
        }
    }
}

/// Decodes the file at `path` and resizes it to `side`×`side`.
pub fn decode_upload(path: &Path, side: u32) -> UploadOutcome {
    match image::open(path) {
        Ok(image) => {
            let resized = image.resize_exact(side, side, FilterType::CatmullRom);
            UploadOutcome::Loaded(resized.to_rgba8())
        }
        Err(e) => UploadOutcome::DecodeFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        },
    }
}
