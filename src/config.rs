//! Runtime configuration.

use std::path::PathBuf;

/// Where to find the trained artifacts and how to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct InklingConfig {
    /// Serialized ONNX classifier
    pub model_path: PathBuf,
    /// JSON object mapping class indices to labels
    pub mappings_path: PathBuf,
    /// Radius of one ink dab on the canvas, in pixels
    pub brush_radius: f32,
    /// Emit logs as JSON lines instead of human readable text
    pub log_json: bool,
}

impl Default for InklingConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("./train/model.onnx"),
            mappings_path: PathBuf::from("./train/mappings.json"),
            brush_radius: 12.5,
            log_json: false,
        }
    }
}

impl InklingConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            model_path: var("INKLING_MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.model_path),
            mappings_path: var("INKLING_MAPPINGS_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.mappings_path),
            brush_radius: var("INKLING_BRUSH_RADIUS")
                .and_then(|s| s.parse::<f32>().ok())
                .filter(|r| r.is_finite() && *r > 0.0)
                .unwrap_or(defaults.brush_radius),
            log_json: var("INKLING_LOG_JSON")
                .map(|s| matches!(s.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(defaults.log_json),
        }
    }
}
