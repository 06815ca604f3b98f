use tract_cnn::TractClassifier;
use tracing::info;

use crate::config::InklingConfig;
use crate::error::Result;
use crate::labels::LabelMapping;
use crate::recognizer::Recognizer;

/// Loads the label mapping and the ONNX model named by `config`.
///
/// Any failure here is fatal for the application: there is nothing to
/// recognize with until both artifacts are in place.
pub fn load(config: &InklingConfig) -> Result<Recognizer> {
    info!(
        model = %config.model_path.display(),
        mappings = %config.mappings_path.display(),
        "loading artifacts"
    );
    let labels = LabelMapping::load(&config.mappings_path)?;
    let classifier = TractClassifier::load(&config.model_path)?;
    Recognizer::new(Box::new(classifier), labels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InklingError;
    use crate::labels::LabelError;
    use tract_cnn::TractCnnError;

    #[test]
    fn test_missing_mapping_is_fatal() {
        let config = InklingConfig {
            mappings_path: "no/such/mappings.json".into(),
            ..InklingConfig::default()
        };
        let result = load(&config);
        assert!(matches!(result, Err(InklingError::Labels(LabelError::Io { .. }))));
    }

    #[test]
    fn test_missing_model_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mappings = dir.path().join("mappings.json");
        std::fs::write(&mappings, r#"{"0": "A", "1": "B"}"#).unwrap();

        let config = InklingConfig {
            model_path: dir.path().join("model.onnx"),
            mappings_path: mappings,
            ..InklingConfig::default()
        };
        let result = load(&config);
        assert!(matches!(
            result,
            Err(InklingError::Model(TractCnnError::NotFound(_)))
        ));
    }
}
