//! Model artifact persistence.
//!
//! A [`ModelArtifact`] bundles the fitted scaler and classifier with the
//! feature and button orderings they were trained against. Orderings are
//! stored in the file, not assumed: [`ModelArtifact::load`] compares them
//! against the compiled-in schema and refuses artifacts that do not match,
//! which turns silent schema drift into a visible load error.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write as _},
    path::Path,
};

use chrono::{DateTime, Utc};
use kumite_features::{BUTTON_NAMES, ButtonLabels, FEATURE_NAMES, FeatureVector};
use serde::{Deserialize, Serialize};

use crate::{MultiLabelClassifier, StandardScaler};

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum SchemaError {
    #[display("artifact feature order does not match the compiled-in schema")]
    FeatureOrderMismatch,
    #[display("artifact button order does not match the compiled-in schema")]
    ButtonOrderMismatch,
    #[display("artifact has {actual} scorers, expected {expected}")]
    ScorerCountMismatch { expected: usize, actual: usize },
}

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum ArtifactError {
    #[display("failed to read or write artifact: {_0}")]
    Io(std::io::Error),
    #[display("failed to parse artifact JSON: {_0}")]
    Json(serde_json::Error),
    #[display("artifact schema mismatch: {_0}")]
    Schema(SchemaError),
}

/// The persisted scaler/classifier pair plus the schema it was trained with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub name: String,
    pub trained_at: DateTime<Utc>,
    /// Feature column order at training time, for load-time validation.
    pub feature_names: Vec<String>,
    /// Classifier output order at training time, for load-time validation.
    pub button_names: Vec<String>,
    pub scaler: StandardScaler,
    pub classifier: MultiLabelClassifier,
    /// Mean per-button validation accuracy recorded by the trainer.
    pub validation_accuracy: f32,
}

impl ModelArtifact {
    /// Stamps a freshly trained scaler/classifier pair with the current
    /// schema orderings.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        scaler: StandardScaler,
        classifier: MultiLabelClassifier,
        validation_accuracy: f32,
    ) -> Self {
        Self {
            name: name.into(),
            trained_at: Utc::now(),
            feature_names: FEATURE_NAMES.iter().map(|&s| s.to_owned()).collect(),
            button_names: BUTTON_NAMES.iter().map(|&s| s.to_owned()).collect(),
            scaler,
            classifier,
            validation_accuracy,
        }
    }

    /// Checks the stored orderings against the compiled-in schema.
    pub fn validate_schema(&self) -> Result<(), SchemaError> {
        if !self.feature_names.iter().map(String::as_str).eq(FEATURE_NAMES) {
            return Err(SchemaError::FeatureOrderMismatch);
        }
        if !self.button_names.iter().map(String::as_str).eq(BUTTON_NAMES) {
            return Err(SchemaError::ButtonOrderMismatch);
        }
        if self.classifier.scorer_count() != BUTTON_NAMES.len() {
            return Err(SchemaError::ScorerCountMismatch {
                expected: BUTTON_NAMES.len(),
                actual: self.classifier.scorer_count(),
            });
        }
        Ok(())
    }

    /// Loads and schema-validates an artifact from a JSON file.
    pub fn load<P>(path: P) -> Result<Self, ArtifactError>
    where
        P: AsRef<Path>,
    {
        let file = File::open(path.as_ref())?;
        let reader = BufReader::new(file);
        let artifact: ModelArtifact = serde_json::from_reader(reader)?;
        artifact.validate_schema()?;
        Ok(artifact)
    }

    /// Writes the artifact as pretty JSON.
    pub fn save<P>(&self, path: P) -> Result<(), ArtifactError>
    where
        P: AsRef<Path>,
    {
        let file = File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    /// Scales and classifies one raw feature vector.
    ///
    /// This is the complete per-frame inference path: the scaler fit at
    /// training time, then the positional 12-button decode.
    #[must_use]
    pub fn predict(&self, features: &FeatureVector) -> ButtonLabels {
        let scaled = self.scaler.transform(features);
        self.classifier.predict(&scaled)
    }
}

#[cfg(test)]
mod tests {
    use kumite_features::{BUTTON_COUNT, FEATURE_COUNT};
    use kumite_state::PlayerId;
    use rand_pcg::Pcg64Mcg;

    use crate::TrainConfig;

    use super::*;

    fn tiny_artifact() -> ModelArtifact {
        let samples: Vec<FeatureVector> = (0..4u8)
            .map(|i| {
                let mut values = [0.0; FEATURE_COUNT];
                values[0] = f32::from(i) - 1.5;
                FeatureVector::new(values)
            })
            .collect();
        let labels: Vec<ButtonLabels> = samples
            .iter()
            .map(|s| {
                let mut values = [false; BUTTON_COUNT];
                values[2] = s.values()[0] > 0.0;
                ButtonLabels::new(values)
            })
            .collect();

        let scaler = StandardScaler::fit(&samples).unwrap();
        let scaled = scaler.transform_all(&samples);
        let mut rng = Pcg64Mcg::new(42);
        let config = TrainConfig {
            learning_rate: 0.5,
            epochs: 200,
            l2: 0.0,
        };
        let classifier = MultiLabelClassifier::fit(&config, &scaled, &labels, &mut rng);
        ModelArtifact::new("test", scaler, classifier, 1.0)
    }

    #[test]
    fn test_new_artifact_passes_schema_validation() {
        assert!(tiny_artifact().validate_schema().is_ok());
    }

    #[test]
    fn test_reordered_feature_names_are_rejected() {
        let mut artifact = tiny_artifact();
        artifact.feature_names.swap(0, 1);
        assert!(matches!(
            artifact.validate_schema(),
            Err(SchemaError::FeatureOrderMismatch)
        ));

        let mut artifact = tiny_artifact();
        artifact.button_names.swap(4, 5);
        assert!(matches!(
            artifact.validate_schema(),
            Err(SchemaError::ButtonOrderMismatch)
        ));
    }

    #[test]
    fn test_save_load_round_trip_preserves_predictions() {
        let artifact = tiny_artifact();
        let dir = std::env::temp_dir().join("kumite_artifact_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("model.json");
        artifact.save(&path).unwrap();

        let loaded = ModelArtifact::load(&path).unwrap();
        assert_eq!(loaded, artifact);

        let mut values = [0.0; FEATURE_COUNT];
        values[0] = 2.0;
        let fv = FeatureVector::new(values);
        assert_eq!(loaded.predict(&fv), artifact.predict(&fv));
    }

    #[test]
    fn test_load_missing_file_is_an_io_error() {
        let result = ModelArtifact::load("/no/such/dir/model.json");
        assert!(matches!(result, Err(ArtifactError::Io(_))));
    }

    #[test]
    fn test_predict_runs_for_both_player_orientations() {
        // orientation only affects extraction; the artifact itself must accept
        // any well-formed vector
        let artifact = tiny_artifact();
        let snapshot = kumite_state::GameSnapshot::default();
        for player in [PlayerId::One, PlayerId::Two] {
            let fv = kumite_features::extract(&snapshot, player);
            let _ = artifact.predict(&fv);
        }
    }
}
