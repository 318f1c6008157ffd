//! Persisted classifier artifact
//!
//! The artifact is a single JSON document written atomically. Loading checks
//! `format_version` so an artifact from an incompatible build is refused
//! rather than misread.

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{TextClassifier, TfidfNaiveBayes};
use crate::error::{SpendwiseError, SpendwiseResult};
use crate::models::Category;
use crate::storage::{read_json_required, write_json_atomic};

/// Artifact layout version understood by this build
pub const MODEL_FORMAT_VERSION: u32 = 1;

/// A fitted classifier plus training metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainedModel {
    pub format_version: u32,
    pub trained_at: DateTime<Utc>,
    pub example_count: usize,
    pub classifier: TfidfNaiveBayes,
}

impl TrainedModel {
    pub fn new(classifier: TfidfNaiveBayes, example_count: usize) -> Self {
        Self {
            format_version: MODEL_FORMAT_VERSION,
            trained_at: Utc::now(),
            example_count,
            classifier,
        }
    }

    pub fn predict(&self, description: &str) -> Category {
        self.classifier.predict(description)
    }

    pub fn labels(&self) -> &[Category] {
        self.classifier.labels()
    }

    /// Write the artifact, creating parent directories as needed
    pub fn save(&self, path: &Path) -> SpendwiseResult<()> {
        write_json_atomic(path, self)
    }

    /// Read and validate an artifact
    pub fn load(path: &Path) -> SpendwiseResult<Self> {
        let model: TrainedModel = read_json_required(path).map_err(|e| {
            SpendwiseError::Model(format!("cannot read artifact {}: {}", path.display(), e))
        })?;

        if model.format_version != MODEL_FORMAT_VERSION {
            return Err(SpendwiseError::Model(format!(
                "artifact {} has format version {}, expected {}",
                path.display(),
                model.format_version,
                MODEL_FORMAT_VERSION
            )));
        }

        if !model.classifier.is_consistent() {
            return Err(SpendwiseError::Model(format!(
                "artifact {} has mismatched feature tables",
                path.display()
            )));
        }

        Ok(model)
    }
}

/// The model available to request handlers, if any
///
/// Cloning the slot shares the same immutable model.
#[derive(Debug, Clone, Default)]
pub struct ModelSlot {
    model: Option<Arc<TrainedModel>>,
}

impl ModelSlot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_model(model: TrainedModel) -> Self {
        Self {
            model: Some(Arc::new(model)),
        }
    }

    /// Load the artifact at `path`
    ///
    /// A missing file leaves the slot empty. A file that exists but cannot be
    /// used is an error.
    pub fn load(path: &Path) -> SpendwiseResult<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no model artifact, starting without classifier");
            return Ok(Self::empty());
        }

        Ok(Self::with_model(TrainedModel::load(path)?))
    }

    pub fn is_loaded(&self) -> bool {
        self.model.is_some()
    }

    pub fn model(&self) -> Option<&TrainedModel> {
        self.model.as_deref()
    }

    /// Classify a description with the loaded model
    pub fn predict(&self, description: &str) -> SpendwiseResult<Category> {
        self.model
            .as_ref()
            .map(|m| m.predict(description))
            .ok_or(SpendwiseError::ModelNotLoaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::LabeledExample;
    use tempfile::TempDir;

    fn model() -> TrainedModel {
        let examples = vec![
            LabeledExample::new("swiggy dinner", "Food").unwrap(),
            LabeledExample::new("uber ride", "Travel").unwrap(),
        ];
        TrainedModel::new(TfidfNaiveBayes::fit(&examples).unwrap(), examples.len())
    }

    #[test]
    fn test_save_and_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("models").join("txn_clf.json");

        let original = model();
        original.save(&path).unwrap();
        let loaded = TrainedModel::load(&path).unwrap();

        assert_eq!(loaded.example_count, 2);
        assert_eq!(loaded.trained_at, original.trained_at);
        assert_eq!(loaded.labels(), original.labels());
        assert_eq!(loaded.predict("uber").as_str(), "Travel");
    }

    #[test]
    fn test_foreign_version_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("txn_clf.json");

        let mut future = model();
        future.format_version = MODEL_FORMAT_VERSION + 1;
        future.save(&path).unwrap();

        let err = TrainedModel::load(&path).unwrap_err();
        assert!(matches!(err, SpendwiseError::Model(_)));
    }

    #[test]
    fn test_corrupt_artifact_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("txn_clf.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(
            ModelSlot::load(&path).unwrap_err(),
            SpendwiseError::Model(_)
        ));
    }

    #[test]
    fn test_missing_artifact_gives_empty_slot() {
        let temp = TempDir::new().unwrap();
        let slot = ModelSlot::load(&temp.path().join("absent.json")).unwrap();

        assert!(!slot.is_loaded());
        assert!(matches!(
            slot.predict("swiggy").unwrap_err(),
            SpendwiseError::ModelNotLoaded
        ));
    }

    #[test]
    fn test_slot_clones_share_model() {
        let slot = ModelSlot::with_model(model());
        let other = slot.clone();

        assert_eq!(other.predict("swiggy dinner").unwrap().as_str(), "Food");
        assert!(std::ptr::eq(slot.model().unwrap(), other.model().unwrap()));
    }
}
