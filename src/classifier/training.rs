//! Offline training entry points

use std::path::Path;

use serde::Serialize;
use tracing::info;

use super::artifact::TrainedModel;
use super::dataset::{load_dataset, LabeledExample};
use super::{TextClassifier, TfidfNaiveBayes};
use crate::error::SpendwiseResult;
use crate::models::Category;

/// What a training run produced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingSummary {
    pub examples: usize,
    pub classes: Vec<Category>,
    pub vocabulary_size: usize,
}

impl TrainingSummary {
    fn of(model: &TrainedModel) -> Self {
        Self {
            examples: model.example_count,
            classes: model.labels().to_vec(),
            vocabulary_size: model.classifier.vocabulary_size(),
        }
    }
}

/// Fit a model on labeled examples
pub fn train(examples: &[LabeledExample]) -> SpendwiseResult<TrainedModel> {
    let classifier = TfidfNaiveBayes::fit(examples)?;
    Ok(TrainedModel::new(classifier, examples.len()))
}

/// Train from a CSV dataset and write the artifact
pub fn train_from_csv(dataset_path: &Path, artifact_path: &Path) -> SpendwiseResult<TrainingSummary> {
    let examples = load_dataset(dataset_path)?;
    info!(
        dataset = %dataset_path.display(),
        examples = examples.len(),
        "training classifier"
    );

    let model = train(&examples)?;
    model.save(artifact_path)?;

    let summary = TrainingSummary::of(&model);
    info!(
        artifact = %artifact_path.display(),
        classes = summary.classes.len(),
        vocabulary = summary.vocabulary_size,
        "saved model"
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::ModelSlot;
    use tempfile::TempDir;

    const DATASET: &str = "description,category\n\
        Swiggy dinner order,Food\n\
        Zomato lunch,Food\n\
        Uber ride to airport,Travel\n\
        Electricity bill,Bills\n";

    #[test]
    fn test_train_from_csv_writes_loadable_artifact() {
        let temp = TempDir::new().unwrap();
        let dataset = temp.path().join("labeled.csv");
        let artifact = temp.path().join("models").join("txn_clf.json");
        std::fs::write(&dataset, DATASET).unwrap();

        let summary = train_from_csv(&dataset, &artifact).unwrap();
        assert_eq!(summary.examples, 4);
        assert_eq!(
            summary
                .classes
                .iter()
                .map(|c| c.as_str())
                .collect::<Vec<_>>(),
            vec!["Bills", "Food", "Travel"]
        );
        assert!(summary.vocabulary_size > 0);

        let slot = ModelSlot::load(&artifact).unwrap();
        assert_eq!(slot.predict("uber to airport").unwrap().as_str(), "Travel");
    }

    #[test]
    fn test_single_class_dataset_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let dataset = temp.path().join("labeled.csv");
        let artifact = temp.path().join("txn_clf.json");
        std::fs::write(&dataset, "description,category\nswiggy,Food\nzomato,Food\n").unwrap();

        assert!(train_from_csv(&dataset, &artifact).unwrap_err().is_data());
        assert!(!artifact.exists());
    }

    #[test]
    fn test_header_only_dataset_is_empty() {
        let temp = TempDir::new().unwrap();
        let dataset = temp.path().join("labeled.csv");
        std::fs::write(&dataset, "description,category\n").unwrap();

        let examples = load_dataset(&dataset).unwrap();
        assert!(train(&examples).unwrap_err().is_data());
    }
}
