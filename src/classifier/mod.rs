//! Transaction description classifier
//!
//! A TF-IDF vectorizer over word unigrams and bigrams feeding a multinomial
//! Naive Bayes model. Training is an offline batch step that writes a JSON
//! artifact; inference loads that artifact once and shares it read-only.
//!
//! - `tokenize`: lowercase word tokens and n-grams.
//! - `vectorizer`: vocabulary, IDF weights, and normalized rows.
//! - `naive_bayes`: class priors and feature likelihoods.
//! - `dataset`: labeled CSV loading.
//! - `artifact`: the persisted model and the in-process model slot.
//! - `training`: fitting from examples or straight from a CSV file.

pub mod artifact;
pub mod dataset;
pub mod naive_bayes;
pub mod tokenize;
pub mod training;
pub mod vectorizer;

pub use artifact::{ModelSlot, TrainedModel, MODEL_FORMAT_VERSION};
pub use dataset::{load_dataset, write_sample_dataset, LabeledExample, SAMPLE_DATASET};
pub use naive_bayes::MultinomialNb;
pub use training::{train, train_from_csv, TrainingSummary};
pub use vectorizer::TfidfVectorizer;

use serde::{Deserialize, Serialize};

use crate::error::{SpendwiseError, SpendwiseResult};
use crate::models::Category;

/// A text classifier that can be fitted on labeled descriptions
pub trait TextClassifier: Sized {
    /// Fit on labeled examples
    fn fit(examples: &[LabeledExample]) -> SpendwiseResult<Self>;

    /// Most likely category for a description
    fn predict(&self, description: &str) -> Category;

    /// Labels the classifier can produce, in sorted order
    fn labels(&self) -> &[Category];
}

/// TF-IDF features with a multinomial Naive Bayes model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TfidfNaiveBayes {
    vectorizer: TfidfVectorizer,
    model: MultinomialNb,
}

impl TfidfNaiveBayes {
    pub fn vocabulary_size(&self) -> usize {
        self.vectorizer.len()
    }

    pub(crate) fn is_consistent(&self) -> bool {
        self.vectorizer.is_consistent() && self.model.is_consistent(self.vectorizer.len())
    }
}

impl TextClassifier for TfidfNaiveBayes {
    fn fit(examples: &[LabeledExample]) -> SpendwiseResult<Self> {
        if examples.is_empty() {
            return Err(SpendwiseError::Data("dataset has no examples".into()));
        }

        if let Some(pos) = examples.iter().position(|e| e.description.trim().is_empty()) {
            return Err(SpendwiseError::Data(format!(
                "example {} has a blank description",
                pos + 1
            )));
        }

        let mut labels: Vec<&Category> = examples.iter().map(|e| &e.category).collect();
        labels.sort();
        labels.dedup();
        if labels.len() < 2 {
            return Err(SpendwiseError::Data(format!(
                "need at least two distinct categories, found {}",
                labels.len()
            )));
        }

        let descriptions: Vec<&str> = examples.iter().map(|e| e.description.as_str()).collect();
        let vectorizer = TfidfVectorizer::fit(&descriptions);
        if vectorizer.is_empty() {
            return Err(SpendwiseError::Data(
                "descriptions contain no usable words".into(),
            ));
        }

        let rows: Vec<_> = descriptions.iter().map(|d| vectorizer.transform(d)).collect();
        let categories: Vec<Category> = examples.iter().map(|e| e.category.clone()).collect();
        let model = MultinomialNb::fit(
            &rows,
            &categories,
            vectorizer.len(),
            naive_bayes::DEFAULT_ALPHA,
        );

        Ok(Self { vectorizer, model })
    }

    fn predict(&self, description: &str) -> Category {
        self.model
            .predict(&self.vectorizer.transform(description))
            .clone()
    }

    fn labels(&self) -> &[Category] {
        self.model.classes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn examples() -> Vec<LabeledExample> {
        [
            ("Swiggy dinner order", "Food"),
            ("Zomato lunch delivery", "Food"),
            ("Dinner at restaurant", "Food"),
            ("Uber ride to airport", "Travel"),
            ("Ola cab to office", "Travel"),
            ("Electricity bill payment", "Bills"),
            ("Water bill for march", "Bills"),
            ("Amazon order headphones", "Shopping"),
        ]
        .iter()
        .map(|(d, c)| LabeledExample::new(*d, *c).unwrap())
        .collect()
    }

    #[test]
    fn test_fit_and_predict() {
        let clf = TfidfNaiveBayes::fit(&examples()).unwrap();
        assert_eq!(clf.predict("uber ride home").as_str(), "Travel");
        assert_eq!(clf.predict("late dinner from swiggy").as_str(), "Food");
        assert_eq!(clf.predict("gas bill payment").as_str(), "Bills");
        assert_eq!(clf.labels().len(), 4);
    }

    #[test]
    fn test_unknown_words_fall_back_to_priors() {
        let clf = TfidfNaiveBayes::fit(&examples()).unwrap();
        // Food has the most examples
        assert_eq!(clf.predict("qwerty zxcv").as_str(), "Food");
        assert_eq!(clf.predict("").as_str(), "Food");
    }

    #[test]
    fn test_fit_is_deterministic() {
        let a = TfidfNaiveBayes::fit(&examples()).unwrap();
        let b = TfidfNaiveBayes::fit(&examples()).unwrap();
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn test_empty_dataset_rejected() {
        assert!(TfidfNaiveBayes::fit(&[]).unwrap_err().is_data());
    }

    #[test]
    fn test_single_class_rejected() {
        let only_food = vec![
            LabeledExample::new("swiggy", "Food").unwrap(),
            LabeledExample::new("zomato", "Food").unwrap(),
        ];
        assert!(TfidfNaiveBayes::fit(&only_food).unwrap_err().is_data());
    }

    #[test]
    fn test_wordless_dataset_rejected() {
        let wordless = vec![
            LabeledExample::new("a", "Food").unwrap(),
            LabeledExample::new("!", "Bills").unwrap(),
        ];
        assert!(TfidfNaiveBayes::fit(&wordless).unwrap_err().is_data());
    }
}
