//! Multinomial Naive Bayes over TF-IDF rows

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::vectorizer::SparseRow;
use crate::models::Category;

/// Additive smoothing applied to every feature count
pub const DEFAULT_ALPHA: f64 = 1.0;

/// Fitted class priors and per-class feature log-probabilities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultinomialNb {
    alpha: f64,
    /// Class labels in sorted order
    classes: Vec<Category>,
    class_log_prior: Vec<f64>,
    /// `[class][feature]` log-probabilities
    feature_log_prob: Vec<Vec<f64>>,
}

impl MultinomialNb {
    /// Fit on rows with `n_features` columns
    ///
    /// `rows` and `labels` must have the same length and at least one entry.
    pub fn fit(rows: &[SparseRow], labels: &[Category], n_features: usize, alpha: f64) -> Self {
        let mut per_class: BTreeMap<&Category, (usize, Vec<f64>)> = BTreeMap::new();
        for (row, label) in rows.iter().zip(labels) {
            let (count, features) = per_class
                .entry(label)
                .or_insert_with(|| (0, vec![0.0; n_features]));
            *count += 1;
            for &(index, weight) in row {
                features[index] += weight;
            }
        }

        let total = labels.len() as f64;
        let mut classes = Vec::with_capacity(per_class.len());
        let mut class_log_prior = Vec::with_capacity(per_class.len());
        let mut feature_log_prob = Vec::with_capacity(per_class.len());

        for (label, (count, features)) in per_class {
            let denominator = features.iter().sum::<f64>() + alpha * n_features as f64;
            classes.push(label.clone());
            class_log_prior.push((count as f64 / total).ln());
            feature_log_prob.push(
                features
                    .iter()
                    .map(|fc| ((fc + alpha) / denominator).ln())
                    .collect(),
            );
        }

        Self {
            alpha,
            classes,
            class_log_prior,
            feature_log_prob,
        }
    }

    pub fn classes(&self) -> &[Category] {
        &self.classes
    }

    /// Unnormalized log posterior for each class, in class order
    pub fn joint_log_likelihood(&self, row: &SparseRow) -> Vec<f64> {
        self.class_log_prior
            .iter()
            .zip(&self.feature_log_prob)
            .map(|(prior, log_probs)| {
                prior
                    + row
                        .iter()
                        .map(|&(index, weight)| weight * log_probs[index])
                        .sum::<f64>()
            })
            .collect()
    }

    /// Most probable class; ties go to the earliest label
    pub fn predict(&self, row: &SparseRow) -> &Category {
        let scores = self.joint_log_likelihood(row);

        let mut best = 0;
        for (i, score) in scores.iter().enumerate().skip(1) {
            if *score > scores[best] {
                best = i;
            }
        }

        &self.classes[best]
    }

    /// Whether the stored tables agree with each other and with `n_features`
    pub(crate) fn is_consistent(&self, n_features: usize) -> bool {
        !self.classes.is_empty()
            && self.class_log_prior.len() == self.classes.len()
            && self.feature_log_prob.len() == self.classes.len()
            && self.feature_log_prob.iter().all(|row| row.len() == n_features)
    }
}
