//! TF-IDF feature extraction
//!
//! Term frequencies are raw n-gram counts, weighted by the smoothed inverse
//! document frequency `ln((1 + n) / (1 + df)) + 1` and L2-normalized per
//! document.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::tokenize::ngrams;

/// Sparse feature row as `(feature index, weight)` pairs in index order
pub type SparseRow = Vec<(usize, f64)>;

/// Fitted TF-IDF vocabulary and weights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    /// N-gram to feature index; indices follow lexicographic order
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Learn the vocabulary and IDF weights from a corpus
    pub fn fit<S: AsRef<str>>(documents: &[S]) -> Self {
        let mut document_frequency: BTreeMap<String, usize> = BTreeMap::new();
        for doc in documents {
            let distinct: BTreeSet<String> = ngrams(doc.as_ref()).into_iter().collect();
            for gram in distinct {
                *document_frequency.entry(gram).or_insert(0) += 1;
            }
        }

        let n = documents.len() as f64;
        let mut vocabulary = BTreeMap::new();
        let mut idf = Vec::with_capacity(document_frequency.len());
        for (index, (gram, df)) in document_frequency.into_iter().enumerate() {
            idf.push(((1.0 + n) / (1.0 + df as f64)).ln() + 1.0);
            vocabulary.insert(gram, index);
        }

        Self { vocabulary, idf }
    }

    /// Number of features
    pub fn len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_empty()
    }

    /// TF-IDF row for one document
    ///
    /// N-grams outside the vocabulary are ignored, so an unfamiliar document
    /// produces an empty row.
    pub fn transform(&self, document: &str) -> SparseRow {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for gram in ngrams(document) {
            if let Some(&index) = self.vocabulary.get(&gram) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        let mut row: SparseRow = counts
            .into_iter()
            .map(|(index, count)| (index, count * self.idf[index]))
            .collect();

        let norm = row.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, w) in row.iter_mut() {
                *w /= norm;
            }
        }

        row
    }

    /// Whether the stored vocabulary and IDF table agree in size
    pub(crate) fn is_consistent(&self) -> bool {
        self.vocabulary.len() == self.idf.len()
            && self.vocabulary.values().all(|&i| i < self.idf.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_is_sorted() {
        let vectorizer = TfidfVectorizer::fit(&["zomato lunch", "amazon order"]);
        let grams: Vec<_> = vectorizer.vocabulary.keys().cloned().collect();
        assert_eq!(
            grams,
            vec!["amazon", "amazon order", "lunch", "order", "zomato", "zomato lunch"]
        );
        assert_eq!(vectorizer.vocabulary["amazon"], 0);
        assert_eq!(vectorizer.len(), 6);
    }

    #[test]
    fn test_smoothed_idf() {
        let vectorizer = TfidfVectorizer::fit(&["food order", "shop order"]);
        let order = vectorizer.vocabulary["order"];
        let food = vectorizer.vocabulary["food"];

        // present in both documents: ln(3/3) + 1
        assert!((vectorizer.idf[order] - 1.0).abs() < 1e-12);
        // present in one: ln(3/2) + 1
        assert!((vectorizer.idf[food] - ((3.0f64 / 2.0).ln() + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_rows_are_unit_length() {
        let vectorizer = TfidfVectorizer::fit(&["swiggy dinner order", "uber ride"]);
        let row = vectorizer.transform("swiggy order order");
        let norm: f64 = row.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_words_give_empty_row() {
        let vectorizer = TfidfVectorizer::fit(&["swiggy dinner"]);
        assert!(vectorizer.transform("completely unrelated").is_empty());
    }
}
