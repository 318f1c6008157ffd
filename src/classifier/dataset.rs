//! Labeled training data
//!
//! The dataset is a CSV file with a `description` and a `category` column.
//! Header names are matched case-insensitively; other columns are ignored.

use std::path::Path;

use crate::error::{SpendwiseError, SpendwiseResult};
use crate::models::Category;

/// One labeled description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledExample {
    pub description: String,
    pub category: Category,
}

impl LabeledExample {
    /// Build an example, rejecting blank text or labels
    pub fn new(description: impl Into<String>, category: impl AsRef<str>) -> SpendwiseResult<Self> {
        let description = description.into();
        if description.trim().is_empty() {
            return Err(SpendwiseError::Data("description is blank".into()));
        }
        let category = Category::new(category)
            .ok_or_else(|| SpendwiseError::Data("category is blank".into()))?;

        Ok(Self {
            description,
            category,
        })
    }
}

/// Starter dataset written by `spendwise init`
pub const SAMPLE_DATASET: &str = include_str!("../../data/labeled_transactions.csv");

/// Write [`SAMPLE_DATASET`] to `path` unless a file is already there
///
/// Returns whether the file was written.
pub fn write_sample_dataset(path: &Path) -> SpendwiseResult<bool> {
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, SAMPLE_DATASET)?;
    Ok(true)
}

fn column(headers: &csv::StringRecord, name: &str) -> SpendwiseResult<usize> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
        .ok_or_else(|| SpendwiseError::Data(format!("dataset has no '{}' column", name)))
}

/// Read every example from a CSV file
pub fn load_dataset(path: &Path) -> SpendwiseResult<Vec<LabeledExample>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| SpendwiseError::Data(format!("cannot read {}: {}", path.display(), e)))?;

    let headers = reader.headers()?.clone();
    let description_col = column(&headers, "description")?;
    let category_col = column(&headers, "category")?;

    let mut examples = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        // header is line 1
        let line = i + 2;
        let description = record.get(description_col).unwrap_or_default();
        let category = record.get(category_col).unwrap_or_default();

        let example = LabeledExample::new(description, category)
            .map_err(|e| SpendwiseError::Data(format!("line {}: {}", line, e)))?;
        examples.push(example);
    }

    Ok(examples)
}
