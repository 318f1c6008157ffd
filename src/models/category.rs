//! Spending category labels
//!
//! Categories are plain labels. The rule-based SMS parser only produces the
//! five built-in labels, while a trained classifier may produce any label
//! present in its training data.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A spending category label (e.g., "Food")
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    pub const SHOPPING: &'static str = "Shopping";
    pub const FOOD: &'static str = "Food";
    pub const TRAVEL: &'static str = "Travel";
    pub const BILLS: &'static str = "Bills";
    pub const OTHERS: &'static str = "Others";

    /// Built-in labels, in rule order
    pub const BUILT_IN: [&'static str; 5] = [
        Self::SHOPPING,
        Self::FOOD,
        Self::TRAVEL,
        Self::BILLS,
        Self::OTHERS,
    ];

    /// Create a category from a label, trimming surrounding whitespace
    ///
    /// Returns `None` for a blank label.
    pub fn new(label: impl AsRef<str>) -> Option<Self> {
        let label = label.as_ref().trim();
        if label.is_empty() {
            None
        } else {
            Some(Self(label.to_string()))
        }
    }

    /// The fallback category used when nothing else matches
    pub fn others() -> Self {
        Self(Self::OTHERS.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if this is one of the built-in labels
    pub fn is_built_in(&self) -> bool {
        Self::BUILT_IN.contains(&self.0.as_str())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_and_rejects_blank() {
        assert_eq!(Category::new(" Food ").unwrap().as_str(), "Food");
        assert!(Category::new("").is_none());
        assert!(Category::new("  \t").is_none());
    }

    #[test]
    fn test_labels_are_case_sensitive() {
        assert_ne!(Category::new("food"), Category::new("Food"));
    }

    #[test]
    fn test_built_in() {
        assert!(Category::others().is_built_in());
        assert!(!Category::new("Groceries").unwrap().is_built_in());
    }
}
