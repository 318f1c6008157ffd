//! Keyword rules for SMS categorization

use crate::models::Category;

/// One row of the keyword table
#[derive(Debug, Clone, Copy)]
pub struct CategoryRule {
    pub category: &'static str,
    pub keywords: &'static [&'static str],
}

impl CategoryRule {
    /// Whether any keyword occurs in already-lowercased text
    fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k))
    }
}

/// Rules in precedence order; the first matching row wins
pub const RULES: &[CategoryRule] = &[
    CategoryRule {
        category: Category::SHOPPING,
        keywords: &["flipkart", "amazon"],
    },
    CategoryRule {
        category: Category::FOOD,
        keywords: &["swiggy", "zomato"],
    },
    CategoryRule {
        category: Category::TRAVEL,
        keywords: &["uber", "ola", "travel"],
    },
    CategoryRule {
        category: Category::BILLS,
        keywords: &["bill", "electricity", "water"],
    },
];

/// Pick a category for free text using case-insensitive substring matching
///
/// Text that matches no rule is `Others`.
pub fn categorize(text: &str) -> Category {
    let lowered = text.to_lowercase();

    RULES
        .iter()
        .find(|rule| rule.matches(&lowered))
        .and_then(|rule| Category::new(rule.category))
        .unwrap_or_else(Category::others)
}
