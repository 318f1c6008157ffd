//! Amount and category extraction from bank SMS messages

use std::sync::OnceLock;

use regex::Regex;

use super::rules::categorize;
use crate::models::{Category, Money};

/// What could be read out of one SMS
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsExtraction {
    /// Amount after the first `Rs` marker, if any
    pub amount: Option<Money>,
    pub category: Category,
}

fn amount_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)Rs\.?\s?(\d+(?:\.\d+)?)").expect("invalid amount regex"))
}

/// Read the first `Rs`-prefixed amount
///
/// Matches `Rs`, an optional `.`, at most one whitespace character, then
/// digits with an optional fraction. Amounts too large to represent are
/// treated as absent.
pub fn extract_amount(text: &str) -> Option<Money> {
    let caps = amount_re().captures(text)?;
    Money::parse(caps.get(1)?.as_str()).ok()
}

/// Extract amount and category from SMS text
pub fn extract(text: &str) -> SmsExtraction {
    SmsExtraction {
        amount: extract_amount(text),
        category: categorize(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swiggy_message() {
        let result = extract("Rs. 450 spent at Swiggy");
        assert_eq!(result.amount, Some(Money::from_units(450)));
        assert_eq!(result.category.as_str(), "Food");
    }

    #[test]
    fn test_no_currency_marker() {
        let result = extract("Payment of 200 to unknown merchant");
        assert_eq!(result.amount, None);
        assert_eq!(result.category, Category::others());
    }

    #[test]
    fn test_amount_formats() {
        assert_eq!(extract_amount("Rs.99.50 debited"), Some(Money::from_cents(9950)));
        assert_eq!(extract_amount("rs 1200 paid"), Some(Money::from_units(1200)));
        assert_eq!(extract_amount("RS.7"), Some(Money::from_units(7)));
        assert_eq!(extract_amount("Rs.  450"), None);
    }

    #[test]
    fn test_first_amount_wins() {
        assert_eq!(
            extract_amount("Rs. 300 paid, balance Rs. 9000"),
            Some(Money::from_units(300))
        );
    }

    #[test]
    fn test_overflowing_amount_is_absent() {
        assert_eq!(extract_amount("Rs. 99999999999999999999999 paid"), None);
    }

    #[test]
    fn test_bill_message() {
        let result = extract("Rs 1,200 electricity bill");
        assert_eq!(result.amount, Some(Money::from_units(1)));
        assert_eq!(result.category.as_str(), "Bills");
    }
}
