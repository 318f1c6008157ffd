//! Money type for representing currency amounts
//!
//! Internally stores amounts in minor units (i64 paise/cents) to avoid
//! floating-point precision issues when summing spend against a budget.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub};

/// Represents a monetary amount stored in hundredths of the currency unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from minor units
    ///
    /// # Examples
    /// ```
    /// use spendwise::models::Money;
    /// let amount = Money::from_cents(45050); // 450.50
    /// assert_eq!(amount.units(), 450);
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from whole units
    pub const fn from_units(units: i64) -> Self {
        Self(units * 100)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in minor units
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole units portion (truncated toward zero)
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Get the fractional portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Value as a float, for percentages and display only
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Parse a money amount from a string
    ///
    /// Accepts "450", "450.5", "450.50", "-12.00" and an optional leading
    /// `$`, `₹` or `Rs.` marker. Fractional digits beyond two are truncated.
    /// Values that overflow are rejected.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let s = s.trim();
        let invalid = || MoneyParseError::InvalidFormat(s.to_string());

        let (negative, rest) = match s.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, s),
        };

        let rest = rest
            .strip_prefix('$')
            .or_else(|| rest.strip_prefix('₹'))
            .or_else(|| rest.strip_prefix("Rs."))
            .unwrap_or(rest)
            .trim_start();

        let (whole, frac) = match rest.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (rest, ""),
        };

        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        if !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let whole: i64 = whole.parse().map_err(|_| invalid())?;
        let frac: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => frac[..2].parse().map_err(|_| invalid())?,
        };

        let cents = whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(frac))
            .ok_or_else(invalid)?;

        Ok(Self(if negative { -cents } else { cents }))
    }

    /// Add two amounts, or `None` if the result leaves the representable range
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Self(cents)),
            None => None,
        }
    }

    /// Format with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!(
            "{}{}{}.{:02}",
            sign,
            symbol,
            self.units().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.units().abs(), self.cents_part())
    }
}

// Operators saturate at the i64 bounds; totals that must be exact go
// through `checked_add`.
impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let m = Money::from_cents(1050);
        assert_eq!(m.cents(), 1050);
        assert_eq!(m.units(), 10);
        assert_eq!(m.cents_part(), 50);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(45000)), "450.00");
        assert_eq!(format!("{}", Money::from_cents(5)), "0.05");
        assert_eq!(format!("{}", Money::from_cents(-1050)), "-10.50");
        assert_eq!(Money::from_cents(120000).format_with_symbol("Rs."), "Rs.1200.00");
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("450").unwrap().cents(), 45000);
        assert_eq!(Money::parse("450.5").unwrap().cents(), 45050);
        assert_eq!(Money::parse("450.567").unwrap().cents(), 45056);
        assert_eq!(Money::parse("Rs. 99.99").unwrap().cents(), 9999);
        assert_eq!(Money::parse("-10.50").unwrap().cents(), -1050);
        assert_eq!(Money::parse("10.").unwrap().cents(), 1000);
    }

    #[test]
    fn test_parse_rejects_garbage_and_overflow() {
        assert!(Money::parse("").is_err());
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("1,000").is_err());
        assert!(Money::parse(".5").is_err());
        assert!(Money::parse("99999999999999999999").is_err());
        assert!(Money::parse("92233720368547758.08").is_err());
    }

    #[test]
    fn test_add_and_compare() {
        let total = Money::from_units(700) + Money::from_units(500);
        assert_eq!(total, Money::from_units(1200));
        assert!(total > Money::from_units(1000));
        assert_eq!(
            Money::from_units(700).checked_add(Money::from_units(500)),
            Some(total)
        );
    }

    #[test]
    fn test_large_amounts_do_not_wrap() {
        // Each half parses on its own; together they leave the i64 range
        let half = Money::parse("50000000000000000").unwrap();
        assert_eq!(half.checked_add(half), None);
        assert_eq!((half + half).cents(), i64::MAX);

        let mut running = half;
        running += half;
        assert_eq!(running.cents(), i64::MAX);
        assert_eq!((Money::from_cents(i64::MIN) - Money::from_cents(1)).cents(), i64::MIN);
    }

    #[test]
    fn test_serialization() {
        let m = Money::from_cents(1050);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "1050");

        let deserialized: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(m, deserialized);
    }
}
