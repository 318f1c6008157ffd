//! Rule-based categorization of bank SMS text
//!
//! - `rules`: the ordered keyword table mapping merchant words to categories.
//! - `sms`: amount extraction combined with the keyword rules.
//!
//! Both are pure functions: they never fail and never touch storage.

pub mod rules;
pub mod sms;

pub use rules::{categorize, CategoryRule, RULES};
pub use sms::{extract, extract_amount, SmsExtraction};
