//! Common regex patterns for invoice field extraction.
//!
//! Digit and word classes are spelled out as ASCII so that non-ASCII digits
//! never reach the numeric parsers.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Invoice number: label, optional separator, then letters/digits/hyphens.
    // Case-insensitive as a whole, so the captured class takes lower case too.
    pub static ref INVOICE_NUMBER: Regex = Regex::new(
        r"(?i)(?:invoice\s?#|invoice\s?no|inv\s?#|invoice\snumber)\s*[:\-]?\s*([A-Z0-9\-]+)"
    ).unwrap();

    // Labeled date: numeric (14/03/2024, 3-14-24) or worded (March 5, 2023).
    pub static ref LABELED_DATE: Regex = Regex::new(
        r"(?i)(?:date|invoice\sdate)\s*[:\-]?\s*([0-9]{1,2}[\-/][0-9]{1,2}[\-/][0-9]{2,4}|[A-Za-z0-9_]+\s[0-9]{1,2},\s[0-9]{4})"
    ).unwrap();

    // Labeled total: label, optional separator, optional currency symbol,
    // then an integer or a two-decimal amount.
    pub static ref LABELED_TOTAL: Regex = Regex::new(
        r"(?i)(?:total|amount\s?due|balance)\s*[:\-]?\s*(?:[$€£]?\s?)([0-9]+(?:\.[0-9]{2})?)"
    ).unwrap();

    // Any currency-like token with exactly two fraction digits.
    pub static ref MONEY_AMOUNT: Regex = Regex::new(
        r"[$€£]?\s?[0-9]+\.[0-9]{2}"
    ).unwrap();
}
