//! Total amount extraction.
//!
//! Two tiers. A labeled total ("Total", "Amount due", "Balance") wins when
//! present. Otherwise the largest two-decimal money token anywhere in the
//! text is taken as the total.
//!
//! Known limitation: an invoice whose line items or subtotals exceed the
//! true total will report the larger figure when no labeled total matches.

use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::{debug, trace};

use super::patterns::{LABELED_TOTAL, MONEY_AMOUNT};
use super::{ExtractionMatch, FieldExtractor};

/// Money token extractor used by the fallback tier.
pub struct AmountExtractor;

impl AmountExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AmountExtractor {
    type Output = ExtractionMatch<Decimal>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        MONEY_AMOUNT
            .find_iter(text)
            .filter_map(|m| match parse_amount(m.as_str()) {
                Some(amount) => {
                    Some(ExtractionMatch::new(amount, m.as_str()).with_position(m.start(), m.end()))
                }
                None => {
                    trace!("Skipping unparseable amount token {:?}", m.as_str());
                    None
                }
            })
            .collect()
    }
}

/// Where a total came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TotalSource {
    /// Found after a total label.
    Labeled,
    /// Largest money token in the text.
    LargestAmount,
}

/// An extracted total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Total {
    /// Amount as text, without currency symbol.
    pub value: String,
    /// Which tier produced it.
    pub source: TotalSource,
}

/// Labeled total extractor (the primary tier).
pub struct TotalExtractor;

impl TotalExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TotalExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for TotalExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        LABELED_TOTAL
            .captures_iter(text)
            .filter_map(|caps| {
                let amount = caps.get(1)?;
                if continues_digit_group(&text[amount.end()..]) {
                    debug!(
                        "Rejecting labeled total {:?}: thousands separators are not supported",
                        &caps[0]
                    );
                    return None;
                }
                Some(
                    ExtractionMatch::new(amount.as_str().to_string(), &caps[0])
                        .with_position(amount.start(), amount.end()),
                )
            })
            .collect()
    }
}

/// Extract the invoice total from text.
pub fn extract_total(text: &str) -> Option<Total> {
    if let Some(labeled) = TotalExtractor::new().extract(text) {
        return Some(Total {
            value: labeled.value,
            source: TotalSource::Labeled,
        });
    }

    let largest = AmountExtractor::new()
        .extract_all(text)
        .into_iter()
        .map(|m| m.value)
        .max()?;

    debug!("No labeled total, using largest amount {}", largest);

    Some(Total {
        value: format_amount(largest),
        source: TotalSource::LargestAmount,
    })
}

/// Parse a money token, dropping currency symbols and whitespace.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    Decimal::from_str(&cleaned).ok()
}

/// Format an amount with exactly two fraction digits.
pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", amount)
}

/// True when text resumes a digit group, as in the ",234.56" of "1,234.56".
fn continues_digit_group(rest: &str) -> bool {
    let mut chars = rest.chars();
    chars.next() == Some(',') && chars.next().is_some_and(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn total(text: &str) -> Option<String> {
        extract_total(text).map(|t| t.value)
    }

    #[test]
    fn test_labeled_total() {
        assert_eq!(total("Total: $99.95"), Some("99.95".to_string()));
        assert_eq!(total("AMOUNT DUE - € 1200"), Some("1200".to_string()));
        assert_eq!(total("Amountdue £7.10"), Some("7.10".to_string()));
        assert_eq!(total("Balance 42.00"), Some("42.00".to_string()));
        assert_eq!(
            extract_total("Total 5.00").unwrap().source,
            TotalSource::Labeled
        );
    }

    #[test]
    fn test_labeled_total_is_verbatim() {
        // A labeled total is not reformatted.
        assert_eq!(total("Total: 15"), Some("15".to_string()));
        assert_eq!(total("Total: 007.50"), Some("007.50".to_string()));
    }

    #[test]
    fn test_labeled_wins_over_larger_amounts() {
        let text = "Item $500.00\nTotal: $120.00";
        assert_eq!(total(text), Some("120.00".to_string()));
    }

    #[test]
    fn test_one_fraction_digit_truncated() {
        // Only 0 or 2 fraction digits are captured.
        assert_eq!(total("Total: 12.5"), Some("12".to_string()));
    }

    #[test]
    fn test_thousands_separator_falls_back() {
        let found = extract_total("Total: $1,234.56").unwrap();
        assert_eq!(found.value, "234.56");
        assert_eq!(found.source, TotalSource::LargestAmount);
    }

    #[test]
    fn test_thousands_separator_skips_to_next_label() {
        let text = "Subtotal: $1,000.00\nBalance: $50.00";
        assert_eq!(total(text), Some("50.00".to_string()));
    }

    #[test]
    fn test_fallback_largest_amount() {
        let text = "Item A $12.50\nItem B $45.00\nTotal due later";
        let found = extract_total(text).unwrap();
        assert_eq!(found.value, "45.00");
        assert_eq!(found.source, TotalSource::LargestAmount);
    }

    #[test]
    fn test_fallback_formats_two_digits() {
        assert_eq!(total("fee € 007.00 and 3.10"), Some("7.00".to_string()));
    }

    #[test]
    fn test_no_amounts() {
        assert_eq!(total("Thank you for your business"), None);
        assert_eq!(total("Qty 3, ref 12.5"), None);
        assert_eq!(total(""), None);
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("$ 12.50"), Some(Decimal::new(1250, 2)));
        assert_eq!(parse_amount("€9.99"), Some(Decimal::new(999, 2)));
        assert_eq!(parse_amount("$"), None);
    }

    #[test]
    fn test_extract_all_amounts() {
        let amounts = AmountExtractor::new().extract_all("$1.00, € 2.50 and 3.75");
        let values: Vec<_> = amounts.into_iter().map(|m| m.value).collect();
        assert_eq!(
            values,
            vec![Decimal::new(100, 2), Decimal::new(250, 2), Decimal::new(375, 2)]
        );
    }
}
