//! Rule-based field extractors.
//!
//! Each rule is pure: it reads the whole text and reports its first match,
//! or nothing. A rule never fails.

pub mod amounts;
pub mod dates;
pub mod number;
pub mod patterns;
pub mod vendor;

pub use amounts::{
    extract_total, format_amount, parse_amount, AmountExtractor, Total, TotalExtractor,
    TotalSource,
};
pub use dates::{extract_date, DateExtractor};
pub use number::{extract_invoice_number, InvoiceNumberExtractor};
pub use patterns::*;
pub use vendor::{extract_vendor, VendorExtractor};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the first occurrence of the field.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field, in text order.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A value together with where it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Byte range of the value in the source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched, label included.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, source: impl Into<String>) -> Self {
        Self {
            value,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}
