//! The extracted invoice record.

use serde::{Deserialize, Serialize};

/// Best-guess invoice fields pulled from one document's text.
///
/// Every field is either absent or a non-empty trimmed string. Absent fields
/// serialize as `null` so the JSON object always carries all four keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedInvoice {
    /// Token following an invoice-number label.
    pub invoice_number: Option<String>,

    /// Date token following a date label, as written.
    pub date: Option<String>,

    /// First non-blank line of the document.
    pub vendor: Option<String>,

    /// Total amount as formatted text, without currency symbol.
    pub total: Option<String>,
}

impl ExtractedInvoice {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no field was extracted.
    pub fn is_empty(&self) -> bool {
        self.fields().iter().all(|(_, value)| value.is_none())
    }

    /// Number of fields that were extracted.
    pub fn found_count(&self) -> usize {
        self.fields().iter().filter(|(_, value)| value.is_some()).count()
    }

    /// Field names paired with their values, in serialization order.
    pub fn fields(&self) -> [(&'static str, Option<&str>); 4] {
        [
            ("invoiceNumber", self.invoice_number.as_deref()),
            ("date", self.date.as_deref()),
            ("vendor", self.vendor.as_deref()),
            ("total", self.total.as_deref()),
        ]
    }

    /// Human-readable names of the fields that could not be extracted.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.invoice_number.is_none() {
            missing.push("invoice number");
        }
        if self.date.is_none() {
            missing.push("date");
        }
        if self.vendor.is_none() {
            missing.push("vendor");
        }
        if self.total.is_none() {
            missing.push("total");
        }
        missing
    }
}
