//! End-to-end checks of the field rules and the document pipeline.

use inparse_core::{
    extract_invoice, process_document, Document, DocumentTextSource, ExtractedInvoice,
    InvoiceParser, MediaType, ProcessError,
};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Object, Stream};
use pretty_assertions::assert_eq;

const SAMPLE: &str = "\n\nAcme Corp\n123 Main Street\nInvoice #: AB-1234\nInvoice Date: 03/14/2024\nTax: $9.50\nTotal: $99.50\n";

fn invoice_pdf(lines: &[&str]) -> Vec<u8> {
    let mut doc = lopdf::Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), 12.into()]),
        Operation::new("Td", vec![72.into(), 720.into()]),
    ];
    for line in lines {
        operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
        operations.push(Operation::new("Td", vec![0.into(), (-20).into()]));
    }
    operations.push(Operation::new("ET", vec![]));

    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

#[test]
fn full_invoice() {
    let invoice = extract_invoice(SAMPLE);

    assert_eq!(
        invoice,
        ExtractedInvoice {
            invoice_number: Some("AB-1234".to_string()),
            date: Some("03/14/2024".to_string()),
            vendor: Some("Acme Corp".to_string()),
            total: Some("99.50".to_string()),
        }
    );
}

#[test]
fn extraction_is_idempotent() {
    let parser = InvoiceParser::new();
    for text in [SAMPLE, "", "Total: $1,234.56", "Item A $12.50\nItem B $45.00"] {
        assert_eq!(parser.extract_fields(text), parser.extract_fields(text));
    }
}

#[test]
fn present_fields_are_never_empty() {
    let inputs = [
        "",
        "   ",
        "\n\n\n",
        "Invoice #:",
        "Date:",
        "Total:",
        "Invoice # -",
        "$.50 $1. 3.5",
        "Amount Due: £",
    ];
    for text in inputs {
        let invoice = extract_invoice(text);
        for (name, value) in invoice.fields() {
            if let Some(value) = value {
                assert!(!value.is_empty(), "{name} is empty for {text:?}");
            }
        }
    }
}

#[test]
fn empty_input() {
    assert_eq!(extract_invoice(""), ExtractedInvoice::default());
}

#[test]
fn vendor_skips_leading_blank_lines() {
    let invoice = extract_invoice("\n   \n\t\nAcme Corp\nInvoice #: 9");
    assert_eq!(invoice.vendor.as_deref(), Some("Acme Corp"));
}

#[test]
fn invoice_number() {
    let invoice = extract_invoice("Bill\nInvoice #: AB-1234\n");
    assert_eq!(invoice.invoice_number.as_deref(), Some("AB-1234"));

    let invoice = extract_invoice("Bill\nReference 77\n");
    assert_eq!(invoice.invoice_number, None);
}

#[test]
fn dates() {
    let invoice = extract_invoice("Invoice Date: 03/14/2024");
    assert_eq!(invoice.date.as_deref(), Some("03/14/2024"));

    let invoice = extract_invoice("Date - March 5, 2023");
    assert_eq!(invoice.date.as_deref(), Some("March 5, 2023"));
}

#[test]
fn thousands_separator_falls_back_to_largest_amount() {
    // The labeled rule does not read "1,234.56"; the fallback finds the
    // largest two-decimal token, which is the tail after the comma.
    let invoice = extract_invoice("Total: $1,234.56");
    assert_eq!(invoice.total.as_deref(), Some("234.56"));
}

#[test]
fn fallback_takes_largest_amount() {
    let invoice = extract_invoice("Item A $12.50\nItem B $45.00\nTotal due later");
    assert_eq!(invoice.total.as_deref(), Some("45.00"));
}

#[test]
fn no_amounts() {
    let invoice = extract_invoice("Acme Corp\nThank you for your business");
    assert_eq!(invoice.total, None);
}

#[test]
fn record_serializes_with_all_four_keys() {
    let json = serde_json::to_value(extract_invoice("Acme Corp")).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "invoiceNumber": null,
            "date": null,
            "vendor": "Acme Corp",
            "total": null,
        })
    );
}

#[test]
fn pdf_through_pipeline() {
    let bytes = invoice_pdf(&[
        "Acme Corp",
        "Invoice #: INV-42",
        "Date: 01/15/2024",
        "Total: $250.00",
    ]);
    let document = Document::new(bytes, MediaType::Pdf);

    let result =
        process_document(&DocumentTextSource::default(), &InvoiceParser::new(), &document).unwrap();

    assert_eq!(result.invoice.vendor.as_deref(), Some("Acme Corp"));
    assert_eq!(result.invoice.invoice_number.as_deref(), Some("INV-42"));
    assert_eq!(result.invoice.date.as_deref(), Some("01/15/2024"));
    assert_eq!(result.invoice.total.as_deref(), Some("250.00"));
}

#[test]
fn corrupt_pdf_is_extraction_failure() {
    let document = Document::new(b"not a pdf at all".to_vec(), MediaType::Pdf);
    let err = process_document(&DocumentTextSource::default(), &InvoiceParser::new(), &document)
        .unwrap_err();

    assert!(matches!(err, ProcessError::ExtractionFailure(_)));
    assert_eq!(
        err.client_message(),
        "An error occurred while processing the file."
    );
}
