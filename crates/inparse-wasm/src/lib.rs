//! WASM bindings for invoice field extraction.
//!
//! Text comes from the page (a PDF text layer or a browser-side OCR pass);
//! these bindings run the field rules over it.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use inparse_core::invoice::InvoiceExtractor as _;
use inparse_core::{ExtractedInvoice, InvoiceParser, OcrResult, TextBox};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Serialize with absent fields as `null`, not `undefined`.
fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Extract the four invoice fields from text.
///
/// Returns `{invoiceNumber, date, vendor, total}`, each a string or null.
#[wasm_bindgen]
pub fn extract_invoice_from_text(text: &str) -> Result<JsValue, JsValue> {
    to_js(&inparse_core::extract_invoice(text))
}

/// Invoice extractor class for browser use.
#[wasm_bindgen]
#[derive(Default)]
pub struct InvoiceExtractor {
    parser: InvoiceParser,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExtractionOutput {
    invoice: ExtractedInvoice,
    warnings: Vec<String>,
    processing_time_ms: u64,
}

#[wasm_bindgen]
impl InvoiceExtractor {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            parser: InvoiceParser::new(),
        }
    }

    /// Extract invoice fields from text.
    pub fn extract(&self, text: &str) -> Result<JsValue, JsValue> {
        to_js(&self.parser.extract_fields(text))
    }

    /// Extract with the list of missing fields and the parse time.
    #[wasm_bindgen(js_name = extractWithMetadata)]
    pub fn extract_with_metadata(&self, text: &str) -> Result<JsValue, JsValue> {
        let result = self.parser.parse(text);

        to_js(&ExtractionOutput {
            invoice: result.invoice,
            warnings: result.warnings,
            processing_time_ms: result.processing_time_ms,
        })
    }
}

/// Text fragments from browser-side OCR, put back in reading order.
#[wasm_bindgen]
pub struct OcrText {
    result: OcrResult,
    line_tolerance: f32,
}

#[wasm_bindgen]
impl OcrText {
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            result: OcrResult::empty(width, height),
            line_tolerance: 20.0,
        }
    }

    /// Pixels within which fragments count as one line.
    #[wasm_bindgen(js_name = setLineTolerance)]
    pub fn set_line_tolerance(&mut self, tolerance: f32) {
        self.line_tolerance = tolerance;
    }

    /// Add a recognized fragment at its axis-aligned position.
    #[wasm_bindgen(js_name = addBox)]
    pub fn add_box(&mut self, text: &str, x: f32, y: f32, width: f32, height: f32, score: f32) {
        self.result.boxes.push(TextBox {
            bbox: [x, y, x + width, y, x + width, y + height, x, y + height],
            text: text.to_string(),
            score,
        });
    }

    /// Add a whole line below everything added so far.
    #[wasm_bindgen(js_name = addLine)]
    pub fn add_line(&mut self, text: &str) {
        let next_y = self
            .result
            .boxes
            .iter()
            .map(|b| b.rect().3)
            .fold(0.0f32, f32::max)
            + self.line_tolerance;
        self.add_box(text, 0.0, next_y, 0.0, 1.0, 1.0);
    }

    /// Number of fragments added.
    #[wasm_bindgen(getter)]
    pub fn len(&self) -> usize {
        self.result.boxes.len()
    }

    /// Fragments joined line by line in reading order.
    pub fn text(&mut self) -> String {
        self.result.sort_by_reading_order(self.line_tolerance);
        self.result.text.clone()
    }

    /// Extract invoice fields from the fragments.
    pub fn extract(&mut self) -> Result<JsValue, JsValue> {
        self.result.sort_by_reading_order(self.line_tolerance);
        to_js(&InvoiceParser::new().extract(&self.result))
    }
}
