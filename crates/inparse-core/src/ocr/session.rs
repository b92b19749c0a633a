//! Per-request OCR engine ownership using `pure-onnx-ocr`.

use std::path::PathBuf;
use std::time::Instant;

use image::{DynamicImage, GenericImageView};
use tracing::{debug, info};

use crate::error::OcrError;
use crate::models::config::{ModelConfig, OcrConfig};

use super::{OcrResult, TextBox};

/// A loaded OCR engine scoped to one document.
///
/// Acquire one per request and let it drop when the request is done; the
/// engine and its model buffers are released on every exit path.
pub struct OcrSession {
    engine: pure_onnx_ocr::engine::OcrEngine,
    config: OcrConfig,
    model_dir: PathBuf,
}

impl OcrSession {
    /// Load the detection and recognition models from the model directory.
    pub fn acquire(models: &ModelConfig, config: &OcrConfig) -> Result<Self, OcrError> {
        let det_path = models.model_dir.join(&models.detection_model);
        let rec_path = models.model_dir.join(&models.recognition_model);
        let dict_path = models.model_dir.join(&models.dictionary);

        for path in [&det_path, &rec_path, &dict_path] {
            if !path.exists() {
                return Err(OcrError::ModelNotFound(path.clone()));
            }
        }

        let engine = pure_onnx_ocr::engine::OcrEngineBuilder::new()
            .det_model_path(&det_path)
            .rec_model_path(&rec_path)
            .dictionary_path(&dict_path)
            .build()
            .map_err(|e| OcrError::ModelLoad(format!("pure-onnx-ocr: {}", e)))?;

        debug!("Acquired OCR engine from {}", models.model_dir.display());

        Ok(Self {
            engine,
            config: config.clone(),
            model_dir: models.model_dir.clone(),
        })
    }

    /// Run detection and recognition over the whole image.
    pub fn recognize(&self, image: &DynamicImage) -> Result<OcrResult, OcrError> {
        let start = Instant::now();
        let (width, height) = image.dimensions();

        info!("Running OCR on {}x{} image", width, height);

        let regions = self
            .engine
            .run_from_image(image)
            .map_err(|e| OcrError::Recognition(format!("pure-onnx-ocr: {}", e)))?;

        debug!("pure-onnx-ocr returned {} text regions", regions.len());

        let boxes: Vec<TextBox> = regions
            .iter()
            .map(|r| TextBox {
                bbox: polygon_to_bbox(&r.bounding_box),
                text: if self.config.keep_unk {
                    r.text.clone()
                } else {
                    r.text.replace("[UNK]", " ")
                },
                score: r.confidence,
            })
            .collect();

        let mut result = OcrResult {
            boxes,
            text: String::new(),
            processing_time_ms: 0,
            image_size: (width, height),
        };
        result.sort_by_reading_order(self.config.line_tolerance);
        result.processing_time_ms = start.elapsed().as_millis() as u64;

        info!(
            "OCR complete: {} text boxes in {}ms",
            result.boxes.len(),
            result.processing_time_ms
        );

        Ok(result)
    }

    /// Convenience: recognized text only.
    pub fn extract_text(&self, image: &DynamicImage) -> Result<String, OcrError> {
        Ok(self.recognize(image)?.text)
    }
}

impl Drop for OcrSession {
    fn drop(&mut self) {
        debug!("Released OCR engine from {}", self.model_dir.display());
    }
}

/// Convert a `Polygon<f64>` to our `[f32; 8]` bbox format.
///
/// Takes the first 4 exterior points as `[x1, y1, x2, y2, x3, y3, x4, y4]`.
fn polygon_to_bbox(polygon: &pure_onnx_ocr::Polygon<f64>) -> [f32; 8] {
    let mut bbox = [0.0f32; 8];
    for (i, coord) in polygon.exterior().coords().take(4).enumerate() {
        bbox[i * 2] = coord.x as f32;
        bbox[i * 2 + 1] = coord.y as f32;
    }
    bbox
}
