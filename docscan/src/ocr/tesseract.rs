use image::RgbImage;
use leptess::LepTess;
use tokio::sync::Mutex;
use tracing::info;

use crate::config::OcrConfig;
use crate::error::{DocscanError, Result};

use super::decode::encode_png;
use super::hocr::parse_hocr;
use super::recognizer::{TextRecognizer, TextRegion};

/// Tesseract-backed recognizer.
///
/// A single `LepTess` handle is loaded at startup. Tesseract keeps the current
/// image and recognition results inside the handle, so calls are serialised
/// through the mutex.
pub struct TesseractRecognizer {
    tesseract: Mutex<LepTess>,
}

impl TesseractRecognizer {
    pub fn new(config: &OcrConfig) -> Result<Self> {
        let lt = LepTess::new(config.data_path.as_deref(), &config.languages).map_err(|e| {
            DocscanError::OcrUnavailable(format!(
                "Tesseract failed to load languages '{}': {e}",
                config.languages
            ))
        })?;
        info!(languages = %config.languages, "Tesseract OCR initialized");

        Ok(Self {
            tesseract: Mutex::new(lt),
        })
    }
}

impl TextRecognizer for TesseractRecognizer {
    fn name(&self) -> &str {
        "tesseract"
    }

    fn recognize(&self, image: &RgbImage) -> Result<Vec<TextRegion>> {
        let png = encode_png(image)?;

        let mut lt = self.tesseract.blocking_lock();
        lt.set_image_from_mem(&png)
            .map_err(|e| DocscanError::Ocr(format!("Failed to set image: {e}")))?;
        let hocr = lt
            .get_hocr_text(0)
            .map_err(|e| DocscanError::Ocr(format!("Failed to extract text: {e}")))?;

        Ok(parse_hocr(&hocr))
    }
}
