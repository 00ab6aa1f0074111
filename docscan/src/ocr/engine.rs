use std::sync::Arc;
use std::time::Duration;

use image::RgbImage;

use crate::config::OcrConfig;
use crate::error::{DocscanError, Result};

use super::recognizer::{TextRecognizer, TextRegion};
use super::tesseract::TesseractRecognizer;

/// Process-wide handle to the loaded text recognition engine.
///
/// Cloning is cheap; all clones share the same recognizer.
#[derive(Clone)]
pub struct OcrEngine {
    recognizer: Arc<dyn TextRecognizer>,
    timeout: Duration,
}

impl OcrEngine {
    /// Load Tesseract with the configured languages. Fails when the engine
    /// cannot be initialised; the service does not start without it.
    pub fn new(config: &OcrConfig) -> Result<Self> {
        let recognizer = TesseractRecognizer::new(config)?;
        Ok(Self::with_recognizer(
            Arc::new(recognizer),
            Duration::from_secs(config.timeout_secs),
        ))
    }

    pub fn with_recognizer(recognizer: Arc<dyn TextRecognizer>, timeout: Duration) -> Self {
        Self {
            recognizer,
            timeout,
        }
    }

    pub fn name(&self) -> &str {
        self.recognizer.name()
    }

    /// Always true once constructed; kept for the health report.
    pub fn is_ready(&self) -> bool {
        true
    }

    pub async fn recognize(&self, image: Arc<RgbImage>) -> Result<Vec<TextRegion>> {
        let recognizer = Arc::clone(&self.recognizer);
        let task = tokio::task::spawn_blocking(move || recognizer.recognize(&image));

        match tokio::time::timeout(self.timeout, task).await {
            Ok(joined) => joined.map_err(|e| DocscanError::Ocr(format!("OCR task panicked: {e}")))?,
            Err(_) => Err(DocscanError::Ocr(format!(
                "OCR operation timed out after {} seconds",
                self.timeout.as_secs()
            ))),
        }
    }
}
