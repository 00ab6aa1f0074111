use std::sync::Arc;

use tracing::info;

use crate::error::Result;
use crate::mrz::{MrzOutcome, MrzScanner};
use crate::ocr::{decode_image, OcrEngine, RecognitionSummary};

/// Output of one pass over an uploaded image.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanResult {
    pub text: RecognitionSummary,
    pub mrz: MrzOutcome,
}

/// Runs an upload through decode, text recognition and MRZ detection.
///
/// Holds the process-wide engine handles; cloning is cheap.
#[derive(Clone)]
pub struct ScanService {
    ocr: OcrEngine,
    mrz: MrzScanner,
}

impl ScanService {
    pub fn new(ocr: OcrEngine, mrz: MrzScanner) -> Self {
        Self { ocr, mrz }
    }

    pub fn ocr(&self) -> &OcrEngine {
        &self.ocr
    }

    pub fn mrz(&self) -> &MrzScanner {
        &self.mrz
    }

    /// Decode failures and OCR engine failures are returned as errors; MRZ
    /// problems only ever show up in [`ScanResult::mrz`].
    pub async fn scan(&self, image_bytes: Vec<u8>) -> Result<ScanResult> {
        info!(bytes = image_bytes.len(), "Received image");

        let decoded = decode_image(&image_bytes)?;
        let (width, height) = decoded.dimensions();
        info!(
            engine = %self.ocr.name(),
            width,
            height,
            mime_type = decoded.mime_type.unwrap_or("unknown"),
            "Running text recognition"
        );

        let regions = self.ocr.recognize(Arc::new(decoded.pixels)).await?;
        let text = RecognitionSummary::from_regions(regions);
        info!(
            regions = text.lines.len(),
            avg_confidence = text.average_confidence,
            "Text recognition complete"
        );

        let mrz = self.mrz.scan(Arc::from(image_bytes)).await;
        info!(mrz = mrz.label(), "Scan complete");

        Ok(ScanResult { text, mrz })
    }
}
