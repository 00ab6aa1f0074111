use serde::Serialize;

use crate::mrz::MrzRecord;
use crate::ocr::RecognitionLine;
use crate::services::ScanResult;

/// Body of a successful `POST /ocr`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct OcrResponse {
    pub success: bool,
    /// Line texts joined with `\n`.
    pub raw_text: String,
    pub lines: Vec<RecognitionLine>,
    /// Mean line confidence on a 0-100 scale.
    pub confidence: f64,
    /// Parsed machine-readable zone, or `null` when none was read.
    pub mrz: Option<MrzRecord>,
}

impl OcrResponse {
    pub fn assemble(result: ScanResult) -> Self {
        let ScanResult { text, mrz } = result;
        Self {
            success: true,
            raw_text: text.raw_text,
            lines: text.lines,
            confidence: text.average_confidence,
            mrz: mrz.into_record(),
        }
    }
}

/// Body of `GET /health`. Field names are part of the public contract.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    /// Text recognition engine loaded.
    pub easyocr: bool,
    /// MRZ detection available.
    pub passporteye: bool,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}
