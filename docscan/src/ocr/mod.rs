//! Text recognition
//!
//! Decodes uploads into RGB pixel grids and runs them through the
//! process-wide recognition engine.
//!
//! # Architecture
//!
//! - `TextRecognizer` trait defines the blocking engine interface
//! - `TesseractRecognizer` implements it via leptess, reading hOCR output
//! - `OcrEngine` owns the shared recognizer, moving calls onto the blocking
//!   pool under a timeout
//! - `RecognitionSummary` trims, filters and aggregates engine regions
//!
//! # Configuration
//!
//! Controlled via `OcrConfig` (see `config.rs`):
//! - `languages`: Tesseract language codes, `eng` by default
//! - `data_path`: traineddata directory
//! - `timeout_secs`: per-request recognition timeout

mod decode;
mod engine;
mod hocr;
mod recognizer;
mod summary;
mod tesseract;

pub use decode::{decode_image, encode_png, DecodedImage};
pub use engine::OcrEngine;
pub use hocr::parse_hocr;
pub use recognizer::{BoundingBox, TextRecognizer, TextRegion};
pub use summary::{RecognitionLine, RecognitionSummary};
pub use tesseract::TesseractRecognizer;
