// Shared fixtures for HTTP integration tests
use std::io::Cursor;
use std::sync::{Arc, Once};
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request};
use axum::Router;
use image::{DynamicImage, ImageFormat, RgbImage};

use docscan::api::{create_router, AppState};
use docscan::config::Config;
use docscan::error::{DocscanError, Result};
use docscan::mrz::{locate_zone, parse_zone, MrzReader, MrzRecord, MrzScanner};
use docscan::ocr::{BoundingBox, OcrEngine, TextRecognizer, TextRegion};
use docscan::services::ScanService;

static INIT: Once = Once::new();

/// Initialize tracing subscriber once for tests
pub fn init_test_logger() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

pub const BOUNDARY: &str = "docscan-boundary";

pub const TD3_LINES: [&str; 2] = [
    "P<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<",
    "L898902C36UTO7408122F1204159ZE184226B<<<<<10",
];

/// Returns the same regions for every image.
pub struct StubRecognizer(pub Vec<(&'static str, f64)>);

impl TextRecognizer for StubRecognizer {
    fn name(&self) -> &str {
        "stub"
    }

    fn recognize(&self, _image: &RgbImage) -> Result<Vec<TextRegion>> {
        Ok(self
            .0
            .iter()
            .map(|(text, confidence)| TextRegion::new(BoundingBox::default(), *text, *confidence))
            .collect())
    }
}

pub struct BrokenRecognizer;

impl TextRecognizer for BrokenRecognizer {
    fn name(&self) -> &str {
        "broken"
    }

    fn recognize(&self, _image: &RgbImage) -> Result<Vec<TextRegion>> {
        Err(DocscanError::Ocr("tesseract handle poisoned".into()))
    }
}

/// Pretends every image carries the given MRZ text.
pub struct StubMrzReader(pub Option<String>);

impl MrzReader for StubMrzReader {
    fn name(&self) -> &str {
        "stub-mrz"
    }

    fn read(&self, _image_bytes: &[u8]) -> Result<Option<MrzRecord>> {
        Ok(self
            .0
            .as_deref()
            .and_then(locate_zone)
            .and_then(|zone| parse_zone(&zone)))
    }
}

pub struct BrokenMrzReader;

impl MrzReader for BrokenMrzReader {
    fn name(&self) -> &str {
        "broken-mrz"
    }

    fn read(&self, _image_bytes: &[u8]) -> Result<Option<MrzRecord>> {
        Err(DocscanError::Mrz("leptonica could not read image".into()))
    }
}

pub fn app(recognizer: Arc<dyn TextRecognizer>, mrz: MrzScanner) -> Router {
    init_test_logger();
    let ocr = OcrEngine::with_recognizer(recognizer, Duration::from_secs(5));
    create_router(AppState::new(Config::default(), ScanService::new(ocr, mrz)))
}

pub fn no_mrz() -> MrzScanner {
    MrzScanner::unavailable("disabled for tests", Duration::from_secs(1))
}

pub fn mrz_reader(reader: Arc<dyn MrzReader>) -> MrzScanner {
    MrzScanner::with_reader(reader, Duration::from_secs(5))
}

pub fn png_bytes() -> Vec<u8> {
    let mut out = Vec::new();
    DynamicImage::ImageRgb8(RgbImage::new(8, 4))
        .write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
        .unwrap();
    out
}

pub fn multipart_request(field: &str, payload: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{field}\"; filename=\"doc.png\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: image/png\r\n\r\n");
    body.extend_from_slice(payload);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/ocr")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .header(header::CONTENT_LENGTH, body.len())
        .body(Body::from(body))
        .unwrap()
}

pub fn json_request(body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/ocr")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
