use utoipa::OpenApi;

use super::dto;
use super::handlers;
use super::loader;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Docscan API",
        version = "0.1.0",
        description = "Text recognition and machine-readable zone extraction for document images.",
    ),
    paths(
        handlers::health::health_check,
        handlers::ocr::run_ocr,
    ),
    components(schemas(
        dto::OcrResponse,
        dto::HealthResponse,
        dto::ErrorResponse,
        loader::OcrJsonRequest,
        crate::ocr::RecognitionLine,
        crate::mrz::MrzRecord,
        crate::mrz::MrzType,
    )),
    tags(
        (name = "health", description = "Service health"),
        (name = "ocr", description = "Text and MRZ recognition"),
    )
)]
pub struct ApiDoc;
