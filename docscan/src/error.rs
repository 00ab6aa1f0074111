use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocscanError {
    #[error("No image provided")]
    MissingImage,

    #[error("Invalid base64 image data: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("Invalid image: {0}")]
    Decode(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Request body too large")]
    PayloadTooLarge,

    #[error("OCR error: {0}")]
    Ocr(String),

    #[error("OCR unavailable: {0}")]
    OcrUnavailable(String),

    #[error("MRZ error: {0}")]
    Mrz(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl DocscanError {
    pub fn status(&self) -> StatusCode {
        match self {
            DocscanError::MissingImage
            | DocscanError::InvalidBase64(_)
            | DocscanError::Decode(_)
            | DocscanError::Validation(_) => StatusCode::BAD_REQUEST,
            DocscanError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            DocscanError::OcrUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            DocscanError::Ocr(_) | DocscanError::Mrz(_) | DocscanError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for DocscanError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            DocscanError::MissingImage
            | DocscanError::InvalidBase64(_)
            | DocscanError::Decode(_)
            | DocscanError::PayloadTooLarge => self.to_string(),
            DocscanError::Validation(msg) | DocscanError::OcrUnavailable(msg) => msg.clone(),
            DocscanError::Ocr(_) => {
                tracing::error!(error = %self, "OCR request failed");
                "OCR processing failed".to_string()
            }
            DocscanError::Mrz(_) | DocscanError::Internal(_) => {
                tracing::error!(error = %self, "Internal error mapped to response");
                "An internal error occurred".to_string()
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, DocscanError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(err: DocscanError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn missing_image_has_exact_body() {
        let (status, body) = body_json(DocscanError::MissingImage).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "No image provided" }));
    }

    #[tokio::test]
    async fn decode_error_is_bad_request() {
        let (status, body) = body_json(DocscanError::Decode("truncated PNG".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid image: truncated PNG");
    }

    #[tokio::test]
    async fn ocr_failure_does_not_leak_details() {
        let (status, body) = body_json(DocscanError::Ocr("tesseract segfault at 0x0".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "OCR processing failed" }));
    }

    #[tokio::test]
    async fn oversized_body_maps_to_413() {
        let (status, body) = body_json(DocscanError::PayloadTooLarge).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body, json!({ "error": "Request body too large" }));
    }

    #[tokio::test]
    async fn unavailable_maps_to_503() {
        let (status, _) = body_json(DocscanError::OcrUnavailable("no engine".into())).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn base64_errors_convert() {
        use base64::Engine;
        let err = base64::engine::general_purpose::STANDARD
            .decode("%%%")
            .unwrap_err();
        let err: DocscanError = err.into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
