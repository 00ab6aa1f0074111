//! Pulls image bytes out of an `/ocr` request.
//!
//! Two request shapes are accepted:
//! - `multipart/form-data` with a field named `image`
//! - a JSON object `{"image": "<base64>"}`, where the value may be a data URL
//!   (`data:image/png;base64,....`)
//!
//! Anything else, or either shape without an image, is `MissingImage`.

use axum::body::Bytes;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use base64::{engine::general_purpose::STANDARD, Engine};
use serde_json::Value;

use crate::error::{DocscanError, Result};

pub const IMAGE_FIELD: &str = "image";

/// JSON form of an `/ocr` request, as documented in the OpenAPI schema.
///
/// Bodies are read as untyped JSON so that a missing or non-string `image`
/// is reported as `MissingImage` rather than a parse error.
#[derive(Debug, Clone, utoipa::ToSchema)]
pub struct OcrJsonRequest {
    /// Base64 image payload, optionally prefixed as a data URL.
    pub image: String,
}

pub async fn load_image<S>(request: Request, state: &S) -> Result<Vec<u8>>
where
    S: Send + Sync,
{
    let content_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_ascii_lowercase())
        .unwrap_or_default();

    if content_type.starts_with("multipart/form-data") {
        let multipart = Multipart::from_request(request, state)
            .await
            .map_err(|e| body_error(e.status(), format!("Invalid multipart body: {e}")))?;
        return read_multipart(multipart).await;
    }

    if is_json_content_type(&content_type) {
        let body = Bytes::from_request(request, state)
            .await
            .map_err(|e| body_error(e.status(), format!("Failed to read request body: {e}")))?;
        return read_json(&body);
    }

    Err(DocscanError::MissingImage)
}

async fn read_multipart(mut multipart: Multipart) -> Result<Vec<u8>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| body_error(e.status(), format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let bytes = field
            .bytes()
            .await
            .map_err(|e| body_error(e.status(), format!("Failed to read image field: {e}")))?;
        return Ok(bytes.to_vec());
    }

    Err(DocscanError::MissingImage)
}

/// Body-limit hits keep their 413; every other read failure is a bad request.
fn body_error(status: StatusCode, message: String) -> DocscanError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        DocscanError::PayloadTooLarge
    } else {
        DocscanError::Validation(message)
    }
}

fn read_json(body: &[u8]) -> Result<Vec<u8>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(DocscanError::MissingImage);
    }

    let value: Value = serde_json::from_slice(body)
        .map_err(|e| DocscanError::Validation(format!("Invalid JSON: {e}")))?;

    let encoded = value
        .get(IMAGE_FIELD)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .ok_or(DocscanError::MissingImage)?;

    decode_base64_image(encoded)
}

/// `application/json` and any `+json` suffix type.
fn is_json_content_type(content_type: &str) -> bool {
    let essence = content_type.split(';').next().unwrap_or_default().trim();
    essence == "application/json" || essence.ends_with("+json")
}

/// Decode a base64 payload, dropping any data-URL prefix up to the first comma.
pub fn decode_base64_image(encoded: &str) -> Result<Vec<u8>> {
    let payload = encoded
        .split_once(',')
        .map(|(_, rest)| rest)
        .unwrap_or(encoded);
    let payload: String = payload
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    Ok(STANDARD.decode(payload)?)
}
