use axum::extract::{Request, State};
use axum::Json;
use tracing::{info_span, warn, Instrument};
use uuid::Uuid;

use crate::api::dto::{ErrorResponse, OcrResponse};
use crate::api::loader::{load_image, OcrJsonRequest};
use crate::api::state::AppState;
use crate::error::Result;

/// `POST /ocr`
///
/// Accepts either a multipart form with an `image` file field or a JSON body
/// `{"image": "<base64>"}`.
#[utoipa::path(
    post,
    path = "/ocr",
    tag = "ocr",
    request_body(content_type = "application/json", content = OcrJsonRequest, description = "Base64 image (data URLs accepted). A multipart/form-data body with an `image` field is also accepted"),
    responses(
        (status = 200, description = "Recognized text and optional MRZ", body = OcrResponse),
        (status = 400, description = "Missing or undecodable image", body = ErrorResponse),
        (status = 500, description = "OCR engine failure", body = ErrorResponse),
    )
)]
pub async fn run_ocr(State(state): State<AppState>, request: Request) -> Result<Json<OcrResponse>> {
    let request_id = Uuid::new_v4();
    let span = info_span!("ocr_request", %request_id);

    async move {
        let image_bytes = load_image(request, &state).await.map_err(|e| {
            warn!(error = %e, "Rejected OCR request");
            e
        })?;
        let result = state.scanner.scan(image_bytes).await?;
        Ok(Json(OcrResponse::assemble(result)))
    }
    .instrument(span)
    .await
}
