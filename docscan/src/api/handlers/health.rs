use axum::extract::State;
use axum::Json;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;

/// `GET /health`
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Engine availability", body = HealthResponse),
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        easyocr: state.scanner.ocr().is_ready(),
        passporteye: state.scanner.mrz().is_available(),
    })
}
