use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;

use crate::models::dashboard::LandingResponse;
use crate::models::user::ErrorResponse;
use crate::services::dashboard;
use crate::AppState;

pub async fn index(
    State(state): State<AppState>,
) -> Result<Json<LandingResponse>, (StatusCode, Json<ErrorResponse>)> {
    let today = Utc::now().date_naive();

    let response = dashboard::landing(&state.db, today).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: format!("Database error: {}", e),
            }),
        )
    })?;

    Ok(Json(response))
}
