use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;

use crate::auth::AuthUser;
use crate::models::dashboard::DashboardResponse;
use crate::models::user::ErrorResponse;
use crate::services::dashboard;
use crate::AppState;

pub async fn index(
    State(state): State<AppState>,
    identity: AuthUser,
) -> Result<Json<DashboardResponse>, (StatusCode, Json<ErrorResponse>)> {
    let today = Utc::now().date_naive();

    let response = dashboard::dashboard(&state.db, identity.user.id, today)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Database error: {}", e),
                }),
            )
        })?;

    Ok(Json(response))
}
