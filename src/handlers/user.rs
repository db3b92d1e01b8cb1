use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use sea_orm::EntityTrait;

use crate::auth::{AuthUser, Permission};
use crate::entities::prelude::*;
use crate::models::user::{ErrorResponse, UserResponse};
use crate::AppState;

pub async fn index(
    State(state): State<AppState>,
    identity: AuthUser,
) -> Result<Json<Vec<UserResponse>>, (StatusCode, Json<ErrorResponse>)> {
    identity.require(Permission::ManageUsers)?;

    let users = Users::find()
        .find_with_related(Donations)
        .all(&state.db)
        .await
        .map_err(db_error)?;

    Ok(Json(
        users
            .into_iter()
            .map(|(user, donations)| UserResponse::from_model(user, donations))
            .collect(),
    ))
}

pub async fn destroy(
    State(state): State<AppState>,
    identity: AuthUser,
    Path(id): Path<i32>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    identity.require(Permission::ManageUsers)?;

    let result = Users::delete_by_id(id)
        .exec(&state.db)
        .await
        .map_err(db_error)?;

    if result.rows_affected == 0 {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("User {} not found", id),
            }),
        ));
    }

    tracing::info!("User {} deleted", id);
    Ok(StatusCode::NO_CONTENT)
}

fn db_error(e: sea_orm::DbErr) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: format!("Database error: {}", e),
        }),
    )
}
