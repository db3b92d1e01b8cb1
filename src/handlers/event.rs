use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, QueryFilter, QueryOrder,
};

use crate::auth::{AuthUser, Permission};
use crate::entities::{donations, events, prelude::*};
use crate::models::event::{
    CreateEventRequest, DonatorEntry, EventDetailResponse, EventResponse, UpdateEventRequest,
};
use crate::models::user::ErrorResponse;
use crate::AppState;

pub async fn index(
    State(state): State<AppState>,
    _identity: AuthUser,
) -> Result<Json<Vec<EventResponse>>, (StatusCode, Json<ErrorResponse>)> {
    let events = Events::find()
        .find_with_related(Donations)
        .all(&state.db)
        .await
        .map_err(db_error)?;

    Ok(Json(
        events
            .into_iter()
            .map(|(event, donations)| EventResponse::from_model(event, donations))
            .collect(),
    ))
}

pub async fn show(
    State(state): State<AppState>,
    _identity: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<EventDetailResponse>, (StatusCode, Json<ErrorResponse>)> {
    let event = Events::find_by_id(id)
        .one(&state.db)
        .await
        .map_err(db_error)?
        .ok_or_else(|| not_found(id))?;

    let donations = Donations::find()
        .filter(donations::Column::EventId.eq(id))
        .order_by_desc(donations::Column::Amount)
        .find_also_related(Users)
        .all(&state.db)
        .await
        .map_err(db_error)?;

    let donators = donations
        .iter()
        .map(|(donation, user)| DonatorEntry {
            donation_id: donation.id,
            amount: donation.amount,
            date: donation.date,
            status: donation.status.clone(),
            user: user.clone(),
        })
        .collect();

    let donation_rows = donations.into_iter().map(|(d, _)| d).collect();

    Ok(Json(EventDetailResponse {
        event: EventResponse::from_model(event, donation_rows),
        donators,
    }))
}

pub async fn store(
    State(state): State<AppState>,
    identity: AuthUser,
    Json(payload): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<events::Model>), (StatusCode, Json<ErrorResponse>)> {
    identity.require(Permission::ManageEvents)?;

    if payload.donation_goal < Decimal::ZERO {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse {
                error: "Donation goal must not be negative".to_string(),
            }),
        ));
    }

    let event = events::ActiveModel {
        title: Set(payload.title),
        description: Set(payload.description),
        date: Set(payload.date),
        image: Set(payload.image),
        donation_goal: Set(payload.donation_goal),
        location: Set(payload.location),
        category: Set(payload.category),
        ..Default::default()
    }
    .insert(&state.db)
    .await
    .map_err(db_error)?;

    tracing::info!("Event {} created: {}", event.id, event.title);
    Ok((StatusCode::CREATED, Json(event)))
}

pub async fn update(
    State(state): State<AppState>,
    identity: AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateEventRequest>,
) -> Result<Json<events::Model>, (StatusCode, Json<ErrorResponse>)> {
    identity.require(Permission::ManageEvents)?;

    if payload.donation_goal < Decimal::ZERO {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse {
                error: "Donation goal must not be negative".to_string(),
            }),
        ));
    }

    let event = Events::find_by_id(id)
        .one(&state.db)
        .await
        .map_err(db_error)?
        .ok_or_else(|| not_found(id))?;

    let mut active: events::ActiveModel = event.into();
    active.title = Set(payload.title);
    active.description = Set(payload.description);
    active.date = Set(payload.date);
    active.image = Set(payload.image);
    active.donation_goal = Set(payload.donation_goal);
    active.location = Set(payload.location);
    active.category = Set(payload.category);

    let updated = active.update(&state.db).await.map_err(db_error)?;
    Ok(Json(updated))
}

pub async fn destroy(
    State(state): State<AppState>,
    identity: AuthUser,
    Path(id): Path<i32>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    identity.require(Permission::ManageEvents)?;

    let result = Events::delete_by_id(id)
        .exec(&state.db)
        .await
        .map_err(db_error)?;

    if result.rows_affected == 0 {
        return Err(not_found(id));
    }

    tracing::info!("Event {} deleted", id);
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

fn not_found(id: i32) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: format!("Event {} not found", id),
        }),
    )
}
