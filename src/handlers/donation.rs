use axum::{extract::State, http::StatusCode, Json};

use crate::auth::{AuthUser, Permission};
use crate::models::donation::{
    CallbackPayload, CallbackResponse, SubmitDonationRequest, SubmitDonationResponse,
    SubmitErrorResponse,
};
use crate::models::user::ErrorResponse;
use crate::services::donation::{self, CallbackOutcome, SubmitError};
use crate::AppState;

pub async fn store(
    State(state): State<AppState>,
    identity: AuthUser,
    Json(payload): Json<SubmitDonationRequest>,
) -> Result<Json<SubmitDonationResponse>, (StatusCode, Json<SubmitErrorResponse>)> {
    identity
        .require(Permission::Donate)
        .map_err(|(code, body)| (code, Json(failure(body.0.error))))?;

    match donation::submit_donation(&state.db, &state.midtrans, &identity.user, payload).await {
        Ok(outcome) => Ok(Json(SubmitDonationResponse {
            success: true,
            snap_token: outcome.snap_token,
            donation_id: outcome.donation_id,
        })),
        Err(SubmitError::InvalidAmount) => Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(failure("Amount must be greater than zero".to_string())),
        )),
        Err(SubmitError::EventNotFound(event_id)) => Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(failure(format!("Event {} not found", event_id))),
        )),
        Err(SubmitError::Gateway(message)) => Err((
            StatusCode::BAD_GATEWAY,
            Json(failure(format!("Failed to create payment: {}", message))),
        )),
        Err(SubmitError::Db(e)) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(failure(format!("Database error: {}", e))),
        )),
    }
}

fn failure(message: String) -> SubmitErrorResponse {
    SubmitErrorResponse {
        success: false,
        message,
    }
}

/// Provider-origin payment notification. Public by necessity; when signature
/// verification is enabled, a callback must prove it knows the server key
/// before any status field is trusted.
pub async fn callback(
    State(state): State<AppState>,
    Json(payload): Json<CallbackPayload>,
) -> Result<(StatusCode, Json<CallbackResponse>), (StatusCode, Json<ErrorResponse>)> {
    if state.midtrans.verification_enabled() {
        let verified = match (&payload.status_code, &payload.gross_amount, &payload.signature_key) {
            (Some(status_code), Some(gross_amount), Some(signature_key)) => state
                .midtrans
                .verify_notification_signature(
                    &payload.order_id,
                    status_code,
                    gross_amount,
                    signature_key,
                ),
            _ => false,
        };
        if !verified {
            tracing::warn!(
                "Rejected unsigned or forged callback for order {}",
                payload.order_id
            );
            return Ok((
                StatusCode::FORBIDDEN,
                Json(CallbackResponse {
                    status: "invalid".to_string(),
                    donation_id: None,
                    event_id: None,
                }),
            ));
        }
    }

    let outcome = donation::apply_callback(
        &state.db,
        &payload.order_id,
        &payload.transaction_status,
        payload.fraud_status.as_deref(),
    )
    .await
    .map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: format!("Database error: {}", e),
            }),
        )
    })?;

    let (code, status, donation) = match outcome {
        CallbackOutcome::Paid(d) => (StatusCode::OK, "success", Some(d)),
        CallbackOutcome::Pending(d) => (StatusCode::OK, "pending", Some(d)),
        CallbackOutcome::Failed(d) => (StatusCode::OK, "failed", Some(d)),
        CallbackOutcome::AlreadyResolved(d) => (StatusCode::OK, "already_resolved", Some(d)),
        CallbackOutcome::Invalid(d) => (StatusCode::BAD_REQUEST, "invalid", Some(d)),
        CallbackOutcome::NotFound => {
            return Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: format!("Donation {} not found", payload.order_id),
                }),
            ));
        }
    };

    Ok((
        code,
        Json(CallbackResponse {
            status: status.to_string(),
            donation_id: donation.as_ref().map(|d| d.id),
            event_id: donation.as_ref().map(|d| d.event_id),
        }),
    ))
}
