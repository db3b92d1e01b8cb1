use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    ModelTrait, QueryFilter,
};

use crate::entities::{
    donations::{self, DonationStatus},
    prelude::*,
    users,
};
use crate::models::donation::SubmitDonationRequest;
use crate::services::midtrans::{CustomerDetails, MidtransService};

pub enum SubmitError {
    InvalidAmount,
    EventNotFound(i32),
    Gateway(String),
    Db(DbErr),
}

impl From<DbErr> for SubmitError {
    fn from(e: DbErr) -> Self {
        SubmitError::Db(e)
    }
}

pub struct SubmitOutcome {
    pub donation_id: i32,
    pub snap_token: String,
}

/// Persist a pending donation and request a payment session for it.
///
/// Exactly one donation row exists after a successful token request; zero
/// rows survive a failed one (the pending row is deleted as the compensating
/// action before the error is reported).
pub async fn submit_donation(
    db: &DatabaseConnection,
    midtrans: &MidtransService,
    donor: &users::Model,
    request: SubmitDonationRequest,
) -> Result<SubmitOutcome, SubmitError> {
    if request.amount <= Decimal::ZERO {
        return Err(SubmitError::InvalidAmount);
    }

    if Events::find_by_id(request.event_id).one(db).await?.is_none() {
        return Err(SubmitError::EventNotFound(request.event_id));
    }

    let donation = donations::ActiveModel {
        user_id: Set(donor.id),
        event_id: Set(request.event_id),
        amount: Set(request.amount),
        date: Set(request.date),
        status: Set(DonationStatus::Pending),
        ..Default::default()
    }
    .insert(db)
    .await?;

    let customer = CustomerDetails {
        first_name: donor.name.clone(),
        email: donor.email.clone(),
    };

    match midtrans
        .create_transaction(&donation.id.to_string(), request.amount, &customer)
        .await
    {
        Ok(snap_token) => {
            tracing::info!("Donation {} pending, payment session created", donation.id);
            Ok(SubmitOutcome {
                donation_id: donation.id,
                snap_token,
            })
        }
        Err(e) => {
            let message = e.to_string();
            tracing::warn!(
                "Token request for donation {} failed, rolling back: {}",
                donation.id,
                message
            );
            donation.delete(db).await?;
            Err(SubmitError::Gateway(message))
        }
    }
}

pub enum CallbackOutcome {
    Paid(donations::Model),
    Failed(donations::Model),
    Pending(donations::Model),
    /// The donation had already left `pending` with a different status; the
    /// transition was rejected and nothing was overwritten.
    AlreadyResolved(donations::Model),
    /// Unrecognized transaction status, or a capture/settlement whose fraud
    /// verdict was not `accept`; no mutation.
    Invalid(donations::Model),
    NotFound,
}

/// Apply a provider notification to the referenced donation.
///
/// The paid/failed write is a single conditional update, `status = target
/// WHERE status = 'pending'`, so two concurrent callbacks for one donation
/// cannot both win. A conditional miss re-reads the row: the same target
/// status means a repeated notification (idempotent), anything else is
/// reported as already resolved.
pub async fn apply_callback(
    db: &DatabaseConnection,
    order_id: &str,
    transaction_status: &str,
    fraud_status: Option<&str>,
) -> Result<CallbackOutcome, DbErr> {
    let donation_id: i32 = match order_id.parse() {
        Ok(id) => id,
        Err(_) => return Ok(CallbackOutcome::NotFound),
    };

    let Some(donation) = Donations::find_by_id(donation_id).one(db).await? else {
        return Ok(CallbackOutcome::NotFound);
    };

    let target = match transition_target(transaction_status, fraud_status) {
        Some(target) => target,
        None => return Ok(CallbackOutcome::Invalid(donation)),
    };

    if target == DonationStatus::Pending {
        // Re-affirmation; nothing to persist.
        return if donation.status == DonationStatus::Pending {
            Ok(CallbackOutcome::Pending(donation))
        } else {
            Ok(CallbackOutcome::AlreadyResolved(donation))
        };
    }

    let update = Donations::update_many()
        .col_expr(donations::Column::Status, Expr::value(target.clone()))
        .col_expr(
            donations::Column::UpdatedAt,
            Expr::value(Utc::now().naive_utc()),
        )
        .filter(donations::Column::Id.eq(donation_id))
        .filter(donations::Column::Status.eq(DonationStatus::Pending))
        .exec(db)
        .await?;

    let current = Donations::find_by_id(donation_id)
        .one(db)
        .await?
        .unwrap_or(donation);

    if update.rows_affected == 0 && current.status != target {
        tracing::warn!(
            "Callback for donation {} rejected: already {:?}",
            donation_id,
            current.status
        );
        return Ok(CallbackOutcome::AlreadyResolved(current));
    }

    tracing::info!("Donation {} is now {:?}", donation_id, current.status);
    Ok(match target {
        DonationStatus::Paid => CallbackOutcome::Paid(current),
        _ => CallbackOutcome::Failed(current),
    })
}

fn transition_target(
    transaction_status: &str,
    fraud_status: Option<&str>,
) -> Option<DonationStatus> {
    match transaction_status {
        "capture" | "settlement" => match fraud_status {
            Some("accept") => Some(DonationStatus::Paid),
            _ => None,
        },
        "cancel" | "deny" | "expire" => Some(DonationStatus::Failed),
        "pending" => Some(DonationStatus::Pending),
        _ => None,
    }
}
