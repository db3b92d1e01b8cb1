use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct SubmitDonationRequest {
    pub amount: Decimal,
    pub event_id: i32,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmitDonationResponse {
    pub success: bool,
    pub snap_token: String,
    pub donation_id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitErrorResponse {
    pub success: bool,
    pub message: String,
}

/// Server-to-server notification from the payment provider. The integrity
/// fields are optional at the serde level; when signature verification is
/// enabled a callback without them is rejected outright.
#[derive(Debug, Clone, Deserialize)]
pub struct CallbackPayload {
    pub order_id: String,
    pub transaction_status: String,
    #[serde(default)]
    pub fraud_status: Option<String>,
    #[serde(default)]
    pub status_code: Option<String>,
    #[serde(default)]
    pub gross_amount: Option<String>,
    #[serde(default)]
    pub signature_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallbackResponse {
    /// success | pending | failed | already_resolved | invalid | not_found
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub donation_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<i32>,
}
