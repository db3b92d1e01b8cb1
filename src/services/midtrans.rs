use reqwest::Client;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha512};

const SANDBOX_BASE_URL: &str = "https://app.sandbox.midtrans.com/snap/v1";
const PRODUCTION_BASE_URL: &str = "https://app.midtrans.com/snap/v1";

/// Adapter for the Midtrans Snap transaction API. Credentials and the
/// sandbox/production environment are resolved once at construction; per-call
/// input is just the order reference, amount, and customer details.
#[derive(Clone)]
pub struct MidtransService {
    client: Client,
    server_key: String,
    base_url: String,
    verify_signature: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CustomerDetails {
    pub first_name: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
struct SnapTokenResponse {
    token: String,
}

impl MidtransService {
    pub fn new(server_key: String, is_production: bool, verify_signature: bool) -> Self {
        let base_url = if is_production {
            PRODUCTION_BASE_URL
        } else {
            SANDBOX_BASE_URL
        };
        Self::with_base_url(server_key, base_url.to_string(), verify_signature)
    }

    /// Construct against an explicit endpoint; the integration suite points
    /// this at a local stub server.
    pub fn with_base_url(server_key: String, base_url: String, verify_signature: bool) -> Self {
        Self {
            client: Client::new(),
            server_key,
            base_url,
            verify_signature,
        }
    }

    pub fn verification_enabled(&self) -> bool {
        self.verify_signature
    }

    /// Request a Snap transaction token for a client-side payment attempt.
    /// Every provider-side failure is converted to the error variant here;
    /// callers never see a raw transport fault.
    pub async fn create_transaction(
        &self,
        order_id: &str,
        gross_amount: Decimal,
        customer: &CustomerDetails,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let url = format!("{}/transactions", self.base_url);

        let body = serde_json::json!({
            "transaction_details": {
                "order_id": order_id,
                "gross_amount": gross_amount.to_f64().unwrap_or(0.0),
            },
            "customer_details": customer,
            "credit_card": { "secure": true },
        });

        tracing::info!("Requesting Snap token for order {}", order_id);

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.server_key, Some(""))
            .header("accept", "application/json")
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            return Err(format!("Midtrans API error {}: {}", status, error_text).into());
        }

        let data: SnapTokenResponse = response.json().await?;
        Ok(data.token)
    }

    /// Check a notification's `signature_key`: SHA-512 over
    /// `order_id + status_code + gross_amount + server_key`.
    pub fn verify_notification_signature(
        &self,
        order_id: &str,
        status_code: &str,
        gross_amount: &str,
        signature_key: &str,
    ) -> bool {
        let mut hasher = Sha512::new();
        hasher.update(order_id.as_bytes());
        hasher.update(status_code.as_bytes());
        hasher.update(gross_amount.as_bytes());
        hasher.update(self.server_key.as_bytes());
        let digest = hex::encode(hasher.finalize());
        digest.eq_ignore_ascii_case(signature_key)
    }
}
