use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::entities::events;

/// Headline figures for the authenticated user's dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_events: u64,
    pub ongoing_events: u64,
    pub total_donators: u64,
    pub new_donators_last_month: u64,
    pub events_supported: u64,
    pub total_donations: Decimal,
    pub last_month_donations: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OngoingEvent {
    pub id: i32,
    pub title: String,
    pub date: NaiveDate,
    pub image: Option<String>,
    /// Count of the event's donations, regardless of status
    pub participants: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopDonator {
    pub id: i32,
    pub name: String,
    pub image: Option<String>,
    /// Sum of the user's donations created in the current calendar month
    pub amount: Decimal,
    /// All-time count of distinct events the user has donated to
    pub events: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DonationRequest {
    pub id: i32,
    pub title: String,
    /// Sum of all the event's donation amounts, regardless of status
    pub current: Decimal,
    pub target: Decimal,
    pub deadline: String,
    /// "completed" once the event date has passed, otherwise "active"
    pub status: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardResponse {
    pub stats: DashboardStats,
    pub ongoing_events: Vec<OngoingEvent>,
    pub top_donators: Vec<TopDonator>,
    pub donation_requests: Vec<DonationRequest>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LandingResponse {
    pub featured_events: Vec<events::Model>,
    pub upcoming_events: Vec<events::Model>,
}
