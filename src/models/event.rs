use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::entities::{donations, events, users};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub image: Option<String>,
    pub donation_goal: Decimal,
    pub location: String,
    pub category: events::EventCategory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateEventRequest {
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub image: Option<String>,
    pub donation_goal: Decimal,
    pub location: String,
    pub category: events::EventCategory,
}

#[derive(Debug, Clone, Serialize)]
pub struct EventResponse {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub image: Option<String>,
    pub donation_goal: Decimal,
    pub location: String,
    pub category: events::EventCategory,
    pub donations: Vec<donations::Model>,
}

impl EventResponse {
    pub fn from_model(event: events::Model, donations: Vec<donations::Model>) -> Self {
        Self {
            id: event.id,
            title: event.title,
            description: event.description,
            date: event.date,
            image: event.image,
            donation_goal: event.donation_goal,
            location: event.location,
            category: event.category,
            donations,
        }
    }
}

/// One row of the event-detail donator list, ordered by amount descending.
#[derive(Debug, Clone, Serialize)]
pub struct DonatorEntry {
    pub donation_id: i32,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub status: donations::DonationStatus,
    pub user: Option<users::Model>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EventDetailResponse {
    pub event: EventResponse,
    pub donators: Vec<DonatorEntry>,
}
