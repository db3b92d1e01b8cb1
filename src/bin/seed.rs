//! Seed the database with the two role accounts and a handful of demo
//! events/donations. Intended for local development:
//!
//! ```sh
//! DATABASE_URL=... cargo run --bin seed
//! ```

use std::env;

use chrono::{Months, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, Database, EntityTrait, PaginatorTrait};
use sea_orm_migration::MigratorTrait;

use givehub_backend::entities::{
    donations::{self, DonationStatus},
    events::{self, EventCategory},
    prelude::*,
    users::{self, UserRole},
};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();
    dotenvy::dotenv().ok();

    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let db = Database::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    migration::Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    let existing = Users::find()
        .count(&db)
        .await
        .expect("Failed to count users");
    if existing > 0 {
        tracing::info!("Database already seeded ({} users), nothing to do", existing);
        return;
    }

    let user = users::ActiveModel {
        name: Set("User User".to_string()),
        email: Set("user@example.com".to_string()),
        role: Set(UserRole::User),
        ..Default::default()
    }
    .insert(&db)
    .await
    .expect("Failed to insert user account");

    let admin = users::ActiveModel {
        name: Set("Admin User".to_string()),
        email: Set("admin@example.com".to_string()),
        role: Set(UserRole::Admin),
        ..Default::default()
    }
    .insert(&db)
    .await
    .expect("Failed to insert admin account");

    let today = Utc::now().date_naive();

    let demo_events = [
        (
            "River Cleanup Day",
            "A community push to clear the riverbank before the rainy season.",
            today + Months::new(1),
            Decimal::new(500_000_00, 2),
            "Riverside Park",
            EventCategory::Environment,
        ),
        (
            "Neighborhood Food Drive",
            "Collecting staples for local families through the winter.",
            today + Months::new(2),
            Decimal::new(250_000_00, 2),
            "Community Hall",
            EventCategory::Charity,
        ),
        (
            "Open Library Weekend",
            "Funding new shelves and children's books for the open library.",
            today + Months::new(3),
            Decimal::new(100_000_00, 2),
            "Main Square",
            EventCategory::Community,
        ),
    ];

    let mut event_ids = Vec::new();
    for (title, description, date, goal, location, category) in demo_events {
        let event = events::ActiveModel {
            title: Set(title.to_string()),
            description: Set(description.to_string()),
            date: Set(date),
            donation_goal: Set(goal),
            location: Set(location.to_string()),
            category: Set(category),
            ..Default::default()
        }
        .insert(&db)
        .await
        .expect("Failed to insert demo event");
        event_ids.push(event.id);
    }

    // One settled and one pending donation so the dashboard has something
    // to show out of the box.
    donations::ActiveModel {
        user_id: Set(user.id),
        event_id: Set(event_ids[0]),
        amount: Set(Decimal::new(50_000_00, 2)),
        date: Set(today),
        status: Set(DonationStatus::Paid),
        ..Default::default()
    }
    .insert(&db)
    .await
    .expect("Failed to insert demo donation");

    donations::ActiveModel {
        user_id: Set(user.id),
        event_id: Set(event_ids[1]),
        amount: Set(Decimal::new(25_000_00, 2)),
        date: Set(today),
        status: Set(DonationStatus::Pending),
        ..Default::default()
    }
    .insert(&db)
    .await
    .expect("Failed to insert demo donation");

    tracing::info!(
        "Seeded {} events and accounts {} (user) / {} (admin)",
        event_ids.len(),
        user.email,
        admin.email
    );
}
