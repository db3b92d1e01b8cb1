#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::{routing::post, Json, Router};
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use serde_json::Value;
use tower::ServiceExt;

use givehub_backend::auth::issue_token;
use givehub_backend::entities::{
    donations::{self, DonationStatus},
    events::{self, EventCategory},
    users::{self, UserRole},
};
use givehub_backend::services::midtrans::MidtransService;
use givehub_backend::AppState;

pub const JWT_SECRET: &str = "test-secret";
pub const SERVER_KEY: &str = "test-server-key";
pub const STUB_SNAP_TOKEN: &str = "snap-token-abc123";

/// In-memory SQLite database with the production migrations applied.
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");
    migration::Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    db
}

/// Local stand-in for the Snap transaction endpoint; returns its base URL.
pub async fn spawn_snap_stub() -> String {
    let app = Router::new().route(
        "/transactions",
        post(|| async {
            Json(serde_json::json!({
                "token": STUB_SNAP_TOKEN,
                "redirect_url": "https://app.sandbox.midtrans.com/snap/v2/vtweb/abc123",
            }))
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind snap stub");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

pub fn test_state(
    db: DatabaseConnection,
    snap_base_url: String,
    verify_signature: bool,
) -> AppState {
    AppState {
        db,
        midtrans: MidtransService::with_base_url(
            SERVER_KEY.to_string(),
            snap_base_url,
            verify_signature,
        ),
        jwt_secret: JWT_SECRET.to_string(),
    }
}

pub fn bearer(user_id: i32) -> String {
    let token = issue_token(user_id, JWT_SECRET).expect("Failed to mint test token");
    format!("Bearer {}", token)
}

pub async fn create_user(
    db: &DatabaseConnection,
    name: &str,
    email: &str,
    role: UserRole,
) -> users::Model {
    users::ActiveModel {
        name: Set(name.to_string()),
        email: Set(email.to_string()),
        role: Set(role),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to insert test user")
}

pub async fn create_event(
    db: &DatabaseConnection,
    title: &str,
    date: NaiveDate,
    goal: Decimal,
) -> events::Model {
    events::ActiveModel {
        title: Set(title.to_string()),
        description: Set(format!("{} description", title)),
        date: Set(date),
        donation_goal: Set(goal),
        location: Set("Town Hall".to_string()),
        category: Set(EventCategory::Community),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to insert test event")
}

pub async fn create_donation(
    db: &DatabaseConnection,
    user_id: i32,
    event_id: i32,
    amount: Decimal,
    date: NaiveDate,
    status: DonationStatus,
    created_at: NaiveDateTime,
) -> donations::Model {
    donations::ActiveModel {
        user_id: Set(user_id),
        event_id: Set(event_id),
        amount: Set(amount),
        date: Set(date),
        status: Set(status),
        created_at: Set(created_at),
        updated_at: Set(created_at),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to insert test donation")
}

/// Drive the production router once and decode the JSON response.
pub async fn request(
    app: &Router,
    method: Method,
    uri: &str,
    auth: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

/// Amounts serialize as decimal strings; compare them as decimals so scale
/// differences between database backends don't matter.
pub fn decimal_field(value: &Value) -> Decimal {
    value
        .as_str()
        .expect("expected a decimal string")
        .parse()
        .expect("expected a parseable decimal")
}
