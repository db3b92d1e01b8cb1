mod common;

use axum::http::{Method, StatusCode};
use chrono::{Duration, Months, Utc};
use rust_decimal_macros::dec;
use serde_json::json;

use givehub_backend::entities::donations::DonationStatus;
use givehub_backend::entities::users::UserRole;

use crate::common::*;

/// One fixture drives all dashboard assertions:
///
/// - events: E1 (+5 days), E2 (+10 days), E3 (-10 days, past), E4 (+40 days)
/// - alice: 50000 paid to E1 (this month), 25000 failed to E2 (last month)
/// - bob:   10000 pending to E1 (this month), 5000 paid to E3 (last month)
#[tokio::test]
async fn test_dashboard_figures() {
    let db = setup_test_db().await;
    let today = Utc::now().date_naive();
    let now = Utc::now().naive_utc();
    let last_month = now - Months::new(1);

    let alice = create_user(&db, "Alice", "alice@example.com", UserRole::User).await;
    let bob = create_user(&db, "Bob", "bob@example.com", UserRole::User).await;

    let e1 = create_event(&db, "Beach Cleanup", today + Duration::days(5), dec!(100000)).await;
    let e2 = create_event(&db, "Food Drive", today + Duration::days(10), dec!(200000)).await;
    let e3 = create_event(&db, "Past Gala", today - Duration::days(10), dec!(50000)).await;
    let e4 = create_event(&db, "Tree Planting", today + Duration::days(40), dec!(300000)).await;

    create_donation(&db, alice.id, e1.id, dec!(50000), today, DonationStatus::Paid, now).await;
    create_donation(
        &db,
        alice.id,
        e2.id,
        dec!(25000),
        today,
        DonationStatus::Failed,
        last_month,
    )
    .await;
    create_donation(&db, bob.id, e1.id, dec!(10000), today, DonationStatus::Pending, now).await;
    create_donation(
        &db,
        bob.id,
        e3.id,
        dec!(5000),
        today,
        DonationStatus::Paid,
        last_month,
    )
    .await;

    let snap_url = spawn_snap_stub().await;
    let app = givehub_backend::router(test_state(db.clone(), snap_url, false));

    let (status, body) = request(&app, Method::GET, "/dashboard", Some(&bearer(alice.id)), None).await;
    assert_eq!(status, StatusCode::OK);

    // Headline stats for alice
    let stats = &body["stats"];
    assert_eq!(stats["total_events"], json!(4));
    assert_eq!(stats["ongoing_events"], json!(3));
    assert_eq!(stats["total_donators"], json!(2));
    assert_eq!(stats["new_donators_last_month"], json!(2));
    assert_eq!(stats["events_supported"], json!(2));
    assert_eq!(decimal_field(&stats["total_donations"]), dec!(75000));
    assert_eq!(decimal_field(&stats["last_month_donations"]), dec!(25000));

    // Soonest three upcoming events, with status-blind participant counts
    let ongoing = body["ongoing_events"].as_array().unwrap();
    assert_eq!(ongoing.len(), 3);
    assert_eq!(ongoing[0]["id"].as_i64().unwrap() as i32, e1.id);
    assert_eq!(ongoing[0]["participants"], json!(2));
    assert_eq!(ongoing[1]["id"].as_i64().unwrap() as i32, e2.id);
    assert_eq!(ongoing[1]["participants"], json!(1));
    assert_eq!(ongoing[2]["id"].as_i64().unwrap() as i32, e4.id);
    assert_eq!(ongoing[2]["participants"], json!(0));

    // Current-month ranking: alice (50000) over bob (10000); the event
    // annotation is the all-time distinct count
    let top = body["top_donators"].as_array().unwrap();
    assert_eq!(top.len(), 2);
    assert_eq!(top[0]["name"], json!("Alice"));
    assert_eq!(decimal_field(&top[0]["amount"]), dec!(50000));
    assert_eq!(top[0]["events"], json!(2));
    assert_eq!(top[1]["name"], json!("Bob"));
    assert_eq!(decimal_field(&top[1]["amount"]), dec!(10000));
    assert_eq!(top[1]["events"], json!(2));

    // "current" sums every donation regardless of status: E1 counts the
    // pending 10000, E2 counts the failed 25000
    let requests = body["donation_requests"].as_array().unwrap();
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[0]["id"].as_i64().unwrap() as i32, e1.id);
    assert_eq!(decimal_field(&requests[0]["current"]), dec!(60000));
    assert_eq!(decimal_field(&requests[0]["target"]), dec!(100000));
    assert_eq!(requests[0]["status"], json!("active"));
    assert_eq!(requests[0]["deadline"], json!("in 5 days"));
    assert_eq!(requests[1]["id"].as_i64().unwrap() as i32, e2.id);
    assert_eq!(decimal_field(&requests[1]["current"]), dec!(25000));
    assert_eq!(requests[2]["id"].as_i64().unwrap() as i32, e4.id);
    assert_eq!(decimal_field(&requests[2]["current"]), dec!(0));
}

/// The top-donators board never exceeds five entries and is ordered by
/// current-month sum descending.
#[tokio::test]
async fn test_top_donators_capped_at_five() {
    let db = setup_test_db().await;
    let today = Utc::now().date_naive();
    let now = Utc::now().naive_utc();

    let event = create_event(&db, "Big Drive", today + Duration::days(30), dec!(1000000)).await;

    let mut viewer_id = 0;
    for i in 1..=6 {
        let user = create_user(
            &db,
            &format!("Donor {}", i),
            &format!("donor{}@example.com", i),
            UserRole::User,
        )
        .await;
        viewer_id = user.id;
        create_donation(
            &db,
            user.id,
            event.id,
            dec!(1000) * rust_decimal::Decimal::from(i),
            today,
            DonationStatus::Paid,
            now,
        )
        .await;
    }

    let snap_url = spawn_snap_stub().await;
    let app = givehub_backend::router(test_state(db.clone(), snap_url, false));

    let (status, body) = request(&app, Method::GET, "/dashboard", Some(&bearer(viewer_id)), None).await;
    assert_eq!(status, StatusCode::OK);

    let top = body["top_donators"].as_array().unwrap();
    assert_eq!(top.len(), 5);

    let amounts: Vec<_> = top.iter().map(|t| decimal_field(&t["amount"])).collect();
    assert_eq!(
        amounts,
        vec![dec!(6000), dec!(5000), dec!(4000), dec!(3000), dec!(2000)]
    );
}

#[tokio::test]
async fn test_dashboard_requires_auth() {
    let db = setup_test_db().await;
    let snap_url = spawn_snap_stub().await;
    let app = givehub_backend::router(test_state(db, snap_url, false));

    let (status, _body) = request(&app, Method::GET, "/dashboard", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

/// The landing page is public: three most recently created events plus the
/// soonest upcoming ones.
#[tokio::test]
async fn test_landing_figures() {
    let db = setup_test_db().await;
    let today = Utc::now().date_naive();

    let e1 = create_event(&db, "Beach Cleanup", today + Duration::days(5), dec!(100000)).await;
    let e2 = create_event(&db, "Food Drive", today + Duration::days(10), dec!(200000)).await;
    let e3 = create_event(&db, "Past Gala", today - Duration::days(10), dec!(50000)).await;
    let e4 = create_event(&db, "Tree Planting", today + Duration::days(40), dec!(300000)).await;

    let snap_url = spawn_snap_stub().await;
    let app = givehub_backend::router(test_state(db.clone(), snap_url, false));

    let (status, body) = request(&app, Method::GET, "/", None, None).await;
    assert_eq!(status, StatusCode::OK);

    let featured = body["featured_events"].as_array().unwrap();
    assert_eq!(featured.len(), 3);
    assert_eq!(featured[0]["id"].as_i64().unwrap() as i32, e4.id);

    let upcoming = body["upcoming_events"].as_array().unwrap();
    let upcoming_ids: Vec<i32> = upcoming
        .iter()
        .map(|e| e["id"].as_i64().unwrap() as i32)
        .collect();
    assert_eq!(upcoming_ids, vec![e1.id, e2.id, e4.id]);
    assert!(!upcoming_ids.contains(&e3.id));
}
