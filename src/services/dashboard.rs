use std::collections::{HashMap, HashSet};

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect};

use crate::entities::{donations, events, prelude::*, users};
use crate::models::dashboard::{
    DashboardResponse, DashboardStats, DonationRequest, LandingResponse, OngoingEvent, TopDonator,
};

/// Build the full dashboard for one user as of `today`.
///
/// Everything is recomputed from the current table contents on every call;
/// there is no running counter to fall out of sync. Rows are fetched once and
/// folded in memory.
pub async fn dashboard(
    db: &DatabaseConnection,
    user_id: i32,
    today: NaiveDate,
) -> Result<DashboardResponse, DbErr> {
    let events = Events::find()
        .order_by_asc(events::Column::Id)
        .all(db)
        .await?;
    let donations = Donations::find()
        .order_by_asc(donations::Column::Id)
        .all(db)
        .await?;
    let users = Users::find().order_by_asc(users::Column::Id).all(db).await?;

    Ok(DashboardResponse {
        stats: summary_stats(&events, &donations, user_id, today),
        ongoing_events: ongoing_events(&events, &donations, today),
        top_donators: top_donators(&users, &donations, today),
        donation_requests: donation_requests(&events, &donations, today),
    })
}

/// Landing figures: the three most recently created events plus up to six
/// soonest upcoming ones.
pub async fn landing(db: &DatabaseConnection, today: NaiveDate) -> Result<LandingResponse, DbErr> {
    let featured_events = Events::find()
        .order_by_desc(events::Column::CreatedAt)
        .order_by_desc(events::Column::Id)
        .limit(3)
        .all(db)
        .await?;

    let upcoming_events = Events::find()
        .filter(events::Column::Date.gte(today))
        .order_by_asc(events::Column::Date)
        .limit(6)
        .all(db)
        .await?;

    Ok(LandingResponse {
        featured_events,
        upcoming_events,
    })
}

pub fn summary_stats(
    events: &[events::Model],
    donations: &[donations::Model],
    user_id: i32,
    today: NaiveDate,
) -> DashboardStats {
    let last_month = previous_month(today);

    let mut donators = HashSet::new();
    let mut new_donators = HashSet::new();
    let mut supported_events = HashSet::new();
    let mut total_donations = Decimal::ZERO;
    let mut last_month_donations = Decimal::ZERO;

    for donation in donations {
        donators.insert(donation.user_id);
        if in_month(donation.created_at.date(), last_month) {
            new_donators.insert(donation.user_id);
        }
        if donation.user_id == user_id {
            supported_events.insert(donation.event_id);
            total_donations += donation.amount;
            if in_month(donation.created_at.date(), last_month) {
                last_month_donations += donation.amount;
            }
        }
    }

    DashboardStats {
        total_events: events.len() as u64,
        ongoing_events: events.iter().filter(|e| e.date >= today).count() as u64,
        total_donators: donators.len() as u64,
        new_donators_last_month: new_donators.len() as u64,
        events_supported: supported_events.len() as u64,
        total_donations,
        last_month_donations,
    }
}

/// Up to 3 soonest non-past events, each with its donation count
/// (participants, regardless of payment status).
pub fn ongoing_events(
    events: &[events::Model],
    donations: &[donations::Model],
    today: NaiveDate,
) -> Vec<OngoingEvent> {
    let mut participants: HashMap<i32, u64> = HashMap::new();
    for donation in donations {
        *participants.entry(donation.event_id).or_default() += 1;
    }

    let mut upcoming: Vec<&events::Model> = events.iter().filter(|e| e.date >= today).collect();
    upcoming.sort_by_key(|e| e.date);

    upcoming
        .into_iter()
        .take(3)
        .map(|event| OngoingEvent {
            id: event.id,
            title: event.title.clone(),
            date: event.date,
            image: event.image.clone(),
            participants: participants.get(&event.id).copied().unwrap_or(0),
        })
        .collect()
}

/// Up to 5 users ranked descending by their current-month donation sum.
/// The sort is stable, so equal sums keep identifier order.
pub fn top_donators(
    users: &[users::Model],
    donations: &[donations::Model],
    today: NaiveDate,
) -> Vec<TopDonator> {
    let this_month = (today.year(), today.month());

    let mut month_sums: HashMap<i32, Decimal> = HashMap::new();
    let mut event_counts: HashMap<i32, HashSet<i32>> = HashMap::new();
    for donation in donations {
        event_counts
            .entry(donation.user_id)
            .or_default()
            .insert(donation.event_id);
        if in_month(donation.created_at.date(), this_month) {
            *month_sums.entry(donation.user_id).or_default() += donation.amount;
        }
    }

    let mut ranked: Vec<TopDonator> = users
        .iter()
        .filter_map(|user| {
            let amount = *month_sums.get(&user.id)?;
            Some(TopDonator {
                id: user.id,
                name: user.name.clone(),
                image: user.image.clone(),
                amount,
                events: event_counts
                    .get(&user.id)
                    .map(|events| events.len() as u64)
                    .unwrap_or(0),
            })
        })
        .collect();

    ranked.sort_by(|a, b| b.amount.cmp(&a.amount));
    ranked.truncate(5);
    ranked
}

/// Up to 3 soonest upcoming events with their progress toward goal. The
/// "current" figure sums every donation regardless of status, pending and
/// failed included, matching the behavior this service replaces; it
/// overstates actual funds raised.
pub fn donation_requests(
    events: &[events::Model],
    donations: &[donations::Model],
    today: NaiveDate,
) -> Vec<DonationRequest> {
    let mut raised: HashMap<i32, Decimal> = HashMap::new();
    for donation in donations {
        *raised.entry(donation.event_id).or_default() += donation.amount;
    }

    let mut upcoming: Vec<&events::Model> = events.iter().filter(|e| e.date >= today).collect();
    upcoming.sort_by_key(|e| e.date);

    upcoming
        .into_iter()
        .take(3)
        .map(|event| DonationRequest {
            id: event.id,
            title: event.title.clone(),
            current: raised.get(&event.id).copied().unwrap_or(Decimal::ZERO),
            target: event.donation_goal,
            deadline: deadline_phrase(today, event.date),
            status: if event.date < today {
                "completed".to_string()
            } else {
                "active".to_string()
            },
        })
        .collect()
}

/// Year and month one calendar month before `today`. December of the
/// previous year when `today` is in January.
pub fn previous_month(today: NaiveDate) -> (i32, u32) {
    let shifted = today - Months::new(1);
    (shifted.year(), shifted.month())
}

fn in_month(date: NaiveDate, month: (i32, u32)) -> bool {
    (date.year(), date.month()) == month
}

/// Single-unit human phrasing of an event deadline, largest unit wins.
pub fn deadline_phrase(today: NaiveDate, deadline: NaiveDate) -> String {
    let days = (deadline - today).num_days();
    match days {
        d if d < 0 => format!("{} days ago", -d),
        0 => "today".to_string(),
        1 => "in 1 day".to_string(),
        d if d < 7 => format!("in {} days", d),
        d if d < 14 => "in 1 week".to_string(),
        d if d < 30 => format!("in {} weeks", d / 7),
        d if d < 60 => "in 1 month".to_string(),
        d if d < 365 => format!("in {} months", d / 30),
        d if d < 730 => "in 1 year".to_string(),
        d => format!("in {} years", d / 365),
    }
}
