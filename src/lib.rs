// src/lib.rs

use axum::{
    routing::{delete, get, post},
    Router,
};
use sea_orm::DatabaseConnection;

use services::midtrans::MidtransService;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub midtrans: MidtransService,
    pub jwt_secret: String,
}

pub mod entities {
    pub mod prelude;

    pub mod donations;
    pub mod events;
    pub mod users;
}

pub mod services {
    pub mod dashboard;
    pub mod donation;
    pub mod midtrans;
}

pub mod auth;
pub mod handlers;
pub mod models;

/// The production router; integration tests drive exactly this.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::landing::index))
        .route("/dashboard", get(handlers::dashboard::index))
        .route(
            "/events",
            get(handlers::event::index).post(handlers::event::store),
        )
        .route(
            "/events/{id}",
            get(handlers::event::show)
                .put(handlers::event::update)
                .delete(handlers::event::destroy),
        )
        .route("/admin/users", get(handlers::user::index))
        .route("/admin/users/{id}", delete(handlers::user::destroy))
        .route("/donation", post(handlers::donation::store))
        .route("/donation/callback", post(handlers::donation::callback))
        .with_state(state)
}
