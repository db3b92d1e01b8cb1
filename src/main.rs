use std::env;

use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use givehub_backend::services::midtrans::MidtransService;
use givehub_backend::AppState;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,givehub_backend=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    // Connect to database
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    tracing::info!("Connecting to database...");
    let db = Database::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    // Run migrations
    tracing::info!("Running migrations...");
    migration::Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    // Payment gateway credentials resolve once, here
    let server_key = env::var("MIDTRANS_SERVER_KEY").expect("MIDTRANS_SERVER_KEY must be set");
    let is_production = env::var("MIDTRANS_IS_PRODUCTION")
        .map(|v| v == "true")
        .unwrap_or(false);
    let verify_signature = env::var("MIDTRANS_VERIFY_SIGNATURE")
        .map(|v| v != "false")
        .unwrap_or(true);
    let midtrans = MidtransService::new(server_key, is_production, verify_signature);

    let jwt_secret = env::var("APP_JWT_SECRET").expect("APP_JWT_SECRET must be set");

    let state = AppState {
        db,
        midtrans,
        jwt_secret,
    };

    let app = givehub_backend::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server
    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000")
        .await
        .unwrap();

    tracing::info!("Server listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
