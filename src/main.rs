//! Equiplend Server - Equipment Loan Management System
//!
//! A Rust REST API server for university equipment lending.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use equiplend_server::{api, config::AppConfig, repository::Repository, services::Services, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("equiplend_server={},tower_http=debug", config.logging.level).into()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Equiplend Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(repository, config.webhook.clone());

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Equipment
        .route("/equipment", get(api::equipment::list_equipment))
        .route("/equipment", post(api::equipment::create_equipment))
        .route("/equipment/batch", post(api::equipment::batch_create_equipment))
        .route("/equipment/:id", get(api::equipment::get_equipment))
        .route("/equipment/:id", put(api::equipment::update_equipment))
        .route("/equipment/:id", delete(api::equipment::delete_equipment))
        .route("/categories", get(api::equipment::list_categories))
        // Loans
        .route("/loans", get(api::loans::list_loans))
        .route("/loans", post(api::loans::create_loan))
        .route("/loans/overdue", get(api::loans::list_overdue_loans))
        .route("/loans/:id/approve", post(api::loans::approve_loan))
        .route("/loans/:id/reject", post(api::loans::reject_loan))
        .route("/loans/:id/return", post(api::loans::return_loan))
        // Reservations
        .route("/reservations", get(api::reservations::list_reservations))
        .route("/reservations", post(api::reservations::create_reservation))
        .route("/reservations/expire-sweep", post(api::reservations::expire_sweep))
        .route("/reservations/:id", get(api::reservations::get_reservation))
        .route("/reservations/:id/approve", post(api::reservations::approve_reservation))
        .route("/reservations/:id/reject", post(api::reservations::reject_reservation))
        .route("/reservations/:id/ready", post(api::reservations::mark_reservation_ready))
        .route("/reservations/:id/convert", post(api::reservations::convert_reservation))
        .route("/reservations/:id/cancel", post(api::reservations::cancel_reservation))
        // Special loans
        .route("/special-loans", get(api::special_loans::list_special_loans))
        .route("/special-loans", post(api::special_loans::create_special_loan))
        .route("/special-loans/check-conflicts", post(api::special_loans::check_conflicts))
        .route("/special-loans/:id", get(api::special_loans::get_special_loan))
        .route("/special-loans/:id/return", post(api::special_loans::return_special_loan))
        .route("/special-loans/:id/cancel", post(api::special_loans::cancel_special_loan))
        // Evaluations
        .route("/evaluations", get(api::evaluations::list_evaluations))
        .route("/evaluations", post(api::evaluations::create_evaluation))
        .route("/evaluations/summary", get(api::evaluations::evaluation_summary))
        // Users
        .route("/users", get(api::users::list_users))
        .route("/users", post(api::users::create_user))
        .route("/users/:id", get(api::users::get_user))
        .route("/users/:id/loans", get(api::loans::get_user_loans))
        // Export
        .route("/export/equipment.csv", get(api::export::export_equipment))
        .route("/export/loans.csv", get(api::export::export_loans))
        // Statistics
        .route("/stats", get(api::stats::get_stats))
        .with_state(state.clone());

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
