//! Toolcrib Server - Tool Rental and Inventory Management System
//!
//! A Rust REST API server for tracking tools, bookings and maintenance.

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

use toolcrib_server::{
    api,
    config::AppConfig,
    repository::Repository,
    services::Services,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("toolcrib_server={},tower_http=debug", config.logging.level).into());

    if config.logging.format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("Starting Toolcrib Server v{}", env!("CARGO_PKG_VERSION"));

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
    let services = Services::new(
        repository,
        config.auth.clone(),
        config.bookings.clone(),
    );

    // Bootstrap the default admin account on an empty database
    services
        .users
        .ensure_default_admin()
        .await
        .expect("Failed to bootstrap default admin account");

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
        // Authentication
        .route("/auth/login", post(api::auth::login))
        .route("/auth/me", get(api::auth::me))
        // Tools
        .route("/tools", get(api::tools::list_tools))
        .route("/tools", post(api::tools::create_tool))
        .route("/tools/:id", get(api::tools::get_tool))
        .route("/tools/:id", put(api::tools::update_tool))
        .route("/tools/:id", delete(api::tools::delete_tool))
        .route("/tools/:id/checkout", post(api::tools::checkout_tool))
        .route("/tools/:id/checkin", post(api::tools::checkin_tool))
        // Bookings
        .route("/bookings", get(api::bookings::list_bookings))
        .route("/bookings", post(api::bookings::create_booking))
        .route("/bookings/:id", get(api::bookings::get_booking))
        .route("/bookings/:id/approve", post(api::bookings::approve_booking))
        .route("/bookings/:id/reject", post(api::bookings::reject_booking))
        .route("/bookings/:id/cancel", post(api::bookings::cancel_booking))
        .route("/users/:id/bookings", get(api::bookings::get_user_bookings))
        // Maintenances
        .route("/maintenances", get(api::maintenances::list_maintenances))
        .route("/maintenances", post(api::maintenances::create_maintenance))
        .route("/maintenances/:id", get(api::maintenances::get_maintenance))
        .route("/maintenances/:id", put(api::maintenances::update_maintenance))
        .route("/maintenances/:id/complete", post(api::maintenances::complete_maintenance))
        .route("/maintenances/:id/parts", get(api::maintenances::list_parts))
        .route("/maintenances/:id/parts", post(api::maintenances::assign_part))
        // Spare parts
        .route("/spare-parts", get(api::spare_parts::list_spare_parts))
        .route("/spare-parts", post(api::spare_parts::create_spare_part))
        .route("/spare-parts/low", get(api::spare_parts::list_low_stock))
        .route("/spare-parts/:id", get(api::spare_parts::get_spare_part))
        .route("/spare-parts/:id", put(api::spare_parts::update_spare_part))
        .route("/spare-parts/:id", delete(api::spare_parts::delete_spare_part))
        // Users
        .route("/users", get(api::users::list_users))
        .route("/users", post(api::users::create_user))
        .route("/users/:id", get(api::users::get_user))
        .route("/users/:id", put(api::users::update_user))
        .route("/users/:id", delete(api::users::delete_user))
        // Notifications
        .route("/notifications", get(api::notifications::list_notifications))
        .route("/notifications/read-all", post(api::notifications::mark_all_read))
        .route("/notifications/:id/read", post(api::notifications::mark_read))
        .with_state(state.clone());

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
