//! Creator Dashboard
//!
//! A local dashboard for content creators: stream planner, goals, idea bank and growth
//! tracking, persisted in a SQLite-backed key-value store and served as HTML pages plus a
//! JSON API.

mod api;
mod auth;
mod config;
mod errors;
mod models;
mod store;
mod tracker;
mod web;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use store::SqliteStore;
use tracker::Dashboard;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub dashboard: Arc<Dashboard<SqliteStore>>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Creator Dashboard");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Bind address: {}", config.bind_addr);
    tracing::info!("Growth history limit: {}", config.history_limit);

    if config.api_psk.is_none() {
        tracing::warn!("No API PSK configured (DASHBOARD_API_PSK). The JSON API is open!");
    }

    // Initialize storage
    let pool = store::init_database(&config.db_path).await?;
    let dashboard = Arc::new(Dashboard::new(
        SqliteStore::new(pool),
        config.history_limit,
    ));

    let state = AppState {
        dashboard,
        config: Arc::new(config.clone()),
    };

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Dashboard available at http://{}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let psk = state.config.api_psk.clone();

    // JSON API
    let api_routes = Router::new()
        // Dashboard
        .route("/dashboard", get(api::get_dashboard))
        .route("/theme", get(api::get_theme))
        .route("/theme/toggle", post(api::toggle_theme))
        // Streams
        .route("/streams", get(api::list_streams).post(api::create_stream))
        .route("/streams/{id}", delete(api::delete_stream))
        .route("/streams/{id}/toggle", post(api::toggle_stream))
        // Goals
        .route("/goals", get(api::list_goals).post(api::create_goal))
        .route("/goals/{id}", delete(api::delete_goal))
        .route("/goals/{id}/toggle", post(api::toggle_goal))
        // Ideas
        .route("/ideas", get(api::list_ideas).post(api::create_idea))
        .route("/ideas/{id}", delete(api::delete_idea))
        .route("/ideas/{id}/toggle", post(api::toggle_idea))
        // Growth
        .route("/growth", get(api::get_growth).post(api::record_growth))
        .route("/growth/history", get(api::get_growth_history))
        .layer(middleware::from_fn(move |req, next| {
            auth::psk_auth_layer(psk.clone(), req, next)
        }));

    // HTML pages and form posts
    let page_routes = Router::new()
        .route("/", get(web::dashboard_page))
        .route("/theme", post(web::toggle_theme))
        .route("/streams", get(web::streams_page).post(web::add_stream))
        .route("/streams/{id}/toggle", post(web::toggle_stream))
        .route("/streams/{id}/delete", post(web::delete_stream))
        .route("/goals", get(web::goals_page).post(web::add_goal))
        .route("/goals/{id}/toggle", post(web::toggle_goal))
        .route("/goals/{id}/delete", post(web::delete_goal))
        .route("/ideas", get(web::ideas_page).post(web::add_idea))
        .route("/ideas/{id}/toggle", post(web::toggle_idea))
        .route("/ideas/{id}/delete", post(web::delete_idea))
        .route("/growth", get(web::growth_page).post(web::record_growth));

    // Health check (no auth required)
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(page_routes)
        .merge(health_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
