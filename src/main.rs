// src/main.rs

use axum::{Router, routing::get};
use dotenvy::dotenv;
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod controller;
mod db;
mod errors;
mod filters;
mod handlers;
mod htmx_handlers;
mod models;
mod pagination;
mod queries;
mod response;
mod state;

use crate::handlers::{list_organizations_api, revenue_dashboard_api};
use crate::htmx_handlers::{
    organizations_page, organizations_table_htmx, overview_page, revenue_dashboard_page,
};
use crate::pagination::DEFAULT_PAGE_SIZE;
use crate::state::AppState;

#[tokio::main]
async fn main() {
    dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "analytics_dashboard=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting server...");

    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = match PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
    {
        Ok(pool) => {
            tracing::info!("Connected to the database");
            pool
        }
        Err(err) => {
            tracing::error!("Cannot connect to the database: {:?}", err);
            std::process::exit(1);
        }
    };

    let page_size = env::var("DASHBOARD_PAGE_SIZE")
        .ok()
        .and_then(|value| value.parse::<i64>().ok())
        .unwrap_or(DEFAULT_PAGE_SIZE);

    let app_state = AppState {
        db_pool: pool,
        page_size,
    };

    let app = Router::new()
        .route("/", get(overview_page))
        .route("/organizations", get(organizations_page))
        .route("/revenue-dashboard", get(revenue_dashboard_page))
        .route("/htmx/organizations", get(organizations_table_htmx))
        .route("/api/organizations", get(list_organizations_api))
        .route("/api/revenue-dashboard", get(revenue_dashboard_api))
        .nest_service("/static", ServeDir::new("static"))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], 3000));
    tracing::info!("Server listening on {}", addr);

    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Cannot bind {}: {}", addr, e);
            return;
        }
    };

    if let Err(e) = axum::serve(listener, app.into_make_service()).await {
        tracing::error!("Server error: {}", e);
    }
}
