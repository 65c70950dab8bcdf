use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use config::Config;
use models::catalog::Backend;
use routes::{
    download::{download_epub, download_format},
    health::health_check,
    search::search_books,
};

pub struct AppState {
    pub backend: Backend,
    pub config: Config,
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/status", get(health_check))
        .route("/search", get(search_books))
        .route("/download/:book_id", get(download_epub))
        .route("/download/:book_id/:format", get(download_format))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
