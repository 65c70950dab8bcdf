use catalog_proxy_service::config::Config;
use catalog_proxy_service::models::catalog::{Backend, GutendexBackend};
use catalog_proxy_service::{build_router, AppState};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("catalog_proxy_service=info,tower_http=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::from_env();
    info!(
        "Using catalog {} with a {:?} upstream timeout",
        config.catalog_api_url, config.upstream_timeout
    );

    let backend: Backend =
        match GutendexBackend::new(&config.catalog_api_url, config.upstream_timeout) {
            Ok(backend) => Arc::new(backend),
            Err(e) => {
                error!("Failed to build HTTP client: {}", e);
                std::process::exit(1);
            }
        };

    let addr = format!("0.0.0.0:{}", config.port);
    let app = build_router(Arc::new(AppState { backend, config }));

    info!("Catalog proxy service starting on {}", addr);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
