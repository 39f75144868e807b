//! Clinic Relay server binary.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use http::HeaderValue;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use clinic_relay::adapters::http::{routes, AppState};
use clinic_relay::adapters::reasoner;
use clinic_relay::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;
    let config = Arc::new(config);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.clone())),
        )
        .init();

    let reasoner = reasoner::from_config(&config.reasoner);
    let info = reasoner.info();
    tracing::info!(provider = %info.name, model = %info.model, "reasoner configured");

    let state = AppState::new(config.clone(), reasoner);

    let cors = build_cors(&config.server.cors_origins_list());

    let app: Router = routes().with_state(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.server.request_timeout_secs,
            )))
            .layer(cors),
    );

    let addr = config.server.socket_addr()?;
    tracing::info!(%addr, "starting clinic-relay");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_cors(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let parsed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(parsed))
        .allow_methods(Any)
        .allow_headers(Any)
}
