//! Route definitions for the flow endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{
    health, reception_turn, reengage_lead, route_message, scheduling_turn, AppState,
};

/// Create the application router with all endpoints.
///
/// # Endpoints
///
/// - `POST /v1/route` - Classify one inbound message
/// - `POST /v1/reception` - One reception-flow turn
/// - `POST /v1/scheduling` - One scheduling-flow turn
/// - `POST /v1/reengage` - Reengagement pipeline over a cold lead
/// - `GET /health` - Health check
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/route", post(route_message))
        .route("/v1/reception", post(reception_turn))
        .route("/v1/scheduling", post(scheduling_turn))
        .route("/v1/reengage", post(reengage_lead))
        .route("/health", get(health))
}
