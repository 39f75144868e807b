//! HTTP handlers connecting Axum routes to the flow handlers.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::{
    ReceptionTurnHandler, ReengageLeadHandler, RouteMessageHandler, SchedulingTurnHandler,
};
use crate::config::AppConfig;
use crate::domain::conversation::{
    ReceptionContext, ReengageContext, RoutingContext, SchedulingContext,
};
use crate::ports::Reasoner;

use super::dto::{
    ErrorResponse, HealthResponse, ReceptionResponse, ReengageResponse, RouteResponse,
    SchedulingResponse,
};

/// Shared application state containing all dependencies.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub reasoner: Arc<dyn Reasoner>,
}

impl AppState {
    pub fn new(config: Arc<AppConfig>, reasoner: Arc<dyn Reasoner>) -> Self {
        Self { config, reasoner }
    }

    pub fn route_handler(&self) -> RouteMessageHandler {
        RouteMessageHandler::new(self.reasoner.clone(), self.config.reasoner.language.clone())
    }

    pub fn reception_handler(&self) -> ReceptionTurnHandler {
        ReceptionTurnHandler::new(self.reasoner.clone(), self.config.engine)
    }

    pub fn scheduling_handler(&self) -> SchedulingTurnHandler {
        SchedulingTurnHandler::new(self.reasoner.clone(), self.config.engine)
    }

    pub fn reengage_handler(&self) -> ReengageLeadHandler {
        ReengageLeadHandler::new(self.reasoner.clone(), self.config.engine)
    }
}

/// Classify one inbound message.
///
/// POST /v1/route
pub async fn route_message(
    State(state): State<AppState>,
    Json(context): Json<RoutingContext>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    if context.latest_message.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("latest_message cannot be empty")),
        ));
    }

    let started = Instant::now();
    let outcome = state.route_handler().handle(context).await;

    Ok(Json(RouteResponse::from_outcome(
        outcome,
        elapsed_ms(started),
    )))
}

/// Run one reception-flow turn.
///
/// POST /v1/reception
pub async fn reception_turn(
    State(state): State<AppState>,
    Json(context): Json<ReceptionContext>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    if context.clinic_name.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("clinic_name cannot be empty")),
        ));
    }

    let started = Instant::now();
    let outcome = state.reception_handler().handle(context).await;

    Ok(Json(ReceptionResponse::from_outcome(
        outcome,
        elapsed_ms(started),
    )))
}

/// Run one scheduling-flow turn.
///
/// POST /v1/scheduling
pub async fn scheduling_turn(
    State(state): State<AppState>,
    Json(context): Json<SchedulingContext>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    if context.manager_name.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("manager_name cannot be empty")),
        ));
    }

    let started = Instant::now();
    let outcome = state.scheduling_handler().handle(context).await;

    Ok(Json(SchedulingResponse::from_outcome(
        outcome,
        elapsed_ms(started),
    )))
}

/// Run a reengagement pipeline over a cold lead.
///
/// POST /v1/reengage
pub async fn reengage_lead(
    State(state): State<AppState>,
    Json(context): Json<ReengageContext>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    if context.lead_name.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("lead_name cannot be empty")),
        ));
    }

    let started = Instant::now();
    let outcome = state.reengage_handler().handle(context).await;

    Ok(Json(ReengageResponse::from_outcome(
        outcome,
        elapsed_ms(started),
    )))
}

/// Health check.
///
/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let info = state.reasoner.info();

    Json(HealthResponse {
        status: "healthy".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        reasoner: format!("{}/{}", info.name, info.model),
    })
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}
