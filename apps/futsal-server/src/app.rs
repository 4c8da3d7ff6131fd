use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderName, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use team_membership::api::rest::{JwtValidator, register_routes};
use team_membership::domain::service::Service;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

const X_REQUEST_ID: &str = "x-request-id";

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Public `/health` plus the authenticated team membership routes.
pub fn build_router(
    service: Arc<Service>,
    validator: Arc<JwtValidator>,
    request_timeout: Duration,
) -> Router {
    let x_request_id = HeaderName::from_static(X_REQUEST_ID);

    let router = Router::new().route("/health", get(health));
    register_routes(router, service, validator)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::GATEWAY_TIMEOUT,
            request_timeout,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
        .layer(SetRequestIdLayer::new(x_request_id, MakeRequestUuid))
}
