use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::collections::HashMap;

use crate::core::metrics;
use crate::core::state::AppState;
use crate::schemas::{HealthResponse, RootResponse};

pub(crate) async fn root(State(state): State<AppState>) -> Json<RootResponse> {
    let response = RootResponse {
        message: state.settings().api().project_name.clone(),
        version: state.settings().api().version.clone(),
        api_prefix: state.settings().api().api_v1_str.clone(),
    };

    Json(response)
}

pub(crate) async fn healthz(State(state): State<AppState>) -> Json<HealthResponse> {
    let catalog = state.catalog();
    let mut components = HashMap::new();

    let catalog_status = if catalog.courses.is_empty() || catalog.credentials.is_empty() {
        "empty".to_string()
    } else {
        format!("loaded ({} courses)", catalog.courses.len())
    };
    components.insert("catalog".to_string(), catalog_status);
    let active_sessions = state.sessions().len().await;
    components.insert("sessions".to_string(), format!("{active_sessions} active"));

    let status = if catalog.courses.is_empty() { "degraded" } else { "healthy" };

    Json(HealthResponse {
        service: "skill4edge-api".to_string(),
        status: status.to_string(),
        components,
    })
}

pub(crate) async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    if !state.settings().telemetry().prometheus_enabled {
        return StatusCode::NOT_FOUND.into_response();
    }

    match metrics::render() {
        Some(body) => ([(axum::http::header::CONTENT_TYPE, "text/plain; version=0.0.4")], body)
            .into_response(),
        None => StatusCode::SERVICE_UNAVAILABLE.into_response(),
    }
}
