use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::api::errors::ApiError;
use crate::api::guards::{CurrentSession, SessionId};
use crate::core::time::format_offset;
use crate::core::{metrics, security, state::AppState};
use crate::schemas::auth::{LoginRequest, NavigateRequest, RegisterRequest, SelectRoleRequest};
use crate::schemas::course::ViewQuery;
use crate::schemas::dashboard::ViewResponse;
use crate::schemas::session::{SessionResponse, TokenResponse};
use crate::services::credentials::{self, LoginRejection, AUTH_FAILURE_MESSAGE};
use crate::services::dashboards;
use crate::services::navigation::{resolve_page, Page};
use crate::services::registration::{validate_registration, RegistrationForm};
use crate::services::session::{Identity, RegisterForm, SessionEvent, SessionState, Submit};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_session).get(current_session).delete(end_session))
        .route("/select-role", post(select_role))
        .route("/login-page", post(go_login))
        .route("/register-page", post(go_register))
        .route("/landing", post(go_landing))
        .route("/login", post(login))
        .route("/register", post(register))
        .route("/navigate", post(navigate))
        .route("/logout", post(logout))
        .route("/view", get(view))
}

async fn create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<TokenResponse>), ApiError> {
    let (id, session) = state.sessions().create().await;

    let token = security::create_session_token(id, state.settings(), None)
        .map_err(|e| ApiError::internal(e, "Failed to create session token"))?;

    tracing::info!(session_id = %id, "Session created");

    let response = TokenResponse {
        token,
        token_type: "bearer",
        session: SessionResponse::from_state(id, &session),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

async fn current_session(
    State(state): State<AppState>,
    session: CurrentSession,
) -> Json<SessionResponse> {
    let mut response = SessionResponse::from_state(session.id, &session.state);
    response.created_at = state.sessions().created_at(session.id).await.map(format_offset);
    Json(response)
}

async fn end_session(State(state): State<AppState>, SessionId(id): SessionId) -> StatusCode {
    if state.sessions().remove(id).await {
        tracing::info!(session_id = %id, "Session ended");
    }
    StatusCode::NO_CONTENT
}

async fn select_role(
    State(state): State<AppState>,
    SessionId(id): SessionId,
    Json(payload): Json<SelectRoleRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let next = transition(&state, id, SessionEvent::SelectRole(payload.role)).await?;
    Ok(Json(SessionResponse::from_state(id, &next)))
}

async fn go_login(
    State(state): State<AppState>,
    SessionId(id): SessionId,
) -> Result<Json<SessionResponse>, ApiError> {
    let next = transition(&state, id, SessionEvent::GoLogin).await?;
    Ok(Json(SessionResponse::from_state(id, &next)))
}

async fn go_register(
    State(state): State<AppState>,
    SessionId(id): SessionId,
) -> Result<Json<SessionResponse>, ApiError> {
    let next = transition(&state, id, SessionEvent::GoRegister).await?;
    Ok(Json(SessionResponse::from_state(id, &next)))
}

async fn go_landing(
    State(state): State<AppState>,
    SessionId(id): SessionId,
) -> Result<Json<SessionResponse>, ApiError> {
    let next = transition(&state, id, SessionEvent::GoLanding).await?;
    Ok(Json(SessionResponse::from_state(id, &next)))
}

async fn login(
    State(state): State<AppState>,
    SessionId(id): SessionId,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    state.sessions().begin_submit(id, Submit::Login).await?;
    simulate_latency(&state).await;

    let catalog = state.catalog();
    match credentials::check_login(&catalog.credentials, &payload.email, &payload.password) {
        Ok(credential) => {
            let event = SessionEvent::LoginSucceeded {
                role: credential.role,
                identity: Identity { name: credential.name.clone(), email: credential.email.clone() },
            };
            let next = transition(&state, id, event).await?;
            metrics::record_login("success");
            tracing::info!(session_id = %id, role = credential.role.as_str(), "Login succeeded");
            Ok(Json(SessionResponse::from_state(id, &next)))
        }
        Err(rejection) => {
            let event = SessionEvent::LoginRejected {
                email: payload.email.clone(),
                error: rejection.to_string(),
                clear_password: rejection.clears_password(),
            };
            transition(&state, id, event).await?;
            metrics::record_login(rejection.outcome());
            tracing::info!(session_id = %id, outcome = rejection.outcome(), "Login rejected");

            Err(match rejection {
                LoginRejection::Validation(message) => ApiError::BadRequest(message.to_string()),
                LoginRejection::AuthenticationFailure => ApiError::Unauthorized(AUTH_FAILURE_MESSAGE),
            })
        }
    }
}

async fn register(
    State(state): State<AppState>,
    SessionId(id): SessionId,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    state.sessions().begin_submit(id, Submit::Register).await?;
    simulate_latency(&state).await;

    let form = RegistrationForm {
        name: &payload.name,
        email: &payload.email,
        password: &payload.password,
        confirm_password: &payload.confirm_password,
        role: payload.role,
    };

    match validate_registration(&form, &state.catalog().credentials) {
        Ok(()) => {
            let identity = Identity {
                name: payload.name.trim().to_string(),
                email: payload.email.trim().to_string(),
            };
            let next =
                transition(&state, id, SessionEvent::Registered { role: payload.role, identity })
                    .await?;
            tracing::info!(session_id = %id, role = payload.role.as_str(), "Registration accepted");
            Ok(Json(SessionResponse::from_state(id, &next)))
        }
        Err(errors) => {
            let rejected = RegisterForm {
                name: payload.name.clone(),
                email: payload.email.clone(),
                role: payload.role,
                errors: errors.clone(),
            };
            transition(&state, id, SessionEvent::RegistrationRejected(rejected)).await?;
            tracing::debug!(session_id = %id, fields = errors.len(), "Registration rejected");
            Err(ApiError::Validation(errors))
        }
    }
}

async fn navigate(
    State(state): State<AppState>,
    session: CurrentSession,
    Json(payload): Json<NavigateRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    if let Some(role) = session.state.role() {
        if Page::parse(role, &payload.page).is_none() {
            tracing::debug!(
                session_id = %session.id,
                role = role.as_str(),
                page = %payload.page,
                fallback = ?resolve_page(role, &payload.page),
                "Unknown page, falling back to role default"
            );
        }
    }

    let next = transition(&state, session.id, SessionEvent::Navigate(payload.page)).await?;
    Ok(Json(SessionResponse::from_state(session.id, &next)))
}

async fn logout(
    State(state): State<AppState>,
    SessionId(id): SessionId,
) -> Result<Json<SessionResponse>, ApiError> {
    let next = transition(&state, id, SessionEvent::Logout).await?;
    Ok(Json(SessionResponse::from_state(id, &next)))
}

async fn view(
    State(state): State<AppState>,
    session: CurrentSession,
    Query(query): Query<ViewQuery>,
) -> Result<Json<ViewResponse>, ApiError> {
    query.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let response = dashboards::build_view(state.catalog(), &session.state, &query)?;
    Ok(Json(response))
}

async fn transition(
    state: &AppState,
    id: Uuid,
    event: SessionEvent,
) -> Result<SessionState, ApiError> {
    let name = event.name();
    match state.sessions().apply(id, event).await {
        Ok(next) => {
            metrics::record_transition(name);
            tracing::debug!(session_id = %id, event = name, state = next.label(), "Session transition");
            Ok(next)
        }
        Err(err) => {
            tracing::debug!(session_id = %id, event = name, error = %err, "Session transition refused");
            Err(err.into())
        }
    }
}

async fn simulate_latency(state: &AppState) {
    let delay = state.settings().session().simulated_latency_ms;
    if delay > 0 {
        tokio::time::sleep(std::time::Duration::from_millis(delay)).await;
    }
}
