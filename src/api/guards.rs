use async_trait::async_trait;
use axum::extract::{FromRequestParts, State};
use axum::http::{header, request::Parts};
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::core::{security, state::AppState};
use crate::db::types::UserRole;
use crate::services::session::SessionState;

/// Session id from a valid bearer token. Does not check the store.
pub(crate) struct SessionId(pub(crate) Uuid);

pub(crate) struct CurrentSession {
    pub(crate) id: Uuid,
    pub(crate) state: SessionState,
}

/// A session that has signed in or picked a role.
pub(crate) struct AuthenticatedSession {
    pub(crate) id: Uuid,
    pub(crate) role: UserRole,
}

#[async_trait]
impl FromRequestParts<AppState> for SessionId {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let State(app_state) = State::<AppState>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::internal(e, "Failed to access application state"))?;

        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(ApiError::Unauthorized("Invalid session token"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(ApiError::Unauthorized("Invalid session token"))?;

        let session_id = security::session_id_from_token(token, app_state.settings())
            .map_err(|_| ApiError::Unauthorized("Invalid session token"))?;

        Ok(SessionId(session_id))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let SessionId(id) = SessionId::from_request_parts(parts, state).await?;
        let session = state.sessions().get(id).await?;

        Ok(CurrentSession { id, state: session })
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentSession { id, state: session } =
            CurrentSession::from_request_parts(parts, state).await?;

        match session.role() {
            Some(role) => Ok(AuthenticatedSession { id, role }),
            None => Err(ApiError::Unauthorized("Sign in to continue")),
        }
    }
}
