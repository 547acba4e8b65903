use serde::Serialize;
use uuid::Uuid;

use crate::db::types::UserRole;
use crate::services::navigation::{Page, View};
use crate::services::registration::FieldErrors;
use crate::services::session::{AuthPage, Identity, SessionState};

#[derive(Debug, Serialize)]
pub(crate) struct LoginFormResponse {
    pub(crate) email: String,
    pub(crate) error: Option<String>,
    pub(crate) password_cleared: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct RegisterFormResponse {
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) role: UserRole,
    pub(crate) errors: FieldErrors,
}

#[derive(Debug, Serialize)]
pub(crate) struct SessionResponse {
    pub(crate) session_id: Uuid,
    pub(crate) state: &'static str,
    pub(crate) view: View,
    pub(crate) role: Option<UserRole>,
    pub(crate) page: Option<Page>,
    pub(crate) identity: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) login: Option<LoginFormResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) register: Option<RegisterFormResponse>,
    pub(crate) pages: Vec<Page>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) created_at: Option<String>,
}

impl SessionResponse {
    pub(crate) fn from_state(session_id: Uuid, state: &SessionState) -> Self {
        let mut response = Self {
            session_id,
            state: state.label(),
            view: state.view(),
            role: state.role(),
            page: None,
            identity: None,
            login: None,
            register: None,
            pages: Vec::new(),
            created_at: None,
        };

        match state {
            SessionState::Unauthenticated(AuthPage::Landing) => {}
            SessionState::Unauthenticated(AuthPage::Login(form)) => {
                response.login = Some(LoginFormResponse {
                    email: form.email.clone(),
                    error: form.error.clone(),
                    password_cleared: form.password_cleared,
                });
            }
            SessionState::Unauthenticated(AuthPage::Register(form)) => {
                response.register = Some(RegisterFormResponse {
                    name: form.name.clone(),
                    email: form.email.clone(),
                    role: form.role,
                    errors: form.errors.clone(),
                });
            }
            SessionState::Authenticated { role, page, identity } => {
                response.page = Some(*page);
                response.identity = identity.clone();
                response.pages = Page::all_for(*role);
            }
        }

        response
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct TokenResponse {
    pub(crate) token: String,
    pub(crate) token_type: &'static str,
    pub(crate) session: SessionResponse,
}
