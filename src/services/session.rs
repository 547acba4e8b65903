//! Per-visitor session state and its transition function.
//!
//! `SessionState::apply` is pure: it never touches the store, the catalog or
//! the clock. Credential and form checks happen before an event is built, so
//! the outcome of a submit is already encoded in the event it produces.

use serde::Serialize;
use thiserror::Error;

use crate::db::types::UserRole;
use crate::services::navigation::{Page, View};
use crate::services::registration::FieldErrors;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct Identity {
    pub(crate) name: String,
    pub(crate) email: String,
}

/// What the login form shows. The password itself is never held here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct LoginForm {
    pub(crate) email: String,
    pub(crate) error: Option<String>,
    pub(crate) password_cleared: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RegisterForm {
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) role: UserRole,
    pub(crate) errors: FieldErrors,
}

impl Default for RegisterForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            role: UserRole::Student,
            errors: FieldErrors::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum AuthPage {
    Landing,
    Login(LoginForm),
    Register(RegisterForm),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SessionState {
    Unauthenticated(AuthPage),
    Authenticated { role: UserRole, page: Page, identity: Option<Identity> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SessionEvent {
    SelectRole(UserRole),
    GoLogin,
    GoRegister,
    GoLanding,
    LoginSucceeded { role: UserRole, identity: Identity },
    LoginRejected { email: String, error: String, clear_password: bool },
    Registered { role: UserRole, identity: Identity },
    RegistrationRejected(RegisterForm),
    Navigate(String),
    Logout,
}

/// A form submit. It must start on its own form; the outcome is applied
/// once the submit finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Submit {
    Login,
    Register,
}

impl Submit {
    fn name(self) -> &'static str {
        match self {
            Submit::Login => "submit_login",
            Submit::Register => "submit_register",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum TransitionError {
    #[error("cannot {event} from the {state} state")]
    Invalid { event: &'static str, state: &'static str },
}

impl SessionEvent {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            SessionEvent::SelectRole(_) => "select_role",
            SessionEvent::GoLogin => "go_login",
            SessionEvent::GoRegister => "go_register",
            SessionEvent::GoLanding => "go_landing",
            SessionEvent::LoginSucceeded { .. } => "login_succeeded",
            SessionEvent::LoginRejected { .. } => "login_rejected",
            SessionEvent::Registered { .. } => "registered",
            SessionEvent::RegistrationRejected(_) => "registration_rejected",
            SessionEvent::Navigate(_) => "navigate",
            SessionEvent::Logout => "logout",
        }
    }
}

impl SessionState {
    pub(crate) fn initial() -> Self {
        SessionState::Unauthenticated(AuthPage::Landing)
    }

    pub(crate) fn label(&self) -> &'static str {
        match self {
            SessionState::Unauthenticated(AuthPage::Landing) => "landing",
            SessionState::Unauthenticated(AuthPage::Login(_)) => "login",
            SessionState::Unauthenticated(AuthPage::Register(_)) => "register",
            SessionState::Authenticated { .. } => "authenticated",
        }
    }

    pub(crate) fn role(&self) -> Option<UserRole> {
        match self {
            SessionState::Authenticated { role, .. } => Some(*role),
            SessionState::Unauthenticated(_) => None,
        }
    }

    pub(crate) fn view(&self) -> View {
        match self {
            SessionState::Unauthenticated(AuthPage::Landing) => View::Landing,
            SessionState::Unauthenticated(AuthPage::Login(_)) => View::Login,
            SessionState::Unauthenticated(AuthPage::Register(_)) => View::Register,
            SessionState::Authenticated { page, .. } => page.view(),
        }
    }

    /// Checks that `submit` may start from this state.
    pub(crate) fn begin_submit(&self, submit: Submit) -> Result<(), TransitionError> {
        match (self, submit) {
            (SessionState::Unauthenticated(AuthPage::Login(_)), Submit::Login)
            | (SessionState::Unauthenticated(AuthPage::Register(_)), Submit::Register) => Ok(()),
            (state, submit) => {
                Err(TransitionError::Invalid { event: submit.name(), state: state.label() })
            }
        }
    }

    /// Outcomes of overlapping submits land in finishing order: a later
    /// success replaces an earlier one, a later rejection leaves a signed-in
    /// session alone.
    pub(crate) fn apply(&self, event: SessionEvent) -> Result<SessionState, TransitionError> {
        use AuthPage::{Landing, Login, Register};
        use SessionState::{Authenticated, Unauthenticated};

        let next = match (self, event) {
            (_, SessionEvent::Logout) => Unauthenticated(Landing),

            (Unauthenticated(Landing), SessionEvent::SelectRole(role)) => {
                authenticated(role, None)
            }

            (Unauthenticated(_), SessionEvent::GoLogin) => {
                Unauthenticated(Login(LoginForm::default()))
            }
            (Unauthenticated(_), SessionEvent::GoRegister) => {
                Unauthenticated(Register(RegisterForm::default()))
            }
            (Unauthenticated(_), SessionEvent::GoLanding) => Unauthenticated(Landing),

            (
                Unauthenticated(Login(_)) | Authenticated { .. },
                SessionEvent::LoginSucceeded { role, identity },
            ) => authenticated(role, Some(identity)),
            (Authenticated { .. }, SessionEvent::LoginRejected { .. }) => self.clone(),
            (
                Unauthenticated(Login(_)),
                SessionEvent::LoginRejected { email, error, clear_password },
            ) => Unauthenticated(Login(LoginForm {
                email,
                error: Some(error),
                password_cleared: clear_password,
            })),

            (
                Unauthenticated(Register(_)) | Authenticated { .. },
                SessionEvent::Registered { role, identity },
            ) => authenticated(role, Some(identity)),
            (Unauthenticated(Register(_)), SessionEvent::RegistrationRejected(form)) => {
                Unauthenticated(Register(form))
            }
            (Authenticated { .. }, SessionEvent::RegistrationRejected(_)) => self.clone(),

            (Authenticated { role, identity, .. }, SessionEvent::Navigate(page_id)) => {
                Authenticated {
                    role: *role,
                    page: Page::resolve(*role, &page_id),
                    identity: identity.clone(),
                }
            }

            (state, event) => {
                return Err(TransitionError::Invalid { event: event.name(), state: state.label() })
            }
        };

        Ok(next)
    }
}

fn authenticated(role: UserRole, identity: Option<Identity>) -> SessionState {
    SessionState::Authenticated { role, page: Page::default_for(role), identity }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::services::credentials;

    fn student_identity() -> Identity {
        Identity { name: "Alex Thompson".to_string(), email: "student@skill4edge.com".to_string() }
    }

    fn login_page() -> SessionState {
        SessionState::initial().apply(SessionEvent::GoLogin).expect("go login")
    }

    #[test]
    fn starts_on_landing() {
        assert_eq!(SessionState::initial().view(), View::Landing);
        assert_eq!(SessionState::initial().role(), None);
    }

    #[test]
    fn select_role_lands_on_role_dashboard() {
        let state =
            SessionState::initial().apply(SessionEvent::SelectRole(UserRole::Admin)).unwrap();
        assert_eq!(state.role(), Some(UserRole::Admin));
        assert_eq!(state.view(), View::AdminDashboard);
    }

    #[test]
    fn select_role_is_only_offered_on_landing() {
        let err = login_page().apply(SessionEvent::SelectRole(UserRole::Student)).unwrap_err();
        assert_eq!(err, TransitionError::Invalid { event: "select_role", state: "login" });
    }

    #[test]
    fn valid_student_login_reaches_student_dashboard() {
        let catalog = db::embedded().unwrap();
        let cred = credentials::check_login(
            &catalog.credentials,
            "student@skill4edge.com",
            "Student123",
        )
        .expect("credentials");

        let state = login_page()
            .apply(SessionEvent::LoginSucceeded {
                role: cred.role,
                identity: Identity { name: cred.name.clone(), email: cred.email.clone() },
            })
            .unwrap();

        match state {
            SessionState::Authenticated { role, page, identity } => {
                assert_eq!(role, UserRole::Student);
                assert_eq!(page.id(), "student-dashboard");
                assert_eq!(identity, Some(student_identity()));
            }
            other => panic!("expected authenticated, got {other:?}"),
        }
    }

    #[test]
    fn rejected_login_keeps_email_and_sets_error() {
        let state = login_page()
            .apply(SessionEvent::LoginRejected {
                email: "student@skill4edge.com".to_string(),
                error: "Invalid email or password. Please try again.".to_string(),
                clear_password: true,
            })
            .unwrap();

        let SessionState::Unauthenticated(AuthPage::Login(form)) = state else {
            panic!("expected login page");
        };
        assert_eq!(form.email, "student@skill4edge.com");
        assert!(form.error.is_some());
        assert!(form.password_cleared);
    }

    #[test]
    fn login_events_require_login_page() {
        let err = SessionState::initial()
            .apply(SessionEvent::LoginSucceeded {
                role: UserRole::Student,
                identity: student_identity(),
            })
            .unwrap_err();
        assert_eq!(err, TransitionError::Invalid { event: "login_succeeded", state: "landing" });
    }

    #[test]
    fn submits_start_only_on_their_form() {
        assert!(login_page().begin_submit(Submit::Login).is_ok());
        assert_eq!(
            login_page().begin_submit(Submit::Register).unwrap_err(),
            TransitionError::Invalid { event: "submit_register", state: "login" }
        );
        assert_eq!(
            SessionState::initial().begin_submit(Submit::Login).unwrap_err(),
            TransitionError::Invalid { event: "submit_login", state: "landing" }
        );
    }

    #[test]
    fn later_login_success_replaces_earlier_one() {
        let student = login_page()
            .apply(SessionEvent::LoginSucceeded {
                role: UserRole::Student,
                identity: student_identity(),
            })
            .unwrap();

        let admin_identity = Identity {
            name: "Administrator".to_string(),
            email: "admin@skill4edge.com".to_string(),
        };
        let admin = student
            .apply(SessionEvent::LoginSucceeded {
                role: UserRole::Admin,
                identity: admin_identity.clone(),
            })
            .unwrap();
        assert_eq!(admin.role(), Some(UserRole::Admin));
        assert_eq!(admin.view(), View::AdminDashboard);

        let after_rejection = admin
            .apply(SessionEvent::LoginRejected {
                email: "student@skill4edge.com".to_string(),
                error: "Invalid email or password. Please try again.".to_string(),
                clear_password: true,
            })
            .unwrap();
        assert_eq!(after_rejection, admin);
    }

    #[test]
    fn registration_flow() {
        let register = login_page().apply(SessionEvent::GoRegister).unwrap();
        assert_eq!(register.view(), View::Register);

        let state = register
            .apply(SessionEvent::Registered {
                role: UserRole::Instructor,
                identity: Identity {
                    name: "Jordan Lee".to_string(),
                    email: "jordan@example.com".to_string(),
                },
            })
            .unwrap();
        assert_eq!(state.view(), View::InstructorDashboard);
    }

    #[test]
    fn navigate_resolves_or_falls_back() {
        let state =
            SessionState::initial().apply(SessionEvent::SelectRole(UserRole::Student)).unwrap();

        let state = state.apply(SessionEvent::Navigate("performance".to_string())).unwrap();
        assert_eq!(state.view(), View::StudentPerformance);

        let state = state.apply(SessionEvent::Navigate("admin-users".to_string())).unwrap();
        assert_eq!(state.view(), View::StudentDashboard);
    }

    #[test]
    fn navigate_requires_authentication() {
        let err = SessionState::initial()
            .apply(SessionEvent::Navigate("courses".to_string()))
            .unwrap_err();
        assert_eq!(err, TransitionError::Invalid { event: "navigate", state: "landing" });
    }

    #[test]
    fn logout_always_returns_to_landing() {
        let state = SessionState::initial()
            .apply(SessionEvent::SelectRole(UserRole::Instructor))
            .unwrap()
            .apply(SessionEvent::Logout)
            .unwrap();
        assert_eq!(state, SessionState::initial());
        assert_eq!(login_page().apply(SessionEvent::Logout).unwrap(), SessionState::initial());
    }

    #[test]
    fn apply_leaves_the_previous_state_untouched() {
        let landing = SessionState::initial();
        let _ = landing.apply(SessionEvent::SelectRole(UserRole::Student)).unwrap();
        assert_eq!(landing, SessionState::initial());
    }
}
