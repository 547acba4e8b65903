use serde::Deserialize;

use crate::db::types::UserRole;

/// Field checks, length bounds included, live in `services::credentials`
/// so that a rejected submit is still recorded on the session.
#[derive(Debug, Deserialize)]
pub(crate) struct LoginRequest {
    #[serde(default)]
    pub(crate) email: String,
    #[serde(default)]
    pub(crate) password: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RegisterRequest {
    #[serde(default)]
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) email: String,
    #[serde(default)]
    pub(crate) password: String,
    #[serde(default)]
    pub(crate) confirm_password: String,
    #[serde(default = "default_role")]
    pub(crate) role: UserRole,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SelectRoleRequest {
    pub(crate) role: UserRole,
}

/// Any id is accepted; unknown ones resolve to the role's default page.
#[derive(Debug, Deserialize)]
pub(crate) struct NavigateRequest {
    pub(crate) page: String,
}

fn default_role() -> UserRole {
    UserRole::Student
}
