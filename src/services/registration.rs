use std::collections::BTreeMap;

use serde::Serialize;

use crate::db::models::Credential;
use crate::db::types::UserRole;
use crate::services::credentials::{
    is_registered_email, validate_email, validate_password, MAX_EMAIL_LEN, MAX_PASSWORD_LEN,
};

const MIN_NAME_LEN: usize = 2;
const MAX_NAME_LEN: usize = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum RegisterField {
    Name,
    Email,
    Password,
    ConfirmPassword,
}

/// At most one message per field: the first rule that field fails.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub(crate) struct FieldErrors(BTreeMap<RegisterField, &'static str>);

impl FieldErrors {
    pub(crate) fn get(&self, field: RegisterField) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    pub(crate) fn summary(&self) -> String {
        self.0.values().copied().collect::<Vec<_>>().join("; ")
    }

    fn record(&mut self, field: RegisterField, message: Option<&'static str>) {
        if let Some(message) = message {
            self.0.insert(field, message);
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct RegistrationForm<'a> {
    pub(crate) name: &'a str,
    pub(crate) email: &'a str,
    pub(crate) password: &'a str,
    pub(crate) confirm_password: &'a str,
    pub(crate) role: UserRole,
}

pub(crate) fn validate_registration(
    form: &RegistrationForm<'_>,
    credentials: &[Credential],
) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();

    errors.record(RegisterField::Name, name_error(form.name));
    errors.record(RegisterField::Email, email_error(form.email, credentials));
    errors.record(RegisterField::Password, password_error(form.password));
    errors.record(
        RegisterField::ConfirmPassword,
        confirm_error(form.password, form.confirm_password),
    );

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn name_error(name: &str) -> Option<&'static str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        Some("Full name is required")
    } else if trimmed.chars().count() < MIN_NAME_LEN {
        Some("Name must be at least 2 characters")
    } else if trimmed.len() > MAX_NAME_LEN {
        Some("Name is too long")
    } else {
        None
    }
}

fn email_error(email: &str, credentials: &[Credential]) -> Option<&'static str> {
    if email.trim().is_empty() {
        Some("Email is required")
    } else if email.len() > MAX_EMAIL_LEN {
        Some("Email is too long")
    } else if !validate_email(email) {
        Some("Please enter a valid email address")
    } else if is_registered_email(credentials, email) {
        Some("This email is already registered")
    } else {
        None
    }
}

fn password_error(password: &str) -> Option<&'static str> {
    if password.is_empty() {
        Some("Password is required")
    } else if password.len() > MAX_PASSWORD_LEN {
        Some("Password is too long")
    } else if !validate_password(password) {
        Some("Password must be at least 6 characters")
    } else {
        None
    }
}

fn confirm_error(password: &str, confirm_password: &str) -> Option<&'static str> {
    if confirm_password.is_empty() {
        Some("Please confirm your password")
    } else if password != confirm_password {
        Some("Passwords do not match")
    } else {
        None
    }
}
