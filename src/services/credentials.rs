use thiserror::Error;

use crate::db::models::Credential;

pub(crate) const MIN_PASSWORD_LEN: usize = 6;
pub(crate) const MAX_EMAIL_LEN: usize = 254;
pub(crate) const MAX_PASSWORD_LEN: usize = 128;
pub(crate) const AUTH_FAILURE_MESSAGE: &str = "Invalid email or password. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum LoginRejection {
    #[error("{0}")]
    Validation(&'static str),
    /// Deliberately does not say which field was wrong.
    #[error("Invalid email or password. Please try again.")]
    AuthenticationFailure,
}

impl LoginRejection {
    pub(crate) fn clears_password(&self) -> bool {
        matches!(self, LoginRejection::AuthenticationFailure)
    }

    pub(crate) fn outcome(&self) -> &'static str {
        match self {
            LoginRejection::Validation(_) => "invalid_input",
            LoginRejection::AuthenticationFailure => "rejected",
        }
    }
}

/// Case-sensitive exact match on both email and password; first match wins.
pub(crate) fn validate_credentials<'a>(
    credentials: &'a [Credential],
    email: &str,
    password: &str,
) -> Option<&'a Credential> {
    credentials.iter().find(|cred| cred.email == email && cred.password == password)
}

/// Permissive shape check: `local@domain.tld` with no whitespace and a single `@`.
pub(crate) fn validate_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    domain.char_indices().any(|(idx, ch)| ch == '.' && idx > 0 && idx + 1 < domain.len())
}

pub(crate) fn validate_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
}

pub(crate) fn is_registered_email(credentials: &[Credential], email: &str) -> bool {
    credentials.iter().any(|cred| cred.email == email)
}

pub(crate) fn check_login<'a>(
    credentials: &'a [Credential],
    email: &str,
    password: &str,
) -> Result<&'a Credential, LoginRejection> {
    if email.is_empty() || password.is_empty() {
        return Err(LoginRejection::Validation("Please enter both email and password"));
    }

    if email.len() > MAX_EMAIL_LEN {
        return Err(LoginRejection::Validation("Email is too long"));
    }

    if password.len() > MAX_PASSWORD_LEN {
        return Err(LoginRejection::Validation("Password is too long"));
    }

    if !validate_email(email) {
        return Err(LoginRejection::Validation("Please enter a valid email address"));
    }

    validate_credentials(credentials, email, password).ok_or(LoginRejection::AuthenticationFailure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::db::types::UserRole;

    fn credentials() -> Vec<Credential> {
        db::embedded().expect("catalog").credentials
    }

    #[test]
    fn every_known_pair_matches_its_own_record() {
        let creds = credentials();
        for cred in &creds {
            let found = validate_credentials(&creds, &cred.email, &cred.password).expect("match");
            assert_eq!(found.email, cred.email);
            assert_eq!(found.role, cred.role);
        }
    }

    #[test]
    fn oversized_login_fields_are_validation_errors() {
        let creds = credentials();
        let email = format!("{}@example.com", "a".repeat(MAX_EMAIL_LEN));
        let err = check_login(&creds, &email, "Student123").unwrap_err();
        assert_eq!(err, LoginRejection::Validation("Email is too long"));
        assert!(!err.clears_password());

        let password = "p".repeat(MAX_PASSWORD_LEN + 1);
        let err = check_login(&creds, "student@skill4edge.com", &password).unwrap_err();
        assert_eq!(err, LoginRejection::Validation("Password is too long"));
    }

    #[test]
    fn mismatched_pairs_do_not_match() {
        let creds = credentials();
        assert!(validate_credentials(&creds, "student@skill4edge.com", "Admin123").is_none());
        assert!(validate_credentials(&creds, "Student@skill4edge.com", "Student123").is_none());
        assert!(validate_credentials(&creds, "student@skill4edge.com", "student123").is_none());
        assert!(validate_credentials(&creds, "", "").is_none());
    }

    #[test]
    fn email_shape() {
        assert!(validate_email("a@b.com"));
        assert!(validate_email("first.last@sub.example.org"));
        assert!(!validate_email("not-an-email"));
        assert!(!validate_email(""));
        assert!(!validate_email("a@b"));
        assert!(!validate_email("a@.com"));
        assert!(!validate_email("a@b."));
        assert!(!validate_email("@b.com"));
        assert!(!validate_email("a@@b.com"));
        assert!(!validate_email("a b@c.com"));
    }

    #[test]
    fn password_length() {
        assert!(!validate_password("12345"));
        assert!(validate_password("123456"));
    }

    #[test]
    fn check_login_orders_its_checks() {
        let creds = credentials();
        assert_eq!(
            check_login(&creds, "", "Student123").unwrap_err(),
            LoginRejection::Validation("Please enter both email and password")
        );
        assert_eq!(
            check_login(&creds, "student", "Student123").unwrap_err(),
            LoginRejection::Validation("Please enter a valid email address")
        );

        let rejected = check_login(&creds, "student@skill4edge.com", "wrong").unwrap_err();
        assert_eq!(rejected, LoginRejection::AuthenticationFailure);
        assert_eq!(rejected.to_string(), AUTH_FAILURE_MESSAGE);
        assert!(rejected.clears_password());

        let cred = check_login(&creds, "student@skill4edge.com", "Student123").expect("login");
        assert_eq!(cred.role, UserRole::Student);
        assert_eq!(cred.name, "Alex Thompson");
    }
}
