// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Validation routines for login input and stored records

use crate::{
    error::{Error, Result},
    types::Credentials,
};

pub const USERNAME_REQUIRED: &str = "Enter a username";
pub const SECRET_REQUIRED: &str = "Enter a password or token";

/// Per-field problems with login input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginInputErrors {
    pub username: Option<&'static str>,
    pub secret: Option<&'static str>,
}

impl LoginInputErrors {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.secret.is_none()
    }
}

/// Check login input after trimming
///
/// Both fields are checked so every problem is reported at once.
pub fn validate_login_input(username: &str, secret: &str) -> std::result::Result<(), LoginInputErrors> {
    let errors = LoginInputErrors {
        username: username.trim().is_empty().then_some(USERNAME_REQUIRED),
        secret: secret.trim().is_empty().then_some(SECRET_REQUIRED),
    };
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Semantic checks applied to a record read from disk
pub fn validate_credentials(credentials: &Credentials) -> Result<()> {
    if credentials.username.trim().is_empty() {
        return Err(Error::Validation("Stored username is empty".to_string()));
    }
    if credentials.secret.is_empty() {
        return Err(Error::Validation("Stored secret is empty".to_string()));
    }

    let now = chrono::Utc::now();
    if credentials.saved_at > now + chrono::Duration::hours(1) {
        return Err(Error::Validation(
            "Stored credentials were saved in the future".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AuthScheme;

    #[test]
    fn reports_each_blank_field() {
        let errors = validate_login_input("  ", "").unwrap_err();
        assert_eq!(errors.username, Some(USERNAME_REQUIRED));
        assert_eq!(errors.secret, Some(SECRET_REQUIRED));

        let errors = validate_login_input("octocat", " \t").unwrap_err();
        assert_eq!(errors.username, None);
        assert_eq!(errors.secret, Some(SECRET_REQUIRED));

        assert!(validate_login_input("octocat", "ghp_x").is_ok());
    }

    #[test]
    fn rejects_future_timestamps() {
        let mut creds = Credentials::new("octocat", "pw", AuthScheme::Basic);
        assert!(validate_credentials(&creds).is_ok());

        creds.saved_at = chrono::Utc::now() + chrono::Duration::days(2);
        assert!(matches!(validate_credentials(&creds), Err(Error::Validation(_))));
    }
}
