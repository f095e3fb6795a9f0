use secrecy::Secret;
use thiserror::Error;

use crate::domain::{email::Email, password::Password};

/// Validation errors for credential input.
#[derive(Debug, Error, PartialEq)]
pub enum UserError {
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("Password must be at least 6 characters long")]
    PasswordTooShort,
    #[error("Missing field: {0}")]
    MissingField(&'static str),
}

/// A user record as held by the user store.
///
/// The `password` field holds whatever representation the owning store uses:
/// the in-memory store keeps the submitted password, the Postgres store keeps
/// the Argon2 hash.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    email: Email,
    password: Password,
}

impl User {
    pub fn new(email: Email, password: Password) -> Self {
        Self { email, password }
    }

    /// Reconstruct a user from stored values.
    pub fn parse(email: Secret<String>, password: Secret<String>) -> Result<Self, UserError> {
        Ok(Self {
            email: Email::try_from(email)?,
            password: Password::try_from(password)?,
        })
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password(&self) -> &Password {
        &self.password
    }

    pub fn password_matches(&self, candidate: &Password) -> bool {
        &self.password == candidate
    }
}
