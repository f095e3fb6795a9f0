use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{email::Email, password::Password, session_token::SessionToken};

#[derive(Debug, Clone, Error)]
pub enum SessionError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Sign-in provider unavailable: {0}")]
    Unavailable(String),
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for SessionError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidCredentials, Self::InvalidCredentials) => true,
            (Self::Unavailable(_), Self::Unavailable(_)) => true,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

/// Port trait for the external sign-in provider.
///
/// Given validated credentials the provider establishes a session and hands
/// back the session token. The handlers never redirect on its behalf.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn sign_in(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<SessionToken, SessionError>;
}
