use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use enroll_application::{LoginError, RegisterError};
use enroll_core::{SessionError, UserError, UserStoreError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Action status the form client switches on; mirrors the status field of
    /// the success bodies.
    pub status: String,
    pub error: String,
}

/// Error taxonomy of the credential handlers.
///
/// Each failure cause keeps its own variant and HTTP status code; the action
/// status reported to the form client is derived from the variant.
#[derive(Debug, Error)]
pub enum AuthApiError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("User store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Sign-in provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl AuthApiError {
    fn action_status(&self) -> &'static str {
        match self {
            AuthApiError::InvalidInput(_) => "invalid_data",
            AuthApiError::UserAlreadyExists => "user_exists",
            AuthApiError::AuthenticationFailed(_)
            | AuthApiError::StoreUnavailable(_)
            | AuthApiError::ProviderUnavailable(_)
            | AuthApiError::UnexpectedError(_) => "failed",
        }
    }
}

impl IntoResponse for AuthApiError {
    fn into_response(self) -> Response {
        let status_code = match &self {
            AuthApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AuthApiError::AuthenticationFailed(_) => StatusCode::UNAUTHORIZED,
            AuthApiError::UserAlreadyExists => StatusCode::CONFLICT,
            AuthApiError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AuthApiError::ProviderUnavailable(_) => StatusCode::BAD_GATEWAY,
            AuthApiError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse {
            status: self.action_status().to_string(),
            error: self.to_string(),
        });

        (status_code, body).into_response()
    }
}

impl From<UserError> for AuthApiError {
    fn from(error: UserError) -> Self {
        AuthApiError::InvalidInput(error.to_string())
    }
}

impl From<UserStoreError> for AuthApiError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::UserAlreadyExists => AuthApiError::UserAlreadyExists,
            UserStoreError::UserNotFound | UserStoreError::IncorrectPassword => {
                AuthApiError::AuthenticationFailed(error.to_string())
            }
            UserStoreError::Unavailable(message) => AuthApiError::StoreUnavailable(message),
            UserStoreError::UnexpectedError(message) => AuthApiError::UnexpectedError(message),
        }
    }
}

impl From<SessionError> for AuthApiError {
    fn from(error: SessionError) -> Self {
        match error {
            SessionError::InvalidCredentials => {
                AuthApiError::AuthenticationFailed(error.to_string())
            }
            SessionError::Unavailable(message) => AuthApiError::ProviderUnavailable(message),
            SessionError::UnexpectedError(message) => AuthApiError::UnexpectedError(message),
        }
    }
}

impl From<LoginError> for AuthApiError {
    fn from(error: LoginError) -> Self {
        match error {
            LoginError::SessionError(e) => e.into(),
        }
    }
}

impl From<RegisterError> for AuthApiError {
    fn from(error: RegisterError) -> Self {
        match error {
            RegisterError::UserExists => AuthApiError::UserAlreadyExists,
            RegisterError::UserStoreError(e) => e.into(),
            RegisterError::SessionError(e) => e.into(),
        }
    }
}
