use axum::{Form, Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::CookieJar;
use enroll_application::RegisterUseCase;
use enroll_core::{Credentials, SessionProvider, UserStore};
use secrecy::Secret;
use serde::{Deserialize, Serialize};

use crate::config::EnrollSetting;
use crate::session::create_session_cookie;

use super::error::AuthApiError;

/// Raw registration form submission; same extraction rules as login.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: Option<Secret<String>>,
    pub password: Option<Secret<String>>,
}

/// Outcome states of one registration attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegisterStatus {
    Idle,
    InProgress,
    Success,
    Failed,
    UserExists,
    InvalidData,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterActionState {
    pub status: RegisterStatus,
}

#[tracing::instrument(name = "Register", skip_all)]
pub async fn register<U, P>(
    State((user_store, session_provider)): State<(U, P)>,
    jar: CookieJar,
    Form(request): Form<RegisterRequest>,
) -> Result<impl IntoResponse, AuthApiError>
where
    U: UserStore + Clone + 'static,
    P: SessionProvider + Clone + 'static,
{
    let credentials = Credentials::parse(request.email, request.password)?;

    let use_case = RegisterUseCase::new(user_store, session_provider);
    let token = use_case.execute(credentials).await?;

    // The fresh account is signed in right away, same as login.
    let config = EnrollSetting::load();
    let jar = jar.add(create_session_cookie(token, &config.session.cookie_name));

    Ok((
        jar,
        (
            StatusCode::CREATED,
            Json(RegisterActionState {
                status: RegisterStatus::Success,
            }),
        ),
    ))
}
