use axum::{Form, Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::CookieJar;
use enroll_application::LoginUseCase;
use enroll_core::{Credentials, SessionProvider};
use secrecy::Secret;
use serde::{Deserialize, Serialize};

use crate::config::EnrollSetting;
use crate::session::create_session_cookie;

use super::error::AuthApiError;

/// Raw login form submission. Fields stay optional so an absent field is
/// reported as `invalid_data` rather than rejected by the extractor.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<Secret<String>>,
    pub password: Option<Secret<String>>,
}

/// Outcome states of one login attempt.
///
/// `Idle` and `InProgress` belong to the form client's lifecycle; the handler
/// itself only ever reports the terminal states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoginStatus {
    Idle,
    InProgress,
    Success,
    Failed,
    InvalidData,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginActionState {
    pub status: LoginStatus,
}

#[tracing::instrument(name = "Login", skip_all)]
pub async fn login<P>(
    State(session_provider): State<P>,
    jar: CookieJar,
    Form(request): Form<LoginRequest>,
) -> Result<impl IntoResponse, AuthApiError>
where
    P: SessionProvider + Clone + 'static,
{
    let credentials = Credentials::parse(request.email, request.password)?;

    let use_case = LoginUseCase::new(session_provider);
    let token = use_case.execute(credentials).await?;

    let config = EnrollSetting::load();
    let jar = jar.add(create_session_cookie(token, &config.session.cookie_name));

    Ok((
        jar,
        (
            StatusCode::OK,
            Json(LoginActionState {
                status: LoginStatus::Success,
            }),
        ),
    ))
}
