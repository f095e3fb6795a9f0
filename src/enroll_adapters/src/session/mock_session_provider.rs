use async_trait::async_trait;

use enroll_core::{Email, Password, SessionError, SessionProvider, SessionToken};

/// Sign-in provider stand-in for tests and local wiring.
///
/// Succeeds with a fixed token unless configured with a failure.
#[derive(Clone, Default)]
pub struct MockSessionProvider {
    failure: Option<SessionError>,
}

impl MockSessionProvider {
    pub fn succeeding() -> Self {
        Self { failure: None }
    }

    pub fn failing(error: SessionError) -> Self {
        Self {
            failure: Some(error),
        }
    }
}

#[async_trait]
impl SessionProvider for MockSessionProvider {
    async fn sign_in(
        &self,
        _email: &Email,
        _password: &Password,
    ) -> Result<SessionToken, SessionError> {
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }

        Ok(SessionToken::new("mock-session-token".to_string()))
    }
}
