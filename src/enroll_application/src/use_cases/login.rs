use enroll_core::{Credentials, SessionError, SessionProvider, SessionToken};

/// Error types specific to the login use case
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("Sign-in provider error: {0}")]
    SessionError(#[from] SessionError),
}

/// Login use case - delegates session establishment for validated credentials
pub struct LoginUseCase<P>
where
    P: SessionProvider,
{
    session_provider: P,
}

impl<P> LoginUseCase<P>
where
    P: SessionProvider,
{
    pub fn new(session_provider: P) -> Self {
        Self { session_provider }
    }

    /// Execute the login use case
    ///
    /// # Arguments
    /// * `credentials` - Already-validated email/password pair
    ///
    /// # Returns
    /// The session token on success, or LoginError if the provider rejects
    /// the credentials or is unreachable
    #[tracing::instrument(name = "LoginUseCase::execute", skip_all)]
    pub async fn execute(&self, credentials: Credentials) -> Result<SessionToken, LoginError> {
        let token = self
            .session_provider
            .sign_in(credentials.email(), credentials.password())
            .await?;

        Ok(token)
    }
}
