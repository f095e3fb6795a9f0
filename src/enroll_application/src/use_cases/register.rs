use enroll_core::{
    Credentials, SessionError, SessionProvider, SessionToken, User, UserStore, UserStoreError,
};

/// Error types specific to the register use case
#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("User already exists")]
    UserExists,
    #[error("User store error: {0}")]
    UserStoreError(UserStoreError),
    #[error("Sign-in provider error: {0}")]
    SessionError(#[from] SessionError),
}

impl From<UserStoreError> for RegisterError {
    fn from(error: UserStoreError) -> Self {
        match error {
            // An insert conflict is the authoritative user-exists signal.
            UserStoreError::UserAlreadyExists => RegisterError::UserExists,
            other => RegisterError::UserStoreError(other),
        }
    }
}

/// Register use case - handles new-user registration
///
/// Existence check precedes creation; creation precedes sign-in. If sign-in
/// fails after the record was created, the record stays.
pub struct RegisterUseCase<U, P>
where
    U: UserStore,
    P: SessionProvider,
{
    user_store: U,
    session_provider: P,
}

impl<U, P> RegisterUseCase<U, P>
where
    U: UserStore,
    P: SessionProvider,
{
    pub fn new(user_store: U, session_provider: P) -> Self {
        Self {
            user_store,
            session_provider,
        }
    }

    /// Execute the register use case
    ///
    /// # Arguments
    /// * `credentials` - Already-validated email/password pair
    ///
    /// # Returns
    /// The session token for the freshly created user, or RegisterError
    #[tracing::instrument(name = "RegisterUseCase::execute", skip_all)]
    pub async fn execute(&self, credentials: Credentials) -> Result<SessionToken, RegisterError> {
        tracing::info!("registration started");

        let (email, password) = credentials.into_parts();

        tracing::info!("checking for existing user");
        match self.user_store.get_user(&email).await {
            Ok(_) => return Err(RegisterError::UserExists),
            Err(UserStoreError::UserNotFound) => {}
            Err(error) => return Err(error.into()),
        }

        tracing::info!("creating user record");
        self.user_store
            .add_user(User::new(email.clone(), password.clone()))
            .await?;

        let token = self.session_provider.sign_in(&email, &password).await?;

        tracing::info!("registration completed");
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use enroll_core::{Email, Password};
    use secrecy::Secret;
    use tokio::sync::RwLock;

    use super::*;

    // Mock user store that records how often add_user is invoked
    #[derive(Clone, Default)]
    struct MockUserStore {
        users: Arc<RwLock<HashMap<Email, User>>>,
        add_user_calls: Arc<AtomicUsize>,
        add_user_error: Option<UserStoreError>,
    }

    #[async_trait::async_trait]
    impl UserStore for MockUserStore {
        async fn add_user(&self, user: User) -> Result<(), UserStoreError> {
            self.add_user_calls.fetch_add(1, Ordering::SeqCst);
            if let Some(error) = &self.add_user_error {
                return Err(error.clone());
            }
            let mut users = self.users.write().await;
            if users.contains_key(user.email()) {
                return Err(UserStoreError::UserAlreadyExists);
            }
            users.insert(user.email().clone(), user);
            Ok(())
        }

        async fn get_user(&self, email: &Email) -> Result<User, UserStoreError> {
            let users = self.users.read().await;
            users
                .get(email)
                .cloned()
                .ok_or(UserStoreError::UserNotFound)
        }

        async fn authenticate_user(
            &self,
            _email: &Email,
            _password: &Password,
        ) -> Result<(), UserStoreError> {
            unimplemented!()
        }
    }

    // Mock sign-in provider that records how often sign_in is invoked
    #[derive(Clone)]
    struct MockSessionProvider {
        result: Result<SessionToken, SessionError>,
        sign_in_calls: Arc<AtomicUsize>,
    }

    impl MockSessionProvider {
        fn with_result(result: Result<SessionToken, SessionError>) -> Self {
            Self {
                result,
                sign_in_calls: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    #[async_trait::async_trait]
    impl SessionProvider for MockSessionProvider {
        async fn sign_in(
            &self,
            _email: &Email,
            _password: &Password,
        ) -> Result<SessionToken, SessionError> {
            self.sign_in_calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }
    }

    fn credentials() -> Credentials {
        Credentials::parse(
            Some(Secret::from("user@example.com".to_string())),
            Some(Secret::from("secret1".to_string())),
        )
        .unwrap()
    }

    fn existing_user() -> User {
        let email = Email::try_from(Secret::from("user@example.com".to_string())).unwrap();
        let password = Password::try_from(Secret::from("secret1".to_string())).unwrap();
        User::new(email, password)
    }

    #[tokio::test]
    async fn test_register_success() {
        let user_store = MockUserStore::default();
        let provider =
            MockSessionProvider::with_result(Ok(SessionToken::new("token-1".to_string())));
        let use_case = RegisterUseCase::new(user_store.clone(), provider);

        let result = use_case.execute(credentials()).await;

        assert_eq!(result.unwrap(), SessionToken::new("token-1".to_string()));
        assert_eq!(user_store.add_user_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_register_existing_user_skips_creation() {
        let user_store = MockUserStore::default();
        {
            let mut users = user_store.users.write().await;
            let user = existing_user();
            users.insert(user.email().clone(), user);
        }
        let provider =
            MockSessionProvider::with_result(Ok(SessionToken::new("token-1".to_string())));
        let sign_in_calls = provider.sign_in_calls.clone();
        let use_case = RegisterUseCase::new(user_store.clone(), provider);

        let result = use_case.execute(credentials()).await;

        assert!(matches!(result, Err(RegisterError::UserExists)));
        assert_eq!(user_store.add_user_calls.load(Ordering::SeqCst), 0);
        assert_eq!(sign_in_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_register_insert_conflict_reports_user_exists() {
        // The pre-check sees no user, but the insert loses a race.
        let user_store = MockUserStore {
            add_user_error: Some(UserStoreError::UserAlreadyExists),
            ..MockUserStore::default()
        };
        let provider =
            MockSessionProvider::with_result(Ok(SessionToken::new("token-1".to_string())));
        let sign_in_calls = provider.sign_in_calls.clone();
        let use_case = RegisterUseCase::new(user_store, provider);

        let result = use_case.execute(credentials()).await;

        assert!(matches!(result, Err(RegisterError::UserExists)));
        assert_eq!(sign_in_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_register_store_failure_skips_sign_in() {
        let user_store = MockUserStore {
            add_user_error: Some(UserStoreError::Unavailable("connection reset".to_string())),
            ..MockUserStore::default()
        };
        let provider =
            MockSessionProvider::with_result(Ok(SessionToken::new("token-1".to_string())));
        let sign_in_calls = provider.sign_in_calls.clone();
        let use_case = RegisterUseCase::new(user_store, provider);

        let result = use_case.execute(credentials()).await;

        assert!(matches!(
            result,
            Err(RegisterError::UserStoreError(UserStoreError::Unavailable(
                _
            )))
        ));
        assert_eq!(sign_in_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_register_sign_in_failure_after_creation() {
        let user_store = MockUserStore::default();
        let provider = MockSessionProvider::with_result(Err(SessionError::Unavailable(
            "provider offline".to_string(),
        )));
        let use_case = RegisterUseCase::new(user_store.clone(), provider);

        let result = use_case.execute(credentials()).await;

        assert!(matches!(result, Err(RegisterError::SessionError(_))));
        // The record was created before sign-in failed and is not rolled back.
        assert_eq!(user_store.add_user_calls.load(Ordering::SeqCst), 1);
    }
}
