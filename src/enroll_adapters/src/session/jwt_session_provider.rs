use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{EncodingKey, encode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize, ser::SerializeStruct};

use enroll_core::{
    Email, Password, SessionError, SessionProvider, SessionToken, UserStore, UserStoreError,
};

#[derive(Clone)]
pub struct JwtSessionConfig {
    pub jwt_secret: Secret<String>,
    pub token_ttl_in_seconds: i64,
}

impl JwtSessionConfig {
    pub fn as_bytes(&self) -> &[u8] {
        self.jwt_secret.expose_secret().as_bytes()
    }
}

/// Sign-in provider backed by the user store and local JWT issuance.
///
/// Verifies the credential pair against the store, then mints an HS256 token
/// carrying the email and expiry. "Not found" and "wrong password" both
/// surface as `InvalidCredentials`.
#[derive(Clone)]
pub struct JwtSessionProvider<U> {
    user_store: U,
    config: JwtSessionConfig,
}

impl<U> JwtSessionProvider<U> {
    pub fn new(user_store: U, config: JwtSessionConfig) -> Self {
        Self { user_store, config }
    }
}

#[async_trait]
impl<U> SessionProvider for JwtSessionProvider<U>
where
    U: UserStore + Clone + 'static,
{
    #[tracing::instrument(name = "JwtSessionProvider::sign_in", skip_all)]
    async fn sign_in(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<SessionToken, SessionError> {
        self.user_store
            .authenticate_user(email, password)
            .await
            .map_err(|error| match error {
                UserStoreError::UserNotFound | UserStoreError::IncorrectPassword => {
                    SessionError::InvalidCredentials
                }
                UserStoreError::Unavailable(message) => SessionError::Unavailable(message),
                other => SessionError::UnexpectedError(other.to_string()),
            })?;

        generate_session_token(email, self.config.token_ttl_in_seconds, self.config.as_bytes())
    }
}

// Mint a session JWT for an authenticated user
pub fn generate_session_token(
    email: &Email,
    token_ttl_seconds: i64,
    secret: &[u8],
) -> Result<SessionToken, SessionError> {
    let delta = chrono::Duration::try_seconds(token_ttl_seconds).ok_or(
        SessionError::UnexpectedError("Failed to create session token duration".to_string()),
    )?;

    let exp = Utc::now()
        .checked_add_signed(delta)
        .ok_or(SessionError::UnexpectedError(
            "Duration out of range".to_string(),
        ))?
        .timestamp();

    let exp: usize = exp
        .try_into()
        .map_err(|_| SessionError::UnexpectedError("Failed to cast i64 to usize".to_string()))?;

    let claims = Claims {
        sub: Clone::clone(email.as_ref()),
        exp,
    };

    encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &EncodingKey::from_secret(secret),
    )
    .map(SessionToken::new)
    .map_err(|e| SessionError::UnexpectedError(e.to_string()))
}

#[derive(Debug, Deserialize, Clone)]
pub struct Claims {
    pub sub: Secret<String>,
    pub exp: usize,
}

impl Serialize for Claims {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("Claims", 2)?;
        state.serialize_field("sub", &self.sub.expose_secret())?;
        state.serialize_field("exp", &self.exp)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::{DecodingKey, Validation, decode};

    use crate::persistence::HashMapUserStore;
    use enroll_core::User;

    use super::*;

    fn jwt_session_config() -> JwtSessionConfig {
        JwtSessionConfig {
            jwt_secret: Secret::from("secret".to_owned()),
            token_ttl_in_seconds: 600,
        }
    }

    fn email() -> Email {
        Email::try_from(Secret::from("user@example.com".to_owned())).unwrap()
    }

    fn password(value: &str) -> Password {
        Password::try_from(Secret::from(value.to_owned())).unwrap()
    }

    #[tokio::test]
    async fn test_generate_session_token() {
        let config = jwt_session_config();
        let token = generate_session_token(&email(), config.token_ttl_in_seconds, config.as_bytes())
            .unwrap();
        assert_eq!(token.as_str().split('.').count(), 3);
    }

    #[tokio::test]
    async fn test_minted_token_decodes_to_the_signed_in_email() {
        let config = jwt_session_config();
        let token = generate_session_token(&email(), config.token_ttl_in_seconds, config.as_bytes())
            .unwrap();

        let claims = decode::<Claims>(
            token.as_str(),
            &DecodingKey::from_secret(config.as_bytes()),
            &Validation::default(),
        )
        .unwrap()
        .claims;

        assert_eq!(claims.sub.expose_secret(), "user@example.com");
    }

    #[tokio::test]
    async fn test_sign_in_with_known_user() {
        let user_store = HashMapUserStore::new();
        user_store
            .add_user(User::new(email(), password("secret1")))
            .await
            .unwrap();

        let provider = JwtSessionProvider::new(user_store, jwt_session_config());
        let token = provider.sign_in(&email(), &password("secret1")).await.unwrap();

        assert_eq!(token.as_str().split('.').count(), 3);
    }

    #[tokio::test]
    async fn test_sign_in_with_wrong_password() {
        let user_store = HashMapUserStore::new();
        user_store
            .add_user(User::new(email(), password("secret1")))
            .await
            .unwrap();

        let provider = JwtSessionProvider::new(user_store, jwt_session_config());
        let result = provider.sign_in(&email(), &password("secret2")).await;

        assert_eq!(result, Err(SessionError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_sign_in_with_unknown_user() {
        let provider = JwtSessionProvider::new(HashMapUserStore::new(), jwt_session_config());
        let result = provider.sign_in(&email(), &password("secret1")).await;

        assert_eq!(result, Err(SessionError::InvalidCredentials));
    }
}
