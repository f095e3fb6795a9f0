use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use enroll_core::{Email, Password, User, UserStore, UserStoreError};

/// In-memory user store, for tests and local wiring.
///
/// Passwords are kept as submitted; only the Postgres store hashes.
#[derive(Default, Clone)]
pub struct HashMapUserStore {
    users: Arc<RwLock<HashMap<Email, User>>>,
}

impl HashMapUserStore {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait::async_trait]
impl UserStore for HashMapUserStore {
    async fn add_user(&self, user: User) -> Result<(), UserStoreError> {
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
        email: &Email,
        password: &Password,
    ) -> Result<(), UserStoreError> {
        let users = self.users.read().await;
        let user = users.get(email).ok_or(UserStoreError::UserNotFound)?;

        if !user.password_matches(password) {
            return Err(UserStoreError::IncorrectPassword);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use secrecy::Secret;

    use super::*;

    fn user(email: &str, password: &str) -> User {
        User::new(
            Email::try_from(Secret::from(email.to_string())).unwrap(),
            Password::try_from(Secret::from(password.to_string())).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_add_and_get_user() {
        let store = HashMapUserStore::new();
        let user = user("user@example.com", "secret1");

        store.add_user(user.clone()).await.unwrap();

        let stored = store.get_user(user.email()).await.unwrap();
        assert_eq!(stored, user);
    }

    #[tokio::test]
    async fn test_add_duplicate_user() {
        let store = HashMapUserStore::new();
        let user = user("user@example.com", "secret1");

        store.add_user(user.clone()).await.unwrap();
        let result = store.add_user(user).await;

        assert_eq!(result, Err(UserStoreError::UserAlreadyExists));
    }

    #[tokio::test]
    async fn test_get_missing_user() {
        let store = HashMapUserStore::new();
        let user = user("user@example.com", "secret1");

        let result = store.get_user(user.email()).await;
        assert_eq!(result, Err(UserStoreError::UserNotFound));
    }

    #[tokio::test]
    async fn test_authenticate_user() {
        let store = HashMapUserStore::new();
        let user = user("user@example.com", "secret1");
        store.add_user(user.clone()).await.unwrap();

        assert!(
            store
                .authenticate_user(user.email(), user.password())
                .await
                .is_ok()
        );

        let wrong = Password::try_from(Secret::from("secret2".to_string())).unwrap();
        let result = store.authenticate_user(user.email(), &wrong).await;
        assert_eq!(result, Err(UserStoreError::IncorrectPassword));
    }
}
