use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use auth::LookupError;
use auth::StoredUser;
use auth::UserLookup;
use tokio::sync::RwLock;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::user::errors::UserError;

/// User store kept in process memory, keyed by normalized email.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new user.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Another user already owns this email
    pub async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;
        let key = user.email.as_str().to_string();

        if users.contains_key(&key) {
            return Err(UserError::EmailAlreadyExists(key));
        }

        users.insert(key, user.clone());
        Ok(user)
    }

    /// Replace the password hash of an existing user.
    ///
    /// Returns the updated user, or None if no user has this email.
    pub async fn update_password_hash(
        &self,
        email: &EmailAddress,
        password_hash: String,
    ) -> Option<User> {
        let mut users = self.users.write().await;

        users.get_mut(email.as_str()).map(|user| {
            user.password_hash = password_hash;
            user.clone()
        })
    }

    pub async fn find_by_email(&self, email: &str) -> Option<User> {
        self.users.read().await.get(email).cloned()
    }
}

#[async_trait]
impl UserLookup for InMemoryUserRepository {
    async fn get_user_by_email(&self, email: &str) -> Result<Option<StoredUser>, LookupError> {
        Ok(self.find_by_email(email).await.map(|user| StoredUser {
            email: user.email.as_str().to_string(),
            password_hash: user.password_hash,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(email: &str) -> User {
        User::new(
            "tester".to_string(),
            EmailAddress::new(email).unwrap(),
            "$argon2id$hash".to_string(),
        )
    }

    #[tokio::test]
    async fn test_create_and_lookup() {
        let repository = InMemoryUserRepository::new();
        repository.create(user("Someone@Email.com")).await.unwrap();

        let stored = repository
            .get_user_by_email("someone@email.com")
            .await
            .unwrap()
            .expect("User not found");
        assert_eq!(stored.email, "someone@email.com");
        assert_eq!(stored.password_hash, "$argon2id$hash");
    }

    #[tokio::test]
    async fn test_lookup_missing_user() {
        let repository = InMemoryUserRepository::new();

        assert_eq!(repository.get_user_by_email("nobody@email.com").await, Ok(None));
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let repository = InMemoryUserRepository::new();
        repository.create(user("dup@email.com")).await.unwrap();

        let result = repository.create(user(" DUP@email.com")).await;
        assert_eq!(
            result.map(|u| u.id),
            Err(UserError::EmailAlreadyExists("dup@email.com".to_string()))
        );
    }

    #[tokio::test]
    async fn test_update_password_hash() {
        let repository = InMemoryUserRepository::new();
        let created = repository.create(user("someone@email.com")).await.unwrap();

        let updated = repository
            .update_password_hash(&created.email, "$argon2id$other".to_string())
            .await
            .expect("User not found");
        assert_eq!(updated.password_hash, "$argon2id$other");

        let missing = EmailAddress::new("ghost@email.com").unwrap();
        assert!(repository
            .update_password_hash(&missing, "x".to_string())
            .await
            .is_none());
    }
}
