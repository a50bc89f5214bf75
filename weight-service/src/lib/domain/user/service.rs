use std::sync::Arc;

use auth::AuthService;

use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::outbound::repositories::InMemoryUserRepository;
use crate::user::errors::UserError;

/// Domain service for account registration.
pub struct UserService {
    repository: Arc<InMemoryUserRepository>,
    auth_service: Arc<AuthService<InMemoryUserRepository>>,
}

impl UserService {
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User store the new accounts are written to
    /// * `auth_service` - Used to hash passwords on the blocking pool
    pub fn new(
        repository: Arc<InMemoryUserRepository>,
        auth_service: Arc<AuthService<InMemoryUserRepository>>,
    ) -> Self {
        Self {
            repository,
            auth_service,
        }
    }

    /// Register a new user with a hashed password.
    ///
    /// Duplicate emails are rejected before the password is hashed.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Another user already owns this email
    /// * `Unknown` - Password hashing failed
    pub async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError> {
        if self
            .repository
            .find_by_email(command.email.as_str())
            .await
            .is_some()
        {
            tracing::info!(email = %command.email, "Registration rejected: email taken");
            return Err(UserError::EmailAlreadyExists(command.email.to_string()));
        }

        let password_hash = self
            .auth_service
            .hash_password(command.password.as_str())
            .await
            .map_err(|e| UserError::Unknown(format!("Password hashing failed: {}", e)))?;

        // A concurrent registration may have taken the email while hashing
        let user = self
            .repository
            .create(User::new(command.name, command.email, password_hash))
            .await?;

        tracing::info!(user_id = %user.id, email = %user.email, "User registered");

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use auth::PasswordHasher;

    use super::*;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::Password;

    fn user_service() -> (UserService, Arc<InMemoryUserRepository>) {
        let repository = Arc::new(InMemoryUserRepository::new());
        let auth_service = Arc::new(
            AuthService::new(
                Arc::clone(&repository),
                b"test_signing_key",
                chrono::Duration::minutes(15),
            )
            .with_password_hasher(PasswordHasher::with_minimum_cost().unwrap()),
        );

        (
            UserService::new(Arc::clone(&repository), auth_service),
            repository,
        )
    }

    fn command(email: &str) -> RegisterUserCommand {
        RegisterUserCommand::new(
            "new_user".to_string(),
            EmailAddress::new(email).unwrap(),
            Password::new("correct_password1234".to_string()).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_register_stores_hashed_password() {
        let (service, repository) = user_service();

        let user = service.register(command("new_user@email.com")).await.unwrap();

        let stored = repository.find_by_email("new_user@email.com").await.unwrap();
        assert_eq!(stored.id, user.id);
        assert_ne!(stored.password_hash, "correct_password1234");
        assert!(PasswordHasher::new().verify("correct_password1234", &stored.password_hash));
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let (service, _) = user_service();
        service.register(command("new_user@email.com")).await.unwrap();

        let result = service.register(command("New_User@Email.com")).await;

        assert_eq!(
            result.unwrap_err(),
            UserError::EmailAlreadyExists("new_user@email.com".to_string())
        );
    }
}
