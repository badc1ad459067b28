//! User service
//!
//! Implements account registration, login and token checks:
//! - Registration rejects duplicate emails
//! - Login distinguishes unknown emails from wrong passwords
//! - Every successful login receives the configured access token

use crate::db::repositories::UserRepository;
use crate::models::User;
use crate::services::password::{hash_password, verify_password};
use anyhow::Context;
use std::sync::Arc;

/// Error types for user service operations
#[derive(Debug, thiserror::Error)]
pub enum UserServiceError {
    /// Invalid input
    #[error("{0}")]
    ValidationError(String),

    /// Email already registered
    #[error("Email already registered")]
    EmailTaken,

    /// No account for this email
    #[error("Email not registered")]
    EmailNotRegistered,

    /// Password does not match
    #[error("Incorrect password")]
    IncorrectPassword,

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

/// Minimum password length, in characters
pub const MIN_PASSWORD_LEN: usize = 6;

/// Successful login
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub user: User,
}

/// User service for accounts and authentication
pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
    token: String,
}

impl UserService {
    /// Create a new user service handing out `token` on login
    pub fn new(user_repo: Arc<dyn UserRepository>, token: impl Into<String>) -> Self {
        Self {
            user_repo,
            token: token.into(),
        }
    }

    /// Register a new account
    ///
    /// # Errors
    ///
    /// - `ValidationError` if the email is blank or has no `@`, or the password is
    ///   shorter than [`MIN_PASSWORD_LEN`]
    /// - `EmailTaken` if the email is already registered
    pub async fn register(&self, input: RegisterInput) -> Result<User, UserServiceError> {
        let email = input.email.trim().to_string();
        validate_credentials(&email, &input.password)?;

        let password_hash = hash_password(&input.password).context("Failed to hash password")?;
        let user = User::new(email, password_hash);

        let created = self
            .user_repo
            .create(&user)
            .await
            .context("Failed to create user")?
            .ok_or(UserServiceError::EmailTaken)?;

        tracing::info!(email = %created.email, "Account registered");
        Ok(created)
    }

    /// Check credentials and return the access token
    ///
    /// # Errors
    ///
    /// - `EmailNotRegistered` if no account uses the email
    /// - `IncorrectPassword` if the password does not match
    pub async fn login(&self, input: LoginInput) -> Result<LoginOutcome, UserServiceError> {
        let user = self
            .user_repo
            .get_by_email(input.email.trim())
            .await
            .context("Failed to look up user")?
            .ok_or(UserServiceError::EmailNotRegistered)?;

        let valid = verify_password(&input.password, &user.password_hash)
            .context("Failed to verify password")?;
        if !valid {
            tracing::debug!(email = %user.email, "Login rejected: incorrect password");
            return Err(UserServiceError::IncorrectPassword);
        }

        Ok(LoginOutcome {
            token: self.token.clone(),
            user,
        })
    }

    /// Whether a presented token grants access
    pub fn validate_token(&self, token: &str) -> bool {
        !token.is_empty() && token == self.token
    }

    /// Register an account unless it already exists (used for seeding)
    pub async fn ensure_user(
        &self,
        email: &str,
        password: &str,
    ) -> Result<bool, UserServiceError> {
        match self.register(RegisterInput::new(email, password)).await {
            Ok(_) => Ok(true),
            Err(UserServiceError::EmailTaken) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Number of registered accounts
    pub async fn count(&self) -> Result<usize, UserServiceError> {
        Ok(self.user_repo.count().await.context("Failed to count users")?)
    }
}

fn validate_credentials(email: &str, password: &str) -> Result<(), UserServiceError> {
    if email.is_empty() {
        return Err(UserServiceError::ValidationError("Email is required".to_string()));
    }
    if !email.contains('@') {
        return Err(UserServiceError::ValidationError("Invalid email format".to_string()));
    }
    if password.is_empty() {
        return Err(UserServiceError::ValidationError("Password is required".to_string()));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(UserServiceError::ValidationError(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

/// Input for user registration
#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub email: String,
    pub password: String,
}

impl RegisterInput {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Input for user login
#[derive(Debug, Clone)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

impl LoginInput {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_store;
    use crate::db::repositories::MemoryUserRepository;

    fn setup_test_service() -> UserService {
        UserService::new(MemoryUserRepository::boxed(create_store()), "test-token")
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let service = setup_test_service();
        service
            .register(RegisterInput::new("editor@example.com", "secret"))
            .await
            .expect("Failed to register");

        let outcome = service
            .login(LoginInput::new("editor@example.com", "secret"))
            .await
            .expect("Failed to login");

        assert_eq!(outcome.token, "test-token");
        assert_eq!(outcome.user.email, "editor@example.com");
    }

    #[tokio::test]
    async fn test_register_stores_hash_not_password() {
        let service = setup_test_service();
        let user = service
            .register(RegisterInput::new("a@example.com", "plaintext"))
            .await
            .unwrap();

        assert_ne!(user.password_hash, "plaintext");
        assert!(user.password_hash.starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn test_register_duplicate_email_fails() {
        let service = setup_test_service();
        service.register(RegisterInput::new("a@example.com", "first-pass")).await.unwrap();

        let result = service.register(RegisterInput::new("a@example.com", "second-pass")).await;
        assert!(matches!(result, Err(UserServiceError::EmailTaken)));
    }

    #[tokio::test]
    async fn test_register_validation() {
        let service = setup_test_service();

        let blank = service.register(RegisterInput::new("  ", "secret")).await;
        assert!(matches!(blank, Err(UserServiceError::ValidationError(_))));

        let no_at = service.register(RegisterInput::new("not-an-email", "secret")).await;
        assert!(matches!(no_at, Err(UserServiceError::ValidationError(_))));

        let no_password = service.register(RegisterInput::new("a@example.com", "")).await;
        assert!(matches!(no_password, Err(UserServiceError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_register_short_password() {
        let service = setup_test_service();

        let result = service.register(RegisterInput::new("a@example.com", "12345")).await;
        match result {
            Err(UserServiceError::ValidationError(msg)) => {
                assert_eq!(msg, "Password must be at least 6 characters");
            }
            other => panic!("expected validation error, got {:?}", other),
        }

        // Counted in characters, not bytes
        let short_multibyte = service
            .register(RegisterInput::new("b@example.com", "ééééé"))
            .await;
        assert!(matches!(short_multibyte, Err(UserServiceError::ValidationError(_))));

        service
            .register(RegisterInput::new("a@example.com", "123456"))
            .await
            .expect("six characters is enough");
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let service = setup_test_service();
        let result = service.login(LoginInput::new("ghost@example.com", "secret")).await;
        assert!(matches!(result, Err(UserServiceError::EmailNotRegistered)));
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let service = setup_test_service();
        service.register(RegisterInput::new("a@example.com", "right-pass")).await.unwrap();

        let result = service.login(LoginInput::new("a@example.com", "wrong-pass")).await;
        assert!(matches!(result, Err(UserServiceError::IncorrectPassword)));
    }

    #[tokio::test]
    async fn test_ensure_user_is_idempotent() {
        let service = setup_test_service();
        assert!(service.ensure_user("seed@example.com", "secret").await.unwrap());
        assert!(!service.ensure_user("seed@example.com", "secret").await.unwrap());
        assert_eq!(service.count().await.unwrap(), 1);
    }

    #[test]
    fn test_validate_token() {
        let service = setup_test_service();
        assert!(service.validate_token("test-token"));
        assert!(!service.validate_token("other"));
        assert!(!service.validate_token(""));
    }
}
