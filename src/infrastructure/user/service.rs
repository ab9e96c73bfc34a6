//! User service for signup, login and lookup

use std::sync::Arc;

use tracing::info;

use crate::domain::user::{
    validate_email, validate_name, validate_password, User, UserId, UserRepository,
};
use crate::domain::DomainError;

use super::password::PasswordHasher;

/// Request for registering a new user
#[derive(Debug, Clone)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// User service for account management and credential checks
#[derive(Debug)]
pub struct UserService<R: UserRepository, H: PasswordHasher> {
    repository: Arc<R>,
    hasher: Arc<H>,
}

impl<R: UserRepository, H: PasswordHasher> UserService<R, H> {
    pub fn new(repository: Arc<R>, hasher: Arc<H>) -> Self {
        Self { repository, hasher }
    }

    /// Register a new user
    ///
    /// Validates input, hashes the password and persists the account.
    /// The plaintext password never reaches the repository.
    pub async fn signup(&self, request: SignupRequest) -> Result<User, DomainError> {
        validate_name(&request.name).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_email(&request.email).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_password(&request.password)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        if self.repository.email_exists(&request.email).await? {
            return Err(DomainError::conflict(format!(
                "Email '{}' is already registered",
                request.email
            )));
        }

        let password_hash = self.hasher.hash(&request.password)?;
        let user = User::new(&request.name, &request.email, password_hash);

        let created = self.repository.create(user).await?;

        info!(user_id = %created.id(), "User signed up");

        Ok(created)
    }

    /// Authenticate with email and password
    ///
    /// An unknown email and a wrong password are distinct failures here
    /// (NotFound vs Credential), matching the 404/401 split at the API.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, DomainError> {
        let user = self
            .repository
            .get_by_email(email)
            .await?
            .ok_or_else(|| DomainError::not_found("User not found with the given email"))?;

        if !self.hasher.verify(password, user.password_hash()) {
            return Err(DomainError::credential("Incorrect password"));
        }

        info!(user_id = %user.id(), "User logged in");

        Ok(user)
    }

    /// Get a user by ID
    pub async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        self.repository.get(id).await
    }

    /// Count registered users
    pub async fn count(&self) -> Result<usize, DomainError> {
        self.repository.count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::user::password::Argon2PasswordHasher;
    use crate::infrastructure::user::repository::InMemoryUserRepository;

    fn create_service() -> UserService<InMemoryUserRepository, Argon2PasswordHasher> {
        let repository = Arc::new(InMemoryUserRepository::new());
        let hasher = Arc::new(Argon2PasswordHasher::new());
        UserService::new(repository, hasher)
    }

    fn make_request(name: &str, email: &str, password: &str) -> SignupRequest {
        SignupRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_signup() {
        let service = create_service();

        let user = service
            .signup(make_request("Alice", "alice@x.com", "secret1"))
            .await
            .unwrap();

        assert_eq!(user.name(), "Alice");
        assert_eq!(user.email(), "alice@x.com");
    }

    #[tokio::test]
    async fn test_signup_stores_hash_not_plaintext() {
        let service = create_service();

        let user = service
            .signup(make_request("Alice", "alice@x.com", "secret1"))
            .await
            .unwrap();

        assert_ne!(user.password_hash(), "secret1");
    }

    #[tokio::test]
    async fn test_signup_invalid_input() {
        let service = create_service();

        assert!(service
            .signup(make_request("", "alice@x.com", "secret1"))
            .await
            .is_err());
        assert!(service
            .signup(make_request("Alice", "not-an-email", "secret1"))
            .await
            .is_err());
        assert!(service
            .signup(make_request("Alice", "alice@x.com", "short"))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_signup_duplicate_email() {
        let service = create_service();

        service
            .signup(make_request("Alice", "alice@x.com", "secret1"))
            .await
            .unwrap();

        let result = service
            .signup(make_request("Other Alice", "alice@x.com", "secret2"))
            .await;

        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_login_success() {
        let service = create_service();

        let created = service
            .signup(make_request("Alice", "alice@x.com", "secret1"))
            .await
            .unwrap();

        let user = service.login("alice@x.com", "secret1").await.unwrap();
        assert_eq!(user.id(), created.id());
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let service = create_service();

        let result = service.login("nobody@x.com", "secret1").await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let service = create_service();

        service
            .signup(make_request("Alice", "alice@x.com", "secret1"))
            .await
            .unwrap();

        let result = service.login("alice@x.com", "wrong-pass").await;
        assert!(matches!(result, Err(DomainError::Credential { .. })));
    }

    #[tokio::test]
    async fn test_get_and_count() {
        let service = create_service();

        let created = service
            .signup(make_request("Alice", "alice@x.com", "secret1"))
            .await
            .unwrap();

        let fetched = service.get(created.id()).await.unwrap().unwrap();
        assert_eq!(fetched.email(), "alice@x.com");

        assert_eq!(service.count().await.unwrap(), 1);
    }
}
