//! User service for authentication and user management
//!
//! Password hashing and verification run on the blocking thread pool; the
//! JWT service is passed by reference with its keys already derived.

use crate::auth::{JwtService, PasswordService};
use crate::error::ApiError;
use crate::repositories::{UserInput, UserRecord, UserStore};
use munch_bunch_shared::types::{CreateUserRequest, UpdateUserRequest, UserProfile};
use munch_bunch_shared::validation::{describe, validate_password};
use munch_bunch_shared::AuthError;
use tracing::{debug, info};
use validator::Validate;

/// User service for authentication operations
pub struct UserService;

impl UserService {
    /// Create a user, hashing the supplied password
    pub async fn create(
        store: &dyn UserStore,
        passwords: PasswordService,
        req: CreateUserRequest,
    ) -> Result<UserProfile, ApiError> {
        req.validate()
            .map_err(|e| ApiError::Validation(describe(&e)))?;
        validate_password(&req.password).map_err(ApiError::Validation)?;

        let password_hash = passwords.hash_async(req.password).await?;

        let user = store
            .create(UserInput {
                username: req.username,
                password_hash,
                first_name: req.first_name,
                last_name: req.last_name,
                email: req.email,
                has_truck: req.has_truck,
            })
            .await?;

        info!(user_id = user.id, username = %user.username, "User created");
        Ok(to_profile(user))
    }

    /// Verify a username/password pair and mint a bearer token
    ///
    /// Unknown usernames are `NotFound`; a wrong password is
    /// `AuthError::InvalidCredentials`. The store is only read.
    pub async fn authenticate(
        store: &dyn UserStore,
        jwt: &JwtService,
        username: &str,
        password: &str,
    ) -> Result<String, ApiError> {
        let user = store
            .find_by_username(username)
            .await?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        let valid = PasswordService::verify_async(password.to_string(), user.password_hash).await;
        if !valid {
            debug!(username = %username, "Password mismatch");
            return Err(AuthError::InvalidCredentials.into());
        }

        let token = jwt.issue_token(&user.username)?;
        info!(username = %user.username, "Token issued");
        Ok(token)
    }

    pub async fn get(store: &dyn UserStore, id: i32) -> Result<UserProfile, ApiError> {
        store
            .find_by_id(id)
            .await?
            .map(to_profile)
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))
    }

    /// Replace a user's profile
    ///
    /// A supplied password is re-hashed; otherwise the stored hash is kept.
    pub async fn update(
        store: &dyn UserStore,
        passwords: PasswordService,
        id: i32,
        req: UpdateUserRequest,
    ) -> Result<UserProfile, ApiError> {
        req.validate()
            .map_err(|e| ApiError::Validation(describe(&e)))?;

        let existing = store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        let password_hash = match req.password {
            Some(password) => {
                validate_password(&password).map_err(ApiError::Validation)?;
                passwords.hash_async(password).await?
            }
            None => existing.password_hash,
        };

        let user = store
            .update(
                id,
                UserInput {
                    username: req.username,
                    password_hash,
                    first_name: req.first_name,
                    last_name: req.last_name,
                    email: req.email,
                    has_truck: req.has_truck,
                },
            )
            .await?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        info!(user_id = user.id, "User updated");
        Ok(to_profile(user))
    }

    pub async fn delete(store: &dyn UserStore, id: i32) -> Result<(), ApiError> {
        if !store.delete(id).await? {
            return Err(ApiError::NotFound("User not found".to_string()));
        }
        info!(user_id = id, "User deleted");
        Ok(())
    }
}

fn to_profile(user: UserRecord) -> UserProfile {
    UserProfile {
        id: user.id,
        username: user.username,
        first_name: user.first_name,
        last_name: user.last_name,
        email: user.email,
        has_truck: user.has_truck,
        created_at: user.created_at,
        updated_at: user.updated_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MemoryStore;
    use secrecy::SecretString;

    fn passwords() -> PasswordService {
        PasswordService::new(4)
    }

    fn jwt() -> JwtService {
        JwtService::new(&SecretString::new("unit-test-secret".to_string()), None)
    }

    fn alice() -> CreateUserRequest {
        CreateUserRequest {
            username: "alice".into(),
            password: "secret123".into(),
            first_name: "Alice".into(),
            last_name: "Liddell".into(),
            email: "alice@example.com".into(),
            has_truck: true,
        }
    }

    #[tokio::test]
    async fn test_created_user_stores_hash_not_password() {
        let store = MemoryStore::new();
        let profile = UserService::create(&store, passwords(), alice()).await.unwrap();

        let record = store.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(record.id, profile.id);
        assert_ne!(record.password_hash, "secret123");
        assert!(PasswordService::verify("secret123", &record.password_hash));
    }

    #[tokio::test]
    async fn test_authenticate_issues_verifiable_token() {
        let store = MemoryStore::new();
        let jwt = jwt();
        UserService::create(&store, passwords(), alice()).await.unwrap();

        let token = UserService::authenticate(&store, &jwt, "alice", "secret123")
            .await
            .unwrap();
        assert_eq!(jwt.verify_token(&token).unwrap().username, "alice");
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password() {
        let store = MemoryStore::new();
        UserService::create(&store, passwords(), alice()).await.unwrap();

        let err = UserService::authenticate(&store, &jwt(), "alice", "nope")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Auth(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_authenticate_rejects_extended_max_length_password() {
        let store = MemoryStore::new();
        let mut bob = alice();
        bob.username = "bob".into();
        bob.password = "x".repeat(72);
        UserService::create(&store, passwords(), bob).await.unwrap();

        let err = UserService::authenticate(&store, &jwt(), "bob", &"x".repeat(100))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Auth(AuthError::InvalidCredentials)));

        assert!(UserService::authenticate(&store, &jwt(), "bob", &"x".repeat(72))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_authenticate_unknown_user() {
        let store = MemoryStore::new();
        let err = UserService::authenticate(&store, &jwt(), "ghost", "secret123")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_keeps_hash_without_password() {
        let store = MemoryStore::new();
        let profile = UserService::create(&store, passwords(), alice()).await.unwrap();
        let before = store.find_by_username("alice").await.unwrap().unwrap();

        let req = UpdateUserRequest {
            username: "alice".into(),
            password: None,
            first_name: "Alice".into(),
            last_name: "Kingsleigh".into(),
            email: "alice@example.com".into(),
            has_truck: false,
        };
        let updated = UserService::update(&store, passwords(), profile.id, req)
            .await
            .unwrap();
        assert_eq!(updated.last_name, "Kingsleigh");

        let after = store.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(before.password_hash, after.password_hash);
    }

    #[tokio::test]
    async fn test_update_rehashes_new_password() {
        let store = MemoryStore::new();
        let jwt = jwt();
        let profile = UserService::create(&store, passwords(), alice()).await.unwrap();

        let req = UpdateUserRequest {
            username: "alice".into(),
            password: Some("new-secret".into()),
            first_name: "Alice".into(),
            last_name: "Liddell".into(),
            email: "alice@example.com".into(),
            has_truck: true,
        };
        UserService::update(&store, passwords(), profile.id, req)
            .await
            .unwrap();

        assert!(UserService::authenticate(&store, &jwt, "alice", "secret123")
            .await
            .is_err());
        assert!(UserService::authenticate(&store, &jwt, "alice", "new-secret")
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_create_rejects_blank_fields() {
        let store = MemoryStore::new();
        let mut req = alice();
        req.first_name = String::new();

        let err = UserService::create(&store, passwords(), req).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn test_delete_missing_user() {
        let store = MemoryStore::new();
        let err = UserService::delete(&store, 42).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
