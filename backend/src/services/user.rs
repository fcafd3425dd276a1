//! Registration, login and logout
//!
//! Password hashing and verification run on the blocking thread pool.

use crate::auth::{AuthUser, JwtService, PasswordService, RevokedSessions};
use crate::error::ApiError;
use crate::storage::Storage;
use nutrifit_shared::validation::{self, field};
use nutrifit_shared::{AuthResponse, Id, LoginRequest, NewUser, RegisterRequest, User};
use tracing::info;

pub struct UserService;

impl UserService {
    fn session_for(jwt_service: &JwtService, user: User) -> Result<AuthResponse, ApiError> {
        let (token, _) = jwt_service
            .issue_session_token(user.id)
            .map_err(ApiError::Internal)?;

        Ok(AuthResponse {
            user,
            token,
            token_type: "Bearer".to_string(),
            expires_in: jwt_service.session_expiry_secs(),
        })
    }

    /// Create an account and start a session
    pub async fn register(
        storage: &dyn Storage,
        jwt_service: &JwtService,
        req: RegisterRequest,
    ) -> Result<AuthResponse, ApiError> {
        let username = req.username.trim().to_string();
        let email = req.email.trim().to_string();

        field("username", || validation::validate_username(&username))?;
        field("email", || validation::validate_email(&email))?;
        field("password", || validation::validate_password(&req.password))?;

        if storage.user_by_username(&username).await?.is_some() {
            return Err(ApiError::Conflict("Username already exists".to_string()));
        }
        if storage.user_by_email(&email).await?.is_some() {
            return Err(ApiError::Conflict("Email already registered".to_string()));
        }

        let password = PasswordService::hash_async(req.password)
            .await
            .map_err(ApiError::Internal)?;

        let user = storage
            .create_user(NewUser {
                username,
                email,
                full_name: req.full_name.filter(|n| !n.trim().is_empty()),
                password,
                profile_pic: req.profile_pic.filter(|p| !p.trim().is_empty()),
            })
            .await?;

        info!(user_id = user.id, "User registered");
        Self::session_for(jwt_service, user)
    }

    /// Check credentials and start a session
    pub async fn login(
        storage: &dyn Storage,
        jwt_service: &JwtService,
        req: LoginRequest,
    ) -> Result<AuthResponse, ApiError> {
        let invalid = || ApiError::Unauthorized("Invalid username or password".to_string());

        let Some(user) = storage.user_by_username(req.username.trim()).await? else {
            PasswordService::verify_decoy(req.password)
                .await
                .map_err(ApiError::Internal)?;
            return Err(invalid());
        };

        let valid = PasswordService::verify_async(req.password, user.password.clone())
            .await
            .map_err(ApiError::Internal)?;
        if !valid {
            return Err(invalid());
        }

        info!(user_id = user.id, "User logged in");
        Self::session_for(jwt_service, user)
    }

    /// End the caller's session
    pub async fn logout(sessions: &RevokedSessions, auth: &AuthUser) {
        sessions.revoke(&auth.jti, auth.expires_at).await;
        info!(user_id = auth.user_id, "User logged out");
    }

    /// The user behind a session; a deleted account ends the session
    pub async fn current_user(storage: &dyn Storage, user_id: Id) -> Result<User, ApiError> {
        storage
            .user(user_id)
            .await?
            .ok_or_else(|| ApiError::Unauthorized("User no longer exists".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemStorage;
    use axum::http::StatusCode;

    fn register_request(username: &str, email: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: "correct horse battery".to_string(),
            full_name: Some("Ada Lovelace".to_string()),
            profile_pic: None,
        }
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let storage = MemStorage::new();
        let jwt = JwtService::new("test-secret", 3600);

        let registered = UserService::register(&storage, &jwt, register_request("ada", "ada@example.com"))
            .await
            .unwrap();
        assert_eq!(registered.user.username, "ada");
        assert_ne!(registered.user.password, "correct horse battery");
        assert_eq!(registered.expires_in, 3600);

        let logged_in = UserService::login(
            &storage,
            &jwt,
            LoginRequest {
                username: "ada".to_string(),
                password: "correct horse battery".to_string(),
            },
        )
        .await
        .unwrap();
        assert_eq!(logged_in.user.id, registered.user.id);
        let claims = jwt.validate_session_token(&logged_in.token).unwrap();
        assert_eq!(claims.user_id().unwrap(), registered.user.id);
    }

    #[tokio::test]
    async fn test_duplicate_username_and_email_conflict() {
        let storage = MemStorage::new();
        let jwt = JwtService::new("test-secret", 3600);
        UserService::register(&storage, &jwt, register_request("ada", "ada@example.com"))
            .await
            .unwrap();

        let err = UserService::register(&storage, &jwt, register_request("ada", "other@example.com"))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::CONFLICT);

        let err = UserService::register(&storage, &jwt, register_request("grace", "ADA@example.com"))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_register_validation() {
        let storage = MemStorage::new();
        let jwt = JwtService::new("test-secret", 3600);

        let mut req = register_request("ada", "not-an-email");
        let err = UserService::register(&storage, &jwt, req.clone()).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().contains("Email"));

        req.email = "ada@example.com".to_string();
        req.password = "short".to_string();
        let err = UserService::register(&storage, &jwt, req).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(storage.user_by_username("ada").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_wrong_password_unauthorized() {
        let storage = MemStorage::new();
        let jwt = JwtService::new("test-secret", 3600);
        UserService::register(&storage, &jwt, register_request("ada", "ada@example.com"))
            .await
            .unwrap();

        for (username, password) in [("ada", "wrong password"), ("nobody", "correct horse battery")] {
            let err = UserService::login(
                &storage,
                &jwt,
                LoginRequest {
                    username: username.to_string(),
                    password: password.to_string(),
                },
            )
            .await
            .unwrap_err();
            assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
        }
    }
}
