//! Account registration and login.

use crate::auth::password::{generate_salt, hash_password, verify_password};
use crate::auth::{AuthError, TokenIssuer};
use crate::db::Repository;
use crate::domain::{Credentials, User};
use std::sync::Arc;
use tracing::{debug, info};

pub struct UserService {
    repo: Arc<Repository>,
    tokens: TokenIssuer,
}

impl UserService {
    pub fn new(repo: Arc<Repository>, tokens: TokenIssuer) -> Self {
        Self { repo, tokens }
    }

    /// Create an account; the password is stored as a salted digest.
    pub async fn register(&self, credentials: Credentials) -> Result<User, AuthError> {
        let username = credentials.username.trim();
        if username.is_empty() || credentials.password.is_empty() {
            return Err(AuthError::Validation(
                "username and password must not be empty".to_string(),
            ));
        }

        let salt = generate_salt();
        let digest = hash_password(&credentials.password, &salt);

        let user = self
            .repo
            .insert_user(username, &digest, &salt)
            .await
            .map_err(|e| {
                if e.is_unique_violation() {
                    AuthError::UsernameTaken(username.to_string())
                } else {
                    AuthError::Persistence(e)
                }
            })?;

        info!(user_id = user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Check credentials and issue an access token.
    pub async fn login(&self, credentials: Credentials) -> Result<String, AuthError> {
        let stored = self
            .repo
            .find_user_by_username(credentials.username.trim())
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(&credentials.password, &stored.salt, &stored.password_hash) {
            debug!(username = %stored.username, "Rejected login with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        self.tokens.issue(stored.id)
    }
}
