//! Authenticate Use Case
//!
//! Verifies credentials and issues a bearer token.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::application::config::AuthConfig;
use crate::application::token::TokenCodec;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    user_name::UserName, user_password::RawPassword, user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

/// Authenticate input
pub struct AuthenticateInput {
    pub user_name: String,
    pub password: String,
}

/// Authenticate output
#[derive(Debug, Clone)]
pub struct AuthenticateOutput {
    pub token: String,
    pub user_name: String,
    pub role: UserRole,
    pub expires_at: DateTime<Utc>,
}

/// Authenticate use case
pub struct AuthenticateUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
    codec: Arc<TokenCodec>,
}

impl<U> AuthenticateUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>, codec: Arc<TokenCodec>) -> Self {
        Self {
            user_repo,
            config,
            codec,
        }
    }

    /// Unknown user, malformed input and wrong password are indistinguishable
    /// to the caller.
    pub async fn execute(&self, input: AuthenticateInput) -> AuthResult<AuthenticateOutput> {
        let attempted = input.user_name.as_str();

        let (Ok(user_name), Ok(raw_password)) =
            (UserName::new(attempted), RawPassword::new(input.password))
        else {
            tracing::warn!(user_name = %attempted, "Failed login attempt: malformed input");
            return Err(AuthError::InvalidCredentials);
        };

        let user = self
            .user_repo
            .find_by_user_name(&user_name)
            .await
            .inspect_err(|e| {
                tracing::error!(user_name = %user_name, error = %e, "Failed to load user for login");
            })?;

        let Some(user) = user else {
            tracing::warn!(user_name = %user_name, "Failed login attempt: unknown user");
            return Err(AuthError::InvalidCredentials);
        };

        if !user.password_hash.verify(&raw_password, self.config.pepper()) {
            tracing::warn!(user_name = %user_name, "Failed login attempt: wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let issued = self.codec.issue(&user)?;
        let expires_at = DateTime::<Utc>::from_timestamp(issued.claims.exp, 0)
            .ok_or_else(|| AuthError::Internal("Token expiry out of range".to_string()))?;

        tracing::info!(
            user_id = %user.user_id,
            user_name = %user.user_name,
            role = %user.user_role,
            "User authenticated"
        );

        Ok(AuthenticateOutput {
            token: issued.token,
            user_name: user.user_name.into_inner(),
            role: user.user_role,
            expires_at,
        })
    }
}
