//! Create Admin Use Case
//!
//! Idempotent: creates the user as admin, or promotes an existing user and
//! replaces its password hash. No self-service length rule applies here.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Create admin input
pub struct CreateAdminInput {
    pub user_name: String,
    pub password: String,
}

/// Create admin use case
pub struct CreateAdminUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> CreateAdminUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: CreateAdminInput) -> AuthResult<User> {
        let user_name =
            UserName::new(&input.user_name).map_err(|e| AuthError::Validation(e.to_string()))?;

        let raw_password = RawPassword::new(input.password)?;
        let password_hash = UserPassword::from_raw(&raw_password, self.config.pepper())?;

        let user = self
            .user_repo
            .upsert_admin(&user_name, &password_hash)
            .await
            .inspect_err(|e| {
                tracing::error!(user_name = %user_name, error = %e, "Failed to create admin user");
            })?;

        tracing::info!(
            user_id = %user.user_id,
            user_name = %user.user_name,
            "Admin user created or updated"
        );

        Ok(user)
    }
}
