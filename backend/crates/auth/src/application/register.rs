//! Register Use Case
//!
//! Creates a new user account with the default (supplier) role.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::{RegisterOutcome, UserRepository};
use crate::domain::value_object::{
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    pub user_name: String,
    pub password: String,
}

/// Register use case
pub struct RegisterUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> RegisterUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<User> {
        let user_name =
            UserName::new(&input.user_name).map_err(|e| AuthError::Validation(e.to_string()))?;

        let raw_password = RawPassword::new(input.password)?;
        raw_password.check_registration_length()?;
        let password_hash = UserPassword::from_raw(&raw_password, self.config.pepper())?;

        let outcome = self
            .user_repo
            .register(&user_name, &password_hash)
            .await
            .inspect_err(|e| {
                tracing::error!(user_name = %user_name, error = %e, "Failed to register user");
            })?;

        match outcome {
            RegisterOutcome::Created(user) => {
                tracing::info!(
                    user_id = %user.user_id,
                    user_name = %user.user_name,
                    "User registered"
                );
                Ok(user)
            }
            RegisterOutcome::UserNameTaken => {
                tracing::info!(user_name = %user_name, "Registration rejected: user name taken");
                Err(AuthError::UserNameTaken)
            }
        }
    }
}
