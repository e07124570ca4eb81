//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::user::User;
use crate::domain::value_object::{user_name::UserName, user_password::UserPassword};
use crate::error::AuthResult;

/// Result of a registration attempt
#[derive(Debug, Clone)]
pub enum RegisterOutcome {
    Created(User),
    UserNameTaken,
}

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new user with the default role
    async fn register(
        &self,
        user_name: &UserName,
        password_hash: &UserPassword,
    ) -> AuthResult<RegisterOutcome>;

    /// Create the user as admin, or promote and re-hash an existing one
    async fn upsert_admin(
        &self,
        user_name: &UserName,
        password_hash: &UserPassword,
    ) -> AuthResult<User>;

    /// Find user by user name (exact match)
    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<User>>;
}
