//! User Entity

use kernel::id::UserId;

use crate::domain::value_object::{
    user_name::UserName, user_password::UserPassword, user_role::UserRole,
};

/// User entity
///
/// Rows are created by the store; the id is store-assigned.
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    pub user_name: UserName,
    pub password_hash: UserPassword,
    pub user_role: UserRole,
}
