//! Principal
//!
//! The validated caller of a guarded request. Built from token claims by the
//! authorization pipeline and placed in request extensions.

use kernel::id::UserId;
use uuid::Uuid;

use crate::domain::value_object::user_role::UserRole;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: UserId,
    pub user_name: String,
    pub role: UserRole,
    /// `jti` of the presented token
    pub token_id: Uuid,
}

impl Principal {
    pub fn has_any_role(&self, roles: &[UserRole]) -> bool {
        roles.contains(&self.role)
    }
}
