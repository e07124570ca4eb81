//! Authorization Decision
//!
//! Evaluates the policy attached to a route against the presented bearer
//! token. Ownership of individual records is not decided here; handlers
//! that need it apply their own check after the policy allows the request.

use chrono::{DateTime, Utc};

use crate::application::token::TokenCodec;
use crate::domain::entity::principal::Principal;
use crate::domain::value_object::user_role::UserRole;

/// Authentication / role requirement of a route
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Policy {
    /// No token inspected
    Public,
    /// Any valid token
    Authenticated,
    /// Valid token whose role is in the set
    Roles(Vec<UserRole>),
}

impl Policy {
    pub fn admin() -> Self {
        Policy::Roles(vec![UserRole::Admin])
    }

    pub fn supplier() -> Self {
        Policy::Roles(vec![UserRole::Supplier])
    }
}

/// Outcome of evaluating a policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationDecision {
    /// `None` only for public routes
    Allowed(Option<Principal>),
    Unauthenticated,
    Forbidden { required_roles: Vec<UserRole> },
}

/// Evaluate `policy` for a request carrying `token`
pub fn evaluate(policy: &Policy, token: Option<&str>, codec: &TokenCodec) -> AuthorizationDecision {
    evaluate_at(policy, token, codec, Utc::now())
}

pub fn evaluate_at(
    policy: &Policy,
    token: Option<&str>,
    codec: &TokenCodec,
    now: DateTime<Utc>,
) -> AuthorizationDecision {
    if *policy == Policy::Public {
        return AuthorizationDecision::Allowed(None);
    }

    let Some(token) = token else {
        return AuthorizationDecision::Unauthenticated;
    };

    let principal = match codec.validate_at(token, now) {
        Ok(principal) => principal,
        Err(rejection) => {
            tracing::debug!(reason = %rejection, "Bearer token rejected");
            return AuthorizationDecision::Unauthenticated;
        }
    };

    match policy {
        Policy::Roles(required) if !principal.has_any_role(required) => {
            tracing::debug!(
                user_id = %principal.user_id,
                role = %principal.role,
                "Role not permitted by route policy"
            );
            AuthorizationDecision::Forbidden {
                required_roles: required.clone(),
            }
        }
        _ => AuthorizationDecision::Allowed(Some(principal)),
    }
}
