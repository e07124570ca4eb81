//! Authorization Middleware
//!
//! Runs the authorization decision for one route and shapes the denial.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::middleware::{Next, from_fn_with_state};
use axum::response::{IntoResponse, Response};
use axum::routing::MethodRouter;
use std::sync::Arc;

use crate::application::authorize::{AuthorizationDecision, Policy, evaluate};
use crate::application::token::TokenCodec;
use crate::domain::entity::principal::Principal;
use crate::error::AuthError;

/// Middleware state: the codec and the policy of one route
#[derive(Clone)]
pub struct PolicyGuard {
    pub codec: Arc<TokenCodec>,
    pub policy: Arc<Policy>,
}

impl PolicyGuard {
    pub fn new(codec: Arc<TokenCodec>, policy: Policy) -> Self {
        Self {
            codec,
            policy: Arc::new(policy),
        }
    }
}

/// Allow, challenge (401) or forbid (403)
///
/// On allow the caller's [`Principal`] is inserted into request extensions.
pub async fn enforce_policy(
    State(guard): State<PolicyGuard>,
    mut req: Request,
    next: Next,
) -> Response {
    let token = platform::bearer::extract_bearer_token(req.headers());

    match evaluate(&guard.policy, token.as_deref(), &guard.codec) {
        AuthorizationDecision::Allowed(principal) => {
            if let Some(principal) = principal {
                req.extensions_mut().insert(principal);
            }
            next.run(req).await
        }
        AuthorizationDecision::Unauthenticated => AuthError::Unauthenticated.into_response(),
        AuthorizationDecision::Forbidden { required_roles } => {
            AuthError::Forbidden { required_roles }.into_response()
        }
    }
}

/// Attach a policy to a single route
pub fn guarded<S>(route: MethodRouter<S>, guard: PolicyGuard) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    route.route_layer(from_fn_with_state(guard, enforce_policy))
}

/// Handlers behind a guard read the caller from extensions
impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .ok_or(AuthError::Unauthenticated)
    }
}
