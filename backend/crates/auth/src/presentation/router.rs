//! Auth Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::authorize::Policy;
use crate::application::config::AuthConfig;
use crate::application::token::TokenCodec;
use crate::domain::repository::UserRepository;
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{PolicyGuard, guarded};

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(
    repo: PgAuthRepository,
    config: Arc<AuthConfig>,
    codec: Arc<TokenCodec>,
) -> Router {
    auth_router_generic(repo, config, codec)
}

/// Create a generic Auth router for any repository implementation
///
/// | Route | Policy |
/// |---|---|
/// | `POST /register`, `POST /login` | public |
/// | `POST /create-admin` | Admin |
/// | `GET /me` | any valid token |
pub fn auth_router_generic<R>(repo: R, config: Arc<AuthConfig>, codec: Arc<TokenCodec>) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let admin = PolicyGuard::new(codec.clone(), Policy::admin());
    let authenticated = PolicyGuard::new(codec.clone(), Policy::Authenticated);

    let state = AuthAppState {
        repo: Arc::new(repo),
        config,
        codec,
    };

    Router::new()
        .route("/register", post(handlers::register::<R>))
        .route("/login", post(handlers::login::<R>))
        .route(
            "/create-admin",
            guarded(post(handlers::create_admin::<R>), admin),
        )
        .route("/me", guarded(get(handlers::me), authenticated))
        .with_state(state)
}
