//! Auth (Authentication / Authorization) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases, token codec, policy evaluation
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router, policy middleware
//!
//! ## Features
//! - Self-service registration (supplier role) and admin upsert
//! - Login issuing stateless HS256 bearer tokens (3 hour lifetime)
//! - Per-route policies: public, any authenticated caller, or a role set
//!
//! ## Security Model
//! - Passwords hashed with Argon2id
//! - Missing or invalid token answers 401, valid token with the wrong role 403
//! - Record ownership is checked by the owning handler, not by the policy

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::authorize::Policy;
pub use application::config::AuthConfig;
pub use application::token::TokenCodec;
pub use domain::entity::principal::Principal;
pub use domain::value_object::user_role::UserRole;
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgAuthRepository;
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::postgres::PgAuthRepository as AuthStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}

#[cfg(test)]
mod tests;

#[cfg(test)]
mod error_tests {
    use crate::domain::value_object::user_role::UserRole;
    use crate::error::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[test]
    fn test_error_into_response_status_codes() {
        let test_cases: Vec<(AuthError, StatusCode)> = vec![
            (AuthError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (AuthError::UserNameTaken, StatusCode::BAD_REQUEST),
            (AuthError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (AuthError::Unauthenticated, StatusCode::UNAUTHORIZED),
            (
                AuthError::Forbidden {
                    required_roles: vec![UserRole::Admin],
                },
                StatusCode::FORBIDDEN,
            ),
            (
                AuthError::Internal("test".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AuthError::Database(sqlx::Error::PoolTimedOut),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected_status) in test_cases {
            assert_eq!(error.status_code(), expected_status);
            let response = error.into_response();
            assert_eq!(
                response.status(),
                expected_status,
                "Error should return correct status code"
            );
        }
    }

    #[test]
    fn test_forbidden_messages() {
        assert_eq!(
            AuthError::Forbidden {
                required_roles: vec![UserRole::Admin]
            }
            .to_string(),
            "Access Denied. This resource requires the following role(s): 'Admin'."
        );
        assert_eq!(
            forbidden_message(&[UserRole::Admin, UserRole::Supplier]),
            "Access Denied. This resource requires the following role(s): 'Admin,Supplier'."
        );
        assert_eq!(
            forbidden_message(&[]),
            "Access Denied. You do not have the required permissions for this resource."
        );
    }

    #[test]
    fn test_server_errors_hide_details() {
        let app_error = AuthError::Internal("connection string leaked".into()).to_app_error();
        assert_eq!(app_error.message(), UNEXPECTED_ERROR_MESSAGE);

        let app_error = AuthError::UserNameTaken.to_app_error();
        assert_eq!(app_error.message(), "Username already exists.");
    }
}
