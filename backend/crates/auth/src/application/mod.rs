//! Application Layer
//!
//! Use cases and application services.

pub mod authenticate;
pub mod authorize;
pub mod config;
pub mod create_admin;
pub mod register;
pub mod token;

// Re-exports
pub use authenticate::{AuthenticateInput, AuthenticateOutput, AuthenticateUseCase};
pub use authorize::{AuthorizationDecision, Policy, evaluate};
pub use config::AuthConfig;
pub use create_admin::{CreateAdminInput, CreateAdminUseCase};
pub use register::{RegisterInput, RegisterUseCase};
pub use token::{Claims, IssuedToken, TokenCodec, TokenRejection};
