//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::TokenCodec;
use crate::application::{
    AuthenticateInput, AuthenticateUseCase, CreateAdminInput, CreateAdminUseCase, RegisterInput,
    RegisterUseCase,
};
use crate::domain::entity::principal::Principal;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    CredentialsRequest, LoginResponse, MeResponse, MessageResponse, RegisterResponse,
};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    pub codec: Arc<TokenCodec>,
}

/// Unwrap a JSON body, keeping the error shape of the API
fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> AuthResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AuthError::Validation(rejection.body_text()))
}

/// POST /api/auth/register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> AuthResult<Json<RegisterResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let req = json_body(payload)?;
    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());

    let user = use_case
        .execute(RegisterInput {
            user_name: req.username,
            password: req.password,
        })
        .await?;

    Ok(Json(RegisterResponse {
        user_id: user.user_id.get(),
        username: user.user_name.into_inner(),
        role: user.user_role,
    }))
}

/// POST /api/auth/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> AuthResult<Json<LoginResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let req = json_body(payload)?;
    let use_case =
        AuthenticateUseCase::new(state.repo.clone(), state.config.clone(), state.codec.clone());

    let output = use_case
        .execute(AuthenticateInput {
            user_name: req.username,
            password: req.password,
        })
        .await?;

    Ok(Json(LoginResponse {
        token: output.token,
        username: output.user_name,
        role: output.role,
        expires_at: output.expires_at.timestamp(),
    }))
}

/// POST /api/auth/create-admin
pub async fn create_admin<R>(
    State(state): State<AuthAppState<R>>,
    caller: Principal,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> AuthResult<Json<MessageResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let req = json_body(payload)?;
    let use_case = CreateAdminUseCase::new(state.repo.clone(), state.config.clone());

    let user = use_case
        .execute(CreateAdminInput {
            user_name: req.username,
            password: req.password,
        })
        .await?;

    tracing::info!(
        caller_id = %caller.user_id,
        user_id = %user.user_id,
        "Admin created over HTTP"
    );

    Ok(Json(MessageResponse {
        message: format!(
            "Admin user '{}' created/updated successfully.",
            user.user_name
        ),
    }))
}

/// GET /api/auth/me
pub async fn me(caller: Principal) -> Json<MeResponse> {
    Json(MeResponse {
        user_id: caller.user_id.get(),
        username: caller.user_name,
        role: caller.role,
    })
}
