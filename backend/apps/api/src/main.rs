//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use anyhow::Context;
use auth::application::{CreateAdminInput, CreateAdminUseCase};
use auth::{AuthConfig, PgAuthRepository, TokenCodec, auth_router};
use axum::{
    Router, http,
    http::{Method, header},
};
use inventory::{ImageReplacement, InventoryConfig, LocalImageStore, PgInventoryRepository, inventory_router};
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,auth=info,inventory=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url =
        env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    let auth_config = Arc::new(load_auth_config()?);
    let inventory_config = Arc::new(load_inventory_config()?);
    tracing::info!(
        auth = ?auth_config,
        inventory = ?inventory_config,
        "Configuration loaded"
    );

    let codec = Arc::new(TokenCodec::new(&auth_config));
    let auth_store = PgAuthRepository::new(pool.clone());

    // Optional admin bootstrap; a failure here must not keep the server down
    bootstrap_admin(&auth_store, &auth_config).await;

    // CORS configuration
    let frontend_origins =
        env::var("FRONTEND_ORIGINS").unwrap_or_else(|_| "http://localhost:3000".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    let images = LocalImageStore::new(&inventory_config.image_root);
    let image_dir = images.dir().to_path_buf();

    // Build router
    let app = Router::new()
        .nest(
            "/api/auth",
            auth_router(auth_store, auth_config.clone(), codec.clone()),
        )
        .nest(
            "/api",
            inventory_router(
                PgInventoryRepository::new(pool.clone()),
                images,
                inventory_config.clone(),
                codec,
            ),
        )
        .nest_service("/images", ServeDir::new(image_dir))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr: SocketAddr = env::var("BIND_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:5000".to_string())
        .parse()
        .context("BIND_ADDR must be a socket address")?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Auth settings from the environment
///
/// `JWT_KEY` is mandatory in release builds. Debug builds fall back to a
/// random key, so tokens stop validating after a restart.
fn load_auth_config() -> anyhow::Result<AuthConfig> {
    let mut config = match env::var("JWT_KEY") {
        Ok(key) if !key.is_empty() => AuthConfig {
            jwt_secret: key.into_bytes(),
            ..AuthConfig::default()
        },
        _ if cfg!(debug_assertions) => {
            tracing::warn!("JWT_KEY not set, using a random signing key");
            AuthConfig::development()
        }
        _ => anyhow::bail!("JWT_KEY must be set in production"),
    };

    if let Ok(issuer) = env::var("JWT_ISSUER") {
        config.jwt_issuer = issuer;
    }
    if let Ok(audience) = env::var("JWT_AUDIENCE") {
        config.jwt_audience = audience;
    }
    if let Ok(validate) = env::var("JWT_VALIDATE_LIFETIME") {
        config.validate_lifetime = validate
            .trim()
            .parse()
            .context("JWT_VALIDATE_LIFETIME must be true or false")?;
    }

    Ok(config)
}

/// Inventory settings from the environment
fn load_inventory_config() -> anyhow::Result<InventoryConfig> {
    let mut config = InventoryConfig::default();

    if let Ok(root) = env::var("IMAGE_ROOT") {
        config.image_root = PathBuf::from(root);
    }
    if let Ok(mode) = env::var("IMAGE_REPLACEMENT") {
        config.image_replacement = mode
            .parse::<ImageReplacement>()
            .map_err(anyhow::Error::msg)?;
    }

    Ok(config)
}

/// Create or promote the admin named by `BOOTSTRAP_ADMIN_USERNAME`
async fn bootstrap_admin(store: &PgAuthRepository, config: &Arc<AuthConfig>) {
    let (Ok(user_name), Ok(password)) = (
        env::var("BOOTSTRAP_ADMIN_USERNAME"),
        env::var("BOOTSTRAP_ADMIN_PASSWORD"),
    ) else {
        return;
    };

    let use_case = CreateAdminUseCase::new(Arc::new(store.clone()), config.clone());
    match use_case
        .execute(CreateAdminInput {
            user_name,
            password,
        })
        .await
    {
        Ok(user) => {
            tracing::info!(user_id = %user.user_id, "Bootstrap admin ready");
        }
        Err(e) => {
            tracing::warn!(error = %e, "Bootstrap admin failed, continuing anyway");
        }
    }
}
