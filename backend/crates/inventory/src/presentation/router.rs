//! Inventory Router

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, put};
use std::sync::Arc;

use auth::application::authorize::Policy;
use auth::application::token::TokenCodec;
use auth::presentation::middleware::{PolicyGuard, guarded};

use crate::application::config::InventoryConfig;
use crate::domain::repository::{ImageStore, InventoryQueryRepository, ItemRepository};
use crate::infra::image_store::LocalImageStore;
use crate::infra::postgres::PgInventoryRepository;
use crate::presentation::handlers::{self, InventoryAppState};

/// Create the Inventory router with PostgreSQL and local disk storage
pub fn inventory_router(
    repo: PgInventoryRepository,
    images: LocalImageStore,
    config: Arc<InventoryConfig>,
    codec: Arc<TokenCodec>,
) -> Router {
    inventory_router_generic(repo, images, config, codec)
}

/// Create a generic Inventory router for any repository/store implementation
///
/// Meant to be nested under `/api`.
///
/// | Route | Policy |
/// |---|---|
/// | `/items`, `/items/{id}`, `/items/suppliers` | Admin |
/// | `/items/supplier`, `/items/supplier/{id}` | Supplier |
/// | `/analytics/*` | Admin |
pub fn inventory_router_generic<R, S>(
    repo: R,
    images: S,
    config: Arc<InventoryConfig>,
    codec: Arc<TokenCodec>,
) -> Router
where
    R: ItemRepository + InventoryQueryRepository + Clone + Send + Sync + 'static,
    S: ImageStore + Clone + Send + Sync + 'static,
{
    let admin = PolicyGuard::new(codec.clone(), Policy::admin());
    let supplier = PolicyGuard::new(codec, Policy::supplier());
    let body_limit = config.max_upload_bytes;

    let state = InventoryAppState {
        repo: Arc::new(repo),
        images: Arc::new(images),
        config,
    };

    Router::new()
        .route(
            "/items",
            guarded(
                get(handlers::list_items::<R, S>).post(handlers::create_item::<R, S>),
                admin.clone(),
            ),
        )
        .route(
            "/items/suppliers",
            guarded(get(handlers::list_suppliers::<R, S>), admin.clone()),
        )
        .route(
            "/items/supplier",
            guarded(get(handlers::list_supplier_items::<R, S>), supplier.clone()),
        )
        .route(
            "/items/supplier/{id}",
            guarded(
                put(handlers::supplier_update_item::<R, S>),
                supplier,
            ),
        )
        .route(
            "/items/{id}",
            guarded(
                get(handlers::get_item::<R, S>)
                    .put(handlers::update_item::<R, S>)
                    .delete(handlers::delete_item::<R, S>),
                admin.clone(),
            ),
        )
        .route(
            "/analytics/least-stock-items",
            guarded(get(handlers::least_stock_items::<R, S>), admin.clone()),
        )
        .route(
            "/analytics/least-supplier-stock",
            guarded(get(handlers::least_supplier_stock::<R, S>), admin),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
