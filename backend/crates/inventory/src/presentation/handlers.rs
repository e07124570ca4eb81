//! HTTP Handlers

use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use auth::Principal;
use kernel::id::ItemId;

use crate::application::config::InventoryConfig;
use crate::application::{
    CreateItemInput, CreateItemUseCase, DeleteItemUseCase, GetItemUseCase,
    LeastStockItemsUseCase, LeastSupplierStockUseCase, ListItemsUseCase,
    ListSupplierItemsUseCase, ListSuppliersUseCase, SupplierUpdateInput, SupplierUpdateUseCase,
    UpdateItemInput, UpdateItemUseCase,
};
use crate::domain::repository::{ImageStore, InventoryQueryRepository, ItemRepository, ItemSearch};
use crate::domain::value_objects::{PageRequest, SearchField};
use crate::error::{InventoryError, InventoryResult};
use crate::presentation::dto::{
    ItemResponse, LeastStockItemResponse, ListQuery, PageResponse, SupplierItemUpdateRequest,
    SupplierResponse, SupplierStockResponse,
};
use crate::presentation::multipart::{ItemForm, read_item_form};

/// Shared state for inventory handlers
#[derive(Clone)]
pub struct InventoryAppState<R, S>
where
    R: ItemRepository + InventoryQueryRepository + Clone + Send + Sync + 'static,
    S: ImageStore + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub images: Arc<S>,
    pub config: Arc<InventoryConfig>,
}

fn item_id(path: Result<Path<i64>, PathRejection>) -> InventoryResult<ItemId> {
    path.map(|Path(id)| ItemId::new(id))
        .map_err(|rejection| InventoryError::Validation(rejection.body_text()))
}

fn list_query(query: Result<Query<ListQuery>, QueryRejection>) -> InventoryResult<ListQuery> {
    query
        .map(|Query(q)| q)
        .map_err(|rejection| InventoryError::Validation(rejection.body_text()))
}

async fn item_form(
    multipart: Result<Multipart, MultipartRejection>,
) -> InventoryResult<ItemForm> {
    let multipart =
        multipart.map_err(|rejection| InventoryError::Validation(rejection.body_text()))?;
    read_item_form(multipart).await
}

/// GET /api/items
pub async fn list_items<R, S>(
    State(state): State<InventoryAppState<R, S>>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> InventoryResult<Json<PageResponse<ItemResponse>>>
where
    R: ItemRepository + InventoryQueryRepository + Clone + Send + Sync + 'static,
    S: ImageStore + Clone + Send + Sync + 'static,
{
    let query = list_query(query)?;
    let field = match query.search_field.as_deref() {
        Some(raw) if !raw.trim().is_empty() => SearchField::parse(raw.trim())?,
        _ => SearchField::default(),
    };
    let page = PageRequest::new(query.page_number, query.page_size);
    let search = ItemSearch::new(query.search_term, field);

    let result = ListItemsUseCase::new(state.repo.clone())
        .execute(page, search)
        .await?;

    Ok(Json(result.into()))
}

/// GET /api/items/{id}
pub async fn get_item<R, S>(
    State(state): State<InventoryAppState<R, S>>,
    path: Result<Path<i64>, PathRejection>,
) -> InventoryResult<Json<ItemResponse>>
where
    R: ItemRepository + InventoryQueryRepository + Clone + Send + Sync + 'static,
    S: ImageStore + Clone + Send + Sync + 'static,
{
    let item_id = item_id(path)?;
    let item = GetItemUseCase::new(state.repo.clone())
        .execute(item_id)
        .await?;

    Ok(Json(item.into()))
}

/// POST /api/items
pub async fn create_item<R, S>(
    State(state): State<InventoryAppState<R, S>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> InventoryResult<Response>
where
    R: ItemRepository + InventoryQueryRepository + Clone + Send + Sync + 'static,
    S: ImageStore + Clone + Send + Sync + 'static,
{
    let form = item_form(multipart).await?;

    let item_id = CreateItemUseCase::new(state.repo.clone(), state.images.clone())
        .execute(CreateItemInput {
            draft: form.draft,
            image: form.image,
        })
        .await?;

    let item = GetItemUseCase::new(state.repo.clone())
        .execute(item_id)
        .await
        .map_err(|e| match e {
            InventoryError::ItemNotFound => {
                InventoryError::Internal(format!("Item {item_id} missing right after insert"))
            }
            other => other,
        })?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/api/items/{item_id}"))],
        Json(ItemResponse::from(item)),
    )
        .into_response())
}

/// PUT /api/items/{id}
pub async fn update_item<R, S>(
    State(state): State<InventoryAppState<R, S>>,
    path: Result<Path<i64>, PathRejection>,
    multipart: Result<Multipart, MultipartRejection>,
) -> InventoryResult<StatusCode>
where
    R: ItemRepository + InventoryQueryRepository + Clone + Send + Sync + 'static,
    S: ImageStore + Clone + Send + Sync + 'static,
{
    let item_id = item_id(path)?;
    let form = item_form(multipart).await?;

    UpdateItemUseCase::new(state.repo.clone(), state.images.clone(), state.config.clone())
        .execute(UpdateItemInput {
            item_id,
            draft: form.draft,
            image: form.image,
        })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/items/{id}
pub async fn delete_item<R, S>(
    State(state): State<InventoryAppState<R, S>>,
    path: Result<Path<i64>, PathRejection>,
) -> InventoryResult<StatusCode>
where
    R: ItemRepository + InventoryQueryRepository + Clone + Send + Sync + 'static,
    S: ImageStore + Clone + Send + Sync + 'static,
{
    let item_id = item_id(path)?;

    DeleteItemUseCase::new(state.repo.clone(), state.images.clone())
        .execute(item_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/items/suppliers
pub async fn list_suppliers<R, S>(
    State(state): State<InventoryAppState<R, S>>,
) -> InventoryResult<Json<Vec<SupplierResponse>>>
where
    R: ItemRepository + InventoryQueryRepository + Clone + Send + Sync + 'static,
    S: ImageStore + Clone + Send + Sync + 'static,
{
    let suppliers = ListSuppliersUseCase::new(state.repo.clone()).execute().await?;
    Ok(Json(suppliers.into_iter().map(Into::into).collect()))
}

/// GET /api/items/supplier
pub async fn list_supplier_items<R, S>(
    State(state): State<InventoryAppState<R, S>>,
    caller: Principal,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> InventoryResult<Json<PageResponse<ItemResponse>>>
where
    R: ItemRepository + InventoryQueryRepository + Clone + Send + Sync + 'static,
    S: ImageStore + Clone + Send + Sync + 'static,
{
    let query = list_query(query)?;
    let page = PageRequest::new(query.page_number, query.page_size);

    let result = ListSupplierItemsUseCase::new(state.repo.clone())
        .execute(caller.user_id, page, query.search_term)
        .await?;

    Ok(Json(result.into()))
}

/// PUT /api/items/supplier/{id}
///
/// Second authorization stage: the route policy let a supplier in, the
/// store call only touches the row if that supplier owns it.
pub async fn supplier_update_item<R, S>(
    State(state): State<InventoryAppState<R, S>>,
    caller: Principal,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<SupplierItemUpdateRequest>, JsonRejection>,
) -> InventoryResult<StatusCode>
where
    R: ItemRepository + InventoryQueryRepository + Clone + Send + Sync + 'static,
    S: ImageStore + Clone + Send + Sync + 'static,
{
    let item_id = item_id(path)?;
    let Json(req) =
        payload.map_err(|rejection| InventoryError::Validation(rejection.body_text()))?;

    SupplierUpdateUseCase::new(state.repo.clone())
        .execute(SupplierUpdateInput {
            item_id,
            supplier_id: caller.user_id,
            price: req.price,
            quantity: req.quantity,
        })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/analytics/least-stock-items
pub async fn least_stock_items<R, S>(
    State(state): State<InventoryAppState<R, S>>,
) -> InventoryResult<Json<Vec<LeastStockItemResponse>>>
where
    R: ItemRepository + InventoryQueryRepository + Clone + Send + Sync + 'static,
    S: ImageStore + Clone + Send + Sync + 'static,
{
    let rows = LeastStockItemsUseCase::new(state.repo.clone(), state.config.clone())
        .execute()
        .await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

/// GET /api/analytics/least-supplier-stock
pub async fn least_supplier_stock<R, S>(
    State(state): State<InventoryAppState<R, S>>,
) -> InventoryResult<Json<Vec<SupplierStockResponse>>>
where
    R: ItemRepository + InventoryQueryRepository + Clone + Send + Sync + 'static,
    S: ImageStore + Clone + Send + Sync + 'static,
{
    let rows = LeastSupplierStockUseCase::new(state.repo.clone(), state.config.clone())
        .execute()
        .await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}
