//! Item Query Use Cases
//!
//! Read-only lookups and listings for admins and suppliers.

use std::sync::Arc;

use kernel::id::{ItemId, UserId};

use crate::domain::entities::{Item, Page, Supplier};
use crate::domain::repository::{InventoryQueryRepository, ItemRepository, ItemSearch};
use crate::domain::value_objects::PageRequest;
use crate::error::{InventoryError, InventoryResult};

/// Single item lookup
pub struct GetItemUseCase<R>
where
    R: ItemRepository,
{
    item_repo: Arc<R>,
}

impl<R> GetItemUseCase<R>
where
    R: ItemRepository,
{
    pub fn new(item_repo: Arc<R>) -> Self {
        Self { item_repo }
    }

    pub async fn execute(&self, item_id: ItemId) -> InventoryResult<Item> {
        self.item_repo
            .find_by_id(item_id)
            .await?
            .ok_or(InventoryError::ItemNotFound)
    }
}

/// Paged listing of every item (admin)
pub struct ListItemsUseCase<Q>
where
    Q: InventoryQueryRepository,
{
    query_repo: Arc<Q>,
}

impl<Q> ListItemsUseCase<Q>
where
    Q: InventoryQueryRepository,
{
    pub fn new(query_repo: Arc<Q>) -> Self {
        Self { query_repo }
    }

    pub async fn execute(
        &self,
        page: PageRequest,
        search: Option<ItemSearch>,
    ) -> InventoryResult<Page<Item>> {
        let result = self.query_repo.list_items(page, search.as_ref()).await?;
        tracing::debug!(
            page = page.page_number(),
            size = page.page_size(),
            total = result.total_count,
            "Listed items"
        );
        Ok(result)
    }
}

/// Paged listing of the calling supplier's items
pub struct ListSupplierItemsUseCase<Q>
where
    Q: InventoryQueryRepository,
{
    query_repo: Arc<Q>,
}

impl<Q> ListSupplierItemsUseCase<Q>
where
    Q: InventoryQueryRepository,
{
    pub fn new(query_repo: Arc<Q>) -> Self {
        Self { query_repo }
    }

    pub async fn execute(
        &self,
        supplier_id: UserId,
        page: PageRequest,
        search_term: Option<String>,
    ) -> InventoryResult<Page<Item>> {
        let search_term = search_term
            .map(|term| term.trim().to_string())
            .filter(|term| !term.is_empty());

        self.query_repo
            .list_supplier_items(supplier_id, page, search_term.as_deref())
            .await
    }
}

/// Every supplier account
pub struct ListSuppliersUseCase<Q>
where
    Q: InventoryQueryRepository,
{
    query_repo: Arc<Q>,
}

impl<Q> ListSuppliersUseCase<Q>
where
    Q: InventoryQueryRepository,
{
    pub fn new(query_repo: Arc<Q>) -> Self {
        Self { query_repo }
    }

    pub async fn execute(&self) -> InventoryResult<Vec<Supplier>> {
        self.query_repo.list_suppliers().await
    }
}
