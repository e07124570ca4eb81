//! Stock Analytics Use Cases

use std::sync::Arc;

use crate::application::config::InventoryConfig;
use crate::domain::entities::{LeastStockItem, SupplierStock};
use crate::domain::repository::InventoryQueryRepository;
use crate::error::InventoryResult;

/// Items with the lowest quantity
pub struct LeastStockItemsUseCase<Q>
where
    Q: InventoryQueryRepository,
{
    query_repo: Arc<Q>,
    config: Arc<InventoryConfig>,
}

impl<Q> LeastStockItemsUseCase<Q>
where
    Q: InventoryQueryRepository,
{
    pub fn new(query_repo: Arc<Q>, config: Arc<InventoryConfig>) -> Self {
        Self { query_repo, config }
    }

    pub async fn execute(&self) -> InventoryResult<Vec<LeastStockItem>> {
        self.query_repo
            .least_stock_items(self.config.least_stock_limit)
            .await
    }
}

/// Suppliers with the lowest total quantity across their items
pub struct LeastSupplierStockUseCase<Q>
where
    Q: InventoryQueryRepository,
{
    query_repo: Arc<Q>,
    config: Arc<InventoryConfig>,
}

impl<Q> LeastSupplierStockUseCase<Q>
where
    Q: InventoryQueryRepository,
{
    pub fn new(query_repo: Arc<Q>, config: Arc<InventoryConfig>) -> Self {
        Self { query_repo, config }
    }

    pub async fn execute(&self) -> InventoryResult<Vec<SupplierStock>> {
        self.query_repo
            .least_supplier_stock(self.config.least_stock_limit)
            .await
    }
}
