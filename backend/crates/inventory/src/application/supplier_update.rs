//! Supplier Update Use Case
//!
//! Suppliers may change price and quantity of their own items only. The
//! ownership filter is part of the store call, so a missing item and a
//! foreign item are indistinguishable to the caller.

use std::sync::Arc;

use kernel::id::{ItemId, UserId};

use crate::domain::repository::ItemRepository;
use crate::domain::value_objects::{Price, Quantity};
use crate::error::{InventoryError, InventoryResult};

/// Supplier update input
pub struct SupplierUpdateInput {
    pub item_id: ItemId,
    pub supplier_id: UserId,
    pub price: Price,
    pub quantity: Quantity,
}

/// Supplier update use case
pub struct SupplierUpdateUseCase<R>
where
    R: ItemRepository,
{
    item_repo: Arc<R>,
}

impl<R> SupplierUpdateUseCase<R>
where
    R: ItemRepository,
{
    pub fn new(item_repo: Arc<R>) -> Self {
        Self { item_repo }
    }

    pub async fn execute(&self, input: SupplierUpdateInput) -> InventoryResult<()> {
        let affected = self
            .item_repo
            .update_price_and_quantity(
                input.item_id,
                input.supplier_id,
                input.price,
                input.quantity,
            )
            .await?;

        if affected == 0 {
            tracing::warn!(
                item_id = %input.item_id,
                supplier_id = %input.supplier_id,
                "Supplier update matched no owned item"
            );
            return Err(InventoryError::NotPermitted);
        }

        tracing::info!(
            item_id = %input.item_id,
            supplier_id = %input.supplier_id,
            price = %input.price,
            quantity = input.quantity.get(),
            "Supplier updated item"
        );
        Ok(())
    }
}
