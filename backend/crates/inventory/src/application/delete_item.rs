//! Delete Item Use Case

use std::sync::Arc;

use kernel::id::ItemId;

use crate::domain::repository::{ImageStore, ItemRepository};
use crate::error::{InventoryError, InventoryResult};

/// Delete item use case
///
/// The image goes first and its failure is only logged; an orphaned file
/// is preferable to a record pointing at nothing.
pub struct DeleteItemUseCase<R, S>
where
    R: ItemRepository,
    S: ImageStore,
{
    item_repo: Arc<R>,
    images: Arc<S>,
}

impl<R, S> DeleteItemUseCase<R, S>
where
    R: ItemRepository,
    S: ImageStore,
{
    pub fn new(item_repo: Arc<R>, images: Arc<S>) -> Self {
        Self { item_repo, images }
    }

    pub async fn execute(&self, item_id: ItemId) -> InventoryResult<()> {
        let item = self
            .item_repo
            .find_by_id(item_id)
            .await?
            .ok_or(InventoryError::ItemNotFound)?;

        if let Some(image) = &item.image {
            if let Err(e) = self.images.delete(image).await {
                tracing::error!(item_id = %item_id, image = %image, error = %e, "Failed to delete item image");
            }
        }

        let affected = self.item_repo.delete(item_id).await?;
        if affected == 0 {
            return Err(InventoryError::ItemNotFound);
        }

        tracing::info!(item_id = %item_id, "Item deleted");
        Ok(())
    }
}
