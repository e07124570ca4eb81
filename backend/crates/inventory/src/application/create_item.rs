//! Create Item Use Case
//!
//! Saves the optional image first, then inserts the record. A failed
//! insert removes the freshly written image again.

use std::sync::Arc;

use kernel::id::ItemId;

use crate::domain::compensation::{Compensation, CompensationLog};
use crate::domain::entities::{ImageUpload, ItemDraft};
use crate::domain::repository::{ImageStore, ItemRepository};
use crate::error::InventoryResult;

/// Create item input
pub struct CreateItemInput {
    pub draft: ItemDraft,
    pub image: Option<ImageUpload>,
}

/// Create item use case
pub struct CreateItemUseCase<R, S>
where
    R: ItemRepository,
    S: ImageStore,
{
    item_repo: Arc<R>,
    images: Arc<S>,
}

impl<R, S> CreateItemUseCase<R, S>
where
    R: ItemRepository,
    S: ImageStore,
{
    pub fn new(item_repo: Arc<R>, images: Arc<S>) -> Self {
        Self { item_repo, images }
    }

    pub async fn execute(&self, input: CreateItemInput) -> InventoryResult<ItemId> {
        let mut log = CompensationLog::new();

        let image = match &input.image {
            Some(upload) => {
                let image = self.images.save(upload).await?;
                log.record(Compensation::DeleteImage(image.clone()));
                Some(image)
            }
            None => None,
        };

        match self.item_repo.create(&input.draft, image.as_ref()).await {
            Ok(item_id) => {
                log.commit();
                tracing::info!(
                    item_id = %item_id,
                    supplier_id = %input.draft.supplier_id,
                    has_image = image.is_some(),
                    "Item created"
                );
                Ok(item_id)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to insert item, rolling back");
                log.rollback(self.images.as_ref()).await;
                Err(e)
            }
        }
    }
}
