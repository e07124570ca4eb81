//! Update Item Use Case
//!
//! Overwrites an item record. With a new image the blob steps are ordered
//! by [`ImageReplacement`]; the new blob is always compensated when the
//! record write does not go through.

use std::sync::Arc;

use kernel::id::ItemId;

use crate::application::config::{ImageReplacement, InventoryConfig};
use crate::domain::compensation::{Compensation, CompensationLog};
use crate::domain::entities::{ImageUpload, ItemDraft};
use crate::domain::repository::{ImageStore, ItemRepository};
use crate::domain::value_objects::ImageRef;
use crate::error::{InventoryError, InventoryResult};

/// Update item input
pub struct UpdateItemInput {
    pub item_id: ItemId,
    pub draft: ItemDraft,
    pub image: Option<ImageUpload>,
}

/// Update item use case
pub struct UpdateItemUseCase<R, S>
where
    R: ItemRepository,
    S: ImageStore,
{
    item_repo: Arc<R>,
    images: Arc<S>,
    config: Arc<InventoryConfig>,
}

impl<R, S> UpdateItemUseCase<R, S>
where
    R: ItemRepository,
    S: ImageStore,
{
    pub fn new(item_repo: Arc<R>, images: Arc<S>, config: Arc<InventoryConfig>) -> Self {
        Self {
            item_repo,
            images,
            config,
        }
    }

    pub async fn execute(&self, input: UpdateItemInput) -> InventoryResult<()> {
        let existing = self
            .item_repo
            .find_by_id(input.item_id)
            .await?
            .ok_or(InventoryError::ItemNotFound)?;

        let Some(upload) = input.image else {
            let affected = self
                .item_repo
                .update(input.item_id, &input.draft, existing.image.as_ref())
                .await?;
            if affected == 0 {
                return Err(InventoryError::ItemNotFound);
            }
            tracing::info!(item_id = %input.item_id, "Item updated");
            return Ok(());
        };

        // reject before any blob is touched
        upload.ensure_png()?;

        let mut old_image = existing.image;
        if self.config.image_replacement == ImageReplacement::DeleteBeforeSave {
            if let Some(old) = old_image.take() {
                self.delete_best_effort(&old).await;
            }
        }

        let mut log = CompensationLog::new();
        let new_image = self.images.save(&upload).await?;
        log.record(Compensation::DeleteImage(new_image.clone()));

        match self
            .item_repo
            .update(input.item_id, &input.draft, Some(&new_image))
            .await
        {
            Ok(0) => {
                tracing::warn!(item_id = %input.item_id, "Item vanished during update");
                log.rollback(self.images.as_ref()).await;
                Err(InventoryError::ItemNotFound)
            }
            Ok(_) => {
                log.commit();
                if let Some(old) = old_image {
                    self.delete_best_effort(&old).await;
                }
                tracing::info!(
                    item_id = %input.item_id,
                    image = %new_image,
                    "Item updated with new image"
                );
                Ok(())
            }
            Err(e) => {
                tracing::error!(item_id = %input.item_id, error = %e, "Failed to update item, rolling back");
                log.rollback(self.images.as_ref()).await;
                Err(e)
            }
        }
    }

    async fn delete_best_effort(&self, image: &ImageRef) {
        if let Err(e) = self.images.delete(image).await {
            tracing::error!(image = %image, error = %e, "Failed to delete replaced image");
        }
    }
}
