//! Domain Entities
//!
//! Core business entities for the inventory domain.

use kernel::id::{ItemId, UserId};

use crate::domain::value_objects::{ImageRef, ItemName, Price, Quantity};
use crate::error::{InventoryError, InventoryResult};

/// Content type accepted for item images
pub const PNG_CONTENT_TYPE: &str = "image/png";

/// Item entity as stored, joined with its supplier's name
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub item_id: ItemId,
    pub name: ItemName,
    pub price: Price,
    pub quantity: Quantity,
    pub image: Option<ImageRef>,
    pub supplier_id: UserId,
    /// Read-only join column
    pub supplier_name: Option<String>,
}

/// Validated fields of an item create or update
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDraft {
    pub name: ItemName,
    pub price: Price,
    pub quantity: Quantity,
    pub supplier_id: UserId,
}

/// Uploaded image file, not yet stored
#[derive(Clone)]
pub struct ImageUpload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: Option<String>, content_type: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    /// Only PNG images are stored
    pub fn ensure_png(&self) -> InventoryResult<()> {
        match self.content_type.as_deref() {
            Some(content_type) if content_type.trim().eq_ignore_ascii_case(PNG_CONTENT_TYPE) => {
                Ok(())
            }
            _ => Err(InventoryError::Validation(
                "Only .png files are allowed.".to_string(),
            )),
        }
    }
}

impl std::fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Supplier account as listed for admins
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Supplier {
    pub user_id: UserId,
    pub username: String,
}

/// Item with one of the lowest stock levels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeastStockItem {
    pub name: String,
    pub quantity: i32,
}

/// Supplier with one of the lowest total stock levels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupplierStock {
    pub username: String,
    pub total_quantity: i64,
}

/// One page of a listing plus the unpaged total
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(content_type: Option<&str>) -> ImageUpload {
        ImageUpload::new(
            Some("a.png".to_string()),
            content_type.map(str::to_string),
            vec![1, 2, 3],
        )
    }

    #[test]
    fn test_ensure_png() {
        assert!(upload(Some("image/png")).ensure_png().is_ok());
        assert!(upload(Some("IMAGE/PNG")).ensure_png().is_ok());

        for content_type in [Some("image/jpeg"), Some("text/plain"), None] {
            let err = upload(content_type).ensure_png().unwrap_err();
            assert_eq!(err.to_string(), "Only .png files are allowed.");
        }
    }

    #[test]
    fn test_upload_debug_omits_bytes() {
        let debug = format!("{:?}", upload(Some("image/png")));
        assert!(debug.contains("len: 3"));
        assert!(!debug.contains("[1, 2, 3]"));
    }
}
