//! Repository Traits
//!
//! Interfaces for data persistence and image storage.
//! Implementations live in the infrastructure layer.

use kernel::id::{ItemId, UserId};

use crate::domain::entities::{
    ImageUpload, Item, ItemDraft, LeastStockItem, Page, Supplier, SupplierStock,
};
use crate::domain::value_objects::{ImageRef, PageRequest, Price, Quantity, SearchField};
use crate::error::InventoryResult;

/// Item record writes and single-item reads
#[trait_variant::make(ItemRepository: Send)]
pub trait LocalItemRepository {
    /// Insert an item and return its store-assigned id
    async fn create(&self, draft: &ItemDraft, image: Option<&ImageRef>) -> InventoryResult<ItemId>;

    async fn find_by_id(&self, item_id: ItemId) -> InventoryResult<Option<Item>>;

    /// Overwrite every column. Returns affected rows.
    async fn update(
        &self,
        item_id: ItemId,
        draft: &ItemDraft,
        image: Option<&ImageRef>,
    ) -> InventoryResult<u64>;

    /// Returns affected rows
    async fn delete(&self, item_id: ItemId) -> InventoryResult<u64>;

    /// Update price and quantity of an item owned by `supplier_id`.
    /// Returns affected rows; zero when the item is missing or owned by someone else.
    async fn update_price_and_quantity(
        &self,
        item_id: ItemId,
        supplier_id: UserId,
        price: Price,
        quantity: Quantity,
    ) -> InventoryResult<u64>;
}

/// Listings and analytics
#[trait_variant::make(InventoryQueryRepository: Send)]
pub trait LocalInventoryQueryRepository {
    async fn list_items(
        &self,
        page: PageRequest,
        search: Option<&ItemSearch>,
    ) -> InventoryResult<Page<Item>>;

    async fn list_supplier_items(
        &self,
        supplier_id: UserId,
        page: PageRequest,
        search_term: Option<&str>,
    ) -> InventoryResult<Page<Item>>;

    async fn list_suppliers(&self) -> InventoryResult<Vec<Supplier>>;

    async fn least_stock_items(&self, limit: i32) -> InventoryResult<Vec<LeastStockItem>>;

    async fn least_supplier_stock(&self, limit: i32) -> InventoryResult<Vec<SupplierStock>>;
}

/// Image blob storage
#[trait_variant::make(ImageStore: Send)]
pub trait LocalImageStore {
    /// Store a PNG upload under a fresh name
    async fn save(&self, upload: &ImageUpload) -> InventoryResult<ImageRef>;

    /// Remove a stored image. Already-missing files are not an error.
    async fn delete(&self, image: &ImageRef) -> InventoryResult<()>;
}

/// Search term plus the column it applies to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSearch {
    pub term: String,
    pub field: SearchField,
}

impl ItemSearch {
    /// Blank terms mean no search
    pub fn new(term: Option<String>, field: SearchField) -> Option<Self> {
        let term = term?.trim().to_string();
        if term.is_empty() {
            return None;
        }
        Some(Self { term, field })
    }
}
