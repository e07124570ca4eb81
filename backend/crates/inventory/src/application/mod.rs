//! Application Layer - Use Cases
//!
//! This layer orchestrates domain logic and infrastructure.
//! Item mutations record their side effects in a compensation log.

pub mod analytics;
pub mod config;
pub mod create_item;
pub mod delete_item;
pub mod queries;
pub mod supplier_update;
pub mod update_item;

// Re-exports
pub use analytics::{LeastStockItemsUseCase, LeastSupplierStockUseCase};
pub use config::{ImageReplacement, InventoryConfig};
pub use create_item::{CreateItemInput, CreateItemUseCase};
pub use delete_item::DeleteItemUseCase;
pub use queries::{GetItemUseCase, ListItemsUseCase, ListSupplierItemsUseCase, ListSuppliersUseCase};
pub use supplier_update::{SupplierUpdateInput, SupplierUpdateUseCase};
pub use update_item::{UpdateItemInput, UpdateItemUseCase};
