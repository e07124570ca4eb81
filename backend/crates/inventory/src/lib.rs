//! Inventory Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits, compensation log
//! - `application/` - Use cases (item mutations, queries, analytics)
//! - `infra/` - PostgreSQL repository and local disk image store
//! - `presentation/` - HTTP handlers, DTOs, multipart parsing, router
//!
//! ## Consistency
//! An item record and its image file are written without a shared
//! transaction. Mutations order their steps so a failure leaves at worst
//! an orphaned file, and record undo steps in a [`CompensationLog`] that is
//! rolled back when the record write fails.
//!
//! ## Access
//! Routes are guarded by `auth` policies. Supplier updates additionally
//! filter by owner inside the store call.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::{ImageReplacement, InventoryConfig};
pub use domain::compensation::{Compensation, CompensationLog};
pub use error::{InventoryError, InventoryResult};
pub use infra::{LocalImageStore, PgInventoryRepository};
pub use presentation::router::inventory_router;

pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::domain::value_objects::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::image_store::LocalImageStore as ImageFileStore;
    pub use crate::infra::postgres::PgInventoryRepository as InventoryStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}
