//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (Item, ItemDraft, ImageUpload, listing rows)
//! - Domain value objects (ItemName, Price, Quantity, ImageRef, paging)
//! - The compensation log used by item mutations
//! - Repository traits (interfaces)

pub mod compensation;
pub mod entities;
pub mod repository;
pub mod value_objects;
