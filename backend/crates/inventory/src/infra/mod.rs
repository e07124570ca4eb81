//! Infrastructure Layer - Persistence and storage implementations

pub mod image_store;
pub mod postgres;

pub use image_store::LocalImageStore;
pub use postgres::PgInventoryRepository;
