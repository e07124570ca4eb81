//! Presentation Layer
//!
//! HTTP handlers, DTOs, multipart form parsing, and router.

pub mod dto;
pub mod handlers;
pub mod multipart;
pub mod router;

pub use handlers::InventoryAppState;
pub use router::{inventory_router, inventory_router_generic};
