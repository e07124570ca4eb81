//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id with optional pepper)
//! - Bearer token extraction from the `Authorization` header

pub mod bearer;
pub mod password;
