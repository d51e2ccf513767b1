//! Stencil Store - SQLite persistence for containers
//!
//! Provides:
//! - Connection helpers
//! - Embedded SQL migrations with checksums
//! - `SqliteRepo`, the container repository

pub mod db;
pub mod errors;
pub mod migrations;
pub mod repo;

pub use errors::Result;
pub use repo::SqliteRepo;
