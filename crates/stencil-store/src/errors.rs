//! Error helpers for stencil-store
//!
//! The store reports through stencil-core's `ExError`.

use stencil_core::errors::{ExError, ExErrorKind};
use stencil_core::StencilError;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

pub fn migration_error(migration_id: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration")
        .with_message(format!("Migration {} failed: {}", migration_id, reason))
}

/// An applied migration no longer matches the embedded SQL
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration_checksum")
        .with_message(format!(
            "Checksum mismatch for migration {}: expected {}, got {}",
            migration_id, expected, actual
        ))
}

pub fn container_not_found(op: &str, container_id: &str) -> ExError {
    ExError::new(ExErrorKind::NotFound)
        .with_op(op)
        .with_container_id(container_id)
        .with_message("Container not found")
}

/// Containers without an origin cannot be stored
pub fn empty_container(op: &str, container_id: &str) -> ExError {
    ExError::from(StencilError::EmptyContainer)
        .with_op(op)
        .with_container_id(container_id)
}

pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("sqlite")
        .with_message(err.to_string())
}
