//! Migration framework
//!
//! Embedded SQL migrations, applied once each and recorded with a checksum.

mod checksums;
mod embedded;
mod runner;

pub use runner::{applied_migrations, apply_migrations};
