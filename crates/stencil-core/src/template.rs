//! Template declarations and the two graph walks
//!
//! [`TemplateRegistry`] holds which columns and associations each type
//! snapshots; [`TypeRegistry`] maps persisted type tags back to
//! constructors. `snapshot` and `reconstruct` walk record graphs against them.

pub mod reconstruct;
pub mod snapshot;
pub mod spec;
pub mod types;

pub use reconstruct::Stamped;
pub use snapshot::Snapshot;
pub use spec::{TemplateRegistry, TemplateSpec};
pub use types::{ModelType, TypeRegistry};

use crate::errors::{Result, StencilError};

pub(crate) fn check_depth(type_name: &str, depth: usize, max_depth: Option<usize>) -> Result<()> {
    match max_depth {
        Some(max_depth) if depth > max_depth => Err(StencilError::DepthExceeded {
            type_name: type_name.to_string(),
            max_depth,
        }),
        _ => Ok(()),
    }
}
