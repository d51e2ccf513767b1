//! Capabilities a record type provides to the template engine
//!
//! Concrete types implement [`Model`]; the engine only ever sees them
//! through the object-safe [`Record`] trait.

pub mod attributes;
pub mod record;
pub mod relation;

pub use attributes::{downcast, Associated, Attributes};
pub use record::{Model, Record, Related};
pub use relation::{Cardinality, Relation};
