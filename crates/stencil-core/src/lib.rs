//! Stencil Core - template and stamp for record graphs
//!
//! This crate captures a record and a declared subset of its associations as
//! a plain, storage-agnostic snapshot, and later stamps new transient record
//! graphs out of that snapshot:
//! - Model capabilities (`Record`, `Model`) with generic by-name attribute reads
//! - Per-type template declarations held in an explicit registry
//! - Recursive snapshot (`as_template`) and reconstruct (`from_template`) engines
//! - Pluggable text codecs (JSON, YAML)
//! - `Container`, the opaque (type tag, encoded template) holder that can be
//!   stamped repeatedly
//! - Structured error and logging facilities

pub mod codec;
pub mod container;
pub mod engine;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod template;

pub use stencil_core_types as core_types;

// Re-export commonly used types
pub use codec::{JsonCodec, Template, TemplateCodec, YamlCodec};
pub use container::Container;
pub use engine::{EngineOptions, TemplateEngine};
pub use errors::{ExError, ExErrorKind, Result, StencilError};
pub use model::{downcast, Associated, Attributes, Cardinality, Model, Record, Related, Relation};
pub use template::{ModelType, Snapshot, Stamped, TemplateRegistry, TemplateSpec, TypeRegistry};
