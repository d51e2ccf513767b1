//! Canonical schema constants for structured logging and events
//!
//! These constants keep log fields consistent between the engine, the
//! container and the store.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Template identifiers
pub const FIELD_TYPE_NAME: &str = "type_name";
pub const FIELD_ASSOCIATION: &str = "association";
pub const FIELD_CONTAINER_ID: &str = "container_id";
pub const FIELD_CODEC: &str = "codec";

// Sizes
pub const FIELD_TEMPLATE_LEN: &str = "template_len";
pub const FIELD_DEPTH: &str = "depth";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";
pub const FIELD_ERR_TYPE_NAME: &str = "err.type_name";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
