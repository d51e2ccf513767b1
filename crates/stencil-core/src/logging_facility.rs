//! Structured logging for the template engine
//!
//! One initialization point via `init(profile)`, the operation macros
//! (`log_op_start!`, `log_op_end!`, `log_op_error!`) used at every
//! snapshot/stamp boundary, and an in-memory capture for tests.
//!
//! ```rust
//! use stencil_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
