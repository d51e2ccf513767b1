//! Core types shared across Stencil facilities
//!
//! This crate holds the vocabulary both the error facility and the logging
//! facility agree on:
//!
//! - **Schema constants**: canonical structured-logging field keys and event names

pub mod schema;
