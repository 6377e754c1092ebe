//! Core types shared across graphdelta facilities
//!
//! Currently this is the canonical schema for structured logging: field keys
//! and event names used by the logging macros and by test assertions.

pub mod schema;
