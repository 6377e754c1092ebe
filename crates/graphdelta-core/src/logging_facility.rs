//! Structured logging facility for graphdelta
//!
//! - Single initialization point via `init(profile)`
//! - Structured logging macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - Test capture mode for deterministic assertions
//!
//! Only the diff boundary (`diff::engine::compute_diff`) emits start/end
//! events. Graph building and matching log with `tracing::debug!`.
//!
//! ```rust
//! use graphdelta_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
