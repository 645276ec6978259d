//! Terminal output for completed operations.
//!
//! Progress and diagnostics go through `tracing`; this module only prints the
//! styled summary line a user reads last.

pub mod display;

pub use display::{show_success, show_verdict};
