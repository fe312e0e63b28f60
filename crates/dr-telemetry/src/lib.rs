//! Logging and trace correlation for the deal room binaries.
//!
//! - **Logging**: human-readable or JSON output via `tracing-subscriber`,
//!   written to stderr so command output on stdout stays clean.
//! - **Tracing**: trace/span id generation, operation spans, and the
//!   `x-request-id` header value attached to every outgoing API call.

pub mod logging;
pub mod tracing_setup;
