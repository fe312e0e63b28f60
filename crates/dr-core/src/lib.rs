//! Domain model and client-side state for the deal room.
//!
//! Nothing in this crate performs I/O against the backend: the pipeline board,
//! drag session and wizard forms are plain state machines so that the Leptos
//! front end, the CLI and the tests all drive the same logic.

#[cfg(feature = "config")]
pub mod config;
pub mod convert;
pub mod format;
pub mod navigation;
pub mod pipeline;
pub mod types;
pub mod wizard;
