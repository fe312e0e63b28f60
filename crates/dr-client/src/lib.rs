//! Native REST client for the deal room backend.
//!
//! [`client::ApiClient`] wraps `reqwest` with the backend's endpoint map and
//! lenient response decoding. [`sync::PipelineSync`] drives the optimistic
//! move protocol of [`dr_core::pipeline::PipelineBoard`] against any
//! [`client::StageWriter`] and reports progress on a `flume` channel.

pub mod client;
pub mod sync;

pub use client::{ApiClient, ClientError, StageWriter};
pub use sync::{BoardEvent, PipelineSync, SyncError};
