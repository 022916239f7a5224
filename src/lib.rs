//! Text-continuation explorer.
//!
//! The interaction logic lives in `lmx-session` and the pure codecs in
//! `lmx-core`; this crate adds the HTTP transport, the background prediction
//! worker and the [`Explorer`] facade hosts drive.

pub mod api;
mod async_worker;
pub mod client;
pub mod trace_init;

pub use api::{engine_version, load_settings, Explorer, ExplorerError};
pub use client::{HttpPredictor, Predictor};
