//! # Slated App
//!
//! Composition root for the scheduling pipeline. [`AppContext::init`]
//! wires the concrete adapters into the core services once at startup;
//! [`AppContext::handle`] is the single inbound operation an outer
//! surface (CLI, HTTP) calls per request.

pub mod context;
pub mod logging;

pub use context::AppContext;
