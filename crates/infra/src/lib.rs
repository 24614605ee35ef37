//! # Slated Infra
//!
//! Adapters behind the core ports:
//! - In-memory accepted-events store
//! - Signed token codec (issuance + verification)
//! - Simulated notification transport
//! - JSONL audit sink
//! - Configuration loader

pub mod audit;
pub mod auth;
pub mod config;
pub mod store;
pub mod transport;

pub use audit::JsonlAuditSink;
pub use auth::{SignedTokenCodec, TrustMode};
pub use store::InMemoryEventStore;
pub use transport::SimulatedTransport;
