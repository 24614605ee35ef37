//! Audit trail adapters

pub mod jsonl;

pub use jsonl::JsonlAuditSink;
