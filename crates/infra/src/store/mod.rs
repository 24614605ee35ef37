//! Accepted-events storage adapters

pub mod memory;

pub use memory::InMemoryEventStore;
