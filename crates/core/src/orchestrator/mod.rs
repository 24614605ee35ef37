//! Pipeline orchestration: the plan → notify stage machine

pub mod service;

pub use service::{Orchestrator, PipelineStage};
