//! Notification gate: credential and scope enforcement ahead of dispatch

pub mod ports;
pub mod service;

pub use service::NotificationService;
