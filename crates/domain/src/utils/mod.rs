//! Domain utilities

pub mod request_parser;
