//! Credential issuance and verification adapters

pub mod token_codec;

pub use token_codec::{SignedTokenCodec, TrustMode};
