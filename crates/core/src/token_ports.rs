//! Credential issuance and verification ports
//!
//! Issuance and verification sit on opposite sides of the stage trust
//! boundary, so they are separate traits even though one adapter usually
//! implements both.

use async_trait::async_trait;
use slated_domain::{Claims, Result};

/// Trait for issuing short-lived, scope-carrying credentials.
#[async_trait]
pub trait TokenIssuer: Send + Sync {
    /// Issue a credential for `subject`, consumable by `audience`,
    /// carrying exactly `scopes`. Lifetime is minutes-scale.
    async fn issue(&self, subject: &str, audience: &str, scopes: &[String]) -> Result<String>;
}

/// Trait for verifying credentials at a stage entry point.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Verify a credential and recover its claims.
    ///
    /// # Errors
    /// `SlatedError::Auth` on a bad signature, malformed encoding, or an
    /// expired credential. An expired credential is rejected regardless of
    /// how valid its signature was before expiry.
    async fn verify(&self, token: &str) -> Result<Claims>;
}
