//! Notification gate - core business logic
//!
//! Consumes a credential and a notification draft and decides whether the
//! draft is sendable. Order is fixed: structural validation, credential
//! verification, scope check, dispatch. Each step maps to its own error
//! variant so callers can tell a malformed draft from a scope problem.

use std::sync::Arc;

use slated_domain::{NotificationReceipt, NotificationRequest, Result, SlatedError};
use tracing::{info, warn};

use super::ports::NotificationTransport;
use crate::token_ports::TokenVerifier;

/// Notification service gating dispatch behind credential and scope checks
pub struct NotificationService {
    verifier: Arc<dyn TokenVerifier>,
    transport: Arc<dyn NotificationTransport>,
}

impl NotificationService {
    /// Create a new notification service
    pub fn new(verifier: Arc<dyn TokenVerifier>, transport: Arc<dyn NotificationTransport>) -> Self {
        Self { verifier, transport }
    }

    /// Validate, authorize, and dispatch a notification draft.
    ///
    /// # Errors
    /// - `SlatedError::Validation` when a required field is missing.
    /// - `SlatedError::Auth` when the credential is invalid or expired.
    /// - `SlatedError::InsufficientScope` when the granted scopes are not a
    ///   superset of the channel's single required scope.
    /// - `SlatedError::Dispatch` when the transport seam fails (the
    ///   simulated transport never does).
    pub async fn process(
        &self,
        token: &str,
        request: &NotificationRequest,
    ) -> Result<NotificationReceipt> {
        request.validate()?;

        let claims = self.verifier.verify(token).await?;

        let required = request.channel.required_scope();
        if !claims.has_scopes([required]) {
            warn!(
                subject = %claims.sub,
                channel = request.channel.as_str(),
                required_scope = required,
                "notification rejected: insufficient scope"
            );
            return Err(SlatedError::InsufficientScope(format!(
                "insufficient permissions for {required}"
            )));
        }

        let receipt = self.transport.deliver(request).await?;

        info!(
            notification_id = %receipt.notification_id,
            channel = request.channel.as_str(),
            recipient_count = request.recipients.len(),
            "notification dispatched"
        );

        Ok(receipt)
    }
}
