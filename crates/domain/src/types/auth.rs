//! Credential claims shared between the issuing and verifying stages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Claims carried by a stage-to-stage credential.
///
/// `iat` and `exp` are Unix timestamps in seconds. An expired credential
/// is invalid regardless of any other content.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Issuer URI, derived from the configured tenant id.
    pub iss: String,
    /// Subject: the caller or stage the credential was issued for.
    pub sub: String,
    /// Audience: the stage expected to consume the credential.
    pub aud: String,
    /// Granted scope set.
    #[serde(default)]
    pub scopes: Vec<String>,
    /// Issued-at, Unix seconds.
    pub iat: i64,
    /// Expiry, Unix seconds. Always greater than `iat` at issuance.
    pub exp: i64,
}

impl Claims {
    /// Whether the credential has expired at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.exp <= now.timestamp()
    }

    /// Superset check: every required scope must be granted.
    pub fn has_scopes<'a>(&self, required: impl IntoIterator<Item = &'a str>) -> bool {
        required.into_iter().all(|scope| self.scopes.iter().any(|granted| granted == scope))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn claims(scopes: &[&str], exp: i64) -> Claims {
        Claims {
            iss: "https://tokens.slated.local/demo-tenant".into(),
            sub: "user_1".into(),
            aud: "notifier".into(),
            scopes: scopes.iter().map(ToString::to_string).collect(),
            iat: exp - 300,
            exp,
        }
    }

    #[test]
    fn expiry_is_inclusive_at_the_boundary() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
        assert!(claims(&[], now.timestamp()).is_expired(now));
        assert!(!claims(&[], now.timestamp() + 1).is_expired(now));
    }

    #[test]
    fn has_scopes_requires_a_superset() {
        let granted = claims(&["notifications:email:send", "notifications:sms:send"], i64::MAX);
        assert!(granted.has_scopes(["notifications:email:send"]));
        assert!(granted.has_scopes(["notifications:email:send", "notifications:sms:send"]));
        assert!(!granted.has_scopes(["notifications:push:send"]));
        assert!(!granted.has_scopes(["notifications:email:send", "notifications:push:send"]));
    }

    #[test]
    fn empty_requirement_always_passes() {
        assert!(claims(&[], i64::MAX).has_scopes([]));
    }
}
