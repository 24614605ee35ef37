//! Signed stage-to-stage credentials
//!
//! Claims are serialized to JSON and authenticated with a keyed BLAKE3
//! MAC; the wire form is `base64url(payload).base64url(mac)`. The stage
//! contract only requires that verification recovers the claims and
//! rejects tampering and expiry, so an opaque MAC-signed encoding is
//! enough here; swapping in a standards-based token is an adapter-local
//! change.

use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use slated_core::{TokenIssuer, TokenVerifier};
use slated_domain::constants::NOTIFIER_STAGE_ID;
use slated_domain::{AuthConfig, Claims, Result, SlatedError};
use tracing::{error, warn};

/// Domain-separation context for the MAC key derivation.
const MAC_KEY_CONTEXT: &str = "slated 2024-06-01 stage credential mac";

/// Fixed fallback secret for unconfigured deployments. Tokens signed with
/// it protect nothing; the fallback is logged loudly at construction.
const DEMO_SIGNING_SECRET: &str = "slated-demo-signing-secret";

/// Verification posture of the codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrustMode {
    /// Verify signature and expiry on every credential.
    Strict,
    /// Accept everything and return a fixed claim set. Only constructible
    /// in test builds; never reachable from untrusted request data.
    InsecureBypass,
}

/// Issues and verifies MAC-signed credentials for one tenant.
pub struct SignedTokenCodec {
    issuer: String,
    key: [u8; 32],
    ttl_secs: i64,
    trust_mode: TrustMode,
    demo_secret: bool,
}

impl SignedTokenCodec {
    /// Build a strict codec from the auth configuration.
    ///
    /// Falls back to the fixed demo secret when none is configured; the
    /// fallback is flagged so it can never be mistaken for production
    /// signing.
    pub fn new(config: &AuthConfig) -> Self {
        let (secret, demo_secret) = match config.signing_secret.as_deref() {
            Some(secret) if !secret.trim().is_empty() => (secret.to_string(), false),
            _ => {
                warn!("no signing secret configured; using the fixed demo secret (not suitable for production)");
                (DEMO_SIGNING_SECRET.to_string(), true)
            }
        };

        Self {
            issuer: format!("https://tokens.slated.local/{}", config.tenant_id),
            key: blake3::derive_key(MAC_KEY_CONTEXT, secret.as_bytes()),
            ttl_secs: i64::try_from(config.token_ttl_secs).unwrap_or(i64::MAX),
            trust_mode: TrustMode::Strict,
            demo_secret,
        }
    }

    /// Whether the codec runs on the fixed demo secret.
    pub fn uses_demo_secret(&self) -> bool {
        self.demo_secret
    }

    /// Current verification posture.
    pub fn trust_mode(&self) -> TrustMode {
        self.trust_mode
    }

    /// Switch the codec into bypass mode.
    ///
    /// Compiled only for test builds or behind the `insecure-bypass`
    /// feature; a production build has no way to reach this state.
    #[cfg(any(test, feature = "insecure-bypass"))]
    pub fn with_insecure_bypass(mut self) -> Self {
        error!("token verification bypass enabled; every credential will be accepted");
        self.trust_mode = TrustMode::InsecureBypass;
        self
    }

    fn mac(&self, payload: &[u8]) -> blake3::Hash {
        blake3::keyed_hash(&self.key, payload)
    }

    /// Issue a credential with an explicit issued-at instant.
    pub fn issue_at(
        &self,
        subject: &str,
        audience: &str,
        scopes: &[String],
        now: DateTime<Utc>,
    ) -> Result<String> {
        let iat = now.timestamp();
        let claims = Claims {
            iss: self.issuer.clone(),
            sub: subject.to_string(),
            aud: audience.to_string(),
            scopes: scopes.to_vec(),
            iat,
            exp: iat.saturating_add(self.ttl_secs),
        };
        let payload = serde_json::to_vec(&claims)
            .map_err(|e| SlatedError::Internal(format!("claims serialization failed: {e}")))?;
        let mac = self.mac(&payload);
        Ok(format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(&payload),
            URL_SAFE_NO_PAD.encode(mac.as_bytes())
        ))
    }

    /// Verify a credential against an explicit instant.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims> {
        if self.trust_mode == TrustMode::InsecureBypass {
            error!("bypassing credential verification; returning fixed claims");
            return Ok(self.bypass_claims(now));
        }

        let (payload_b64, mac_b64) = token.split_once('.').ok_or_else(invalid_credential)?;
        let payload = URL_SAFE_NO_PAD.decode(payload_b64).map_err(|_| invalid_credential())?;
        let mac_bytes: [u8; 32] = URL_SAFE_NO_PAD
            .decode(mac_b64)
            .map_err(|_| invalid_credential())?
            .try_into()
            .map_err(|_| invalid_credential())?;

        // blake3::Hash equality is constant-time.
        if blake3::Hash::from_bytes(mac_bytes) != self.mac(&payload) {
            return Err(invalid_credential());
        }

        let claims: Claims =
            serde_json::from_slice(&payload).map_err(|_| invalid_credential())?;
        if claims.is_expired(now) {
            return Err(invalid_credential());
        }
        Ok(claims)
    }

    /// Fixed claim set handed out in bypass mode: all four channel scopes.
    fn bypass_claims(&self, now: DateTime<Utc>) -> Claims {
        let iat = now.timestamp();
        Claims {
            iss: self.issuer.clone(),
            sub: "demo_user".to_string(),
            aud: NOTIFIER_STAGE_ID.to_string(),
            scopes: vec![
                "notifications:email:send".to_string(),
                "notifications:sms:send".to_string(),
                "notifications:push:send".to_string(),
                "notifications:slack:send".to_string(),
            ],
            iat,
            exp: iat.saturating_add(self.ttl_secs),
        }
    }
}

/// Single opaque rejection: callers learn the credential failed, not why.
fn invalid_credential() -> SlatedError {
    SlatedError::Auth("invalid or expired credential".to_string())
}

#[async_trait]
impl TokenIssuer for SignedTokenCodec {
    async fn issue(&self, subject: &str, audience: &str, scopes: &[String]) -> Result<String> {
        self.issue_at(subject, audience, scopes, Utc::now())
    }
}

#[async_trait]
impl TokenVerifier for SignedTokenCodec {
    async fn verify(&self, token: &str) -> Result<Claims> {
        self.verify_at(token, Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn codec_with_secret(secret: &str) -> SignedTokenCodec {
        SignedTokenCodec::new(&AuthConfig {
            tenant_id: "test-tenant".to_string(),
            signing_secret: Some(secret.to_string()),
            token_ttl_secs: 300,
        })
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap()
    }

    fn scopes() -> Vec<String> {
        vec!["notifications:email:send".to_string()]
    }

    #[test]
    fn round_trip_recovers_claims() {
        let codec = codec_with_secret("secret-a");
        let token = codec.issue_at("user_1", "notifier", &scopes(), now()).unwrap();

        let claims = codec.verify_at(&token, now()).unwrap();
        assert_eq!(claims.sub, "user_1");
        assert_eq!(claims.aud, "notifier");
        assert_eq!(claims.iss, "https://tokens.slated.local/test-tenant");
        assert_eq!(claims.scopes, scopes());
        assert!(claims.exp > claims.iat);
        assert_eq!(claims.exp - claims.iat, 300);
    }

    #[test]
    fn expired_credential_is_rejected_regardless_of_signature() {
        let codec = codec_with_secret("secret-a");
        let token = codec.issue_at("user_1", "notifier", &scopes(), now()).unwrap();

        // Still valid just before expiry, invalid at and after it.
        assert!(codec.verify_at(&token, now() + Duration::seconds(299)).is_ok());
        let err = codec.verify_at(&token, now() + Duration::seconds(300)).unwrap_err();
        assert_eq!(err.label(), "auth");
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let codec = codec_with_secret("secret-a");
        let token = codec.issue_at("user_1", "notifier", &scopes(), now()).unwrap();

        let (payload_b64, mac_b64) = token.split_once('.').unwrap();
        let mut payload = URL_SAFE_NO_PAD.decode(payload_b64).unwrap();
        let position = payload.iter().position(|b| *b == b'1').unwrap();
        payload[position] = b'2'; // user_1 -> user_2
        let forged = format!("{}.{mac_b64}", URL_SAFE_NO_PAD.encode(&payload));

        assert_eq!(codec.verify_at(&forged, now()).unwrap_err().label(), "auth");
    }

    #[test]
    fn garbage_tokens_are_rejected() {
        let codec = codec_with_secret("secret-a");
        for junk in ["", "no-dot", "a.b", "!!!.???"] {
            assert_eq!(codec.verify_at(junk, now()).unwrap_err().label(), "auth");
        }
    }

    #[test]
    fn token_from_another_secret_is_rejected() {
        let issuer = codec_with_secret("secret-a");
        let verifier = codec_with_secret("secret-b");

        let token = issuer.issue_at("user_1", "notifier", &scopes(), now()).unwrap();
        assert!(verifier.verify_at(&token, now()).is_err());
    }

    #[test]
    fn missing_secret_falls_back_to_demo_and_is_flagged() {
        let codec = SignedTokenCodec::new(&AuthConfig {
            tenant_id: "test-tenant".to_string(),
            signing_secret: None,
            token_ttl_secs: 300,
        });
        assert!(codec.uses_demo_secret());
        assert!(!codec_with_secret("real").uses_demo_secret());
    }

    #[test]
    fn bypass_accepts_anything_with_fixed_claims() {
        let codec = codec_with_secret("secret-a").with_insecure_bypass();
        assert_eq!(codec.trust_mode(), TrustMode::InsecureBypass);

        let claims = codec.verify_at("complete garbage", now()).unwrap();
        assert_eq!(claims.sub, "demo_user");
        assert!(claims.has_scopes(["notifications:slack:send"]));
    }

    #[test]
    fn strict_is_the_default_posture() {
        assert_eq!(codec_with_secret("s").trust_mode(), TrustMode::Strict);
    }
}
