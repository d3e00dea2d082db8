//! Time-limited signed submission links.
//!
//! Moderators generate a URL granting access to the public submission form
//! without authentication. The link embeds an expiry timestamp and an
//! HMAC-SHA256 signature over the path and expiry, so it cannot be extended
//! or retargeted by the holder.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;

use crate::{AppError, AppResult};

type HmacSha256 = Hmac<Sha256>;

/// Query parameters carried by a signed link.
#[derive(Debug, Clone, Deserialize)]
pub struct SignedQuery {
    /// Unix timestamp after which the link is invalid.
    pub expires: i64,
    /// Hex-encoded HMAC-SHA256 signature.
    pub signature: String,
}

/// Signer and verifier for time-limited links.
#[derive(Clone)]
pub struct LinkSigner {
    secret: String,
    base_url: String,
    ttl_secs: i64,
}

impl LinkSigner {
    /// Create a new signer.
    #[must_use]
    pub fn new(secret: impl Into<String>, base_url: impl Into<String>, ttl_secs: i64) -> Self {
        Self {
            secret: secret.into(),
            base_url: base_url.into(),
            ttl_secs,
        }
    }

    /// Generate a signed URL for `path`, valid for the configured TTL.
    #[must_use]
    pub fn generate(&self, path: &str, now: DateTime<Utc>) -> String {
        let expires = now.timestamp() + self.ttl_secs;
        let signature = self.sign(path, expires);
        format!(
            "{}{}?expires={}&signature={}",
            self.base_url.trim_end_matches('/'),
            path,
            expires,
            signature
        )
    }

    /// Verify a signed link.
    ///
    /// Fails with [`AppError::InvalidSignature`] when the link has expired or
    /// the signature does not match the path and expiry.
    pub fn verify(
        &self,
        path: &str,
        query: &SignedQuery,
        now: DateTime<Utc>,
    ) -> AppResult<()> {
        if now.timestamp() > query.expires {
            return Err(AppError::InvalidSignature);
        }

        let raw = hex::decode(&query.signature).map_err(|_| AppError::InvalidSignature)?;

        let mut mac = self.mac()?;
        mac.update(Self::payload(path, query.expires).as_bytes());
        mac.verify_slice(&raw).map_err(|_| AppError::InvalidSignature)
    }

    fn sign(&self, path: &str, expires: i64) -> String {
        // new_from_slice accepts keys of any length for HMAC.
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .unwrap_or_else(|_| unreachable!("HMAC accepts any key length"));
        mac.update(Self::payload(path, expires).as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    fn mac(&self) -> AppResult<HmacSha256> {
        HmacSha256::new_from_slice(self.secret.as_bytes())
            .map_err(|e| AppError::Internal(format!("HMAC init failed: {e}")))
    }

    fn payload(path: &str, expires: i64) -> String {
        format!("{path}:{expires}")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn signer() -> LinkSigner {
        LinkSigner::new("test-secret", "https://map.example.edu", 86_400)
    }

    fn query_from(url: &str) -> SignedQuery {
        let (_, qs) = url.split_once('?').unwrap();
        let mut expires = 0;
        let mut signature = String::new();
        for pair in qs.split('&') {
            let (k, v) = pair.split_once('=').unwrap();
            match k {
                "expires" => expires = v.parse().unwrap(),
                "signature" => signature = v.to_string(),
                _ => {}
            }
        }
        SignedQuery { expires, signature }
    }

    #[test]
    fn valid_link_verifies() {
        let now = Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap();
        let url = signer().generate("/api/submissions/new", now);
        let query = query_from(&url);

        assert!(
            signer()
                .verify("/api/submissions/new", &query, now)
                .is_ok()
        );
    }

    #[test]
    fn expired_link_rejected() {
        let now = Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap();
        let url = signer().generate("/api/submissions/new", now);
        let query = query_from(&url);

        let later = now + chrono::Duration::hours(25);
        let err = signer()
            .verify("/api/submissions/new", &query, later)
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidSignature));
    }

    #[test]
    fn tampered_expiry_rejected() {
        let now = Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap();
        let url = signer().generate("/api/submissions/new", now);
        let mut query = query_from(&url);
        query.expires += 3600;

        let err = signer()
            .verify("/api/submissions/new", &query, now)
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidSignature));
    }

    #[test]
    fn wrong_path_rejected() {
        let now = Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap();
        let url = signer().generate("/api/submissions/new", now);
        let query = query_from(&url);

        let err = signer()
            .verify("/api/admin/locations", &query, now)
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidSignature));
    }
}
