//! Bearer tokens and their embedded expiry.
//!
//! The auth service issues JWTs. This module never verifies signatures
//! (that is the server's job); it only decodes the payload to read `exp`
//! so a stale credential can be dropped client-side instead of bouncing
//! off a 401.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};

/// A bearer token as issued by the auth service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthToken {
    raw: String,
}

#[derive(Debug, Deserialize)]
struct Claims {
    exp: Option<u64>,
}

impl AuthToken {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Header value for protected calls.
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.raw)
    }

    /// The embedded expiry instant, if the payload decodes and carries
    /// an `exp` claim.
    pub fn expires_at(&self) -> Option<SystemTime> {
        let exp = self.claims()?.exp?;
        Some(UNIX_EPOCH + Duration::from_secs(exp))
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(SystemTime::now())
    }

    /// A token is expired when its `exp` has passed, and invalid (treated
    /// as expired) when its payload cannot be decoded at all. A decodable
    /// payload without `exp` never expires.
    pub fn is_expired_at(&self, now: SystemTime) -> bool {
        match self.claims() {
            None => true,
            Some(Claims { exp: None }) => false,
            Some(Claims { exp: Some(exp) }) => UNIX_EPOCH + Duration::from_secs(exp) <= now,
        }
    }

    fn claims(&self) -> Option<Claims> {
        let payload = self.raw.split('.').nth(1)?;
        let bytes = URL_SAFE_NO_PAD.decode(payload).ok()?;
        serde_json::from_slice(&bytes).ok()
    }
}
