//! Typed claims embedded in issued tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use signet_core::{Environment, UserId};

use crate::Role;

/// Credential category a token belongs to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TokenKind {
    /// Interactive human login.
    Web,
    /// Service-to-service credential.
    System,
}

impl TokenKind {
    pub const fn text_id(self) -> &'static str {
        match self {
            TokenKind::Web => "WEB",
            TokenKind::System => "SYSTEM",
        }
    }
}

impl core::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.text_id())
    }
}

/// Identity snapshot carried by a signed token.
///
/// Claims are written once at issuance and never mutated afterwards. A
/// role or name change on the backing user record does not alter tokens
/// already in flight; the subject must log in again to pick it up.
///
/// Timestamps are Unix seconds, the wire form signature verification and
/// expiry checks operate on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject identity (user id).
    pub sub: UserId,

    pub first_name: String,

    pub last_name: String,

    /// Login email of the subject.
    pub email: String,

    /// Authorization level at issuance.
    pub role: Role,

    /// Deployment environment the token was issued for. Verification
    /// resolves the signing key from this claim.
    pub environment: Environment,

    /// Credential category.
    pub kind: TokenKind,

    /// Marks a token minted solely for a password-reset flow.
    pub password_reset: bool,

    /// Issued-at, Unix seconds.
    pub iat: i64,

    /// Expires-at, Unix seconds. The expiry instant itself is still valid.
    pub exp: i64,
}

impl Claims {
    /// Expiry rule shared by verification and the non-throwing probe:
    /// expired iff `now` is strictly after the expiry instant.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() > self.exp
    }

    /// Issued-at as a UTC instant, if `iat` is in the representable range.
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.iat, 0)
    }

    /// Expires-at as a UTC instant, if `exp` is in the representable range.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// Length of the validity window.
    pub fn validity(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.exp.saturating_sub(self.iat))
    }
}
