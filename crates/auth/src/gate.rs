//! Request entry: bearer extraction, verification, and context binding.

use chrono::{DateTime, Utc};

use crate::context::{ClaimsContext, ContextGuard};
use crate::error::{AuthError, InvalidTokenReason};
use crate::token::TokenCodec;

/// Pull the raw token out of an `Authorization`-style header value.
///
/// Accepts `Bearer <token>`; anything else is treated as a malformed
/// credential.
pub fn bearer_token(header_value: &str) -> Result<&str, AuthError> {
    let token = header_value
        .strip_prefix("Bearer ")
        .ok_or(AuthError::TokenInvalid {
            reason: InvalidTokenReason::Malformed,
        })?
        .trim();

    if token.is_empty() {
        return Err(AuthError::TokenInvalid {
            reason: InvalidTokenReason::Malformed,
        });
    }

    Ok(token)
}

/// Front door for request handling: verifies the inbound token and binds
/// its claims for the duration of the request.
pub struct RequestGate {
    codec: TokenCodec,
}

impl RequestGate {
    pub fn new(codec: TokenCodec) -> Self {
        Self { codec }
    }

    /// Verify `token` and bind its claims into `ctx`.
    ///
    /// On failure the context is left untouched. The returned guard clears
    /// it again when dropped, whatever the exit path, so the next request
    /// handled by the same unit starts unauthenticated.
    pub fn authenticate<'c>(
        &self,
        ctx: &'c mut ClaimsContext,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<ContextGuard<'c>, AuthError> {
        let claims = self.codec.verify_and_decode(token, now)?;
        ctx.bind_guarded(claims)
    }
}
