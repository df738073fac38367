//! Token codec: signs claims into compact tokens and verifies them back.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use signet_core::{Environment, UserId};

use crate::claims::{Claims, TokenKind};
use crate::error::{AuthError, InvalidTokenReason};
use crate::roles::Role;
use crate::session::SigningKeyProvider;

/// Signature algorithm for every issued token.
const SIGNING_ALGORITHM: Algorithm = Algorithm::HS512;

/// Default validity window for interactive login tokens (five hours).
pub fn web_token_validity() -> Duration {
    Duration::hours(5)
}

/// Default validity window for service tokens (one hour).
pub fn system_token_validity() -> Duration {
    Duration::hours(1)
}

// ─────────────────────────────────────────────────────────────────────────────
// Token Request
// ─────────────────────────────────────────────────────────────────────────────

/// Everything the codec needs to mint one token.
///
/// Construct with [`TokenRequest::web`] or [`TokenRequest::system`] and
/// override fields where a flow deviates from the defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRequest {
    pub user_id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
    pub environment: Environment,
    pub kind: TokenKind,
    pub password_reset: bool,
    pub validity: Duration,
}

impl TokenRequest {
    /// Interactive login token: kind `Web`, five-hour window.
    pub fn web(
        user_id: UserId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
        environment: Environment,
        password_reset: bool,
    ) -> Self {
        Self {
            user_id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            role,
            environment,
            kind: TokenKind::Web,
            password_reset,
            validity: web_token_validity(),
        }
    }

    /// Service-to-service token: kind `System`, one-hour window.
    ///
    /// The service name stands in for the first name; the last name stays
    /// empty. Claims keep one schema across kinds.
    pub fn system(
        user_id: UserId,
        service_name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
        environment: Environment,
    ) -> Self {
        Self {
            user_id,
            first_name: service_name.into(),
            last_name: String::new(),
            email: email.into(),
            role,
            environment,
            kind: TokenKind::System,
            password_reset: false,
            validity: system_token_validity(),
        }
    }

    /// Override the validity window.
    pub fn with_validity(mut self, validity: Duration) -> Self {
        self.validity = validity;
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Codec
// ─────────────────────────────────────────────────────────────────────────────

/// Signs claims into compact `header.payload.signature` tokens and
/// verifies them back into [`Claims`].
///
/// The codec never reads the wall clock. Callers pass `now` into both
/// issuance and verification, which pins every timestamp decision to one
/// injectable time source. Issuance is deterministic: the same request,
/// key, and instant always produce the same token string.
#[derive(Clone)]
pub struct TokenCodec {
    keys: Arc<dyn SigningKeyProvider>,
}

impl TokenCodec {
    pub fn new(keys: Arc<dyn SigningKeyProvider>) -> Self {
        Self { keys }
    }

    /// The environment this codec issues tokens for.
    pub fn environment(&self) -> Environment {
        self.keys.environment()
    }

    /// Mint a signed token for `request`.
    ///
    /// Stamps `iat = now` and `exp = now + validity`, then signs with the
    /// key registered for `request.environment`.
    pub fn issue(&self, request: &TokenRequest, now: DateTime<Utc>) -> Result<String, AuthError> {
        let key = self.keys.signing_key(request.environment)?;

        let claims = Claims {
            sub: request.user_id,
            first_name: request.first_name.clone(),
            last_name: request.last_name.clone(),
            email: request.email.clone(),
            role: request.role,
            environment: request.environment,
            kind: request.kind,
            password_reset: request.password_reset,
            iat: now.timestamp(),
            exp: (now + request.validity).timestamp(),
        };

        encode(
            &Header::new(SIGNING_ALGORITHM),
            &claims,
            &EncodingKey::from_secret(key.as_bytes()),
        )
        .map_err(|err| {
            tracing::debug!(error = %err, "token encoding failed");
            AuthError::TokenInvalid {
                reason: InvalidTokenReason::Malformed,
            }
        })
    }

    /// Verify signature and validity window, returning the decoded claims.
    ///
    /// The signing key is resolved from the environment the token itself
    /// claims. That first pass is unverified and its output is used for
    /// key selection only; nothing else is trusted until the signature
    /// check passes. Expiry is then enforced against `now`: a token is
    /// expired iff `now` is strictly after `exp`.
    pub fn verify_and_decode(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Claims, AuthError> {
        let unverified = peek_claims(token)?;
        let key = self.keys.signing_key(unverified.environment)?;

        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(key.as_bytes()),
            &verification_rules(),
        )
        .map_err(map_jwt_error)?;

        let claims = data.claims;
        if claims.is_expired_at(now) {
            return Err(AuthError::TokenExpired);
        }

        Ok(claims)
    }

    /// Non-throwing expiry probe.
    ///
    /// Reads the expiry claim without verifying the signature. A token
    /// that cannot be decoded at all reports expired, since it can never
    /// be used either way.
    pub fn is_expired(&self, token: &str, now: DateTime<Utc>) -> bool {
        match peek_claims(token) {
            Ok(claims) => claims.is_expired_at(now),
            Err(_) => true,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Decode Internals
// ─────────────────────────────────────────────────────────────────────────────

/// Rules for the verified pass: HS512 only, no leeway, and no built-in
/// expiry check. The expiry rule lives in [`Claims::is_expired_at`] and
/// runs against the caller's clock, not the library's.
fn verification_rules() -> Validation {
    let mut validation = Validation::new(SIGNING_ALGORITHM);
    validation.leeway = 0;
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.set_required_spec_claims::<&str>(&[]);
    validation
}

/// First-pass decode without signature verification.
///
/// The output is trusted for exactly one purpose: selecting the signing
/// key from the environment the token claims. Everything else waits for
/// the verified pass.
fn peek_claims(token: &str) -> Result<Claims, AuthError> {
    let mut rules = verification_rules();
    rules.insecure_disable_signature_validation();

    decode::<Claims>(token, &DecodingKey::from_secret(&[]), &rules)
        .map(|data| data.claims)
        .map_err(map_jwt_error)
}

fn map_jwt_error(err: jsonwebtoken::errors::Error) -> AuthError {
    use jsonwebtoken::errors::ErrorKind;

    // Full detail stays on the debug log; surfaced variants carry fixed
    // descriptions only.
    tracing::debug!(error = %err, "token verification failed");

    let reason = match err.kind() {
        ErrorKind::InvalidSignature => InvalidTokenReason::BadSignature,
        ErrorKind::ExpiredSignature => return AuthError::TokenExpired,
        _ => InvalidTokenReason::Malformed,
    };

    AuthError::TokenInvalid { reason }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
