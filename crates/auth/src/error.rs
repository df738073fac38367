//! Failure taxonomy for tokens, contexts, and access decisions.

use thiserror::Error;

use crate::claims::TokenKind;
use crate::roles::Role;

/// Result type used across the auth crate.
pub type AuthResult<T> = Result<T, AuthError>;

/// Why a token failed verification.
///
/// All three reasons surface as [`AuthError::TokenInvalid`]. Display texts
/// are fixed descriptions; they never echo payload bytes or key material.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InvalidTokenReason {
    /// The signature does not match the payload under the resolved key.
    BadSignature,
    /// The token could not be decoded into the claims schema.
    Malformed,
    /// No signing key is registered for the environment the token claims.
    UnknownSigningKey,
}

impl core::fmt::Display for InvalidTokenReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let text = match self {
            InvalidTokenReason::BadSignature => "signature mismatch",
            InvalidTokenReason::Malformed => "malformed payload",
            InvalidTokenReason::UnknownSigningKey => {
                "no signing key for the claimed environment"
            }
        };
        f.write_str(text)
    }
}

/// Failure raised anywhere in the token, context, or access-decision core.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The token cannot be trusted (tampered, malformed, or signed for an
    /// unknown environment).
    #[error("invalid token: {reason}")]
    TokenInvalid { reason: InvalidTokenReason },

    /// A correctly signed token whose validity window has passed.
    /// Distinct from [`AuthError::TokenInvalid`] so callers can prompt for
    /// re-login instead of treating the credential as hostile.
    #[error("token has expired")]
    TokenExpired,

    /// No user record matches the presented login identity.
    #[error("invalid credentials for user '{email}'")]
    InvalidCredentials { email: String },

    /// A claim accessor ran with no claims bound to the request.
    #[error("no claims are bound to the active request")]
    NoActiveContext,

    /// `bind` was called twice without an intervening `clear`.
    #[error("claims are already bound to the active request")]
    ContextAlreadyBound,

    /// The bound token is not of the kind the accessor requires.
    #[error("wrong token kind: expected {expected}, found {actual}")]
    WrongTokenKind { expected: TokenKind, actual: TokenKind },

    /// Authenticated, but the caller's rank is below the required minimum.
    #[error("insufficient permissions for role '{actual}'")]
    InsufficientPermissions { actual: Role, required: Role },
}

/// Outcome category a boundary translates a failure into.
///
/// Authentication and authorization failures must stay distinguishable at
/// every boundary; defects are caller bugs in request handling rather than
/// outcomes of untrusted input.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FailureClass {
    /// The caller is not (or no longer) authenticated.
    Authentication,
    /// The caller is authenticated but not allowed to do this.
    Authorization,
    /// Programming error in request handling, fatal to the request.
    Defect,
}

impl AuthError {
    pub fn class(&self) -> FailureClass {
        match self {
            AuthError::TokenInvalid { .. }
            | AuthError::TokenExpired
            | AuthError::InvalidCredentials { .. } => FailureClass::Authentication,

            AuthError::WrongTokenKind { .. } | AuthError::InsufficientPermissions { .. } => {
                FailureClass::Authorization
            }

            AuthError::NoActiveContext | AuthError::ContextAlreadyBound => FailureClass::Defect,
        }
    }

    /// Emit the failure on the log, defects distinctly from input-driven
    /// denials.
    pub fn log(&self) {
        match self.class() {
            FailureClass::Defect => tracing::error!(error = %self, "request handling defect"),
            FailureClass::Authentication => tracing::warn!(error = %self, "authentication failed"),
            FailureClass::Authorization => tracing::warn!(error = %self, "authorization denied"),
        }
    }
}
