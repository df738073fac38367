//! Per-request holder of the authenticated identity.

use core::ops::Deref;

use signet_core::{Environment, UserId};

use crate::claims::{Claims, TokenKind};
use crate::error::AuthError;
use crate::roles::Role;
use crate::user::UserRecord;

/// Claims carrier bound to one in-flight request.
///
/// Each request-handling unit owns exactly one context; nothing here is
/// process-global or thread-local, so claims cannot bleed between
/// requests handled concurrently. A pooled worker that keeps its context
/// across requests must clear it between them.
/// [`ClaimsContext::bind_guarded`] makes that automatic.
#[derive(Debug, Default)]
pub struct ClaimsContext {
    bound: Option<Claims>,
}

impl ClaimsContext {
    /// Fresh context with nothing bound.
    pub fn new() -> Self {
        Self::default()
    }

    /// Associate verified claims with the request being handled.
    ///
    /// Binding twice without an intervening [`clear`](Self::clear) is a
    /// caller defect and fails with `ContextAlreadyBound`; the existing
    /// claims stay bound.
    pub fn bind(&mut self, claims: Claims) -> Result<(), AuthError> {
        if self.bound.is_some() {
            return Err(AuthError::ContextAlreadyBound);
        }
        self.bound = Some(claims);
        Ok(())
    }

    /// Bind and return a guard that clears the context on drop.
    ///
    /// The clear runs on every exit path, including early `?` returns and
    /// panic unwinds, so a reused execution unit never starts its next
    /// request with a stale identity.
    pub fn bind_guarded(&mut self, claims: Claims) -> Result<ContextGuard<'_>, AuthError> {
        self.bind(claims)?;
        Ok(ContextGuard { context: self })
    }

    /// Drop whatever is bound. Idempotent.
    pub fn clear(&mut self) {
        self.bound = None;
    }

    /// Whether claims are currently bound.
    pub fn is_bound(&self) -> bool {
        self.bound.is_some()
    }

    /// The bound claims, or `NoActiveContext`.
    pub fn current(&self) -> Result<&Claims, AuthError> {
        self.bound.as_ref().ok_or(AuthError::NoActiveContext)
    }

    /// Role of the authenticated caller.
    pub fn role(&self) -> Result<Role, AuthError> {
        Ok(self.current()?.role)
    }

    /// Subject identity of the authenticated caller.
    pub fn user_id(&self) -> Result<UserId, AuthError> {
        Ok(self.current()?.sub)
    }

    /// Login email of the authenticated caller.
    pub fn email(&self) -> Result<&str, AuthError> {
        Ok(self.current()?.email.as_str())
    }

    /// Deployment environment the bound token was issued for.
    pub fn environment(&self) -> Result<Environment, AuthError> {
        Ok(self.current()?.environment)
    }

    /// Kind of the bound token.
    pub fn kind(&self) -> Result<TokenKind, AuthError> {
        Ok(self.current()?.kind)
    }

    /// Whether the bound token is restricted to a password-reset flow.
    pub fn password_reset(&self) -> Result<bool, AuthError> {
        Ok(self.current()?.password_reset)
    }

    /// Assemble the caller's identity record from the bound claims.
    ///
    /// Requires an interactive login token; a bound service token fails
    /// with `WrongTokenKind`. The record never carries a credential.
    pub fn user(&self) -> Result<UserRecord, AuthError> {
        let claims = self.current()?;
        if claims.kind != TokenKind::Web {
            return Err(AuthError::WrongTokenKind {
                expected: TokenKind::Web,
                actual: claims.kind,
            });
        }

        Ok(UserRecord {
            id: claims.sub,
            first_name: claims.first_name.clone(),
            last_name: claims.last_name.clone(),
            email: claims.email.clone(),
            role: claims.role,
            password: None,
        })
    }
}

/// Clears the owning [`ClaimsContext`] when dropped.
///
/// Returned by [`ClaimsContext::bind_guarded`]; read access goes through
/// `Deref`.
#[derive(Debug)]
pub struct ContextGuard<'a> {
    context: &'a mut ClaimsContext,
}

impl Deref for ContextGuard<'_> {
    type Target = ClaimsContext;

    fn deref(&self) -> &Self::Target {
        self.context
    }
}

impl Drop for ContextGuard<'_> {
    fn drop(&mut self) {
        self.context.clear();
    }
}
