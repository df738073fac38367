//! `signet-auth` — token issuance, claims propagation, and role-rank
//! access enforcement.
//!
//! This crate is intentionally decoupled from HTTP and storage.

pub mod authorize;
pub mod claims;
pub mod context;
pub mod error;
pub mod gate;
pub mod issuer;
pub mod roles;
pub mod session;
pub mod token;
pub mod user;

pub use authorize::authorize;
pub use claims::{Claims, TokenKind};
pub use context::{ClaimsContext, ContextGuard};
pub use error::{AuthError, AuthResult, FailureClass, InvalidTokenReason};
pub use gate::{RequestGate, bearer_token};
pub use issuer::{IssuedSession, TokenIssuer};
pub use roles::Role;
pub use session::{SigningKey, SigningKeyProvider, StaticKeys};
pub use token::{
    TokenCodec, TokenRequest, system_token_validity, web_token_validity,
};
pub use user::{InMemoryUserDirectory, UserRecord, UserRecordLookup};
