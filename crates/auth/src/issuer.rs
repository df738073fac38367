//! Issuing flow: resolve a user row and mint a session token for it.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::AuthError;
use crate::token::{TokenCodec, TokenRequest};
use crate::user::{UserRecord, UserRecordLookup};

/// A freshly minted credential with its validity window and the user it
/// identifies. The embedded record never carries the credential column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssuedSession {
    pub token: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub user: UserRecord,
}

/// Mints login sessions for known users.
///
/// Credential verification happens upstream; the issuer turns an
/// already-authenticated email into a signed session for the environment
/// its codec is configured with. An email with no backing row fails with
/// `InvalidCredentials`, which names the email but nothing else.
pub struct TokenIssuer {
    codec: TokenCodec,
    users: Arc<dyn UserRecordLookup>,
}

impl TokenIssuer {
    pub fn new(codec: TokenCodec, users: Arc<dyn UserRecordLookup>) -> Self {
        Self { codec, users }
    }

    /// Interactive login session for `email`.
    pub fn issue_session(
        &self,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<IssuedSession, AuthError> {
        self.mint(email, false, now)
    }

    /// Password-reset session for `email`: same window, but the token is
    /// marked as valid only for the reset flow.
    pub fn issue_reset_session(
        &self,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<IssuedSession, AuthError> {
        self.mint(email, true, now)
    }

    fn mint(
        &self,
        email: &str,
        password_reset: bool,
        now: DateTime<Utc>,
    ) -> Result<IssuedSession, AuthError> {
        let user = self
            .users
            .by_email(email)
            .ok_or_else(|| AuthError::InvalidCredentials {
                email: email.to_string(),
            })?;

        let request = TokenRequest::web(
            user.id,
            user.first_name.clone(),
            user.last_name.clone(),
            user.email.clone(),
            user.role,
            self.codec.environment(),
            password_reset,
        );
        let token = self.codec.issue(&request, now)?;

        tracing::info!(user_id = %user.id, password_reset, "session issued");

        Ok(IssuedSession {
            token,
            issued_at: now,
            expires_at: now + request.validity,
            user: user.without_password(),
        })
    }
}

#[cfg(test)]
mod tests {
    use signet_core::{Environment, UserId};

    use crate::roles::Role;
    use crate::session::{SigningKey, StaticKeys};
    use crate::token::web_token_validity;

    use super::*;

    fn issuer_with(users: Vec<UserRecord>) -> TokenIssuer {
        let codec = TokenCodec::new(Arc::new(StaticKeys::new(
            Environment::Test,
            SigningKey::new("issuer-test-key"),
        )));
        let mut directory = crate::user::InMemoryUserDirectory::new();
        for user in users {
            directory.insert(user);
        }
        TokenIssuer::new(codec, Arc::new(directory))
    }

    fn registered_user() -> UserRecord {
        UserRecord {
            id: UserId::new(11),
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            email: "grace@example.com".to_string(),
            role: Role::Admin,
            password: Some("stored-elsewhere".to_string()),
        }
    }

    fn test_now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn unknown_email_fails_with_invalid_credentials() {
        let issuer = issuer_with(vec![]);
        assert_eq!(
            issuer.issue_session("nobody@example.com", test_now()),
            Err(AuthError::InvalidCredentials {
                email: "nobody@example.com".to_string(),
            })
        );
    }

    #[test]
    fn session_covers_the_default_window() {
        let issuer = issuer_with(vec![registered_user()]);
        let now = test_now();

        let session = issuer.issue_session("grace@example.com", now).unwrap();
        assert_eq!(session.issued_at, now);
        assert_eq!(session.expires_at, now + web_token_validity());
        assert_eq!(session.user.id, UserId::new(11));
    }

    #[test]
    fn session_never_embeds_the_credential_column() {
        let issuer = issuer_with(vec![registered_user()]);
        let session = issuer.issue_session("grace@example.com", test_now()).unwrap();
        assert_eq!(session.user.password, None);
    }

    #[test]
    fn reset_sessions_are_marked_in_the_claims() {
        let issuer = issuer_with(vec![registered_user()]);
        let codec = TokenCodec::new(Arc::new(StaticKeys::new(
            Environment::Test,
            SigningKey::new("issuer-test-key"),
        )));
        let now = test_now();

        let session = issuer.issue_reset_session("grace@example.com", now).unwrap();
        let claims = codec.verify_and_decode(&session.token, now).unwrap();
        assert!(claims.password_reset);

        let login = issuer.issue_session("grace@example.com", now).unwrap();
        let claims = codec.verify_and_decode(&login.token, now).unwrap();
        assert!(!claims.password_reset);
    }
}
