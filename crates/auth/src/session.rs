//! Signing-key material and the environment-scoped provider seam.

use std::collections::HashMap;

use signet_core::Environment;

use crate::error::{AuthError, InvalidTokenReason};

/// Opaque HMAC key material.
///
/// `Debug` is written by hand so key bytes cannot reach a log line.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningKey(Vec<u8>);

impl SigningKey {
    pub fn new(material: impl Into<Vec<u8>>) -> Self {
        Self(material.into())
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl core::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("SigningKey(<redacted>)")
    }
}

/// Source of signing keys and of the active deployment environment.
///
/// The codec resolves keys through this trait using the environment a
/// token claims; there is no process-global fallback key. Implementations
/// are read-only from the codec's perspective.
pub trait SigningKeyProvider: Send + Sync {
    /// Key material for `environment`.
    ///
    /// An environment with no registered key fails with
    /// [`InvalidTokenReason::UnknownSigningKey`].
    fn signing_key(&self, environment: Environment) -> Result<SigningKey, AuthError>;

    /// The environment this process issues tokens for.
    fn environment(&self) -> Environment;
}

/// Fixed environment-to-key map. The provider used by services and tests.
#[derive(Debug, Clone)]
pub struct StaticKeys {
    current: Environment,
    keys: HashMap<Environment, SigningKey>,
}

impl StaticKeys {
    /// Provider holding one key for one environment.
    pub fn new(environment: Environment, key: SigningKey) -> Self {
        let mut keys = HashMap::new();
        keys.insert(environment, key);
        Self {
            current: environment,
            keys,
        }
    }

    /// Register key material for an additional environment.
    pub fn with_key(mut self, environment: Environment, key: SigningKey) -> Self {
        self.keys.insert(environment, key);
        self
    }

    /// Build from `SIGNET_ENVIRONMENT` and `SIGNET_SIGNING_KEY`.
    ///
    /// Unset or unrecognized values fall back to `Local` and an insecure
    /// development key, with a warning, so local setups work out of the
    /// box.
    pub fn from_env() -> Self {
        let environment = match std::env::var("SIGNET_ENVIRONMENT") {
            Ok(raw) => raw.parse::<Environment>().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "unrecognized SIGNET_ENVIRONMENT, defaulting to LOCAL");
                Environment::Local
            }),
            Err(_) => {
                tracing::warn!("SIGNET_ENVIRONMENT not set, defaulting to LOCAL");
                Environment::Local
            }
        };

        let key = std::env::var("SIGNET_SIGNING_KEY").unwrap_or_else(|_| {
            tracing::warn!("SIGNET_SIGNING_KEY not set, using insecure dev default");
            "signet-dev-secret".to_string()
        });

        Self::new(environment, SigningKey::new(key.into_bytes()))
    }
}

impl SigningKeyProvider for StaticKeys {
    fn signing_key(&self, environment: Environment) -> Result<SigningKey, AuthError> {
        self.keys
            .get(&environment)
            .cloned()
            .ok_or(AuthError::TokenInvalid {
                reason: InvalidTokenReason::UnknownSigningKey,
            })
    }

    fn environment(&self) -> Environment {
        self.current
    }
}
