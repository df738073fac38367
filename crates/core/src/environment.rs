//! Deployment environment tag.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Deployment environment a credential is scoped to.
///
/// Issued tokens embed the environment they were minted for, and
/// verification resolves the signing key from that tag rather than from a
/// process-global default.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Environment {
    Local,
    Development,
    Test,
    Production,
}

impl Environment {
    /// Stable text identifier used in claims and configuration.
    pub const fn text_id(self) -> &'static str {
        match self {
            Environment::Local => "LOCAL",
            Environment::Development => "DEVELOPMENT",
            Environment::Test => "TEST",
            Environment::Production => "PRODUCTION",
        }
    }

    /// All environments.
    pub const fn all() -> [Environment; 4] {
        [
            Environment::Local,
            Environment::Development,
            Environment::Test,
            Environment::Production,
        ]
    }
}

impl core::fmt::Display for Environment {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.text_id())
    }
}

impl FromStr for Environment {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Environment::all()
            .into_iter()
            .find(|env| env.text_id() == s)
            .ok_or_else(|| CoreError::validation(format!("unknown environment '{s}'")))
    }
}
