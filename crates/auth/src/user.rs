//! User identity records and the lookup seam consumed at issuance.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use signet_core::UserId;

use crate::roles::Role;

/// Identity snapshot of a user row.
///
/// `password` is an opaque optional credential column. Rows loaded through
/// paths that do not select it carry `None`; no hashing or storage policy
/// lives here. Serialization skips the column when absent, and anything
/// embedded in a response must go through
/// [`without_password`](Self::without_password) first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub password: Option<String>,
}

impl UserRecord {
    /// Display name ("First Last").
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Copy of the record with the credential column dropped.
    pub fn without_password(mut self) -> Self {
        self.password = None;
        self
    }
}

/// Read-side lookup of user rows, consumed by the issuing flow.
///
/// Persistence is out of scope for this crate; implementations live at
/// whatever storage layer an embedding service has.
pub trait UserRecordLookup: Send + Sync {
    /// The user registered under `email`, if any.
    fn by_email(&self, email: &str) -> Option<UserRecord>;
}

/// Map-backed [`UserRecordLookup`] for tests and embedded setups.
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    by_email: HashMap<String, UserRecord>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user, replacing any previous row under the same email.
    pub fn insert(&mut self, user: UserRecord) {
        self.by_email.insert(user.email.clone(), user);
    }
}

impl UserRecordLookup for InMemoryUserDirectory {
    fn by_email(&self, email: &str) -> Option<UserRecord> {
        self.by_email.get(email).cloned()
    }
}
