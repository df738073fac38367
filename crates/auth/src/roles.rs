//! Role hierarchy for rank-based access checks.

use core::cmp::Ordering;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use signet_core::CoreError;

/// Authorization level granted to a subject.
///
/// Every role carries an explicit integer rank, and access checks compare
/// ranks numerically ("at least as privileged as"). A higher-ranked role
/// therefore passes every check written for a lower one without the check
/// naming it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    User,
    System,
    Developer,
    Admin,
}

impl Role {
    /// Explicit stored rank.
    ///
    /// Ranks happen to ascend in declaration order but are independent of
    /// it: inserting or reordering variants must not change any existing
    /// rank.
    pub const fn rank(self) -> u8 {
        match self {
            Role::User => 1,
            Role::System => 2,
            Role::Developer => 3,
            Role::Admin => 4,
        }
    }

    /// Stable text identifier used in claims and storage.
    pub const fn text_id(self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::System => "SYSTEM",
            Role::Developer => "DEVELOPER",
            Role::Admin => "ADMIN",
        }
    }

    /// All roles, in ascending rank order.
    pub const fn all() -> [Role; 4] {
        [Role::User, Role::System, Role::Developer, Role::Admin]
    }

    /// Whether this role is at least as privileged as `required`.
    pub const fn satisfies(self, required: Role) -> bool {
        self.rank() >= required.rank()
    }
}

// Ordering goes through the stored rank, never the declaration position.
impl Ord for Role {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for Role {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.text_id())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::all()
            .into_iter()
            .find(|role| role.text_id() == s)
            .ok_or_else(|| CoreError::validation(format!("unknown role '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_are_unique_and_ascending() {
        let ranks: Vec<u8> = Role::all().iter().map(|r| r.rank()).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4]);
    }

    #[test]
    fn ordering_follows_rank() {
        assert!(Role::User < Role::System);
        assert!(Role::System < Role::Developer);
        assert!(Role::Developer < Role::Admin);
        assert_eq!(Role::all().iter().max(), Some(&Role::Admin));
    }

    #[test]
    fn satisfies_is_reflexive_and_rank_based() {
        for actual in Role::all() {
            for required in Role::all() {
                assert_eq!(
                    actual.satisfies(required),
                    actual.rank() >= required.rank(),
                    "{actual} vs {required}"
                );
            }
        }
    }

    #[test]
    fn admin_satisfies_everything() {
        for required in Role::all() {
            assert!(Role::Admin.satisfies(required));
        }
    }

    #[test]
    fn user_satisfies_only_itself() {
        assert!(Role::User.satisfies(Role::User));
        assert!(!Role::User.satisfies(Role::System));
        assert!(!Role::User.satisfies(Role::Developer));
        assert!(!Role::User.satisfies(Role::Admin));
    }

    #[test]
    fn text_ids_round_trip() {
        for role in Role::all() {
            assert_eq!(role.text_id().parse::<Role>().unwrap(), role);
        }
        assert!("SUPERUSER".parse::<Role>().is_err());
    }

    #[test]
    fn serde_uses_the_text_id() {
        let json = serde_json::to_string(&Role::Developer).unwrap();
        assert_eq!(json, "\"DEVELOPER\"");
        let back: Role = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Role::Developer);
    }
}
