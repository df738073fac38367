//! Access decision engine: the rank gate in front of protected operations.

use crate::context::ClaimsContext;
use crate::error::AuthError;
use crate::roles::Role;

/// Let the current caller through iff their role satisfies `required`.
///
/// Invoke at the top of any role-restricted operation, before its body
/// runs. The check is purely numeric: `actual.rank() >= required.rank()`,
/// so a check written against one role admits every higher-ranked role as
/// well.
///
/// An unbound context surfaces as `NoActiveContext`, not as a denial;
/// "not authenticated" and "authenticated but under-privileged" stay
/// separate outcomes.
///
/// - No IO
/// - No panics
/// - No business logic (pure policy check)
pub fn authorize(ctx: &ClaimsContext, required: Role) -> Result<(), AuthError> {
    let actual = ctx.role()?;
    if !actual.satisfies(required) {
        return Err(AuthError::InsufficientPermissions { actual, required });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use signet_core::{Environment, UserId};

    use crate::claims::{Claims, TokenKind};

    use super::*;

    fn context_with(role: Role) -> ClaimsContext {
        let mut ctx = ClaimsContext::new();
        ctx.bind(Claims {
            sub: UserId::new(1),
            first_name: "Test".to_string(),
            last_name: "Subject".to_string(),
            email: "subject@example.com".to_string(),
            role,
            environment: Environment::Test,
            kind: TokenKind::Web,
            password_reset: false,
            iat: 1_700_000_000,
            exp: 1_700_018_000,
        })
        .unwrap();
        ctx
    }

    #[test]
    fn grants_iff_rank_is_sufficient() {
        for actual in Role::all() {
            let ctx = context_with(actual);
            for required in Role::all() {
                let decision = authorize(&ctx, required);
                if actual.rank() >= required.rank() {
                    assert_eq!(decision, Ok(()), "{actual} vs {required}");
                } else {
                    assert_eq!(
                        decision,
                        Err(AuthError::InsufficientPermissions { actual, required }),
                        "{actual} vs {required}"
                    );
                }
            }
        }
    }

    #[test]
    fn denial_reports_the_caller_role() {
        let ctx = context_with(Role::User);
        let err = authorize(&ctx, Role::Admin).unwrap_err();
        assert_eq!(
            err,
            AuthError::InsufficientPermissions {
                actual: Role::User,
                required: Role::Admin,
            }
        );
    }

    #[test]
    fn unauthenticated_caller_is_not_a_denial() {
        let ctx = ClaimsContext::new();
        assert_eq!(
            authorize(&ctx, Role::User),
            Err(AuthError::NoActiveContext)
        );
    }
}
