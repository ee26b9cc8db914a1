//!
//! Capability evaluator: pure predicates deriving access decisions from the
//! current user's role set.
//!
//! Every predicate accepts `Option<&User>` and treats an absent user as
//! having no roles, so an unauthenticated session always degrades to the
//! least-privileged answer. None of these functions mutate state or error.

use crate::primitives::User;

/// Role tokens recognized by the capability predicates.
///
/// Roles are free-form strings on the wire; these are the values the
/// evaluator gives meaning to. Unknown tokens are carried in `User::roles`
/// but grant nothing.
pub mod roles {
    /// Full administrative access; bypasses ownership checks.
    pub const ADMIN: &str = "ADMIN";
    /// Theme developer; may register and unregister any theme.
    pub const DEVELOPER: &str = "DEVELOPER";
}

/// Checks whether the user's role set contains the given token.
///
/// Comparison is exact string equality; roles are not deduplicated and a
/// linear scan is fine at the sizes involved.
#[inline]
pub fn has_role(user: Option<&User>, role: &str) -> bool {
    user.is_some_and(|u| u.roles.iter().any(|r| r == role))
}

/// `true` iff the user holds the `DEVELOPER` role.
#[inline]
pub fn has_developer_role(user: Option<&User>) -> bool {
    has_role(user, roles::DEVELOPER)
}

/// `true` iff the user holds the `ADMIN` role.
#[inline]
pub fn has_admin_role(user: Option<&User>) -> bool {
    has_role(user, roles::ADMIN)
}

/// Whether the user may register new themes.
///
/// Granted to developers and admins; everyone else (including an absent
/// user) is denied.
#[inline]
pub fn can_register_themes(user: Option<&User>) -> bool {
    has_developer_role(user) || has_admin_role(user)
}

/// Whether the user may unregister a theme.
///
/// Developers and admins may unregister any theme. A user without either
/// role may unregister only a theme they own: `owner` must be present,
/// non-empty, and equal to `user.username` exactly. No case folding or
/// trimming is applied, so callers must supply normalized usernames.
///
/// # Arguments
/// * `user` - The current user, or `None` when unauthenticated.
/// * `owner` - Username of the theme's owner, when known.
///
/// # Returns
/// `true` if the privileged roles or the ownership check grant access.
#[inline]
pub fn can_unregister_themes(user: Option<&User>, owner: Option<&str>) -> bool {
    if can_register_themes(user) {
        return true;
    }
    match (user, owner) {
        (Some(u), Some(o)) if !o.is_empty() => u.username == o,
        _ => false,
    }
}
