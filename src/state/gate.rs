//! The render-or-redirect decision behind the route gate components.
//!
//! Pure function of the auth phase and the route's access rule, so the full
//! redirect matrix tests natively. The components in
//! [`crate::components::route_gate`] evaluate this on every phase change and
//! navigate on `Redirect`.

#[cfg(test)]
#[path = "gate_test.rs"]
mod gate_test;

use crate::net::types::Role;
use crate::state::auth::AuthPhase;

/// Path of the login page, the recovery point for unauthenticated visitors.
pub const LOGIN_PATH: &str = "/login";

/// A route's access rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteAccess {
    /// Requires authentication with exactly this role.
    Protected(Role),
    /// Login/register: unreachable while authenticated.
    PublicOnly,
}

/// What the gate does with the current navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateOutcome {
    /// Bootstrap still in flight: render a neutral placeholder, never
    /// redirect early.
    Pending,
    Render,
    Redirect(&'static str),
}

/// Each role's home path, the target of cross-role and public-only
/// redirects.
pub fn home_path(role: Role) -> &'static str {
    match role {
        Role::Owner => "/owner",
        Role::User => "/customer/main",
    }
}

/// Decide whether the current user may see a route.
///
/// Role matching is exact; neither role is a superset of the other. A
/// role mismatch redirects to the visitor's own home, not to login.
pub fn evaluate(phase: &AuthPhase, access: RouteAccess) -> GateOutcome {
    match (phase, access) {
        (AuthPhase::Initializing, _) => GateOutcome::Pending,
        (AuthPhase::Unauthenticated, RouteAccess::Protected(_)) => {
            GateOutcome::Redirect(LOGIN_PATH)
        }
        (AuthPhase::Unauthenticated, RouteAccess::PublicOnly) => GateOutcome::Render,
        (AuthPhase::Authenticated(user), RouteAccess::Protected(required)) => {
            if user.role == required {
                GateOutcome::Render
            } else {
                GateOutcome::Redirect(home_path(user.role))
            }
        }
        (AuthPhase::Authenticated(user), RouteAccess::PublicOnly) => {
            GateOutcome::Redirect(home_path(user.role))
        }
    }
}
