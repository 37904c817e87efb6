//! Privilege-gated route guard
//!
//! Evaluated afresh on every render; there is no cached decision.

use crate::privileges::{PrivilegeFlag, has_any_privilege, has_privilege};
use crate::session::Session;

/// What a route requires beyond authentication
#[derive(Debug, Clone, Copy)]
pub enum Require {
    /// Authentication only
    None,
    /// One specific flag
    Flag(PrivilegeFlag),
    /// Any flag of the set
    AnyOf(&'static [PrivilegeFlag]),
}

/// Guard decision for a navigation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    /// Session bootstrap in progress - render a spinner, no decision yet
    Loading,
    /// No valid session - redirect to login
    Unauthenticated,
    /// Authenticated but missing the required flag(s) - redirect to the
    /// default landing page
    Insufficient,
    /// Render the protected content
    Authorized,
}

/// Evaluate the guard for the current session state
pub fn evaluate(bootstrapping: bool, session: Option<&Session>, require: Require) -> GuardState {
    if bootstrapping {
        return GuardState::Loading;
    }
    let Some(session) = session else {
        return GuardState::Unauthenticated;
    };
    let authorized = match require {
        Require::None => true,
        Require::Flag(flag) => has_privilege(session.privileges(), flag),
        Require::AnyOf(flags) => has_any_privilege(session.privileges(), flags),
    };
    if authorized {
        GuardState::Authorized
    } else {
        GuardState::Insufficient
    }
}
