//! Navigation guard.
//!
//! Runs before every navigation. Only checks whether a token is present:
//! no expiry or signature validation happens client-side.

use super::table::{Route, DASHBOARD_PATH, LOGIN_PATH, REGISTER_PATH};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Proceed,
    Redirect(&'static str),
}

/// Decide whether navigation to `target` may proceed.
///
/// - protected route without a token: redirect to `/login`
/// - `/login` or `/register` with a token: redirect to `/dashboard`
/// - anything else: proceed
pub fn decide(target: &Route, has_token: bool) -> Decision {
    if target.requires_auth && !has_token {
        Decision::Redirect(LOGIN_PATH)
    } else if (target.path == LOGIN_PATH || target.path == REGISTER_PATH) && has_token {
        Decision::Redirect(DASHBOARD_PATH)
    } else {
        Decision::Proceed
    }
}
