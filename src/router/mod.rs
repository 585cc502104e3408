//! Client-side routing: the route table and the auth guard.
//!
//! [`Router::navigate`] runs a full transition: resolve the path, apply static
//! redirects, consult the guard with the session's token state, and follow
//! guard redirects until a route is allowed.

pub mod guard;
pub mod table;


use std::sync::Arc;

use thiserror::Error;

use crate::session::Session;
pub use guard::{decide, Decision};
pub use table::{Resolved, Route, RouteTable, Target, View};

/// Redirect hops allowed before a navigation is abandoned.
const MAX_REDIRECTS: usize = 8;

#[derive(Debug, Error, PartialEq)]
pub enum RouteError {
    #[error("No route matches {0}")]
    NotFound(String),
    #[error("Too many redirects navigating to {0}")]
    RedirectLoop(String),
}

/// Outcome of a navigation.
#[derive(Debug, Clone, PartialEq)]
pub struct Navigation<'a> {
    /// Path originally asked for.
    pub requested: String,
    /// Where the navigation ended up.
    pub resolved: Resolved<'a>,
}

impl Navigation<'_> {
    pub fn was_redirected(&self) -> bool {
        table::normalize(&self.requested) != self.resolved.path
    }
}

pub struct Router {
    table: RouteTable,
    session: Arc<Session>,
}

impl Router {
    pub fn new(table: RouteTable, session: Arc<Session>) -> Self {
        Self { table, session }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Navigate from `from` (if any) to `to`.
    pub fn navigate(&self, from: Option<&str>, to: &str) -> Result<Navigation<'_>, RouteError> {
        let mut path = to.to_string();

        for _ in 0..=MAX_REDIRECTS {
            let resolved = self
                .table
                .resolve(&path)
                .ok_or_else(|| RouteError::NotFound(path.clone()))?;

            let next = match resolved.route.target {
                Target::Redirect(target) => Some(target),
                Target::View(_) => match decide(resolved.route, self.session.has_token()) {
                    Decision::Proceed => None,
                    Decision::Redirect(target) => {
                        log::debug!(
                            "Guard redirected {} -> {} (from {})",
                            resolved.path,
                            target,
                            from.unwrap_or("<start>")
                        );
                        Some(target)
                    }
                },
            };

            match next {
                Some(target) => path = target.to_string(),
                None => {
                    log::debug!("Navigated to {} ({})", resolved.path, resolved.route.name);
                    return Ok(Navigation {
                        requested: to.to_string(),
                        resolved,
                    });
                }
            }
        }

        Err(RouteError::RedirectLoop(to.to_string()))
    }
}
