//! Session state shared by the router and the API client.
//!
//! Holds the bearer token in memory and mirrors it to a [`TokenStore`].
//! Lifecycle: `restore` at startup, `begin` after login or register, `end`
//! on logout. The token is zeroed in memory when the session ends.

pub mod store;

use std::sync::{PoisonError, RwLock};

use zeroize::Zeroizing;

pub use store::{KeyringStore, MemoryStore, StoreError, TokenStore};

/// The authenticated session, if any.
///
/// Uses `std::sync::RwLock` because the navigation guard is synchronous while
/// request hooks run on the async runtime; both only take short read locks.
pub struct Session {
    store: Box<dyn TokenStore>,
    token: RwLock<Option<Zeroizing<String>>>,
}

impl Session {
    /// Create an empty session over `store` without reading it.
    pub fn new(store: Box<dyn TokenStore>) -> Self {
        Self {
            store,
            token: RwLock::new(None),
        }
    }

    /// Create a session and load any token persisted by a previous run.
    pub fn restore(store: Box<dyn TokenStore>) -> Result<Self, StoreError> {
        let token = store.load()?.filter(|t| !t.is_empty());
        if token.is_some() {
            log::info!("Restored persisted session token");
        }
        Ok(Self {
            store,
            token: RwLock::new(token.map(Zeroizing::new)),
        })
    }

    /// Start an authenticated session with a token issued by the backend.
    pub fn begin(&self, token: &str) -> Result<(), StoreError> {
        self.store.save(token)?;
        *self.token.write().unwrap_or_else(PoisonError::into_inner) =
            Some(Zeroizing::new(token.to_string()));
        log::info!("Session started");
        Ok(())
    }

    /// End the session: zero the in-memory token and clear the store.
    ///
    /// The in-memory token is dropped even if clearing the store fails.
    pub fn end(&self) -> Result<(), StoreError> {
        // Dropping the Zeroizing wrapper wipes the old value.
        self.token
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        self.store.clear()?;
        log::info!("Session ended");
        Ok(())
    }

    /// Current token, if a session is active. An empty token counts as none.
    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .filter(|t| !t.is_empty())
            .map(|t| t.as_str().to_owned())
    }

    /// Whether a non-empty token is present. This is the only auth check
    /// made client-side.
    pub fn has_token(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|t| !t.is_empty())
    }
}
