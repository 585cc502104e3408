//! VibeNotes client library.
//!
//! Routing and API access for the VibeNotes note-taking app: a static route
//! table with an authentication guard, a REST client for users, notes and
//! attachments, and the session that holds the bearer token both of them read.

pub mod api;
pub mod config;
pub mod router;
pub mod session;

pub use api::client::ApiClient;
pub use config::Config;
pub use router::Router;
pub use session::Session;
