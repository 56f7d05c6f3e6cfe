//! Session registry for Turnstile.
//!
//! This crate handles the lifecycle of authenticated sessions:
//!
//! 1. **Authentication** — validating who a user is ([`Authenticator`] trait)
//! 2. **Session tracking** — knowing which session ids are live
//!    ([`SessionRegistry`]), with lazy FIFO expiration under a single lock
//! 3. **Cookie framing** — producing the `Set-Cookie` attribute strings
//!    that carry a session id to the browser and take it away again
//!
//! # How it fits in the stack
//!
//! ```text
//! HTTP host (above)   ← routes requests, picks the cookie name, answers 401
//!     ↕
//! Session layer (this crate)  ← owns session identity, payloads, and TTL
//!     ↕
//! Credential source (below)   ← your Authenticator impl: SQL, LDAP, a list
//! ```
//!
//! The registry never parses raw headers and never touches storage; it
//! consumes an [`Authenticator`] and emits session ids and cookie strings.

mod auth;
mod cookie;
mod error;
mod payload;
mod registry;
mod session;

pub use auth::Authenticator;
pub use error::SessionError;
pub use payload::PropertyMap;
pub use registry::{DEFAULT_MAX_AGE, SessionRegistry};
