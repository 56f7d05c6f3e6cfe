//! # Turnstile
//!
//! A concurrent session registry for HTTP services: authenticate users,
//! issue opaque session ids, attach per-user payloads, and lazily expire
//! sessions under a uniform TTL.
//!
//! Turnstile owns nothing but sessions. The HTTP server, request routing,
//! credential storage, and JSON encoding of your domain records all stay on
//! your side of the fence; the registry consumes an
//! [`Authenticator`](turnstile_session::Authenticator) you implement and
//! emits session ids and cookie strings.
//!
//! ## Quick start
//!
//! ```rust
//! use turnstile::prelude::*;
//!
//! struct DevAuthenticator;
//!
//! impl Authenticator for DevAuthenticator {
//!     type Payload = PropertyMap;
//!
//!     fn authenticate(&self, username: &str, password: &str) -> bool {
//!         username == "admin" && password == "s3cret"
//!     }
//!
//!     fn user_payload(&self, username: &str) -> Option<PropertyMap> {
//!         let mut payload = PropertyMap::new();
//!         payload.set("username", username);
//!         Some(payload)
//!     }
//! }
//!
//! let registry = SessionRegistry::new();
//! registry.set_authenticator(DevAuthenticator);
//!
//! let id = registry
//!     .open_session("admin", "s3cret")
//!     .expect("authenticator installed")
//!     .expect("credentials accepted");
//!
//! assert!(registry.is_active(&id));
//! let set_cookie = format!("{SESSION_COOKIE}={}", registry.format_cookie(&id));
//! # assert!(set_cookie.contains(&id));
//! ```

pub use turnstile_cookie::{CookieError, SESSION_COOKIE, parse_cookie_header, session_id};
pub use turnstile_session::{
    Authenticator, DEFAULT_MAX_AGE, PropertyMap, SessionError, SessionRegistry,
};

/// One-stop imports for hosts embedding Turnstile.
pub mod prelude {
    pub use turnstile_cookie::{SESSION_COOKIE, session_id};
    pub use turnstile_session::{Authenticator, PropertyMap, SessionError, SessionRegistry};
}
