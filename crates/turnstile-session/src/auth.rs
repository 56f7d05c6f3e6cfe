//! Authentication hook for validating user credentials.
//!
//! Turnstile doesn't implement credential storage itself — that's your job
//! (or your identity provider's: a database table, LDAP, a static list in
//! dev). Instead it defines the [`Authenticator`] trait: validate a
//! username/password pair, and optionally hand back a per-user payload that
//! the registry will carry alongside the session.
//!
//! # Why a trait?
//!
//! The registry depends only on this capability pair, never on a concrete
//! credential source. That lets you:
//! - back authentication with SQL in production
//! - use a fixed credential list in development
//! - use a mock in tests
//!
//! without changing any registry code. Swapping the installed authenticator
//! at runtime is supported — but note that it discards every live session
//! (see [`SessionRegistry::set_authenticator`]).
//!
//! [`SessionRegistry::set_authenticator`]: crate::SessionRegistry::set_authenticator

/// Validates credentials and manufactures per-user session payloads.
///
/// # Trait bounds
///
/// - `Send + Sync` → the registry is shared across request-handling threads,
///   and all of them call into the installed authenticator.
/// - `'static` → the authenticator lives as long as the registry; it must
///   not borrow temporary data.
///
/// # The payload
///
/// `type Payload` is whatever per-user data you want attached to each
/// session — commonly a [`PropertyMap`](crate::PropertyMap), but any
/// `Clone + Send + 'static` type works. The registry stores the instance
/// returned by [`user_payload`](Self::user_payload) and only ever hands out
/// clones of it, so callers can't mutate the registry's copy.
///
/// # Example
///
/// ```rust
/// use turnstile_session::Authenticator;
///
/// /// Accepts exactly one hard-coded credential pair.
/// /// Fine for tests and demos — never use this in production!
/// struct DevAuthenticator;
///
/// impl Authenticator for DevAuthenticator {
///     type Payload = String;
///
///     fn authenticate(&self, username: &str, password: &str) -> bool {
///         username == "user" && password == "pass"
///     }
///
///     fn user_payload(&self, username: &str) -> Option<String> {
///         Some(format!("greetings, {username}"))
///     }
/// }
/// ```
pub trait Authenticator: Send + Sync + 'static {
    /// Opaque per-user data cloned out to callers on demand.
    type Payload;

    /// Checks a username/password pair.
    ///
    /// Must be a pure validation: no side effects on the registry, no
    /// session bookkeeping. Returns `true` if the credentials are valid.
    fn authenticate(&self, username: &str, password: &str) -> bool;

    /// Builds the payload to attach to a new session for `username`.
    ///
    /// Called by the registry only after [`authenticate`](Self::authenticate)
    /// has succeeded. Returning `None` is valid — the session is then opened
    /// without a payload.
    fn user_payload(&self, username: &str) -> Option<Self::Payload>;
}
