//! The session registry: tracks every active session and expires old ones.
//!
//! This is the central piece of the session layer. It's responsible for:
//! - Opening sessions after the installed [`Authenticator`] accepts credentials
//! - Answering "is this session id still valid?"
//! - Handing out clones of per-session payloads
//! - Expiring sessions lazily once they outlive the uniform `max_age`
//! - Emitting the `Set-Cookie` attribute strings the HTTP host needs
//!
//! # Concurrency note
//!
//! `SessionRegistry` IS thread-safe: a single coarse `Mutex` guards all of
//! its state, and every public operation holds it for its full duration,
//! including the expiration sweep. That makes all operations linearizable —
//! no two of them ever interleave their effects. Nothing done under the lock
//! can block (map lookups, a clock read, a payload clone), so the coarse
//! lock stays cheap even with one request-handling thread per inbound call.

use std::collections::{BTreeMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use rand::Rng;

use crate::cookie::{RESET_COOKIE_TTL, expires_attribute};
use crate::session::Session;
use crate::{Authenticator, SessionError};

/// Sessions older than this are expired unless the host overrides it.
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(60 * 60); // 1 hour

/// Registry of all active sessions.
///
/// Think of this as the server's front desk: every login registers here,
/// every protected request checks in here, and the desk quietly throws away
/// badges that have been sitting around for longer than
/// [`max_age`](Self::max_age).
///
/// ## Lifecycle
///
/// ```text
/// open_session() ──→ [Active] ──(close_session)──→ gone
///                       │
///                       └──(age > max_age, on next access)──→ gone
/// ```
///
/// Expiration is **lazy**: nothing runs in the background. Every read-path
/// operation first sweeps the oldest sessions, so an expired session is
/// never observably active even though its memory is reclaimed late.
///
/// ## The payload parameter
///
/// `P` is the per-user payload type manufactured by the authenticator
/// (commonly [`PropertyMap`](crate::PropertyMap)). The registry never hands
/// out its stored instance — [`payload`](Self::payload) always returns a
/// fresh clone, so callers can't reach back into registry state.
pub struct SessionRegistry<P> {
    inner: Mutex<RegistryInner<P>>,
}

/// Everything the registry mutex guards.
struct RegistryInner<P> {
    /// Uniform TTL applied to every session.
    max_age: Duration,

    /// The installed credential source. `None` until the host calls
    /// [`SessionRegistry::set_authenticator`]; opening a session before
    /// that is a sequencing error.
    authenticator: Option<Box<dyn Authenticator<Payload = P>>>,

    /// All active sessions, keyed by id.
    ///
    /// A `BTreeMap` so that [`SessionRegistry::list_sessions`] comes out in
    /// stable key order. Lookup is O(log n), which is indistinguishable from
    /// O(1) at any plausible session count.
    index: BTreeMap<String, Session<P>>,

    /// Session ids in creation order, oldest first.
    ///
    /// Drives the expiration sweep: since the front is always the oldest
    /// session, the sweep can stop at the first live entry that is still
    /// fresh. May contain ids already removed from `index` by a manual
    /// close; those stale entries are skipped and dropped lazily.
    history: VecDeque<String>,
}

impl<P> RegistryInner<P> {
    /// The lazy expiration sweep. Must run with the registry lock held.
    ///
    /// Repeatedly inspects the oldest entry of `history`:
    /// - already gone from `index` (manually closed) → drop the stale entry
    /// - still fresh (`age <= max_age`) → stop; everything younger is fresh too
    /// - too old → remove it from `index`, releasing its payload, and continue
    ///
    /// Each history entry is popped at most once over its lifetime, so the
    /// amortized cost per operation is O(1).
    fn close_expired_sessions(&mut self) {
        let now = Instant::now();

        loop {
            let Some(oldest) = self.history.front() else {
                // No active sessions left.
                return;
            };

            if let Some(session) = self.index.get(oldest) {
                if session.age(now) <= self.max_age {
                    // The oldest session is not old enough to expire,
                    // so nothing younger can be either.
                    return;
                }

                tracing::info!(
                    session_id = %session.id,
                    username = %session.username,
                    "session expired"
                );
                let expired = oldest.clone();
                self.index.remove(&expired);
            }
            // else: this id was manually closed earlier; only the stale
            // history entry is left to discard.

            self.history.pop_front();
        }
    }

    /// Discards every session. Must run with the registry lock held.
    fn close_all_sessions(&mut self) {
        self.index.clear();
        self.history.clear();
    }
}

impl<P> SessionRegistry<P>
where
    P: Clone + Send + 'static,
{
    /// Creates an empty registry with the default one-hour `max_age` and no
    /// authenticator installed.
    pub fn new() -> Self {
        Self::with_max_age(DEFAULT_MAX_AGE)
    }

    /// Creates an empty registry with a custom `max_age`.
    pub fn with_max_age(max_age: Duration) -> Self {
        Self {
            inner: Mutex::new(RegistryInner {
                max_age,
                authenticator: None,
                index: BTreeMap::new(),
                history: VecDeque::new(),
            }),
        }
    }

    /// Acquires the registry lock.
    ///
    /// A poisoned lock means an authenticator or a payload clone panicked
    /// on another thread. The registry's own bookkeeping is only mutated
    /// after those calls return, so the guarded state is still consistent
    /// and we can keep serving.
    fn lock(&self) -> MutexGuard<'_, RegistryInner<P>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the uniform session TTL.
    pub fn max_age(&self) -> Duration {
        self.lock().max_age
    }

    /// Updates the uniform session TTL and sweeps immediately.
    ///
    /// Shrinking the TTL can therefore expire sessions synchronously,
    /// within this very call.
    pub fn set_max_age(&self, max_age: Duration) {
        let mut inner = self.lock();
        inner.max_age = max_age;
        inner.close_expired_sessions();
    }

    /// Installs (or replaces) the authenticator.
    ///
    /// **This closes every active session.** A change of credential source
    /// invalidates all trust established through the previous one, so the
    /// swap is a full reset, not a soft transition. Surprising, deliberate,
    /// and relied upon by the hosts of this registry — do not soften it.
    pub fn set_authenticator(&self, authenticator: impl Authenticator<Payload = P>) {
        let mut inner = self.lock();

        let discarded = inner.index.len();
        if discarded > 0 {
            tracing::warn!(discarded, "authenticator replaced, closing all sessions");
        }

        inner.authenticator = Some(Box::new(authenticator));
        inner.close_all_sessions();
    }

    /// Authenticates `username`/`password` and, on success, opens a session.
    ///
    /// Three distinct outcomes:
    /// - `Err(SessionError::NoAuthenticator)` — no authenticator installed.
    ///   A sequencing error: the host is misconfigured. Hard failure.
    /// - `Ok(None)` — the authenticator rejected the credentials. A normal
    ///   outcome with no side effect; the host answers 401.
    /// - `Ok(Some(id))` — the session is open. The id is a fresh 128-bit
    ///   random token, unique for the lifetime of the registry, and the
    ///   session carries whatever payload the authenticator manufactured.
    pub fn open_session(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<String>, SessionError> {
        let mut inner = self.lock();

        let Some(authenticator) = inner.authenticator.as_ref() else {
            tracing::error!("no authenticator has been installed");
            return Err(SessionError::NoAuthenticator);
        };

        if !authenticator.authenticate(username, password) {
            tracing::info!(%username, "bad user credentials");
            return Ok(None);
        }

        let payload = authenticator.user_payload(username);

        let session = Session {
            id: generate_session_id(),
            created_at: Instant::now(),
            username: username.to_string(),
            payload,
        };
        let session_id = session.id.clone();

        inner.history.push_back(session_id.clone());
        inner.index.insert(session_id.clone(), session);

        tracing::info!(%session_id, %username, "session opened");
        Ok(Some(session_id))
    }

    /// Returns `true` if `session_id` is present and not expired.
    ///
    /// Sweeps first, so a session past its TTL is never observably active,
    /// even though removal is otherwise lazy.
    pub fn is_active(&self, session_id: &str) -> bool {
        let mut inner = self.lock();
        inner.close_expired_sessions();
        inner.index.contains_key(session_id)
    }

    /// Returns a fresh clone of the session's payload.
    ///
    /// `None` when the session is unknown, expired, or was opened without
    /// a payload. The registry's stored instance never leaves the lock.
    pub fn payload(&self, session_id: &str) -> Option<P> {
        let mut inner = self.lock();
        inner.close_expired_sessions();
        inner
            .index
            .get(session_id)
            .and_then(|session| session.payload.clone())
    }

    /// Returns the authenticated principal owning `session_id`.
    pub fn username(&self, session_id: &str) -> Option<String> {
        let mut inner = self.lock();
        inner.close_expired_sessions();
        inner
            .index
            .get(session_id)
            .map(|session| session.username.clone())
    }

    /// Closes a session, releasing its payload.
    ///
    /// Idempotent: closing an id that is unknown, expired, or already
    /// closed is a silent no-op. The id's history entry stays behind and
    /// is discarded by a later sweep.
    pub fn close_session(&self, session_id: &str) {
        let mut inner = self.lock();

        if inner.index.remove(session_id).is_some() {
            tracing::warn!(%session_id, "closing session");
        }
        // else: already closed, nothing to do.
    }

    /// Returns all currently active session ids.
    ///
    /// Sweeps first. Order is the index's key order, NOT creation order.
    pub fn list_sessions(&self) -> Vec<String> {
        let mut inner = self.lock();
        inner.close_expired_sessions();
        inner.index.keys().cloned().collect()
    }

    /// Number of currently active sessions (sweeps first).
    pub fn session_count(&self) -> usize {
        let mut inner = self.lock();
        inner.close_expired_sessions();
        inner.index.len()
    }

    /// Returns `true` if no session is currently active (sweeps first).
    pub fn is_empty(&self) -> bool {
        self.session_count() == 0
    }

    /// Formats the attribute portion of a live session cookie:
    /// `<id>; Path=/; Expires=<now + max_age, RFC 1123>`.
    ///
    /// The host picks the cookie name and prepends `name=` itself.
    pub fn format_cookie(&self, session_id: &str) -> String {
        let max_age = self.lock().max_age;
        format!("{session_id}; Path=/; Expires={}", expires_attribute(max_age))
    }

    /// Formats the attribute portion of a deletion cookie: an empty token
    /// expiring one second from now, which tells the browser to drop the
    /// session cookie almost immediately.
    pub fn format_reset_cookie(&self) -> String {
        format!("; Path=/; Expires={}", expires_attribute(RESET_COOKIE_TTL))
    }
}

impl<P> Default for SessionRegistry<P>
where
    P: Clone + Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Generates a random 32-character hex session id (128 bits of entropy).
///
/// 128 bits makes both guessing a live id and colliding with a past one
/// computationally infeasible, which is all the uniqueness invariant needs.
fn generate_session_id() -> String {
    let mut rng = rand::rng();
    let bytes: [u8; 16] = rng.random();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

// =========================================================================
// Tests
// =========================================================================
