//! Session types: the data the registry keeps per authenticated user.
//!
//! A "session" is the server's record of one successful login. It tracks:
//! - WHICH handle identifies it (an opaque random id — the only piece
//!   a client ever sees, via its cookie)
//! - WHO the authenticated user is
//! - WHEN it was created (so the registry can expire it)
//! - WHAT per-user payload the authenticator attached, if any
//!
//! Sessions are created by [`SessionRegistry::open_session`] and never leave
//! the registry; callers interact with them only through the id.
//!
//! [`SessionRegistry::open_session`]: crate::SessionRegistry::open_session

use std::time::{Duration, Instant};

/// One authenticated session.
///
/// The lifecycle is a one-way street:
///
/// ```text
///   Created ──→ Active ──(close_session)──→ Closed
///                  │
///                  └────(age > max_age)───→ Expired
/// ```
///
/// `Closed` and `Expired` are both terminal and observably identical —
/// the session is simply gone from the registry. There is no way back to
/// `Active`; a user who returns authenticates again and gets a new session.
///
/// `Instant` is Rust's monotonic clock — it always moves forward and isn't
/// affected by system clock changes, so session ages can't jump around when
/// an NTP sync steps the wall clock.
#[derive(Debug)]
pub(crate) struct Session<P> {
    /// The opaque token handed to the client. Immutable, globally unique
    /// for the lifetime of the registry.
    pub(crate) id: String,

    /// When the session was opened.
    pub(crate) created_at: Instant,

    /// The authenticated principal.
    pub(crate) username: String,

    /// Per-user data manufactured by the authenticator at open time.
    ///
    /// `None` means the authenticator chose not to attach anything — a
    /// different, observable state from "an empty payload". The registry
    /// owns this value exclusively and only ever hands out clones.
    pub(crate) payload: Option<P>,
}

impl<P> Session<P> {
    /// Time elapsed since the session was opened.
    pub(crate) fn age(&self, now: Instant) -> Duration {
        now.duration_since(self.created_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_age_grows_with_the_clock() {
        let session: Session<()> = Session {
            id: "abc".to_string(),
            created_at: Instant::now(),
            username: "user".to_string(),
            payload: None,
        };

        let later = session.created_at + Duration::from_millis(250);
        assert_eq!(session.age(later), Duration::from_millis(250));
    }

    #[test]
    fn test_age_at_creation_is_zero() {
        let now = Instant::now();
        let session: Session<()> = Session {
            id: "abc".to_string(),
            created_at: now,
            username: "user".to_string(),
            payload: None,
        };

        assert_eq!(session.age(now), Duration::ZERO);
    }
}
