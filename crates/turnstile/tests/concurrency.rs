//! Concurrency tests: the registry is shared by one thread per inbound
//! request, so hammer it from many threads and check that the single
//! coarse lock keeps the state consistent.

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use turnstile::{Authenticator, PropertyMap, SessionRegistry};

struct CountingAuthenticator;

impl Authenticator for CountingAuthenticator {
    type Payload = PropertyMap;

    fn authenticate(&self, _username: &str, password: &str) -> bool {
        password == "pass"
    }

    fn user_payload(&self, username: &str) -> Option<PropertyMap> {
        let mut payload = PropertyMap::new();
        payload.set("username", username);
        Some(payload)
    }
}

#[test]
fn test_parallel_opens_yield_unique_ids_and_consistent_state() {
    const THREADS: usize = 8;
    const SESSIONS_PER_THREAD: usize = 50;

    let registry = Arc::new(SessionRegistry::new());
    registry.set_authenticator(CountingAuthenticator);

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let username = format!("user-{t}");
                let mut ids = Vec::with_capacity(SESSIONS_PER_THREAD);
                for _ in 0..SESSIONS_PER_THREAD {
                    let id = registry
                        .open_session(&username, "pass")
                        .expect("authenticator installed")
                        .expect("credentials accepted");
                    // Each freshly opened session must be immediately
                    // observable from the opening thread.
                    assert!(registry.is_active(&id));
                    ids.push(id);
                }
                ids
            })
        })
        .collect();

    let mut all_ids = HashSet::new();
    for handle in handles {
        for id in handle.join().expect("no panics") {
            assert!(all_ids.insert(id), "duplicate session id across threads");
        }
    }

    assert_eq!(registry.session_count(), THREADS * SESSIONS_PER_THREAD);
    assert_eq!(all_ids.len(), THREADS * SESSIONS_PER_THREAD);
}

#[test]
fn test_parallel_open_lookup_close_never_corrupts_the_registry() {
    const THREADS: usize = 8;
    const ROUNDS: usize = 40;

    let registry = Arc::new(SessionRegistry::new());
    registry.set_authenticator(CountingAuthenticator);

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let username = format!("user-{t}");
                for _ in 0..ROUNDS {
                    let id = registry
                        .open_session(&username, "pass")
                        .expect("authenticator installed")
                        .expect("credentials accepted");

                    let payload = registry.payload(&id).expect("payload attached");
                    assert_eq!(payload.get("username"), Some(username.as_str()));

                    registry.close_session(&id);
                    registry.close_session(&id); // idempotent under contention
                    assert!(!registry.is_active(&id));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("no panics");
    }

    // Every thread closed everything it opened.
    assert!(registry.is_empty());

    // The sweep still works after all those stale history entries:
    // a new session opens and expires cleanly.
    let id = registry
        .open_session("late-user", "pass")
        .expect("authenticator installed")
        .expect("credentials accepted");
    assert!(registry.is_active(&id));

    std::thread::sleep(std::time::Duration::from_millis(5));
    registry.set_max_age(std::time::Duration::from_millis(1));
    assert!(registry.is_empty());
}
