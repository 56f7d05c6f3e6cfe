//! Login demo: wires a static credential list to the session registry and
//! walks the full lifecycle a web host would drive — open, cookie, lookup,
//! expiry, logout.
//!
//! Run with logging to watch the registry's decisions:
//!
//! ```text
//! RUST_LOG=info cargo run -p login-demo
//! ```

use std::collections::HashMap;
use std::time::Duration;

use turnstile::prelude::*;

// ---------------------------------------------------------------------------
// A static credential source
// ---------------------------------------------------------------------------

/// Fixed username→(password, role) table. The kind of authenticator you use
/// in development before pointing Turnstile at a real user database.
struct StaticAuthenticator {
    users: HashMap<&'static str, (&'static str, &'static str)>,
}

impl StaticAuthenticator {
    fn with_demo_users() -> Self {
        let mut users = HashMap::new();
        users.insert("alice", ("wonderland", "admin"));
        users.insert("bob", ("builder", "viewer"));
        Self { users }
    }
}

impl Authenticator for StaticAuthenticator {
    type Payload = PropertyMap;

    fn authenticate(&self, username: &str, password: &str) -> bool {
        self.users
            .get(username)
            .is_some_and(|(expected, _)| *expected == password)
    }

    fn user_payload(&self, username: &str) -> Option<PropertyMap> {
        let (_, role) = self.users.get(username)?;
        let mut payload = PropertyMap::new();
        payload.set("username", username);
        payload.set("role", *role);
        Some(payload)
    }
}

// ---------------------------------------------------------------------------
// The walkthrough
// ---------------------------------------------------------------------------

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let registry = SessionRegistry::new();
    registry.set_authenticator(StaticAuthenticator::with_demo_users());

    // A bad password is a normal outcome, not an error.
    assert!(
        registry
            .open_session("alice", "guessed")
            .expect("authenticator installed")
            .is_none()
    );
    println!("rejected: alice with a wrong password");

    // A good login yields an id and a Set-Cookie value.
    let id = registry
        .open_session("alice", "wonderland")
        .expect("authenticator installed")
        .expect("credentials accepted");
    println!("opened:   {SESSION_COOKIE}={}", registry.format_cookie(&id));

    // The browser sends the cookie back on the next request.
    let inbound = format!("lang=en; {SESSION_COOKIE}={id}");
    let recovered = session_id(&inbound)
        .expect("well-formed header")
        .expect("session cookie present");

    let payload = registry.payload(&recovered).expect("alice has a payload");
    println!(
        "payload:  {}",
        serde_json::to_string(&payload).expect("serializable")
    );

    // Shrink the TTL: the registry sweeps synchronously and the session is
    // gone the moment the call returns.
    std::thread::sleep(Duration::from_millis(10));
    registry.set_max_age(Duration::from_millis(1));
    println!("expired:  active={}", registry.is_active(&recovered));

    // Log back in and log out properly this time.
    registry.set_max_age(Duration::from_secs(3600));
    let id = registry
        .open_session("bob", "builder")
        .expect("authenticator installed")
        .expect("credentials accepted");
    registry.close_session(&id);
    println!("logout:   {SESSION_COOKIE}={}", registry.format_reset_cookie());
}
