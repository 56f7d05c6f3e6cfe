//! Error types for the session layer.

/// Errors that can occur during session registry operations.
///
/// Note how small this enum is: most "failures" in the session layer are
/// ordinary outcomes, not errors. A rejected password is `Ok(None)` from
/// [`SessionRegistry::open_session`](crate::SessionRegistry::open_session),
/// and looking up an unknown or expired id simply yields `None`. Only a
/// misconfigured call sequence is an actual error.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// No [`Authenticator`](crate::Authenticator) has been installed.
    ///
    /// This is a sequencing error — a deployment or programming defect,
    /// not a credential problem. The host must call
    /// [`set_authenticator`](crate::SessionRegistry::set_authenticator)
    /// before any session can be opened.
    #[error("no authenticator has been installed")]
    NoAuthenticator,
}
