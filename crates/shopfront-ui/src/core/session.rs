//! Session token state shared across the UI.
//!
//! # Design
//! - Keep the session as plain data so callers can store/clear it without
//!   side effects; persistence lives with the app shell.
//! - `authenticated` is always derived from the token, never stored.

/// In-memory session state for the current user.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct SessionState {
    /// Opaque bearer token, absent when logged out.
    pub token: Option<String>,
}

impl SessionState {
    /// Store a token, marking the session authenticated.
    ///
    /// Blank tokens are treated as absent so a corrupt storage slot can
    /// never produce a half-authenticated session.
    pub fn set_token(&mut self, token: String) {
        let trimmed = token.trim();
        self.token = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
    }

    /// Drop the token, marking the session unauthenticated.
    pub fn clear(&mut self) {
        self.token = None;
    }

    /// Whether the session holds a token.
    #[must_use]
    pub const fn authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Token value for the `Authorization` header, when present.
    #[must_use]
    pub fn bearer(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::SessionState;

    #[test]
    fn authenticated_tracks_token_presence() {
        let mut session = SessionState::default();
        assert!(!session.authenticated());
        session.set_token("abc123".to_string());
        assert!(session.authenticated());
        assert_eq!(session.bearer(), Some("abc123"));
        session.clear();
        assert!(!session.authenticated());
        assert_eq!(session.bearer(), None);
    }

    #[test]
    fn blank_tokens_do_not_authenticate() {
        let mut session = SessionState::default();
        session.set_token("   ".to_string());
        assert!(!session.authenticated());
    }

    #[test]
    fn tokens_are_trimmed_on_store() {
        let mut session = SessionState::default();
        session.set_token("  abc123 ".to_string());
        assert_eq!(session.bearer(), Some("abc123"));
    }
}
