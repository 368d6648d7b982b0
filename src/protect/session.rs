//! Session lifecycle
//!
//! A session is created by password login, replaced by a later login, and
//! never explicitly destroyed; at most one is active at a time. Sessions
//! older than the TTL are stale and must be replaced before use.

use std::time::{Duration, Instant};

/// Sessions older than this must be replaced before use
pub const SESSION_TTL: Duration = Duration::from_secs(12 * 3600);

/// A short-lived credential obtained via password login
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub issued_at: Instant,
}

impl Session {
    /// New session issued now
    pub fn new(token: String) -> Self {
        Self {
            token,
            issued_at: Instant::now(),
        }
    }

    /// Whether the session age exceeds the TTL
    pub fn is_stale(&self) -> bool {
        self.issued_at.elapsed() > SESSION_TTL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_session_is_not_stale() {
        let session = Session::new("tok".to_string());
        assert!(!session.is_stale());
    }

    #[test]
    fn session_past_ttl_is_stale() {
        let issued_at = Instant::now()
            .checked_sub(SESSION_TTL + Duration::from_secs(60))
            .expect("clock far enough from epoch");
        let session = Session {
            token: "tok".to_string(),
            issued_at,
        };
        assert!(session.is_stale());
    }

    #[test]
    fn session_within_ttl_is_fresh() {
        let issued_at = Instant::now()
            .checked_sub(SESSION_TTL - Duration::from_secs(60))
            .expect("clock far enough from epoch");
        let session = Session {
            token: "tok".to_string(),
            issued_at,
        };
        assert!(!session.is_stale());
    }
}
