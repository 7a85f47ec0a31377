// src/core/session.rs

use crate::core::errors::StorageError;
use crate::core::storage::KeyValueStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const SESSION_KEY: &str = "session";

/// The logged-in user plus the bearer token issued by the auth service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSession {
    pub email: String,
    pub username: String,
    pub login_time: DateTime<Utc>,
    pub token: String,
}

impl UserSession {
    pub fn new(email: &str, username: &str, token: &str) -> Self {
        Self {
            email: email.to_string(),
            username: username.to_string(),
            login_time: Utc::now(),
            token: token.to_string(),
        }
    }
}

/// Persists the current session under a single storage key.
pub struct SessionStore<S: KeyValueStore> {
    storage: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn save(&self, session: &UserSession) {
        let result = serde_json::to_string(session)
            .map_err(StorageError::from)
            .and_then(|json| self.storage.set(SESSION_KEY, &json));
        if let Err(e) = result {
            warn!(error = %e, "Failed to persist session.");
        }
    }

    /// The stored session, if one exists and parses.
    pub fn load(&self) -> Option<UserSession> {
        match self.storage.get(SESSION_KEY) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(session) => Some(session),
                Err(e) => {
                    warn!(error = %e, "Stored session is corrupt, ignoring.");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "Failed to read session.");
                None
            }
        }
    }

    pub fn clear(&self) {
        debug!("Clearing session.");
        if let Err(e) = self.storage.remove(SESSION_KEY) {
            warn!(error = %e, "Failed to clear session.");
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.load().is_some_and(|s| !s.token.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::storage::MemoryStore;

    #[test]
    fn session_round_trip_and_clear() {
        let storage = MemoryStore::new();
        let sessions = SessionStore::new(storage.clone());
        assert!(!sessions.is_authenticated());

        let session = UserSession::new("ops@example.com", "ops", "jwt.token.value");
        sessions.save(&session);
        assert_eq!(sessions.load(), Some(session));
        assert!(sessions.is_authenticated());
        assert!(storage.raw(SESSION_KEY).unwrap().contains("loginTime"));

        sessions.clear();
        assert_eq!(sessions.load(), None);
        assert_eq!(storage.raw(SESSION_KEY), None);
    }

    #[test]
    fn corrupt_session_is_ignored() {
        let storage = MemoryStore::new();
        storage.set(SESSION_KEY, "[]").unwrap();
        assert_eq!(SessionStore::new(storage).load(), None);
    }
}
