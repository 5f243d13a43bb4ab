//! User session, bearer token, and display theme persistence.
//!
//! These records share the key-value store with the response cache but
//! live under reserved un-prefixed keys (`user`, `token`, `theme`), so
//! namespace-scoped cache clearing never touches them.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::storage::KeyValueStore;

const USER_KEY: &str = "user";
const TOKEN_KEY: &str = "token";
const THEME_KEY: &str = "theme";

/// Persisted user/session record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSession {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl UserSession {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: None,
            created_at: Utc::now(),
        }
    }
}

/// Display theme. Defaults to light, mirroring the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(format!("unknown theme {other:?} (expected light or dark)")),
        }
    }
}

/// Accessor for the session-related keys in the shared store.
#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Load the persisted session record. A corrupt record reads as
    /// signed-out rather than failing the application.
    pub fn user(&self) -> Option<UserSession> {
        let raw = self.store.get(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!("corrupt session record, treating as signed out: {}", e);
                None
            }
        }
    }

    pub fn set_user(&self, user: &UserSession) {
        // UserSession has no unserializable fields.
        let raw = serde_json::to_string(user).unwrap_or_default();
        self.store.set(USER_KEY, raw);
    }

    pub fn clear_user(&self) {
        self.store.remove(USER_KEY);
    }

    /// Bearer credential attached to API requests when present.
    pub fn token(&self) -> Option<String> {
        self.store.get(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    pub fn set_token(&self, token: &str) {
        self.store.set(TOKEN_KEY, token.to_string());
    }

    pub fn clear_token(&self) {
        self.store.remove(TOKEN_KEY);
    }

    pub fn theme(&self) -> Theme {
        self.store
            .get(THEME_KEY)
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default()
    }

    pub fn set_theme(&self, theme: Theme) {
        self.store.set(THEME_KEY, theme.as_str().to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn session_store() -> SessionStore {
        SessionStore::new(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn test_user_roundtrip() {
        let store = session_store();
        assert!(store.user().is_none());

        let user = UserSession::new("Amina");
        store.set_user(&user);
        assert_eq!(store.user(), Some(user));

        store.clear_user();
        assert!(store.user().is_none());
    }

    #[test]
    fn test_corrupt_user_record_reads_as_signed_out() {
        let backing = Arc::new(MemoryStore::new());
        backing.set("user", "not json".into());
        let store = SessionStore::new(backing);
        assert!(store.user().is_none());
    }

    #[test]
    fn test_token_roundtrip_and_empty_is_absent() {
        let store = session_store();
        assert!(store.token().is_none());
        store.set_token("abc123");
        assert_eq!(store.token().as_deref(), Some("abc123"));
        store.set_token("");
        assert!(store.token().is_none(), "empty token reads as absent");
        store.clear_token();
        assert!(store.token().is_none());
    }

    #[test]
    fn test_theme_defaults_to_light() {
        let store = session_store();
        assert_eq!(store.theme(), Theme::Light);
    }

    #[test]
    fn test_theme_roundtrip_and_toggle() {
        let store = session_store();
        store.set_theme(Theme::Dark);
        assert_eq!(store.theme(), Theme::Dark);
        store.set_theme(store.theme().toggled());
        assert_eq!(store.theme(), Theme::Light);
    }

    #[test]
    fn test_theme_parse_rejects_unknown() {
        assert!("solarized".parse::<Theme>().is_err());
    }
}
