//! Session/auth manager.
//!
//! A [`Session`] owns the bearer token and the signed-in user. The token is
//! cached in memory and mirrored to a [`KeyValueStore`] under
//! [`TOKEN_KEY`]; the user record is serialised under [`USER_KEY`]. The two
//! keys are written together but read independently, with no integrity check
//! between them.
//!
//! Sessions are constructed explicitly and shared by `Arc` with whatever
//! issues network calls.

use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::storage::{KeyValueStore, MemoryStore};

/// Storage key holding the bearer token.
pub const TOKEN_KEY: &str = "auth_token";

/// Storage key holding the serialised [`CurrentUser`].
pub const USER_KEY: &str = "user_data";

// ── CurrentUser ────────────────────────────────────────────────────────────────

/// The signed-in user as persisted alongside the token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
    #[serde(rename = "name")]
    pub display_name: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub life_stage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mission_location_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mission_location_name: Option<String>,
}

// ── Session ────────────────────────────────────────────────────────────────────

/// Bearer token cache with a single durable backing store.
pub struct Session {
    store: Arc<dyn KeyValueStore>,
    token_cache: Mutex<Option<String>>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("cached", &self.cache().is_some())
            .finish()
    }
}

impl Session {
    /// Session over `store`. Nothing is read until the first accessor call.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            token_cache: Mutex::new(None),
        }
    }

    /// Session backed by a fresh [`MemoryStore`].
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Store the token (cache + durable) and the serialised user.
    ///
    /// The cache is only filled once both keys are written; on any failure
    /// the session is cleared so no half-written state survives.
    pub fn set_session(&self, token: &str, user: &CurrentUser) -> Result<()> {
        if let Err(e) = self.persist(token, user) {
            tracing::warn!(error = %e, "failed to store session");
            self.clear();
            return Err(e);
        }
        *self.cache() = Some(token.to_string());

        tracing::info!(user = %user.username, role = %user.role, "session started");
        Ok(())
    }

    fn persist(&self, token: &str, user: &CurrentUser) -> Result<()> {
        let json = serde_json::to_string(user)?;
        self.store.set(TOKEN_KEY, token)?;
        self.store.set(USER_KEY, &json)
    }

    /// Cached token, else the stored one, else `None`. Empty tokens count as
    /// absent.
    pub fn token(&self) -> Option<String> {
        if let Some(token) = self.cache().as_ref().filter(|t| !t.is_empty()) {
            return Some(token.clone());
        }
        self.store.get(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    /// Stored user record, or `None` when missing or malformed.
    pub fn current_user(&self) -> Option<CurrentUser> {
        let raw = self.store.get(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring malformed stored user record");
                None
            }
        }
    }

    /// Drop the cached token and both stored keys. Safe to call repeatedly.
    pub fn clear(&self) {
        *self.cache() = None;
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.store.remove(key) {
                tracing::warn!(error = %e, key, "failed to remove session key");
            }
        }
        tracing::info!("session cleared");
    }

    /// `true` iff a token is available.
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    fn cache(&self) -> MutexGuard<'_, Option<String>> {
        self.token_cache
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
