//! Simulated login session
//!
//! A session is nothing more than a JSON object under [`SESSION_KEY`]. The
//! token is generated locally and never checked against anything except its
//! own expiry; this is UI state, not authentication.

use std::sync::Arc;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::StoreResult;
use crate::storage::KeyValueStore;

/// Storage key holding the serialized session
pub const SESSION_KEY: &str = "ticketapp_session";

/// Default session lifetime (one hour)
pub const DEFAULT_SESSION_TTL_MS: i64 = 60 * 60 * 1000;

/// Length of generated session tokens
pub const TOKEN_LEN: usize = 11;

const TOKEN_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Client-side login state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub token: String,

    /// Expiry in epoch milliseconds; absent means the session never expires
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<i64>,
}

impl Session {
    /// Build a session for `email` with a fresh token expiring `ttl_ms` from `now_ms`
    pub fn new(email: impl Into<String>, now_ms: i64, ttl_ms: i64) -> Self {
        Self {
            email: email.into(),
            token: generate_token(),
            expires: Some(now_ms.saturating_add(ttl_ms)),
        }
    }

    /// Token present and not past its expiry
    pub fn is_valid(&self, now_ms: i64) -> bool {
        !self.token.is_empty() && self.expires.is_none_or(|expires| now_ms < expires)
    }
}

/// Random base-36 token
pub fn generate_token() -> String {
    let mut rng = rand::rng();
    (0..TOKEN_LEN)
        .map(|_| TOKEN_ALPHABET[rng.random_range(0..TOKEN_ALPHABET.len())] as char)
        .collect()
}

/// Reads and writes the session key
#[derive(Clone)]
pub struct SessionStore {
    kv: Arc<dyn KeyValueStore>,
    ttl_ms: i64,
}

impl SessionStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self::with_ttl(kv, DEFAULT_SESSION_TTL_MS)
    }

    /// A non-positive `ttl_ms` falls back to [`DEFAULT_SESSION_TTL_MS`]
    pub fn with_ttl(kv: Arc<dyn KeyValueStore>, ttl_ms: i64) -> Self {
        let ttl_ms = if ttl_ms > 0 {
            ttl_ms
        } else {
            warn!(%ttl_ms, "Session TTL must be positive, using the default");
            DEFAULT_SESSION_TTL_MS
        };
        Self { kv, ttl_ms }
    }

    pub fn ttl_ms(&self) -> i64 {
        self.ttl_ms
    }

    /// Store `session`, replacing any previous one
    pub fn set(&self, session: &Session) -> StoreResult<()> {
        let value = serde_json::to_string(session)?;
        self.kv.set_item(SESSION_KEY, &value)
    }

    /// Stored session, or `None` when absent or unreadable
    pub fn get(&self) -> Option<Session> {
        let raw = match self.kv.get_item(SESSION_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("Failed to read session: {}", e);
                return None;
            }
        };

        match serde_json::from_str::<Option<Session>>(&raw) {
            Ok(session) => session,
            Err(e) => {
                warn!("Ignoring malformed session value: {}", e);
                None
            }
        }
    }

    /// Remove the stored session
    pub fn clear(&self) -> StoreResult<()> {
        debug!("SessionStore::clear: called");
        self.kv.remove_item(SESSION_KEY)
    }

    /// Create and store a new session for `email`
    pub fn start(&self, email: &str, now_ms: i64) -> StoreResult<Session> {
        let session = Session::new(email, now_ms, self.ttl_ms);
        self.set(&session)?;
        info!(%email, expires = ?session.expires, "Session started");
        Ok(session)
    }

    /// Stored session, only if it is still valid at `now_ms`
    pub fn current(&self, now_ms: i64) -> Option<Session> {
        self.get().filter(|session| session.is_valid(now_ms))
    }
}
