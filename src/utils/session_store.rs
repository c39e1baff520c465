// In-memory session store: token -> names of the logged-in user.
// Every entry carries a deadline; nothing outlives the process.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Name of the cookie holding the session token
pub const SESSION_COOKIE: &str = "jokers_session";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionEntry {
    pub first_name: String,
    pub last_name: String,
}

/// Session found for the current request, placed in request extensions
/// by the session middleware.
#[derive(Debug, Clone)]
pub struct CurrentSession {
    pub token: String,
    pub entry: SessionEntry,
}

struct SessionRecord {
    entry: SessionEntry,
    /// None when `ttl` reaches past what `Instant` can represent
    expires_at: Option<Instant>,
}

impl SessionRecord {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.map_or(true, |deadline| deadline > now)
    }
}

type Entries = HashMap<String, SessionRecord>;

pub struct SessionStore {
    entries: RwLock<Entries>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // A panic while holding the lock leaves the map itself intact
    fn read(&self) -> RwLockReadGuard<'_, Entries> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Entries> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stores the entry under a fresh random token and returns the token
    pub fn create(&self, entry: SessionEntry) -> String {
        let token = Uuid::new_v4().to_string();
        let record = SessionRecord {
            entry,
            expires_at: Instant::now().checked_add(self.ttl),
        };
        self.write().insert(token.clone(), record);
        token
    }

    /// Returns the live entry for `token`; an expired one is dropped on the spot
    pub fn get(&self, token: &str) -> Option<SessionEntry> {
        let now = Instant::now();
        {
            let entries = self.read();
            match entries.get(token) {
                Some(record) if record.is_live(now) => return Some(record.entry.clone()),
                Some(_) => {}
                None => return None,
            }
        }
        self.remove(token);
        None
    }

    pub fn remove(&self, token: &str) -> bool {
        self.write().remove(token).is_some()
    }

    /// Drops every expired entry, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.write();
        let before = entries.len();
        entries.retain(|_, record| record.is_live(now));
        before - entries.len()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
