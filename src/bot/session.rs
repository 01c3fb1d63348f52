//! Per-user session storage.

use crate::bot::state::ChatState;
use dashmap::DashMap;
use std::fmt;

/// Opaque user identifier supplied by the transport.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A user's position in the conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSession {
    pub user_id: UserId,
    pub state: ChatState,
}

/// Storage for conversation state, keyed by user.
///
/// A missing entry means `Idle`. Implementations must tolerate concurrent calls
/// for different users; for the same user the last `set` wins.
pub trait SessionStore: Send + Sync {
    fn get(&self, user_id: &UserId) -> Option<ChatState>;
    fn set(&self, user_id: &UserId, state: ChatState);
    fn delete(&self, user_id: &UserId);
}

/// Volatile store over a sharded concurrent map. Lost on restart.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: DashMap<UserId, ChatState>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, user_id: &UserId) -> Option<ChatState> {
        self.sessions.get(user_id).map(|entry| *entry.value())
    }

    fn set(&self, user_id: &UserId, state: ChatState) {
        self.sessions.insert(user_id.clone(), state);
    }

    fn delete(&self, user_id: &UserId) {
        self.sessions.remove(user_id);
    }
}
