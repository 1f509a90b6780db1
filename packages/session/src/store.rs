use std::collections::HashMap;

use crate::error::SessionError;

/// Storage key for the boolean "contest mode" flag.
pub const CONTEST_MODE_KEY: &str = "contestModeActive";

/// Storage key for the serialized snapshot of the joined contest.
pub const CONTEST_DATA_KEY: &str = "activeContestData";

/// Persistence port with localStorage-shaped string key-value semantics.
/// The session reads the two keys once at startup and writes them on
/// every state transition.
pub trait SessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), SessionError>;
    fn remove(&mut self, key: &str) -> Result<(), SessionError>;
}

/// In-memory store for tests and headless use.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SessionError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), SessionError> {
        self.entries.remove(key);
        Ok(())
    }
}
