use serde::{Deserialize, Serialize};

use kv_storage::{KeyValueStorage, CHAT_HISTORY_KEY};
use state_error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatEntry {
    pub role: ChatRole,
    pub text: String,
    pub time: String,
}

/// Session-scoped transcript, append-only within one page lifetime.
///
/// Deliberately never restored across a reload: the persisted copy
/// exists only so the explicit clear and the unload path invalidate the
/// same key.
#[derive(Debug, Default)]
pub struct ChatBuffer {
    entries: Vec<ChatEntry>,
}

impl ChatBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[ChatEntry] {
        &self.entries
    }

    pub fn append<S: KeyValueStorage>(
        &mut self,
        store: &mut S,
        entry: ChatEntry,
    ) -> Result<()> {
        self.entries.push(entry);
        let raw = serde_json::to_string(&self.entries)?;
        store.set(CHAT_HISTORY_KEY, &raw)
    }

    /// Manual clear: drop the buffer and its persisted key.
    pub fn clear<S: KeyValueStorage>(&mut self, store: &mut S) -> Result<()> {
        self.entries.clear();
        store.remove(CHAT_HISTORY_KEY)
    }
}

/// Unload hook: the transcript does not survive the page.
pub fn clear_on_unload<S: KeyValueStorage>(store: &mut S) -> Result<()> {
    store.remove(CHAT_HISTORY_KEY)
}
