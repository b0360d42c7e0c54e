use state_error::Result;

/// Synchronous string-keyed store scoped to one profile directory.
///
/// Mirrors browser `localStorage` semantics: scalar string values only,
/// whole-value overwrite, durable across restarts until explicitly
/// removed.
pub trait KeyValueStorage {
    /// Look up the value stored under `key`.
    fn get(&self, key: &str) -> Option<&str>;

    /// Create or overwrite the entry under `key` and persist it.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove the entry under `key` and persist the removal.
    /// Removing an absent key is a no-op.
    fn remove(&mut self, key: &str) -> Result<()>;

    /// Whether an entry exists under `key`.
    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Remove all persisted data at the pre-configured location.
    fn erase(&self) -> Result<()>;
}
