use crate::base_storage::KeyValueStorage;
use state_error::Result;

/// Keys retired by schema changes, removed once at startup.
///
/// "pv-chat-history" was replaced by "pv-chat-history-v2" when entries
/// gained timestamps; the old transcript is not convertible.
const RETIRED_KEYS: &[&str] = &["pv-chat-history"];

/// Drop every retired key still present in the store. Idempotent, run
/// before any page state is read.
pub fn run_migrations<S: KeyValueStorage>(store: &mut S) -> Result<()> {
    for key in RETIRED_KEYS {
        if store.contains(key) {
            log::info!("removing retired key {}", key);
            store.remove(key)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_storage::FileStorage;
    use tempdir::TempDir;

    #[test]
    fn test_retired_keys_are_removed_once() {
        let temp_dir =
            TempDir::new("pv").expect("Failed to create temporary directory");
        let storage_path = temp_dir.path().join("state.json");
        let mut storage =
            FileStorage::new("TestStorage".to_string(), &storage_path);

        storage.set("pv-chat-history", "[]").unwrap();
        storage.set("pv-chat-history-v2", "[]").unwrap();

        run_migrations(&mut storage).unwrap();
        assert!(!storage.contains("pv-chat-history"));
        assert!(storage.contains("pv-chat-history-v2"));

        // Second run is a no-op.
        run_migrations(&mut storage).unwrap();
        assert!(storage.contains("pv-chat-history-v2"));
    }
}
