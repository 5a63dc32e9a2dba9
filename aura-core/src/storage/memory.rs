use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use super::Storage;
use crate::error::{AuraError, AuraResult};

/// In-memory storage. Clones share the same slots.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: Arc<Mutex<HashMap<String, String>>>,
    fail_writes: Arc<AtomicBool>,
    fail_reads: Arc<AtomicBool>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `set`/`remove` fail until turned off again.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent `get` fail until turned off again.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    fn slots(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.slots.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn check_writable(&self) -> AuraResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AuraError::Storage("storage is not writable".into()));
        }
        Ok(())
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> AuraResult<Option<String>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(AuraError::Storage("storage is not readable".into()));
        }
        Ok(self.slots().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> AuraResult<()> {
        self.check_writable()?;
        self.slots().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> AuraResult<()> {
        self.check_writable()?;
        self.slots().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_slots() {
        let storage = MemoryStorage::new();
        let other = storage.clone();

        storage.set("k", "v").unwrap();
        assert_eq!(other.get("k").unwrap().as_deref(), Some("v"));

        other.remove("k").unwrap();
        assert_eq!(storage.get("k").unwrap(), None);
    }

    #[test]
    fn test_failing_writes_keep_previous_value() {
        let storage = MemoryStorage::new();
        storage.set("k", "v1").unwrap();

        storage.fail_writes(true);
        assert!(storage.set("k", "v2").is_err());
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v1"));

        storage.fail_writes(false);
        storage.set("k", "v2").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v2"));
    }

    #[test]
    fn test_failing_reads() {
        let storage = MemoryStorage::new();
        storage.set("k", "v").unwrap();

        storage.fail_reads(true);
        assert!(matches!(storage.get("k"), Err(AuraError::Storage(_))));

        storage.fail_reads(false);
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v"));
    }
}
