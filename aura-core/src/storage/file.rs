use std::io::Write;
use std::path::PathBuf;

use tempfile::NamedTempFile;

use super::Storage;
use crate::error::{AuraError, AuraResult};

/// Stores each key as `<dir>/<key>.json`.
///
/// Writes land in a temporary file next to the target and are renamed over
/// it, so readers see either the old or the new value, never a mix.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStorage { dir: dir.into() }
    }

    pub fn path_for(&self, key: &str) -> AuraResult<PathBuf> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));

        if !valid {
            return Err(AuraError::InvalidStorageKey(key.to_string()));
        }

        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> AuraResult<Option<String>> {
        let path = self.path_for(key)?;

        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> AuraResult<()> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir)?;

        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(value.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| {
            AuraError::Storage(format!("Could not write {}: {}", path.display(), e.error))
        })?;

        tracing::debug!(key, path = %path.display(), bytes = value.len(), "wrote storage slot");
        Ok(())
    }

    fn remove(&self, key: &str) -> AuraResult<()> {
        let path = self.path_for(key)?;

        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        assert_eq!(storage.get("aura_events").unwrap(), None);
    }

    #[test]
    fn test_set_creates_directory_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested"));

        storage.set("aura_events", "[]").unwrap();
        storage.set("aura_events", "[1]").unwrap();

        assert_eq!(storage.get("aura_events").unwrap().as_deref(), Some("[1]"));
        assert!(dir.path().join("nested/aura_events.json").exists());
    }

    #[test]
    fn test_set_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        storage.set("session_id", "abc").unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(entries, vec!["session_id.json".to_string()]);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        storage.set("k", "v").unwrap();
        storage.remove("k").unwrap();
        storage.remove("k").unwrap();
        assert_eq!(storage.get("k").unwrap(), None);
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let storage = FileStorage::new("/tmp/unused");
        assert!(matches!(storage.path_for("../etc/passwd"), Err(AuraError::InvalidStorageKey(_))));
        assert!(matches!(storage.path_for(""), Err(AuraError::InvalidStorageKey(_))));
        assert!(matches!(storage.path_for(".hidden"), Err(AuraError::InvalidStorageKey(_))));
    }
}
