//! Durable draft persistence.
//!
//! The store is an injected capability so the form manager has no compile-time
//! dependency on a storage medium. Stores are not coordinated across
//! concurrent sessions: two handles over the same location overwrite each
//! other, last write wins.

use super::EnrollmentDraft;
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Durable storage for one in-progress draft.
pub trait DraftStore {
    /// Read the persisted draft, if any.
    fn load(&self) -> Result<Option<EnrollmentDraft>>;
    /// Replace the persisted draft.
    fn save(&self, draft: &EnrollmentDraft) -> Result<()>;
    /// Remove the persisted draft.
    fn clear(&self) -> Result<()>;
}

/// Default on-disk draft location under the platform data directory.
pub fn default_draft_path() -> Result<PathBuf> {
    let base = dirs::data_dir().ok_or_else(|| anyhow!("no platform data directory"))?;
    Ok(base.join("agrireg").join("draft.json"))
}

/// Draft store backed by one pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store over the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Return the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DraftStore for JsonFileStore {
    fn load(&self) -> Result<Option<EnrollmentDraft>> {
        if !self.path.is_file() {
            return Ok(None);
        }
        let bytes =
            fs::read(&self.path).with_context(|| format!("read draft {}", self.path.display()))?;
        let draft: EnrollmentDraft =
            serde_json::from_slice(&bytes).context("parse draft JSON")?;
        Ok(Some(draft))
    }

    fn save(&self, draft: &EnrollmentDraft) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).context("create draft dir")?;
        }
        let text = serde_json::to_string_pretty(draft).context("serialize draft")?;
        fs::write(&self.path, text.as_bytes())
            .with_context(|| format!("write {}", self.path.display()))?;
        tracing::debug!(path = %self.path.display(), "draft persisted");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if self.path.is_file() {
            fs::remove_file(&self.path)
                .with_context(|| format!("remove {}", self.path.display()))?;
        }
        Ok(())
    }
}

/// In-memory store that still round-trips through serialization, so tests
/// exercise the same persistence path as the file store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<MemoryStoreInner>,
}

#[derive(Debug, Default)]
struct MemoryStoreInner {
    blob: Mutex<Option<String>>,
    saves: Mutex<usize>,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of saves observed (used to assert write coalescing).
    pub fn save_count(&self) -> usize {
        *self.inner.saves.lock().expect("memory store lock")
    }
}

impl DraftStore for MemoryStore {
    fn load(&self) -> Result<Option<EnrollmentDraft>> {
        let blob = self.inner.blob.lock().expect("memory store lock");
        match blob.as_deref() {
            Some(text) => {
                let draft = serde_json::from_str(text).context("parse draft JSON")?;
                Ok(Some(draft))
            }
            None => Ok(None),
        }
    }

    fn save(&self, draft: &EnrollmentDraft) -> Result<()> {
        let text = serde_json::to_string(draft).context("serialize draft")?;
        *self.inner.blob.lock().expect("memory store lock") = Some(text);
        *self.inner.saves.lock().expect("memory store lock") += 1;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.inner.blob.lock().expect("memory store lock") = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_round_trips_a_draft() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonFileStore::new(dir.path().join("draft.json"));
        assert!(store.load().expect("load empty").is_none());

        let mut draft = EnrollmentDraft::default();
        draft.beneficiary.first_name = "Maria".to_string();
        draft.push_parcel();
        store.save(&draft).expect("save");

        let restored = store.load().expect("load").expect("present");
        assert_eq!(restored, draft);

        store.clear().expect("clear");
        assert!(store.load().expect("load cleared").is_none());
    }

    #[test]
    fn memory_store_counts_saves() {
        let store = MemoryStore::new();
        let draft = EnrollmentDraft::default();
        store.save(&draft).expect("save");
        store.save(&draft).expect("save");
        assert_eq!(store.save_count(), 2);
        assert!(store.load().expect("load").is_some());
    }
}
