use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use super::domain::{EntryId, ScoutingEntry};

/// Storage abstraction so the service can run against memory or disk.
pub trait EntryRepository: Send + Sync {
    fn insert(&self, entry: ScoutingEntry) -> Result<ScoutingEntry, RepositoryError>;
    fn update(&self, entry: ScoutingEntry) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &EntryId) -> Result<Option<ScoutingEntry>, RepositoryError>;
    fn delete(&self, id: &EntryId) -> Result<(), RepositoryError>;
    /// Every stored entry in insertion order.
    fn all(&self) -> Result<Vec<ScoutingEntry>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("entry already exists")]
    Conflict,
    #[error("entry not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, RepositoryError> {
    mutex
        .lock()
        .map_err(|_| RepositoryError::Unavailable("entry store lock poisoned".to_string()))
}

fn insert_into(
    entries: &mut Vec<ScoutingEntry>,
    entry: ScoutingEntry,
) -> Result<ScoutingEntry, RepositoryError> {
    if entries.iter().any(|existing| existing.id == entry.id) {
        return Err(RepositoryError::Conflict);
    }
    entries.push(entry.clone());
    Ok(entry)
}

fn replace_in(entries: &mut [ScoutingEntry], entry: ScoutingEntry) -> Result<(), RepositoryError> {
    let slot = entries
        .iter_mut()
        .find(|existing| existing.id == entry.id)
        .ok_or(RepositoryError::NotFound)?;
    *slot = entry;
    Ok(())
}

fn remove_from(entries: &mut Vec<ScoutingEntry>, id: &EntryId) -> Result<(), RepositoryError> {
    let before = entries.len();
    entries.retain(|entry| &entry.id != id);
    if entries.len() == before {
        Err(RepositoryError::NotFound)
    } else {
        Ok(())
    }
}

/// Process-local store, used by tests and when no data path is configured.
#[derive(Debug, Default, Clone)]
pub struct InMemoryEntryRepository {
    entries: Arc<Mutex<Vec<ScoutingEntry>>>,
}

impl InMemoryEntryRepository {
    pub fn with_entries(entries: Vec<ScoutingEntry>) -> Self {
        Self {
            entries: Arc::new(Mutex::new(entries)),
        }
    }
}

impl EntryRepository for InMemoryEntryRepository {
    fn insert(&self, entry: ScoutingEntry) -> Result<ScoutingEntry, RepositoryError> {
        insert_into(&mut *lock(&self.entries)?, entry)
    }

    fn update(&self, entry: ScoutingEntry) -> Result<(), RepositoryError> {
        replace_in(&mut *lock(&self.entries)?, entry)
    }

    fn fetch(&self, id: &EntryId) -> Result<Option<ScoutingEntry>, RepositoryError> {
        let guard = lock(&self.entries)?;
        Ok(guard.iter().find(|entry| &entry.id == id).cloned())
    }

    fn delete(&self, id: &EntryId) -> Result<(), RepositoryError> {
        remove_from(&mut *lock(&self.entries)?, id)
    }

    fn all(&self) -> Result<Vec<ScoutingEntry>, RepositoryError> {
        Ok(lock(&self.entries)?.clone())
    }
}

/// Keeps the whole collection as one JSON array on disk.
///
/// Every write rewrites the file through a sibling temp file and a rename, so
/// readers never observe a half-written array.
#[derive(Debug)]
pub struct JsonFileEntryRepository {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileEntryRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Vec<ScoutingEntry>, RepositoryError> {
        read_entries(&self.path)
    }

    fn modify<T>(
        &self,
        change: impl FnOnce(&mut Vec<ScoutingEntry>) -> Result<T, RepositoryError>,
    ) -> Result<T, RepositoryError> {
        let _guard = lock(&self.write_lock)?;
        let mut entries = read_entries(&self.path)?;
        let outcome = change(&mut entries)?;
        write_entries(&self.path, &entries)?;
        Ok(outcome)
    }
}

impl EntryRepository for JsonFileEntryRepository {
    fn insert(&self, entry: ScoutingEntry) -> Result<ScoutingEntry, RepositoryError> {
        self.modify(|entries| insert_into(entries, entry))
    }

    fn update(&self, entry: ScoutingEntry) -> Result<(), RepositoryError> {
        self.modify(|entries| replace_in(entries, entry))
    }

    fn fetch(&self, id: &EntryId) -> Result<Option<ScoutingEntry>, RepositoryError> {
        let _guard = lock(&self.write_lock)?;
        Ok(read_entries(&self.path)?
            .into_iter()
            .find(|entry| &entry.id == id))
    }

    fn delete(&self, id: &EntryId) -> Result<(), RepositoryError> {
        self.modify(|entries| remove_from(entries, id))
    }

    fn all(&self) -> Result<Vec<ScoutingEntry>, RepositoryError> {
        let _guard = lock(&self.write_lock)?;
        read_entries(&self.path)
    }
}

/// Reads a JSON array of entries; a missing file is an empty collection.
pub fn read_entries(path: &Path) -> Result<Vec<ScoutingEntry>, RepositoryError> {
    let raw = match fs::read(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(unavailable(path, err)),
    };
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    serde_json::from_slice(&raw).map_err(|err| unavailable(path, err))
}

fn write_entries(path: &Path, entries: &[ScoutingEntry]) -> Result<(), RepositoryError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| unavailable(parent, err))?;
    }
    let payload = serde_json::to_vec_pretty(entries).map_err(|err| unavailable(path, err))?;
    let staging = path.with_extension("json.tmp");
    fs::write(&staging, payload).map_err(|err| unavailable(&staging, err))?;
    fs::rename(&staging, path).map_err(|err| unavailable(path, err))
}

fn unavailable(path: &Path, err: impl std::fmt::Display) -> RepositoryError {
    RepositoryError::Unavailable(format!("{}: {err}", path.display()))
}
