use ftc_scout::config::StorageConfig;
use ftc_scout::entries::{
    EntryId, EntryRepository, InMemoryEntryRepository, JsonFileEntryRepository, RepositoryError,
    ScoutingEntry,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Entry store picked at startup from `APP_DATA_PATH`.
pub(crate) enum ConfiguredRepository {
    Memory(InMemoryEntryRepository),
    JsonFile(JsonFileEntryRepository),
}

impl ConfiguredRepository {
    pub(crate) fn from_config(storage: &StorageConfig) -> Self {
        match &storage.data_path {
            Some(path) => Self::JsonFile(JsonFileEntryRepository::new(path)),
            None => Self::Memory(InMemoryEntryRepository::default()),
        }
    }

    pub(crate) fn describe(&self) -> String {
        match self {
            Self::Memory(_) => "memory".to_string(),
            Self::JsonFile(repository) => repository.path().display().to_string(),
        }
    }

    fn inner(&self) -> &dyn EntryRepository {
        match self {
            Self::Memory(repository) => repository,
            Self::JsonFile(repository) => repository,
        }
    }
}

impl EntryRepository for ConfiguredRepository {
    fn insert(&self, entry: ScoutingEntry) -> Result<ScoutingEntry, RepositoryError> {
        self.inner().insert(entry)
    }

    fn update(&self, entry: ScoutingEntry) -> Result<(), RepositoryError> {
        self.inner().update(entry)
    }

    fn fetch(&self, id: &EntryId) -> Result<Option<ScoutingEntry>, RepositoryError> {
        self.inner().fetch(id)
    }

    fn delete(&self, id: &EntryId) -> Result<(), RepositoryError> {
        self.inner().delete(id)
    }

    fn all(&self) -> Result<Vec<ScoutingEntry>, RepositoryError> {
        self.inner().all()
    }
}
