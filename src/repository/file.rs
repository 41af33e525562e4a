use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, warn};
use uuid::Uuid;

use super::AssignmentRepository;
use super::error::{RepositoryError, RepositoryResult};
use crate::domain::Assignment;

const JSON_EXTENSION: &str = "json";

const TEMP_EXTENSION: &str = "json.tmp";

#[derive(Debug, Clone)]
/// Stores each assignment as `<id>.json` under a directory.
pub struct FileRepository {
    storage_path: PathBuf,
}

impl FileRepository {
    pub fn new(storage_path: impl Into<PathBuf>) -> Self {
        Self {
            storage_path: storage_path.into(),
        }
    }

    /// Opens the repository, creating the directory if needed.
    pub fn open(storage_path: impl Into<PathBuf>) -> RepositoryResult<Self> {
        let repository = Self::new(storage_path);
        repository.ensure_storage_path()?;
        Ok(repository)
    }

    pub fn storage_path(&self) -> &Path {
        &self.storage_path
    }

    pub fn ensure_storage_path(&self) -> RepositoryResult<()> {
        if !self.storage_path.exists() {
            fs::create_dir_all(&self.storage_path).map_err(|_| {
                RepositoryError::StorageUnavailable {
                    path: self.storage_path.clone(),
                }
            })?;
        }
        Ok(())
    }

    fn document_path(&self, id: Uuid) -> PathBuf {
        self.storage_path.join(format!("{}.{}", id, JSON_EXTENSION))
    }

    fn temp_document_path(&self, id: Uuid) -> PathBuf {
        self.storage_path.join(format!("{}.{}", id, TEMP_EXTENSION))
    }

    fn read_document(path: &Path) -> RepositoryResult<Assignment> {
        let bytes = fs::read(path)?;
        serde_json::from_slice(&bytes).map_err(|e| RepositoryError::Corrupt {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Ids of every stored document, sorted.
    pub fn list_ids(&self) -> RepositoryResult<Vec<Uuid>> {
        if !self.storage_path.exists() {
            return Ok(Vec::new());
        }

        let mut ids = Vec::new();

        for entry in fs::read_dir(&self.storage_path)? {
            let path = entry?.path();

            if let Some(ext) = path.extension()
                && ext == JSON_EXTENSION
                && let Some(stem) = path.file_stem()
                && let Some(stem_str) = stem.to_str()
                && let Ok(id) = Uuid::parse_str(stem_str)
            {
                ids.push(id);
            }
        }

        ids.sort();
        Ok(ids)
    }

    /// Loads every document. Unreadable documents are skipped with a warning.
    pub fn load_all(&self) -> RepositoryResult<Vec<Assignment>> {
        let mut documents = Vec::new();

        for id in self.list_ids()? {
            let path = self.document_path(id);
            match Self::read_document(&path) {
                Ok(document) => documents.push(document),
                Err(e) => warn!(path = %path.display(), error = %e, "Skipping unreadable document"),
            }
        }

        Ok(documents)
    }

    pub fn load(&self, id: Uuid) -> RepositoryResult<Option<Assignment>> {
        let path = self.document_path(id);
        if !path.exists() {
            return Ok(None);
        }
        Self::read_document(&path).map(Some)
    }

    /// Writes to a temp file, syncs, then renames over the final path.
    pub fn store(&self, document: &Assignment) -> RepositoryResult<()> {
        self.ensure_storage_path()?;

        let bytes = serde_json::to_vec_pretty(document)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        let temp_path = self.temp_document_path(document.id);
        let final_path = self.document_path(document.id);

        {
            let mut file = File::create(&temp_path)?;
            file.write_all(&bytes)?;
            file.sync_all()?;
        }

        fs::rename(&temp_path, &final_path)?;

        debug!(id = %document.id, path = %final_path.display(), "Stored document");
        Ok(())
    }

    /// Removes a document; missing documents are ignored.
    pub fn remove(&self, id: Uuid) -> RepositoryResult<()> {
        match fs::remove_file(self.document_path(id)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn blocking<T, F>(&self, op: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(FileRepository) -> RepositoryResult<T> + Send + 'static,
    {
        let repository = self.clone();
        tokio::task::spawn_blocking(move || op(repository))
            .await
            .map_err(|e| RepositoryError::Task {
                reason: e.to_string(),
            })?
    }
}

#[async_trait]
impl AssignmentRepository for FileRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<Assignment>> {
        self.blocking(|repo| repo.load_all()).await
    }

    async fn find_by(&self, id: Uuid) -> RepositoryResult<Option<Assignment>> {
        self.blocking(move |repo| repo.load(id)).await
    }

    async fn save(&self, document: Assignment) -> RepositoryResult<Assignment> {
        self.blocking(move |repo| {
            repo.store(&document)?;
            Ok(document)
        })
        .await
    }

    async fn delete(&self, document: &Assignment) -> RepositoryResult<()> {
        let id = document.id;
        self.blocking(move |repo| repo.remove(id)).await
    }
}
