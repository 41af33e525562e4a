use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use super::AssignmentRepository;
use super::error::{RepositoryError, RepositoryResult};
use crate::domain::Assignment;

#[derive(Debug, Default)]
struct Counters {
    find_all: AtomicUsize,
    saves: AtomicUsize,
}

/// In-memory repository keeping insertion order; counts calls for assertions.
#[derive(Debug, Default, Clone)]
pub struct InMemoryRepository {
    documents: Arc<RwLock<Vec<Assignment>>>,
    counters: Arc<Counters>,
    fail_saves: Arc<AtomicBool>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-loaded with `documents`.
    pub fn with_documents(documents: Vec<Assignment>) -> Self {
        let repository = Self::new();
        *repository.documents.write() = documents;
        repository
    }

    pub fn insert(&self, document: Assignment) {
        let mut documents = self.documents.write();
        match documents.iter_mut().find(|d| d.id == document.id) {
            Some(existing) => *existing = document,
            None => documents.push(document),
        }
    }

    pub fn len(&self) -> usize {
        self.documents.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.read().is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<Assignment> {
        self.documents.read().iter().find(|d| d.id == id).cloned()
    }

    /// Makes every later `save` fail.
    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    pub fn find_all_calls(&self) -> usize {
        self.counters.find_all.load(Ordering::SeqCst)
    }

    pub fn save_calls(&self) -> usize {
        self.counters.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AssignmentRepository for InMemoryRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<Assignment>> {
        self.counters.find_all.fetch_add(1, Ordering::SeqCst);
        Ok(self.documents.read().clone())
    }

    async fn find_by(&self, id: Uuid) -> RepositoryResult<Option<Assignment>> {
        Ok(self.get(id))
    }

    async fn save(&self, document: Assignment) -> RepositoryResult<Assignment> {
        self.counters.saves.fetch_add(1, Ordering::SeqCst);
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(RepositoryError::WriteFailed("injected failure".to_string()));
        }
        self.insert(document.clone());
        Ok(document)
    }

    async fn delete(&self, document: &Assignment) -> RepositoryResult<()> {
        self.documents.write().retain(|d| d.id != document.id);
        Ok(())
    }
}
