//! Assignment persistence.
//!
//! [`AssignmentRepository`] is the single storage interface. [`FileRepository`] keeps one
//! JSON document per assignment; [`InMemoryRepository`] backs tests.

mod error;
pub mod file;

#[cfg(any(test, feature = "mock"))]
pub mod memory;


pub use error::{RepositoryError, RepositoryResult};
pub use file::FileRepository;

#[cfg(any(test, feature = "mock"))]
pub use memory::InMemoryRepository;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Assignment;

/// Durable store of assignments keyed by id.
#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    /// Every stored assignment.
    async fn find_all(&self) -> RepositoryResult<Vec<Assignment>>;

    async fn find_by(&self, id: Uuid) -> RepositoryResult<Option<Assignment>>;

    /// Inserts or replaces by id; returns the stored snapshot.
    async fn save(&self, document: Assignment) -> RepositoryResult<Assignment>;

    /// Removes by id; a missing document is not an error.
    async fn delete(&self, document: &Assignment) -> RepositoryResult<()>;
}
