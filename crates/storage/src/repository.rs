use async_trait::async_trait;
use fraction_core::model::{
    Badge, Catalog, Lesson, LessonId, Question, QuizAttempt, UserProgress,
};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result of recording an attempt: the updated record plus what it unlocked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressUpdate {
    pub progress: UserProgress,
    pub new_badges: Vec<Badge>,
}

/// Read-only access to lessons and questions.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// All lessons, ascending by `order`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the catalog cannot be read.
    async fn list_lessons(&self) -> Result<Vec<Lesson>, StorageError>;

    /// Fetch a lesson by ID; `None` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the catalog cannot be read.
    async fn get_lesson(&self, id: &LessonId) -> Result<Option<Lesson>, StorageError>;

    /// Questions of a lesson, ascending by `order`. Empty for unknown lessons.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the catalog cannot be read.
    async fn questions_for_lesson(&self, id: &LessonId) -> Result<Vec<Question>, StorageError>;
}

/// The learner's progress record.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Snapshot of the current record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be read.
    async fn get_user_progress(&self) -> Result<UserProgress, StorageError>;

    /// Apply a completed attempt and return the updated record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be updated.
    async fn record_attempt(&self, attempt: &QuizAttempt) -> Result<ProgressUpdate, StorageError>;
}

/// Process-lifetime repository: a fixed catalog plus one mutable progress record.
///
/// Clones share the same record, so handing a clone to each request handler
/// still mutates a single learner.
#[derive(Clone)]
pub struct InMemoryRepository {
    catalog: Arc<Catalog>,
    progress: Arc<Mutex<UserProgress>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
            progress: Arc::new(Mutex::new(UserProgress::default())),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new(Catalog::empty())
    }
}

#[async_trait]
impl CatalogRepository for InMemoryRepository {
    async fn list_lessons(&self) -> Result<Vec<Lesson>, StorageError> {
        Ok(self.catalog.lessons().to_vec())
    }

    async fn get_lesson(&self, id: &LessonId) -> Result<Option<Lesson>, StorageError> {
        Ok(self.catalog.lesson(id).cloned())
    }

    async fn questions_for_lesson(&self, id: &LessonId) -> Result<Vec<Question>, StorageError> {
        Ok(self.catalog.questions_for(id).cloned().collect())
    }
}

#[async_trait]
impl ProgressRepository for InMemoryRepository {
    async fn get_user_progress(&self) -> Result<UserProgress, StorageError> {
        let guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn record_attempt(&self, attempt: &QuizAttempt) -> Result<ProgressUpdate, StorageError> {
        let mut guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let new_badges = guard.record_attempt(attempt);
        Ok(ProgressUpdate {
            progress: guard.clone(),
            new_badges,
        })
    }
}

/// Aggregates the repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub catalog: Arc<dyn CatalogRepository>,
    pub progress: Arc<dyn ProgressRepository>,
}

impl Storage {
    /// In-memory storage seeded with the given catalog and a fresh progress record.
    #[must_use]
    pub fn in_memory(catalog: Catalog) -> Self {
        let repo = InMemoryRepository::new(catalog);
        let progress: Arc<dyn ProgressRepository> = Arc::new(repo.clone());
        let catalog: Arc<dyn CatalogRepository> = Arc::new(repo);
        Self { catalog, progress }
    }
}
