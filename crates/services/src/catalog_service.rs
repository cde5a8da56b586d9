use std::sync::Arc;

use fraction_core::model::{Lesson, LessonId, Question};
use storage::CatalogRepository;

use crate::error::CatalogServiceError;

/// Read access to lessons and their questions.
#[derive(Clone)]
pub struct CatalogService {
    catalog: Arc<dyn CatalogRepository>,
}

impl CatalogService {
    #[must_use]
    pub fn new(catalog: Arc<dyn CatalogRepository>) -> Self {
        Self { catalog }
    }

    /// All lessons, ascending by `order`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogServiceError::Storage` on repository failures.
    pub async fn lessons(&self) -> Result<Vec<Lesson>, CatalogServiceError> {
        Ok(self.catalog.list_lessons().await?)
    }

    /// Point lookup by id.
    ///
    /// # Errors
    ///
    /// Returns `CatalogServiceError::LessonNotFound` for unknown ids.
    pub async fn lesson(&self, id: &LessonId) -> Result<Lesson, CatalogServiceError> {
        self.catalog
            .get_lesson(id)
            .await?
            .ok_or_else(|| CatalogServiceError::LessonNotFound(id.clone()))
    }

    /// Questions of a lesson, ascending by `order`. Unknown lessons yield an empty list.
    ///
    /// # Errors
    ///
    /// Returns `CatalogServiceError::Storage` on repository failures.
    pub async fn questions(&self, lesson_id: &LessonId) -> Result<Vec<Question>, CatalogServiceError> {
        Ok(self.catalog.questions_for_lesson(lesson_id).await?)
    }
}
