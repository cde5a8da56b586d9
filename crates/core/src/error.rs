use thiserror::Error;

use crate::model::{CatalogError, LessonError, QuestionError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Lesson(#[from] LessonError),
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
