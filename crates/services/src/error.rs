//! Shared error types for the services crate.

use thiserror::Error;

use fraction_core::model::LessonId;
use storage::StorageError;

use crate::quiz::{FlowStage, LessonFlow};

/// Errors emitted by `CatalogService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogServiceError {
    #[error("lesson not found: {0}")]
    LessonNotFound(LessonId),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `ProgressService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("lesson id cannot be empty")]
    EmptyLessonId,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by the quiz flow controller.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("lesson has no questions")]
    Empty,
    #[error("flow is at {actual:?}, expected {expected:?}")]
    WrongStage {
        expected: FlowStage,
        actual: FlowStage,
    },
    #[error("{option:?} is not an option of the current question")]
    UnknownOption { option: String },
    #[error("no answer selected")]
    NoSelection,
    #[error("question already answered")]
    AlreadyAnswered,
    #[error("current question has not been answered")]
    NotAnswered,
    #[error("quiz already finished")]
    Finished,
    #[error("quiz not finished yet")]
    NotFinished,
    #[error(transparent)]
    Catalog(#[from] CatalogServiceError),
}

/// A flow that could not be completed yet, handed back intact.
#[derive(Debug, Error)]
#[error("{reason}")]
pub struct IncompleteLesson {
    pub flow: LessonFlow,
    pub reason: QuizError,
}

impl IncompleteLesson {
    #[must_use]
    pub fn into_flow(self) -> LessonFlow {
        self.flow
    }
}

/// Errors emitted by `WelcomeAudioService` and speech providers.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WelcomeAudioError {
    #[error("speech synthesis is not configured")]
    Disabled,
    #[error("speech provider returned an empty response")]
    EmptyResponse,
    #[error("speech request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `ApiClient`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiClientError {
    #[error("request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Catalog(#[from] fraction_core::Error),
}
