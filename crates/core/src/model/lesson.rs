use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::LessonId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LessonError {
    #[error("lesson id cannot be empty")]
    EmptyId,

    #[error("lesson title cannot be empty")]
    EmptyTitle,
}

/// A concrete situation where the lesson's skill shows up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealWorldExample {
    pub icon: String,
    pub text: String,
}

impl RealWorldExample {
    #[must_use]
    pub fn new(icon: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            icon: icon.into(),
            text: text.into(),
        }
    }
}

/// Unvalidated lesson input, as authored in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonDraft {
    pub id: LessonId,
    pub title: String,
    pub description: String,
    pub why_it_matters: String,
    #[serde(default)]
    pub real_world_examples: Vec<RealWorldExample>,
    pub order: u32,
}

impl LessonDraft {
    /// Validate the draft into a `Lesson`.
    ///
    /// # Errors
    ///
    /// Returns `LessonError` if the id or title is blank.
    pub fn validate(self) -> Result<Lesson, LessonError> {
        if self.id.is_blank() {
            return Err(LessonError::EmptyId);
        }
        if self.title.trim().is_empty() {
            return Err(LessonError::EmptyTitle);
        }

        Ok(Lesson {
            id: self.id,
            title: self.title,
            description: self.description,
            why_it_matters: self.why_it_matters,
            real_world_examples: self.real_world_examples,
            order: self.order,
        })
    }
}

/// A lesson in the catalog. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "LessonDraft")]
pub struct Lesson {
    id: LessonId,
    title: String,
    description: String,
    why_it_matters: String,
    real_world_examples: Vec<RealWorldExample>,
    order: u32,
}

impl TryFrom<LessonDraft> for Lesson {
    type Error = LessonError;

    fn try_from(draft: LessonDraft) -> Result<Self, Self::Error> {
        draft.validate()
    }
}

impl Lesson {
    #[must_use]
    pub fn id(&self) -> &LessonId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn why_it_matters(&self) -> &str {
        &self.why_it_matters
    }

    #[must_use]
    pub fn real_world_examples(&self) -> &[RealWorldExample] {
        &self.real_world_examples
    }

    #[must_use]
    pub fn order(&self) -> u32 {
        self.order
    }
}
