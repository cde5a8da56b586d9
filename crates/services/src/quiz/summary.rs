use chrono::{DateTime, Utc};

use fraction_core::grading::{Cheer, Outcome, percentage};
use fraction_core::model::LessonId;

/// Result of a finished quiz run, shown before it is reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSummary {
    lesson_id: LessonId,
    score: u32,
    total: u32,
    answers: Vec<bool>,
    started_at: DateTime<Utc>,
    finished_at: DateTime<Utc>,
}

impl QuizSummary {
    #[must_use]
    pub fn new(
        lesson_id: LessonId,
        score: u32,
        total: u32,
        answers: Vec<bool>,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        Self {
            lesson_id,
            score,
            total,
            answers,
            started_at,
            finished_at,
        }
    }

    #[must_use]
    pub fn lesson_id(&self) -> &LessonId {
        &self.lesson_id
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn answers(&self) -> &[bool] {
        &self.answers
    }

    #[must_use]
    pub fn percentage(&self) -> u32 {
        percentage(self.score, self.total)
    }

    #[must_use]
    pub fn outcome(&self) -> Outcome {
        Outcome::classify(self.score, self.total)
    }

    #[must_use]
    pub fn cheer(&self) -> Cheer {
        Cheer::for_score(self.score, self.total)
    }

    #[must_use]
    pub fn can_retry(&self) -> bool {
        self.outcome().allows_retry()
    }

    /// "4 out of 5"
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} out of {}", self.score, self.total)
    }

    #[must_use]
    pub fn duration(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}
