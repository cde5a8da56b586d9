use std::sync::Arc;

use fraction_core::model::{LessonId, LessonProgress, QuizAttempt, UserProgress};
use storage::{ProgressRepository, ProgressUpdate};

use crate::error::ProgressError;

/// Facade over the learner's progress record.
#[derive(Clone)]
pub struct ProgressService {
    progress: Arc<dyn ProgressRepository>,
}

impl ProgressService {
    #[must_use]
    pub fn new(progress: Arc<dyn ProgressRepository>) -> Self {
        Self { progress }
    }

    /// Current snapshot of the record.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` on repository failures.
    pub async fn user_progress(&self) -> Result<UserProgress, ProgressError> {
        Ok(self.progress.get_user_progress().await?)
    }

    /// Latest result for one lesson, if it was ever completed.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` on repository failures.
    pub async fn lesson_progress(
        &self,
        lesson_id: &LessonId,
    ) -> Result<Option<LessonProgress>, ProgressError> {
        let progress = self.progress.get_user_progress().await?;
        Ok(progress.lesson(lesson_id).cloned())
    }

    /// Record a completed quiz attempt.
    ///
    /// Lesson ids are not checked against the catalog; an unknown id simply gets
    /// its own entry.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::EmptyLessonId` for a blank id, or
    /// `ProgressError::Storage` on repository failures.
    pub async fn record_attempt(
        &self,
        lesson_id: LessonId,
        score: u32,
        total_questions: u32,
    ) -> Result<ProgressUpdate, ProgressError> {
        if lesson_id.is_blank() {
            return Err(ProgressError::EmptyLessonId);
        }

        let attempt = QuizAttempt::new(lesson_id, score, total_questions);
        let update = self.progress.record_attempt(&attempt).await?;
        log::info!(
            "recorded attempt for {}: {}/{} (total correct {})",
            attempt.lesson_id,
            score,
            total_questions,
            update.progress.total_correct
        );
        for badge in &update.new_badges {
            log::info!("badge earned: {badge}");
        }
        Ok(update)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fraction_core::model::{Badge, Catalog};
    use storage::InMemoryRepository;

    fn service() -> ProgressService {
        ProgressService::new(Arc::new(InMemoryRepository::new(Catalog::empty())))
    }

    #[tokio::test]
    async fn blank_lesson_id_is_rejected() {
        let svc = service();
        let err = svc.record_attempt(LessonId::new(" "), 1, 1).await.unwrap_err();
        assert!(matches!(err, ProgressError::EmptyLessonId));
        assert_eq!(svc.user_progress().await.unwrap().total_correct, 0);
    }

    #[tokio::test]
    async fn second_attempt_overwrites_first() {
        let svc = service();
        let lesson = LessonId::new("lesson-1");
        svc.record_attempt(lesson.clone(), 2, 5).await.unwrap();
        svc.record_attempt(lesson.clone(), 3, 4).await.unwrap();

        let entry = svc.lesson_progress(&lesson).await.unwrap().unwrap();
        assert_eq!((entry.score, entry.total_questions, entry.attempts), (3, 4, 2));
        assert_eq!(svc.user_progress().await.unwrap().lesson_progress.len(), 1);
    }

    #[tokio::test]
    async fn scores_three_and_four_add_up_to_seven() {
        let svc = service();
        svc.record_attempt(LessonId::new("lesson-1"), 3, 5).await.unwrap();
        let update = svc.record_attempt(LessonId::new("lesson-2"), 4, 5).await.unwrap();
        assert_eq!(update.progress.total_correct, 7);
        assert!(update.new_badges.is_empty());
    }

    #[tokio::test]
    async fn super_star_sticks_after_threshold() {
        let svc = service();
        svc.record_attempt(LessonId::new("lesson-1"), 4, 5).await.unwrap();
        svc.record_attempt(LessonId::new("lesson-1"), 4, 5).await.unwrap();
        let update = svc.record_attempt(LessonId::new("lesson-1"), 3, 5).await.unwrap();
        assert_eq!(update.new_badges, vec![Badge::SuperStar]);

        let later = svc.record_attempt(LessonId::new("lesson-2"), 0, 5).await.unwrap();
        assert!(later.progress.has_badge(Badge::SuperStar));
        assert_eq!(
            later
                .progress
                .earned_badges
                .iter()
                .filter(|b| **b == Badge::SuperStar)
                .count(),
            1
        );
    }
}
