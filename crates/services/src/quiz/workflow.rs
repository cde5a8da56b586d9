use fraction_core::Clock;
use fraction_core::model::{Lesson, LessonId};
use storage::ProgressUpdate;

use super::flow::LessonFlow;
use super::session::{Advance, QuizSession};
use super::summary::QuizSummary;
use crate::catalog_service::CatalogService;
use crate::error::{IncompleteLesson, QuizError};
use crate::progress_service::ProgressService;

/// A lesson whose quiz was finished and reported.
#[derive(Debug, Clone)]
pub struct CompletedLesson {
    pub lesson: Lesson,
    pub summary: QuizSummary,
    /// Updated record, or `None` when the report failed.
    pub update: Option<ProgressUpdate>,
}

/// Starts lesson flows from the catalog and reports finished quizzes.
#[derive(Clone)]
pub struct QuizLoopService {
    clock: Clock,
    catalog: CatalogService,
    progress: ProgressService,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(clock: Clock, catalog: CatalogService, progress: ProgressService) -> Self {
        Self {
            clock,
            catalog,
            progress,
        }
    }

    /// Load a lesson and its questions and open the flow at the intro.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Catalog` for unknown lessons or storage failures, and
    /// `QuizError::Empty` when the lesson has no questions.
    pub async fn start(&self, lesson_id: &LessonId) -> Result<LessonFlow, QuizError> {
        let lesson = self.catalog.lesson(lesson_id).await?;
        let questions = self.catalog.questions(lesson_id).await?;
        let quiz = QuizSession::new(lesson_id.clone(), questions, self.clock.now())?;
        log::debug!(
            "started lesson {} with {} questions",
            lesson_id,
            quiz.total_questions()
        );
        Ok(LessonFlow::new(lesson, quiz))
    }

    /// Advance the quiz, stamping completion with the service clock.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` if the flow is not in the quiz stage or the current
    /// question cannot be left yet.
    pub fn advance(&self, flow: &mut LessonFlow) -> Result<Advance, QuizError> {
        flow.quiz_mut()?.advance(self.clock.now())
    }

    /// # Errors
    ///
    /// Returns `QuizError::WrongStage` if the quiz has not begun.
    pub fn retry(&self, flow: &mut LessonFlow) -> Result<(), QuizError> {
        flow.quiz_mut()?.retry(self.clock.now());
        Ok(())
    }

    /// Report a finished quiz to the progress store and close the flow.
    ///
    /// A failed report is logged and leaves `update` empty.
    ///
    /// # Errors
    ///
    /// Returns `IncompleteLesson` with the untouched flow when the quiz has not
    /// begun (`WrongStage`) or its summary is not visible yet (`NotFinished`).
    pub async fn complete(&self, flow: LessonFlow) -> Result<CompletedLesson, IncompleteLesson> {
        let summary = match flow.quiz().map(QuizSession::summary) {
            Ok(Some(summary)) => summary,
            Ok(None) => {
                return Err(IncompleteLesson {
                    flow,
                    reason: QuizError::NotFinished,
                });
            }
            Err(reason) => return Err(IncompleteLesson { flow, reason }),
        };
        let (lesson, _quiz) = flow.into_parts();

        let update = match self
            .progress
            .record_attempt(lesson.id().clone(), summary.score(), summary.total())
            .await
        {
            Ok(update) => Some(update),
            Err(err) => {
                log::warn!("failed to report progress for {}: {err}", lesson.id());
                None
            }
        };

        Ok(CompletedLesson {
            lesson,
            summary,
            update,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use fraction_core::model::{Catalog, LessonDraft};
    use fraction_core::time::fixed_clock;
    use storage::{InMemoryRepository, builtin_catalog};

    use crate::quiz::FlowStage;

    fn service() -> QuizLoopService {
        let repo = Arc::new(InMemoryRepository::new(builtin_catalog().unwrap()));
        QuizLoopService::new(
            fixed_clock(),
            CatalogService::new(repo.clone()),
            ProgressService::new(repo),
        )
    }

    #[tokio::test]
    async fn unknown_lesson_never_starts() {
        let err = service().start(&LessonId::new("nope")).await.unwrap_err();
        assert!(matches!(err, QuizError::Catalog(_)));
    }

    #[tokio::test]
    async fn early_complete_hands_back_a_resumable_flow() {
        let svc = service();
        let mut flow = svc.start(&LessonId::new("lesson-1")).await.unwrap();
        flow.begin_tutorial().unwrap();
        flow.begin_quiz().unwrap();
        let quiz = flow.quiz_mut().unwrap();
        let answer = quiz.current_question().correct_answer().to_string();
        quiz.select_answer(&answer).unwrap();
        quiz.submit_answer().unwrap();

        let err = svc.complete(flow).await.unwrap_err();
        assert!(matches!(err.reason, QuizError::NotFinished));
        let mut flow = err.into_flow();
        let quiz = flow.quiz().unwrap();
        assert_eq!(quiz.score(), 1);
        assert_eq!(quiz.answers(), [true]);
        assert!(quiz.is_revealed());

        assert_eq!(
            svc.advance(&mut flow).unwrap(),
            Advance::Next { index: 1 }
        );
        let progress = svc.progress.user_progress().await.unwrap();
        assert!(progress.lesson_progress.is_empty());
    }

    #[tokio::test]
    async fn complete_before_quiz_stage_keeps_the_flow() {
        let svc = service();
        let flow = svc.start(&LessonId::new("lesson-3")).await.unwrap();

        let err = svc.complete(flow).await.unwrap_err();
        assert!(matches!(err.reason, QuizError::WrongStage { .. }));
        assert_eq!(err.into_flow().stage(), FlowStage::Intro);
    }

    #[tokio::test]
    async fn lesson_without_questions_never_starts() {
        let lesson = LessonDraft {
            id: LessonId::new("lesson-empty"),
            title: "Coming Soon".into(),
            description: String::new(),
            why_it_matters: String::new(),
            real_world_examples: Vec::new(),
            order: 1,
        }
        .validate()
        .unwrap();
        let repo = Arc::new(InMemoryRepository::new(
            Catalog::new(vec![lesson], Vec::new()).unwrap(),
        ));
        let svc = QuizLoopService::new(
            fixed_clock(),
            CatalogService::new(repo.clone()),
            ProgressService::new(repo),
        );

        let err = svc.start(&LessonId::new("lesson-empty")).await.unwrap_err();
        assert!(matches!(err, QuizError::Empty));
    }

    #[tokio::test]
    async fn advance_outside_quiz_stage_is_rejected() {
        let svc = service();
        let mut flow = svc.start(&LessonId::new("lesson-2")).await.unwrap();
        assert!(matches!(
            svc.advance(&mut flow).unwrap_err(),
            QuizError::WrongStage { .. }
        ));
    }
}
