use std::fmt;

use fraction_core::model::Lesson;

use super::session::QuizSession;
use crate::error::QuizError;

/// Screen a lesson is on before it is completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowStage {
    Intro,
    Tutorial,
    Quiz,
}

impl fmt::Display for FlowStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FlowStage::Intro => "intro",
            FlowStage::Tutorial => "tutorial",
            FlowStage::Quiz => "quiz",
        };
        f.write_str(name)
    }
}

/// A lesson walked through intro, tutorial and quiz.
///
/// Successful completion consumes the flow (see `QuizLoopService::complete`).
#[derive(Debug)]
pub struct LessonFlow {
    lesson: Lesson,
    stage: FlowStage,
    quiz: QuizSession,
}

impl LessonFlow {
    #[must_use]
    pub fn new(lesson: Lesson, quiz: QuizSession) -> Self {
        Self {
            lesson,
            stage: FlowStage::Intro,
            quiz,
        }
    }

    #[must_use]
    pub fn lesson(&self) -> &Lesson {
        &self.lesson
    }

    #[must_use]
    pub fn stage(&self) -> FlowStage {
        self.stage
    }

    /// # Errors
    ///
    /// Returns `QuizError::WrongStage` unless the flow is at the intro.
    pub fn begin_tutorial(&mut self) -> Result<(), QuizError> {
        self.transition(FlowStage::Intro, FlowStage::Tutorial)
    }

    /// # Errors
    ///
    /// Returns `QuizError::WrongStage` unless the flow is at the tutorial.
    pub fn begin_quiz(&mut self) -> Result<(), QuizError> {
        self.transition(FlowStage::Tutorial, FlowStage::Quiz)
    }

    /// The quiz, readable only once it has begun.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::WrongStage` before the quiz stage.
    pub fn quiz(&self) -> Result<&QuizSession, QuizError> {
        self.expect_stage(FlowStage::Quiz)?;
        Ok(&self.quiz)
    }

    /// # Errors
    ///
    /// Returns `QuizError::WrongStage` before the quiz stage.
    pub fn quiz_mut(&mut self) -> Result<&mut QuizSession, QuizError> {
        self.expect_stage(FlowStage::Quiz)?;
        Ok(&mut self.quiz)
    }

    pub(crate) fn into_parts(self) -> (Lesson, QuizSession) {
        (self.lesson, self.quiz)
    }

    fn transition(&mut self, from: FlowStage, to: FlowStage) -> Result<(), QuizError> {
        self.expect_stage(from)?;
        self.stage = to;
        Ok(())
    }

    fn expect_stage(&self, expected: FlowStage) -> Result<(), QuizError> {
        if self.stage == expected {
            Ok(())
        } else {
            Err(QuizError::WrongStage {
                expected,
                actual: self.stage,
            })
        }
    }
}
