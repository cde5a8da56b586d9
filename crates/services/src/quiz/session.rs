use chrono::{DateTime, Utc};
use std::fmt;

use fraction_core::model::{LessonId, Question, QuestionId};
use fraction_core::walkthrough::Walkthrough;

use super::progress::QuizProgress;
use super::summary::QuizSummary;
use crate::error::QuizError;

//
// ─── FEEDBACK ──────────────────────────────────────────────────────────────────
//

/// What the learner sees right after checking an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub question_id: QuestionId,
    pub selected: String,
    pub correct_answer: String,
    pub is_correct: bool,
    pub is_last: bool,
}

/// Result of moving past an answered question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Now showing the question at this zero-based index.
    Next { index: usize },
    /// The last question was answered; the summary is visible.
    Finished,
}

/// How an answer option should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionMark {
    Plain,
    Selected,
    Correct,
    Wrong,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Question-by-question state of one quiz run.
///
/// Each question cycles `unanswered → answered`: an answer is selected (and may be
/// changed), then checked once, then the learner advances. After the last
/// question the summary becomes visible.
pub struct QuizSession {
    lesson_id: LessonId,
    questions: Vec<Question>,
    current: usize,
    selected: Option<String>,
    revealed: bool,
    hint_visible: bool,
    score: u32,
    answers: Vec<bool>,
    started_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    /// Start a run over `questions`, presented in the order given.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Empty` if there are no questions.
    pub fn new(
        lesson_id: LessonId,
        questions: Vec<Question>,
        started_at: DateTime<Utc>,
    ) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::Empty);
        }

        Ok(Self {
            lesson_id,
            questions,
            current: 0,
            selected: None,
            revealed: false,
            hint_visible: false,
            score: 0,
            answers: Vec::new(),
            started_at,
            finished_at: None,
        })
    }

    #[must_use]
    pub fn lesson_id(&self) -> &LessonId {
        &self.lesson_id
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The question on screen.
    #[must_use]
    pub fn current_question(&self) -> &Question {
        // non-empty by construction and `current` never passes the last index
        &self.questions[self.current]
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        self.current + 1 == self.questions.len()
    }

    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    #[must_use]
    pub fn is_hint_visible(&self) -> bool {
        self.hint_visible
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Correctness of every checked answer so far, in question order.
    #[must_use]
    pub fn answers(&self) -> &[bool] {
        &self.answers
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// True once the summary is visible.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished_at.is_some()
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        QuizProgress {
            current: self.current + 1,
            total: self.questions.len(),
            answered: self.answers.len(),
            is_finished: self.is_finished(),
        }
    }

    /// Scratch-pad steps for the current question.
    #[must_use]
    pub fn walkthrough(&self) -> Walkthrough {
        Walkthrough::for_question(self.current_question().prompt())
    }

    /// Each option of the current question with its display mark.
    #[must_use]
    pub fn option_marks(&self) -> Vec<(&str, OptionMark)> {
        let question = self.current_question();
        question
            .options()
            .iter()
            .map(|option| {
                let is_selected = self.selected.as_deref() == Some(option.as_str());
                let mark = if !self.revealed {
                    if is_selected {
                        OptionMark::Selected
                    } else {
                        OptionMark::Plain
                    }
                } else if question.is_correct(option) {
                    OptionMark::Correct
                } else if is_selected {
                    OptionMark::Wrong
                } else {
                    OptionMark::Plain
                };
                (option.as_str(), mark)
            })
            .collect()
    }

    /// Select an option of the current question without checking it.
    ///
    /// Returns `Ok(false)` and changes nothing once the answer is revealed.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::UnknownOption` if `option` is not offered by the question.
    pub fn select_answer(&mut self, option: &str) -> Result<bool, QuizError> {
        if self.revealed {
            return Ok(false);
        }
        if !self.current_question().has_option(option) {
            return Err(QuizError::UnknownOption {
                option: option.to_string(),
            });
        }
        self.selected = Some(option.to_string());
        Ok(true)
    }

    /// Show or hide the hint. Hints exist only before the answer is revealed and
    /// only for questions that carry one. Returns whether the hint is now visible.
    pub fn toggle_hint(&mut self) -> bool {
        if self.revealed || self.current_question().hint().is_none() {
            return false;
        }
        self.hint_visible = !self.hint_visible;
        self.hint_visible
    }

    /// The hint text, when it is visible.
    #[must_use]
    pub fn visible_hint(&self) -> Option<&str> {
        if self.hint_visible {
            self.current_question().hint()
        } else {
            None
        }
    }

    /// Check the selected answer and lock it in.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::AlreadyAnswered` if the current question was checked,
    /// or `QuizError::NoSelection` if nothing is selected. Neither changes state.
    pub fn submit_answer(&mut self) -> Result<AnswerFeedback, QuizError> {
        if self.revealed {
            return Err(QuizError::AlreadyAnswered);
        }
        let Some(selected) = self.selected.clone() else {
            return Err(QuizError::NoSelection);
        };

        let question = self.current_question();
        let is_correct = question.is_correct(&selected);
        let feedback = AnswerFeedback {
            question_id: question.id().clone(),
            correct_answer: question.correct_answer().to_string(),
            selected,
            is_correct,
            is_last: self.is_last_question(),
        };

        self.revealed = true;
        self.answers.push(is_correct);
        if is_correct {
            self.score += 1;
        }

        Ok(feedback)
    }

    /// Move to the next question, or show the summary after the last one.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Finished` if the summary is already visible, or
    /// `QuizError::NotAnswered` if the current question was not checked.
    pub fn advance(&mut self, now: DateTime<Utc>) -> Result<Advance, QuizError> {
        if self.is_finished() {
            return Err(QuizError::Finished);
        }
        if !self.revealed {
            return Err(QuizError::NotAnswered);
        }

        if self.is_last_question() {
            self.finished_at = Some(now);
            return Ok(Advance::Finished);
        }

        self.current += 1;
        self.clear_question_state();
        Ok(Advance::Next {
            index: self.current,
        })
    }

    /// Start over from the first question with a clean score.
    pub fn retry(&mut self, now: DateTime<Utc>) {
        self.current = 0;
        self.score = 0;
        self.answers.clear();
        self.clear_question_state();
        self.started_at = now;
        self.finished_at = None;
    }

    /// The summary, once visible.
    #[must_use]
    pub fn summary(&self) -> Option<QuizSummary> {
        let finished_at = self.finished_at?;
        let total = u32::try_from(self.questions.len()).unwrap_or(u32::MAX);
        Some(QuizSummary::new(
            self.lesson_id.clone(),
            self.score,
            total,
            self.answers.clone(),
            self.started_at,
            finished_at,
        ))
    }

    fn clear_question_state(&mut self) {
        self.selected = None;
        self.revealed = false;
        self.hint_visible = false;
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("lesson_id", &self.lesson_id)
            .field("questions_len", &self.questions.len())
            .field("current", &self.current)
            .field("selected", &self.selected)
            .field("revealed", &self.revealed)
            .field("score", &self.score)
            .field("answers", &self.answers)
            .field("finished_at", &self.finished_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
