use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{LessonId, QuestionId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question id cannot be empty")]
    EmptyId,

    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("question must offer at least one option")]
    NoOptions,

    #[error("correct answer {answer:?} is not one of the options")]
    AnswerNotInOptions { answer: String },

    #[error("fraction denominator must be > 0")]
    ZeroDenominator,

    #[error("visual questions need both a numerator and a denominator")]
    IncompleteVisual,
}

//
// ─── KINDS ─────────────────────────────────────────────────────────────────────
//

/// How the question is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionKind {
    MultipleChoice,
    VisualSelect,
    DragDrop,
}

/// Picture drawn next to a visual question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisualType {
    Pizza,
    Bar,
    Circles,
    Objects,
}

/// The fraction a visual question depicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FractionVisual {
    pub visual_type: VisualType,
    pub numerator: u32,
    pub denominator: u32,
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// Unvalidated question input, as authored in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDraft {
    pub id: QuestionId,
    pub lesson_id: LessonId,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    #[serde(rename = "question")]
    pub prompt: String,
    #[serde(default)]
    pub visual_type: Option<VisualType>,
    #[serde(default)]
    pub numerator: Option<u32>,
    #[serde(default)]
    pub denominator: Option<u32>,
    pub options: Vec<String>,
    pub correct_answer: String,
    #[serde(default)]
    pub hint: Option<String>,
    pub order: u32,
}

impl QuestionDraft {
    /// Convenience constructor for a plain multiple-choice question.
    #[must_use]
    pub fn multiple_choice(
        id: impl Into<String>,
        lesson_id: impl Into<String>,
        prompt: impl Into<String>,
        options: &[&str],
        correct_answer: impl Into<String>,
        order: u32,
    ) -> Self {
        Self {
            id: QuestionId::new(id),
            lesson_id: LessonId::new(lesson_id),
            kind: QuestionKind::MultipleChoice,
            prompt: prompt.into(),
            visual_type: None,
            numerator: None,
            denominator: None,
            options: options.iter().map(|o| (*o).to_string()).collect(),
            correct_answer: correct_answer.into(),
            hint: None,
            order,
        }
    }

    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Turn the draft into a visual-select question showing `numerator/denominator`.
    #[must_use]
    pub fn with_visual(mut self, visual_type: VisualType, numerator: u32, denominator: u32) -> Self {
        self.kind = QuestionKind::VisualSelect;
        self.visual_type = Some(visual_type);
        self.numerator = Some(numerator);
        self.denominator = Some(denominator);
        self
    }

    /// Validate the draft into a `Question`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the id or prompt is blank, there are no options,
    /// the correct answer is not among the options, or the fraction is malformed.
    pub fn validate(self) -> Result<Question, QuestionError> {
        if self.id.is_blank() {
            return Err(QuestionError::EmptyId);
        }
        if self.prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        if self.options.is_empty() {
            return Err(QuestionError::NoOptions);
        }
        if !self.options.iter().any(|o| *o == self.correct_answer) {
            return Err(QuestionError::AnswerNotInOptions {
                answer: self.correct_answer,
            });
        }
        if self.denominator == Some(0) {
            return Err(QuestionError::ZeroDenominator);
        }
        if self.visual_type.is_some() && (self.numerator.is_none() || self.denominator.is_none())
        {
            return Err(QuestionError::IncompleteVisual);
        }

        Ok(Question {
            id: self.id,
            lesson_id: self.lesson_id,
            kind: self.kind,
            prompt: self.prompt,
            visual_type: self.visual_type,
            numerator: self.numerator,
            denominator: self.denominator,
            options: self.options,
            correct_answer: self.correct_answer,
            hint: self.hint,
            order: self.order,
        })
    }
}

/// A quiz question belonging to exactly one lesson.
///
/// Invariant: `correct_answer` is always one of `options`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "QuestionDraft")]
pub struct Question {
    id: QuestionId,
    lesson_id: LessonId,
    #[serde(rename = "type")]
    kind: QuestionKind,
    #[serde(rename = "question")]
    prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    visual_type: Option<VisualType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    numerator: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    denominator: Option<u32>,
    options: Vec<String>,
    correct_answer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    hint: Option<String>,
    order: u32,
}

impl TryFrom<QuestionDraft> for Question {
    type Error = QuestionError;

    fn try_from(draft: QuestionDraft) -> Result<Self, Self::Error> {
        draft.validate()
    }
}

impl Question {
    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn lesson_id(&self) -> &LessonId {
        &self.lesson_id
    }

    #[must_use]
    pub fn kind(&self) -> QuestionKind {
        self.kind
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    #[must_use]
    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    #[must_use]
    pub fn order(&self) -> u32 {
        self.order
    }

    /// The picture to draw, when the question has one.
    #[must_use]
    pub fn visual(&self) -> Option<FractionVisual> {
        match (self.visual_type, self.numerator, self.denominator) {
            (Some(visual_type), Some(numerator), Some(denominator)) => Some(FractionVisual {
                visual_type,
                numerator,
                denominator,
            }),
            _ => None,
        }
    }

    #[must_use]
    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }

    /// Exact string comparison against the correct answer.
    #[must_use]
    pub fn is_correct(&self, answer: &str) -> bool {
        self.correct_answer == answer
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn pizza() -> QuestionDraft {
        QuestionDraft::multiple_choice(
            "q1",
            "lesson-1",
            "What fraction of the pizza is colored?",
            &["1/2", "3/4", "2/4", "1/4"],
            "3/4",
            1,
        )
        .with_visual(VisualType::Pizza, 3, 4)
        .with_hint("Count the slices!")
    }

    #[test]
    fn validates_visual_question() {
        let q = pizza().validate().unwrap();
        assert_eq!(q.kind(), QuestionKind::VisualSelect);
        let visual = q.visual().unwrap();
        assert_eq!(visual.visual_type, VisualType::Pizza);
        assert_eq!((visual.numerator, visual.denominator), (3, 4));
        assert!(q.is_correct("3/4"));
        assert!(!q.is_correct("3/4 "));
    }

    #[test]
    fn rejects_answer_missing_from_options() {
        let mut draft = pizza();
        draft.correct_answer = "4/4".into();
        assert_eq!(
            draft.validate().unwrap_err(),
            QuestionError::AnswerNotInOptions {
                answer: "4/4".into()
            }
        );
    }

    #[test]
    fn rejects_zero_denominator_and_partial_visuals() {
        let mut zero = pizza();
        zero.denominator = Some(0);
        assert_eq!(zero.validate().unwrap_err(), QuestionError::ZeroDenominator);

        let mut partial = pizza();
        partial.numerator = None;
        assert_eq!(partial.validate().unwrap_err(), QuestionError::IncompleteVisual);
    }

    #[test]
    fn rejects_empty_options() {
        let draft = QuestionDraft::multiple_choice("q", "l", "Why?", &[], "", 1);
        assert_eq!(draft.validate().unwrap_err(), QuestionError::NoOptions);
    }

    #[test]
    fn wire_shape_matches_the_api() {
        let q = pizza().validate().unwrap();
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json["type"], "visual-select");
        assert_eq!(json["question"], "What fraction of the pizza is colored?");
        assert_eq!(json["lessonId"], "lesson-1");
        assert_eq!(json["visualType"], "pizza");
        assert_eq!(json["correctAnswer"], "3/4");

        let plain = QuestionDraft::multiple_choice("q2", "lesson-1", "2+2?", &["4"], "4", 2)
            .validate()
            .unwrap();
        let json = serde_json::to_value(&plain).unwrap();
        assert!(json.get("hint").is_none());
        assert!(json.get("visualType").is_none());
        assert_eq!(json["type"], "multiple-choice");
    }

    #[test]
    fn deserializing_rejects_invalid_answers() {
        let json = serde_json::json!({
            "id": "q9",
            "lessonId": "lesson-1",
            "type": "drag-drop",
            "question": "Pick one",
            "options": ["a", "b"],
            "correctAnswer": "c",
            "order": 1
        });
        assert!(serde_json::from_value::<Question>(json).is_err());
    }
}
