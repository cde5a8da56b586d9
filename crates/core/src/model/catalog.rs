use std::collections::HashSet;

use thiserror::Error;

use crate::model::ids::{LessonId, QuestionId};
use crate::model::{Lesson, Question};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("duplicate lesson id: {0}")]
    DuplicateLesson(LessonId),

    #[error("duplicate question id: {0}")]
    DuplicateQuestion(QuestionId),

    #[error("question {question} references unknown lesson {lesson}")]
    UnknownLesson {
        question: QuestionId,
        lesson: LessonId,
    },
}

/// Read-only set of lessons and their questions.
///
/// Built once at startup; the constructor enforces that ids are unique and that
/// every question belongs to a lesson in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    lessons: Vec<Lesson>,
    questions: Vec<Question>,
}

impl Catalog {
    /// Build a catalog, sorting lessons and questions by their `order`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` on duplicate ids or dangling lesson references.
    pub fn new(mut lessons: Vec<Lesson>, mut questions: Vec<Question>) -> Result<Self, CatalogError> {
        let mut lesson_ids = HashSet::with_capacity(lessons.len());
        for lesson in &lessons {
            if !lesson_ids.insert(lesson.id().clone()) {
                return Err(CatalogError::DuplicateLesson(lesson.id().clone()));
            }
        }

        let mut question_ids = HashSet::with_capacity(questions.len());
        for question in &questions {
            if !question_ids.insert(question.id().clone()) {
                return Err(CatalogError::DuplicateQuestion(question.id().clone()));
            }
            if !lesson_ids.contains(question.lesson_id()) {
                return Err(CatalogError::UnknownLesson {
                    question: question.id().clone(),
                    lesson: question.lesson_id().clone(),
                });
            }
        }

        // stable: authoring order breaks ties
        lessons.sort_by_key(Lesson::order);
        questions.sort_by_key(Question::order);

        Ok(Self { lessons, questions })
    }

    #[must_use]
    pub fn empty() -> Self {
        Self {
            lessons: Vec::new(),
            questions: Vec::new(),
        }
    }

    /// All lessons, ascending by `order`.
    #[must_use]
    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    #[must_use]
    pub fn lesson(&self, id: &LessonId) -> Option<&Lesson> {
        self.lessons.iter().find(|lesson| lesson.id() == id)
    }

    /// Questions of one lesson, ascending by `order`. Empty for unknown lessons.
    pub fn questions_for<'a>(&'a self, lesson_id: &'a LessonId) -> impl Iterator<Item = &'a Question> + 'a {
        self.questions
            .iter()
            .filter(move |question| question.lesson_id() == lesson_id)
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LessonDraft, QuestionDraft};

    fn lesson(id: &str, order: u32) -> Lesson {
        LessonDraft {
            id: LessonId::new(id),
            title: format!("Lesson {id}"),
            description: String::new(),
            why_it_matters: String::new(),
            real_world_examples: Vec::new(),
            order,
        }
        .validate()
        .unwrap()
    }

    fn question(id: &str, lesson_id: &str, order: u32) -> Question {
        QuestionDraft::multiple_choice(id, lesson_id, "1/2?", &["a", "b"], "a", order)
            .validate()
            .unwrap()
    }

    #[test]
    fn sorts_lessons_and_questions_by_order() {
        let catalog = Catalog::new(
            vec![lesson("b", 2), lesson("a", 1)],
            vec![question("q3", "a", 3), question("q1", "a", 1), question("x", "b", 1)],
        )
        .unwrap();

        let ids: Vec<_> = catalog.lessons().iter().map(|l| l.id().as_str()).collect();
        assert_eq!(ids, ["a", "b"]);

        let a = LessonId::new("a");
        let qs: Vec<_> = catalog.questions_for(&a).map(|q| q.id().as_str()).collect();
        assert_eq!(qs, ["q1", "q3"]);
    }

    #[test]
    fn unknown_lesson_has_no_questions() {
        let catalog = Catalog::new(vec![lesson("a", 1)], vec![question("q1", "a", 1)]).unwrap();
        let missing = LessonId::new("nope");
        assert_eq!(catalog.questions_for(&missing).count(), 0);
        assert!(catalog.lesson(&missing).is_none());
    }

    #[test]
    fn rejects_dangling_and_duplicate_ids() {
        let err = Catalog::new(vec![lesson("a", 1)], vec![question("q1", "zzz", 1)]).unwrap_err();
        assert!(matches!(err, CatalogError::UnknownLesson { .. }));

        let err = Catalog::new(vec![lesson("a", 1), lesson("a", 2)], Vec::new()).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateLesson(LessonId::new("a")));

        let err = Catalog::new(
            vec![lesson("a", 1)],
            vec![question("q1", "a", 1), question("q1", "a", 2)],
        )
        .unwrap_err();
        assert_eq!(err, CatalogError::DuplicateQuestion(QuestionId::new("q1")));
    }
}
