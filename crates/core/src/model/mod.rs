mod badge;
mod catalog;
mod ids;
mod lesson;
mod progress;
mod question;

pub use ids::{LearnerId, LessonId, ParseIdError, QuestionId};

pub use badge::{Badge, SUPER_STAR_THRESHOLD};
pub use catalog::{Catalog, CatalogError};
pub use lesson::{Lesson, LessonDraft, LessonError, RealWorldExample};
pub use progress::{DEFAULT_LEARNER_ID, LessonProgress, QuizAttempt, UserProgress};
pub use question::{
    FractionVisual, Question, QuestionDraft, QuestionError, QuestionKind, VisualType,
};
