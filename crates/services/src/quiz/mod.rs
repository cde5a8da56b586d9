mod flow;
mod progress;
mod session;
mod summary;
mod workflow;

// Public API of the quiz subsystem.
pub use crate::error::{IncompleteLesson, QuizError};
pub use flow::{FlowStage, LessonFlow};
pub use progress::QuizProgress;
pub use session::{Advance, AnswerFeedback, OptionMark, QuizSession};
pub use summary::QuizSummary;
pub use workflow::{CompletedLesson, QuizLoopService};
