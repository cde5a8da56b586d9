use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::model::badge::{Badge, SUPER_STAR_THRESHOLD};
use crate::model::ids::{LearnerId, LessonId};

/// The single learner this deployment tracks.
pub const DEFAULT_LEARNER_ID: &str = "user-1";

/// One completed run through a lesson's quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAttempt {
    pub lesson_id: LessonId,
    pub score: u32,
    pub total_questions: u32,
}

impl QuizAttempt {
    #[must_use]
    pub fn new(lesson_id: LessonId, score: u32, total_questions: u32) -> Self {
        Self {
            lesson_id,
            score,
            total_questions,
        }
    }

    #[must_use]
    pub fn is_perfect(&self) -> bool {
        self.score == self.total_questions
    }
}

/// Latest result for one lesson.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonProgress {
    pub lesson_id: LessonId,
    pub completed: bool,
    pub score: u32,
    pub total_questions: u32,
    pub correct_answers: u32,
    pub attempts: u32,
}

/// Lifetime learning record of the learner.
///
/// `lesson_progress` is keyed by lesson and keeps first-completion order; on the
/// wire it is a plain array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
    pub id: LearnerId,
    pub total_correct: u32,
    // Never recomputed; kept for the wire shape.
    pub current_streak: u32,
    pub best_streak: u32,
    pub earned_badges: Vec<Badge>,
    #[serde(with = "lesson_progress_seq")]
    pub lesson_progress: IndexMap<LessonId, LessonProgress>,
}

impl Default for UserProgress {
    fn default() -> Self {
        Self::new(LearnerId::new(DEFAULT_LEARNER_ID))
    }
}

impl UserProgress {
    /// Fresh record: zero counters, streaks at 1, nothing earned.
    #[must_use]
    pub fn new(id: LearnerId) -> Self {
        Self {
            id,
            total_correct: 0,
            current_streak: 1,
            best_streak: 1,
            earned_badges: Vec::new(),
            lesson_progress: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn lesson(&self, lesson_id: &LessonId) -> Option<&LessonProgress> {
        self.lesson_progress.get(lesson_id)
    }

    #[must_use]
    pub fn has_badge(&self, badge: Badge) -> bool {
        self.earned_badges.contains(&badge)
    }

    /// Record a completed attempt and return the badges it newly earned.
    ///
    /// The lesson's entry is replaced, never merged: only `attempts` carries over.
    /// `total_correct` grows by `score` on every call, replays included.
    pub fn record_attempt(&mut self, attempt: &QuizAttempt) -> Vec<Badge> {
        let attempts = self
            .lesson_progress
            .get(&attempt.lesson_id)
            .map_or(1, |previous| previous.attempts.saturating_add(1));

        let entry = LessonProgress {
            lesson_id: attempt.lesson_id.clone(),
            completed: true,
            score: attempt.score,
            total_questions: attempt.total_questions,
            correct_answers: attempt.score,
            attempts,
        };
        // insert keeps the existing position when the key is already present
        self.lesson_progress.insert(attempt.lesson_id.clone(), entry);

        self.total_correct = self.total_correct.saturating_add(attempt.score);

        let mut earned = Vec::new();
        if attempt.is_perfect() && self.award(Badge::PerfectScore) {
            earned.push(Badge::PerfectScore);
        }
        if self.total_correct >= SUPER_STAR_THRESHOLD && self.award(Badge::SuperStar) {
            earned.push(Badge::SuperStar);
        }
        earned
    }

    fn award(&mut self, badge: Badge) -> bool {
        if self.has_badge(badge) {
            return false;
        }
        self.earned_badges.push(badge);
        true
    }
}

mod lesson_progress_seq {
    use indexmap::IndexMap;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::LessonProgress;
    use crate::model::ids::LessonId;

    pub fn serialize<S>(
        map: &IndexMap<LessonId, LessonProgress>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(map.values())
    }

    pub fn deserialize<'de, D>(
        deserializer: D,
    ) -> Result<IndexMap<LessonId, LessonProgress>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let entries = Vec::<LessonProgress>::deserialize(deserializer)?;
        Ok(entries
            .into_iter()
            .map(|entry| (entry.lesson_id.clone(), entry))
            .collect())
    }
}
