//! Classification of a finished quiz run.
//!
//! Grading never changes the stored score; it only decides what the learner is
//! shown afterwards (retry button, cheer message).

use serde::Serialize;

/// Percentage at or above which a run counts as good.
pub const GOOD_THRESHOLD_PERCENT: u32 = 70;

/// Score as a whole percentage, rounded half up. Zero when there were no questions.
#[must_use]
pub fn percentage(score: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let score = u64::from(score);
    let total = u64::from(total);
    let rounded = (score * 200 + total) / (total * 2);
    u32::try_from(rounded).unwrap_or(u32::MAX)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
    Perfect,
    Good,
    NeedsPractice,
}

impl Outcome {
    #[must_use]
    pub fn classify(score: u32, total: u32) -> Self {
        if score == total {
            Outcome::Perfect
        } else if percentage(score, total) >= GOOD_THRESHOLD_PERCENT {
            Outcome::Good
        } else {
            Outcome::NeedsPractice
        }
    }

    /// Retry is offered only below the good threshold.
    #[must_use]
    pub fn allows_retry(self) -> bool {
        matches!(self, Outcome::NeedsPractice)
    }
}

/// Message tier shown on the celebration screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cheer {
    Perfect,
    Fantastic,
    Great,
    GoodTry,
}

impl Cheer {
    #[must_use]
    pub fn for_score(score: u32, total: u32) -> Self {
        let pct = percentage(score, total);
        if score == total {
            Cheer::Perfect
        } else if pct >= 80 {
            Cheer::Fantastic
        } else if pct >= 60 {
            Cheer::Great
        } else {
            Cheer::GoodTry
        }
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Cheer::Perfect => "Perfect Score! You're Amazing!",
            Cheer::Fantastic => "Fantastic Work!",
            Cheer::Great => "Great Job! Keep Learning!",
            Cheer::GoodTry => "Good Try! Practice Makes Perfect!",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_rounds_half_up() {
        assert_eq!(percentage(4, 5), 80);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 8), 13); // 12.5
        assert_eq!(percentage(0, 0), 0);
    }

    #[test]
    fn classifies_around_the_threshold() {
        assert_eq!(Outcome::classify(5, 5), Outcome::Perfect);
        assert_eq!(Outcome::classify(7, 10), Outcome::Good);
        assert_eq!(Outcome::classify(2, 3), Outcome::NeedsPractice);
        assert!(Outcome::classify(1, 5).allows_retry());
        assert!(!Outcome::classify(4, 5).allows_retry());
    }

    #[test]
    fn cheer_tiers() {
        assert_eq!(Cheer::for_score(3, 3), Cheer::Perfect);
        assert_eq!(Cheer::for_score(4, 5), Cheer::Fantastic);
        assert_eq!(Cheer::for_score(3, 5), Cheer::Great);
        assert_eq!(Cheer::for_score(1, 5).message(), "Good Try! Practice Makes Perfect!");
    }
}
