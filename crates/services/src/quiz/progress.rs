/// Progress bar state for a running quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizProgress {
    /// 1-based position of the question on screen.
    pub current: usize,
    pub total: usize,
    pub answered: usize,
    pub is_finished: bool,
}

impl QuizProgress {
    /// Filled share of the bar, in whole percent.
    #[must_use]
    pub fn percent(&self) -> u32 {
        let current = u32::try_from(self.current).unwrap_or(u32::MAX);
        let total = u32::try_from(self.total).unwrap_or(u32::MAX);
        fraction_core::grading::percentage(current, total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_tracks_position() {
        let progress = QuizProgress {
            current: 2,
            total: 5,
            answered: 1,
            is_finished: false,
        };
        assert_eq!(progress.percent(), 40);
    }
}
