use serde::{Deserialize, Serialize};
use std::fmt;

/// Cumulative correct answers needed for [`Badge::SuperStar`].
pub const SUPER_STAR_THRESHOLD: u32 = 10;

/// Achievements a learner can earn. Serialized by display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Badge {
    /// Every question of one attempt answered correctly.
    #[serde(rename = "Perfect Score")]
    PerfectScore,
    /// At least [`SUPER_STAR_THRESHOLD`] correct answers in total.
    #[serde(rename = "Super Star")]
    SuperStar,
}

impl Badge {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Badge::PerfectScore => "Perfect Score",
            Badge::SuperStar => "Super Star",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Badge::PerfectScore => "Got all answers correct",
            Badge::SuperStar => "Answered 10 questions correctly",
        }
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
