//! Worked steps shown on the scratch pad next to a question.

use serde::Serialize;

/// Length of the prompt excerpt used as header when no rule matches.
const EXCERPT_CHARS: usize = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WalkthroughStep {
    pub content: String,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Walkthrough {
    pub equation: String,
    pub steps: Vec<WalkthroughStep>,
}

impl Walkthrough {
    /// Pick the walkthrough matching the wording of a question prompt.
    #[must_use]
    pub fn for_question(prompt: &str) -> Self {
        if prompt.contains("$1.00") && prompt.contains('4') {
            return Self::build(
                "$1.00 ÷ 4 = ?",
                &[
                    ("1.00 ÷ 4", "Set up the division"),
                    ("4 goes into 10 → 2 times", "4 × 2 = 8, which is close to 10"),
                    ("10 - 8 = 2", "Subtract to find remainder"),
                    ("Bring down 0 → 20", "20 left to divide"),
                    ("4 goes into 20 → 5 times", "4 × 5 = 20, perfect!"),
                    ("Answer: $0.25", "Each person gets 25 cents (1 quarter)"),
                ],
            );
        }

        if prompt.contains("$2.00") && prompt.contains('4') {
            return Self::build(
                "$2.00 ÷ 4 = ?",
                &[
                    ("2.00 ÷ 4", "Set up the division"),
                    ("4 goes into 20 → 5 times", "4 × 5 = 20"),
                    ("20 - 20 = 0", "No remainder for the dollars"),
                    ("Bring down 0 → 0", "Nothing left to divide"),
                    ("Answer: $0.50", "Each person gets 50 cents (2 quarters)"),
                ],
            );
        }

        if prompt.contains("quarters") && prompt.contains("$1.00") {
            return Self::build(
                "? × 25¢ = $1.00",
                &[
                    ("25 + 25 = 50", "2 quarters = 50 cents"),
                    ("50 + 25 = 75", "3 quarters = 75 cents"),
                    ("75 + 25 = 100", "4 quarters = 100 cents"),
                    ("Answer: 4 quarters", "4 × 25¢ = $1.00"),
                ],
            );
        }

        if prompt.contains("fraction") || prompt.contains("colored") {
            return Self::build(
                "Count the parts!",
                &[
                    ("Count colored parts", "How many parts are filled in?"),
                    ("Count total parts", "How many parts are there in total?"),
                    ("Write: colored/total", "Put colored on top, total on bottom"),
                ],
            );
        }

        let excerpt: String = prompt.chars().take(EXCERPT_CHARS).collect();
        Self::build(
            &format!("{excerpt}..."),
            &[
                ("Read the problem carefully", "Understand what's being asked"),
                ("Identify the numbers", "Find the important values"),
                ("Choose the operation", "Add, subtract, multiply, or divide?"),
                ("Solve step by step", "Work through it carefully"),
            ],
        )
    }

    fn build(equation: &str, steps: &[(&str, &str)]) -> Self {
        Self {
            equation: equation.to_string(),
            steps: steps
                .iter()
                .map(|(content, explanation)| WalkthroughStep {
                    content: (*content).to_string(),
                    explanation: (*explanation).to_string(),
                })
                .collect(),
        }
    }
}
