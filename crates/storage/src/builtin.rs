//! Lessons and questions shipped with the application.

use fraction_core::model::{
    Catalog, Lesson, LessonDraft, LessonId, Question, QuestionDraft,
    RealWorldExample, VisualType,
};
use fraction_core::Error;

/// Build the built-in catalog.
///
/// # Errors
///
/// Returns `fraction_core::Error` if any authored lesson or question fails validation.
pub fn builtin_catalog() -> Result<Catalog, Error> {
    let lessons = lessons()?;
    let questions = questions()?;
    Ok(Catalog::new(lessons, questions)?)
}

fn lesson(
    id: &str,
    title: &str,
    description: &str,
    why_it_matters: &str,
    examples: [(&str, &str); 3],
    order: u32,
) -> LessonDraft {
    LessonDraft {
        id: LessonId::new(id),
        title: title.to_string(),
        description: description.to_string(),
        why_it_matters: why_it_matters.to_string(),
        real_world_examples: examples
            .iter()
            .map(|(icon, text)| RealWorldExample::new(*icon, *text))
            .collect(),
        order,
    }
}

fn lessons() -> Result<Vec<Lesson>, Error> {
    let drafts = [
        lesson(
            "lesson-1",
            "What Are Fractions?",
            "Learn the basics of fractions - what they mean and how to read them!",
            "Fractions are everywhere in your daily life! When you share a pizza with friends, measure ingredients for a recipe, or tell time, you're using fractions. Understanding fractions helps you be fair when sharing and makes math a lot easier!",
            [
                ("pizza", "Sharing pizza equally with friends"),
                ("ruler", "Measuring half a cup for a recipe"),
                ("users", "Splitting treats fairly with siblings"),
            ],
            1,
        ),
        lesson(
            "lesson-2",
            "Division Made Easy!",
            "Learn how to divide things into equal groups - it's like sharing!",
            "Division helps you share things fairly! When you split candy with friends, divide toys into groups, or figure out how many pieces everyone gets, you're using division. It's one of the most useful math skills you'll ever learn!",
            [
                ("users", "Sharing 12 cookies among 4 friends equally"),
                ("pizza", "Cutting a pizza into equal slices for everyone"),
                ("ruler", "Splitting your allowance into savings and spending"),
            ],
            2,
        ),
        lesson(
            "lesson-3",
            "Decimals & Division",
            "Discover how decimals and division work together in everyday life!",
            "Decimals are everywhere - from money to measurements! When you calculate how much each person owes at a restaurant, or divide something that doesn't split evenly, decimals help you get the exact answer. They're super useful for real-life math!",
            [
                ("ruler", "Measuring 2.5 meters of ribbon for a craft project"),
                ("pizza", "Splitting a $15 pizza bill among 4 friends ($3.75 each)"),
                ("users", "Dividing 10 treats among 4 pets (2.5 each)"),
            ],
            3,
        ),
    ];

    drafts
        .into_iter()
        .map(|draft| draft.validate().map_err(Error::from))
        .collect()
}

fn questions() -> Result<Vec<Question>, Error> {
    let drafts = vec![
        // lesson 1: reading fractions
        QuestionDraft::multiple_choice(
            "q1",
            "lesson-1",
            "Look at the pizza! What fraction of it is colored?",
            &["1/2", "3/4", "2/4", "1/4"],
            "3/4",
            1,
        )
        .with_visual(VisualType::Pizza, 3, 4)
        .with_hint("Count how many slices are colored, then count the total number of slices!"),
        QuestionDraft::multiple_choice(
            "q2",
            "lesson-1",
            "How much of this chocolate bar is left?",
            &["2/5", "3/5", "1/5", "4/5"],
            "2/5",
            2,
        )
        .with_visual(VisualType::Bar, 2, 5)
        .with_hint("The colored pieces show what's left. Count them and the total!"),
        QuestionDraft::multiple_choice(
            "q3",
            "lesson-1",
            "If you have 8 apples and give away 2, what fraction did you give away?",
            &["2/8", "6/8", "2/6", "8/2"],
            "2/8",
            3,
        )
        .with_hint("The top number (numerator) is what you gave away. The bottom number (denominator) is how many you started with!"),
        QuestionDraft::multiple_choice(
            "q4",
            "lesson-1",
            "What fraction of these circles is colored?",
            &["1/2", "1/3", "2/3", "3/3"],
            "1/3",
            4,
        )
        .with_visual(VisualType::Circles, 1, 3)
        .with_hint("One circle is colored out of three total circles!"),
        QuestionDraft::multiple_choice(
            "q5",
            "lesson-1",
            "In the fraction 3/4, what does the number 4 mean?",
            &[
                "The total number of equal parts",
                "How many parts we have",
                "How many are left over",
                "The answer",
            ],
            "The total number of equal parts",
            5,
        )
        .with_hint("The bottom number (denominator) tells us how many equal pieces something is divided into!"),
        // lesson 2: sharing money
        QuestionDraft::multiple_choice(
            "d1",
            "lesson-2",
            "You have $1.00 in quarters. If you share equally with 4 friends, how much does each person get?",
            &["$0.20", "$0.25", "$0.50", "$1.00"],
            "$0.25",
            1,
        )
        .with_hint("There are 4 quarters in a dollar. If 4 friends share 4 quarters, each gets 1 quarter (25 cents)!"),
        QuestionDraft::multiple_choice(
            "d2",
            "lesson-2",
            "How many quarters make $1.00?",
            &["2 quarters", "4 quarters", "5 quarters", "10 quarters"],
            "4 quarters",
            2,
        )
        .with_hint("Each quarter is worth 25 cents. How many 25s make 100?"),
        QuestionDraft::multiple_choice(
            "d3",
            "lesson-2",
            "You have $2.00 to share equally among 4 friends. How much does each friend get?",
            &["$0.25", "$0.40", "$0.50", "$1.00"],
            "$0.50",
            3,
        )
        .with_hint("$2.00 is 8 quarters. 8 quarters divided by 4 friends = 2 quarters each = 50 cents!"),
        QuestionDraft::multiple_choice(
            "d4",
            "lesson-2",
            "What is $1.00 ÷ 4 written as a decimal?",
            &["$0.14", "$0.25", "$0.40", "$0.50"],
            "$0.25",
            4,
        )
        .with_hint("Think of it as 1.00 divided by 4. Each person gets a quarter of a dollar!"),
        QuestionDraft::multiple_choice(
            "d5",
            "lesson-2",
            "If you have 2 half-dollar coins ($1.00 total) and give one to a friend, what fraction did you give away?",
            &["1/4", "1/2", "3/4", "1/1"],
            "1/2",
            5,
        )
        .with_hint("You had 2 half-dollars and gave away 1. That's 1 out of 2!"),
        // lesson 3: decimals
        QuestionDraft::multiple_choice(
            "dec1",
            "lesson-3",
            "You have $10 and want to split it equally among 4 friends. How much does each person get?",
            &["$2.00", "$2.50", "$3.00", "$2.25"],
            "$2.50",
            1,
        )
        .with_hint("Divide 10 by 4. Think: 4 times what equals 10?"),
        QuestionDraft::multiple_choice(
            "dec2",
            "lesson-3",
            "What is 1 divided by 2 as a decimal?",
            &["0.2", "0.5", "1.2", "2.0"],
            "0.5",
            2,
        )
        .with_hint("Half of 1 is the same as 1 divided by 2!"),
        QuestionDraft::multiple_choice(
            "dec3",
            "lesson-3",
            "If you divide 15 cookies among 6 friends, how many does each person get?",
            &["2.0 cookies", "2.5 cookies", "3.0 cookies", "2.25 cookies"],
            "2.5 cookies",
            3,
        )
        .with_hint("15 divided by 6 equals 2 with 3 left over. Those 3 split into halves!"),
        QuestionDraft::multiple_choice(
            "dec4",
            "lesson-3",
            "What is 3 divided by 4 as a decimal?",
            &["0.25", "0.5", "0.75", "1.25"],
            "0.75",
            4,
        )
        .with_hint("Think of it as 3 quarters. Each quarter is 0.25, so 3 quarters is..."),
        QuestionDraft::multiple_choice(
            "dec5",
            "lesson-3",
            "A 2-meter rope is cut into 4 equal pieces. How long is each piece?",
            &["0.25 meters", "0.4 meters", "0.5 meters", "0.75 meters"],
            "0.5 meters",
            5,
        )
        .with_hint("2 divided by 4 equals... half a meter!"),
    ];

    drafts
        .into_iter()
        .map(|draft| draft.validate().map_err(Error::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_is_valid() {
        let catalog = builtin_catalog().unwrap();
        assert_eq!(catalog.lessons().len(), 3);
        assert_eq!(catalog.question_count(), 15);
    }

    #[test]
    fn every_lesson_has_five_ordered_questions() {
        let catalog = builtin_catalog().unwrap();
        for lesson in catalog.lessons() {
            let orders: Vec<u32> = catalog.questions_for(lesson.id()).map(|q| q.order()).collect();
            assert_eq!(orders, [1, 2, 3, 4, 5], "lesson {}", lesson.id());
        }
    }

    #[test]
    fn every_correct_answer_is_an_option() {
        let catalog = builtin_catalog().unwrap();
        for lesson in catalog.lessons() {
            for question in catalog.questions_for(lesson.id()) {
                assert!(question.has_option(question.correct_answer()));
                assert_eq!(question.lesson_id(), lesson.id());
            }
        }
    }
}
