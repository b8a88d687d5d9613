//! Answer grading and score-band level assignment.
//!
//! Grading is pure and deterministic: the same answer set always produces
//! the same percentage and feedback. The only randomness in the assessment
//! pipeline lives in question generation.

use serde::{Deserialize, Serialize};

use crate::levels;
use crate::model::{
    AgeGroup, Answer, AssessmentQuestion, Difficulty, ExpectedAnswer, Level, QuestionFeedback,
};

/// Score-band thresholds, percentages with inclusive middle-band
/// boundaries: `score < remediate_below` remediates, `score >
/// stretch_above` stretches, everything between stays on-level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBands {
    pub remediate_below: u8,
    pub stretch_above: u8,
}

impl Default for ScoreBands {
    fn default() -> Self {
        Self {
            remediate_below: 30,
            stretch_above: 75,
        }
    }
}

/// The result of grading one answer set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub correct_count: u32,
    pub total: u32,
    /// Rounded percentage 0–100. Zero for an empty question list.
    pub percentage: u8,
    pub feedback: Vec<QuestionFeedback>,
}

/// A level assignment derived from a score band.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelAssignment {
    pub level: Level,
    pub age_group: AgeGroup,
    pub difficulty: Difficulty,
    /// Human-readable description of which band fired.
    pub reason: String,
}

/// Compare a submitted answer against the expected one.
///
/// Numeric answers compare after float coercion; string answers (remainder
/// and fraction forms, English words) compare case-insensitively with all
/// whitespace stripped, so "3 R2" and "3r2" grade the same. Blank input is
/// always incorrect, never an error.
pub fn answers_match(answer: &Answer, expected: &ExpectedAnswer) -> bool {
    match expected {
        ExpectedAnswer::Number(want) => match answer {
            Answer::Number(got) => got == want,
            _ => false,
        },
        ExpectedAnswer::Text(want) => match answer.as_text() {
            Some(got) => normalize(&got) == normalize(want),
            None => false,
        },
    }
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Grade a completed answer set. Answers beyond the question count are
/// ignored; questions without a matching answer grade as blank.
pub fn grade(questions: &[AssessmentQuestion], answers: &[Answer]) -> ScoreSummary {
    let mut correct_count = 0u32;
    let mut feedback = Vec::with_capacity(questions.len());

    for (i, question) in questions.iter().enumerate() {
        // A question with no matching answer grades as blank.
        let correct = answers
            .get(i)
            .is_some_and(|answer| answers_match(answer, &question.expected));
        if correct {
            correct_count += 1;
        }
        feedback.push(QuestionFeedback {
            correct,
            expected: question.expected.clone(),
        });
    }

    let total = questions.len() as u32;
    ScoreSummary {
        correct_count,
        total,
        percentage: percentage(correct_count, total),
        feedback,
    }
}

/// Rounded percentage; zero when there were no questions (degenerate
/// input must not divide by zero).
pub fn percentage(correct: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    (f64::from(correct) / f64::from(total) * 100.0).round() as u8
}

/// Apply the score-band policy: below the remediation threshold the child
/// gets the adjacent younger group at easy; above the stretch threshold
/// the adjacent older group at medium; otherwise their own group at
/// medium. Both boundaries belong to the middle band.
pub fn assign_level(score: u8, age_group: AgeGroup, bands: &ScoreBands) -> LevelAssignment {
    let (target_age, target_difficulty, reason) = if score < bands.remediate_below {
        (
            age_group.younger(),
            Difficulty::Easy,
            format!(
                "Score below {}% - assigned easier content for building foundation",
                bands.remediate_below
            ),
        )
    } else if score <= bands.stretch_above {
        (
            age_group,
            Difficulty::Medium,
            format!(
                "Score {}-{}% - assigned age-appropriate content",
                bands.remediate_below, bands.stretch_above
            ),
        )
    } else {
        (
            age_group.older(),
            Difficulty::Medium,
            format!(
                "Score above {}% - assigned advanced content for challenge",
                bands.stretch_above
            ),
        )
    };

    LevelAssignment {
        level: levels::level_for(target_age, target_difficulty),
        age_group: target_age,
        difficulty: target_difficulty,
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Subject, Tier};

    fn question(expected: ExpectedAnswer) -> AssessmentQuestion {
        AssessmentQuestion {
            subject: Subject::Addition,
            prompt: "3 + 4 =".into(),
            expected,
            source_age: AgeGroup::Seven,
            source_difficulty: Difficulty::Medium,
            tier: Tier::CurrentMedium,
        }
    }

    #[test]
    fn numeric_matching() {
        let expected = ExpectedAnswer::Number(7.0);
        assert!(answers_match(&Answer::parse("7"), &expected));
        assert!(answers_match(&Answer::parse(" 7 "), &expected));
        assert!(!answers_match(&Answer::parse("8"), &expected));
        assert!(!answers_match(&Answer::parse("seven"), &expected));
        assert!(!answers_match(&Answer::Blank, &expected));
    }

    #[test]
    fn decimal_matching() {
        let expected = ExpectedAnswer::Number(7.5);
        assert!(answers_match(&Answer::parse("7.5"), &expected));
        assert!(!answers_match(&Answer::parse("7.50001"), &expected));
    }

    #[test]
    fn text_matching_ignores_case_and_spacing() {
        let expected = ExpectedAnswer::Text("3 R2".into());
        assert!(answers_match(&Answer::parse("3 R2"), &expected));
        assert!(answers_match(&Answer::parse("3r2"), &expected));
        assert!(answers_match(&Answer::parse("3 r 2"), &expected));
        assert!(!answers_match(&Answer::parse("3 R3"), &expected));

        let word = ExpectedAnswer::Text("Cat".into());
        assert!(answers_match(&Answer::parse("cat"), &word));
        assert!(!answers_match(&Answer::Blank, &word));
    }

    #[test]
    fn grading_counts_and_percentage() {
        let questions: Vec<_> = (0..4)
            .map(|i| question(ExpectedAnswer::Number(f64::from(i))))
            .collect();
        let answers = vec![
            Answer::parse("0"),
            Answer::parse("1"),
            Answer::parse("99"),
            Answer::Blank,
        ];
        let summary = grade(&questions, &answers);
        assert_eq!(summary.correct_count, 2);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.percentage, 50);
        assert_eq!(summary.feedback.len(), 4);
        assert!(summary.feedback[0].correct);
        assert!(!summary.feedback[3].correct);
    }

    #[test]
    fn grading_short_answer_list_treats_missing_as_blank() {
        let questions: Vec<_> = (0..3)
            .map(|_| question(ExpectedAnswer::Number(1.0)))
            .collect();
        let summary = grade(&questions, &[Answer::parse("1")]);
        assert_eq!(summary.correct_count, 1);
        assert_eq!(summary.total, 3);
    }

    #[test]
    fn empty_question_list_scores_zero() {
        let summary = grade(&[], &[]);
        assert_eq!(summary.percentage, 0);
        assert_eq!(summary.total, 0);
    }

    #[test]
    fn grading_is_idempotent() {
        let questions: Vec<_> = (0..5)
            .map(|i| question(ExpectedAnswer::Number(f64::from(i))))
            .collect();
        let answers: Vec<_> = (0..5).map(|i| Answer::parse(&i.to_string())).collect();
        let first = grade(&questions, &answers);
        let second = grade(&questions, &answers);
        assert_eq!(first.percentage, second.percentage);
        assert_eq!(first.correct_count, second.correct_count);
    }

    #[test]
    fn band_boundaries() {
        let bands = ScoreBands::default();
        let age = AgeGroup::Seven;

        let low = assign_level(29, age, &bands);
        assert_eq!(low.age_group, AgeGroup::Six);
        assert_eq!(low.difficulty, Difficulty::Easy);
        assert_eq!(low.level.get(), 3);

        let lower_edge = assign_level(30, age, &bands);
        assert_eq!(lower_edge.age_group, AgeGroup::Seven);
        assert_eq!(lower_edge.difficulty, Difficulty::Medium);
        assert_eq!(lower_edge.level.get(), 6);

        let upper_edge = assign_level(75, age, &bands);
        assert_eq!(upper_edge.age_group, AgeGroup::Seven);
        assert_eq!(upper_edge.level.get(), 6);

        let high = assign_level(76, age, &bands);
        assert_eq!(high.age_group, AgeGroup::Eight);
        assert_eq!(high.difficulty, Difficulty::Medium);
        assert_eq!(high.level.get(), 8);
    }

    #[test]
    fn bands_saturate_at_age_extremes() {
        let bands = ScoreBands::default();

        let youngest = assign_level(10, AgeGroup::FourToFive, &bands);
        assert_eq!(youngest.age_group, AgeGroup::FourToFive);
        assert_eq!(youngest.level.get(), 1);

        let oldest = assign_level(90, AgeGroup::TenPlus, &bands);
        assert_eq!(oldest.age_group, AgeGroup::TenPlus);
        assert_eq!(oldest.level.get(), 12);
    }

    #[test]
    fn reasons_name_the_band() {
        let bands = ScoreBands::default();
        assert!(assign_level(20, AgeGroup::Six, &bands)
            .reason
            .contains("below 30%"));
        assert!(assign_level(50, AgeGroup::Six, &bands)
            .reason
            .contains("30-75%"));
        assert!(assign_level(80, AgeGroup::Six, &bands)
            .reason
            .contains("above 75%"));
    }

    #[test]
    fn example_scenario_fifteen_of_twenty() {
        // 15/20 correct => 75% => middle band => own age at medium.
        let pct = percentage(15, 20);
        assert_eq!(pct, 75);
        let result = assign_level(pct, AgeGroup::Seven, &ScoreBands::default());
        assert_eq!(result.age_group, AgeGroup::Seven);
        assert_eq!(result.difficulty, Difficulty::Medium);
        assert_eq!(
            result.level,
            levels::level_for(AgeGroup::Seven, Difficulty::Medium)
        );
    }
}
