//! Deterministic worksheet page generation.
//!
//! Given the same (operation, age group, difficulty, page), this module
//! always produces the same problems with the same answers. The client
//! renders from it and the server-side validator regenerates from the
//! same seed to grade submissions, so the two never disagree.

use serde::{Deserialize, Serialize};

use learnstep_core::assessment::seeded_rng;
use learnstep_core::model::{AgeGroup, Difficulty, Problem, Subject};

use crate::math;

/// Pages per difficulty band within an operation's 150-page run.
pub const PAGES_PER_DIFFICULTY: u32 = 50;

/// A generated worksheet page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorksheetPage {
    pub problems: Vec<Problem>,
    pub name: String,
    pub description: String,
}

/// Generate the problems for one page of a math operation. Returns `None`
/// when no generator is registered for the cell (including all of
/// `Subject::English`, which has no numbered worksheet pages).
pub fn page_problems(
    subject: Subject,
    age_group: AgeGroup,
    difficulty: Difficulty,
    page: u32,
) -> Option<WorksheetPage> {
    let config = math::config_for(subject, age_group, difficulty)?;
    let mut rng = seeded_rng(&format!("{subject}-{age_group}-{difficulty}-{page}"));

    let problems = (0..config.problem_count)
        .map(|_| config.generate(&mut rng))
        .collect();

    Some(WorksheetPage {
        problems,
        name: config.name.to_string(),
        description: config.description.to_string(),
    })
}

/// A page resolved from an absolute page number 1–150.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbsolutePage {
    pub page: WorksheetPage,
    pub difficulty: Difficulty,
    /// Page number within the difficulty band, 1–50.
    pub relative_page: u32,
}

/// Map an absolute page number onto its difficulty band (1–50 easy,
/// 51–100 medium, 101–150 hard) and generate it.
pub fn absolute_page_problems(
    subject: Subject,
    age_group: AgeGroup,
    absolute_page: u32,
) -> Option<AbsolutePage> {
    let (difficulty, relative_page) = if absolute_page <= PAGES_PER_DIFFICULTY {
        (Difficulty::Easy, absolute_page)
    } else if absolute_page <= 2 * PAGES_PER_DIFFICULTY {
        (Difficulty::Medium, absolute_page - PAGES_PER_DIFFICULTY)
    } else {
        (Difficulty::Hard, absolute_page - 2 * PAGES_PER_DIFFICULTY)
    };

    let page = page_problems(subject, age_group, difficulty, relative_page)?;
    Some(AbsolutePage {
        page,
        difficulty,
        relative_page,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_are_deterministic() {
        let a = page_problems(Subject::Addition, AgeGroup::Six, Difficulty::Easy, 7).unwrap();
        let b = page_problems(Subject::Addition, AgeGroup::Six, Difficulty::Easy, 7).unwrap();
        assert_eq!(a.problems, b.problems);
    }

    #[test]
    fn different_pages_differ() {
        let a = page_problems(Subject::Addition, AgeGroup::Six, Difficulty::Easy, 1).unwrap();
        let b = page_problems(Subject::Addition, AgeGroup::Six, Difficulty::Easy, 2).unwrap();
        assert_ne!(a.problems, b.problems);
    }

    #[test]
    fn pages_have_twenty_problems() {
        let page = page_problems(Subject::Division, AgeGroup::Eight, Difficulty::Hard, 3).unwrap();
        assert_eq!(page.problems.len(), math::PROBLEMS_PER_PAGE);
        assert_eq!(page.name, "Age 8 - Hard Division");
    }

    #[test]
    fn absolute_page_banding() {
        let easy = absolute_page_problems(Subject::Subtraction, AgeGroup::Seven, 50).unwrap();
        assert_eq!(easy.difficulty, Difficulty::Easy);
        assert_eq!(easy.relative_page, 50);

        let medium = absolute_page_problems(Subject::Subtraction, AgeGroup::Seven, 51).unwrap();
        assert_eq!(medium.difficulty, Difficulty::Medium);
        assert_eq!(medium.relative_page, 1);

        let hard = absolute_page_problems(Subject::Subtraction, AgeGroup::Seven, 150).unwrap();
        assert_eq!(hard.difficulty, Difficulty::Hard);
        assert_eq!(hard.relative_page, 50);
    }

    #[test]
    fn english_has_no_worksheet_pages() {
        assert!(page_problems(Subject::English, AgeGroup::Six, Difficulty::Easy, 1).is_none());
    }
}
