//! Diagnostic assessment generation.
//!
//! An assessment pulls a fixed number of questions from four tiers around
//! the child's age group — one step younger at easy, the child's own group
//! at easy and medium, and one step older at easy — then shuffles them so
//! the difficulty mix is not visible in question order.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{RngCore, SeedableRng};

use crate::error::AssessmentError;
use crate::model::{AgeGroup, AssessmentQuestion, Difficulty, Subject, Tier};
use crate::traits::ContentSource;

/// Questions pulled from each tier.
pub const QUESTIONS_PER_TIER: usize = 5;

/// Total questions in a full assessment.
pub const ASSESSMENT_SIZE: usize = 20;

/// What to do when a tier has no registered content generator.
///
/// `Skip` preserves the historical behavior: log, let the tier contribute
/// zero questions, and grade over a smaller denominator. `Fail` treats any
/// missing tier as a configuration error and aborts the assessment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingTierPolicy {
    #[default]
    Skip,
    Fail,
}

/// The four tier pulls for an age group, in fixed pre-shuffle order.
pub fn tier_plan(age_group: AgeGroup) -> [(Tier, AgeGroup, Difficulty); 4] {
    [
        (Tier::YoungerEasy, age_group.younger(), Difficulty::Easy),
        (Tier::CurrentEasy, age_group, Difficulty::Easy),
        (Tier::CurrentMedium, age_group, Difficulty::Medium),
        (Tier::OlderEasy, age_group.older(), Difficulty::Easy),
    ]
}

/// Generate a shuffled diagnostic assessment of up to [`ASSESSMENT_SIZE`]
/// questions for the given subject and age group.
///
/// Every invocation draws fresh problems — content generators are
/// random — so no caching happens here. A tier whose generator is missing
/// is handled per `policy`; if *no* tier produces anything the registry is
/// effectively absent for this subject and the result is
/// [`AssessmentError::NoQuestions`].
pub fn generate_assessment(
    source: &dyn ContentSource,
    subject: Subject,
    age_group: AgeGroup,
    policy: MissingTierPolicy,
    rng: &mut dyn RngCore,
) -> Result<Vec<AssessmentQuestion>, AssessmentError> {
    let mut questions = Vec::with_capacity(ASSESSMENT_SIZE);

    for (tier, tier_age, tier_difficulty) in tier_plan(age_group) {
        match source.problems(subject, tier_age, tier_difficulty, QUESTIONS_PER_TIER, rng) {
            Some(problems) => {
                questions.extend(problems.into_iter().map(|p| AssessmentQuestion {
                    subject,
                    prompt: p.prompt,
                    expected: p.answer,
                    source_age: tier_age,
                    source_difficulty: tier_difficulty,
                    tier,
                }));
            }
            None if policy == MissingTierPolicy::Fail => {
                return Err(AssessmentError::Configuration {
                    subject,
                    age_group: tier_age,
                    difficulty: tier_difficulty,
                });
            }
            None => {
                tracing::warn!(
                    %subject,
                    age_group = %tier_age,
                    difficulty = %tier_difficulty,
                    "no generator for tier, assessment will be shorter"
                );
            }
        }
    }

    if questions.is_empty() {
        return Err(AssessmentError::NoQuestions { subject });
    }

    questions.shuffle(rng);
    questions.truncate(ASSESSMENT_SIZE);
    Ok(questions)
}

/// Generate a reproducible assessment seeded by the child identity, so a
/// server-side validator can regenerate the identical question set.
pub fn generate_seeded_assessment(
    source: &dyn ContentSource,
    subject: Subject,
    age_group: AgeGroup,
    policy: MissingTierPolicy,
    child_id: &str,
) -> Result<Vec<AssessmentQuestion>, AssessmentError> {
    let mut rng = seeded_rng(&format!("assessment-{child_id}-{subject}"));
    generate_assessment(source, subject, age_group, policy, &mut rng)
}

/// A deterministic RNG derived from a seed string via [`hash32`].
pub fn seeded_rng(seed: &str) -> SmallRng {
    SmallRng::seed_from_u64(u64::from(hash32(seed)))
}

/// 32-bit string hash used for seed derivation. Must stay identical on
/// every party that regenerates seeded content.
pub fn hash32(s: &str) -> u32 {
    let mut hash: i32 = 0;
    for c in s.chars() {
        hash = hash.wrapping_shl(5).wrapping_sub(hash).wrapping_add(c as i32);
    }
    hash.unsigned_abs()
}
