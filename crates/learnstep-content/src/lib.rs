//! learnstep-content — Built-in content generator registry.
//!
//! Implements the [`ContentSource`] seam with the platform's own problem
//! generators: parameterized math generators for the four operations
//! across every age group and difficulty, and a compact English bank
//! keyed by (age group, difficulty). Worksheet pages are generated
//! deterministically from a seed string, so a server can regenerate the
//! exact page a child saw.

pub mod english;
pub mod math;
pub mod pages;

use rand::RngCore;

use learnstep_core::model::{AgeGroup, Difficulty, Problem, Subject};
use learnstep_core::traits::ContentSource;

/// The registry of built-in generators. Stateless; all randomness comes
/// from the caller's RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinContent;

impl ContentSource for BuiltinContent {
    fn problems(
        &self,
        subject: Subject,
        age_group: AgeGroup,
        difficulty: Difficulty,
        count: usize,
        rng: &mut dyn RngCore,
    ) -> Option<Vec<Problem>> {
        match subject {
            Subject::English => english::problems(age_group, difficulty, count, rng),
            _ => {
                let config = math::config_for(subject, age_group, difficulty)?;
                Some((0..count).map(|_| config.generate(rng)).collect())
            }
        }
    }
}
