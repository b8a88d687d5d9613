//! learnstep-progress — Completion gating and level progression.
//!
//! Decides what a child may navigate to: which pages count as completed,
//! whether a page or level is unlocked, and when a child has earned a
//! level-up test. All decisions are derived from completion records read
//! through the store seam — there is no stored "locked/unlocked" state.

pub mod gate;
pub mod rules;
