//! Trait seams for external collaborators.
//!
//! The content registry, persistence store, remote validator, and
//! handwriting recognizer are all out-of-scope subsystems (static content
//! tables, Firestore, Cloud Functions, an ML model). The engine only ever
//! talks to them through these traits, so tests and offline operation swap
//! in local implementations.

use async_trait::async_trait;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::error::{StorageError, ValidatorError};
use crate::model::{
    AgeGroup, AssessmentRecord, CompletionRecord, Difficulty, ExpectedAnswer, Level, Problem,
    QuestionFeedback, Subject,
};

// ---------------------------------------------------------------------------
// Content generator registry
// ---------------------------------------------------------------------------

/// A registry of problem generators keyed by (subject, age group,
/// difficulty). English content is keyed by (age group, difficulty) only;
/// that shows up here as `Subject::English`.
///
/// Returning `None` means no generator is registered for the triple — a
/// degraded mode the tier generator handles by policy, not a failure of
/// the registry itself.
pub trait ContentSource: Send + Sync {
    fn problems(
        &self,
        subject: Subject,
        age_group: AgeGroup,
        difficulty: Difficulty,
        count: usize,
        rng: &mut dyn RngCore,
    ) -> Option<Vec<Problem>>;
}

// ---------------------------------------------------------------------------
// Persistence store
// ---------------------------------------------------------------------------

/// Aggregate completion state for one week of assignments, used by the
/// level-up test eligibility check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklySummary {
    /// ISO week string, e.g. "2026-W32".
    pub week: String,
    pub completed_pages: u32,
    pub total_pages: u32,
    /// Average percentage over completed pages, 0–100.
    pub average_score: u8,
}

impl WeeklySummary {
    /// A week counts toward level-test eligibility only when every page
    /// was finished and it produced a score.
    pub fn is_complete(&self) -> bool {
        self.total_pages > 0 && self.completed_pages >= self.total_pages && self.average_score > 0
    }
}

/// Stored outcome of a level-up test attempt, one per (child, module,
/// week). Its presence blocks a retake within the same week.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelTestRecord {
    pub week: String,
    pub current_level: Level,
    pub new_level: Level,
    /// Percentage 0–100.
    pub score: u8,
    pub correct: u32,
    pub total: u32,
    pub passed: bool,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Async persistence adapter for assessment and completion records, keyed
/// by child + module + identifier composites.
///
/// Transport failures surface as [`StorageError`]; a record that simply
/// does not exist is `Ok(None)`.
#[async_trait]
pub trait CompletionStore: Send + Sync {
    async fn assessment(
        &self,
        child_id: &str,
        subject: Subject,
    ) -> Result<Option<AssessmentRecord>, StorageError>;

    /// Overwrites any existing record for (child, subject).
    async fn put_assessment(
        &self,
        child_id: &str,
        subject: Subject,
        record: AssessmentRecord,
    ) -> Result<(), StorageError>;

    async fn completion(
        &self,
        child_id: &str,
        module: &str,
        identifier: &str,
    ) -> Result<Option<CompletionRecord>, StorageError>;

    /// Overwrites any existing record for (child, module, identifier) —
    /// last write wins.
    async fn put_completion(
        &self,
        child_id: &str,
        module: &str,
        identifier: &str,
        record: CompletionRecord,
    ) -> Result<(), StorageError>;

    /// All completion records for a module whose identifier starts with
    /// `prefix` (e.g. "addition-level1").
    async fn completions_with_prefix(
        &self,
        child_id: &str,
        module: &str,
        prefix: &str,
    ) -> Result<Vec<CompletionRecord>, StorageError>;

    /// The most recent weekly assignment summaries, newest first.
    async fn weekly_summaries(
        &self,
        child_id: &str,
        module: &str,
        limit: usize,
    ) -> Result<Vec<WeeklySummary>, StorageError>;

    async fn level_test(
        &self,
        child_id: &str,
        module: &str,
        week: &str,
    ) -> Result<Option<LevelTestRecord>, StorageError>;

    async fn put_level_test(
        &self,
        child_id: &str,
        module: &str,
        record: LevelTestRecord,
    ) -> Result<(), StorageError>;
}

// ---------------------------------------------------------------------------
// Remote validator
// ---------------------------------------------------------------------------

/// Request to score an assessment server-side. The server regenerates the
/// same seeded question set and grades the raw answers itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateRequest {
    pub child_id: String,
    pub subject: Subject,
    /// Raw answer text in question order; empty string for blank.
    pub answers: Vec<String>,
}

/// Authoritative scoring result from the validator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateResponse {
    pub correct: u32,
    pub total: u32,
    /// Percentage 0–100.
    pub score: u8,
    pub level: Level,
    pub age_group: AgeGroup,
    pub difficulty: Difficulty,
    pub reason: String,
    pub feedback: Vec<QuestionFeedback>,
}

/// Request to score a level-up test server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelTestRequest {
    pub child_id: String,
    pub subject: Subject,
    /// ISO week string the test belongs to.
    pub week: String,
    pub answers: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelTestResponse {
    pub correct: u32,
    pub total: u32,
    /// Percentage 0–100.
    pub score: u8,
    pub passed: bool,
    pub new_level: Level,
    pub feedback: Vec<QuestionFeedback>,
}

/// Server-side scoring service. Preferred over local scoring when
/// reachable — it exists to prevent client-side tampering — but every
/// caller must fall back to the local algorithm when it is not.
#[async_trait]
pub trait RemoteValidator: Send + Sync {
    /// Human-readable validator name (e.g. "http").
    fn name(&self) -> &str;

    async fn submit_assessment(
        &self,
        request: &ValidateRequest,
    ) -> Result<ValidateResponse, ValidatorError>;

    async fn submit_level_test(
        &self,
        request: &LevelTestRequest,
    ) -> Result<LevelTestResponse, ValidatorError>;
}

// ---------------------------------------------------------------------------
// Handwriting recognizer
// ---------------------------------------------------------------------------

/// A handwriting capture handed over from the canvas widget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capture {
    /// Grayscale pixel buffer, row-major.
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Best-effort recognition result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recognition {
    /// The recognized digit or character sequence, if any.
    pub value: Option<String>,
    /// Classifier confidence 0.0–1.0.
    pub confidence: f32,
    /// The capture contained no strokes at all.
    pub is_empty: bool,
}

/// Black-box digit/character classifier. The expected answer, when known,
/// lets implementations bias toward plausible confusions.
#[async_trait]
pub trait Recognizer: Send + Sync {
    async fn recognize(
        &self,
        capture: &Capture,
        expected: Option<&ExpectedAnswer>,
    ) -> anyhow::Result<Recognition>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekly_summary_completeness() {
        let done = WeeklySummary {
            week: "2026-W30".into(),
            completed_pages: 5,
            total_pages: 5,
            average_score: 92,
        };
        assert!(done.is_complete());

        let short = WeeklySummary {
            completed_pages: 4,
            ..done.clone()
        };
        assert!(!short.is_complete());

        let unconfigured = WeeklySummary {
            total_pages: 0,
            completed_pages: 0,
            ..done
        };
        assert!(!unconfigured.is_complete());
    }

    #[test]
    fn validate_request_serde_roundtrip() {
        let request = ValidateRequest {
            child_id: "child-1".into(),
            subject: Subject::Addition,
            answers: vec!["7".into(), String::new(), "12".into()],
        };
        let json = serde_json::to_string(&request).unwrap();
        let back: ValidateRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back.subject, Subject::Addition);
        assert_eq!(back.answers.len(), 3);
    }
}
