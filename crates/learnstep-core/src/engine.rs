//! Central assessment orchestrator.
//!
//! Ties the content registry, scorer, persistence store, and the optional
//! remote validator and handwriting recognizer together into the
//! begin/submit flow the UI drives. The remote validator is authoritative
//! when reachable; local scoring is the mandatory fallback, and record
//! persistence is best-effort — the child always sees their result.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::assessment::{generate_assessment, generate_seeded_assessment, MissingTierPolicy};
use crate::error::AssessmentError;
use crate::model::{
    AgeGroup, Answer, AssessmentQuestion, AssessmentRecord, Subject,
};
use crate::scoring::{assign_level, grade, LevelAssignment, ScoreBands, ScoreSummary};
use crate::traits::{
    Capture, CompletionStore, ContentSource, RemoteValidator, Recognizer, ValidateRequest,
};

/// Configuration for the assessment engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub bands: ScoreBands,
    pub missing_tier_policy: MissingTierPolicy,
    /// Soft timeout for the remote validator before falling back to local
    /// scoring.
    pub validator_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            bands: ScoreBands::default(),
            missing_tier_policy: MissingTierPolicy::default(),
            validator_timeout: Duration::from_secs(10),
        }
    }
}

/// Which scoring path produced an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidatedBy {
    Local,
    Remote,
}

/// The result of submitting an assessment. Always produced, even when the
/// validator and the store are both down.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentOutcome {
    pub summary: ScoreSummary,
    pub assignment: LevelAssignment,
    pub validated_by: ValidatedBy,
    /// Whether the assessment record reached the store. A `false` here is
    /// surfaced as a non-blocking warning, never a failed submission.
    pub saved: bool,
}

/// An answer as it arrives from the UI, before recognition and parsing.
#[derive(Debug, Clone)]
pub enum SubmittedAnswer {
    Typed(String),
    Handwritten(Capture),
}

/// The central assessment engine.
pub struct AssessmentEngine {
    source: Arc<dyn ContentSource>,
    store: Arc<dyn CompletionStore>,
    validator: Option<Arc<dyn RemoteValidator>>,
    recognizer: Option<Arc<dyn Recognizer>>,
    config: EngineConfig,
}

impl AssessmentEngine {
    pub fn new(
        source: Arc<dyn ContentSource>,
        store: Arc<dyn CompletionStore>,
        config: EngineConfig,
    ) -> Self {
        Self {
            source,
            store,
            validator: None,
            recognizer: None,
            config,
        }
    }

    /// Attach a server-side validator. Scoring prefers it when reachable.
    pub fn with_validator(mut self, validator: Arc<dyn RemoteValidator>) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Attach a handwriting recognizer for pencil-mode answers.
    pub fn with_recognizer(mut self, recognizer: Arc<dyn Recognizer>) -> Self {
        self.recognizer = Some(recognizer);
        self
    }

    /// Generate the question set for a new assessment.
    ///
    /// With a validator attached the set is seeded by the child identity
    /// so the server can regenerate it for authoritative grading;
    /// otherwise every invocation draws fresh random questions.
    pub fn begin(
        &self,
        child_id: &str,
        subject: Subject,
        age_group: AgeGroup,
    ) -> Result<Vec<AssessmentQuestion>, AssessmentError> {
        if self.validator.is_some() {
            generate_seeded_assessment(
                self.source.as_ref(),
                subject,
                age_group,
                self.config.missing_tier_policy,
                child_id,
            )
        } else {
            let mut rng = SmallRng::from_entropy();
            generate_assessment(
                self.source.as_ref(),
                subject,
                age_group,
                self.config.missing_tier_policy,
                &mut rng,
            )
        }
    }

    /// Grade a completed assessment, assign a level, and persist the
    /// record. Never fails: degraded collaborators downgrade the outcome
    /// (`validated_by`, `saved`) instead of erroring.
    pub async fn submit(
        &self,
        child_id: &str,
        subject: Subject,
        age_group: AgeGroup,
        questions: &[AssessmentQuestion],
        answers: Vec<SubmittedAnswer>,
    ) -> AssessmentOutcome {
        let resolved = self.resolve_answers(questions, answers).await;

        let (summary, assignment, validated_by) = match self
            .validate_remotely(child_id, subject, &resolved)
            .await
        {
            Some((summary, assignment)) => (summary, assignment, ValidatedBy::Remote),
            None => {
                let summary = grade(questions, &resolved);
                let assignment = assign_level(summary.percentage, age_group, &self.config.bands);
                (summary, assignment, ValidatedBy::Local)
            }
        };

        let record = AssessmentRecord {
            level: Some(assignment.level),
            score: Some(summary.percentage),
            date: Utc::now(),
            taken: true,
        };
        let saved = match self.store.put_assessment(child_id, subject, record).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(%subject, child_id, error = %e, "failed to save assessment record");
                false
            }
        };

        AssessmentOutcome {
            summary,
            assignment,
            validated_by,
            saved,
        }
    }

    /// Resolve submitted answers into gradeable values. Handwritten
    /// captures go through the recognizer; recognition failures and
    /// missing recognizers degrade to blank (graded incorrect), they do
    /// not abort the submission. Questions are independent, so captures
    /// are recognized concurrently.
    async fn resolve_answers(
        &self,
        questions: &[AssessmentQuestion],
        answers: Vec<SubmittedAnswer>,
    ) -> Vec<Answer> {
        let resolutions = answers.into_iter().enumerate().map(|(i, submitted)| {
            let expected = questions.get(i).map(|q| q.expected.clone());
            async move {
                match submitted {
                    SubmittedAnswer::Typed(raw) => Answer::parse(&raw),
                    SubmittedAnswer::Handwritten(capture) => {
                        let Some(recognizer) = &self.recognizer else {
                            tracing::warn!(
                                question = i,
                                "handwritten answer but no recognizer configured"
                            );
                            return Answer::Blank;
                        };
                        match recognizer.recognize(&capture, expected.as_ref()).await {
                            Ok(recognition) if recognition.is_empty => Answer::Blank,
                            Ok(recognition) => match recognition.value {
                                Some(value) => Answer::parse(&value),
                                None => Answer::Blank,
                            },
                            Err(e) => {
                                tracing::warn!(question = i, error = %e, "recognition failed");
                                Answer::Blank
                            }
                        }
                    }
                }
            }
        });
        futures::future::join_all(resolutions).await
    }

    /// Try the remote validator under the soft timeout. `None` means
    /// "fall back to local scoring" for any reason — absent validator,
    /// timeout, transport error, or an error response.
    async fn validate_remotely(
        &self,
        child_id: &str,
        subject: Subject,
        answers: &[Answer],
    ) -> Option<(ScoreSummary, LevelAssignment)> {
        let validator = self.validator.as_ref()?;
        let request = ValidateRequest {
            child_id: child_id.to_string(),
            subject,
            answers: answers
                .iter()
                .map(|a| a.as_text().unwrap_or_default())
                .collect(),
        };

        let result = tokio::time::timeout(
            self.config.validator_timeout,
            validator.submit_assessment(&request),
        )
        .await;

        match result {
            Ok(Ok(response)) => {
                let summary = ScoreSummary {
                    correct_count: response.correct,
                    total: response.total,
                    percentage: response.score,
                    feedback: response.feedback,
                };
                let assignment = LevelAssignment {
                    level: response.level,
                    age_group: response.age_group,
                    difficulty: response.difficulty,
                    reason: response.reason,
                };
                Some((summary, assignment))
            }
            Ok(Err(e)) => {
                tracing::warn!(
                    validator = validator.name(),
                    error = %e,
                    "validator failed, falling back to local scoring"
                );
                None
            }
            Err(_) => {
                tracing::warn!(
                    validator = validator.name(),
                    timeout_secs = self.config.validator_timeout.as_secs(),
                    "validator timed out, falling back to local scoring"
                );
                None
            }
        }
    }
}
