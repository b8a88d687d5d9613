//! Error taxonomy for the assessment engine and its collaborators.
//!
//! These types let callers classify failures without string matching:
//! storage outages are retried or degraded around, validator failures
//! trigger the local-scoring fallback, and configuration gaps surface as
//! assessment errors.

use thiserror::Error;

use crate::model::{AgeGroup, Difficulty, Subject};

/// Failures from the persistence store. Absence of a record is *not* an
/// error — store reads return `Ok(None)` for missing records.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing store could not be reached.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The caller is not allowed to touch this child's records.
    #[error("permission denied: {0}")]
    PermissionDenied(String),
}

impl StorageError {
    /// Returns `true` if retrying later could succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, StorageError::Unavailable(_))
    }
}

/// Failures from the remote scoring validator. Any of these triggers the
/// transparent fallback to local scoring.
#[derive(Debug, Error)]
pub enum ValidatorError {
    /// The request timed out.
    #[error("validator timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("validator unreachable: {0}")]
    Network(String),

    /// The validator returned an error response.
    #[error("validator error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The validator responded with something we could not parse.
    #[error("invalid validator response: {0}")]
    InvalidResponse(String),
}

impl ValidatorError {
    /// Returns `true` if this failure is permanent for the current request
    /// and should not be retried before falling back.
    pub fn is_permanent(&self) -> bool {
        matches!(
            self,
            ValidatorError::Api { status, .. } if (400..500).contains(status)
        )
    }
}

/// Failures generating a diagnostic assessment.
#[derive(Debug, Error)]
pub enum AssessmentError {
    /// No content generator is registered for a required tier.
    #[error("no content generator registered for {subject} {age_group} {difficulty}")]
    Configuration {
        subject: Subject,
        age_group: AgeGroup,
        difficulty: Difficulty,
    },

    /// The content registry produced nothing at all for this subject.
    #[error("content registry has no generators for {subject}")]
    NoQuestions { subject: Subject },
}
