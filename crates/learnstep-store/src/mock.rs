//! Test doubles for the validator and recognizer seams.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use learnstep_core::error::ValidatorError;
use learnstep_core::model::ExpectedAnswer;
use learnstep_core::traits::{
    Capture, LevelTestRequest, LevelTestResponse, Recognition, Recognizer, RemoteValidator,
    ValidateRequest, ValidateResponse,
};

/// A mock validator with configurable responses and failure injection.
pub struct MockValidator {
    assessment_response: Mutex<Option<ValidateResponse>>,
    level_test_response: Mutex<Option<LevelTestResponse>>,
    fail: AtomicBool,
    calls: AtomicU32,
    last_request: Mutex<Option<ValidateRequest>>,
}

impl MockValidator {
    /// A validator that always fails, for exercising fallback paths.
    pub fn failing() -> Self {
        let mock = Self::default();
        mock.fail.store(true, Ordering::Relaxed);
        mock
    }

    pub fn with_assessment_response(response: ValidateResponse) -> Self {
        let mock = Self::default();
        *mock.assessment_response.lock().unwrap() = Some(response);
        mock
    }

    pub fn with_level_test_response(response: LevelTestResponse) -> Self {
        let mock = Self::default();
        *mock.level_test_response.lock().unwrap() = Some(response);
        mock
    }

    pub fn set_failing(&self, failing: bool) {
        self.fail.store(failing, Ordering::Relaxed);
    }

    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::Relaxed)
    }

    /// The last assessment request received.
    pub fn last_request(&self) -> Option<ValidateRequest> {
        self.last_request.lock().unwrap().clone()
    }

    fn check(&self) -> Result<(), ValidatorError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        if self.fail.load(Ordering::Relaxed) {
            Err(ValidatorError::Network("mock validator offline".to_string()))
        } else {
            Ok(())
        }
    }
}

impl Default for MockValidator {
    fn default() -> Self {
        Self {
            assessment_response: Mutex::new(None),
            level_test_response: Mutex::new(None),
            fail: AtomicBool::new(false),
            calls: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }
}

#[async_trait]
impl RemoteValidator for MockValidator {
    fn name(&self) -> &str {
        "mock"
    }

    async fn submit_assessment(
        &self,
        request: &ValidateRequest,
    ) -> Result<ValidateResponse, ValidatorError> {
        self.check()?;
        *self.last_request.lock().unwrap() = Some(request.clone());
        self.assessment_response
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| ValidatorError::InvalidResponse("no response configured".to_string()))
    }

    async fn submit_level_test(
        &self,
        _request: &LevelTestRequest,
    ) -> Result<LevelTestResponse, ValidatorError> {
        self.check()?;
        self.level_test_response
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| ValidatorError::InvalidResponse("no response configured".to_string()))
    }
}

/// A mock recognizer that replays a fixed sequence of recognitions.
pub struct MockRecognizer {
    results: Mutex<Vec<Recognition>>,
    calls: AtomicU32,
}

impl MockRecognizer {
    /// Recognize the given values in order; once exhausted, captures read
    /// as empty.
    pub fn returning<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let results = values
            .into_iter()
            .map(|v| Recognition {
                value: Some(v.into()),
                confidence: 0.9,
                is_empty: false,
            })
            .collect();
        Self {
            results: Mutex::new(results),
            calls: AtomicU32::new(0),
        }
    }

    /// A recognizer that always reports an empty capture.
    pub fn empty() -> Self {
        Self {
            results: Mutex::new(Vec::new()),
            calls: AtomicU32::new(0),
        }
    }

    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl Recognizer for MockRecognizer {
    async fn recognize(
        &self,
        _capture: &Capture,
        _expected: Option<&ExpectedAnswer>,
    ) -> anyhow::Result<Recognition> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        let mut results = self.results.lock().unwrap();
        if results.is_empty() {
            Ok(Recognition {
                value: None,
                confidence: 0.0,
                is_empty: true,
            })
        } else {
            Ok(results.remove(0))
        }
    }
}
