//! HTTP client for the server-side scoring validator.
//!
//! The validator exposes two callable endpoints that regenerate the
//! child's seeded question set server-side and grade the raw answers,
//! so a tampered client cannot inflate its own scores. Every failure maps
//! to a [`ValidatorError`] the engine turns into a local-scoring fallback.

use std::time::Duration;

use async_trait::async_trait;
use tracing::instrument;

use learnstep_core::error::ValidatorError;
use learnstep_core::traits::{
    LevelTestRequest, LevelTestResponse, RemoteValidator, ValidateRequest, ValidateResponse,
};

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Remote validator over HTTP.
pub struct HttpValidator {
    base_url: String,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl HttpValidator {
    pub fn new(base_url: &str) -> Self {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to build HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_secs: timeout.as_secs(),
            client,
        }
    }

    async fn post<Req, Resp>(&self, path: &str, request: &Req) -> Result<Resp, ValidatorError>
    where
        Req: serde::Serialize,
        Resp: serde::de::DeserializeOwned,
    {
        let response = self
            .client
            .post(format!("{}{path}", self.base_url))
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ValidatorError::Timeout(self.timeout_secs)
                } else if e.is_connect() {
                    ValidatorError::Network(format!(
                        "validator not reachable at {}",
                        self.base_url
                    ))
                } else {
                    ValidatorError::Network(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        if status >= 400 {
            let message = response.text().await.unwrap_or_default();
            return Err(ValidatorError::Api { status, message });
        }

        response
            .json::<Resp>()
            .await
            .map_err(|e| ValidatorError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl RemoteValidator for HttpValidator {
    fn name(&self) -> &str {
        "http"
    }

    #[instrument(skip(self, request), fields(child_id = %request.child_id, subject = %request.subject))]
    async fn submit_assessment(
        &self,
        request: &ValidateRequest,
    ) -> Result<ValidateResponse, ValidatorError> {
        self.post("/v1/assessments:submit", request).await
    }

    #[instrument(skip(self, request), fields(child_id = %request.child_id, subject = %request.subject))]
    async fn submit_level_test(
        &self,
        request: &LevelTestRequest,
    ) -> Result<LevelTestResponse, ValidatorError> {
        self.post("/v1/level-tests:submit", request).await
    }
}
