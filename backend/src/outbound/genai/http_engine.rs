//! Reqwest-backed recommendation engine.
//!
//! Owns transport only: JSON request bodies, bearer authentication, timeout
//! and status mapping, and decoding. Output validation happens in the
//! domain.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;
use zeroize::Zeroizing;

use super::dto::{
    RecommendationsRequestDto, RecommendationsResponseDto, SummaryRequestDto, SummaryResponseDto,
};
use crate::domain::ports::{RecommendationEngine, RecommendationEngineError};
use crate::domain::{RecommendationCandidate, RecommendationRequest, SummaryRequest};

const RECOMMENDATIONS_PATH: &str = "recommendations";
const SUMMARIES_PATH: &str = "summaries";

/// Recommendation engine calling a hosted JSON endpoint.
pub struct GenAiHttpEngine {
    client: Client,
    endpoint: Url,
    api_key: Option<Zeroizing<String>>,
}

impl GenAiHttpEngine {
    /// Build an engine with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        endpoint: Url,
        api_key: Option<Zeroizing<String>>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }

    fn url_for(&self, path: &str) -> Result<Url, RecommendationEngineError> {
        let mut base = self.endpoint.clone();
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }
        base.join(path)
            .map_err(|error| RecommendationEngineError::transport(error.to_string()))
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, RecommendationEngineError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let mut request = self
            .client
            .post(self.url_for(path)?)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key.as_str());
        }
        let response = request.send().await.map_err(map_transport_error)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, bytes.as_ref()));
        }
        decode(bytes.as_ref())
    }
}

#[async_trait]
impl RecommendationEngine for GenAiHttpEngine {
    async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Vec<RecommendationCandidate>, RecommendationEngineError> {
        let response: RecommendationsResponseDto = self
            .post_json(
                RECOMMENDATIONS_PATH,
                &RecommendationsRequestDto::from(request),
            )
            .await?;
        Ok(response.recommendations)
    }

    async fn summarise(&self, request: &SummaryRequest) -> Result<String, RecommendationEngineError> {
        let response: SummaryResponseDto = self
            .post_json(SUMMARIES_PATH, &SummaryRequestDto::from(request))
            .await?;
        Ok(response.summary)
    }
}

fn decode<R: DeserializeOwned>(body: &[u8]) -> Result<R, RecommendationEngineError> {
    serde_json::from_slice(body).map_err(|error| {
        RecommendationEngineError::decode(format!("invalid engine JSON payload: {error}"))
    })
}

fn map_transport_error(error: reqwest::Error) -> RecommendationEngineError {
    if error.is_timeout() {
        RecommendationEngineError::transport(format!("timed out: {error}"))
    } else {
        RecommendationEngineError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> RecommendationEngineError {
    let preview = body_preview(body);
    warn!(status = status.as_u16(), body = %preview, "recommendation engine rejected request");
    RecommendationEngineError::status(status.as_u16())
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
